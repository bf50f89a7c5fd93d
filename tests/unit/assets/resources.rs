use super::*;

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn static_resources_resolve_and_miss() {
    let res = StaticResources::new()
        .with_color("text_color", Rgba8::WHITE)
        .with_dimension("text_size", 160.0)
        .with_font("clock", FontRef::new("clock", vec![1u8, 2, 3]));

    assert_eq!(res.resolve_color("text_color").unwrap(), Rgba8::WHITE);
    assert_eq!(res.resolve_dimension("text_size").unwrap(), 160.0);
    assert_eq!(res.resolve_font("clock").unwrap().name(), "clock");

    let err = res.resolve_color("nope").unwrap_err();
    assert!(matches!(err, ClockError::Resource(_)));
    assert!(matches!(
        res.decode_image("back_wall"),
        Err(ClockError::Resource(_))
    ));
}

#[test]
fn manifest_parses_sections() {
    let json = r##"{
        "images": { "back_wall": "images/back.png" },
        "fonts": { "cl": "./fonts/CL.ttf" },
        "colors": { "text_color": "#ff000080", "stroke": [0.0, 1.0, 0.0] },
        "dimensions": { "text_size": 96.0 }
    }"##;
    let m = ResourceManifest::from_json_str(json, "/tmp/res").unwrap();

    assert_eq!(m.resolve_color("text_color").unwrap(), Rgba8::new(255, 0, 0, 128));
    assert_eq!(m.resolve_color("stroke").unwrap(), Rgba8::new(0, 255, 0, 255));
    assert_eq!(m.resolve_dimension("text_size").unwrap(), 96.0);
    assert_eq!(m.fonts.get("cl").map(String::as_str), Some("fonts/CL.ttf"));
}

#[test]
fn manifest_rejects_escaping_paths_and_unknown_fields() {
    let err = ResourceManifest::from_json_str(r#"{"images": {"a": "../x.png"}}"#, ".").unwrap_err();
    assert!(matches!(err, ClockError::Validation(_)));

    let err = ResourceManifest::from_json_str(r#"{"sounds": {}}"#, ".").unwrap_err();
    assert!(matches!(err, ClockError::Serde(_)));

    let err =
        ResourceManifest::from_json_str(r#"{"dimensions": {"text_size": -1.0}}"#, ".").unwrap_err();
    assert!(matches!(err, ClockError::Validation(_)));
}

#[test]
fn manifest_missing_file_is_a_resource_error() {
    let m = ResourceManifest::from_json_str(
        r#"{"images": {"back_wall": "does/not/exist.png"}}"#,
        std::env::temp_dir(),
    )
    .unwrap();
    assert!(matches!(
        m.decode_image("back_wall"),
        Err(ClockError::Resource(_))
    ));
}

#[test]
fn manifest_reads_files_relative_to_root() {
    let dir = std::env::temp_dir().join(format!("neonclock-manifest-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("images")).unwrap();

    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    img.save(dir.join("images/bg.png")).unwrap();
    std::fs::write(
        dir.join("manifest.json"),
        r#"{"images": {"back_wall": "images/bg.png"}}"#,
    )
    .unwrap();

    let m = ResourceManifest::from_path(&dir.join("manifest.json")).unwrap();
    assert_eq!(m.root(), dir.as_path());
    let bg = m.decode_image("back_wall").unwrap();
    assert_eq!((bg.width(), bg.height()), (2, 1));

    let _ = std::fs::remove_dir_all(&dir);
}
