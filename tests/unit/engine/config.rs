use super::*;
use crate::engine::fixtures;
use crate::foundation::core::Rgba8;
use serde_json::json;

#[test]
fn defaults_match_the_stock_wallpaper() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.redraw_interval(), Duration::from_millis(40));
    assert_eq!(cfg.background, "back_wall");
    assert_eq!(cfg.text_size, "text_size");
    assert_eq!(cfg.fill.font, "champagne_limousines");
    assert_eq!(cfg.stroke.stroke_width, Some(5.0));
    assert_eq!(cfg.stroke.glow_radius, Some(15.0));
    assert_eq!(cfg.glow.glow_radius, Some(45.0));
    assert_eq!(cfg.glow.stroke_width, None);
    cfg.validate().unwrap();
}

#[test]
fn empty_json_is_the_default() {
    assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
}

#[test]
fn partial_json_overrides_fields() {
    let json = json!({
        "redraw_interval_ms": 1000,
        "glow": { "color": "halo", "font": "bold", "glow_radius": 20.0 }
    });
    let cfg = EngineConfig::from_json_str(&json.to_string()).unwrap();
    assert_eq!(cfg.redraw_interval_ms, 1000);
    assert_eq!(cfg.glow.color, "halo");
    assert_eq!(cfg.stroke, EngineConfig::default().stroke);
}

#[test]
fn rejects_invalid_values() {
    let zero = json!({ "redraw_interval_ms": 0 }).to_string();
    assert!(matches!(
        EngineConfig::from_json_str(&zero),
        Err(ClockError::Validation(_))
    ));

    let negative = json!({
        "stroke": { "color": "c", "font": "f", "stroke_width": -1.0 }
    })
    .to_string();
    assert!(matches!(
        EngineConfig::from_json_str(&negative),
        Err(ClockError::Validation(_))
    ));

    let unknown = json!({ "fps": 25 }).to_string();
    assert!(matches!(
        EngineConfig::from_json_str(&unknown),
        Err(ClockError::Serde(_))
    ));
}

#[test]
fn resolves_the_three_layer_stack() {
    let res = fixtures::resources();
    let stack = EngineConfig::default().resolve_text_stack(&res).unwrap();

    assert_eq!(stack.fill.color, Rgba8::WHITE);
    assert_eq!(stack.fill.mode, PaintMode::Fill);
    assert_eq!(stack.fill.glow, Glow::None);
    assert_eq!(stack.fill.font.name(), "champagne_limousines");

    assert_eq!(stack.stroke.mode, PaintMode::Stroke { width: 5.0 });
    assert_eq!(stack.stroke.glow, Glow::Outer { radius: 15.0 });
    assert_eq!(stack.stroke.font.name(), "champagne_limousines_bold");

    assert_eq!(stack.glow.mode, PaintMode::Fill);
    assert_eq!(stack.glow.glow, Glow::Outer { radius: 45.0 });
    assert_eq!(stack.glow.color, Rgba8::new(255, 40, 160, 110));
}

#[test]
fn missing_token_is_a_resource_error() {
    let mut cfg = EngineConfig::default();
    cfg.stroke.font = "missing_font".to_owned();
    let err = cfg.resolve_text_stack(&fixtures::resources()).unwrap_err();
    assert!(matches!(err, ClockError::Resource(_)));
}

#[test]
fn from_path_reports_missing_file() {
    let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}
