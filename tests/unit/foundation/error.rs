use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ClockError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ClockError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(ClockError::render("x").to_string().contains("render error:"));
    assert!(
        ClockError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ClockError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
