use super::*;

#[test]
fn tags_resolve_by_language_prefix() {
    assert_eq!(ClockLocale::from_tag("en-US"), ClockLocale::english());
    assert_eq!(ClockLocale::from_tag("EN_gb"), ClockLocale::english());
    assert_eq!(ClockLocale::from_tag("ja_JP.UTF-8").marker(true), "午後");
    assert_eq!(ClockLocale::from_tag("ko-KR").marker(false), "오전");
}

#[test]
fn unknown_and_empty_tags_fall_back_to_english() {
    assert_eq!(ClockLocale::from_tag("tlh"), ClockLocale::english());
    assert_eq!(ClockLocale::from_tag(""), ClockLocale::english());
}

#[test]
fn placement_controls_marker_position() {
    assert_eq!(ClockLocale::english().decorate("3:05", true), "3:05 PM");
    assert_eq!(ClockLocale::from_tag("ja").decorate("3:05", true), "午後3:05");
    assert_eq!(ClockLocale::from_tag("ko").decorate("3:05", false), "오전 3:05");
}
