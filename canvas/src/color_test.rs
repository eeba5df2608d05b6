#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parse_hex_supports_short_and_long_forms() {
    assert_eq!(Rgb::parse_hex("#ABC"), Some(Rgb::new(170, 187, 204)));
    assert_eq!(Rgb::parse_hex("  #a1B2c3 "), Some(Rgb::new(161, 178, 195)));
}

#[test]
fn parse_hex_rejects_invalid_inputs() {
    assert_eq!(Rgb::parse_hex("AABBCC"), None);
    assert_eq!(Rgb::parse_hex("#12"), None);
    assert_eq!(Rgb::parse_hex("#abcd"), None);
    assert_eq!(Rgb::parse_hex("#12GG34"), None);
    assert_eq!(Rgb::parse_hex("#aé"), None);
}

#[test]
fn to_hex_is_canonical_lowercase() {
    assert_eq!(Rgb::new(0x3B, 0x82, 0xF6).to_hex(), "#3b82f6");
    assert_eq!(Rgb::BLACK.to_string(), "#000000");
}

#[test]
fn from_str_reports_the_offending_input() {
    let err = "blue".parse::<Rgb>().unwrap_err();
    assert!(matches!(err, CanvasError::InvalidColor(ref s) if s == "blue"));
}

#[test]
fn serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgb::new(6, 182, 212)).unwrap();
    assert_eq!(json, "\"#06b6d4\"");
    let back: Rgb = serde_json::from_str("\"#06B6D4\"").unwrap();
    assert_eq!(back, Rgb::new(6, 182, 212));
    assert!(serde_json::from_str::<Rgb>("\"teal\"").is_err());
}

#[test]
fn distance_is_euclidean() {
    assert_eq!(Rgb::BLACK.distance_sq(Rgb::new(3, 4, 0)), 25);
    assert_eq!(Rgb::BLACK.distance(Rgb::new(3, 4, 0)), 5.0);
    assert_eq!(Rgb::WHITE.distance(Rgb::WHITE), 0.0);
}

#[test]
fn rgba_css_uses_hex_when_opaque() {
    assert_eq!(Rgb::new(255, 0, 0).opaque().css(), "#ff0000");
    assert_eq!(Rgba::new(0, 0, 0, 0.2).css(), "rgba(0, 0, 0, 0.2)");
}
