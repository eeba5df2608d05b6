use super::*;

#[test]
fn detect_follows_preference() {
    let dark = StaticEnvironment { dark: true, ..Default::default() };
    assert_eq!(Theme::detect(&dark), Theme::Dark);
    assert_eq!(Theme::detect(&StaticEnvironment::default()), Theme::Light);
}

#[test]
fn backgrounds_match_the_stock_colors() {
    assert_eq!(Theme::Light.background().to_hex(), "#ffffff");
    assert_eq!(Theme::Dark.background().to_hex(), "#1a1a1a");
}

#[test]
fn overlay_colors_css() {
    assert_eq!(Theme::Light.grid_line().css(), "rgba(0, 0, 0, 0.2)");
    assert_eq!(Theme::Dark.grid_line().css(), "rgba(255, 255, 255, 0.3)");
    assert_eq!(Theme::Light.sub_grid_line().css(), "rgba(0, 0, 0, 0.1)");
    assert_eq!(Theme::Dark.border().css(), "rgba(255, 255, 255, 0.3)");
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
    assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
    assert!("sepia".parse::<Theme>().is_err());
}

#[test]
fn serde_lowercase() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
}
