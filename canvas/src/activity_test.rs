use super::*;

// =============================================================
// Activity
// =============================================================

#[test]
fn deserializes_backend_shape() {
    let json = r#"{
        "id": "abc",
        "level": "advanced",
        "title": "Night Sky",
        "description": "Stars",
        "referenceImageUrl": "https://example.test/sky.png"
    }"#;
    let activity: Activity = serde_json::from_str(json).unwrap();
    assert_eq!(activity.level, Level::Advanced);
    assert_eq!(activity.reference_image_url, "https://example.test/sky.png");
    assert!(activity.colors.is_none());
}

#[test]
fn missing_level_defaults_to_beginner() {
    let activity: Activity = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
    assert_eq!(activity.level, Level::Beginner);
    assert_eq!(activity.display_title(), "x");
}

#[test]
fn own_colors_win() {
    let mut activity = Activity::new("calm-1", Level::Beginner);
    activity.colors = Some(vec![Rgb::WHITE]);
    let palette = activity.palette(&PaletteCatalog::builtin()).unwrap();
    assert_eq!(palette.colors(), &[Rgb::WHITE]);
}

#[test]
fn catalog_id_then_mood_then_session() {
    let catalog = PaletteCatalog::builtin();
    let by_id = Activity::new("stressed-2", Level::Beginner).palette(&catalog).unwrap();
    assert_eq!(by_id.first().to_hex(), "#0ea5e9");

    let mut by_mood = Activity::new("server-uuid", Level::Beginner);
    by_mood.mood = Some("happy".into());
    assert_eq!(by_mood.palette(&catalog).unwrap().first().to_hex(), "#f472b6");

    let fallback = Activity::new("server-uuid", Level::Beginner).palette(&catalog).unwrap();
    assert_eq!(fallback.len(), 8);
}

#[test]
fn empty_color_list_falls_through() {
    let mut activity = Activity::new("calm-2", Level::Beginner);
    activity.colors = Some(Vec::new());
    let palette = activity.palette(&PaletteCatalog::builtin()).unwrap();
    assert_eq!(palette.first().to_hex(), "#86efac");
}

#[test]
fn from_entry_copies_title_and_mood() {
    let catalog = PaletteCatalog::builtin();
    let activity = Activity::from_entry(catalog.entry("focused-2").unwrap(), Level::Expert);
    assert_eq!(activity.display_title(), "Mandalas");
    assert_eq!(activity.mood.as_deref(), Some("focused"));
}

// =============================================================
// CompletionReport
// =============================================================

#[test]
fn report_rounds_duration_up_to_minutes() {
    assert_eq!(CompletionReport::new("a", 2, 4, 0, None).unwrap().duration, 0);
    assert_eq!(CompletionReport::new("a", 2, 4, 1, None).unwrap().duration, 1);
    assert_eq!(CompletionReport::new("a", 2, 4, 60, None).unwrap().duration, 1);
    assert_eq!(CompletionReport::new("a", 2, 4, 61, None).unwrap().duration, 2);
}

#[test]
fn report_rejects_out_of_range_moods() {
    assert!(matches!(CompletionReport::new("a", 0, 3, 0, None), Err(CanvasError::InvalidMood(0))));
    assert!(matches!(CompletionReport::new("a", 3, 6, 0, None), Err(CanvasError::InvalidMood(6))));
}

#[test]
fn report_serializes_camel_case_and_drops_blank_notes() {
    let report = CompletionReport::new("calm-1", 2, 5, 600, Some("  ".into())).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "activityId": "calm-1", "moodBefore": 2, "moodAfter": 5, "duration": 10 })
    );
    let with_notes = CompletionReport::new("calm-1", 2, 5, 600, Some("calmer".into())).unwrap();
    assert_eq!(serde_json::to_value(&with_notes).unwrap()["notes"], "calmer");
}
