use canvas::persist::MemoryStore;
use canvas::progress::Scoring;

use super::*;
use crate::services::session::{self, SessionOptions};

fn engine(scoring: Scoring, painted: bool) -> EngineCore {
    let options = SessionOptions {
        grid_size: Some(canvas::grid::GridSize::square(10).unwrap()),
        scoring,
        ..SessionOptions::default()
    };
    let mut core = session::open(Box::new(MemoryStore::new()), "calm-1", &options).unwrap();
    if painted {
        core.set_tool(canvas::input::Tool::Fill);
        core.on_pointer_down(
            canvas::viewport::Point::new(5.0, 5.0),
            canvas::input::Button::Primary,
            canvas::input::PointerKind::Mouse,
            0.0,
        );
        core.on_pointer_up();
    }
    core
}

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("http://host/api/"), "http://host/api/v1/auth/activities/complete");
    assert_eq!(endpoint("http://host/api"), "http://host/api/v1/auth/activities/complete");
}

#[test]
fn incomplete_sessions_are_refused() {
    let core = engine(Scoring::ByLevel, true);
    let result = build(&core, 2, 4, None);
    assert!(matches!(result, Err(CliError::NotComplete(id, 50)) if id == "calm-1"));
}

#[test]
fn complete_session_builds_report() {
    let core = engine(Scoring::Unadjusted, true);
    let report = build(&core, 2, 4, Some("calmer".into())).unwrap();
    assert_eq!(report.activity_id, "calm-1");
    assert_eq!(report.notes.as_deref(), Some("calmer"));
}

#[test]
fn bad_mood_is_a_canvas_error() {
    let core = engine(Scoring::Unadjusted, true);
    assert!(matches!(build(&core, 9, 4, None), Err(CliError::Canvas(_))));
}

#[tokio::test]
async fn submit_without_token_fails_before_sending() {
    let core = engine(Scoring::Unadjusted, true);
    let report = build(&core, 2, 4, None).unwrap();
    let result = submit("http://127.0.0.1:9/api", None, &report).await;
    assert!(matches!(result, Err(CliError::MissingToken)));
}
