use super::*;

const RED: Rgb = Rgb::new(255, 0, 0);

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_diamond() {
    assert_eq!(Tool::default(), Tool::Diamond);
}

#[test]
fn only_diamond_and_eraser_stroke() {
    assert!(Tool::Diamond.strokes());
    assert!(Tool::Eraser.strokes());
    assert!(!Tool::Fill.strokes());
    assert!(!Tool::Picker.strokes());
}

#[test]
fn tool_names_round_trip() {
    for tool in [Tool::Diamond, Tool::Eraser, Tool::Fill, Tool::Picker] {
        assert_eq!(tool.as_str().parse::<Tool>().unwrap(), tool);
        let json = serde_json::to_string(&tool).unwrap();
        assert_eq!(json, format!("\"{}\"", tool.as_str()));
    }
    assert_eq!("picker".parse::<Tool>().unwrap(), Tool::Picker);
    assert!("lasso".parse::<Tool>().is_err());
}

// =============================================================
// DOM mappings
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(4), Button::Primary);
}

#[test]
fn pointer_kind_from_dom() {
    assert_eq!(PointerKind::from_dom("touch"), PointerKind::Touch);
    assert_eq!(PointerKind::from_dom("pen"), PointerKind::Pen);
    assert_eq!(PointerKind::from_dom("mouse"), PointerKind::Mouse);
    assert_eq!(PointerKind::from_dom(""), PointerKind::Mouse);
}

// =============================================================
// GestureState
// =============================================================

#[test]
fn idle_by_default() {
    let state = GestureState::default();
    assert!(state.is_idle());
    assert_eq!(state.stroke(), None);
}

#[test]
fn enter_same_cell_writes_nothing() {
    let mut state = GestureState::Pressing { cell: Cell::new(1, 1), pointer: PointerKind::Mouse, value: Some(RED) };
    assert_eq!(state.enter(Cell::new(1, 1)), None);
    assert!(matches!(state, GestureState::Pressing { .. }));
}

#[test]
fn enter_new_cell_starts_dragging() {
    let mut state = GestureState::Pressing { cell: Cell::new(1, 1), pointer: PointerKind::Touch, value: None };
    assert_eq!(state.enter(Cell::new(1, 2)), Some(None));
    assert_eq!(state, GestureState::Dragging { last: Cell::new(1, 2), pointer: PointerKind::Touch, value: None });
    assert_eq!(state.stroke(), Some((Cell::new(1, 2), None)));
}

#[test]
fn inert_and_idle_ignore_movement() {
    let mut inert = GestureState::Inert { pointer: PointerKind::Touch };
    assert_eq!(inert.enter(Cell::new(0, 0)), None);
    let mut idle = GestureState::Idle;
    assert_eq!(idle.enter(Cell::new(0, 0)), None);
    assert!(idle.is_idle());
}
