use super::*;

// =============================================================
// Helpers
// =============================================================

const RED: Rgb = Rgb::new(255, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn grid(edge: usize) -> Grid {
    Grid::new(GridSize::square(edge).unwrap())
}

// =============================================================
// GridSize
// =============================================================

#[test]
fn grid_size_accepts_supported_edges() {
    for edge in GridSize::SUPPORTED {
        assert_eq!(GridSize::square(edge).unwrap().total(), edge * edge);
    }
}

#[test]
fn grid_size_rejects_other_edges() {
    assert!(matches!(GridSize::square(12), Err(CanvasError::UnsupportedGridSize(12))));
    assert!(matches!(GridSize::new(20, 0), Err(CanvasError::UnsupportedGridSize(0))));
}

#[test]
fn grid_size_default_is_twenty() {
    assert_eq!(GridSize::default(), GridSize::square(20).unwrap());
}

#[test]
fn grid_size_serde_validates() {
    let size: GridSize = serde_json::from_str(r#"{"width":10,"height":10}"#).unwrap();
    assert_eq!(size.max_edge(), 10);
    assert!(serde_json::from_str::<GridSize>(r#"{"width":7,"height":7}"#).is_err());
    assert_eq!(serde_json::to_string(&size).unwrap(), r#"{"width":10,"height":10}"#);
}

// =============================================================
// Cell access
// =============================================================

#[test]
fn new_grid_is_blank() {
    let g = grid(10);
    assert_eq!(g.total(), 100);
    assert!(g.is_blank());
    assert_eq!(g.painted_count(), 0);
}

#[test]
fn set_cell_paints_and_reports_change() {
    let mut g = grid(10);
    assert!(g.set_cell(2, 3, Some(RED)).unwrap());
    assert!(!g.set_cell(2, 3, Some(RED)).unwrap());
    assert_eq!(g.get(2, 3), Some(RED));
    assert_eq!(g.cells()[2 * 10 + 3], Some(RED));
    assert_eq!(g.painted_count(), 1);
}

#[test]
fn set_cell_out_of_range_fails_without_mutation() {
    let mut g = grid(10);
    let err = g.set_cell(10, 0, Some(RED)).unwrap_err();
    assert!(matches!(err, CanvasError::OutOfBounds { row: 10, col: 0, width: 10, height: 10 }));
    assert!(g.set_cell(0, 10, Some(RED)).is_err());
    assert!(g.is_blank());
    assert_eq!(g.get(10, 0), None);
}

#[test]
fn paint_then_erase_restores_snapshot() {
    let mut g = grid(15);
    let before = g.clone();
    for (r, c) in [(0, 0), (7, 7), (14, 14)] {
        g.set_cell(r, c, Some(BLUE)).unwrap();
    }
    for (r, c) in [(0, 0), (7, 7), (14, 14)] {
        g.set_cell(r, c, None).unwrap();
    }
    assert_eq!(g, before);
}

#[test]
fn iter_reports_row_major_addresses() {
    let mut g = grid(10);
    g.set_cell(1, 4, Some(RED)).unwrap();
    let painted: Vec<_> = g.iter().filter(|(_, c)| c.is_some()).map(|(cell, _)| cell).collect();
    assert_eq!(painted, vec![Cell::new(1, 4)]);
}

#[test]
fn clear_reports_whether_anything_was_painted() {
    let mut g = grid(10);
    assert!(!g.clear());
    g.set_cell(0, 0, Some(RED)).unwrap();
    assert!(g.clear());
    assert!(g.is_blank());
}

// =============================================================
// Flood fill
// =============================================================

#[test]
fn flood_fill_blank_grid_fills_everything() {
    let mut g = grid(10);
    assert_eq!(g.flood_fill(5, 5, Some(RED)).unwrap(), 100);
    assert_eq!(g.painted_count(), 100);
}

#[test]
fn flood_fill_stops_at_boundaries() {
    let mut g = grid(10);
    // Wall down column 3.
    for r in 0..10 {
        g.set_cell(r, 3, Some(BLUE)).unwrap();
    }
    assert_eq!(g.flood_fill(0, 0, Some(RED)).unwrap(), 30);
    assert_eq!(g.get(9, 2), Some(RED));
    assert_eq!(g.get(0, 4), None);
}

#[test]
fn flood_fill_same_value_is_noop() {
    let mut g = grid(10);
    assert_eq!(g.flood_fill(0, 0, None).unwrap(), 0);
    assert!(g.flood_fill(0, 10, Some(RED)).is_err());
}

#[test]
fn flood_fill_is_four_connected() {
    let mut g = grid(10);
    g.set_cell(0, 0, Some(BLUE)).unwrap();
    g.set_cell(1, 1, Some(BLUE)).unwrap();
    assert_eq!(g.flood_fill(0, 0, Some(RED)).unwrap(), 1);
    assert_eq!(g.get(1, 1), Some(BLUE));
}

// =============================================================
// Nested rows
// =============================================================

#[test]
fn rows_round_trip_through_json() {
    let mut g = grid(10);
    g.set_cell(0, 1, Some(RED)).unwrap();
    let json = serde_json::to_string(&g.to_rows()).unwrap();
    assert!(json.starts_with(r##"[[null,"#ff0000",null"##));
    let rows: Rows = serde_json::from_str(&json).unwrap();
    assert_eq!(Grid::from_rows(g.size(), &rows).unwrap(), g);
}

#[test]
fn from_rows_rejects_ragged_input() {
    let size = GridSize::square(10).unwrap();
    let mut rows = grid(10).to_rows();
    rows[3].pop();
    assert!(matches!(Grid::from_rows(size, &rows), Err(CanvasError::SnapshotShape { .. })));
    rows.truncate(9);
    assert!(Grid::from_rows(size, &rows).is_err());
}

#[test]
fn from_cells_checks_length() {
    let size = GridSize::square(10).unwrap();
    assert!(Grid::from_cells(size, vec![None; 99]).is_err());
    assert!(Grid::from_cells(size, vec![Some(RED); 100]).unwrap().painted_count() == 100);
}
