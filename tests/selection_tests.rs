//! Integration tests for selection gestures and highlight borders.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{frozen_settings, grid, grid_with};
use gridview::GridCoord;

#[test]
fn click_selects_a_single_cell() {
    let mut view = grid(1000, 100);
    view.draw(false);

    view.on_mouse_down(70.0, 30.0, false);
    view.on_mouse_up(70.0, 30.0);

    let range = view.selection().current().unwrap();
    assert_eq!(range.from, GridCoord::new(1, 1));
    assert_eq!(range.to, GridCoord::new(1, 1));
}

#[test]
fn drag_extends_from_the_anchor() {
    let mut view = grid(1000, 100);
    view.draw(false);

    view.on_mouse_down(10.0, 10.0, false);
    view.on_mouse_move(300.0, 200.0);
    view.on_mouse_up(300.0, 200.0);

    let range = view.selection().current().unwrap();
    assert_eq!(range.highlight, GridCoord::new(0, 0));
    assert_eq!(range.to, GridCoord::new(8, 4));

    // Moves without a pressed button change nothing
    view.on_mouse_move(400.0, 400.0);
    assert_eq!(view.selection().current().unwrap().to, GridCoord::new(8, 4));
}

#[test]
fn ctrl_click_appends_a_region() {
    let mut view = grid(1000, 100);
    view.draw(false);

    view.on_mouse_down(10.0, 10.0, false);
    view.on_mouse_up(10.0, 10.0);
    view.on_mouse_down(200.0, 200.0, true);
    view.on_mouse_up(200.0, 200.0);

    assert_eq!(view.selection().ranges().len(), 2);
}

#[test]
fn plain_selection_yields_one_border_rect() {
    let mut view = grid(1000, 100);
    view.draw(false);

    view.on_mouse_down(10.0, 10.0, false);
    view.on_mouse_move(150.0, 100.0);
    view.on_mouse_up(150.0, 100.0);

    let borders = view.selection_borders();
    assert_eq!(borders.len(), 1);
    let rect = borders[0];
    assert!(rect.draw_top && rect.draw_bottom && rect.draw_left && rect.draw_right);
    assert_eq!(rect.x, 0.0);
    assert_eq!(rect.y, 0.0);
    // 3 columns x 5 rows
    assert_eq!(rect.w, 3.0 * 64.0);
    assert_eq!(rect.h, 5.0 * 24.0);
}

#[test]
fn selection_across_frozen_rows_splits() {
    let mut view = grid_with(frozen_settings(1, 0), 1000, 100);
    view.draw(false);
    view.scroll(0.0, 48.0).unwrap();
    view.draw(false);

    // Drag from the frozen row across the boundary into scrolled rows
    view.on_mouse_down(10.0, 10.0, false);
    view.on_mouse_move(100.0, 100.0);
    view.on_mouse_up(100.0, 100.0);

    let borders = view.selection_borders();
    assert_eq!(borders.len(), 2);
    let frozen = borders.iter().find(|r| r.draw_top).unwrap();
    let scrolled = borders.iter().find(|r| r.draw_bottom).unwrap();
    assert_eq!(frozen.y, 0.0);
    assert!(!frozen.draw_bottom);
    assert!(!scrolled.draw_top);
}

#[test]
fn header_click_is_addressed_with_negative_tracks() {
    let mut view = grid(1000, 100);
    let mut settings = gridview::types::GridSettings::default();
    settings.column_header_count = 1;
    settings.row_header_count = 1;
    view.set_settings(settings);
    view.draw(false);

    assert_eq!(view.cell_at(10.0, 10.0), Some(GridCoord::new(-1, -1)));
    assert_eq!(view.cell_at(100.0, 10.0), Some(GridCoord::new(-1, 0)));
    assert_eq!(view.cell_at(10.0, 30.0), Some(GridCoord::new(0, -1)));
}

#[test]
fn hit_testing_past_the_content_misses() {
    let mut view = grid(3, 2);
    view.draw(false);

    // Content is 128x72; clicks beyond it select nothing
    assert_eq!(view.cell_at(500.0, 30.0), None);
    assert_eq!(view.cell_at(30.0, 300.0), None);
    view.on_mouse_down(500.0, 300.0, false);
    assert!(view.selection().is_empty());
}

#[test]
fn hit_testing_respects_frozen_rows_under_scroll() {
    let mut view = grid_with(frozen_settings(2, 0), 10_000, 100);
    view.draw(false);
    view.scroll(0.0, 2400.0).unwrap();
    view.draw(false);

    // Inside the frozen band: row addresses stay pinned
    assert_eq!(view.cell_at(10.0, 10.0), Some(GridCoord::new(0, 0)));
    assert_eq!(view.cell_at(10.0, 30.0), Some(GridCoord::new(1, 0)));
    // Just past the band: scrolled content shows through
    let below = view.cell_at(10.0, 49.0).unwrap();
    assert_eq!(below.row, 102);
}
