//! Integration tests for viewport window calculation through the viewer.
//!
//! Covers visible/rendered bounds, scrolling, fast-vs-full draw decisions,
//! and degenerate datasets.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{grid, grid_with, TestSource, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use gridview::render::DrawMode;
use gridview::types::{GridSettings, RenderOffset};
use gridview::viewer::GridView;
use gridview::GridCoord;

// ============================================================================
// Visible and rendered bounds
// ============================================================================

#[test]
fn initial_draw_fills_the_viewport() {
    let mut view = grid(10_000, 500);
    assert_eq!(view.draw(false), DrawMode::Full);

    let visible = view.get_visible_bounds();
    // 480 / 24 = 20 rows, 640 / 64 = 10 cols
    assert_eq!(visible.start_row, Some(0));
    assert_eq!(visible.end_row, Some(19));
    assert_eq!(visible.start_col, Some(0));
    assert_eq!(visible.end_col, Some(9));
}

#[test]
fn rendered_bounds_are_buffered_beyond_visible() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    let visible = view.get_visible_bounds();
    let rendered = view.get_rendered_bounds();
    assert!(rendered.end_row.unwrap() > visible.end_row.unwrap());
    assert!(rendered.end_col.unwrap() > visible.end_col.unwrap());
}

#[test]
fn only_a_window_is_materialized_for_huge_datasets() {
    let mut view = grid(1_000_000, 1_000);
    view.draw(false);

    let rendered = view.get_rendered_bounds();
    let count = rendered.end_row.unwrap() - rendered.start_row.unwrap() + 1;
    // A million-row dataset must not materialize more than a small multiple
    // of the viewport
    assert!(count < 100, "materialized {count} rows");
}

#[test]
fn scroll_moves_the_windows() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    // 2400px = 100 rows
    view.scroll(0.0, 2400.0).unwrap();
    view.draw(false);

    let visible = view.get_visible_bounds();
    assert_eq!(visible.start_row, Some(100));
    assert_eq!(visible.end_row, Some(119));
}

#[test]
fn scroll_is_clamped_to_the_content() {
    let mut view = grid(100, 10);
    view.draw(false);

    // Content is 2400x640; viewport 640x480
    let applied = view.scroll(10_000.0, 10_000.0).unwrap();
    assert_eq!(applied, (640.0 - VIEWPORT_WIDTH, 2400.0 - VIEWPORT_HEIGHT));
    assert_eq!(view.scroll(10.0, 10.0), None);
}

#[test]
fn variable_row_heights_shift_the_window() {
    let mut view = GridView::new_test(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    view.set_source(Box::new(TestSource {
        rows: 1000,
        cols: 10,
        tall_every: Some(2),
    }));
    view.draw(false);

    // Rows alternate 48/24px, pairs of 72px: 480px shows 13-14 rows instead
    // of 20
    let visible = view.get_visible_bounds();
    assert!(visible.end_row.unwrap() < 15);
}

// ============================================================================
// Fast vs full draws
// ============================================================================

#[test]
fn fast_draw_is_honored_inside_the_buffer() {
    let mut view = grid(10_000, 500);
    assert_eq!(view.draw(false), DrawMode::Full);

    // One row of scroll stays well inside the render buffer
    view.scroll(0.0, 24.0).unwrap();
    assert_eq!(view.draw(true), DrawMode::Fast);
}

#[test]
fn fast_draw_is_idempotent() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    assert_eq!(view.draw(true), DrawMode::Fast);
    let rendered = view.get_rendered_bounds();
    assert_eq!(view.draw(true), DrawMode::Fast);
    assert_eq!(view.get_rendered_bounds(), rendered);
}

#[test]
fn deep_scroll_forces_a_full_draw() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    view.scroll(0.0, 50_000.0).unwrap();
    assert_eq!(view.draw(true), DrawMode::Full);
}

#[test]
fn settings_change_forces_a_full_draw() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    view.set_settings(GridSettings {
        render_offset: RenderOffset::Items(5),
        ..GridSettings::default()
    });
    assert_eq!(view.draw(true), DrawMode::Full);
}

#[test]
fn resize_forces_a_full_draw() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    view.resize(800.0, 600.0);
    assert_eq!(view.draw(true), DrawMode::Full);
    let visible = view.get_visible_bounds();
    assert_eq!(visible.end_row, Some(24));
}

// ============================================================================
// Degenerate datasets
// ============================================================================

#[test]
fn empty_dataset_collapses_to_empty_bounds() {
    let mut view = grid(0, 0);
    assert_eq!(view.draw(false), DrawMode::Full);

    let bounds = view.get_rendered_bounds();
    assert_eq!(bounds.start_row, None);
    assert_eq!(bounds.end_row, None);
    assert_eq!(bounds.start_col, None);
    assert_eq!(bounds.end_col, None);
}

#[test]
fn zero_rows_with_columns_keeps_the_column_window() {
    let mut view = grid(0, 50);
    view.draw(false);

    let bounds = view.get_visible_bounds();
    assert_eq!(bounds.start_row, None);
    assert_eq!(bounds.start_col, Some(0));
    assert_eq!(bounds.end_col, Some(9));
}

#[test]
fn dataset_smaller_than_viewport_is_fully_rendered() {
    let mut view = grid(5, 3);
    view.draw(false);

    let bounds = view.get_visible_bounds();
    assert_eq!(bounds.start_row, Some(0));
    assert_eq!(bounds.end_row, Some(4));
    assert_eq!(bounds.end_col, Some(2));
}

// ============================================================================
// scroll_viewport
// ============================================================================

#[test]
fn scroll_viewport_far_cell_aligns_to_the_far_edge() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    view.scroll_viewport(GridCoord::new(1000, 0));
    view.draw(false);
    let visible = view.get_visible_bounds();
    assert_eq!(visible.end_row, Some(1000));
}

#[test]
fn scroll_viewport_back_aligns_to_the_near_edge() {
    let mut view = grid(10_000, 500);
    view.draw(false);
    view.scroll(0.0, 48_000.0).unwrap();
    view.draw(false);

    view.scroll_viewport(GridCoord::new(100, 0));
    view.draw(false);
    let visible = view.get_visible_bounds();
    assert_eq!(visible.start_row, Some(100));
}

#[test]
fn scroll_viewport_accounts_for_frozen_rows() {
    let mut view = grid_with(common::frozen_settings(2, 0), 10_000, 500);
    view.draw(false);
    view.scroll(0.0, 48_000.0).unwrap();

    // Near-edge scroll target leaves room for the 48px frozen band
    view.scroll_viewport(GridCoord::new(100, 0));
    view.draw(false);
    let visible = view.get_visible_bounds();
    // Row 100 sits at position 2400; scroll lands at 2400 - 48 = 2352,
    // so the window starts two rows earlier
    assert_eq!(visible.start_row, Some(98));
}

#[test]
fn scroll_viewport_ignores_cells_already_in_view() {
    let mut view = grid(10_000, 500);
    view.draw(false);

    view.scroll_viewport(GridCoord::new(5, 5));
    assert!(!view.needs_render() || view.get_visible_bounds().start_row == Some(0));
    view.draw(false);
    assert_eq!(view.get_visible_bounds().start_row, Some(0));
}
