//! Integration tests for overlay panes over frozen rows/columns.
//!
//! Covers pane necessity, pane windows, clone placement, and pane lifecycle.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{frozen_settings, grid, grid_with};
use gridview::error::GridViewError;
use gridview::overlay::OverlayKind;
use gridview::types::GridSettings;

#[test]
fn no_frozen_config_needs_no_panes() {
    let mut view = grid(1000, 100);
    view.draw(false);

    for descriptor in view.pane_descriptors() {
        assert!(
            !descriptor.needed,
            "pane {} unexpectedly needed",
            descriptor.kind
        );
    }
}

#[test]
fn frozen_rows_and_cols_need_their_panes() {
    let mut view = grid_with(frozen_settings(2, 1), 1000, 100);
    view.draw(false);

    let needed: Vec<&str> = view
        .pane_descriptors()
        .into_iter()
        .filter(|d| d.needed)
        .map(|d| d.kind)
        .collect();
    assert_eq!(needed, vec!["top", "left", "top_left_corner"]);
}

#[test]
fn bottom_panes_follow_fixed_rows_bottom() {
    let settings = GridSettings {
        fixed_rows_bottom: 3,
        fixed_columns_left: 1,
        ..GridSettings::default()
    };
    let mut view = grid_with(settings, 1000, 100);
    view.draw(false);

    let bottom = view.pane_descriptor(OverlayKind::Bottom).unwrap();
    assert!(bottom.needed);
    // The bottom pane materializes the dataset's last three rows
    assert_eq!(bottom.rows.start, Some(997));
    assert_eq!(bottom.rows.end, Some(999));

    let corner = view.pane_descriptor(OverlayKind::BottomLeftCorner).unwrap();
    assert!(corner.needed);
    assert_eq!(corner.rows.start, Some(997));
    assert_eq!(corner.cols.end, Some(0));
}

#[test]
fn pane_windows_project_the_master_on_the_free_axis() {
    let mut view = grid_with(frozen_settings(2, 1), 10_000, 500);
    view.draw(false);
    view.scroll(640.0, 2400.0).unwrap();
    view.draw(false);

    let master = view.get_rendered_bounds();
    let top = view.pane_descriptor(OverlayKind::Top).unwrap();
    // Frozen rows stay pinned to the dataset start
    assert_eq!(top.rows.start, Some(0));
    assert_eq!(top.rows.end, Some(1));
    // Columns mirror the master's render window
    assert_eq!(top.cols.start, master.start_col);
    assert_eq!(top.cols.end, master.end_col);

    let left = view.pane_descriptor(OverlayKind::Left).unwrap();
    assert_eq!(left.cols.start, Some(0));
    assert_eq!(left.cols.end, Some(0));
    assert_eq!(left.rows.start, master.start_row);

    let corner = view.pane_descriptor(OverlayKind::TopLeftCorner).unwrap();
    assert_eq!(corner.rows.end, Some(1));
    assert_eq!(corner.cols.end, Some(0));
}

#[test]
fn unneeded_panes_carry_empty_windows() {
    let mut view = grid_with(frozen_settings(2, 0), 1000, 100);
    view.draw(false);

    let left = view.pane_descriptor(OverlayKind::Left).unwrap();
    assert!(!left.needed);
    assert_eq!(left.rows.count, 0);
    assert_eq!(left.cols.count, 0);
}

#[test]
fn debug_pane_mirrors_the_master() {
    let settings = GridSettings {
        debug_overlay: true,
        ..GridSettings::default()
    };
    let mut view = grid_with(settings, 1000, 100);
    view.draw(false);

    let master = view.get_rendered_bounds();
    let debug = view.pane_descriptor(OverlayKind::Debug).unwrap();
    assert!(debug.needed);
    assert_eq!(debug.rows.start, master.start_row);
    assert_eq!(debug.rows.end, master.end_row);
    assert_eq!(debug.cols.end, master.end_col);
}

#[test]
fn create_pane_accepts_every_known_kind() {
    let mut view = grid_with(frozen_settings(1, 1), 1000, 100);
    for kind in OverlayKind::ALL {
        view.create_pane(kind.name()).unwrap();
    }
}

#[test]
fn create_pane_rejects_unknown_kinds() {
    let mut view = grid(1000, 100);
    let err = view.create_pane("right").unwrap_err();
    assert!(matches!(err, GridViewError::UnknownOverlay(name) if name == "right"));
}

#[test]
fn settings_toggle_flips_pane_necessity() {
    let mut view = grid_with(frozen_settings(2, 0), 1000, 100);
    view.draw(false);
    assert!(view.pane_descriptor(OverlayKind::Top).unwrap().needed);

    view.set_settings(GridSettings::default());
    view.draw(false);
    assert!(!view.pane_descriptor(OverlayKind::Top).unwrap().needed);
}

#[test]
fn headers_alone_summon_the_panes() {
    let settings = GridSettings {
        column_header_count: 1,
        row_header_count: 1,
        ..GridSettings::default()
    };
    let mut view = grid_with(settings, 1000, 100);
    view.draw(false);

    assert!(view.pane_descriptor(OverlayKind::Top).unwrap().needed);
    assert!(view.pane_descriptor(OverlayKind::Left).unwrap().needed);
    assert!(view
        .pane_descriptor(OverlayKind::TopLeftCorner)
        .unwrap()
        .needed);
}

#[test]
fn destroy_all_tears_down_and_stays_down() {
    let mut view = grid_with(frozen_settings(1, 1), 1000, 100);
    view.create_pane("top").unwrap();
    view.draw(false);

    view.destroy_all();
    assert!(view.is_torn_down());
    // Creating panes on a dead view is refused
    assert!(view.create_pane("left").is_err());
}

#[test]
fn frozen_counts_larger_than_dataset_are_clamped() {
    let mut view = grid_with(frozen_settings(50, 10), 5, 3);
    view.draw(false);

    let top = view.pane_descriptor(OverlayKind::Top).unwrap();
    assert_eq!(top.rows.start, Some(0));
    assert_eq!(top.rows.end, Some(4));
    let left = view.pane_descriptor(OverlayKind::Left).unwrap();
    assert_eq!(left.cols.end, Some(2));
}
