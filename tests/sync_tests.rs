//! Integration tests for scroll synchronization across surfaces.
//!
//! Drives the event loop by hand: programmatic syncs fire echoed scroll
//! events on the receiving surface, exactly like a DOM host would.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{frozen_settings, grid_with};
use gridview::overlay::{Axis, SyncOutcome};
use gridview::render::DrawMode;
use gridview::viewer::GridView;

fn view_with_panes() -> (GridView, usize, usize) {
    let mut view = grid_with(frozen_settings(2, 1), 10_000, 500);
    let top = view.create_pane("top").unwrap();
    let left = view.create_pane("left").unwrap();
    view.draw(false);
    (view, top, left)
}

#[test]
fn user_scroll_relays_and_marks_a_redraw() {
    let (mut view, _top, _left) = view_with_panes();
    let master = view.master_surface();

    let outcome = view.scroll_event(master, Axis::Vertical, 240.0);
    assert_eq!(outcome, SyncOutcome::Synced { relayed: 1 });
    assert!(view.needs_render());
}

#[test]
fn echoed_scroll_does_not_trigger_a_second_refresh() {
    let (mut view, _top, left) = view_with_panes();
    let master = view.master_surface();

    assert_eq!(
        view.scroll_event(master, Axis::Vertical, 240.0),
        SyncOutcome::Synced { relayed: 1 }
    );
    view.draw(true);
    assert!(!view.needs_render());

    // The left pane's scroll event for the programmatic sync arrives next
    // tick: swallowed, no redraw flagged
    assert_eq!(
        view.scroll_event(left, Axis::Vertical, 240.0),
        SyncOutcome::Echo
    );
    assert!(!view.needs_render());
}

#[test]
fn pane_scrollbar_drag_drives_the_master() {
    let (mut view, _top, left) = view_with_panes();
    let master = view.master_surface();

    assert_eq!(
        view.scroll_event(left, Axis::Vertical, 480.0),
        SyncOutcome::Synced { relayed: 1 }
    );
    // Master's echo closes the loop without relaying back
    assert_eq!(
        view.scroll_event(master, Axis::Vertical, 480.0),
        SyncOutcome::Echo
    );
}

#[test]
fn wheel_over_a_pane_moves_the_master_only() {
    let (mut view, _top, _left) = view_with_panes();
    let master = view.master_surface();

    // Wheel delta lands on the master regardless of which surface saw it
    let moved = view.wheel(0.0, 480.0).unwrap();
    assert_eq!(moved, (0.0, 480.0));

    // The master's scroll event is genuine and relays to the panes
    assert_eq!(
        view.scroll_event(master, Axis::Vertical, 480.0),
        SyncOutcome::Synced { relayed: 1 }
    );
}

#[test]
fn wheel_is_clamped_to_the_content() {
    let (mut view, _top, _left) = view_with_panes();

    // Content height 240_000, viewport 480
    let moved = view.wheel(0.0, 1e9).unwrap();
    assert_eq!(moved.1, 240_000.0 - common::VIEWPORT_HEIGHT);
    assert_eq!(view.wheel(0.0, 10.0), None);
}

#[test]
fn scroll_then_fast_draw_cycle() {
    let (mut view, _top, _left) = view_with_panes();
    let master = view.master_surface();

    // A small genuine scroll keeps the fast path
    view.scroll_event(master, Axis::Vertical, 24.0);
    assert_eq!(view.draw(true), DrawMode::Fast);
    let visible = view.get_visible_bounds();
    assert_eq!(visible.start_row, Some(1));

    // A deep jump falls back to a full draw
    view.scroll_event(master, Axis::Vertical, 100_000.0);
    assert_eq!(view.draw(true), DrawMode::Full);
}

#[test]
fn horizontal_and_vertical_axes_are_independent() {
    let (mut view, top, left) = view_with_panes();
    let master = view.master_surface();

    assert_eq!(
        view.scroll_event(master, Axis::Horizontal, 128.0),
        // Only the top pane mirrors the horizontal axis
        SyncOutcome::Synced { relayed: 1 }
    );
    assert_eq!(
        view.scroll_event(top, Axis::Horizontal, 128.0),
        SyncOutcome::Echo
    );
    // The left pane never saw a horizontal sync
    assert_eq!(
        view.scroll_event(left, Axis::Vertical, 0.0),
        SyncOutcome::Synced { relayed: 0 }
    );
}

#[test]
fn events_after_teardown_are_inert() {
    let (mut view, _top, _left) = view_with_panes();
    let master = view.master_surface();

    view.destroy_all();
    assert_eq!(
        view.scroll_event(master, Axis::Vertical, 100.0),
        SyncOutcome::TornDown
    );
    assert_eq!(view.wheel(0.0, 100.0), None);
}
