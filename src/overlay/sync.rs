//! Scroll synchronization between the master surface and its clones.
//!
//! Every surface is a projection of the master's scroll state, never a second
//! source of truth. Relays are kept loop-free with a pending-echo counter per
//! (surface, axis): a programmatic set arms the receiving surface's counter,
//! and the scroll event the host fires back for it is consumed silently. The
//! per-surface state machine Idle -> scrolled-by-user -> relaying -> Idle is
//! realized by those counters; single-threaded event delivery means at most
//! one relay is in flight.

use crate::overlay::pane::OverlayKind;
use crate::overlay::surface::{Axis, Surface};

/// Per-(surface, axis) synchronization state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSyncState {
    /// Programmatic sets we performed whose scroll events have not arrived
    /// yet.
    pub pending_echoes: u32,
    /// Last position seen or set on this surface.
    pub last_position: f32,
}

/// Result of feeding one scroll event into the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The expected echo of a sync we performed; no redraw.
    Echo,
    /// A genuine scroll; positions were relayed to `relayed` other surfaces
    /// and a coordinated redraw is due.
    Synced { relayed: u32 },
    /// A surface was detached from the render tree; the synchronizer tore
    /// itself down.
    TornDown,
    /// Unknown surface index; nothing happened.
    Ignored,
}

struct SyncedSurface {
    /// `None` marks the master.
    kind: Option<OverlayKind>,
    surface: Box<dyn Surface>,
    horizontal: ScrollSyncState,
    vertical: ScrollSyncState,
}

impl SyncedSurface {
    fn state_mut(&mut self, axis: Axis) -> &mut ScrollSyncState {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    fn mirrors(&self, axis: Axis) -> bool {
        self.kind.map_or(true, |kind| kind.mirrors(axis))
    }
}

/// Owns the master surface plus all overlay clone surfaces and keeps their
/// scroll positions in lock-step.
pub struct OverlaySynchronizer {
    surfaces: Vec<SyncedSurface>,
    torn_down: bool,
}

/// Index of the master surface.
pub const MASTER: usize = 0;

impl OverlaySynchronizer {
    pub fn new(master: Box<dyn Surface>) -> Self {
        Self {
            surfaces: vec![SyncedSurface {
                kind: None,
                surface: master,
                horizontal: ScrollSyncState::default(),
                vertical: ScrollSyncState::default(),
            }],
            torn_down: false,
        }
    }

    /// Register a clone surface; returns its index for event dispatch.
    pub fn add_pane(&mut self, kind: OverlayKind, surface: Box<dyn Surface>) -> usize {
        self.surfaces.push(SyncedSurface {
            kind: Some(kind),
            surface,
            horizontal: ScrollSyncState::default(),
            vertical: ScrollSyncState::default(),
        });
        self.surfaces.len() - 1
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn surface(&self, index: usize) -> Option<&dyn Surface> {
        self.surfaces.get(index).map(|entry| entry.surface.as_ref())
    }

    pub fn surface_mut(&mut self, index: usize) -> Option<&mut (dyn Surface + 'static)> {
        self.surfaces
            .get_mut(index)
            .map(|entry| entry.surface.as_mut())
    }

    pub fn master(&self) -> Option<&dyn Surface> {
        self.surface(MASTER)
    }

    pub fn master_mut(&mut self) -> Option<&mut (dyn Surface + 'static)> {
        self.surface_mut(MASTER)
    }

    /// Drop every surface. Further events are ignored.
    pub fn destroy(&mut self) {
        self.surfaces.clear();
        self.torn_down = true;
    }

    /// Verify every surface is still in the render tree; tear down otherwise.
    /// Returns false once torn down.
    pub fn check_attached(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        if self.surfaces.iter().any(|entry| !entry.surface.is_attached()) {
            self.destroy();
            return false;
        }
        true
    }

    /// Feed a scroll event observed on a surface.
    pub fn on_scroll(&mut self, index: usize, axis: Axis, position: f32) -> SyncOutcome {
        if !self.check_attached() {
            return SyncOutcome::TornDown;
        }
        let Some(entry) = self.surfaces.get_mut(index) else {
            return SyncOutcome::Ignored;
        };

        let state = entry.state_mut(axis);
        if state.pending_echoes > 0 {
            state.pending_echoes -= 1;
            state.last_position = position;
            return SyncOutcome::Echo;
        }
        state.last_position = position;

        // A pinned pane (e.g. a corner) does not drive the axis
        if !entry.mirrors(axis) {
            return SyncOutcome::Synced { relayed: 0 };
        }

        let mut relayed = 0;
        for (i, other) in self.surfaces.iter_mut().enumerate() {
            if i == index || !other.mirrors(axis) {
                continue;
            }
            let state = other.state_mut(axis);
            if (state.last_position - position).abs() <= f32::EPSILON {
                continue;
            }
            state.pending_echoes += 1;
            state.last_position = position;
            other.surface.set_scroll_position(axis, position);
            relayed += 1;
        }
        SyncOutcome::Synced { relayed }
    }

    /// Route a wheel gesture captured over any surface into the master's
    /// scroll position. The pane the wheel happened over is never scrolled
    /// directly; its position follows from the master's scroll event like
    /// any other sync. Returns the master's new (x, y) when anything moved.
    pub fn on_wheel(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        if !self.check_attached() {
            return None;
        }
        let entry = self.surfaces.get_mut(MASTER)?;
        let mut moved = false;

        for (axis, delta) in [(Axis::Horizontal, delta_x), (Axis::Vertical, delta_y)] {
            if delta.abs() <= f32::EPSILON {
                continue;
            }
            let current = entry.surface.scroll_position(axis);
            let max = (entry.surface.content_extent(axis) - entry.surface.viewport_extent(axis))
                .max(0.0);
            let target = (current + delta).clamp(0.0, max);
            if (target - current).abs() > f32::EPSILON {
                entry.surface.set_scroll_position(axis, target);
                moved = true;
            }
        }

        if moved {
            let x = entry.surface.scroll_position(Axis::Horizontal);
            let y = entry.surface.scroll_position(Axis::Vertical);
            Some((x, y))
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::overlay::surface::MockSurface;

    fn synchronizer_with_panes() -> (OverlaySynchronizer, usize, usize, usize) {
        let master = MockSurface::new(400.0, 300.0).with_content(2000.0, 5000.0);
        let mut sync = OverlaySynchronizer::new(Box::new(master));
        let top = sync.add_pane(
            OverlayKind::Top,
            Box::new(MockSurface::new(400.0, 48.0).with_content(2000.0, 48.0)),
        );
        let left = sync.add_pane(
            OverlayKind::Left,
            Box::new(MockSurface::new(64.0, 300.0).with_content(64.0, 5000.0)),
        );
        let corner = sync.add_pane(
            OverlayKind::TopLeftCorner,
            Box::new(MockSurface::new(64.0, 48.0)),
        );
        (sync, top, left, corner)
    }

    #[test]
    fn master_scroll_relays_to_mirroring_panes_only() {
        let (mut sync, top, left, corner) = synchronizer_with_panes();

        let outcome = sync.on_scroll(MASTER, Axis::Horizontal, 120.0);
        assert_eq!(outcome, SyncOutcome::Synced { relayed: 1 });
        assert_eq!(
            sync.surface(top).unwrap().scroll_position(Axis::Horizontal),
            120.0
        );
        // Vertical-only and pinned panes are untouched
        assert_eq!(
            sync.surface(left).unwrap().scroll_position(Axis::Horizontal),
            0.0
        );
        assert_eq!(
            sync.surface(corner).unwrap().scroll_position(Axis::Horizontal),
            0.0
        );
    }

    #[test]
    fn echo_of_a_relay_is_suppressed() {
        let (mut sync, top, _, _) = synchronizer_with_panes();

        assert_eq!(
            sync.on_scroll(MASTER, Axis::Horizontal, 120.0),
            SyncOutcome::Synced { relayed: 1 }
        );
        // The host fires the pane's scroll event for the programmatic set:
        // it must be swallowed, not relayed back to the master.
        assert_eq!(sync.on_scroll(top, Axis::Horizontal, 120.0), SyncOutcome::Echo);
        // And only once: a later genuine scroll on the pane relays again.
        assert_eq!(
            sync.on_scroll(top, Axis::Horizontal, 200.0),
            SyncOutcome::Synced { relayed: 1 }
        );
    }

    #[test]
    fn relay_skips_surfaces_already_in_position() {
        let (mut sync, top, _, _) = synchronizer_with_panes();

        assert_eq!(
            sync.on_scroll(MASTER, Axis::Horizontal, 120.0),
            SyncOutcome::Synced { relayed: 1 }
        );
        let _ = sync.on_scroll(top, Axis::Horizontal, 120.0);
        // Same position again: nothing to relay, no echo armed
        assert_eq!(
            sync.on_scroll(MASTER, Axis::Horizontal, 120.0),
            SyncOutcome::Synced { relayed: 0 }
        );
    }

    #[test]
    fn vertical_axis_reaches_the_left_pane() {
        let (mut sync, top, left, _) = synchronizer_with_panes();

        assert_eq!(
            sync.on_scroll(MASTER, Axis::Vertical, 900.0),
            SyncOutcome::Synced { relayed: 1 }
        );
        assert_eq!(
            sync.surface(left).unwrap().scroll_position(Axis::Vertical),
            900.0
        );
        assert_eq!(sync.surface(top).unwrap().scroll_position(Axis::Vertical), 0.0);
    }

    #[test]
    fn pane_scroll_relays_to_master() {
        let (mut sync, _, left, _) = synchronizer_with_panes();

        // A genuine scrollbar drag on the left pane drives the master
        assert_eq!(
            sync.on_scroll(left, Axis::Vertical, 450.0),
            SyncOutcome::Synced { relayed: 1 }
        );
        assert_eq!(
            sync.master().unwrap().scroll_position(Axis::Vertical),
            450.0
        );
        // Master's echo arrives and stops there
        assert_eq!(
            sync.on_scroll(MASTER, Axis::Vertical, 450.0),
            SyncOutcome::Echo
        );
    }

    #[test]
    fn corner_pane_never_drives_an_axis() {
        let (mut sync, _, _, corner) = synchronizer_with_panes();
        assert_eq!(
            sync.on_scroll(corner, Axis::Horizontal, 50.0),
            SyncOutcome::Synced { relayed: 0 }
        );
        assert_eq!(
            sync.master().unwrap().scroll_position(Axis::Horizontal),
            0.0
        );
    }

    #[test]
    fn wheel_routes_to_the_master_and_clamps() {
        let (mut sync, _, _, _) = synchronizer_with_panes();

        // Wheel over a frozen pane: only the master moves
        assert_eq!(sync.on_wheel(0.0, 250.0), Some((0.0, 250.0)));
        assert_eq!(sync.master().unwrap().scroll_position(Axis::Vertical), 250.0);

        // The pane follows through the master's subsequent scroll event
        assert_eq!(
            sync.on_scroll(MASTER, Axis::Vertical, 250.0),
            SyncOutcome::Synced { relayed: 1 }
        );

        // Clamped at the content end: 5000 - 300 = 4700
        assert_eq!(sync.on_wheel(0.0, 1_000_000.0), Some((0.0, 4700.0)));
        // And a no-op past the boundary
        assert_eq!(sync.on_wheel(0.0, 10.0), None);
    }

    #[test]
    fn detached_surface_tears_the_synchronizer_down() {
        let master = MockSurface::new(400.0, 300.0).with_content(2000.0, 5000.0);
        let mut sync = OverlaySynchronizer::new(Box::new(master));
        let mut pane = MockSurface::new(400.0, 48.0);
        pane.detach();
        let top = sync.add_pane(OverlayKind::Top, Box::new(pane));

        assert_eq!(sync.on_scroll(MASTER, Axis::Horizontal, 10.0), SyncOutcome::TornDown);
        assert!(sync.is_torn_down());
        assert_eq!(sync.surface_count(), 0);
        // Everything after teardown is inert
        assert_eq!(sync.on_scroll(top, Axis::Horizontal, 10.0), SyncOutcome::TornDown);
        assert_eq!(sync.on_wheel(5.0, 5.0), None);
    }

    #[test]
    fn unknown_surface_index_is_ignored() {
        let (mut sync, _, _, _) = synchronizer_with_panes();
        assert_eq!(sync.on_scroll(99, Axis::Horizontal, 10.0), SyncOutcome::Ignored);
    }
}
