//! Overlay panes and scroll synchronization.
//!
//! The master surface renders the scrollable region; overlay panes are cloned
//! surfaces pinned over the frozen regions. This module owns the pane
//! descriptors, their placement against the master, and the echo-suppressed
//! scroll relay that keeps every surface in lock-step.

mod pane;
mod surface;
mod sync;

pub use pane::{
    FrozenSpans, MasterFrame, OverlayKind, OverlayPane, PaneDescriptor, ScrollEnvironment,
    ScrollToRequest,
};
pub use surface::{Axis, MockSurface, Surface, SurfaceRect};
pub use sync::{OverlaySynchronizer, ScrollSyncState, SyncOutcome, MASTER};
