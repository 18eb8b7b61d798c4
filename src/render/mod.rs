//! Draw-cycle control and selection border math.
//!
//! This module provides:
//! - The full-vs-fast redraw decision and cached render windows
//! - Selection highlight rectangles split across frozen regions

pub mod controller;
pub mod selection;

pub use controller::{AxisInputs, DrawMode, RenderController};
pub use selection::{selection_rects, AxisProjection, SelectionRect};
