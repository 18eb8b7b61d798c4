//! Layout engine: render window calculation and viewport management.
//!
//! This module handles:
//! - Computing the buffered render window and exact visible window per axis
//! - Translating rendered positions to logical dataset indices
//! - Column stretching against the viewport width
//! - Viewport scroll state and clamping

mod axis;
mod filter;
mod stretch;
mod viewport;

pub use axis::{AxisCalcRequest, AxisCalculator, RenderWindow, WindowLookup};
pub use filter::IndexFilter;
pub use stretch::{ColumnStretch, StretchMode};
pub use viewport::{ScrollBounds, Viewport};
