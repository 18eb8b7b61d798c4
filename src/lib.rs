//! gridview - virtualized grid widget core for the web
//!
//! Displays and edits large two-dimensional datasets inside a bounded
//! viewport via WebAssembly and DOM surfaces:
//! - Virtualized render windows (only the visible span is materialized)
//! - Frozen ("pinned") rows/columns rendered by synchronized overlay panes
//! - Multi-region selection with frozen-aware highlight borders
//! - Fast structure-preserving redraws while scrolling inside the buffer
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView(container, 800, 600);
//! grid.set_settings({ fixed_rows_top: 1, fixed_columns_left: 1 });
//! grid.create_pane('top');
//! grid.draw(false);
//! ```

// Core modules
pub mod coords;
pub mod error;
pub mod range;
pub mod types;

// Layout and rendering modules
pub mod layout;
pub mod overlay;
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
pub use viewer::{GridBounds, GridView};

pub use coords::{GridCoord, Track};
pub use range::{Direction, GridRange};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
