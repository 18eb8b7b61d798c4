//! Configuration snapshot and the data-source boundary.
//!
//! The core never owns cell data; it pulls counts, sizes, and cell content
//! through [`GridSource`] and reads everything else from a [`GridSettings`]
//! snapshot taken by the host.

use crate::layout::StretchMode;
use serde::{Deserialize, Serialize};

/// Default column width in logical pixels.
pub const DEFAULT_COL_WIDTH: f32 = 64.0;

/// Default row height in logical pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 24.0;

/// Scroll-ahead buffering: how far beyond the visible window the render
/// window is widened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderOffset {
    /// Proportional to the viewport: half the visible item count per side.
    #[default]
    Auto,
    /// A fixed number of items per side.
    Items(u32),
}

impl RenderOffset {
    /// Resolve to a concrete item count for the given visible window size.
    pub fn resolve(self, visible_count: u32) -> u32 {
        match self {
            RenderOffset::Auto => visible_count.div_ceil(2),
            RenderOffset::Items(count) => count,
        }
    }
}

/// Configuration snapshot the host hands to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Rows pinned at the top of the viewport.
    pub fixed_rows_top: u32,
    /// Rows pinned at the bottom of the viewport.
    pub fixed_rows_bottom: u32,
    /// Columns pinned at the left of the viewport.
    pub fixed_columns_left: u32,
    /// Number of column-header rows (0 disables them).
    pub column_header_count: u32,
    /// Number of row-header columns (0 disables them).
    pub row_header_count: u32,
    /// Leftover-width redistribution mode.
    pub stretch: StretchMode,
    /// Scroll-ahead buffering heuristic.
    pub render_offset: RenderOffset,
    /// Row height used when the source returns `None`.
    pub default_row_height: f32,
    /// Column width used when the source returns `None`.
    pub default_col_width: f32,
    /// Mirror the master into a full-size debug pane.
    pub debug_overlay: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            fixed_rows_top: 0,
            fixed_rows_bottom: 0,
            fixed_columns_left: 0,
            column_header_count: 0,
            row_header_count: 0,
            stretch: StretchMode::None,
            render_offset: RenderOffset::Auto,
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_col_width: DEFAULT_COL_WIDTH,
            debug_overlay: false,
        }
    }
}

impl GridSettings {
    /// True when any column header row is shown.
    pub fn has_column_headers(&self) -> bool {
        self.column_header_count > 0
    }

    /// True when any row header column is shown.
    pub fn has_row_headers(&self) -> bool {
        self.row_header_count > 0
    }
}

/// Display content for one cell, filled by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellContent {
    pub text: String,
    /// Optional host CSS class applied to the cell element.
    pub class_name: Option<String>,
}

/// The data-source collaborator. Implemented by the host; the core only ever
/// pulls through this boundary.
pub trait GridSource {
    fn count_rows(&self) -> u32;

    fn count_cols(&self) -> u32;

    /// Natural height of a row; `None` falls back to the configured default.
    fn row_height(&self, _row: u32) -> Option<f32> {
        None
    }

    /// Natural width of a column; `None` falls back to the configured default.
    fn col_width(&self, _col: u32) -> Option<f32> {
        None
    }

    /// Write the display content for a cell into `target`.
    fn render_cell(&self, row: u32, col: u32, target: &mut CellContent);
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

    #[test]
    fn render_offset_resolution() {
        assert_eq!(RenderOffset::Auto.resolve(10), 5);
        assert_eq!(RenderOffset::Auto.resolve(9), 5);
        assert_eq!(RenderOffset::Auto.resolve(0), 0);
        assert_eq!(RenderOffset::Items(3).resolve(100), 3);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut settings = GridSettings::default();
        settings.fixed_rows_top = 2;
        settings.stretch = StretchMode::All;
        settings.render_offset = RenderOffset::Items(4);

        let json = serde_json::to_string(&settings).unwrap();
        let back: GridSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fixed_rows_top, 2);
        assert_eq!(back.stretch, StretchMode::All);
        assert_eq!(back.render_offset, RenderOffset::Items(4));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings: GridSettings = serde_json::from_str(r#"{"fixed_columns_left":1}"#).unwrap();
        assert_eq!(settings.fixed_columns_left, 1);
        assert_eq!(settings.default_col_width, DEFAULT_COL_WIDTH);
        assert!(!settings.has_column_headers());
    }
}
