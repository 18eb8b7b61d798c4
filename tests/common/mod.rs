//! Common test utilities for gridview integration tests.
//!
//! Provides a configurable in-memory data source and viewer constructors so
//! each test file can build grids without repeating the plumbing.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::types::{CellContent, GridSettings, GridSource};
use gridview::viewer::GridView;

/// Default viewport used across the integration tests.
pub const VIEWPORT_WIDTH: f32 = 640.0;
pub const VIEWPORT_HEIGHT: f32 = 480.0;

/// In-memory data source with optional per-index size overrides.
pub struct TestSource {
    pub rows: u32,
    pub cols: u32,
    /// Every n-th row is double height when set.
    pub tall_every: Option<u32>,
}

impl TestSource {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            tall_every: None,
        }
    }
}

impl GridSource for TestSource {
    fn count_rows(&self) -> u32 {
        self.rows
    }

    fn count_cols(&self) -> u32 {
        self.cols
    }

    fn row_height(&self, row: u32) -> Option<f32> {
        match self.tall_every {
            Some(n) if n > 0 && row % n == 0 => Some(48.0),
            _ => None,
        }
    }

    fn render_cell(&self, row: u32, col: u32, target: &mut CellContent) {
        target.text = format!("R{row}C{col}");
    }
}

/// A viewer over a plain dataset with default settings.
pub fn grid(rows: u32, cols: u32) -> GridView {
    let mut view = GridView::new_test(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    view.set_source(Box::new(TestSource::new(rows, cols)));
    view
}

/// A viewer with a settings snapshot applied before the source.
pub fn grid_with(settings: GridSettings, rows: u32, cols: u32) -> GridView {
    let mut view = GridView::new_test(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    view.set_source(Box::new(TestSource::new(rows, cols)));
    view.set_settings(settings);
    view
}

/// Settings with frozen top rows and left columns.
pub fn frozen_settings(top: u32, left: u32) -> GridSettings {
    GridSettings {
        fixed_rows_top: top,
        fixed_columns_left: left,
        ..GridSettings::default()
    }
}
