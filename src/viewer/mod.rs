//! Main `GridView` struct - the primary entry point for the grid widget.
//!
//! This module provides the WASM-exported `GridView` struct that handles:
//! - Wiring the master scroll container and overlay pane surfaces
//! - Managing viewport state (scroll, size) and the settings snapshot
//! - Coordinating calculators, overlay synchronization and draw cycles
//! - Handling user interactions (scroll, wheel, selection gestures)
//!
//! The same core state drives the native build, backed by mock surfaces, so
//! the whole pipeline is exercised without a DOM.

mod events;
mod scroll;

use serde::Serialize;

use crate::coords::GridCoord;
use crate::error::Result;
use crate::layout::{ColumnStretch, IndexFilter, RenderWindow, ScrollBounds, Viewport};
use crate::overlay::{
    Axis, FrozenSpans, MasterFrame, OverlayKind, OverlayPane, OverlaySynchronizer,
    PaneDescriptor, ScrollEnvironment, ScrollToRequest, Surface, SyncOutcome, MASTER,
};
use crate::render::{selection_rects, AxisInputs, AxisProjection, DrawMode, RenderController, SelectionRect};
use crate::types::{CellContent, GridSettings, GridSource, SelectionSet};

#[cfg(not(target_arch = "wasm32"))]
use crate::overlay::MockSurface;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlDivElement, HtmlElement, MouseEvent, WheelEvent};

/// Rendered/visible bounds exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridBounds {
    pub start_row: Option<u32>,
    pub start_col: Option<u32>,
    pub end_row: Option<u32>,
    pub end_col: Option<u32>,
}

impl GridBounds {
    fn from_windows(rows: &RenderWindow, cols: &RenderWindow) -> Self {
        Self {
            start_row: rows.start,
            start_col: cols.start,
            end_row: rows.end,
            end_col: cols.end,
        }
    }
}

/// Scroll/draw diagnostics serialized for the host (and the debug pane).
#[derive(Debug, Serialize)]
struct DebugSnapshot {
    scroll_x: f32,
    scroll_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    content_width: f32,
    content_height: f32,
    last_applied: Option<DrawMode>,
    rendered: GridBounds,
    visible: GridBounds,
    panes: Vec<PaneDescriptor>,
}

/// Shared state that event handlers and the host API both reach.
pub(crate) struct SharedState {
    pub(crate) settings: GridSettings,
    pub(crate) source: Option<Box<dyn GridSource>>,
    pub(crate) viewport: Viewport,
    pub(crate) environment: ScrollEnvironment,
    pub(crate) controller: RenderController,
    pub(crate) stretch: ColumnStretch,
    pub(crate) synchronizer: OverlaySynchronizer,
    /// One pane descriptor per [`OverlayKind`], in `OverlayKind::ALL` order.
    pub(crate) panes: Vec<OverlayPane>,
    /// Surface slot per pane, once its clone exists.
    pub(crate) pane_surfaces: Vec<Option<usize>>,
    pub(crate) selection: SelectionSet,
    pub(crate) is_selecting: bool,
    pub(crate) content_width: f32,
    pub(crate) content_height: f32,
    pub(crate) needs_render: bool,
    /// Content origin against the page, window-scroll environment only.
    pub(crate) origin_x: f32,
    pub(crate) origin_y: f32,

    // WASM-only event plumbing
    #[cfg(target_arch = "wasm32")]
    pub(crate) render_callback: Option<js_sys::Function>,
    #[cfg(target_arch = "wasm32")]
    pub(crate) scroll_settle_timer: Option<i32>,
    #[cfg(target_arch = "wasm32")]
    pub(crate) scroll_settle_closure: Option<Closure<dyn FnMut()>>,
    #[cfg(target_arch = "wasm32")]
    pub(crate) last_scroll_ms: f64,
    #[cfg(target_arch = "wasm32")]
    pub(crate) drag_grow_timer: Option<i32>,
    #[cfg(target_arch = "wasm32")]
    pub(crate) drag_grow_closure: Option<Closure<dyn FnMut()>>,
}

impl SharedState {
    pub(crate) fn new(
        master: Box<dyn Surface>,
        width: f32,
        height: f32,
        environment: ScrollEnvironment,
    ) -> Self {
        let settings = GridSettings::default();
        let mut viewport = Viewport::new();
        viewport.resize(width, height);
        let stretch = ColumnStretch::new(settings.stretch);
        Self {
            settings,
            source: None,
            viewport,
            environment,
            controller: RenderController::new(),
            stretch,
            synchronizer: OverlaySynchronizer::new(master),
            panes: OverlayKind::ALL.map(OverlayPane::new).to_vec(),
            pane_surfaces: vec![None; OverlayKind::ALL.len()],
            selection: SelectionSet::new(),
            is_selecting: false,
            content_width: 0.0,
            content_height: 0.0,
            needs_render: true,
            origin_x: 0.0,
            origin_y: 0.0,
            #[cfg(target_arch = "wasm32")]
            render_callback: None,
            #[cfg(target_arch = "wasm32")]
            scroll_settle_timer: None,
            #[cfg(target_arch = "wasm32")]
            scroll_settle_closure: None,
            #[cfg(target_arch = "wasm32")]
            last_scroll_ms: 0.0,
            #[cfg(target_arch = "wasm32")]
            drag_grow_timer: None,
            #[cfg(target_arch = "wasm32")]
            drag_grow_closure: None,
        }
    }

    pub(crate) fn totals(&self) -> (u32, u32) {
        self.source
            .as_deref()
            .map_or((0, 0), |s| (s.count_rows(), s.count_cols()))
    }

    fn row_size(&self, row: u32) -> f32 {
        self.source
            .as_deref()
            .and_then(|s| s.row_height(row))
            .unwrap_or(self.settings.default_row_height)
    }

    fn col_size(&self, col: u32) -> f32 {
        self.source
            .as_deref()
            .and_then(|s| s.col_width(col))
            .unwrap_or(self.settings.default_col_width)
    }

    /// Leading-edge offset of a row in content coordinates.
    pub(crate) fn row_position(&self, row: u32) -> f32 {
        (0..row).map(|i| self.row_size(i)).sum()
    }

    /// Leading-edge offset of a column in content coordinates.
    pub(crate) fn col_position(&self, col: u32) -> f32 {
        (0..col).map(|i| self.col_size(i)).sum()
    }

    /// Recompute total content extents; called on source/settings changes.
    pub(crate) fn refresh_content_extents(&mut self) {
        let (total_rows, total_cols) = self.totals();
        self.content_height = self.row_position(total_rows);
        self.content_width = self.col_position(total_cols);
    }

    pub(crate) fn scroll_bounds(&self) -> ScrollBounds {
        ScrollBounds {
            content_width: self.content_width,
            content_height: self.content_height,
        }
    }

    /// Programmatic relative scroll on the master surface.
    pub(crate) fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        let bounds = self.scroll_bounds();
        let applied = self.viewport.scroll_by(delta_x, delta_y, &bounds)?;
        let (x, y) = (self.viewport.scroll_x, self.viewport.scroll_y);
        if let Some(master) = self.synchronizer.master_mut() {
            master.set_scroll_position(Axis::Horizontal, x);
            master.set_scroll_position(Axis::Vertical, y);
        }
        self.needs_render = true;
        Some(applied)
    }

    /// Pixel spans of the frozen regions, header tracks included.
    pub(crate) fn frozen_spans(&self) -> FrozenSpans {
        let (total_rows, total_cols) = self.totals();
        let header_top = self.settings.column_header_count as f32 * self.settings.default_row_height;
        let header_left = self.settings.row_header_count as f32 * self.settings.default_col_width;

        let fixed_top = self.settings.fixed_rows_top.min(total_rows);
        let fixed_left = self.settings.fixed_columns_left.min(total_cols);
        let fixed_bottom = self.settings.fixed_rows_bottom.min(total_rows);

        let top: f32 = (0..fixed_top).map(|i| self.row_size(i)).sum();
        let left: f32 = (0..fixed_left).map(|i| self.col_size(i)).sum();
        let bottom: f32 = (total_rows.saturating_sub(fixed_bottom)..total_rows)
            .map(|i| self.row_size(i))
            .sum();

        FrozenSpans {
            top: top + header_top,
            left: left + header_left,
            bottom,
        }
    }

    /// Run one draw cycle and, on a full draw, rebuild pane structure and
    /// stretching.
    pub(crate) fn draw(&mut self, fast_hint: bool) -> DrawMode {
        let (total_rows, total_cols) = self.totals();
        let spans = self.frozen_spans();

        let (scrollbar_h, scrollbar_v) = self
            .synchronizer
            .master()
            .map_or((0.0, 0.0), |master| {
                let thickness = master.scrollbar_thickness();
                (
                    if master.has_scrollbar(Axis::Horizontal) {
                        thickness
                    } else {
                        0.0
                    },
                    if master.has_scrollbar(Axis::Vertical) {
                        thickness
                    } else {
                        0.0
                    },
                )
            });

        let source = self.source.as_deref();
        let default_row_height = self.settings.default_row_height;
        let default_col_width = self.settings.default_col_width;
        let row_size_of = move |i: u32| source.and_then(|s| s.row_height(i));
        let col_size_of = move |i: u32| source.and_then(|s| s.col_width(i));

        // The master's windows cover the whole viewport; frozen regions are
        // overlays on top of it, not cut out of it.
        let rows = AxisInputs {
            viewport_extent: self.viewport.height,
            scroll_offset: self.viewport.scroll_y,
            total_count: total_rows,
            default_size: default_row_height,
            // A horizontal scrollbar eats into the vertical extent
            reserved_extent: scrollbar_h,
            render_offset: self.settings.render_offset,
            size_of: &row_size_of,
        };
        let cols = AxisInputs {
            viewport_extent: self.viewport.width,
            scroll_offset: self.viewport.scroll_x,
            total_count: total_cols,
            default_size: default_col_width,
            reserved_extent: scrollbar_v,
            render_offset: self.settings.render_offset,
            size_of: &col_size_of,
        };

        let mode = self.controller.draw(&rows, &cols, fast_hint);

        if mode == DrawMode::Full {
            let col_size_of = move |i: u32| source.and_then(|s| s.col_width(i));
            self.stretch.refresh_stretching(
                (self.viewport.width - spans.left).max(0.0),
                total_cols,
                &col_size_of,
                default_col_width,
            );
            self.rebuild_pane_windows();
        }
        self.apply_placements(&spans);
        self.needs_render = false;
        mode
    }

    /// Recompute every pane's row/column windows from the master's render
    /// windows and the fixed spans.
    fn rebuild_pane_windows(&mut self) {
        let (total_rows, total_cols) = self.totals();
        let fixed_top = self.settings.fixed_rows_top.min(total_rows);
        let fixed_left = self.settings.fixed_columns_left.min(total_cols);
        let fixed_bottom = self.settings.fixed_rows_bottom.min(total_rows);

        let master_rows = self.controller.rendered_rows();
        let master_cols = self.controller.rendered_cols();
        let top_rows = self.leading_window(fixed_top);
        let left_cols = self.leading_cols_window(fixed_left);
        let bottom_rows = self.trailing_rows_window(total_rows, fixed_bottom);

        let settings = self.settings.clone();
        for pane in &mut self.panes {
            pane.refresh_needed(&settings);
            let (rows, cols) = match pane.kind {
                OverlayKind::Top => (top_rows, master_cols),
                OverlayKind::Left => (master_rows, left_cols),
                OverlayKind::TopLeftCorner => (top_rows, left_cols),
                OverlayKind::Bottom => (bottom_rows, master_cols),
                OverlayKind::BottomLeftCorner => (bottom_rows, left_cols),
                OverlayKind::Debug => (master_rows, master_cols),
            };
            pane.rows = if pane.needed() { rows } else { RenderWindow::empty() };
            pane.cols = if pane.needed() { cols } else { RenderWindow::empty() };
        }
    }

    fn leading_window(&self, count: u32) -> RenderWindow {
        if count == 0 {
            return RenderWindow::empty();
        }
        RenderWindow {
            start: Some(0),
            end: Some(count - 1),
            count,
            start_position: Some(0.0),
        }
    }

    fn leading_cols_window(&self, count: u32) -> RenderWindow {
        self.leading_window(count)
    }

    fn trailing_rows_window(&self, total: u32, count: u32) -> RenderWindow {
        if count == 0 || total == 0 {
            return RenderWindow::empty();
        }
        let start = total - count;
        RenderWindow {
            start: Some(start),
            end: Some(total - 1),
            count,
            start_position: Some(self.row_position(start)),
        }
    }

    /// Size and position every existing clone surface against the master.
    fn apply_placements(&mut self, spans: &FrozenSpans) {
        let frame = MasterFrame {
            environment: self.environment,
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            viewport_width: self.viewport.width,
            viewport_height: self.viewport.height,
            content_width: self.content_width.max(self.viewport.width),
            content_height: self.content_height.max(self.viewport.height),
            scroll_x: self.viewport.scroll_x,
            scroll_y: self.viewport.scroll_y,
        };
        for (pane, slot) in self.panes.iter().zip(&self.pane_surfaces) {
            let Some(index) = slot else {
                continue;
            };
            if !pane.needed() {
                continue;
            }
            let rect = pane.placement(&frame, spans);
            if let Some(surface) = self.synchronizer.surface_mut(*index) {
                surface.set_placement(rect);
            }
        }
    }

    /// Feed a host scroll event; keeps the viewport mirror in sync with the
    /// master surface and flags a redraw for genuine scrolls.
    pub(crate) fn scroll_event(&mut self, surface: usize, axis: Axis, position: f32) -> SyncOutcome {
        let outcome = self.synchronizer.on_scroll(surface, axis, position);
        if let SyncOutcome::Synced { .. } = outcome {
            if surface == MASTER {
                // The event reports the master's own new position; writing it
                // back is a no-op on a DOM surface but keeps headless
                // surfaces honest.
                if let Some(master) = self.synchronizer.master_mut() {
                    master.set_scroll_position(axis, position);
                }
            }
            self.mirror_master_scroll();
            self.needs_render = true;
        }
        outcome
    }

    /// Route a wheel gesture into the master scroll position.
    pub(crate) fn wheel(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        let moved = self.synchronizer.on_wheel(delta_x, delta_y);
        if moved.is_some() {
            self.needs_render = true;
        }
        moved
    }

    fn mirror_master_scroll(&mut self) {
        if let Some(master) = self.synchronizer.master() {
            self.viewport.scroll_x = master.scroll_position(Axis::Horizontal);
            self.viewport.scroll_y = master.scroll_position(Axis::Vertical);
        }
    }

    /// Bring a cell fully into view, scrolling the master as little as
    /// possible on each axis.
    pub(crate) fn scroll_viewport(&mut self, coord: GridCoord) {
        let (total_rows, total_cols) = self.totals();
        let spans = self.frozen_spans();
        let row = coord.row.max(0).unsigned_abs().min(total_rows.saturating_sub(1));
        let col = coord.col.max(0).unsigned_abs().min(total_cols.saturating_sub(1));

        let row_position = self.row_position(row);
        let row_size = self.row_size(row);
        let col_position = self.col_position(col);
        let col_size = self.col_size(col);

        let scroll_x = self.viewport.scroll_x;
        let scroll_y = self.viewport.scroll_y;
        let viewport_w = self.viewport.width;
        let viewport_h = self.viewport.height;

        // Cells inside a frozen region are always in view
        let row_frozen = row < self.settings.fixed_rows_top
            || row >= total_rows.saturating_sub(self.settings.fixed_rows_bottom);
        let col_frozen = col < self.settings.fixed_columns_left;

        // The pane owning the frozen span on each axis computes the target
        let left_pane = OverlayPane::new(OverlayKind::Left);
        let top_pane = OverlayPane::new(OverlayKind::Top);
        let mut moved = false;

        if let Some(master) = self.synchronizer.master_mut() {
            if col_frozen {
                // No horizontal scroll needed
            } else if col_position < scroll_x + spans.left {
                left_pane.scroll_to(
                    &ScrollToRequest {
                        axis: Axis::Horizontal,
                        item_position: col_position,
                        item_size: col_size,
                        frozen_span: spans.left,
                        align_far_edge: false,
                    },
                    master,
                    false,
                );
                moved = true;
            } else if col_position + col_size > scroll_x + viewport_w {
                left_pane.scroll_to(
                    &ScrollToRequest {
                        axis: Axis::Horizontal,
                        item_position: col_position,
                        item_size: col_size,
                        frozen_span: spans.left,
                        align_far_edge: true,
                    },
                    master,
                    false,
                );
                moved = true;
            }

            if row_frozen {
                // No vertical scroll needed
            } else if row_position < scroll_y + spans.top {
                top_pane.scroll_to(
                    &ScrollToRequest {
                        axis: Axis::Vertical,
                        item_position: row_position,
                        item_size: row_size,
                        frozen_span: spans.top,
                        align_far_edge: false,
                    },
                    master,
                    false,
                );
                moved = true;
            } else if row_position + row_size > scroll_y + viewport_h - spans.bottom {
                top_pane.scroll_to(
                    &ScrollToRequest {
                        axis: Axis::Vertical,
                        item_position: row_position,
                        item_size: row_size,
                        frozen_span: spans.top,
                        align_far_edge: true,
                    },
                    master,
                    false,
                );
                moved = true;
            }
        }

        if moved {
            self.mirror_master_scroll();
            self.needs_render = true;
        }
    }

    /// Hit-test a viewport-relative point into a grid coordinate. Header
    /// tracks come back as negative indices; points past the content map to
    /// `None`.
    pub(crate) fn cell_at(&self, x: f32, y: f32) -> Option<GridCoord> {
        let (total_rows, total_cols) = self.totals();
        let row = self.track_at(
            y,
            self.settings.column_header_count,
            self.settings.default_row_height,
            self.settings.fixed_rows_top.min(total_rows),
            self.viewport.scroll_y,
            total_rows,
            &|i| self.row_size(i),
        )?;
        let col = self.track_at(
            x,
            self.settings.row_header_count,
            self.settings.default_col_width,
            self.settings.fixed_columns_left.min(total_cols),
            self.viewport.scroll_x,
            total_cols,
            &|i| self.col_size(i),
        )?;
        Some(GridCoord::new(row, col))
    }

    // The header-slot division is non-negative and tiny, so the f32->u32
    // cast cannot truncate meaningfully.
    #[allow(
        clippy::too_many_arguments,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn track_at(
        &self,
        offset: f32,
        header_count: u32,
        header_size: f32,
        fixed_count: u32,
        scroll: f32,
        total: u32,
        size_of: &dyn Fn(u32) -> f32,
    ) -> Option<i32> {
        if offset < 0.0 {
            return None;
        }
        let header_span = header_count as f32 * header_size;
        if offset < header_span {
            // Header track: the one nearest the data is -1
            let slot = (offset / header_size) as u32;
            let filter = IndexFilter::new(0, header_count);
            return Some(filter.headered_to_source(i32::try_from(slot).unwrap_or(0)));
        }

        let mut content_offset = offset - header_span;
        let frozen_span: f32 = (0..fixed_count).map(size_of).sum();
        if content_offset >= frozen_span {
            // Past the frozen region: translate into scrolled content space
            content_offset += scroll;
        }

        let mut sum = 0.0f32;
        for i in 0..total {
            let size = size_of(i);
            if content_offset < sum + size {
                return i32::try_from(i).ok();
            }
            sum += size;
        }
        None
    }

    /// Selection borders for every region, split across frozen boundaries.
    pub(crate) fn selection_borders(&self) -> Vec<SelectionRect> {
        let (total_rows, total_cols) = self.totals();
        let spans = self.frozen_spans();
        let rows = AxisProjection {
            frozen_count: self.settings.fixed_rows_top.min(total_rows),
            frozen_span: spans.top,
            scroll: self.viewport.scroll_y,
            position_of: &|i| self.row_position(i),
        };
        let cols = AxisProjection {
            frozen_count: self.settings.fixed_columns_left.min(total_cols),
            frozen_span: spans.left,
            scroll: self.viewport.scroll_x,
            position_of: &|i| self.col_position(i),
        };
        self.selection
            .ranges()
            .iter()
            .flat_map(|range| selection_rects(range, &rows, &cols))
            .collect()
    }

    pub(crate) fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            scroll_x: self.viewport.scroll_x,
            scroll_y: self.viewport.scroll_y,
            viewport_width: self.viewport.width,
            viewport_height: self.viewport.height,
            content_width: self.content_width,
            content_height: self.content_height,
            last_applied: self.controller.last_applied(),
            rendered: GridBounds::from_windows(
                &self.controller.rendered_rows(),
                &self.controller.rendered_cols(),
            ),
            visible: GridBounds::from_windows(
                &self.controller.visible_rows(),
                &self.controller.visible_cols(),
            ),
            panes: self.panes.iter().map(OverlayPane::descriptor).collect(),
        }
    }

    /// Register a clone surface for a pane kind. Replacing an existing
    /// surface is allowed after a teardown/rebuild.
    pub(crate) fn attach_pane_surface(
        &mut self,
        kind: OverlayKind,
        surface: Box<dyn Surface>,
    ) -> Result<usize> {
        if self.synchronizer.is_torn_down() {
            return Err(crate::error::GridViewError::Surface(
                "view is torn down".to_string(),
            ));
        }
        let index = self.synchronizer.add_pane(kind, surface);
        let slot = OverlayKind::ALL.iter().position(|k| *k == kind);
        if let Some(slot) = slot {
            if let Some(entry) = self.pane_surfaces.get_mut(slot) {
                *entry = Some(index);
            }
        }
        Ok(index)
    }

    pub(crate) fn destroy_all(&mut self) {
        self.synchronizer.destroy();
        self.pane_surfaces.iter_mut().for_each(|slot| *slot = None);
        self.controller.invalidate();
    }

    /// Apply a new settings snapshot: pane structure and cached windows are
    /// invalidated, the next draw is full.
    pub(crate) fn update_settings(&mut self, settings: GridSettings) {
        self.stretch = ColumnStretch::new(settings.stretch);
        self.settings = settings;
        let snapshot = self.settings.clone();
        for pane in &mut self.panes {
            pane.refresh_needed(&snapshot);
        }
        self.refresh_content_extents();
        self.controller.invalidate();
        self.needs_render = true;
    }

    pub(crate) fn set_source(&mut self, source: Box<dyn GridSource>) {
        self.source = Some(source);
        self.refresh_content_extents();
        self.selection.clear();
        self.controller.invalidate();
        self.needs_render = true;
    }

    /// Render one cell's content through the data-source callback.
    pub(crate) fn cell_content(&self, row: u32, col: u32) -> CellContent {
        let mut content = CellContent::default();
        if let Some(source) = self.source.as_deref() {
            source.render_cell(row, col, &mut content);
        }
        content
    }
}

/// The main grid widget exported to JavaScript.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct GridView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    wheel_closure: Option<Closure<dyn FnMut(WheelEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    scroll_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    scroll_container: Option<HtmlDivElement>,
    #[cfg(target_arch = "wasm32")]
    scroll_spacer: Option<HtmlDivElement>,

    // Non-wasm32 fields
    #[cfg(not(target_arch = "wasm32"))]
    state: SharedState,
}

// ============================================================================
// Non-WASM32 Implementation (for testing/CLI)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl GridView {
    /// Create a new viewer backed by mock surfaces (non-wasm version for
    /// testing and the CLI).
    pub fn new_test(width: f32, height: f32) -> Self {
        let master = MockSurface::new(width, height);
        GridView {
            state: SharedState::new(
                Box::new(master),
                width,
                height,
                ScrollEnvironment::Container,
            ),
        }
    }

    /// Swap in a data source; invalidates all cached windows.
    pub fn set_source(&mut self, source: Box<dyn GridSource>) {
        self.state.set_source(source);
        self.rebuild_master_surface();
    }

    /// Apply a settings snapshot.
    pub fn set_settings(&mut self, settings: GridSettings) {
        self.state.update_settings(settings);
        self.rebuild_master_surface();
    }

    pub fn settings(&self) -> &GridSettings {
        &self.state.settings
    }

    /// Create the clone surface for a pane kind by name. Unknown kinds are a
    /// hard error.
    pub fn create_pane(&mut self, kind: &str) -> Result<usize> {
        let kind = OverlayKind::parse(kind)?;
        let spans = self.state.frozen_spans();
        let (width, height) = match kind {
            OverlayKind::Top => (self.state.viewport.width, spans.top),
            OverlayKind::Left => (spans.left, self.state.viewport.height),
            OverlayKind::TopLeftCorner => (spans.left, spans.top),
            OverlayKind::Bottom => (self.state.viewport.width, spans.bottom),
            OverlayKind::BottomLeftCorner => (spans.left, spans.bottom),
            OverlayKind::Debug => (self.state.viewport.width, self.state.viewport.height),
        };
        let surface = MockSurface::new(width, height)
            .with_content(self.state.content_width, self.state.content_height);
        self.state.attach_pane_surface(kind, Box::new(surface))
    }

    /// Tear down every surface; the view keeps its data but stops syncing.
    pub fn destroy_all(&mut self) {
        self.state.destroy_all();
    }

    /// Run a draw cycle; returns the mode that was actually applied.
    pub fn draw(&mut self, fast_hint: bool) -> DrawMode {
        self.state.draw(fast_hint)
    }

    pub fn get_rendered_bounds(&self) -> GridBounds {
        GridBounds::from_windows(
            &self.state.controller.rendered_rows(),
            &self.state.controller.rendered_cols(),
        )
    }

    pub fn get_visible_bounds(&self) -> GridBounds {
        GridBounds::from_windows(
            &self.state.controller.visible_rows(),
            &self.state.controller.visible_cols(),
        )
    }

    /// Scroll so the given cell is fully in view.
    pub fn scroll_viewport(&mut self, coord: GridCoord) {
        self.state.scroll_viewport(coord);
    }

    /// Feed a scroll event observed on a surface (tests drive the event loop
    /// by hand).
    pub fn scroll_event(&mut self, surface: usize, axis: Axis, position: f32) -> SyncOutcome {
        self.state.scroll_event(surface, axis, position)
    }

    /// Feed a wheel gesture; returns the master's new scroll position when
    /// anything moved.
    pub fn wheel(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        self.state.wheel(delta_x, delta_y)
    }

    /// Programmatic relative scroll; returns the deltas actually applied.
    pub fn scroll(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        self.state.scroll_by(delta_x, delta_y)
    }

    pub fn needs_render(&self) -> bool {
        self.state.needs_render
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.synchronizer.is_torn_down()
    }

    /// Index of the master surface, for `scroll_event`.
    pub fn master_surface(&self) -> usize {
        MASTER
    }

    pub fn pane_descriptor(&self, kind: OverlayKind) -> Option<PaneDescriptor> {
        OverlayKind::ALL
            .iter()
            .position(|k| *k == kind)
            .and_then(|slot| self.state.panes.get(slot))
            .map(OverlayPane::descriptor)
    }

    pub fn pane_descriptors(&self) -> Vec<PaneDescriptor> {
        self.state.panes.iter().map(OverlayPane::descriptor).collect()
    }

    /// Selection gesture entry points.
    pub fn on_mouse_down(&mut self, x: f32, y: f32, append: bool) {
        if let Some(coord) = self.state.cell_at(x, y) {
            self.state.selection.begin(coord, append);
            self.state.is_selecting = true;
            self.state.needs_render = true;
        }
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        if !self.state.is_selecting {
            return;
        }
        if let Some(coord) = self.state.cell_at(x, y) {
            self.state.selection.update(coord);
            self.state.needs_render = true;
        }
    }

    pub fn on_mouse_up(&mut self, _x: f32, _y: f32) {
        self.state.is_selecting = false;
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.state.selection
    }

    pub fn selection_borders(&self) -> Vec<SelectionRect> {
        self.state.selection_borders()
    }

    pub fn cell_at(&self, x: f32, y: f32) -> Option<GridCoord> {
        self.state.cell_at(x, y)
    }

    pub fn cell_content(&self, row: u32, col: u32) -> CellContent {
        self.state.cell_content(row, col)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.viewport.resize(width, height);
        self.state.controller.invalidate();
        self.state.needs_render = true;
        self.rebuild_master_surface();
    }

    pub fn content_width(&self) -> f32 {
        self.state.content_width
    }

    pub fn content_height(&self) -> f32 {
        self.state.content_height
    }

    pub fn get_scroll_debug(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state.debug_snapshot())?)
    }

    /// Mock surfaces cannot grow their content lazily; rebuild the master
    /// with fresh extents whenever the dataset or viewport changes.
    fn rebuild_master_surface(&mut self) {
        if self.state.synchronizer.is_torn_down() {
            return;
        }
        let scroll_x = self.state.viewport.scroll_x;
        let scroll_y = self.state.viewport.scroll_y;
        let master = MockSurface::new(self.state.viewport.width, self.state.viewport.height)
            .with_content(
                self.state.content_width.max(self.state.viewport.width),
                self.state.content_height.max(self.state.viewport.height),
            );
        let rebuilt = OverlaySynchronizer::new(Box::new(master));
        // Re-attach existing pane surfaces in pane order
        let pane_kinds: Vec<Option<OverlayKind>> = self
            .state
            .pane_surfaces
            .iter()
            .zip(OverlayKind::ALL)
            .map(|(slot, kind)| slot.map(|_| kind))
            .collect();
        self.state.pane_surfaces.iter_mut().for_each(|slot| *slot = None);
        self.state.synchronizer = rebuilt;
        if let Some(master) = self.state.synchronizer.master_mut() {
            master.set_scroll_position(Axis::Horizontal, scroll_x);
            master.set_scroll_position(Axis::Vertical, scroll_y);
        }
        for kind in pane_kinds.into_iter().flatten() {
            let _ = self.create_pane(kind.name());
        }
    }
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

// Timing helper for settle detection.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Data source backed by JS callbacks.
#[cfg(target_arch = "wasm32")]
struct JsGridSource {
    rows: u32,
    cols: u32,
    renderer: Option<js_sys::Function>,
}

#[cfg(target_arch = "wasm32")]
impl GridSource for JsGridSource {
    fn count_rows(&self) -> u32 {
        self.rows
    }

    fn count_cols(&self) -> u32 {
        self.cols
    }

    fn render_cell(&self, row: u32, col: u32, target: &mut CellContent) {
        if let Some(renderer) = &self.renderer {
            if let Ok(value) =
                renderer.call2(&JsValue::NULL, &JsValue::from(row), &JsValue::from(col))
            {
                if let Some(text) = value.as_string() {
                    target.text = text;
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a new grid view inside the given container element.
    ///
    /// Builds the scroll container, spacer, and master surface; event
    /// handlers for scroll, wheel, and selection are registered
    /// automatically.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, width: f32, height: f32) -> std::result::Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let (scroll_container, spacer) = events::build_scroll_dom(&container, width, height)
            .ok_or_else(|| JsValue::from_str("failed to build scroll container"))?;

        let master = events::DomSurface::new(scroll_container.clone());
        let state = Rc::new(RefCell::new(SharedState::new(
            Box::new(master),
            width,
            height,
            ScrollEnvironment::Container,
        )));

        let scroll_closure = events::attach_scroll_listener(&scroll_container, &state);
        let wheel_closure = events::attach_wheel_listener(&scroll_container, &state);
        let closures = events::attach_mouse_listeners(&scroll_container, &state);

        Ok(GridView {
            state,
            closures,
            wheel_closure: Some(wheel_closure),
            scroll_closure: Some(scroll_closure),
            scroll_container: Some(scroll_container),
            scroll_spacer: Some(spacer),
        })
    }

    /// Provide the dataset: row/column counts plus an optional
    /// `(row, col) -> string` renderer callback.
    pub fn set_source(&mut self, rows: u32, cols: u32, renderer: Option<js_sys::Function>) {
        self.state.borrow_mut().set_source(Box::new(JsGridSource {
            rows,
            cols,
            renderer,
        }));
        self.update_scroll_spacer();
    }

    /// Apply a settings snapshot (JSON object, missing fields default).
    pub fn set_settings(&mut self, settings: JsValue) -> std::result::Result<(), JsValue> {
        let settings: GridSettings = serde_wasm_bindgen::from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("invalid settings: {e}")))?;
        self.state.borrow_mut().update_settings(settings);
        self.update_scroll_spacer();
        Ok(())
    }

    /// Create the clone surface for a pane kind by name.
    pub fn create_pane(&mut self, kind: &str) -> std::result::Result<usize, JsValue> {
        let kind = OverlayKind::parse(kind)?;
        let Some(container) = &self.scroll_container else {
            return Err(JsValue::from_str("scroll container missing"));
        };
        let surface = events::build_pane_surface(container, kind)
            .ok_or_else(|| JsValue::from_str("failed to build pane surface"))?;
        self.state
            .borrow_mut()
            .attach_pane_surface(kind, Box::new(surface))
            .map_err(JsValue::from)
    }

    /// Tear down every surface and listener target.
    pub fn destroy_all(&mut self) {
        self.state.borrow_mut().destroy_all();
    }

    /// Run a draw cycle; returns `"fast"` or `"full"`.
    pub fn draw(&mut self, fast_hint: bool) -> std::result::Result<JsValue, JsValue> {
        let mode = self.state.borrow_mut().draw(fast_hint);
        serde_wasm_bindgen::to_value(&mode).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Scroll so the given cell is fully in view.
    pub fn scroll_viewport(&mut self, row: i32, col: i32) {
        self.state
            .borrow_mut()
            .scroll_viewport(GridCoord::new(row, col));
    }

    /// Scroll by a delta (converted into a wheel-style master update).
    pub fn scroll(&mut self, delta_x: f32, delta_y: f32) {
        let _ = self.state.borrow_mut().wheel(delta_x, delta_y);
    }

    pub fn get_rendered_bounds(&self) -> std::result::Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let bounds = GridBounds::from_windows(
            &state.controller.rendered_rows(),
            &state.controller.rendered_cols(),
        );
        serde_wasm_bindgen::to_value(&bounds).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn get_visible_bounds(&self) -> std::result::Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let bounds = GridBounds::from_windows(
            &state.controller.visible_rows(),
            &state.controller.visible_cols(),
        );
        serde_wasm_bindgen::to_value(&bounds).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        {
            let mut state = self.state.borrow_mut();
            state.viewport.resize(width, height);
            state.controller.invalidate();
            state.needs_render = true;
        }
        self.update_scroll_spacer();
    }

    /// Scroll/draw diagnostics as a JS object.
    pub fn get_scroll_debug(&self) -> std::result::Result<JsValue, JsValue> {
        let state = self.state.borrow();
        serde_wasm_bindgen::to_value(&state.debug_snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Register a callback invoked whenever a redraw becomes necessary
    /// (scroll, wheel, selection). The host typically schedules `draw` in a
    /// requestAnimationFrame from here.
    pub fn set_render_callback(&mut self, callback: Option<js_sys::Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Size the spacer div to the content so the container scrolls natively.
    fn update_scroll_spacer(&self) {
        let Some(spacer) = &self.scroll_spacer else {
            return;
        };
        let state = self.state.borrow();
        let style = spacer.style();
        let _ = style.set_property("width", &format!("{}px", state.content_width));
        let _ = style.set_property("height", &format!("{}px", state.content_height));
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
    use crate::types::CellContent;

    struct FixedSource {
        rows: u32,
        cols: u32,
    }

    impl GridSource for FixedSource {
        fn count_rows(&self) -> u32 {
            self.rows
        }
        fn count_cols(&self) -> u32 {
            self.cols
        }
        fn render_cell(&self, row: u32, col: u32, target: &mut CellContent) {
            target.text = format!("{row}:{col}");
        }
    }

    fn view() -> GridView {
        let mut view = GridView::new_test(640.0, 480.0);
        view.set_source(Box::new(FixedSource {
            rows: 1000,
            cols: 100,
        }));
        view
    }

    #[test]
    fn draw_populates_bounds() {
        let mut view = view();
        assert_eq!(view.draw(false), DrawMode::Full);
        let rendered = view.get_rendered_bounds();
        let visible = view.get_visible_bounds();
        assert_eq!(rendered.start_row, Some(0));
        assert_eq!(visible.start_row, Some(0));
        // 480 / 24 = 20 rows visible
        assert_eq!(visible.end_row, Some(19));
        // Rendered is buffered beyond visible
        assert!(rendered.end_row.unwrap() > visible.end_row.unwrap());
        assert!(!view.needs_render());
    }

    #[test]
    fn cell_content_flows_from_the_source() {
        let view = view();
        assert_eq!(view.cell_content(3, 7).text, "3:7");
    }

    #[test]
    fn unknown_pane_kind_is_a_hard_error() {
        let mut view = view();
        assert!(view.create_pane("top").is_ok());
        assert!(view.create_pane("sideways").is_err());
    }

    #[test]
    fn hit_testing_maps_headers_to_negative_tracks() {
        let mut view = view();
        let mut settings = GridSettings::default();
        settings.column_header_count = 1;
        settings.row_header_count = 1;
        view.set_settings(settings);

        // Inside the corner: both header tracks
        let coord = view.cell_at(10.0, 10.0).unwrap();
        assert_eq!(coord, GridCoord::new(-1, -1));
        // First data cell past the headers
        let coord = view.cell_at(64.0 + 1.0, 24.0 + 1.0).unwrap();
        assert_eq!(coord, GridCoord::new(0, 0));
    }

    #[test]
    fn selection_gesture_produces_borders() {
        let mut view = view();
        view.draw(false);
        view.on_mouse_down(10.0, 10.0, false);
        view.on_mouse_move(200.0, 100.0);
        view.on_mouse_up(200.0, 100.0);

        let range = view.selection().current().unwrap();
        assert_eq!(range.highlight, GridCoord::new(0, 0));
        assert_eq!(range.to, GridCoord::new(4, 3));

        let borders = view.selection_borders();
        assert_eq!(borders.len(), 1);
        assert!(borders[0].draw_top && borders[0].draw_left);
    }

    #[test]
    fn scroll_viewport_brings_far_cells_into_view() {
        let mut view = view();
        view.draw(false);
        view.scroll_viewport(GridCoord::new(500, 0));
        assert!(view.needs_render());
        view.draw(false);
        let visible = view.get_visible_bounds();
        assert!(visible.start_row.unwrap() <= 500);
        assert!(visible.end_row.unwrap() >= 500);
    }

    #[test]
    fn destroy_all_stops_syncing() {
        let mut view = view();
        view.draw(false);
        view.destroy_all();
        assert!(view.is_torn_down());
        assert_eq!(view.wheel(0.0, 100.0), None);
    }
}
