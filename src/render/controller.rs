//! Draw-cycle orchestration: full structural redraws vs. fast redraws.
//!
//! A full draw recomputes both render windows, rebuilds overlay structure and
//! stretching; a fast draw only repositions already-materialized content. The
//! controller caches the render windows between draws and permits the fast
//! path only while the visible window stays inside them.

use serde::Serialize;

use crate::layout::{AxisCalcRequest, AxisCalculator, RenderWindow};
use crate::types::RenderOffset;

/// Which redraw flavor a draw request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Structure-preserving redraw; windows and overlays untouched.
    Fast,
    /// Windows recomputed, overlay structure rebuilt, stretching refreshed.
    Full,
}

/// Everything the controller needs to calculate one axis.
pub struct AxisInputs<'a> {
    pub viewport_extent: f32,
    pub scroll_offset: f32,
    pub total_count: u32,
    pub default_size: f32,
    /// Extent consumed by a crossing scrollbar.
    pub reserved_extent: f32,
    pub render_offset: RenderOffset,
    pub size_of: &'a dyn Fn(u32) -> Option<f32>,
}

/// Chooses between full and fast redraws and caches the resulting windows.
#[derive(Debug)]
pub struct RenderController {
    rows_render: Option<RenderWindow>,
    cols_render: Option<RenderWindow>,
    rows_visible: RenderWindow,
    cols_visible: RenderWindow,
    last_applied: Option<DrawMode>,
}

impl RenderController {
    pub fn new() -> Self {
        Self {
            rows_render: None,
            cols_render: None,
            rows_visible: RenderWindow::empty(),
            cols_visible: RenderWindow::empty(),
            last_applied: None,
        }
    }

    /// Forget the cached render windows; the next draw is forced full.
    /// Called on settings and dataset changes.
    pub fn invalidate(&mut self) {
        self.rows_render = None;
        self.cols_render = None;
        self.last_applied = None;
    }

    /// Run one draw cycle. `fast_hint` asks for the cheap path; it is only
    /// honored when both axes' visible windows still fit inside the cached
    /// render windows.
    pub fn draw(&mut self, rows: &AxisInputs, cols: &AxisInputs, fast_hint: bool) -> DrawMode {
        let rows_visible = Self::visible_window(rows);
        let cols_visible = Self::visible_window(cols);

        let fast_permitted = fast_hint
            && match (&self.rows_render, &self.cols_render) {
                (Some(rows_render), Some(cols_render)) => {
                    Self::fast_permitted(&rows_visible, rows_render, rows.total_count)
                        && Self::fast_permitted(&cols_visible, cols_render, cols.total_count)
                }
                _ => false,
            };

        self.rows_visible = rows_visible;
        self.cols_visible = cols_visible;

        let mode = if fast_permitted {
            DrawMode::Fast
        } else {
            self.rows_render = Some(Self::render_window(rows));
            self.cols_render = Some(Self::render_window(cols));
            DrawMode::Full
        };
        self.last_applied = Some(mode);
        mode
    }

    /// Fast draw is allowed iff the proposed visible window needs nothing
    /// outside the materialized render window. A render window already
    /// pinned at the axis start (or end) counts as an open bound on that
    /// side.
    fn fast_permitted(visible: &RenderWindow, render: &RenderWindow, total_count: u32) -> bool {
        if total_count == 0 {
            return visible.count == 0;
        }
        let (Some(visible_start), Some(visible_end)) = (visible.start, visible.end) else {
            return false;
        };
        let (Some(render_start), Some(render_end)) = (render.start, render.end) else {
            return false;
        };

        let start_ok = render_start == 0 || visible_start >= render_start;
        let end_ok = render_end == total_count - 1 || visible_end <= render_end;
        start_ok && end_ok
    }

    fn visible_window(inputs: &AxisInputs) -> RenderWindow {
        let mut calculator = AxisCalculator::new(
            AxisCalcRequest::new(
                inputs.viewport_extent,
                inputs.scroll_offset,
                inputs.total_count,
            )
            .with_default_size(inputs.default_size)
            .with_reserved_extent(inputs.reserved_extent)
            .only_fully_visible(true),
        );
        calculator.calculate(inputs.size_of, None)
    }

    fn render_window(inputs: &AxisInputs) -> RenderWindow {
        let render_offset = inputs.render_offset;
        let mut calculator = AxisCalculator::new(
            AxisCalcRequest::new(
                inputs.viewport_extent,
                inputs.scroll_offset,
                inputs.total_count,
            )
            .with_default_size(inputs.default_size)
            .with_reserved_extent(inputs.reserved_extent),
        );
        calculator.calculate(
            inputs.size_of,
            Some(&move |calc: &mut AxisCalculator| {
                let offset = render_offset.resolve(calc.window().count);
                calc.widen(offset, offset);
            }),
        )
    }

    pub fn rendered_rows(&self) -> RenderWindow {
        self.rows_render.unwrap_or_else(RenderWindow::empty)
    }

    pub fn rendered_cols(&self) -> RenderWindow {
        self.cols_render.unwrap_or_else(RenderWindow::empty)
    }

    pub fn visible_rows(&self) -> RenderWindow {
        self.rows_visible
    }

    pub fn visible_cols(&self) -> RenderWindow {
        self.cols_visible
    }

    pub fn last_applied(&self) -> Option<DrawMode> {
        self.last_applied
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

    fn inputs(scroll: f32, total: u32) -> AxisInputs<'static> {
        AxisInputs {
            viewport_extent: 200.0,
            scroll_offset: scroll,
            total_count: total,
            default_size: 20.0,
            reserved_extent: 0.0,
            render_offset: RenderOffset::Items(3),
            size_of: &|_| Some(20.0),
        }
    }

    #[test]
    fn first_draw_is_always_full() {
        let mut controller = RenderController::new();
        let mode = controller.draw(&inputs(0.0, 100), &inputs(0.0, 50), true);
        assert_eq!(mode, DrawMode::Full);
        assert_eq!(controller.last_applied(), Some(DrawMode::Full));
    }

    #[test]
    fn render_window_is_buffered_beyond_visible() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false);

        let visible = controller.visible_rows();
        let render = controller.rendered_rows();
        assert_eq!(visible.start, Some(20));
        assert_eq!(visible.end, Some(29));
        // 3 items of scroll-ahead on each side
        assert_eq!(render.start, Some(17));
        assert_eq!(render.end, Some(32));
    }

    #[test]
    fn fast_draw_is_idempotent_without_changes() {
        let mut controller = RenderController::new();
        assert_eq!(
            controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false),
            DrawMode::Full
        );
        assert_eq!(
            controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), true),
            DrawMode::Fast
        );
        let render_after_first = controller.rendered_rows();
        assert_eq!(
            controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), true),
            DrawMode::Fast
        );
        // No structural rebuild: the render window is bit-identical
        assert_eq!(controller.rendered_rows(), render_after_first);
    }

    #[test]
    fn small_scroll_inside_the_buffer_stays_fast() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false);
        // 40px = 2 items, inside the 3-item buffer
        assert_eq!(
            controller.draw(&inputs(440.0, 100), &inputs(0.0, 50), true),
            DrawMode::Fast
        );
    }

    #[test]
    fn scroll_past_the_buffer_forces_full() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false);
        // 100px = 5 items forward: visible end 34 > render end 32
        assert_eq!(
            controller.draw(&inputs(500.0, 100), &inputs(0.0, 50), true),
            DrawMode::Full
        );
    }

    #[test]
    fn scroll_back_past_the_window_start_forces_full() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false);
        assert_eq!(
            controller.draw(&inputs(200.0, 100), &inputs(0.0, 50), true),
            DrawMode::Full
        );
    }

    #[test]
    fn render_window_at_axis_start_is_an_open_lower_bound() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(20.0, 100), &inputs(0.0, 50), false);
        assert_eq!(controller.rendered_rows().start, Some(0));
        // Scrolling back to the very top stays fast: start 0 allows any
        // lower visible start
        assert_eq!(
            controller.draw(&inputs(0.0, 100), &inputs(0.0, 50), true),
            DrawMode::Fast
        );
    }

    #[test]
    fn render_window_at_axis_end_is_an_open_upper_bound() {
        let mut controller = RenderController::new();
        // Scrolled to the bottom: render window reaches the last index
        controller.draw(&inputs(1800.0, 100), &inputs(0.0, 50), false);
        assert_eq!(controller.rendered_rows().end, Some(99));
        assert_eq!(
            controller.draw(&inputs(1800.0, 100), &inputs(0.0, 50), true),
            DrawMode::Fast
        );
    }

    #[test]
    fn fast_hint_false_always_recomputes() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false);
        assert_eq!(
            controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false),
            DrawMode::Full
        );
    }

    #[test]
    fn invalidate_forces_the_next_draw_full() {
        let mut controller = RenderController::new();
        controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), false);
        controller.invalidate();
        assert_eq!(controller.last_applied(), None);
        assert_eq!(
            controller.draw(&inputs(400.0, 100), &inputs(0.0, 50), true),
            DrawMode::Full
        );
    }

    #[test]
    fn empty_dataset_draws_fast_after_first_full() {
        let mut controller = RenderController::new();
        assert_eq!(
            controller.draw(&inputs(0.0, 0), &inputs(0.0, 0), false),
            DrawMode::Full
        );
        assert_eq!(controller.rendered_rows().count, 0);
        assert_eq!(
            controller.draw(&inputs(0.0, 0), &inputs(0.0, 0), true),
            DrawMode::Fast
        );
    }
}
