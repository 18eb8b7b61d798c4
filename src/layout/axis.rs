//! Per-axis render window calculation.
//!
//! One [`AxisCalculator`] run answers, for a single axis: given the viewport
//! extent, the scroll offset and a per-item size lookup, which span of items
//! has to be materialized. Two flavors are produced from the same walk: the
//! buffered *render* window (`only_fully_visible = false`, usually widened
//! further by an override hook) and the exact *visible* window
//! (`only_fully_visible = true`).

use serde::Serialize;

/// Inputs for one calculation run.
#[derive(Debug, Clone, Copy)]
pub struct AxisCalcRequest {
    /// Viewport extent on this axis, in logical pixels.
    pub viewport_extent: f32,
    /// Scroll offset of the viewport's leading edge.
    pub scroll_offset: f32,
    /// Total number of items on the axis.
    pub total_count: u32,
    /// Size used when the per-item lookup returns `None`.
    pub default_size: f32,
    /// `true` computes the exact visible window; `false` buffers partially
    /// visible leading/trailing items.
    pub only_fully_visible: bool,
    /// Extent consumed by a crossing scrollbar, subtracted from the far edge.
    pub reserved_extent: f32,
}

impl AxisCalcRequest {
    pub fn new(viewport_extent: f32, scroll_offset: f32, total_count: u32) -> Self {
        Self {
            viewport_extent,
            scroll_offset,
            total_count,
            default_size: 0.0,
            only_fully_visible: false,
            reserved_extent: 0.0,
        }
    }

    pub fn with_default_size(mut self, size: f32) -> Self {
        self.default_size = size;
        self
    }

    pub fn only_fully_visible(mut self, value: bool) -> Self {
        self.only_fully_visible = value;
        self
    }

    pub fn with_reserved_extent(mut self, extent: f32) -> Self {
        self.reserved_extent = extent;
        self
    }
}

/// The span of items materialized (or exactly visible) on one axis.
///
/// `start <= end` whenever `count > 0`; `count == 0` iff the axis has no
/// content. `start_position` is the offset of `start`'s leading edge relative
/// to the content origin, `None` only when there is no window at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderWindow {
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub count: u32,
    pub start_position: Option<f32>,
}

/// Where a logical index falls relative to a window. Out-of-window probes are
/// routine during scroll-boundary checks, so this is a sentinel, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLookup {
    /// The index precedes the window.
    Before,
    /// Inside; carries the position relative to the window start.
    Inside(u32),
    /// The index follows the window.
    After,
}

impl RenderWindow {
    /// An empty window (degenerate axis).
    pub fn empty() -> Self {
        Self {
            start: None,
            end: None,
            count: 0,
            start_position: None,
        }
    }

    /// Locate a logical index relative to this window.
    pub fn lookup(&self, index: u32) -> WindowLookup {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                if index < start {
                    WindowLookup::Before
                } else if index > end {
                    WindowLookup::After
                } else {
                    WindowLookup::Inside(index - start)
                }
            }
            // No content: every probe is past the (empty) window
            _ => WindowLookup::After,
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        matches!(self.lookup(index), WindowLookup::Inside(_))
    }
}

/// Walks one axis and carries the chosen window plus per-index offsets.
///
/// The `start`/`end` fields stay public so an override hook can widen the
/// window (render buffering, always-included fixed tracks) before the final
/// [`RenderWindow`] is read out with [`AxisCalculator::window`].
pub struct AxisCalculator {
    request: AxisCalcRequest,
    /// First item of the chosen window.
    pub start: Option<u32>,
    /// Last item of the chosen window.
    pub end: Option<u32>,
    positions: Vec<f32>,
    total_extent: f32,
}

impl AxisCalculator {
    pub fn new(request: AxisCalcRequest) -> Self {
        Self {
            request,
            start: None,
            end: None,
            positions: Vec::new(),
            total_extent: 0.0,
        }
    }

    /// Total item count of the underlying axis.
    pub fn total_count(&self) -> u32 {
        self.request.total_count
    }

    /// Leading-edge offset of a walked item, if it was reached.
    pub fn position_at(&self, index: u32) -> Option<f32> {
        self.positions.get(index as usize).copied()
    }

    /// Summed extent of all walked items.
    pub fn walked_extent(&self) -> f32 {
        self.total_extent
    }

    /// Run the walk, apply the optional override, and read out the window.
    pub fn calculate(
        &mut self,
        size_of: &dyn Fn(u32) -> Option<f32>,
        override_fn: Option<&dyn Fn(&mut AxisCalculator)>,
    ) -> RenderWindow {
        self.walk(size_of);
        if let Some(hook) = override_fn {
            hook(self);
            self.clamp();
        }
        self.window()
    }

    /// Forward walk accumulating item positions. If the items run out before
    /// the far edge is reached (viewport larger than the remaining content),
    /// re-anchor backward from the last item so the window is filled from the
    /// dataset's end instead of left dangling short.
    fn walk(&mut self, size_of: &dyn Fn(u32) -> Option<f32>) {
        let req = self.request;
        self.start = None;
        self.end = None;
        self.positions.clear();
        self.total_extent = 0.0;

        if req.total_count == 0 {
            return;
        }

        let extent = (req.viewport_extent - req.reserved_extent).max(0.0);
        let far_edge = req.scroll_offset + extent;
        let mut sum = 0.0f32;
        let mut item_size = req.default_size;
        let mut need_reverse = true;

        for i in 0..req.total_count {
            item_size = size_of(i).unwrap_or(req.default_size);

            if sum <= req.scroll_offset && !req.only_fully_visible {
                self.start = Some(i);
            }
            if sum >= req.scroll_offset && sum + item_size <= far_edge {
                if self.start.is_none() {
                    self.start = Some(i);
                }
                self.end = Some(i);
            }

            self.positions.push(sum);
            sum += item_size;

            if !req.only_fully_visible {
                self.end = Some(i);
            }
            if sum >= far_edge {
                need_reverse = false;
                break;
            }
        }
        self.total_extent = sum;

        let Some(end) = self.end else {
            return;
        };

        if end + 1 == req.total_count && need_reverse {
            let end_edge = self.position_at(end).unwrap_or(0.0) + item_size;
            let mut start = end;
            while start > 0 {
                let span = end_edge - self.position_at(start - 1).unwrap_or(0.0);
                if span <= extent || !req.only_fully_visible {
                    start -= 1;
                }
                if span >= extent {
                    break;
                }
            }
            self.start = Some(start);
        }
    }

    /// Widen the window to include `index` (no-op when already inside).
    pub fn include(&mut self, index: u32) {
        let index = index.min(self.request.total_count.saturating_sub(1));
        self.start = Some(self.start.map_or(index, |s| s.min(index)));
        self.end = Some(self.end.map_or(index, |e| e.max(index)));
    }

    /// Widen the window by whole items on both sides, clamped to the axis.
    pub fn widen(&mut self, before: u32, after: u32) {
        if let Some(start) = self.start {
            self.start = Some(start.saturating_sub(before));
        }
        if let Some(end) = self.end {
            self.end = Some((end.saturating_add(after)).min(self.request.total_count.saturating_sub(1)));
        }
    }

    fn clamp(&mut self) {
        let last = self.request.total_count.saturating_sub(1);
        if self.request.total_count == 0 {
            self.start = None;
            self.end = None;
            return;
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            self.start = Some(start.min(last));
            self.end = Some(end.min(last).max(start.min(last)));
        }
    }

    /// Read the chosen window out of the calculator.
    pub fn window(&self) -> RenderWindow {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => RenderWindow {
                start: Some(start),
                end: Some(end),
                count: end - start + 1,
                start_position: self.position_at(start),
            },
            _ => RenderWindow::empty(),
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
    use test_case::test_case;

    fn uniform(size: f32) -> impl Fn(u32) -> Option<f32> {
        move |_| Some(size)
    }

    fn calc(
        viewport: f32,
        offset: f32,
        total: u32,
        size: f32,
        only_fully_visible: bool,
    ) -> RenderWindow {
        let mut calculator = AxisCalculator::new(
            AxisCalcRequest::new(viewport, offset, total)
                .with_default_size(size)
                .only_fully_visible(only_fully_visible),
        );
        calculator.calculate(&uniform(size), None)
    }

    #[test]
    fn uniform_items_fill_viewport_exactly() {
        // itemSize=20, viewportExtent=100, totalItems=50, scrollOffset=0
        let window = calc(100.0, 0.0, 50, 20.0, true);
        assert_eq!(window.start, Some(0));
        assert_eq!(window.end, Some(4));
        assert_eq!(window.count, 5);
        assert_eq!(window.start_position, Some(0.0));
    }

    #[test_case(0.0, 0, 4 ; "at origin")]
    #[test_case(20.0, 1, 5 ; "one item in")]
    #[test_case(200.0, 10, 14 ; "deep scroll")]
    fn visible_window_tracks_scroll(offset: f32, start: u32, end: u32) {
        let window = calc(100.0, offset, 50, 20.0, true);
        assert_eq!(window.start, Some(start));
        assert_eq!(window.end, Some(end));
        assert_eq!(window.count, 5);
    }

    #[test]
    fn buffered_window_includes_partial_items() {
        // Scrolled half an item in: the cut-off item at each edge is kept
        let window = calc(100.0, 30.0, 50, 20.0, false);
        assert_eq!(window.start, Some(1));
        assert_eq!(window.end, Some(6));
        assert_eq!(window.count, 6);
        assert_eq!(window.start_position, Some(20.0));

        // The visible flavor drops both partial items
        let visible = calc(100.0, 30.0, 50, 20.0, true);
        assert_eq!(visible.start, Some(2));
        assert_eq!(visible.end, Some(5));
        assert_eq!(visible.count, 4);
    }

    #[test]
    fn empty_axis_collapses_to_zero_count() {
        let window = calc(100.0, 0.0, 0, 20.0, false);
        assert_eq!(window.count, 0);
        assert_eq!(window.start, None);
        assert_eq!(window.end, None);
        assert_eq!(window.start_position, None);
    }

    #[test]
    fn viewport_larger_than_content_fills_from_end() {
        // 5 items of 20px inside a 200px viewport scrolled to 60: the forward
        // walk runs out of items, so the window re-anchors to cover all of them
        let window = calc(200.0, 60.0, 5, 20.0, true);
        assert_eq!(window.start, Some(0));
        assert_eq!(window.end, Some(4));
        assert_eq!(window.count, 5);
    }

    #[test]
    fn scrolled_past_end_reanchors_backward() {
        // Viewport holds 5 items but the offset points past the last one
        let window = calc(100.0, 950.0, 50, 20.0, true);
        assert_eq!(window.end, Some(49));
        assert_eq!(window.start, Some(45));
        assert_eq!(window.count, 5);
    }

    #[test]
    fn variable_sizes_use_lookup_with_default_fallback() {
        let size_of = |i: u32| if i % 2 == 0 { Some(40.0) } else { None };
        let mut calculator = AxisCalculator::new(
            AxisCalcRequest::new(100.0, 0.0, 10)
                .with_default_size(10.0)
                .only_fully_visible(true),
        );
        // 40 + 10 + 40 + 10 = 100: four items fit exactly
        let window = calculator.calculate(&size_of, None);
        assert_eq!(window.start, Some(0));
        assert_eq!(window.end, Some(3));
        assert_eq!(calculator.position_at(3), Some(90.0));
    }

    #[test]
    fn reserved_extent_shrinks_the_far_edge() {
        // A 10px scrollbar steals the last fully visible item
        let without = calc(100.0, 0.0, 50, 20.0, true);
        assert_eq!(without.count, 5);

        let mut calculator = AxisCalculator::new(
            AxisCalcRequest::new(100.0, 0.0, 50)
                .with_default_size(20.0)
                .only_fully_visible(true)
                .with_reserved_extent(10.0),
        );
        let window = calculator.calculate(&uniform(20.0), None);
        assert_eq!(window.count, 4);
    }

    #[test]
    fn override_hook_widens_the_window() {
        let mut calculator = AxisCalculator::new(
            AxisCalcRequest::new(100.0, 200.0, 50).with_default_size(20.0),
        );
        let window = calculator.calculate(&uniform(20.0), Some(&|calc: &mut AxisCalculator| {
            calc.widen(2, 2);
            calc.include(0);
        }));
        assert_eq!(window.start, Some(0));
        // walk end 14 (partial item at 300px edge), +2 widened
        assert_eq!(window.end, Some(16));
    }

    #[test]
    fn override_cannot_escape_the_axis() {
        let mut calculator =
            AxisCalculator::new(AxisCalcRequest::new(100.0, 0.0, 5).with_default_size(20.0));
        let window = calculator.calculate(&uniform(20.0), Some(&|calc: &mut AxisCalculator| {
            calc.widen(10, 10);
            calc.include(99);
        }));
        assert_eq!(window.start, Some(0));
        assert_eq!(window.end, Some(4));
    }

    #[test]
    fn lookup_sentinels() {
        let window = calc(100.0, 200.0, 50, 20.0, true);
        assert_eq!(window.start, Some(10));
        assert_eq!(window.lookup(3), WindowLookup::Before);
        assert_eq!(window.lookup(10), WindowLookup::Inside(0));
        assert_eq!(window.lookup(12), WindowLookup::Inside(2));
        assert_eq!(window.lookup(30), WindowLookup::After);
        assert!(window.contains(14));
        assert!(!window.contains(15));

        assert_eq!(RenderWindow::empty().lookup(0), WindowLookup::After);
    }
}
