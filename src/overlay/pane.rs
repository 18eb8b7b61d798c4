//! Overlay panes: cloned surfaces dedicated to frozen regions.
//!
//! Each pane knows whether the current settings require it at all, how its
//! clone is placed against the master's scroll container, and how to compute
//! scroll targets that bring a logical track fully into view.

use serde::Serialize;

use crate::error::{GridViewError, Result};
use crate::layout::RenderWindow;
use crate::overlay::surface::{Axis, Surface, SurfaceRect};
use crate::types::GridSettings;

/// The frozen region a pane mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Frozen top rows (and column headers).
    Top,
    /// Frozen left columns (and row headers).
    Left,
    /// Intersection of frozen top rows and frozen left columns.
    TopLeftCorner,
    /// Frozen bottom rows.
    Bottom,
    /// Intersection of frozen bottom rows and frozen left columns.
    BottomLeftCorner,
    /// Full-size mirror of the master, for diagnostics.
    Debug,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 6] = [
        OverlayKind::Top,
        OverlayKind::Left,
        OverlayKind::TopLeftCorner,
        OverlayKind::Bottom,
        OverlayKind::BottomLeftCorner,
        OverlayKind::Debug,
    ];

    /// Parse a host-supplied pane name. Unknown names are a hard failure:
    /// they indicate a programming error in the host, not a runtime
    /// condition.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "top" => Ok(OverlayKind::Top),
            "left" => Ok(OverlayKind::Left),
            "top_left_corner" => Ok(OverlayKind::TopLeftCorner),
            "bottom" => Ok(OverlayKind::Bottom),
            "bottom_left_corner" => Ok(OverlayKind::BottomLeftCorner),
            "debug" => Ok(OverlayKind::Debug),
            other => Err(GridViewError::UnknownOverlay(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OverlayKind::Top => "top",
            OverlayKind::Left => "left",
            OverlayKind::TopLeftCorner => "top_left_corner",
            OverlayKind::Bottom => "bottom",
            OverlayKind::BottomLeftCorner => "bottom_left_corner",
            OverlayKind::Debug => "debug",
        }
    }

    /// Whether this pane's scroll position mirrors the master on `axis`.
    /// Corner panes are fully pinned; the debug mirror follows both axes.
    pub fn mirrors(self, axis: Axis) -> bool {
        match self {
            OverlayKind::Top | OverlayKind::Bottom => axis == Axis::Horizontal,
            OverlayKind::Left => axis == Axis::Vertical,
            OverlayKind::TopLeftCorner | OverlayKind::BottomLeftCorner => false,
            OverlayKind::Debug => true,
        }
    }
}

/// How the master surface is scrolled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEnvironment {
    /// The page viewport itself scrolls the grid; clones are repositioned
    /// with absolute, scroll-independent offsets whenever the content's
    /// bounding box moves.
    Window,
    /// The master scrolls inside its own bounded container; clones track the
    /// container's scroll offset directly.
    Container,
}

/// Geometry of the master surface a pane positions itself against.
#[derive(Debug, Clone, Copy)]
pub struct MasterFrame {
    pub environment: ScrollEnvironment,
    /// Content origin relative to the scroll viewport; negative when the
    /// grid's edge has been scrolled past (window environment only).
    pub origin_x: f32,
    pub origin_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

/// Pixel spans of the frozen regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenSpans {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
}

/// Inputs for a scroll-target computation on one axis.
#[derive(Debug, Clone, Copy)]
pub struct ScrollToRequest {
    pub axis: Axis,
    /// Leading-edge offset of the target track.
    pub item_position: f32,
    pub item_size: f32,
    /// Span of the frozen region on this axis (obscures the near edge).
    pub frozen_span: f32,
    /// Align the track's far edge with the viewport's far edge instead of
    /// its near edge with the frozen boundary.
    pub align_far_edge: bool,
}

/// JSON-friendly snapshot of a pane, for the debug overlay and CLI.
#[derive(Debug, Clone, Serialize)]
pub struct PaneDescriptor {
    pub kind: &'static str,
    pub needed: bool,
    pub rows: RenderWindow,
    pub cols: RenderWindow,
}

/// A secondary rendering surface cloned from the master for one frozen
/// region.
#[derive(Debug, Clone)]
pub struct OverlayPane {
    pub kind: OverlayKind,
    needed: bool,
    /// Row window this pane materializes.
    pub rows: RenderWindow,
    /// Column window this pane materializes.
    pub cols: RenderWindow,
}

impl OverlayPane {
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            needed: false,
            rows: RenderWindow::empty(),
            cols: RenderWindow::empty(),
        }
    }

    /// Whether the clone surface currently has to exist at all.
    pub fn needed(&self) -> bool {
        self.needed
    }

    /// Re-evaluate `needed` from a settings snapshot. Returns true when the
    /// value changed (the host must then create or drop the clone surface).
    pub fn refresh_needed(&mut self, settings: &GridSettings) -> bool {
        let needed = Self::compute_needed(self.kind, settings);
        let changed = needed != self.needed;
        self.needed = needed;
        changed
    }

    fn compute_needed(kind: OverlayKind, settings: &GridSettings) -> bool {
        let top = settings.fixed_rows_top > 0 || settings.has_column_headers();
        let left = settings.fixed_columns_left > 0 || settings.has_row_headers();
        let bottom = settings.fixed_rows_bottom > 0;
        match kind {
            OverlayKind::Top => top,
            OverlayKind::Left => left,
            OverlayKind::TopLeftCorner => top && left,
            OverlayKind::Bottom => bottom,
            OverlayKind::BottomLeftCorner => bottom && left,
            OverlayKind::Debug => settings.debug_overlay,
        }
    }

    pub fn descriptor(&self) -> PaneDescriptor {
        PaneDescriptor {
            kind: self.kind.name(),
            needed: self.needed,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Compute the clone's footprint against the master.
    ///
    /// In a bounded container the clone is re-pinned to the container's
    /// visible origin by tracking the scroll offset; in the window
    /// environment the clone sticks at the window edge once the content's
    /// bounding box moves past it, clamped so it never leaves the content.
    pub fn placement(&self, frame: &MasterFrame, spans: &FrozenSpans) -> SurfaceRect {
        let span_width = frame.viewport_width.min(frame.content_width);
        let span_height = frame.viewport_height.min(frame.content_height);

        let (width, height) = match self.kind {
            OverlayKind::Top | OverlayKind::Bottom => (span_width, self.frozen_extent(spans)),
            OverlayKind::Left => (spans.left, span_height),
            OverlayKind::TopLeftCorner => (spans.left, spans.top),
            OverlayKind::BottomLeftCorner => (spans.left, spans.bottom),
            OverlayKind::Debug => (span_width, span_height),
        };

        let (pin_x, pin_y) = match frame.environment {
            ScrollEnvironment::Container => (frame.scroll_x, frame.scroll_y),
            ScrollEnvironment::Window => (
                (-frame.origin_x).clamp(0.0, (frame.content_width - width).max(0.0)),
                (-frame.origin_y).clamp(0.0, (frame.content_height - height).max(0.0)),
            ),
        };

        let (left, top) = match self.kind {
            OverlayKind::Top => (0.0, pin_y),
            OverlayKind::Left => (pin_x, 0.0),
            OverlayKind::TopLeftCorner => (pin_x, pin_y),
            OverlayKind::Bottom => (0.0, pin_y + span_height - spans.bottom),
            OverlayKind::BottomLeftCorner => (pin_x, pin_y + span_height - spans.bottom),
            OverlayKind::Debug => (pin_x, pin_y),
        };

        SurfaceRect {
            left,
            top,
            width,
            height,
        }
    }

    fn frozen_extent(&self, spans: &FrozenSpans) -> f32 {
        match self.kind {
            OverlayKind::Top | OverlayKind::TopLeftCorner => spans.top,
            OverlayKind::Bottom | OverlayKind::BottomLeftCorner => spans.bottom,
            _ => 0.0,
        }
    }

    /// Scroll position that brings the requested track fully into view on
    /// the master, compensating for a scrollbar's thickness only when one is
    /// actually present. `dry_run` computes without applying.
    pub fn scroll_to(
        &self,
        request: &ScrollToRequest,
        master: &mut dyn Surface,
        dry_run: bool,
    ) -> f32 {
        let compensation = if master.has_scrollbar(request.axis.cross()) {
            master.scrollbar_thickness()
        } else {
            0.0
        };

        let target = if request.align_far_edge {
            request.item_position + request.item_size - master.viewport_extent(request.axis)
                + compensation
        } else {
            request.item_position - request.frozen_span
        };
        let target = target.max(0.0);

        if !dry_run {
            master.set_scroll_position(request.axis, target);
        }
        target
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
    use test_case::test_case;

    fn settings(top: u32, bottom: u32, left: u32) -> GridSettings {
        GridSettings {
            fixed_rows_top: top,
            fixed_rows_bottom: bottom,
            fixed_columns_left: left,
            ..GridSettings::default()
        }
    }

    #[test]
    fn parse_round_trips_known_kinds() {
        for kind in OverlayKind::ALL {
            assert_eq!(OverlayKind::parse(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = OverlayKind::parse("diagonal").unwrap_err();
        assert!(matches!(err, GridViewError::UnknownOverlay(name) if name == "diagonal"));
    }

    #[test_case(OverlayKind::Top, 1, 0, 0, true ; "top with frozen rows")]
    #[test_case(OverlayKind::Top, 0, 0, 1, false ; "top without frozen rows")]
    #[test_case(OverlayKind::Left, 0, 0, 2, true ; "left with frozen cols")]
    #[test_case(OverlayKind::TopLeftCorner, 1, 0, 1, true ; "corner needs both")]
    #[test_case(OverlayKind::TopLeftCorner, 1, 0, 0, false ; "corner missing left")]
    #[test_case(OverlayKind::Bottom, 0, 2, 0, true ; "bottom with frozen rows")]
    #[test_case(OverlayKind::BottomLeftCorner, 0, 2, 1, true ; "bottom corner")]
    #[test_case(OverlayKind::Debug, 3, 3, 3, false ; "debug off by default")]
    fn needed_follows_settings(kind: OverlayKind, top: u32, bottom: u32, left: u32, expected: bool) {
        let mut pane = OverlayPane::new(kind);
        pane.refresh_needed(&settings(top, bottom, left));
        assert_eq!(pane.needed(), expected);
    }

    #[test]
    fn headers_alone_require_the_panes() {
        let mut config = GridSettings::default();
        config.column_header_count = 1;
        config.row_header_count = 1;

        let mut top = OverlayPane::new(OverlayKind::Top);
        let mut left = OverlayPane::new(OverlayKind::Left);
        let mut corner = OverlayPane::new(OverlayKind::TopLeftCorner);
        assert!(top.refresh_needed(&config));
        assert!(left.refresh_needed(&config));
        assert!(corner.refresh_needed(&config));
        assert!(top.needed() && left.needed() && corner.needed());
    }

    #[test]
    fn refresh_needed_reports_changes_only() {
        let mut pane = OverlayPane::new(OverlayKind::Top);
        assert!(pane.refresh_needed(&settings(2, 0, 0)));
        assert!(!pane.refresh_needed(&settings(3, 0, 0)));
        assert!(pane.refresh_needed(&settings(0, 0, 0)));
        assert!(!pane.needed());
    }

    #[test]
    fn container_placement_tracks_scroll_offset() {
        let frame = MasterFrame {
            environment: ScrollEnvironment::Container,
            origin_x: 0.0,
            origin_y: 0.0,
            viewport_width: 400.0,
            viewport_height: 300.0,
            content_width: 2000.0,
            content_height: 5000.0,
            scroll_x: 120.0,
            scroll_y: 800.0,
        };
        let spans = FrozenSpans {
            top: 48.0,
            left: 64.0,
            bottom: 0.0,
        };

        let top = OverlayPane::new(OverlayKind::Top).placement(&frame, &spans);
        assert_eq!(top.top, 800.0);
        assert_eq!(top.left, 0.0);
        assert_eq!(top.height, 48.0);
        assert_eq!(top.width, 400.0);

        let left = OverlayPane::new(OverlayKind::Left).placement(&frame, &spans);
        assert_eq!(left.left, 120.0);
        assert_eq!(left.top, 0.0);
        assert_eq!(left.width, 64.0);
        assert_eq!(left.height, 300.0);

        let corner = OverlayPane::new(OverlayKind::TopLeftCorner).placement(&frame, &spans);
        assert_eq!((corner.left, corner.top), (120.0, 800.0));
        assert_eq!((corner.width, corner.height), (64.0, 48.0));
    }

    #[test]
    fn window_placement_sticks_at_the_window_edge() {
        let mut frame = MasterFrame {
            environment: ScrollEnvironment::Window,
            origin_x: 0.0,
            origin_y: -250.0,
            viewport_width: 400.0,
            viewport_height: 300.0,
            content_width: 2000.0,
            content_height: 5000.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        };
        let spans = FrozenSpans {
            top: 48.0,
            left: 0.0,
            bottom: 0.0,
        };

        // Grid top edge is 250px above the window: the clone pins at 250
        let top = OverlayPane::new(OverlayKind::Top).placement(&frame, &spans);
        assert_eq!(top.top, 250.0);

        // Grid fully below the window origin: clone rests at the content top
        frame.origin_y = 40.0;
        let top = OverlayPane::new(OverlayKind::Top).placement(&frame, &spans);
        assert_eq!(top.top, 0.0);

        // Never pinned past the end of the content
        frame.origin_y = -20_000.0;
        let top = OverlayPane::new(OverlayKind::Top).placement(&frame, &spans);
        assert_eq!(top.top, 5000.0 - 48.0);
    }

    #[test]
    fn bottom_placement_hugs_the_viewport_bottom() {
        let frame = MasterFrame {
            environment: ScrollEnvironment::Container,
            origin_x: 0.0,
            origin_y: 0.0,
            viewport_width: 400.0,
            viewport_height: 300.0,
            content_width: 2000.0,
            content_height: 5000.0,
            scroll_x: 0.0,
            scroll_y: 600.0,
        };
        let spans = FrozenSpans {
            top: 0.0,
            left: 0.0,
            bottom: 40.0,
        };
        let bottom = OverlayPane::new(OverlayKind::Bottom).placement(&frame, &spans);
        assert_eq!(bottom.top, 600.0 + 300.0 - 40.0);
        assert_eq!(bottom.height, 40.0);
    }

    #[test]
    fn scroll_to_near_edge_accounts_for_frozen_span() {
        let mut master = MockSurface::new(400.0, 300.0).with_content(400.0, 4000.0);
        let pane = OverlayPane::new(OverlayKind::Top);
        let request = ScrollToRequest {
            axis: Axis::Vertical,
            item_position: 500.0,
            item_size: 24.0,
            frozen_span: 48.0,
            align_far_edge: false,
        };
        let target = pane.scroll_to(&request, &mut master, false);
        assert_eq!(target, 452.0);
        assert_eq!(master.scroll_position(Axis::Vertical), 452.0);
    }

    #[test]
    fn scroll_to_far_edge_compensates_for_present_scrollbar() {
        // Horizontal content overflows, so a horizontal scrollbar eats into
        // the vertical viewport.
        let mut master = MockSurface::new(400.0, 300.0)
            .with_content(2000.0, 4000.0)
            .with_scrollbar_thickness(12.0);
        let pane = OverlayPane::new(OverlayKind::Top);
        let request = ScrollToRequest {
            axis: Axis::Vertical,
            item_position: 500.0,
            item_size: 24.0,
            frozen_span: 0.0,
            align_far_edge: true,
        };
        let target = pane.scroll_to(&request, &mut master, true);
        assert_eq!(target, 500.0 + 24.0 - 300.0 + 12.0);
        // Dry run leaves the surface untouched
        assert_eq!(master.scroll_position(Axis::Vertical), 0.0);
        assert_eq!(master.set_calls, 0);
    }

    #[test]
    fn scroll_to_skips_compensation_without_scrollbar() {
        let mut master = MockSurface::new(400.0, 300.0).with_content(400.0, 4000.0);
        let pane = OverlayPane::new(OverlayKind::Top);
        let request = ScrollToRequest {
            axis: Axis::Vertical,
            item_position: 500.0,
            item_size: 24.0,
            frozen_span: 0.0,
            align_far_edge: true,
        };
        assert_eq!(pane.scroll_to(&request, &mut master, true), 224.0);
    }

    #[test]
    fn scroll_to_clamps_at_origin() {
        let mut master = MockSurface::new(400.0, 300.0).with_content(400.0, 4000.0);
        let pane = OverlayPane::new(OverlayKind::Top);
        let request = ScrollToRequest {
            axis: Axis::Vertical,
            item_position: 10.0,
            item_size: 24.0,
            frozen_span: 48.0,
            align_far_edge: false,
        };
        assert_eq!(pane.scroll_to(&request, &mut master, true), 0.0);
    }
}
