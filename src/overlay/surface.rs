//! Scroll-surface abstraction.
//!
//! The synchronizer never talks to the DOM directly; it drives surfaces
//! through this trait. The wasm build wires real scroll containers (see
//! `crate::viewer`), native builds and tests use [`MockSurface`]. This is the
//! pluggable scroll-delivery seam: window-scrolled hosts, container-scrolled
//! hosts, and headless hosts are just different implementations.

/// One scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The crossing axis (whose scrollbar consumes extent on `self`).
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Placement of a surface element within the master's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// A scrollable rendering surface owned by the host.
pub trait Surface {
    /// Current scroll offset on an axis.
    fn scroll_position(&self, axis: Axis) -> f32;

    /// Programmatically set the scroll offset. On DOM surfaces this fires a
    /// scroll event on the next tick; the synchronizer pre-arms an echo
    /// counter before calling this.
    fn set_scroll_position(&mut self, axis: Axis, position: f32);

    /// Extent of the surface's viewport on an axis.
    fn viewport_extent(&self, axis: Axis) -> f32;

    /// Extent of the scrollable content on an axis.
    fn content_extent(&self, axis: Axis) -> f32;

    /// Whether a scrollbar for the axis is actually shown.
    fn has_scrollbar(&self, axis: Axis) -> bool;

    /// Thickness of a shown scrollbar, in logical pixels.
    fn scrollbar_thickness(&self) -> f32 {
        0.0
    }

    /// False once the host removed the surface's container from the render
    /// tree; the synchronizer treats this as a teardown trigger.
    fn is_attached(&self) -> bool;

    /// Move/resize the surface element.
    fn set_placement(&mut self, rect: SurfaceRect);
}

/// In-memory surface for native builds and tests.
#[derive(Debug, Clone)]
pub struct MockSurface {
    scroll: [f32; 2],
    viewport: [f32; 2],
    content: [f32; 2],
    scrollbar_thickness: f32,
    attached: bool,
    placement: SurfaceRect,
    /// Number of programmatic scroll sets received; used by tests to assert
    /// echo suppression.
    pub set_calls: u32,
}

impl MockSurface {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            scroll: [0.0, 0.0],
            viewport: [viewport_width, viewport_height],
            content: [viewport_width, viewport_height],
            scrollbar_thickness: 0.0,
            attached: true,
            placement: SurfaceRect::default(),
            set_calls: 0,
        }
    }

    pub fn with_content(mut self, width: f32, height: f32) -> Self {
        self.content = [width, height];
        self
    }

    pub fn with_scrollbar_thickness(mut self, thickness: f32) -> Self {
        self.scrollbar_thickness = thickness;
        self
    }

    /// Simulate the host removing the container from the render tree.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn placement(&self) -> SurfaceRect {
        self.placement
    }

    fn axis_index(axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }
}

impl Surface for MockSurface {
    fn scroll_position(&self, axis: Axis) -> f32 {
        self.scroll
            .get(Self::axis_index(axis))
            .copied()
            .unwrap_or(0.0)
    }

    fn set_scroll_position(&mut self, axis: Axis, position: f32) {
        if let Some(slot) = self.scroll.get_mut(Self::axis_index(axis)) {
            *slot = position;
        }
        self.set_calls += 1;
    }

    fn viewport_extent(&self, axis: Axis) -> f32 {
        self.viewport
            .get(Self::axis_index(axis))
            .copied()
            .unwrap_or(0.0)
    }

    fn content_extent(&self, axis: Axis) -> f32 {
        self.content
            .get(Self::axis_index(axis))
            .copied()
            .unwrap_or(0.0)
    }

    fn has_scrollbar(&self, axis: Axis) -> bool {
        self.scrollbar_thickness > 0.0 && self.content_extent(axis) > self.viewport_extent(axis)
    }

    fn scrollbar_thickness(&self) -> f32 {
        self.scrollbar_thickness
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_placement(&mut self, rect: SurfaceRect) {
        self.placement = rect;
    }
}
