//! DOM wiring for `GridView`: surfaces, containers, and event listeners.
//!
//! Everything here is wasm32-only. The scroll container is the master
//! surface; pane surfaces are absolutely positioned children that the
//! synchronizer drives. Listeners feed raw DOM events into the shared state
//! and poke the host's render callback.

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

#[cfg(target_arch = "wasm32")]
use super::{now_ms, GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::overlay::{Axis, OverlayKind, Surface, SurfaceRect, MASTER};

/// A scroll container in the DOM acting as a [`Surface`].
#[cfg(target_arch = "wasm32")]
pub(crate) struct DomSurface {
    element: HtmlDivElement,
}

#[cfg(target_arch = "wasm32")]
impl DomSurface {
    pub(crate) fn new(element: HtmlDivElement) -> Self {
        Self { element }
    }
}

#[cfg(target_arch = "wasm32")]
impl Surface for DomSurface {
    fn scroll_position(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.element.scroll_left() as f32,
            Axis::Vertical => self.element.scroll_top() as f32,
        }
    }

    // Scroll offsets are whole CSS pixels; the f32->i32 cast matches what
    // the DOM stores.
    #[allow(clippy::cast_possible_truncation)]
    fn set_scroll_position(&mut self, axis: Axis, position: f32) {
        match axis {
            Axis::Horizontal => self.element.set_scroll_left(position as i32),
            Axis::Vertical => self.element.set_scroll_top(position as i32),
        }
    }

    fn viewport_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.element.client_width() as f32,
            Axis::Vertical => self.element.client_height() as f32,
        }
    }

    fn content_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.element.scroll_width() as f32,
            Axis::Vertical => self.element.scroll_height() as f32,
        }
    }

    fn has_scrollbar(&self, axis: Axis) -> bool {
        self.content_extent(axis) > self.viewport_extent(axis)
    }

    fn scrollbar_thickness(&self) -> f32 {
        let vertical = (self.element.offset_width() - self.element.client_width()).max(0);
        let horizontal = (self.element.offset_height() - self.element.client_height()).max(0);
        vertical.max(horizontal) as f32
    }

    fn is_attached(&self) -> bool {
        self.element.is_connected()
    }

    fn set_placement(&mut self, rect: SurfaceRect) {
        let style = self.element.style();
        let _ = style.set_property("left", &format!("{}px", rect.left));
        let _ = style.set_property("top", &format!("{}px", rect.top));
        let _ = style.set_property("width", &format!("{}px", rect.width));
        let _ = style.set_property("height", &format!("{}px", rect.height));
    }
}

/// Build the scroll container plus its content-sized spacer inside `parent`.
#[cfg(target_arch = "wasm32")]
pub(crate) fn build_scroll_dom(
    parent: &HtmlElement,
    width: f32,
    height: f32,
) -> Option<(HtmlDivElement, HtmlDivElement)> {
    let document = web_sys::window()?.document()?;
    let create_div = || -> Option<HtmlDivElement> {
        document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())
    };

    let scroll_container = create_div()?;
    let spacer = create_div()?;

    // Ensure parent has position for absolute children
    let parent_style = parent.style();
    if parent_style
        .get_property_value("position")
        .unwrap_or_default()
        .is_empty()
    {
        let _ = parent_style.set_property("position", "relative");
    }

    let container_style = scroll_container.style();
    let _ = container_style.set_property("position", "relative");
    let _ = container_style.set_property("overflow", "auto");
    let _ = container_style.set_property("width", &format!("{width}px"));
    let _ = container_style.set_property("height", &format!("{height}px"));
    // Mark so JS can find the scroll container for viewport sizing
    let _ = scroll_container.set_attribute("data-gridview-scroll", "");

    // Spacer: sized to content to create the scroll area.
    let spacer_style = spacer.style();
    let _ = spacer_style.set_property("position", "absolute");
    let _ = spacer_style.set_property("top", "0");
    let _ = spacer_style.set_property("left", "0");
    let _ = spacer_style.set_property("width", "0px");
    let _ = spacer_style.set_property("height", "0px");

    let _ = scroll_container.append_child(&spacer);
    let _ = parent.append_child(&scroll_container);

    Some((scroll_container, spacer))
}

/// Build the clone element for an overlay pane inside the scroll container.
#[cfg(target_arch = "wasm32")]
pub(crate) fn build_pane_surface(
    container: &HtmlDivElement,
    kind: OverlayKind,
) -> Option<DomSurface> {
    let document = web_sys::window()?.document()?;
    let element = document
        .create_element("div")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())?;

    let style = element.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("overflow", "hidden");
    let _ = style.set_property("z-index", "2");
    // Promote to own compositor layer so repositioning during scroll is cheap
    let _ = style.set_property("will-change", "transform");
    let _ = element.set_attribute("data-gridview-pane", kind.name());

    let _ = container.append_child(&element);
    Some(DomSurface::new(element))
}

/// Scroll events on the master container: feed the synchronizer, stamp the
/// settle clock, and poke the render callback.
#[cfg(target_arch = "wasm32")]
pub(crate) fn attach_scroll_listener(
    container: &HtmlDivElement,
    state: &Rc<RefCell<SharedState>>,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let state_clone = Rc::clone(state);
    let container_clone = container.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let callback = {
            let mut s = state_clone.borrow_mut();
            s.last_scroll_ms = now_ms();
            let x = container_clone.scroll_left() as f32;
            let y = container_clone.scroll_top() as f32;
            let _ = s.scroll_event(MASTER, Axis::Horizontal, x);
            let _ = s.scroll_event(MASTER, Axis::Vertical, y);
            s.render_callback.clone()
        };
        GridView::schedule_scroll_settle_timeout(&state_clone);
        GridView::invoke_render_callback(callback);
    }) as Box<dyn FnMut(web_sys::Event)>);

    let _ = container.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure
}

/// Wheel events anywhere over the grid (master or a frozen pane) are routed
/// into the master's scroll position.
#[cfg(target_arch = "wasm32")]
pub(crate) fn attach_wheel_listener(
    container: &HtmlDivElement,
    state: &Rc<RefCell<SharedState>>,
) -> Closure<dyn FnMut(WheelEvent)> {
    let state_clone = Rc::clone(state);
    let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
        let callback = {
            let mut s = state_clone.borrow_mut();
            let moved = s.wheel(event.delta_x() as f32, event.delta_y() as f32);
            if moved.is_some() {
                event.prevent_default();
            }
            s.render_callback.clone()
        };
        GridView::invoke_render_callback(callback);
    }) as Box<dyn FnMut(WheelEvent)>);

    let _ = container.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure
}

/// Selection gestures: mousedown anchors, mousemove extends (and keeps the
/// drag-growth timer armed past the bottom edge), mouseup finishes.
#[cfg(target_arch = "wasm32")]
pub(crate) fn attach_mouse_listeners(
    container: &HtmlDivElement,
    state: &Rc<RefCell<SharedState>>,
) -> Vec<Closure<dyn FnMut(MouseEvent)>> {
    let mut closures = Vec::new();

    let state_down = Rc::clone(state);
    let down = Closure::wrap(Box::new(move |event: MouseEvent| {
        let callback = {
            let mut s = state_down.borrow_mut();
            let x = event.offset_x() as f32;
            let y = event.offset_y() as f32;
            if let Some(coord) = s.cell_at(x, y) {
                s.selection
                    .begin(coord, event.ctrl_key() || event.meta_key());
                s.is_selecting = true;
                s.needs_render = true;
            }
            s.render_callback.clone()
        };
        GridView::invoke_render_callback(callback);
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = container.add_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref());
    closures.push(down);

    let state_move = Rc::clone(state);
    let state_move_timer = Rc::clone(state);
    let mv = Closure::wrap(Box::new(move |event: MouseEvent| {
        let (callback, past_bottom) = {
            let mut s = state_move.borrow_mut();
            if !s.is_selecting {
                return;
            }
            let x = event.offset_x() as f32;
            let y = event.offset_y() as f32;
            if let Some(coord) = s.cell_at(x, y) {
                s.selection.update(coord);
                s.needs_render = true;
            }
            (s.render_callback.clone(), y > s.viewport.height)
        };
        if past_bottom {
            GridView::schedule_drag_grow(&state_move_timer);
        } else {
            GridView::clear_drag_grow(&state_move_timer);
        }
        GridView::invoke_render_callback(callback);
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = container.add_event_listener_with_callback("mousemove", mv.as_ref().unchecked_ref());
    closures.push(mv);

    let state_up = Rc::clone(state);
    let up = Closure::wrap(Box::new(move |_event: MouseEvent| {
        {
            let mut s = state_up.borrow_mut();
            s.is_selecting = false;
        }
        GridView::clear_drag_grow(&state_up);
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = container.add_event_listener_with_callback("mouseup", up.as_ref().unchecked_ref());
    closures.push(up);

    closures
}
