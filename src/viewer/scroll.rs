//! Deferred-timer logic for `GridView`.
//!
//! Two timers exist, both clear-and-replace (never left to race): the scroll
//! settle timeout that schedules a final full-quality draw once scrolling
//! stops, and the drag-growth timer that keeps scrolling while a selection
//! drag is held past the viewport's bottom edge.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::{now_ms, GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::coords::GridCoord;

/// Delay (ms) after scroll stops before triggering a settle render.
#[cfg(target_arch = "wasm32")]
const SCROLL_SETTLE_DELAY_MS: u32 = 100;

/// Interval (ms) between drag-growth steps while the pointer is held past
/// the viewport edge.
#[cfg(target_arch = "wasm32")]
const DRAG_GROW_INTERVAL_MS: u32 = 50;

#[cfg(target_arch = "wasm32")]
impl GridView {
    pub(crate) fn invoke_render_callback(callback: Option<js_sys::Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }

    pub(crate) fn schedule_scroll_settle_timeout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        // Cancel any existing timer
        if let Some(timer_id) = s.scroll_settle_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.scroll_settle_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridView::handle_scroll_settle(&state);
                }
            }) as Box<dyn FnMut()>);
            s.scroll_settle_closure = Some(closure);
        }
        let Some(callback) = s.scroll_settle_closure.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            SCROLL_SETTLE_DELAY_MS as i32,
        ) {
            Ok(id) => s.scroll_settle_timer = Some(id),
            Err(_) => s.scroll_settle_timer = None,
        }
    }

    pub(crate) fn handle_scroll_settle(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            s.scroll_settle_timer = None;
            // Check if scroll is still ongoing
            let elapsed = now_ms() - s.last_scroll_ms;
            if elapsed < f64::from(SCROLL_SETTLE_DELAY_MS) {
                // Still scrolling, reschedule
                drop(s);
                Self::schedule_scroll_settle_timeout(state);
                return;
            }
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    /// Arm (or re-arm) the drag-growth timer. Each firing scrolls one row
    /// further and extends the active selection to the new bottom row.
    pub(crate) fn schedule_drag_grow(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.drag_grow_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.drag_grow_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridView::handle_drag_grow(&state);
                }
            }) as Box<dyn FnMut()>);
            s.drag_grow_closure = Some(closure);
        }
        let Some(callback) = s.drag_grow_closure.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            DRAG_GROW_INTERVAL_MS as i32,
        ) {
            Ok(id) => s.drag_grow_timer = Some(id),
            Err(_) => s.drag_grow_timer = None,
        }
    }

    pub(crate) fn clear_drag_grow(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.drag_grow_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
    }

    fn handle_drag_grow(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            s.drag_grow_timer = None;
            if !s.is_selecting {
                return;
            }
            let step = s.settings.default_row_height;
            if s.wheel(0.0, step).is_some() {
                // Extend the selection to the row now at the bottom edge
                let bottom = s.viewport.height - 1.0;
                let right = s.viewport.width - 1.0;
                if let Some(coord) = s.cell_at(right, bottom) {
                    let current_col = s
                        .selection
                        .current()
                        .map_or(coord.col, |range| range.to.col);
                    s.selection.update(GridCoord::new(coord.row, current_col));
                }
                s.needs_render = true;
            }
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
        // Keep growing until the pointer lifts
        Self::schedule_drag_grow(state);
    }
}
