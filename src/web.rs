//! Browser bindings
//!
//! `WebHost` drives an `Animator` from `requestAnimationFrame` and the window
//! `resize` event; `ParticleBackdrop` is the handle JavaScript holds.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, Window};

use crate::animator::Animator;
use crate::consts::CANVAS_OPACITY;
use crate::platform::{FrameId, Host, ListenerId, Storage, Viewport};
use crate::renderer::CanvasSurface;

/// Window-backed host. Callbacks are created once and re-registered as needed.
pub struct WebHost {
    window: Window,
    on_frame: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut(Event)>,
}

impl Host for WebHost {
    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(
            dim(self.window.inner_width()) as u32,
            dim(self.window.inner_height()) as u32,
        )
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let _ = self.window.cancel_animation_frame(id);
    }

    fn watch_resize(&mut self) -> Option<ListenerId> {
        self.window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok()
            .map(|_| ListenerId(0))
    }

    fn unwatch_resize(&mut self, _id: ListenerId) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
    }
}

/// LocalStorage, silently absent in private modes that block it
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.inner {
            let _ = storage.set_item(key, value);
        }
    }
}

struct Mounted {
    animator: Animator<CanvasSurface>,
    host: WebHost,
}

type Slot = Rc<RefCell<Option<Mounted>>>;

/// A particle backdrop mounted on a canvas. Dropping it (or `free()` from JS) unmounts.
#[wasm_bindgen]
pub struct ParticleBackdrop {
    slot: Slot,
}

#[wasm_bindgen]
impl ParticleBackdrop {
    /// Mount on the canvas with the given id. Missing canvas or 2D context gives an
    /// inert handle rather than an error.
    pub fn mount(canvas_id: &str) -> ParticleBackdrop {
        let slot: Slot = Rc::new(RefCell::new(None));
        let mounted = Self::try_mount(canvas_id, Rc::downgrade(&slot));
        *slot.borrow_mut() = mounted;
        ParticleBackdrop { slot }
    }

    pub fn is_mounted(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn start(&self) {
        if let Some(Mounted { animator, host }) = self.slot.borrow_mut().as_mut() {
            animator.start(host);
        }
    }

    pub fn stop(&self) {
        if let Some(Mounted { animator, host }) = self.slot.borrow_mut().as_mut() {
            animator.stop(host);
        }
    }

    /// Cancel the frame loop and resize listener. Idempotent.
    pub fn unmount(&self) {
        let mounted = self.slot.borrow_mut().take();
        if let Some(Mounted { animator, mut host }) = mounted {
            animator.unmount(&mut host);
        }
    }
}

impl ParticleBackdrop {
    fn try_mount(canvas_id: &str, weak: Weak<RefCell<Option<Mounted>>>) -> Option<Mounted> {
        let window = web_sys::window()?;
        let canvas: HtmlCanvasElement = window
            .document()?
            .get_element_by_id(canvas_id)?
            .dyn_into()
            .ok()?;

        // Behind page content, never intercepting input
        let style = canvas.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("inset", "0");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("opacity", &CANVAS_OPACITY.to_string());

        let frame_slot = weak.clone();
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            let Some(slot) = frame_slot.upgrade() else { return };
            if let Some(Mounted { animator, host }) = slot.borrow_mut().as_mut() {
                animator.on_frame(host);
            }
        });

        let on_resize = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Some(slot) = weak.upgrade() else { return };
            if let Some(Mounted { animator, host }) = slot.borrow_mut().as_mut() {
                animator.on_resize(&*host);
            }
        });

        let mut host = WebHost {
            window,
            on_frame,
            on_resize,
        };
        let seed = js_sys::Date::now() as u64;
        let animator = Animator::mount(&mut host, CanvasSurface::acquire(canvas), seed)?;
        Some(Mounted { animator, host })
    }
}

impl Drop for ParticleBackdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}
