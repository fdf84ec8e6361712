//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Viewport size and resize notification
//! - The drawing surface
//! - Storage (LocalStorage on web)
//! - Page hide/show transitions (back/forward cache)
//!
//! `headless` holds in-memory implementations used by tests and the native binary.

pub mod headless;

pub use headless::{HeadlessHost, MemoryStorage, RecordingSurface};

use glam::Vec2;

use crate::sim::Frame;

/// Handle for a scheduled frame callback
pub type FrameId = i32;

/// Handle for a registered resize listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(pub u32);

/// Pixel dimensions of the viewport or a surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The environment that drives the animation: a per-frame scheduler and a resize source.
///
/// The host calls back into the owner when a requested frame fires or the viewport
/// changes; these methods only register and release those callbacks.
pub trait Host {
    /// Current inner size of the window
    fn viewport(&self) -> Viewport;

    /// Schedule one callback for the next display refresh
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Drop a scheduled callback before it fires
    fn cancel_frame(&mut self, id: FrameId);

    /// Start delivering viewport resize notifications
    fn watch_resize(&mut self) -> Option<ListenerId>;

    fn unwatch_resize(&mut self, id: ListenerId);
}

/// A 2D drawing surface
pub trait Surface {
    fn size(&self) -> Viewport;

    /// Resizing a surface clears it
    fn set_size(&mut self, size: Viewport);

    /// Paint one frame of draw commands
    fn present(&mut self, frame: &Frame);
}

/// String key/value storage
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// What to do with a mounted backdrop on a page transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Page went into the back/forward cache: stop, keep everything mounted
    Suspend,
    /// Page is being discarded: release the host callbacks
    Unmount,
    /// Page came back from the back/forward cache: start again (or remount)
    Resume,
    /// First load; the backdrop is mounted by startup code
    Ignore,
}

impl PageAction {
    /// `pagehide` with the event's `persisted` flag
    pub fn on_hide(persisted: bool) -> Self {
        if persisted { Self::Suspend } else { Self::Unmount }
    }

    /// `pageshow` with the event's `persisted` flag
    pub fn on_show(persisted: bool) -> Self {
        if persisted { Self::Resume } else { Self::Ignore }
    }
}
