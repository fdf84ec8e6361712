//! In-memory host, surface and storage

use std::collections::HashMap;

use super::{FrameId, Host, ListenerId, Storage, Surface, Viewport};
use crate::sim::Frame;

/// A host with no display: frames fire only when the caller says so
#[derive(Debug, Default)]
pub struct HeadlessHost {
    viewport: Viewport,
    pending: Vec<FrameId>,
    listeners: Vec<ListenerId>,
    next_frame_id: FrameId,
    next_listener_id: u32,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Scheduled frame callbacks not yet fired or cancelled
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Registered resize listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Fire the oldest scheduled frame. Returns `None` when nothing is scheduled,
    /// in which case the owner must not be ticked.
    pub fn fire_frame(&mut self) -> Option<FrameId> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Change the viewport. Returns true if a listener would have been notified.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        !self.listeners.is_empty()
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        self.next_frame_id += 1;
        self.pending.push(self.next_frame_id);
        Some(self.next_frame_id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|&f| f != id);
    }

    fn watch_resize(&mut self) -> Option<ListenerId> {
        self.next_listener_id += 1;
        let id = ListenerId(self.next_listener_id);
        self.listeners.push(id);
        Some(id)
    }

    fn unwatch_resize(&mut self, id: ListenerId) {
        self.listeners.retain(|&l| l != id);
    }
}

/// A surface that keeps the last presented frame instead of pixels
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Viewport,
    /// Frames presented so far
    pub presented: u64,
    /// Times the surface was resized (and so cleared)
    pub resizes: u32,
    pub last_frame: Option<Frame>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn set_size(&mut self, size: Viewport) {
        self.size = size;
        self.resizes += 1;
        self.last_frame = None;
    }

    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        self.last_frame = Some(frame.clone());
    }
}

/// HashMap-backed storage for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_fire_in_order() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let a = host.request_frame().unwrap();
        let b = host.request_frame().unwrap();
        assert_eq!(host.pending_frames(), 2);
        assert_eq!(host.fire_frame(), Some(a));
        host.cancel_frame(b);
        assert_eq!(host.fire_frame(), None);
    }

    #[test]
    fn test_resize_reports_listeners() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        assert!(!host.resize(Viewport::new(1024, 768)));
        let id = host.watch_resize().unwrap();
        assert!(host.resize(Viewport::new(1920, 1080)));
        assert_eq!(host.viewport(), Viewport::new(1920, 1080));
        host.unwatch_resize(id);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("soundMuted"), None);
        storage.set("soundMuted", "true");
        assert_eq!(storage.get("soundMuted").as_deref(), Some("true"));
    }
}
