//! Backdrop lifecycle
//!
//! Ties a `ParticleField` to a drawing surface and a host scheduler. The host
//! owns the actual callbacks and reports back through `on_frame` and
//! `on_resize`; the animator decides what to request and what to release.

use crate::platform::{FrameId, Host, ListenerId, Surface};
use crate::sim::{ParticleField, render, tick};

/// A mounted, animating backdrop.
///
/// The host keeps calling back until `unmount` or `release` is called; dropping
/// the animator alone leaves its frame callback and resize listener registered.
#[must_use = "an animator must be unmounted or released to cancel its host callbacks"]
pub struct Animator<S: Surface> {
    field: ParticleField,
    surface: S,
    pending_frame: Option<FrameId>,
    resize_listener: Option<ListenerId>,
    running: bool,
    released: bool,
}

impl<S: Surface> Animator<S> {
    /// Mount onto `surface` and start animating.
    ///
    /// A missing surface (no 2D context) is not an error: the backdrop is purely
    /// decorative, so nothing is registered and `None` comes back.
    pub fn mount<H: Host>(host: &mut H, surface: Option<S>, seed: u64) -> Option<Self> {
        let Some(mut surface) = surface else {
            log::debug!("No drawing surface - particle backdrop disabled");
            return None;
        };

        let viewport = host.viewport();
        surface.set_size(viewport);
        let resize_listener = host.watch_resize();
        let field = ParticleField::new(seed, viewport.as_vec2());

        log::info!(
            "Particle backdrop mounted ({}x{}, {} particles, seed {})",
            viewport.width,
            viewport.height,
            field.len(),
            seed
        );

        let mut animator = Self {
            field,
            surface,
            pending_frame: None,
            resize_listener,
            running: true,
            released: false,
        };
        animator.pending_frame = host.request_frame();
        Some(animator)
    }

    /// The scheduled frame fired: tick, paint, and ask for the next one
    pub fn on_frame<H: Host>(&mut self, host: &mut H) {
        self.pending_frame = None;
        if !self.running {
            return;
        }

        let frame = tick(&mut self.field);
        self.surface.present(&frame);
        self.pending_frame = host.request_frame();
    }

    /// The viewport changed: match the surface and the wrap bounds to it.
    ///
    /// Resizing clears the surface. While running the next frame repaints it;
    /// while stopped the frozen field is repainted here without advancing.
    pub fn on_resize<H: Host>(&mut self, host: &H) {
        let viewport = host.viewport();
        self.surface.set_size(viewport);
        self.field.resize(viewport.as_vec2());
        if !self.running && !self.released {
            self.surface.present(&render(&self.field));
        }
        log::debug!("Backdrop resized to {}x{}", viewport.width, viewport.height);
    }

    /// Resume animating after `stop`. No effect once released.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.running || self.released {
            return;
        }
        self.running = true;
        if self.pending_frame.is_none() {
            self.pending_frame = host.request_frame();
        }
    }

    /// Freeze on the current frame. Resizes still repaint the frozen field.
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(id) = self.pending_frame.take() {
            host.cancel_frame(id);
        }
    }

    /// Release the frame callback and the resize listener
    pub fn unmount<H: Host>(mut self, host: &mut H) {
        self.release(host);
        log::info!(
            "Particle backdrop unmounted after {} frames",
            self.field.frame_index
        );
    }

    /// Cancel everything registered with `host`. Safe to call more than once.
    pub fn release<H: Host>(&mut self, host: &mut H) {
        self.running = false;
        self.released = true;
        if let Some(id) = self.pending_frame.take() {
            host.cancel_frame(id);
        }
        if let Some(id) = self.resize_listener.take() {
            host.unwatch_resize(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether `release` (or `unmount`) has run
    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface> Drop for Animator<S> {
    fn drop(&mut self) {
        if self.pending_frame.is_some() || self.resize_listener.is_some() {
            log::warn!("Particle backdrop dropped without unmount; host callbacks still registered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PARTICLE_COUNT;
    use crate::platform::{HeadlessHost, RecordingSurface, Viewport};
    use crate::sim::DrawCommand;
    use glam::Vec2;

    fn mount(host: &mut HeadlessHost, seed: u64) -> Animator<RecordingSurface> {
        Animator::mount(host, Some(RecordingSurface::new()), seed).expect("surface given")
    }

    /// Let the host fire `n` frames into the animator
    fn run_frames(animator: &mut Animator<RecordingSurface>, host: &mut HeadlessHost, n: usize) {
        for _ in 0..n {
            if host.fire_frame().is_some() {
                animator.on_frame(host);
            }
        }
    }

    #[test]
    fn test_mount_sizes_surface_and_registers() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let animator = mount(&mut host, 1);

        assert_eq!(animator.surface().size(), Viewport::new(800, 600));
        assert_eq!(animator.field().bounds, Vec2::new(800.0, 600.0));
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(host.listener_count(), 1);
        assert!(animator.is_running());
    }

    #[test]
    fn test_missing_surface_is_silent_noop() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let animator = Animator::<RecordingSurface>::mount(&mut host, None, 1);

        assert!(animator.is_none());
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_every_frame_has_all_particles() {
        let mut host = HeadlessHost::new(Viewport::new(1280, 720));
        let mut animator = mount(&mut host, 2);

        for _ in 0..60 {
            run_frames(&mut animator, &mut host, 1);
            let frame = animator.surface().last_frame.as_ref().unwrap();
            assert_eq!(frame.particle_count(), PARTICLE_COUNT);
        }
        assert_eq!(animator.surface().presented, 60);
        // Always exactly one frame in flight
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_resize_updates_surface_and_bounds() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let mut animator = mount(&mut host, 3);
        run_frames(&mut animator, &mut host, 5);

        assert!(host.resize(Viewport::new(1920, 1080)));
        animator.on_resize(&host);

        assert_eq!(animator.surface().size(), Viewport::new(1920, 1080));
        assert_eq!(animator.field().bounds, Vec2::new(1920.0, 1080.0));
        // Mount sized it once, the resize again, and resizing clears the surface
        assert_eq!(animator.surface().resizes, 2);
        assert!(animator.surface().last_frame.is_none());
        assert_eq!(animator.surface().presented, 5);

        // Next wrap uses the new width
        let p = &mut animator.field_mut().particles_mut()[0];
        p.pos = Vec2::new(1000.0, 500.0);
        p.vel = Vec2::new(0.25, 0.0);
        run_frames(&mut animator, &mut host, 1);
        assert!((animator.field().particles()[0].pos.x - 1000.25).abs() < 1e-3);
    }

    #[test]
    fn test_resize_while_stopped_repaints_frozen_field() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let mut animator = mount(&mut host, 7);
        run_frames(&mut animator, &mut host, 4);
        animator.stop(&mut host);
        let frozen = animator.field().particles().to_vec();

        assert!(host.resize(Viewport::new(1024, 768)));
        animator.on_resize(&host);

        assert_eq!(animator.surface().resizes, 2);
        let frame = animator.surface().last_frame.as_ref().expect("repainted");
        assert_eq!(frame.particle_count(), PARTICLE_COUNT);
        assert_eq!(frame.index, 4);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Clear {
                width: 1024.0,
                height: 768.0
            }
        );
        assert_eq!(animator.field().particles(), &frozen[..]);
        assert_eq!(animator.field().frame_index, 4);
        // Still frozen
        assert_eq!(host.pending_frames(), 0);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_release_is_tracked() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let mut animator = mount(&mut host, 8);
        assert!(!animator.is_released());

        animator.stop(&mut host);
        assert!(!animator.is_released());
        assert_eq!(host.listener_count(), 1);

        animator.release(&mut host);
        animator.release(&mut host);
        assert!(animator.is_released());
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.listener_count(), 0);

        // Released animators stay dark
        animator.start(&mut host);
        animator.on_resize(&host);
        assert_eq!(animator.surface().presented, 0);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let mut animator = mount(&mut host, 4);
        run_frames(&mut animator, &mut host, 10);

        animator.unmount(&mut host);

        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.listener_count(), 0);
        assert!(host.fire_frame().is_none());
        assert!(!host.resize(Viewport::new(1024, 768)));
    }

    #[test]
    fn test_unmount_right_after_mount() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let animator = mount(&mut host, 5);
        animator.unmount(&mut host);

        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_stop_and_start() {
        let mut host = HeadlessHost::new(Viewport::new(800, 600));
        let mut animator = mount(&mut host, 6);
        run_frames(&mut animator, &mut host, 3);

        animator.stop(&mut host);
        assert!(!animator.is_running());
        assert_eq!(host.pending_frames(), 0);
        run_frames(&mut animator, &mut host, 5);
        assert_eq!(animator.surface().presented, 3);

        // Stopping twice is harmless
        animator.stop(&mut host);

        animator.start(&mut host);
        animator.start(&mut host);
        assert_eq!(host.pending_frames(), 1);
        run_frames(&mut animator, &mut host, 2);
        assert_eq!(animator.surface().presented, 5);
        assert_eq!(animator.field().frame_index, 5);
        // Listener survives stop/start
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn test_same_seed_same_initial_particles() {
        let mut host_a = HeadlessHost::new(Viewport::new(1024, 768));
        let mut host_b = HeadlessHost::new(Viewport::new(1024, 768));
        let a = mount(&mut host_a, 2024);
        let b = mount(&mut host_b, 2024);
        assert_eq!(a.field().particles(), b.field().particles());
    }
}
