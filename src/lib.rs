//! Meme Kart Racing backdrop - the animated layer behind the marketing site
//!
//! Core modules:
//! - `sim`: Deterministic particle field (motion, wraparound, proximity links)
//! - `renderer`: Shape geometry and the Canvas 2D backend
//! - `platform`: Host abstraction (frame scheduler, resize events, storage)
//! - `animator`: Mount/unmount lifecycle tying a field to a host and surface
//! - `audio`: Procedural arcade sound effects
//! - `settings`: Persisted sound preference
//! - `loading`: Splash screen progress

pub mod animator;
pub mod audio;
pub mod loading;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animator::Animator;
pub use audio::{SoundBoard, SoundEffect};
pub use loading::{LoadingPhase, LoadingProgress};
pub use settings::SoundSettings;
pub use sim::{Frame, ParticleField, tick};

/// Backdrop configuration constants
pub mod consts {
    use crate::sim::Rgba;

    /// Number of particles in a field
    pub const PARTICLE_COUNT: usize = 50;

    /// Particle diameter range [min, max)
    pub const PARTICLE_SIZE_MIN: f32 = 2.0;
    pub const PARTICLE_SIZE_MAX: f32 = 6.0;

    /// Velocity components are drawn from [-max, max), in units per frame
    pub const PARTICLE_SPEED_MAX: f32 = 0.25;
    /// Rotation speed drawn from [-max, max), radians per frame
    pub const ROTATION_SPEED_MAX: f32 = 0.01;

    /// Two particles closer than this get a connector line (strictly less than)
    pub const LINK_DISTANCE: f32 = 150.0;
    pub const LINK_COLOR: Rgba = Rgba::new(0, 255, 159, 0.1);
    pub const LINK_WIDTH: f32 = 1.0;

    /// Opacity of the whole canvas layer
    pub const CANVAS_OPACITY: f32 = 0.4;
}
