//! Deterministic particle field
//!
//! All backdrop motion lives here. This module must stay pure:
//! - Frame-count based stepping only
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - No rendering or platform dependencies

pub mod frame;
pub mod state;
pub mod tick;

pub use frame::{DrawCommand, Frame};
pub use state::{FieldConfig, PALETTE, Particle, ParticleField, Rgba, Shape, wrap_coord};
pub use tick::{Link, proximity_links, render, step_particles, tick};
