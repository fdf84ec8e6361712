//! Particle field state
//!
//! Everything the per-frame tick mutates lives here. The field is created from
//! a seed so two mounts with the same seed and bounds start identical.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// An RGBA color with 8-bit channels and a float alpha, as CSS writes it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Particle colors (neon green, cyber cyan, hot magenta, electric yellow)
pub const PALETTE: [Rgba; 4] = [
    Rgba::new(0, 255, 159, 0.6),
    Rgba::new(0, 242, 254, 0.6),
    Rgba::new(255, 0, 127, 0.6),
    Rgba::new(255, 215, 0, 0.4),
];

/// Particle outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Square, Shape::Circle, Shape::Triangle];
}

/// Tunables for field generation. Defaults match `consts`.
///
/// The particle count is not tunable: every field holds `PARTICLE_COUNT`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub size_min: f32,
    pub size_max: f32,
    pub speed_max: f32,
    pub rotation_speed_max: f32,
    pub link_distance: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size_min: PARTICLE_SIZE_MIN,
            size_max: PARTICLE_SIZE_MAX,
            speed_max: PARTICLE_SPEED_MAX,
            rotation_speed_max: ROTATION_SPEED_MAX,
            link_distance: LINK_DISTANCE,
        }
    }
}

/// Sample from [lo, hi), collapsing to `lo` for an empty range (zero-sized viewport)
fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// A single drifting shape
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Per-frame displacement, constant for the particle's lifetime
    pub vel: Vec2,
    pub color: Rgba,
    pub shape: Shape,
    /// Radians
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    /// Roll a particle somewhere inside `bounds`
    pub fn random<R: Rng>(rng: &mut R, bounds: Vec2, config: &FieldConfig) -> Self {
        let pos = Vec2::new(sample(rng, 0.0, bounds.x), sample(rng, 0.0, bounds.y));
        let size = sample(rng, config.size_min, config.size_max);
        let vel = Vec2::new(
            sample(rng, -config.speed_max, config.speed_max),
            sample(rng, -config.speed_max, config.speed_max),
        );
        let color = PALETTE[rng.random_range(0..PALETTE.len())];
        let shape = Shape::ALL[rng.random_range(0..Shape::ALL.len())];
        let rotation = sample(rng, 0.0, TAU);
        let rotation_speed = sample(rng, -config.rotation_speed_max, config.rotation_speed_max);

        Self {
            pos,
            size,
            vel,
            color,
            shape,
            rotation,
            rotation_speed,
        }
    }

    /// Advance one frame: move, spin, then wrap each axis against `bounds`
    pub fn step(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.rotation += self.rotation_speed;
        self.pos.x = wrap_coord(self.pos.x, bounds.x);
        self.pos.y = wrap_coord(self.pos.y, bounds.y);
    }
}

/// Toroidal wrap with reset-to-edge: below zero jumps to `extent`, past `extent` jumps to zero
#[inline]
pub fn wrap_coord(v: f32, extent: f32) -> f32 {
    if v < 0.0 {
        extent
    } else if v > extent {
        0.0
    } else {
        v
    }
}

/// The complete particle set plus the surface bounds it wraps against.
/// Always holds exactly `PARTICLE_COUNT` particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    /// Seed the particles were rolled from
    pub seed: u64,
    /// Surface width/height
    pub bounds: Vec2,
    pub link_distance: f32,
    /// Frames ticked since creation
    pub frame_index: u64,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Create a field with the default configuration
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self::with_config(seed, bounds, &FieldConfig::default())
    }

    pub fn with_config(seed: u64, bounds: Vec2, config: &FieldConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::random(&mut rng, bounds, config))
            .collect();

        Self {
            seed,
            bounds,
            link_distance: config.link_distance,
            frame_index: 0,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to individual particles; the set itself cannot grow or shrink
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// New surface bounds; positions are left alone and wrap on the next tick
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }
}
