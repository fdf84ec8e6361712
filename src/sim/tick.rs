//! Per-frame field update
//!
//! One call advances every particle by one frame and returns the draw list.
//! Motion is counted in frames, not wall-clock time.

use glam::Vec2;

use super::frame::{DrawCommand, Frame};
use super::state::{Particle, ParticleField};
use crate::consts::{LINK_COLOR, LINK_WIDTH};

/// An unordered pair of particle indices (`a < b`) close enough to connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
}

/// Every pair strictly closer than `max_distance`, in (i, j) order with i < j
pub fn proximity_links(particles: &[Particle], max_distance: f32) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, p) in particles.iter().enumerate() {
        for (j, q) in particles.iter().enumerate().skip(i + 1) {
            let dx = p.pos.x - q.pos.x;
            let dy = p.pos.y - q.pos.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < max_distance {
                links.push(Link { a: i, b: j });
            }
        }
    }
    links
}

/// Move and wrap every particle without producing draw output
pub fn step_particles(field: &mut ParticleField) {
    let bounds = field.bounds;
    for particle in field.particles_mut() {
        particle.step(bounds);
    }
    field.frame_index += 1;
}

/// Advance the field by one frame and return what to paint
pub fn tick(field: &mut ParticleField) -> Frame {
    step_particles(field);
    render(field)
}

/// Draw list for the field as it stands, without advancing it
pub fn render(field: &ParticleField) -> Frame {
    let Vec2 { x: width, y: height } = field.bounds;
    let particles = field.particles();

    let mut commands = Vec::with_capacity(1 + particles.len() * 2);
    commands.push(DrawCommand::Clear { width, height });

    commands.extend(particles.iter().map(|p| DrawCommand::Particle {
        pos: p.pos,
        rotation: p.rotation,
        size: p.size,
        shape: p.shape,
        color: p.color,
    }));

    // Connectors go on top of the particles
    commands.extend(
        proximity_links(particles, field.link_distance)
            .into_iter()
            .map(|Link { a, b }| DrawCommand::Link {
                from: particles[a].pos,
                to: particles[b].pos,
                color: LINK_COLOR,
                width: LINK_WIDTH,
            }),
    );

    Frame {
        index: field.frame_index,
        commands,
    }
}
