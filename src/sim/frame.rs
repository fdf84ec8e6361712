//! Draw instructions produced by one tick
//!
//! Pure data: the renderer decides how to turn these into pixels.

use glam::Vec2;

use super::state::{Rgba, Shape};

/// One drawing operation, in paint order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { width: f32, height: f32 },
    /// Fill a particle's shape centred on `pos`, rotated by `rotation`
    Particle {
        pos: Vec2,
        rotation: f32,
        size: f32,
        shape: Shape,
        color: Rgba,
    },
    /// Stroke a proximity connector
    Link {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
}

/// Everything to paint for a single display refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Tick counter at which the frame was produced (1 for the first tick)
    pub index: u64,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn particle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Particle { .. }))
            .count()
    }

    pub fn link_count(&self) -> usize {
        self.links().count()
    }

    /// Endpoints of every connector in the frame
    pub fn links(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Link { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }
}
