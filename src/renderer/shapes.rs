//! Shape geometry for particle fills
//!
//! All coordinates are local to the particle: origin at its centre, before rotation.

use glam::Vec2;

/// Axis-aligned rectangle, top-left corner plus extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Square of side `size` centred on the origin
pub fn square_rect(size: f32) -> Rect {
    let half = size / 2.0;
    Rect {
        x: -half,
        y: -half,
        w: size,
        h: size,
    }
}

/// Circle with diameter `size`
pub fn circle_radius(size: f32) -> f32 {
    size / 2.0
}

/// Upward-pointing triangle inscribed in a size x size box: apex, bottom-right, bottom-left
pub fn triangle_points(size: f32) -> [Vec2; 3] {
    let half = size / 2.0;
    [
        Vec2::new(0.0, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
}
