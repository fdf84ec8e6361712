//! Canvas 2D backend
//!
//! Replays a `Frame` onto a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{circle_radius, square_rect, triangle_points};
use crate::platform::{Surface, Viewport};
use crate::sim::{DrawCommand, Frame, Rgba, Shape};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the canvas' 2D context; `None` when the environment has none
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    fn fill_particle(&self, pos: glam::Vec2, rotation: f32, size: f32, shape: Shape, color: Rgba) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(pos.x as f64, pos.y as f64).ok();
        ctx.rotate(rotation as f64).ok();
        ctx.set_fill_style_str(&color.to_css());

        match shape {
            Shape::Square => {
                let r = square_rect(size);
                ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            }
            Shape::Circle => {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, circle_radius(size) as f64, 0.0, TAU).ok();
                ctx.fill();
            }
            Shape::Triangle => {
                let [apex, right, left] = triangle_points(size);
                ctx.begin_path();
                ctx.move_to(apex.x as f64, apex.y as f64);
                ctx.line_to(right.x as f64, right.y as f64);
                ctx.line_to(left.x as f64, left.y as f64);
                ctx.close_path();
                ctx.fill();
            }
        }

        ctx.restore();
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, size: Viewport) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn present(&mut self, frame: &Frame) {
        // Links share one stroke style; only touch the context when it changes
        let mut stroke: Option<(Rgba, f32)> = None;

        for command in &frame.commands {
            match *command {
                DrawCommand::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                }
                DrawCommand::Particle {
                    pos,
                    rotation,
                    size,
                    shape,
                    color,
                } => self.fill_particle(pos, rotation, size, shape, color),
                DrawCommand::Link {
                    from,
                    to,
                    color,
                    width,
                } => {
                    if stroke != Some((color, width)) {
                        self.ctx.set_stroke_style_str(&color.to_css());
                        self.ctx.set_line_width(width as f64);
                        stroke = Some((color, width));
                    }
                    self.ctx.begin_path();
                    self.ctx.move_to(from.x as f64, from.y as f64);
                    self.ctx.line_to(to.x as f64, to.y as f64);
                    self.ctx.stroke();
                }
            }
        }
    }
}
