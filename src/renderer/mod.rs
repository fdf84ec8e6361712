//! Backdrop rendering
//!
//! Shape geometry is plain math; the Canvas 2D backend only exists on wasm.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
