//! 2D rendering module
//!
//! The frame renderer only talks to a `Surface`, so the same draw code runs
//! against the browser canvas and against a recording `DrawList` in tests
//! and headless runs.

pub mod draw_list;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

pub use draw_list::{DrawCommand, DrawList};
pub use frame::render_frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// A 2D raster target in logical viewport coordinates
pub trait Surface {
    /// Solid axis-aligned rectangle
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);

    /// Straight line segment
    fn line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32);

    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);

    /// Circle outline
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32);

    /// Text horizontally centered on `pos.x`, baseline at `pos.y`
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}
