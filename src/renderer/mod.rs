//! Rendering module
//!
//! Screens draw through the [`Surface`] trait and never touch simulation
//! state mutably. [`VertexBatch`] is the bundled implementation: it
//! tessellates everything into colored triangles plus text runs, ready
//! for upload by whatever backend the host uses.

pub mod backdrop;
pub mod batch;
pub mod hud;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use backdrop::Backdrop;
pub use batch::{TextRun, VertexBatch};
pub use hud::Hud;
pub use vertex::{Vertex, colors};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Horizontal anchoring for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A 2D drawing target in arena coordinates (y grows downward)
pub trait Surface {
    /// Fill the whole target
    fn clear(&mut self, color: Color);

    fn circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Thick arc band between two angles (radians, clockwise on screen)
    fn arc(&mut self, center: Vec2, radius: f32, thickness: f32, start: f32, end: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn rect(&mut self, min: Vec2, size: Vec2, color: Color);

    /// Fading ribbon through points, newest first
    fn trail(&mut self, points: &[Vec2], width: f32, color: Color);

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, align: Align);

    /// Outline of a full circle
    fn ring(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        self.arc(center, radius, thickness, 0.0, std::f32::consts::TAU, color);
    }
}
