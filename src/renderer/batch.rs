//! CPU tessellating [`Surface`]
//!
//! Collects one frame's triangles and text runs. Fully transparent
//! draws are dropped before tessellation.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use super::{Align, Color, Surface};

/// A string to be rasterized by the host's font renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

#[derive(Debug, Clone)]
pub struct VertexBatch {
    pub clear_color: Color,
    vertices: Vec<Vertex>,
    texts: Vec<TextRun>,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self {
            clear_color: colors::BLACK,
            vertices: Vec::with_capacity(4096),
            texts: Vec::new(),
        }
    }

    /// Drop last frame's contents, keep the allocations
    pub fn begin(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data ready for a GPU buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.texts.is_empty()
    }

    fn visible(color: Color) -> bool {
        color[3] > 0.0
    }
}

impl Surface for VertexBatch {
    fn clear(&mut self, color: Color) {
        self.begin();
        self.clear_color = color;
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !Self::visible(color) || radius <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::circle(center, radius, color, shapes::segments_for(radius)));
    }

    fn arc(&mut self, center: Vec2, radius: f32, thickness: f32, start: f32, end: f32, color: Color) {
        if !Self::visible(color) || thickness <= 0.0 || start == end {
            return;
        }
        let segments = shapes::segments_for(radius);
        self.vertices
            .extend(shapes::arc(center, radius, thickness, start, end, color, segments));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if Self::visible(color) {
            self.vertices.extend(shapes::line(from, to, width, color));
        }
    }

    fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        if Self::visible(color) {
            self.vertices.extend(shapes::rect(min, size, color));
        }
    }

    fn trail(&mut self, points: &[Vec2], width: f32, color: Color) {
        if Self::visible(color) {
            self.vertices.extend(shapes::trail(points, width, color));
        }
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, align: Align) {
        if !Self::visible(color) || text.is_empty() {
            return;
        }
        self.texts.push(TextRun {
            pos,
            text: text.to_owned(),
            size,
            color,
            align,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_frame() {
        let mut batch = VertexBatch::new();
        batch.circle(Vec2::ZERO, 10.0, colors::WHITE);
        batch.text(Vec2::ZERO, "hi", 24.0, colors::WHITE, Align::Left);
        assert!(!batch.is_empty());

        batch.clear(colors::SPACE);
        assert!(batch.is_empty());
        assert_eq!(batch.clear_color, colors::SPACE);
    }

    #[test]
    fn test_transparent_draws_are_skipped() {
        let mut batch = VertexBatch::new();
        batch.circle(Vec2::ZERO, 10.0, colors::with_alpha(colors::WHITE, 0.0));
        batch.text(Vec2::ZERO, "x", 24.0, [1.0, 1.0, 1.0, 0.0], Align::Center);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_bytes_match_vertex_stride() {
        let mut batch = VertexBatch::new();
        batch.rect(Vec2::ZERO, Vec2::new(4.0, 4.0), colors::RED);
        assert_eq!(batch.triangle_count(), 2);
        assert_eq!(batch.as_bytes().len(), 6 * Vertex::STRIDE);
    }

    #[test]
    fn test_ring_draws_full_turn() {
        let mut batch = VertexBatch::new();
        batch.ring(Vec2::ZERO, 30.0, 2.0, colors::WHITE);
        assert_eq!(batch.vertices().len(), shapes::segments_for(30.0) as usize * 6);
    }
}
