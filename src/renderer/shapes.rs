//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::Color;
use super::vertex::Vertex;

/// Segment count that keeps edges smooth without wasting triangles
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(8, 64)
}

fn push_quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
    // a-b on one edge, c-d on the opposite edge
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a thick arc band from `start` to `end` (radians)
///
/// A full turn gives a ring. `radius` is the band's centerline.
pub fn arc(
    center: Vec2,
    radius: f32,
    thickness: f32,
    start: f32,
    end: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let span = end - start;
    let num_segments = ((segments as f32 * span.abs() / TAU).ceil() as u32).max(2);
    let inner_r = (radius - thickness / 2.0).max(0.0);
    let outer_r = radius + thickness / 2.0;

    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);

    for i in 0..num_segments {
        let theta1 = start + span * i as f32 / num_segments as f32;
        let theta2 = start + span * (i + 1) as f32 / num_segments as f32;

        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);

        push_quad(
            &mut vertices,
            center + dir1 * inner_r,
            center + dir1 * outer_r,
            center + dir2 * inner_r,
            center + dir2 * outer_r,
            color,
        );
    }

    vertices
}

/// Generate vertices for a line segment of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, from + perp, from - perp, to + perp, to - perp, color);
    vertices
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        min,
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, min.y),
        max,
        color,
    );
    vertices
}

/// Tapered, fading ribbon through `points` (newest first)
pub fn trail(points: &[Vec2], width: f32, color: Color) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(points.len() * 6);
    let trail_len = points.len() as f32;

    for i in 0..points.len() - 1 {
        let p1 = points[i];
        let p2 = points[i + 1];

        // Fade alpha and size along trail
        let t1 = i as f32 / trail_len;
        let t2 = (i + 1) as f32 / trail_len;

        let width1 = width * (1.0 - t1 * 0.7);
        let width2 = width * (1.0 - t2 * 0.7);

        let color1 = [color[0], color[1], color[2], color[3] * (1.0 - t1) * 0.8];
        let color2 = [color[0], color[1], color[2], color[3] * (1.0 - t2) * 0.8];

        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x);

        let v1a = p1 + perp * width1;
        let v1b = p1 - perp * width1;
        let v2a = p2 + perp * width2;
        let v2b = p2 - perp * width2;

        vertices.push(Vertex::new(v1a.x, v1a.y, color1));
        vertices.push(Vertex::new(v1b.x, v1b.y, color1));
        vertices.push(Vertex::new(v2a.x, v2a.y, color2));

        vertices.push(Vertex::new(v2a.x, v2a.y, color2));
        vertices.push(Vertex::new(v1b.x, v1b.y, color1));
        vertices.push(Vertex::new(v2b.x, v2b.y, color2));
    }

    vertices
}
