//! 2D vector helpers and circle collision
//!
//! Thin layer over `glam::Vec2`. Every function is total: degenerate input
//! resolves to a zero vector or `false` instead of producing NaN.

use glam::Vec2;

/// Unit vector in the direction of `v`, or zero for a zero-length vector
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Rotate `v` counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Two circles overlap when their centers are closer than the sum of radii
#[inline]
pub fn circles_collide(pos_a: Vec2, pos_b: Vec2, radius_a: f32, radius_b: f32) -> bool {
    distance(pos_a, pos_b) < radius_a + radius_b
}

/// Heading of `v` in radians, measured from +x
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Frame-rate independent approach toward `target` at `rate` per second
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).min(1.0)
}
