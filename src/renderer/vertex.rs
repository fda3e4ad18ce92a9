//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    use crate::renderer::Color;

    /// 8-bit RGB to linear-ish float color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    /// Same color with a different alpha
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
    }

    /// Linear blend from `a` to `b`
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }

    pub const WHITE: Color = rgb(255, 255, 255);
    pub const BLACK: Color = rgb(0, 0, 0);
    pub const RED: Color = rgb(254, 0, 0);
    pub const GREEN: Color = rgb(11, 255, 1);
    pub const YELLOW: Color = rgb(253, 254, 2);
    pub const PURPLE: Color = rgb(254, 0, 246);
    /// Health bar middle band
    pub const AMBER: Color = rgb(255, 210, 0);

    pub const PLAYER: Color = rgb(0, 255, 0);
    pub const ENEMY: Color = rgb(255, 0, 0);
    pub const STAMINA: Color = rgb(0, 180, 255);
    pub const UI_BG: Color = rgb(40, 40, 40);
    pub const GROUND: Color = rgb(70, 70, 100);

    pub const DAMAGE_TEXT: Color = rgb(255, 230, 180);
    pub const HIT_PARTICLES: Color = rgb(255, 200, 80);
    pub const DEATH_PARTICLES: Color = rgb(255, 80, 40);
    pub const EXPLOSION: Color = rgb(255, 80, 0);

    /// Backdrop when the image is unavailable
    pub const BACKDROP_FALLBACK: Color = rgb(50, 50, 80);
    /// Menu screens
    pub const SPACE: Color = rgb(5, 5, 15);
    pub const METEOR: Color = rgb(255, 180, 120);
    pub const TITLE: Color = rgb(120, 200, 255);

    /// Pause / game-over dimming
    pub const OVERLAY_PAUSE: Color = [0.0, 0.0, 0.0, 0.5];
    pub const OVERLAY_GAME_OVER: Color = [0.0, 0.0, 0.0, 0.75];
}
