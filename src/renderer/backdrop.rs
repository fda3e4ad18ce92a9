//! Arena background
//!
//! The image is downsampled once at load into a coarse grid of colored
//! cells. A missing or unreadable file falls back to a solid color.

use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::imageops::FilterType;

use super::vertex::colors;
use super::{Color, Surface};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Grid resolution the image is reduced to
const GRID_W: u32 = 48;
const GRID_H: u32 = 27;

#[derive(Debug, Clone, PartialEq)]
pub enum Backdrop {
    Solid(Color),
    /// Row-major `GRID_W` x `GRID_H` cell colors
    Grid(Vec<Color>),
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::Solid(colors::BACKDROP_FALLBACK)
    }
}

impl Backdrop {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading backdrop {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("decoding backdrop {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let small = img.resize_exact(GRID_W, GRID_H, FilterType::Triangle).to_rgb8();
        let cells = small
            .pixels()
            .map(|p| colors::rgb(p.0[0], p.0[1], p.0[2]))
            .collect();
        Ok(Backdrop::Grid(cells))
    }

    /// Load, or warn once and use the solid fallback
    pub fn load_or_fallback(path: &Path) -> Self {
        match Self::load(path) {
            Ok(backdrop) => {
                log::info!("Loaded backdrop from {}", path.display());
                backdrop
            }
            Err(e) => {
                log::warn!("Using fallback backdrop: {e:#}");
                Self::default()
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Backdrop::Solid(color) => surface.clear(*color),
            Backdrop::Grid(cells) => {
                surface.clear(colors::BLACK);
                let cell = Vec2::new(ARENA_WIDTH / GRID_W as f32, ARENA_HEIGHT / GRID_H as f32);
                for (i, color) in cells.iter().enumerate() {
                    let x = (i as u32 % GRID_W) as f32;
                    let y = (i as u32 / GRID_W) as f32;
                    surface.rect(Vec2::new(x, y) * cell, cell, *color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use std::io::Cursor;

    fn png_bytes(color: [u8; 3]) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(96, 54, image::Rgb(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let backdrop = Backdrop::load_or_fallback(&dir.path().join("nope.png"));
        assert_eq!(backdrop, Backdrop::Solid(colors::BACKDROP_FALLBACK));
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(Backdrop::load(&path).is_err());
        assert_eq!(Backdrop::load_or_fallback(&path), Backdrop::default());
    }

    #[test]
    fn test_png_becomes_grid() {
        let backdrop = Backdrop::from_bytes(&png_bytes([255, 0, 0])).unwrap();
        let Backdrop::Grid(cells) = &backdrop else {
            panic!("expected grid");
        };
        assert_eq!(cells.len(), (GRID_W * GRID_H) as usize);
        assert!(cells[0][0] > 0.95 && cells[0][1] < 0.05);

        let mut batch = VertexBatch::new();
        backdrop.draw(&mut batch);
        assert_eq!(batch.triangle_count(), (GRID_W * GRID_H * 2) as usize);
    }

    #[test]
    fn test_solid_clears() {
        let mut batch = VertexBatch::new();
        Backdrop::default().draw(&mut batch);
        assert!(batch.is_empty());
        assert_eq!(batch.clear_color, colors::BACKDROP_FALLBACK);
    }
}
