//! Scrolling star layers and the occasional meteor behind the menus

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::renderer::{Color, Surface, colors};

/// (stars, speed factor) per layer, back to front
const LAYERS: [(usize, f32); 3] = [(50, 0.5), (50, 1.0), (50, 1.5)];
/// Speed and streak multiplier while the intro warps
const WARP_FACTOR: f32 = 5.0;
const MAX_METEORS: usize = 3;
/// Expected meteor spawns per second
const METEOR_RATE: f32 = 1.44;

const STAR_COLORS: [Color; 5] = [
    colors::PURPLE,
    colors::GREEN,
    colors::WHITE,
    colors::RED,
    colors::YELLOW,
];

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub length: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Meteor {
    pub pos: Vec2,
    pub speed: f32,
    pub length: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub layers: Vec<Vec<Star>>,
    pub meteors: Vec<Meteor>,
    time: f32,
    warping: bool,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layers = LAYERS
            .iter()
            .map(|&(count, factor)| {
                (0..count)
                    .map(|_| {
                        let pos = Vec2::new(
                            rng.random_range(0.0..ARENA_WIDTH),
                            rng.random_range(-ARENA_HEIGHT..ARENA_HEIGHT),
                        );
                        Star {
                            pos,
                            speed: rng.random_range(50.0..=200.0) * factor,
                            length: rng.random_range(5..=15) as f32,
                            color: STAR_COLORS.choose(&mut rng).copied().unwrap_or(colors::WHITE),
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            layers,
            meteors: Vec::new(),
            time: 0.0,
            warping: false,
            rng,
        }
    }

    pub fn star_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn update(&mut self, dt: f32, warping: bool) {
        self.time += dt;
        self.warping = warping;
        let factor = if warping { WARP_FACTOR } else { 1.0 };

        for star in self.layers.iter_mut().flatten() {
            star.pos.y += star.speed * factor * dt;
            if star.pos.y > ARENA_HEIGHT {
                star.pos = Vec2::new(
                    self.rng.random_range(0.0..ARENA_WIDTH),
                    self.rng.random_range(-ARENA_HEIGHT..0.0),
                );
            }
        }

        if self.meteors.len() < MAX_METEORS && self.rng.random::<f32>() < METEOR_RATE * dt {
            self.meteors.push(Meteor {
                pos: Vec2::new(self.rng.random_range(0.0..=ARENA_WIDTH), 0.0),
                speed: self.rng.random_range(500.0..=800.0),
                length: self.rng.random_range(10..=30) as f32,
            });
        }
        for meteor in &mut self.meteors {
            meteor.pos.y += meteor.speed * dt;
        }
        self.meteors.retain(|m| m.pos.y <= ARENA_HEIGHT);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let factor = if self.warping { WARP_FACTOR } else { 1.0 };
        // Shared brightness shimmer
        let pulse = (self.time * std::f32::consts::PI).sin() * 10.0 / 255.0;

        for meteor in &self.meteors {
            let tail = meteor.pos + Vec2::new(0.0, meteor.length);
            surface.line(meteor.pos, tail, 2.0, colors::METEOR);
        }
        for star in self.layers.iter().flatten() {
            let color = [
                (star.color[0] + pulse).clamp(0.0, 1.0),
                (star.color[1] + pulse).clamp(0.0, 1.0),
                (star.color[2] + pulse).clamp(0.0, 1.0),
                1.0,
            ];
            let tail = star.pos + Vec2::new(0.0, star.length * factor);
            surface.line(star.pos, tail, 2.0, color);
        }
    }
}
