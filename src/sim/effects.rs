//! Short-lived visual feedback: particles and floating damage numbers
//!
//! Neither affects gameplay. Both pools expire entries in a single
//! `retain` pass so nothing is skipped while removing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{DAMAGE_TEXT_DRAG, PARTICLE_DRAG};

/// Color lookup key for a particle (resolved by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Hit,
    Death,
    Explosion,
}

/// Burst presets
pub mod bursts {
    /// (count, speed, lifetime)
    pub type Burst = (usize, f32, f32);

    pub const HIT: Burst = (10, 220.0, 0.4);
    pub const DEATH: Burst = (20, 400.0, 0.7);
    pub const EXPLOSION: Burst = (16, 320.0, 0.5);

    /// Floating damage numbers
    pub const DAMAGE_TEXT_LIFE: f32 = 0.7;
    pub const DAMAGE_TEXT_RISE: f32 = 40.0;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub tint: Tint,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageText {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub text: String,
}

/// Remaining life as 0-1, used for fading
pub trait Fading {
    fn life_fraction(&self) -> f32;
}

impl Fading for Particle {
    fn life_fraction(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

impl Fading for DamageText {
    fn life_fraction(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Both effect pools plus the particle cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub damage_texts: Vec<DamageText>,
    pub max_particles: usize,
}

impl Default for Effects {
    fn default() -> Self {
        Self::new(super::state::MAX_PARTICLES)
    }
}

impl Effects {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            damage_texts: Vec::new(),
            max_particles,
        }
    }

    /// Radial burst of `count` particles at `pos`
    pub fn burst<R: Rng>(&mut self, rng: &mut R, pos: Vec2, tint: Tint, (count, speed, life): bursts::Burst) {
        let count = count.min(self.max_particles);
        if count == 0 {
            return;
        }
        // Evict the oldest in one pass to make room
        let excess = (self.particles.len() + count).saturating_sub(self.max_particles);
        self.particles.drain(..excess.min(self.particles.len()));
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let magnitude = rng.random_range(speed * 0.3..=speed);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * magnitude,
                life,
                max_life: life,
                tint,
                radius: rng.random_range(2.0..=5.0),
            });
        }
    }

    /// Rising number above a struck enemy
    pub fn damage_number(&mut self, pos: Vec2, amount: f32) {
        self.damage_texts.push(DamageText {
            pos,
            vel: Vec2::new(0.0, -bursts::DAMAGE_TEXT_RISE),
            life: bursts::DAMAGE_TEXT_LIFE,
            max_life: bursts::DAMAGE_TEXT_LIFE,
            text: format!("{}", amount.round() as i32),
        });
    }

    /// Age, cull and move everything. Expired entries never survive this call.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
        let drag = (1.0 - PARTICLE_DRAG * dt).max(0.0);
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel *= drag;
        }

        for t in &mut self.damage_texts {
            t.life -= dt;
        }
        self.damage_texts.retain(|t| t.life > 0.0);
        let drag = (1.0 - DAMAGE_TEXT_DRAG * dt).max(0.0);
        for t in &mut self.damage_texts {
            t.pos += t.vel * dt;
            t.vel *= drag;
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.damage_texts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.damage_texts.is_empty()
    }
}
