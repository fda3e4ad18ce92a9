//! Enemies: chase the player, carry slow and damage-over-time effects

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::normalize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// May dip below zero for the rest of the tick it dies in
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
    /// Base chase speed (px/s)
    pub speed: f32,
    /// Counts down from the flash duration after every hit
    pub hurt_timer: f32,
    pub flash_time: f32,
    pub slow_timer: f32,
    /// Speed multiplier while `slow_timer` is positive, otherwise 1
    pub slow_factor: f32,
    pub dot_timer: f32,
    /// Damage per second while `dot_timer` is positive
    pub dot_damage: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, radius: f32, max_health: f32, speed: f32, flash_time: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            health: max_health,
            max_health,
            alive: true,
            speed,
            hurt_timer: 0.0,
            flash_time,
            slow_timer: 0.0,
            slow_factor: 1.0,
            dot_timer: 0.0,
            dot_damage: 0.0,
        }
    }

    /// Chase the player and tick down status effects
    pub fn update(&mut self, dt: f32, player_pos: Vec2) {
        if !self.alive {
            return;
        }

        let direction = normalize(player_pos - self.pos);
        self.pos += direction * self.speed * self.slow_factor * dt;

        if self.dot_timer > 0.0 {
            // Don't bill past the end of the effect
            let billed = dt.min(self.dot_timer);
            self.health -= self.dot_damage * billed;
            self.dot_timer -= dt;
        }
        if self.dot_timer <= 0.0 {
            self.dot_timer = 0.0;
            self.dot_damage = 0.0;
        }

        if self.slow_timer > 0.0 {
            self.slow_timer -= dt;
        }
        if self.slow_timer <= 0.0 {
            self.slow_timer = 0.0;
            self.slow_factor = 1.0;
        }

        if self.hurt_timer > 0.0 {
            self.hurt_timer = (self.hurt_timer - dt).max(0.0);
        }

        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
        self.hurt_timer = self.flash_time;
    }

    /// Replaces any slow already in effect
    pub fn apply_slow(&mut self, duration: f32, factor: f32) {
        self.slow_timer = duration;
        self.slow_factor = factor;
    }

    /// Replaces any damage-over-time already in effect
    pub fn apply_dot(&mut self, duration: f32, damage_per_second: f32) {
        self.dot_timer = duration;
        self.dot_damage = damage_per_second;
    }

    /// 1 right after a hit, fading to 0 (drives the white flash)
    pub fn flash_amount(&self) -> f32 {
        if self.flash_time <= 0.0 {
            return 0.0;
        }
        (self.hurt_timer / self.flash_time).clamp(0.0, 1.0)
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}
