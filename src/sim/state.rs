//! Combat state and the spawners that feed it
//!
//! Everything the combat loop mutates lives in [`CombatState`]; nothing
//! else holds a mutable reference to an entity.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::enemy::Enemy;
use super::player::Player;
use super::projectile::{Projectile, ProjectileKind};
use crate::consts::*;
use crate::geometry::{normalize, rotate};
use crate::stats::Stats;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    /// Active gameplay
    Playing,
    /// Frozen until pause is pressed again
    Paused,
    /// Player died, waiting for restart
    GameOver,
}

/// Default particle cap when no quality preset is applied
pub const MAX_PARTICLES: usize = 600;

/// Which arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Complete combat state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct CombatState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: CombatPhase,
    pub player: Player,
    /// Active enemies (spawn order)
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles and damage numbers (not gameplay-affecting)
    pub effects: Effects,
    pub stats: Stats,
    /// Seconds of unpaused play
    pub time: f32,
    /// Seconds until the weapon may fire again
    pub fire_cooldown: f32,
    /// Seconds since the last enemy spawn
    pub spawn_timer: f32,
    /// Seconds until another contact hit can land (shared by all enemies)
    pub contact_cooldown: f32,
    next_id: u32,
}

impl CombatState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, mut tuning: Tuning) -> Self {
        tuning.sanitize();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            tuning,
            phase: CombatPhase::Playing,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            effects: Effects::new(MAX_PARTICLES),
            stats: Stats::new(),
            time: 0.0,
            fire_cooldown: 0.0,
            spawn_timer: 0.0,
            contact_cooldown: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.effects.max_particles = max;
        if self.effects.particles.len() > max {
            let excess = self.effects.particles.len() - max;
            self.effects.particles.drain(..excess);
        }
    }

    /// Fresh player, empty arena, zeroed counters. The RNG keeps its stream.
    pub fn restart(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.effects.clear();
        self.stats.reset();
        self.time = 0.0;
        self.fire_cooldown = 0.0;
        self.spawn_timer = 0.0;
        self.contact_cooldown = 0.0;
        self.phase = CombatPhase::Playing;
        log::info!("Run restarted");
    }

    /// Spawn an enemy just outside a random arena edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let side = if self.rng.random::<bool>() {
            Side::Left
        } else {
            Side::Right
        };
        self.spawn_enemy_at(side)
    }

    pub fn spawn_enemy_at(&mut self, side: Side) -> u32 {
        let radius = self.tuning.enemy_radius;
        let x = match side {
            Side::Left => -radius,
            Side::Right => ARENA_WIDTH + radius,
        };
        let hp = self
            .rng
            .random_range(self.tuning.enemy_min_hp..=self.tuning.enemy_max_hp) as f32;
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(
            id,
            Vec2::new(x, GROUND_LEVEL),
            radius,
            hp,
            self.tuning.enemy_speed,
            self.tuning.hurt_flash_time,
        ));
        log::debug!("Spawned enemy {id} ({side:?}, {hp} hp)");
        id
    }

    /// Fire from the player toward `aim` with random spread and a random kind
    pub fn fire(&mut self, aim: Vec2) {
        let spread = self.tuning.spread;
        let deviation = if spread > 0.0 {
            self.rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        let direction = rotate(normalize(aim - self.player.pos), deviation);
        let kind = ProjectileKind::PALETTE
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        self.spawn_projectile(direction * self.tuning.projectile_speed, kind);
    }

    /// Launch a projectile of a specific kind from the player
    pub fn spawn_projectile(&mut self, vel: Vec2, kind: ProjectileKind) {
        let projectile = Projectile::new(self.player.pos, vel, kind, &self.tuning);
        self.projectiles.push(projectile);
        self.stats.projectiles_fired += 1;
    }
}
