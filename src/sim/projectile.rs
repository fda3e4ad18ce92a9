//! Projectiles: ballistic flight with a per-shot special effect

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geometry::heading;
use crate::tuning::Tuning;

/// What happens when a projectile connects. Each kind has its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Plain damage
    #[default]
    None,
    /// Half damage to every other enemy near the struck one
    Explosive,
    /// Slows the struck enemy
    Slow,
    /// Damage over time on the struck enemy
    Dot,
    /// Passes through enemies, hitting each at most once
    Pierce,
    /// Restores some player health
    Heal,
}

impl ProjectileKind {
    /// Kinds the weapon rolls from, one per palette color
    pub const PALETTE: [ProjectileKind; 5] = [
        ProjectileKind::Pierce,
        ProjectileKind::Dot,
        ProjectileKind::Slow,
        ProjectileKind::Explosive,
        ProjectileKind::Heal,
    ];

    /// Whether the projectile survives hitting an enemy
    pub fn passes_through(self) -> bool {
        self == ProjectileKind::Pierce
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub kind: ProjectileKind,
    /// Facing in radians, follows the velocity
    pub angle: f32,
    /// Recent positions, newest first
    #[serde(skip)]
    pub trail: Vec<Vec2>,
    /// Enemy ids already damaged (pierce only)
    pub hit_targets: Vec<u32>,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, kind: ProjectileKind, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel,
            radius: tuning.projectile_radius,
            damage: tuning.projectile_damage,
            kind,
            angle: heading(vel),
            trail: Vec::with_capacity(PROJECTILE_TRAIL_LENGTH + 1),
            hit_targets: Vec::new(),
            alive: true,
        }
    }

    /// Gravity, drag, move, record trail, cull when far off-screen
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        if !self.alive {
            return;
        }

        self.vel.y += tuning.projectile_gravity * dt;
        self.vel *= (1.0 - tuning.air_resistance * dt).max(0.0);
        self.pos += self.vel * dt;
        self.angle = heading(self.vel);

        self.trail.insert(0, self.pos);
        self.trail.truncate(PROJECTILE_TRAIL_LENGTH);

        if self.is_off_screen() {
            self.alive = false;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > ARENA_WIDTH + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > ARENA_HEIGHT + OFFSCREEN_MARGIN
    }

    /// Pierce shots skip enemies they have already damaged
    pub fn can_hit(&self, enemy_id: u32) -> bool {
        self.alive && !(self.kind.passes_through() && self.hit_targets.contains(&enemy_id))
    }

    /// Record a hit; non-pierce shots are spent
    pub fn register_hit(&mut self, enemy_id: u32) {
        if self.kind.passes_through() {
            self.hit_targets.push(enemy_id);
        } else {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(kind: ProjectileKind) -> (Projectile, Tuning) {
        let tuning = Tuning::default();
        let p = Projectile::new(Vec2::new(500.0, 500.0), Vec2::new(900.0, 0.0), kind, &tuning);
        (p, tuning)
    }

    #[test]
    fn test_gravity_bends_trajectory() {
        let (mut p, tuning) = shot(ProjectileKind::None);
        for _ in 0..30 {
            p.update(SIM_DT, &tuning);
        }
        assert!(p.vel.y > 0.0);
        assert!(p.vel.x < 900.0);
        assert!(p.angle > 0.0);
    }

    #[test]
    fn test_trail_is_bounded() {
        let (mut p, tuning) = shot(ProjectileKind::None);
        for _ in 0..40 {
            p.update(SIM_DT, &tuning);
        }
        assert_eq!(p.trail.len(), PROJECTILE_TRAIL_LENGTH);
        assert_eq!(p.trail[0], p.pos);
    }

    #[test]
    fn test_dies_past_margin() {
        let (mut p, tuning) = shot(ProjectileKind::None);
        p.pos.x = ARENA_WIDTH + OFFSCREEN_MARGIN - 1.0;
        p.update(0.1, &tuning);
        assert!(!p.alive);

        // Dead projectiles don't move
        let frozen = p.pos;
        p.update(0.1, &tuning);
        assert_eq!(p.pos, frozen);
    }

    #[test]
    fn test_pierce_hits_each_enemy_once() {
        let (mut p, _) = shot(ProjectileKind::Pierce);
        assert!(p.can_hit(7));
        p.register_hit(7);
        assert!(p.alive);
        assert!(!p.can_hit(7));
        assert!(p.can_hit(8));
    }

    #[test]
    fn test_regular_shot_is_spent_on_hit() {
        let (mut p, _) = shot(ProjectileKind::Slow);
        p.register_hit(3);
        assert!(!p.alive);
        assert!(!p.can_hit(4));
    }
}
