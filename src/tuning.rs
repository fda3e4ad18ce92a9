//! Data-driven game balance
//!
//! Defaults reproduce the shipped balance. A JSON file may override any
//! subset of fields; unknown or missing fields fall back to defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Balance values consumed by the combat simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Player gravity (px/s²)
    pub gravity: f32,
    /// Projectile gravity (px/s²)
    pub projectile_gravity: f32,
    /// Fraction of projectile velocity lost per second
    pub air_resistance: f32,
    /// Max random aim deviation (radians, each side)
    pub spread: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_max_health: f32,
    /// Spawn x position (ground level is fixed)
    pub player_start_x: f32,

    // === Flight ===
    /// Upward speed while flying (px/s)
    pub fly_lift: f32,
    pub max_stamina: f32,
    /// Stamina drained per second of flight
    pub stamina_use: f32,
    /// Stamina regained per second on the ground
    pub stamina_regen: f32,

    // === Dash ===
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub dash_trail_lifetime: f32,
    /// Trail samples emitted per dashing frame
    pub dash_trail_length: usize,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_damage: f32,
    /// Minimum seconds between shots
    pub fire_delay: f32,
    /// Health restored by a heal-kind hit
    pub hit_heal: f32,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_speed: f32,
    pub enemy_spawn_interval: f32,
    pub enemy_min_hp: u32,
    pub enemy_max_hp: u32,

    // === Effects ===
    pub hurt_flash_time: f32,
    pub slow_duration: f32,
    pub slow_factor: f32,
    pub dot_duration: f32,
    /// DoT damage per second as a fraction of the hit's damage
    pub dot_damage_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            projectile_gravity: 250.0,
            air_resistance: 0.02,
            spread: 0.05,

            player_radius: 15.0,
            player_speed: 200.0,
            player_max_health: 100.0,
            player_start_x: crate::consts::ARENA_WIDTH / 2.0,

            fly_lift: 300.0,
            max_stamina: 100.0,
            stamina_use: 40.0,
            stamina_regen: 20.0,

            dash_speed: 1500.0,
            dash_duration: 0.15,
            dash_cooldown: 1.0,
            dash_trail_lifetime: 0.25,
            dash_trail_length: 10,

            projectile_speed: 900.0,
            projectile_radius: 5.0,
            projectile_damage: 20.0,
            fire_delay: 0.3,
            hit_heal: 10.0,

            enemy_radius: 18.0,
            enemy_speed: 100.0,
            enemy_spawn_interval: 2.0,
            enemy_min_hp: 60,
            enemy_max_hp: 100,

            hurt_flash_time: 0.15,
            slow_duration: 1.5,
            slow_factor: 0.5,
            dot_duration: 2.0,
            dot_damage_factor: 0.25,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from a JSON file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let mut tuning: Tuning = serde_json::from_str(&json)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Load overrides if present, otherwise use the shipped balance
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e:#}");
                Self::default()
            }
        }
    }

    /// Keep ranges well-formed so the simulation never has to check them
    pub(crate) fn sanitize(&mut self) {
        if self.enemy_min_hp > self.enemy_max_hp {
            std::mem::swap(&mut self.enemy_min_hp, &mut self.enemy_max_hp);
        }
        self.enemy_min_hp = self.enemy_min_hp.max(1);
        self.enemy_max_hp = self.enemy_max_hp.max(1);
        self.slow_factor = self.slow_factor.clamp(0.0, 1.0);
        self.max_stamina = self.max_stamina.max(0.0);
        self.player_max_health = self.player_max_health.max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "enemy_speed": 250.0 }}"#).unwrap();

        let tuning = Tuning::load_from(file.path()).unwrap();
        assert_eq!(tuning.enemy_speed, 250.0);
        assert_eq!(tuning.projectile_damage, 20.0);
    }

    #[test]
    fn test_inverted_hp_range_is_repaired() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "enemy_min_hp": 120, "enemy_max_hp": 80 }}"#).unwrap();

        let tuning = Tuning::load_from(file.path()).unwrap();
        assert_eq!((tuning.enemy_min_hp, tuning.enemy_max_hp), (80, 120));
    }

    #[test]
    fn test_garbage_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(Tuning::load_from(file.path()).is_err());
        let tuning = Tuning::load_or_default(file.path());
        assert_eq!(tuning.dash_cooldown, 1.0);
    }
}
