//! Run statistics
//!
//! Counted by the combat loop, written to disk once when the process exits.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Counters for a single run plus the derived hit accuracy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub enemies_killed: u32,
    pub player_collisions: u32,
    pub projectiles_fired: u32,
    pub projectiles_hit: u32,
    /// Derived from the counters, refreshed every frame
    pub hit_accuracy_percent: f32,
}

/// Percentage of shots that connected (0 when nothing was fired)
pub fn accuracy(hits: u32, fired: u32) -> f32 {
    if fired == 0 {
        return 0.0;
    }
    hits as f32 / fired as f32 * 100.0
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute `hit_accuracy_percent` from the counters
    pub fn refresh_accuracy(&mut self) {
        self.hit_accuracy_percent = accuracy(self.projectiles_hit, self.projectiles_fired);
    }

    /// Zero every counter (restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Nothing happened this run
    pub fn is_empty(&self) -> bool {
        self.enemies_killed == 0
            && self.player_collisions == 0
            && self.projectiles_fired == 0
            && self.projectiles_hit == 0
    }

    /// Write the record as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut record = self.clone();
        record.refresh_accuracy();
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing stats to {}", path.display()))?;
        log::info!(
            "Stats saved to {} ({} kills, {:.1}% accuracy)",
            path.display(),
            record.enemies_killed,
            record.hit_accuracy_percent
        );
        Ok(())
    }

    /// Read a record written by [`Stats::save`]
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading stats from {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing stats from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accuracy_nothing_fired() {
        assert_eq!(accuracy(0, 0), 0.0);
    }

    #[test]
    fn test_accuracy_half() {
        assert_eq!(accuracy(5, 10), 50.0);
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let mut stats = Stats {
            enemies_killed: 3,
            player_collisions: 2,
            projectiles_fired: 9,
            projectiles_hit: 4,
            hit_accuracy_percent: 44.4,
        };
        stats.reset();
        assert!(stats.is_empty());
        assert_eq!(stats.hit_accuracy_percent, 0.0);
    }

    #[test]
    fn test_saved_file_has_expected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_stats.json");
        let stats = Stats {
            enemies_killed: 7,
            player_collisions: 1,
            projectiles_fired: 20,
            projectiles_hit: 5,
            hit_accuracy_percent: 0.0,
        };
        stats.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["enemies_killed"], 7);
        assert_eq!(value["player_collisions"], 1);
        assert_eq!(value["projectiles_fired"], 20);
        assert_eq!(value["projectiles_hit"], 5);
        assert_eq!(value["hit_accuracy_percent"], 25.0);

        let loaded = Stats::load(&path).unwrap();
        assert_eq!(loaded.hit_accuracy_percent, 25.0);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("stats.json");
        assert!(Stats::new().save(&path).is_err());
    }

    proptest! {
        #[test]
        fn prop_accuracy_is_a_percentage(fired in 1u32..10_000, frac in 0f64..=1.0) {
            let hits = (fired as f64 * frac) as u32;
            let acc = accuracy(hits, fired);
            prop_assert!((0.0..=100.0).contains(&acc));
        }
    }
}
