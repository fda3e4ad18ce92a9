//! Demo mode - the AI plays the game
//!
//! Produces a [`TickInput`] from the current state: kite away from the
//! closest enemy, hop or dash when it gets too close, and keep shooting
//! with a lead and gravity-drop correction.

use glam::Vec2;

use super::enemy::Enemy;
use super::state::{CombatPhase, CombatState};
use super::tick::TickInput;
use crate::consts::*;
use crate::geometry::{distance, normalize};

/// Start backing off inside this distance
const KITE_DISTANCE: f32 = 260.0;
/// Hop over anything this close
const HOP_DISTANCE: f32 = 110.0;
/// Dash away from anything this close
const DASH_DISTANCE: f32 = 70.0;

/// Decide the next tick's input
pub fn drive(state: &CombatState) -> TickInput {
    let mut input = TickInput::default();

    if state.phase == CombatPhase::GameOver {
        input.restart = true;
        return input;
    }

    let player = &state.player;
    let Some(target) = nearest_enemy(state) else {
        // Nothing to fight: wander around the middle with some variety
        let wobble = (state.time * 0.7).sin() * 300.0 + (state.time * 0.31).sin() * 120.0;
        let home = ARENA_WIDTH / 2.0 + wobble;
        input.right = player.pos.x < home - 20.0;
        input.left = player.pos.x > home + 20.0;
        return input;
    };

    let gap = distance(player.pos, target.pos);
    let away_right = player.pos.x >= target.pos.x;
    // Pinned against a wall: run through instead of away
    let cornered = (away_right && player.pos.x > ARENA_WIDTH - KITE_DISTANCE)
        || (!away_right && player.pos.x < KITE_DISTANCE);
    let flee_right = away_right != cornered;

    if gap < KITE_DISTANCE {
        input.right = flee_right;
        input.left = !flee_right;
    }
    if gap < HOP_DISTANCE && player.stamina > player.max_stamina * 0.2 {
        input.fly = true;
    }
    if gap < DASH_DISTANCE && player.dash.cooldown <= 0.0 {
        input.dash = true;
    }

    if state.fire_cooldown <= 0.0 {
        input.fire = true;
        input.aim = lead_target(state, target);
    }

    input
}

fn nearest_enemy(state: &CombatState) -> Option<&Enemy> {
    let pos = state.player.pos;
    state.enemies.iter().filter(|e| e.alive).min_by(|a, b| {
        distance(a.pos, pos)
            .partial_cmp(&distance(b.pos, pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Aim point that accounts for enemy motion and projectile drop
fn lead_target(state: &CombatState, enemy: &Enemy) -> Vec2 {
    let origin = state.player.pos;
    let speed = state.tuning.projectile_speed.max(1.0);
    let enemy_vel = normalize(origin - enemy.pos) * enemy.speed * enemy.slow_factor;

    let t = distance(origin, enemy.pos) / speed;
    let predicted = enemy.pos + enemy_vel * t;
    let t = distance(origin, predicted) / speed;
    predicted - Vec2::new(0.0, 0.5 * state.tuning.projectile_gravity * t * t)
}
