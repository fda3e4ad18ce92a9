//! Fixed timestep combat tick
//!
//! Core game loop that advances the combat state by one step.

use glam::Vec2;

use super::effects::{Tint, bursts};
use super::player::PlayerControls;
use super::projectile::ProjectileKind;
use super::state::{CombatPhase, CombatState};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::geometry::{circles_collide, distance};
use crate::input::{FrameInput, Key};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Dash key went down (edge)
    pub dash: bool,
    pub fly: bool,
    /// Fire button went down (edge)
    pub fire: bool,
    /// Where shots are aimed
    pub aim: Vec2,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
}

impl TickInput {
    pub fn from_frame(frame: &FrameInput) -> Self {
        let click = frame.clicks().last();
        Self {
            left: frame.is_held(Key::Left),
            right: frame.is_held(Key::Right),
            dash: frame.was_pressed(Key::Dash),
            fly: frame.is_held(Key::Fly),
            fire: click.is_some(),
            aim: click.unwrap_or(frame.pointer),
            pause: frame.was_pressed(Key::Pause),
            restart: frame.was_pressed(Key::Restart),
        }
    }

    /// Same input with every edge cleared (for repeated substeps)
    pub fn held_only(&self) -> Self {
        Self {
            dash: false,
            fire: false,
            pause: false,
            restart: false,
            ..self.clone()
        }
    }

    /// Fold a newer frame into input not yet consumed by a tick.
    ///
    /// Held keys follow the newer frame; edges accumulate until a tick
    /// runs. An unconsumed shot keeps its original aim.
    pub fn absorb(&mut self, newer: &TickInput) {
        let aim = if self.fire && !newer.fire {
            self.aim
        } else {
            newer.aim
        };
        *self = Self {
            dash: self.dash || newer.dash,
            fire: self.fire || newer.fire,
            pause: self.pause != newer.pause,
            restart: self.restart || newer.restart,
            aim,
            ..newer.clone()
        };
    }

    fn controls(&self) -> PlayerControls {
        PlayerControls {
            left: self.left,
            right: self.right,
            dash_pressed: self.dash,
            fly: self.fly,
        }
    }
}

/// Advance the combat state by one step
pub fn tick(state: &mut CombatState, input: &TickInput, dt: f32, audio: &mut dyn AudioSink) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            CombatPhase::Playing => {
                state.phase = CombatPhase::Paused;
                log::debug!("Paused");
                return;
            }
            CombatPhase::Paused => {
                state.phase = CombatPhase::Playing;
                log::debug!("Resumed");
            }
            CombatPhase::GameOver => {}
        }
    }

    if input.restart && state.phase == CombatPhase::GameOver {
        state.restart();
    }

    if state.phase != CombatPhase::Playing {
        return;
    }
    state.time += dt;

    // 1. Weapon
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
    if input.fire && state.fire_cooldown <= 0.0 {
        state.fire(input.aim);
        state.fire_cooldown = state.tuning.fire_delay;
        audio.play(SoundEffect::Shoot);
    }

    // 2. Player
    if state.player.update(dt, &input.controls(), &state.tuning) {
        audio.play(SoundEffect::Dash);
    }

    // 3. Enemy spawning
    state.spawn_timer += dt;
    if state.spawn_timer >= state.tuning.enemy_spawn_interval {
        state.spawn_timer -= state.tuning.enemy_spawn_interval;
        state.spawn_enemy();
    }

    // 4. Player vs enemy contact
    resolve_contacts(state, dt, audio);

    // 5. Enemies
    update_enemies(state, dt, audio);

    // 6. Projectiles
    update_projectiles(state, dt, audio);

    // 7. Effects
    state.effects.update(dt);

    // 8. Derived stats
    state.stats.refresh_accuracy();

    if state.player.is_dead() {
        state.phase = CombatPhase::GameOver;
        audio.play(SoundEffect::GameOver);
        log::info!(
            "Game over after {:.1}s: {} kills, {:.1}% accuracy",
            state.time,
            state.stats.enemies_killed,
            state.stats.hit_accuracy_percent
        );
    }
}

/// One global cooldown gates contact damage from every enemy
fn resolve_contacts(state: &mut CombatState, dt: f32, audio: &mut dyn AudioSink) {
    state.contact_cooldown = (state.contact_cooldown - dt).max(0.0);

    for enemy in &state.enemies {
        if !enemy.alive
            || !circles_collide(state.player.pos, enemy.pos, state.player.radius, enemy.radius)
        {
            continue;
        }
        if state.contact_cooldown > 0.0 {
            break;
        }
        let direction = state.player.pos - enemy.pos;
        state.player.take_damage(CONTACT_DAMAGE, direction);
        state.stats.player_collisions += 1;
        state.contact_cooldown = CONTACT_COOLDOWN;
        audio.play(SoundEffect::PlayerHurt);
    }
}

/// Move enemies, then cull the dead with a death burst each
fn update_enemies(state: &mut CombatState, dt: f32, audio: &mut dyn AudioSink) {
    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.update(dt, player_pos);
    }

    for enemy in state.enemies.iter().filter(|e| !e.alive) {
        state
            .effects
            .burst(&mut state.rng, enemy.pos, Tint::Death, bursts::DEATH);
        state.stats.enemies_killed += 1;
        audio.play(SoundEffect::EnemyDeath);
        log::debug!("Enemy {} destroyed", enemy.id);
    }
    state.enemies.retain(|e| e.alive);
}

/// Fly projectiles and resolve their hits
fn update_projectiles(state: &mut CombatState, dt: f32, audio: &mut dyn AudioSink) {
    for pi in 0..state.projectiles.len() {
        state.projectiles[pi].update(dt, &state.tuning);

        for ei in 0..state.enemies.len() {
            let projectile = &state.projectiles[pi];
            if !projectile.alive {
                break;
            }
            let enemy = &state.enemies[ei];
            if !enemy.alive
                || !projectile.can_hit(enemy.id)
                || !circles_collide(projectile.pos, enemy.pos, projectile.radius, enemy.radius)
            {
                continue;
            }

            let (kind, damage) = (projectile.kind, projectile.damage);
            let enemy_id = enemy.id;
            state.projectiles[pi].register_hit(enemy_id);
            apply_hit(state, ei, kind, damage, audio);

            if !kind.passes_through() {
                break;
            }
        }
    }
    state.projectiles.retain(|p| p.alive);
}

/// Damage the struck enemy, spawn feedback, then apply the kind's effect
fn apply_hit(
    state: &mut CombatState,
    target: usize,
    kind: ProjectileKind,
    damage: f32,
    audio: &mut dyn AudioSink,
) {
    let enemy = &mut state.enemies[target];
    enemy.take_damage(damage);
    let (pos, radius, id) = (enemy.pos, enemy.radius, enemy.id);

    state.stats.projectiles_hit += 1;
    state.effects.burst(&mut state.rng, pos, Tint::Hit, bursts::HIT);
    state
        .effects
        .damage_number(pos - Vec2::new(0.0, radius + 10.0), damage);
    audio.play(SoundEffect::Hit);

    let tuning = &state.tuning;
    match kind {
        ProjectileKind::Explosive => {
            let splash = damage / 2.0;
            for other in &mut state.enemies {
                if other.id != id && other.alive && distance(other.pos, pos) <= EXPLOSION_RADIUS {
                    other.take_damage(splash);
                }
            }
            state
                .effects
                .burst(&mut state.rng, pos, Tint::Explosion, bursts::EXPLOSION);
            audio.play(SoundEffect::Explosion);
        }
        ProjectileKind::Slow => {
            state.enemies[target].apply_slow(tuning.slow_duration, tuning.slow_factor);
        }
        ProjectileKind::Dot => {
            state.enemies[target].apply_dot(tuning.dot_duration, damage * tuning.dot_damage_factor);
        }
        ProjectileKind::Heal => {
            state.player.heal(tuning.hit_heal);
        }
        ProjectileKind::Pierce | ProjectileKind::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Recorder;
    use crate::sim::enemy::Enemy;
    use crate::sim::state::Side;
    use crate::tuning::Tuning;

    fn state() -> CombatState {
        CombatState::new(12345, Tuning::default())
    }

    fn run(state: &mut CombatState, input: &TickInput, seconds: f32) {
        let mut audio = Recorder::default();
        let steps = (seconds / SIM_DT).round() as usize;
        for _ in 0..steps {
            tick(state, input, SIM_DT, &mut audio);
        }
    }

    /// Enemy parked away from the player, returns its index
    fn park_enemy(state: &mut CombatState, pos: Vec2, hp: f32) -> usize {
        let id = state.next_entity_id();
        let t = &state.tuning;
        state
            .enemies
            .push(Enemy::new(id, pos, t.enemy_radius, hp, t.enemy_speed, t.hurt_flash_time));
        state.enemies.len() - 1
    }

    /// Projectile placed just left of `target`, flying right
    fn shoot_at(state: &mut CombatState, target: Vec2, kind: ProjectileKind) {
        state.spawn_projectile(Vec2::new(900.0, 0.0), kind);
        let p = state.projectiles.last_mut().unwrap();
        p.pos = target - Vec2::new(5.0, 0.0);
    }

    #[test]
    fn test_dot_hit_end_to_end() {
        let mut s = state();
        let target = Vec2::new(300.0, 300.0);
        let idx = park_enemy(&mut s, target, 100.0);
        shoot_at(&mut s, target, ProjectileKind::Dot);

        let mut audio = Recorder::default();
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        let e = &s.enemies[idx];
        assert_eq!(e.dot_timer, s.tuning.dot_duration);
        assert_eq!(e.dot_damage, 20.0 * s.tuning.dot_damage_factor);
        assert_eq!(e.health, 80.0);
        assert!(s.projectiles.is_empty());

        run(&mut s, &TickInput::default(), 1.0);
        let lost = 80.0 - s.enemies[idx].health;
        assert!((lost - 20.0 * s.tuning.dot_damage_factor).abs() < 0.1, "lost {lost}");
    }

    #[test]
    fn test_explosive_splashes_neighbours_only() {
        let mut s = state();
        let target = Vec2::new(300.0, 300.0);
        let hit = park_enemy(&mut s, target, 100.0);
        let near = park_enemy(&mut s, target + Vec2::new(0.0, 40.0), 100.0);
        let far = park_enemy(&mut s, target + Vec2::new(0.0, -90.0), 100.0);
        shoot_at(&mut s, target, ProjectileKind::Explosive);

        let mut audio = Recorder::default();
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(s.enemies[hit].health, 80.0);
        assert_eq!(s.enemies[near].health, 90.0);
        assert_eq!(s.enemies[far].health, 100.0);
        assert_eq!(audio.count(SoundEffect::Explosion), 1);
        assert_eq!(s.stats.projectiles_hit, 1);
    }

    #[test]
    fn test_pierce_damages_each_enemy_once() {
        let mut s = state();
        let target = Vec2::new(300.0, 300.0);
        let idx = park_enemy(&mut s, target, 100.0);
        shoot_at(&mut s, target, ProjectileKind::Pierce);
        // Slow it down so it stays in contact for several ticks
        s.projectiles[0].vel = Vec2::new(60.0, 0.0);
        s.tuning.projectile_gravity = 0.0;

        run(&mut s, &TickInput::default(), 0.1);
        assert_eq!(s.enemies[idx].health, 80.0);
        assert_eq!(s.stats.projectiles_hit, 1);
        assert_eq!(s.projectiles.len(), 1);
    }

    #[test]
    fn test_heal_hit_restores_player() {
        let mut s = state();
        s.player.health = 50.0;
        let target = Vec2::new(300.0, 300.0);
        park_enemy(&mut s, target, 100.0);
        shoot_at(&mut s, target, ProjectileKind::Heal);

        let mut audio = Recorder::default();
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(s.player.health, 50.0 + s.tuning.hit_heal);
    }

    #[test]
    fn test_killed_enemy_culled_next_tick() {
        let mut s = state();
        let target = Vec2::new(300.0, 300.0);
        park_enemy(&mut s, target, 10.0);
        shoot_at(&mut s, target, ProjectileKind::None);

        let mut audio = Recorder::default();
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(s.enemies.len(), 1);
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert!(s.enemies.is_empty());
        assert_eq!(s.stats.enemies_killed, 1);
        assert_eq!(audio.count(SoundEffect::EnemyDeath), 1);
        assert!(!s.effects.particles.is_empty());
    }

    #[test]
    fn test_contact_cooldown_is_global() {
        let mut s = state();
        let pos = s.player.pos;
        park_enemy(&mut s, pos + Vec2::new(5.0, 0.0), 100.0);
        park_enemy(&mut s, pos - Vec2::new(5.0, 0.0), 100.0);
        s.tuning.enemy_speed = 0.0;
        for e in &mut s.enemies {
            e.speed = 0.0;
        }

        let mut audio = Recorder::default();
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(s.stats.player_collisions, 1);
        assert_eq!(s.player.health, s.player.max_health - CONTACT_DAMAGE);

        // Still overlapping, but inside the cooldown
        run(&mut s, &TickInput::default(), 0.2);
        assert_eq!(s.stats.player_collisions, 1);
    }

    #[test]
    fn test_fire_is_rate_limited() {
        let mut s = state();
        let input = TickInput {
            fire: true,
            aim: Vec2::new(0.0, 0.0),
            ..Default::default()
        };
        let mut audio = Recorder::default();
        tick(&mut s, &input, SIM_DT, &mut audio);
        tick(&mut s, &input, SIM_DT, &mut audio);
        assert_eq!(s.stats.projectiles_fired, 1);
        assert_eq!(audio.count(SoundEffect::Shoot), 1);

        let delay = s.tuning.fire_delay;
        run(&mut s, &TickInput::default(), delay);
        tick(&mut s, &input, SIM_DT, &mut audio);
        assert_eq!(s.stats.projectiles_fired, 2);
    }

    #[test]
    fn test_enemies_spawn_on_interval() {
        let mut s = state();
        let interval = s.tuning.enemy_spawn_interval;
        run(&mut s, &TickInput::default(), interval * 2.5);
        assert_eq!(s.enemies.len(), 2);
    }

    #[test]
    fn test_tick_pause() {
        let mut s = state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let mut audio = Recorder::default();
        tick(&mut s, &pause, SIM_DT, &mut audio);
        assert_eq!(s.phase, CombatPhase::Paused);

        // Nothing moves while paused
        run(&mut s, &TickInput::default(), 5.0);
        assert_eq!(s.time, 0.0);
        assert!(s.enemies.is_empty());

        tick(&mut s, &pause, SIM_DT, &mut audio);
        assert_eq!(s.phase, CombatPhase::Playing);
        assert!(s.time > 0.0);
    }

    #[test]
    fn test_game_over_then_restart_resets_everything() {
        let mut s = state();
        s.spawn_enemy_at(Side::Left);
        s.spawn_projectile(Vec2::new(0.0, -100.0), ProjectileKind::None);
        s.stats.enemies_killed = 4;
        s.stats.player_collisions = 2;
        s.stats.projectiles_hit = 3;
        s.effects
            .burst(&mut s.rng, Vec2::new(400.0, 400.0), Tint::Death, bursts::DEATH);
        s.effects.damage_number(Vec2::new(400.0, 380.0), 20.0);
        s.player.health = 0.0;

        let mut audio = Recorder::default();
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(s.phase, CombatPhase::GameOver);
        assert_eq!(audio.count(SoundEffect::GameOver), 1);
        assert!(!s.effects.particles.is_empty());
        assert!(!s.effects.damage_texts.is_empty());

        // Frozen in game over
        tick(&mut s, &TickInput::default(), SIM_DT, &mut audio);
        assert_eq!(s.phase, CombatPhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut s, &restart, SIM_DT, &mut audio);
        assert_eq!(s.phase, CombatPhase::Playing);
        assert_eq!(s.player.health, s.player.max_health);
        assert!(s.enemies.is_empty());
        assert!(s.projectiles.is_empty());
        assert!(s.effects.is_empty());
        assert!(s.stats.is_empty());
        assert_eq!(s.stats.hit_accuracy_percent, 0.0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut s = state();
        s.stats.enemies_killed = 3;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let mut audio = Recorder::default();
        tick(&mut s, &restart, SIM_DT, &mut audio);
        assert_eq!(s.stats.enemies_killed, 3);
    }

    #[test]
    fn test_determinism() {
        let mut a = CombatState::new(99999, Tuning::default());
        let mut b = CombatState::new(99999, Tuning::default());
        let inputs = [
            TickInput {
                fire: true,
                aim: Vec2::new(100.0, 100.0),
                right: true,
                ..Default::default()
            },
            TickInput {
                fly: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut audio = Recorder::default();
        for _ in 0..400 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT, &mut audio);
                tick(&mut b, input, SIM_DT, &mut audio);
            }
        }
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn test_absorb_keeps_edges_until_consumed() {
        let mut pending = TickInput {
            fire: true,
            aim: Vec2::new(10.0, 20.0),
            dash: true,
            ..Default::default()
        };
        pending.absorb(&TickInput {
            right: true,
            aim: Vec2::new(500.0, 500.0),
            ..Default::default()
        });
        assert!(pending.fire && pending.dash && pending.right);
        assert_eq!(pending.aim, Vec2::new(10.0, 20.0));

        // Two pause presses before a tick cancel out
        pending.absorb(&TickInput {
            pause: true,
            ..Default::default()
        });
        pending.absorb(&TickInput {
            pause: true,
            ..Default::default()
        });
        assert!(!pending.pause);
        assert!(!pending.right);

        let held = pending.held_only();
        assert!(!held.fire && !held.dash);
    }
}
