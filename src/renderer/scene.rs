//! Draws the combat arena from a read-only view of the state

use glam::Vec2;

use super::vertex::colors::{self, lerp, with_alpha};
use super::{Align, Color, Surface};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{CombatState, Enemy, Fading, Player, ProjectileKind, Tint};

/// Each projectile kind has its own color
pub fn kind_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Pierce => colors::PURPLE,
        ProjectileKind::Dot => colors::GREEN,
        ProjectileKind::Slow | ProjectileKind::None => colors::WHITE,
        ProjectileKind::Explosive => colors::RED,
        ProjectileKind::Heal => colors::YELLOW,
    }
}

pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Hit => colors::HIT_PARTICLES,
        Tint::Death => colors::DEATH_PARTICLES,
        Tint::Explosion => colors::EXPLOSION,
    }
}

/// Everything inside the arena, back to front (the HUD goes on top)
pub fn draw_combat(surface: &mut dyn Surface, state: &CombatState, settings: &Settings) {
    let ground_top = GROUND_LEVEL + state.player.radius;
    surface.rect(
        Vec2::new(0.0, ground_top),
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT - ground_top),
        with_alpha(colors::GROUND, 0.6),
    );

    if settings.trails {
        draw_dash_trail(surface, &state.player, state.tuning.dash_trail_lifetime);
    }

    if settings.particles {
        for p in &state.effects.particles {
            surface.circle(p.pos, p.radius, with_alpha(tint_color(p.tint), p.life_fraction()));
        }
    }

    for t in &state.effects.damage_texts {
        surface.text(
            t.pos,
            &t.text,
            24.0,
            with_alpha(colors::DAMAGE_TEXT, t.life_fraction()),
            Align::Center,
        );
    }

    for projectile in &state.projectiles {
        let color = kind_color(projectile.kind);
        if settings.trails {
            surface.trail(&projectile.trail, projectile.radius, color);
        }
        surface.circle(projectile.pos, projectile.radius, color);
    }

    for enemy in &state.enemies {
        draw_enemy(surface, enemy);
    }

    draw_player(surface, &state.player);
}

fn draw_dash_trail(surface: &mut dyn Surface, player: &Player, lifetime: f32) {
    if lifetime <= 0.0 {
        return;
    }
    for point in &player.trail {
        let alpha = point.alpha * (point.life / lifetime).clamp(0.0, 1.0) * 0.5;
        surface.circle(point.pos, player.radius, with_alpha(colors::PLAYER, alpha));
    }
}

fn draw_enemy(surface: &mut dyn Surface, enemy: &Enemy) {
    let mut color = lerp(colors::ENEMY, colors::WHITE, enemy.flash_amount());
    if enemy.slow_timer > 0.0 {
        color = lerp(color, colors::STAMINA, 0.4);
    }
    surface.circle(enemy.pos, enemy.radius, color);
    if enemy.dot_timer > 0.0 {
        surface.ring(enemy.pos, enemy.radius + 3.0, 2.0, with_alpha(colors::GREEN, 0.7));
    }

    // Health bar
    let width = enemy.radius * 2.0;
    let top_left = enemy.pos - Vec2::new(enemy.radius, enemy.radius + 8.0);
    surface.rect(top_left, Vec2::new(width, 4.0), colors::UI_BG);
    surface.rect(
        top_left,
        Vec2::new(width * enemy.health_fraction(), 4.0),
        colors::GREEN,
    );
}

fn draw_player(surface: &mut dyn Surface, player: &Player) {
    // Blink while invulnerable
    let blink = player.invulnerability > 0.0 && (player.invulnerability * 20.0) as i32 % 2 == 0;
    let alpha = if blink { 0.35 } else { 1.0 };
    surface.circle(player.pos, player.radius, with_alpha(colors::PLAYER, alpha));
    if !player.is_grounded() {
        // Thruster flame under the player while airborne
        let base = player.pos + Vec2::new(0.0, player.radius);
        surface.line(base, base + Vec2::new(0.0, 10.0), 6.0, with_alpha(colors::STAMINA, 0.7));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::Side;
    use crate::tuning::Tuning;

    #[test]
    fn test_draws_entities_and_damage_numbers() {
        let mut state = CombatState::new(5, Tuning::default());
        state.spawn_enemy_at(Side::Left);
        state.spawn_projectile(Vec2::new(100.0, 0.0), ProjectileKind::Dot);
        state.effects.damage_number(Vec2::new(50.0, 50.0), 20.0);

        let mut batch = VertexBatch::new();
        draw_combat(&mut batch, &state, &Settings::default());
        assert!(batch.triangle_count() > 0);
        assert_eq!(batch.texts().len(), 1);
        assert_eq!(batch.texts()[0].text, "20");
    }

    #[test]
    fn test_particles_hidden_when_disabled() {
        let mut state = CombatState::new(5, Tuning::default());
        let mut rng = state.rng.clone();
        state
            .effects
            .burst(&mut rng, Vec2::new(200.0, 200.0), Tint::Hit, (50, 100.0, 1.0));

        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut without = VertexBatch::new();
        draw_combat(&mut without, &state, &settings);
        let mut with = VertexBatch::new();
        draw_combat(&mut with, &state, &Settings::default());
        assert!(with.triangle_count() > without.triangle_count());
    }

    #[test]
    fn test_every_kind_has_a_color() {
        for kind in ProjectileKind::PALETTE {
            assert_eq!(kind_color(kind)[3], 1.0);
        }
        assert_ne!(kind_color(ProjectileKind::Pierce), kind_color(ProjectileKind::Heal));
    }
}
