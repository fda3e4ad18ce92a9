//! Heads-up display: bars, dash indicator, stats, FPS and overlays
//!
//! Displayed values are smoothed in [`Hud::update`]; [`Hud::render`]
//! only reads.

use glam::Vec2;

use super::vertex::colors;
use super::{Align, Color, Surface};
use crate::consts::*;
use crate::geometry::approach;
use crate::sim::{CombatPhase, CombatState, Player};

/// Bars catch up with the real value at this rate
const SMOOTHING_RATE: f32 = 10.0;
/// FPS readout smoothing
const FPS_RATE: f32 = 4.0;

const BAR_WIDTH: f32 = 220.0;
const SMALL_TEXT: f32 = 24.0;
const MEDIUM_TEXT: f32 = 36.0;
const LARGE_TEXT: f32 = 72.0;

/// Green when healthy, amber when hurt, red when critical
pub fn health_color(fraction: f32) -> Color {
    if fraction > 0.6 {
        colors::GREEN
    } else if fraction > 0.3 {
        colors::AMBER
    } else {
        colors::RED
    }
}

pub fn fps_color(fps: f32) -> Color {
    if fps >= 60.0 {
        colors::GREEN
    } else if fps >= 30.0 {
        colors::YELLOW
    } else {
        colors::RED
    }
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub smooth_health: f32,
    pub smooth_stamina: f32,
    pub fps: f32,
    pub show_fps: bool,
}

impl Hud {
    pub fn new(show_fps: bool) -> Self {
        Self {
            smooth_health: 0.0,
            smooth_stamina: 0.0,
            fps: 0.0,
            show_fps,
        }
    }

    /// Jump straight to the player's values (new run)
    pub fn sync(&mut self, player: &Player) {
        self.smooth_health = player.health;
        self.smooth_stamina = player.stamina;
    }

    pub fn toggle_fps(&mut self) {
        self.show_fps = !self.show_fps;
    }

    /// `frame_dt` is the real frame time, used for the FPS readout
    pub fn update(&mut self, frame_dt: f32, player: &Player) {
        self.smooth_health = approach(self.smooth_health, player.health, SMOOTHING_RATE, frame_dt);
        self.smooth_stamina = approach(self.smooth_stamina, player.stamina, SMOOTHING_RATE, frame_dt);
        if frame_dt > 0.0 {
            let instant = 1.0 / frame_dt;
            self.fps = if self.fps <= 0.0 {
                instant
            } else {
                approach(self.fps, instant, FPS_RATE, frame_dt)
            };
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, state: &CombatState) {
        let player = &state.player;

        if self.show_fps {
            surface.text(
                Vec2::new(20.0, 20.0),
                &format!("FPS: {}", self.fps as i32),
                SMALL_TEXT,
                fps_color(self.fps),
                Align::Left,
            );
        }

        // Health
        let hp_fraction = (self.smooth_health / player.max_health).clamp(0.0, 1.0);
        surface.rect(Vec2::new(20.0, 50.0), Vec2::new(BAR_WIDTH, 22.0), colors::UI_BG);
        surface.rect(
            Vec2::new(20.0, 50.0),
            Vec2::new(BAR_WIDTH * hp_fraction, 22.0),
            health_color(hp_fraction),
        );
        surface.text(
            Vec2::new(25.0, 52.0),
            &format!("{} / {}", self.smooth_health as i32, player.max_health as i32),
            SMALL_TEXT,
            colors::WHITE,
            Align::Left,
        );

        // Stamina
        let st_fraction = if player.max_stamina > 0.0 {
            (self.smooth_stamina / player.max_stamina).clamp(0.0, 1.0)
        } else {
            0.0
        };
        surface.rect(Vec2::new(20.0, 80.0), Vec2::new(BAR_WIDTH, 18.0), colors::UI_BG);
        surface.rect(
            Vec2::new(20.0, 80.0),
            Vec2::new(BAR_WIDTH * st_fraction, 18.0),
            colors::STAMINA,
        );
        surface.text(
            Vec2::new(25.0, 82.0),
            &format!("Stamina: {}", player.stamina as i32),
            SMALL_TEXT,
            colors::WHITE,
            Align::Left,
        );

        self.render_dash(surface, state);
        self.render_stats(surface, state);
        self.render_overlay(surface, state.phase);
    }

    fn render_dash(&self, surface: &mut dyn Surface, state: &CombatState) {
        let center = Vec2::new(50.0, 120.0);
        let radius = 15.0;
        let readiness = state.player.dash_readiness(&state.tuning);

        if readiness < 1.0 {
            surface.circle(center, radius, colors::UI_BG);
            let start = -std::f32::consts::FRAC_PI_2;
            let end = start + std::f32::consts::TAU * readiness;
            surface.arc(center, radius - 1.5, 3.0, start, end, colors::WHITE);
            surface.text(
                center,
                &format!("{:.1}s", state.player.dash.cooldown),
                SMALL_TEXT * 0.75,
                colors::WHITE,
                Align::Center,
            );
        } else {
            surface.circle(center, radius, colors::GREEN);
            surface.text(center, "D", SMALL_TEXT, colors::WHITE, Align::Center);
        }
    }

    fn render_stats(&self, surface: &mut dyn Surface, state: &CombatState) {
        let stats = &state.stats;
        let lines = [
            format!("Kills: {}", stats.enemies_killed),
            format!("Accuracy: {:.1}%", stats.hit_accuracy_percent),
            format!("Projectiles: {}", stats.projectiles_fired),
            format!("Hits: {}", stats.projectiles_hit),
            format!("Collisions: {}", stats.player_collisions),
        ];
        for (i, line) in lines.iter().enumerate() {
            surface.text(
                Vec2::new(ARENA_WIDTH - 200.0, 50.0 + i as f32 * 25.0),
                line,
                SMALL_TEXT,
                colors::WHITE,
                Align::Left,
            );
        }
    }

    fn render_overlay(&self, surface: &mut dyn Surface, phase: CombatPhase) {
        let screen = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let center = screen / 2.0;
        match phase {
            CombatPhase::Playing => {}
            CombatPhase::Paused => {
                surface.rect(Vec2::ZERO, screen, colors::OVERLAY_PAUSE);
                surface.text(center, "PAUSED", LARGE_TEXT, colors::WHITE, Align::Center);
            }
            CombatPhase::GameOver => {
                surface.rect(Vec2::ZERO, screen, colors::OVERLAY_GAME_OVER);
                surface.text(
                    center - Vec2::new(0.0, 50.0),
                    "GAME OVER",
                    LARGE_TEXT,
                    colors::RED,
                    Align::Center,
                );
                surface.text(
                    center + Vec2::new(0.0, 150.0),
                    "Press R to restart",
                    MEDIUM_TEXT,
                    colors::GREEN,
                    Align::Center,
                );
            }
        }
    }
}
