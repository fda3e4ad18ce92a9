//! Intro: pulsing title, then a warp into the main menu
//!
//! A key press after the skip guard (or the auto-warp timer) starts the
//! warp; the transition fires once, when the warp finishes.

use glam::Vec2;

use super::{Context, MenuKey, Payload, Screen, Transition};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::input::{FrameInput, InputEvent};
use crate::renderer::{Align, Surface, colors};

const TITLE: &str = "PROJECTILE COMBAT";
const TITLE_SIZE: f32 = 96.0;
/// Horizontal slices the title is cut into while warping
const WARP_SLICES: usize = 12;

#[derive(Debug, Clone, Default)]
pub struct IntroScreen {
    pub timer: f32,
    pub hyperspace: bool,
    pub hyperspace_timer: f32,
    done: bool,
}

impl IntroScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_warp(&mut self, ctx: &mut Context) {
        if !self.hyperspace {
            self.hyperspace = true;
            self.hyperspace_timer = 0.0;
            ctx.audio.play(SoundEffect::Warp);
        }
    }

    /// Warp progress 0-1
    fn warp_power(&self) -> f32 {
        (self.hyperspace_timer / HYPERSPACE_DURATION).clamp(0.0, 1.0)
    }
}

impl Screen for IntroScreen {
    fn enter(&mut self, _payload: Payload, _ctx: &mut Context) {
        *self = Self::default();
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut Context) -> Transition {
        if matches!(event, InputEvent::KeyDown(_)) && self.timer > INTRO_SKIP_GUARD {
            self.start_warp(ctx);
        }
        Transition::Stay
    }

    fn update(&mut self, dt: f32, _input: &FrameInput, ctx: &mut Context) -> Transition {
        if self.done {
            return Transition::Stay;
        }
        self.timer += dt;

        if self.timer >= INTRO_AUTO_WARP {
            self.start_warp(ctx);
        }

        if self.hyperspace {
            self.hyperspace_timer += dt;
            if self.hyperspace_timer >= HYPERSPACE_DURATION {
                self.done = true;
                return Transition::Change(MenuKey::MainMenu, Payload::None);
            }
        }
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);

        if !self.hyperspace {
            let pulse = (self.timer * 1.5).sin() * 20.0;
            let alpha = ((200.0 + pulse) / 255.0).clamp(0.0, 1.0);
            surface.text(
                center,
                TITLE,
                TITLE_SIZE,
                colors::with_alpha(colors::WHITE, alpha),
                Align::Center,
            );
            if self.timer > INTRO_SKIP_GUARD {
                surface.text(
                    Vec2::new(center.x, ARENA_HEIGHT - 80.0),
                    "Press any key to skip",
                    24.0,
                    colors::rgb(120, 120, 120),
                    Align::Center,
                );
            }
            return;
        }

        // Title smeared sideways in wavy slices, stretched as the warp builds
        let power = self.warp_power();
        let strength = 70.0 * power;
        let slice_h = TITLE_SIZE / WARP_SLICES as f32;
        let scale = 1.0 + power * 0.8;
        for i in 0..WARP_SLICES {
            let y = i as f32 * slice_h;
            let offset = (y * 0.15 + self.hyperspace_timer * 25.0).sin() * strength;
            let row = Vec2::new(center.x + offset, center.y - TITLE_SIZE / 2.0 + y);
            surface.line(
                row - Vec2::new(TITLE_SIZE * 4.0 * scale, 0.0),
                row + Vec2::new(TITLE_SIZE * 4.0 * scale, 0.0),
                slice_h * 0.6,
                colors::with_alpha(colors::TITLE, 1.0 - power * 0.5),
            );
        }

        // Fade to black
        let fade = (self.hyperspace_timer * 180.0 / 255.0).min(1.0);
        surface.rect(
            Vec2::ZERO,
            Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            colors::with_alpha(colors::BLACK, fade),
        );
    }

    fn warping(&self) -> bool {
        self.hyperspace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Recorder;
    use crate::input::Key;
    use crate::settings::Settings;
    use crate::tuning::Tuning;
    use std::path::Path;

    const DT: f32 = 1.0 / 144.0;

    fn run(intro: &mut IntroScreen, seconds: f32, audio: &mut Recorder) -> usize {
        let mut settings = Settings::default();
        let tuning = Tuning::default();
        let mut ctx = Context {
            settings: &mut settings,
            settings_path: Path::new("unused.json"),
            tuning: &tuning,
            audio,
        };
        let mut transitions = 0;
        for _ in 0..(seconds / DT) as usize {
            if intro.update(DT, &FrameInput::default(), &mut ctx) != Transition::Stay {
                transitions += 1;
            }
        }
        transitions
    }

    fn press(intro: &mut IntroScreen, audio: &mut Recorder) {
        let mut settings = Settings::default();
        let tuning = Tuning::default();
        let mut ctx = Context {
            settings: &mut settings,
            settings_path: Path::new("unused.json"),
            tuning: &tuning,
            audio,
        };
        intro.handle_input(&InputEvent::KeyDown(Key::Other), &mut ctx);
    }

    #[test]
    fn test_auto_advances_exactly_once() {
        let mut intro = IntroScreen::new();
        let mut audio = Recorder::default();
        assert_eq!(run(&mut intro, 4.5, &mut audio), 0);
        assert!(intro.warping());
        assert_eq!(run(&mut intro, 3.0, &mut audio), 1);
        assert_eq!(audio.count(SoundEffect::Warp), 1);
    }

    #[test]
    fn test_key_before_guard_is_ignored() {
        let mut intro = IntroScreen::new();
        let mut audio = Recorder::default();
        run(&mut intro, 1.0, &mut audio);
        press(&mut intro, &mut audio);
        assert!(!intro.warping());
    }

    #[test]
    fn test_key_after_guard_warps_then_advances_once() {
        let mut intro = IntroScreen::new();
        let mut audio = Recorder::default();
        run(&mut intro, 2.5, &mut audio);
        press(&mut intro, &mut audio);
        assert!(intro.warping());
        // A second press does not restart the warp
        run(&mut intro, 0.5, &mut audio);
        press(&mut intro, &mut audio);
        assert!(intro.hyperspace_timer > 0.4);

        assert_eq!(run(&mut intro, 2.0, &mut audio), 1);
    }

    #[test]
    fn test_enter_resets() {
        let mut intro = IntroScreen::new();
        let mut audio = Recorder::default();
        run(&mut intro, 6.0, &mut audio);
        let mut settings = Settings::default();
        let tuning = Tuning::default();
        let mut ctx = Context {
            settings: &mut settings,
            settings_path: Path::new("unused.json"),
            tuning: &tuning,
            audio: &mut audio,
        };
        intro.enter(Payload::None, &mut ctx);
        assert_eq!(intro.timer, 0.0);
        assert!(!intro.warping());
    }
}
