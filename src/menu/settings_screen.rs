//! Settings: cycle graphics quality, toggle sound, back to the menu
//!
//! Changes apply immediately and are written to disk on leaving.

use glam::Vec2;

use super::{Command, Context, MenuKey, Payload, Screen, Transition, checked};
use crate::consts::*;
use crate::input::{FrameInput, InputEvent, MouseButton};
use crate::renderer::{Align, Surface, colors};
use crate::settings::Settings;
use crate::ui::{Button, DEFAULT_FONT_SIZE};

const GRAPHICS: usize = 0;
const AUDIO: usize = 1;

pub struct SettingsScreen {
    buttons: Vec<Button<Command>>,
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsScreen {
    pub fn new() -> Self {
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        let buttons = vec![
            Button::new("Graphics", center - Vec2::new(0.0, 100.0), DEFAULT_FONT_SIZE)
                .with_action(|| Ok(Command::CycleQuality)),
            Button::new("Audio", center, DEFAULT_FONT_SIZE).with_action(|| Ok(Command::ToggleMute)),
            Button::new("Back", center + Vec2::new(0.0, 100.0), DEFAULT_FONT_SIZE)
                .with_action(|| Ok(Command::Goto(MenuKey::MainMenu))),
        ];
        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button<Command>] {
        &self.buttons
    }

    /// Button labels show the current values
    fn refresh_labels(&mut self, settings: &Settings) {
        self.buttons[GRAPHICS].label = format!("Graphics: {}", settings.quality.as_str());
        self.buttons[AUDIO].label = format!("Audio: {}", if settings.muted { "Off" } else { "On" });
    }

    fn run(&mut self, command: Command, ctx: &mut Context) -> Transition {
        match command {
            Command::CycleQuality => {
                ctx.settings.quality = ctx.settings.quality.next();
                log::info!("Graphics quality: {}", ctx.settings.quality.as_str());
            }
            Command::ToggleMute => {
                ctx.settings.muted = !ctx.settings.muted;
                log::info!("Muted: {}", ctx.settings.muted);
            }
            Command::Goto(_) | Command::Quit => {}
        }
        self.refresh_labels(ctx.settings);
        command.into()
    }
}

impl Screen for SettingsScreen {
    fn enter(&mut self, _payload: Payload, ctx: &mut Context) {
        self.refresh_labels(ctx.settings);
    }

    fn exit(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        ctx.settings.save_to(ctx.settings_path)
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut Context) -> Transition {
        let InputEvent::MouseDown {
            button: MouseButton::Left,
            pos,
        } = *event
        else {
            return Transition::Stay;
        };
        let command = self
            .buttons
            .iter_mut()
            .find_map(|button| checked(button.click_at(pos, ctx.audio)));
        match command {
            Some(command) => self.run(command, ctx),
            None => Transition::Stay,
        }
    }

    fn update(&mut self, dt: f32, input: &FrameInput, ctx: &mut Context) -> Transition {
        for button in &mut self.buttons {
            button.update(dt, input.pointer, ctx.audio);
        }
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.text(
            Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 4.0),
            "Settings",
            72.0,
            colors::WHITE,
            Align::Center,
        );
        for button in &self.buttons {
            button.render(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Recorder;
    use crate::settings::QualityPreset;
    use crate::tuning::Tuning;

    #[test]
    fn test_buttons_change_settings_and_save_on_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        let tuning = Tuning::default();
        let mut audio = Recorder::default();
        let mut ctx = Context {
            settings: &mut settings,
            settings_path: &path,
            tuning: &tuning,
            audio: &mut audio,
        };

        let mut screen = SettingsScreen::new();
        screen.enter(Payload::None, &mut ctx);
        assert_eq!(screen.buttons()[GRAPHICS].label, "Graphics: Medium");

        let click = |pos| InputEvent::MouseDown {
            button: MouseButton::Left,
            pos,
        };
        let graphics = screen.buttons()[GRAPHICS].center;
        let audio_btn = screen.buttons()[AUDIO].center;
        let back = screen.buttons()[2].center;

        assert_eq!(screen.handle_input(&click(graphics), &mut ctx), Transition::Stay);
        assert_eq!(screen.handle_input(&click(audio_btn), &mut ctx), Transition::Stay);
        assert_eq!(ctx.settings.quality, QualityPreset::High);
        assert!(ctx.settings.muted);
        assert_eq!(screen.buttons()[AUDIO].label, "Audio: Off");

        assert_eq!(
            screen.handle_input(&click(back), &mut ctx),
            Transition::Change(MenuKey::MainMenu, Payload::None)
        );
        screen.exit(&mut ctx).unwrap();
        let saved = Settings::load_from(&path).unwrap();
        assert_eq!(saved.quality, QualityPreset::High);
        assert!(saved.muted);
    }

    #[test]
    fn test_exit_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("settings.json");
        let mut settings = Settings::default();
        let tuning = Tuning::default();
        let mut audio = Recorder::default();
        let mut ctx = Context {
            settings: &mut settings,
            settings_path: &path,
            tuning: &tuning,
            audio: &mut audio,
        };
        let mut screen = SettingsScreen::new();
        assert!(screen.exit(&mut ctx).is_err());
    }
}
