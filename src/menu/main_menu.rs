//! Main menu: Play, Settings, Quit, plus a summary of the last run

use glam::Vec2;

use super::{Command, Context, MenuKey, Payload, Screen, Transition, checked};
use crate::consts::*;
use crate::input::{FrameInput, InputEvent, MouseButton};
use crate::renderer::{Align, Surface, colors};
use crate::stats::Stats;
use crate::ui::{Button, DEFAULT_FONT_SIZE};

pub struct MainMenuScreen {
    buttons: Vec<Button<Command>>,
    pub last_run: Option<Stats>,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        let buttons = vec![
            Button::new("Play", center - Vec2::new(0.0, 100.0), DEFAULT_FONT_SIZE)
                .with_action(|| Ok(Command::Goto(MenuKey::Playing))),
            Button::new("Settings", center, DEFAULT_FONT_SIZE)
                .with_action(|| Ok(Command::Goto(MenuKey::Settings))),
            Button::new("Quit", center + Vec2::new(0.0, 100.0), DEFAULT_FONT_SIZE)
                .with_action(|| Ok(Command::Quit)),
        ];
        Self {
            buttons,
            last_run: None,
        }
    }

    pub fn buttons(&self) -> &[Button<Command>] {
        &self.buttons
    }
}

impl Screen for MainMenuScreen {
    fn enter(&mut self, payload: Payload, _ctx: &mut Context) {
        if let Payload::Stats(stats) = payload {
            self.last_run = Some(stats);
        }
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut Context) -> Transition {
        let InputEvent::MouseDown {
            button: MouseButton::Left,
            pos,
        } = *event
        else {
            return Transition::Stay;
        };
        for button in &mut self.buttons {
            if let Some(command) = checked(button.click_at(pos, ctx.audio)) {
                return command.into();
            }
        }
        Transition::Stay
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
            "Main Menu",
            72.0,
            colors::WHITE,
            Align::Center,
        );
        for button in &self.buttons {
            button.render(surface);
        }

        if let Some(stats) = &self.last_run {
            let lines = [
                "Last run".to_string(),
                format!("Kills: {}", stats.enemies_killed),
                format!("Accuracy: {:.1}%", stats.hit_accuracy_percent),
                format!("Collisions: {}", stats.player_collisions),
            ];
            for (i, line) in lines.iter().enumerate() {
                surface.text(
                    Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT * 0.75 + i as f32 * 28.0),
                    line,
                    24.0,
                    colors::rgb(180, 180, 180),
                    Align::Center,
                );
            }
        }
    }
}
