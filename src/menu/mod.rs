//! Screen state machine
//!
//! Exactly one screen is current. Screens never switch themselves: they
//! return a [`Transition`] and the [`StateManager`] performs it, calling
//! `exit` on the outgoing screen and `enter` on the incoming one.

pub mod intro;
pub mod main_menu;
pub mod playing;
pub mod settings_screen;
pub mod starfield;

use std::collections::HashMap;
use std::path::Path;

use crate::audio::AudioSink;
use crate::input::{FrameInput, InputEvent};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::stats::Stats;
use crate::tuning::Tuning;

pub use intro::IntroScreen;
pub use main_menu::MainMenuScreen;
pub use playing::PlayingScreen;
pub use settings_screen::SettingsScreen;
pub use starfield::Starfield;

/// Registered screen identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKey {
    Intro,
    MainMenu,
    Settings,
    Playing,
}

/// Data handed to a screen as it becomes current
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    /// Results of the run that just ended
    Stats(Stats),
    /// Start a run driven by the demo AI
    Autopilot,
}

/// What the manager should do after a screen call
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Transition {
    #[default]
    Stay,
    Change(MenuKey, Payload),
    Quit,
}

/// Result of a menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Goto(MenuKey),
    Quit,
    CycleQuality,
    ToggleMute,
}

impl From<Command> for Transition {
    fn from(command: Command) -> Self {
        match command {
            Command::Goto(key) => Transition::Change(key, Payload::None),
            Command::Quit => Transition::Quit,
            // Handled by the screen that owns the button
            Command::CycleQuality | Command::ToggleMute => Transition::Stay,
        }
    }
}

/// Shared services lent to screens for the duration of one call
pub struct Context<'a> {
    pub settings: &'a mut Settings,
    pub settings_path: &'a Path,
    pub tuning: &'a Tuning,
    pub audio: &'a mut dyn AudioSink,
}

/// Contract every screen implements
pub trait Screen {
    fn enter(&mut self, payload: Payload, ctx: &mut Context);

    fn exit(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }

    fn handle_input(&mut self, _event: &InputEvent, _ctx: &mut Context) -> Transition {
        Transition::Stay
    }

    fn update(&mut self, dt: f32, input: &FrameInput, ctx: &mut Context) -> Transition;

    fn render(&self, surface: &mut dyn Surface);

    /// The intro's warp sub-phase drives the starfield
    fn warping(&self) -> bool {
        false
    }

    /// Screens with their own backdrop hide the starfield
    fn shows_starfield(&self) -> bool {
        true
    }

    /// Stats of a run in progress, if this screen hosts one
    fn run_stats(&self) -> Option<&Stats> {
        None
    }
}

/// Check a button's outcome, logging failed actions
pub fn checked(outcome: Option<anyhow::Result<Command>>) -> Option<Command> {
    match outcome? {
        Ok(command) => Some(command),
        Err(e) => {
            log::warn!("Button action failed: {e:#}");
            None
        }
    }
}

pub struct StateManager {
    screens: HashMap<MenuKey, Box<dyn Screen>>,
    current: Option<MenuKey>,
    pub running: bool,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
            running: true,
        }
    }

    pub fn register(&mut self, key: MenuKey, screen: Box<dyn Screen>) {
        self.screens.insert(key, screen);
    }

    pub fn current(&self) -> Option<MenuKey> {
        self.current
    }

    pub fn current_screen(&self) -> Option<&dyn Screen> {
        self.current
            .and_then(|key| self.screens.get(&key))
            .map(|screen| screen.as_ref())
    }

    fn current_screen_mut(&mut self) -> Option<&mut Box<dyn Screen>> {
        let key = self.current?;
        self.screens.get_mut(&key)
    }

    /// Exit the current screen (errors are logged) and enter `key`.
    ///
    /// An unregistered key leaves no current screen.
    pub fn change_state(&mut self, key: MenuKey, payload: Payload, ctx: &mut Context) {
        if let Some(screen) = self.current_screen_mut() {
            if let Err(e) = screen.exit(ctx) {
                log::warn!("Error leaving {:?}: {e:#}", self.current);
            }
        }

        match self.screens.get_mut(&key) {
            Some(screen) => {
                log::info!("Screen {:?} -> {:?}", self.current, key);
                self.current = Some(key);
                screen.enter(payload, ctx);
            }
            None => {
                log::warn!("No screen registered for {key:?}");
                self.current = None;
            }
        }
    }

    fn apply(&mut self, transition: Transition, ctx: &mut Context) -> bool {
        match transition {
            Transition::Stay => false,
            Transition::Change(key, payload) => {
                self.change_state(key, payload, ctx);
                true
            }
            Transition::Quit => {
                log::info!("Quit requested");
                self.running = false;
                true
            }
        }
    }

    /// Dispatch this frame's events, then update the current screen.
    ///
    /// Once a screen asks for a transition, the rest of the frame's
    /// events and its update are not delivered to the new screen.
    pub fn update(&mut self, dt: f32, input: &FrameInput, ctx: &mut Context) {
        if input.quit_requested {
            self.running = false;
            return;
        }

        for event in &input.events {
            let Some(screen) = self.current_screen_mut() else {
                return;
            };
            let transition = screen.handle_input(event, ctx);
            if self.apply(transition, ctx) {
                return;
            }
        }

        if let Some(screen) = self.current_screen_mut() {
            let transition = screen.update(dt, input, ctx);
            self.apply(transition, ctx);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if let Some(screen) = self.current_screen() {
            screen.render(surface);
        }
    }
}
