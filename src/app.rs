//! Frame driver
//!
//! Owns the screens and shared services. The host calls [`App::frame`]
//! with this frame's events and delta, [`App::render`] into its surface,
//! and [`App::shutdown`] once when the loop ends.

use std::path::{Path, PathBuf};

use crate::audio::LoggingAudio;
use crate::consts::*;
use crate::input::{InputEvent, InputState};
use crate::menu::{
    Context, IntroScreen, MainMenuScreen, MenuKey, Payload, PlayingScreen, SettingsScreen,
    Starfield, StateManager,
};
use crate::renderer::{Backdrop, Surface, colors};
use crate::settings::Settings;
use crate::stats::Stats;
use crate::tuning::Tuning;

/// Files the app reads at startup and writes at shutdown
#[derive(Debug, Clone)]
pub struct Paths {
    pub settings: PathBuf,
    pub tuning: PathBuf,
    pub stats: PathBuf,
    pub backdrop: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

impl Paths {
    /// The standard file names under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            settings: dir.join(SETTINGS_PATH),
            tuning: dir.join(TUNING_PATH),
            stats: dir.join(STATS_PATH),
            backdrop: dir.join(BACKDROP_PATH),
        }
    }
}

pub struct App {
    input: InputState,
    manager: StateManager,
    audio: LoggingAudio,
    settings: Settings,
    tuning: Tuning,
    starfield: Starfield,
    paths: Paths,
    /// Most recent stats seen from a run, kept after leaving the run
    last_run: Option<Stats>,
}

impl App {
    pub fn new(seed: u64, paths: Paths) -> Self {
        let settings = Settings::load(&paths.settings);
        let tuning = Tuning::load_or_default(&paths.tuning);
        let backdrop = Backdrop::load_or_fallback(&paths.backdrop);

        let mut manager = StateManager::new();
        manager.register(MenuKey::Intro, Box::new(IntroScreen::new()));
        manager.register(MenuKey::MainMenu, Box::new(MainMenuScreen::new()));
        manager.register(MenuKey::Settings, Box::new(SettingsScreen::new()));
        manager.register(MenuKey::Playing, Box::new(PlayingScreen::new(seed, backdrop)));

        let mut app = Self {
            input: InputState::new(),
            manager,
            audio: LoggingAudio::new(settings.effective_volume()),
            settings,
            tuning,
            starfield: Starfield::new(seed),
            paths,
            last_run: None,
        };
        app.change_state(MenuKey::Intro, Payload::None);
        log::info!("App started (seed {seed})");
        app
    }

    /// Switch screens directly (host shortcuts such as the demo run)
    pub fn change_state(&mut self, key: MenuKey, payload: Payload) {
        let mut ctx = Context {
            settings: &mut self.settings,
            settings_path: &self.paths.settings,
            tuning: &self.tuning,
            audio: &mut self.audio,
        };
        self.manager.change_state(key, payload, &mut ctx);
    }

    pub fn current(&self) -> Option<MenuKey> {
        self.manager.current()
    }

    pub fn is_running(&self) -> bool {
        self.manager.running
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stats of the current or most recent run
    pub fn run_stats(&self) -> Option<&Stats> {
        self.manager
            .current_screen()
            .and_then(|screen| screen.run_stats())
            .or(self.last_run.as_ref())
    }

    fn starfield_visible(&self) -> bool {
        self.settings.quality.starfield_enabled()
            && self
                .manager
                .current_screen()
                .is_some_and(|screen| screen.shows_starfield())
    }

    /// Advance one frame. Returns false once the app wants to stop.
    pub fn frame(&mut self, events: &[InputEvent], dt: f32) -> bool {
        let input = self.input.begin_frame(events);
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        // Settings may have changed last frame
        self.audio.set_volume(self.settings.effective_volume());

        let mut ctx = Context {
            settings: &mut self.settings,
            settings_path: &self.paths.settings,
            tuning: &self.tuning,
            audio: &mut self.audio,
        };
        self.manager.update(dt, &input, &mut ctx);

        if let Some(stats) = self.manager.current_screen().and_then(|s| s.run_stats()) {
            self.last_run = Some(stats.clone());
        }

        if self.starfield_visible() {
            let warping = self
                .manager
                .current_screen()
                .is_some_and(|screen| screen.warping());
            self.starfield.update(dt, warping);
        }

        self.manager.running
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(colors::SPACE);
        if self.starfield_visible() {
            self.starfield.render(surface);
        }
        self.manager.render(surface);
    }

    /// Write the run's stats to disk
    pub fn save_stats(&self) -> anyhow::Result<()> {
        let stats = self.run_stats().cloned().unwrap_or_default();
        stats.save(&self.paths.stats)
    }

    /// Persist what needs persisting. Failures are logged, never fatal.
    pub fn shutdown(&mut self) {
        if self.manager.current() == Some(MenuKey::Settings) {
            if let Err(e) = self.settings.save_to(&self.paths.settings) {
                log::warn!("Failed to save settings: {e:#}");
            }
        }
        if let Err(e) = self.save_stats() {
            log::warn!("Failed to save stats: {e:#}");
        }
        log::info!("Shut down");
    }
}
