//! Projectile Combat - A side-view arena shooter
//!
//! Core modules:
//! - `sim`: Combat simulation (player/enemy/projectile physics, collisions, effects)
//! - `menu`: Screen state machine (intro warp, main menu, settings, playing)
//! - `renderer`: Abstract draw surface plus a CPU tessellating implementation
//! - `ui`: Animated widgets shared by the menu screens
//! - `tuning`: Data-driven game balance
//! - `stats`: End-of-run statistics and their persistence

pub mod app;
pub mod audio;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;
pub mod ui;

pub use app::App;
pub use settings::{QualityPreset, Settings};
pub use stats::Stats;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (144 Hz, matches the display pacing)
    pub const SIM_DT: f32 = 1.0 / 144.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host will feed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1920.0;
    pub const ARENA_HEIGHT: f32 = 1080.0;
    /// Ground is a maximum y (screen coordinates grow downward)
    pub const GROUND_LEVEL: f32 = ARENA_HEIGHT * 0.8;

    /// Projectiles die this far outside the arena
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Past positions kept per projectile
    pub const PROJECTILE_TRAIL_LENGTH: usize = 8;

    /// Explosive splash radius around the struck enemy
    pub const EXPLOSION_RADIUS: f32 = 50.0;

    /// Player-enemy contact
    pub const CONTACT_DAMAGE: f32 = 15.0;
    pub const CONTACT_COOLDOWN: f32 = 0.5;

    /// Player hit response
    pub const INVULNERABILITY_TIME: f32 = 0.4;
    pub const KNOCKBACK_SPEED: f32 = 400.0;
    /// Knockback loses this fraction per second
    pub const KNOCKBACK_DECAY: f32 = 6.0;
    /// Spacing between dash trail samples
    pub const DASH_TRAIL_SPACING: f32 = 6.0;

    /// Effect pool drag (fraction of velocity lost per second)
    pub const PARTICLE_DRAG: f32 = 3.0;
    pub const DAMAGE_TEXT_DRAG: f32 = 1.5;

    /// Intro screen timings (seconds)
    pub const INTRO_SKIP_GUARD: f32 = 2.0;
    pub const INTRO_AUTO_WARP: f32 = 4.0;
    pub const HYPERSPACE_DURATION: f32 = 1.0;

    /// Where end-of-run statistics are written
    pub const STATS_PATH: &str = "game_stats.json";
    /// Where player preferences are written
    pub const SETTINGS_PATH: &str = "settings.json";
    /// Optional balance override file
    pub const TUNING_PATH: &str = "tuning.json";
    /// Arena background image
    pub const BACKDROP_PATH: &str = "assets/background.png";
}
