//! Combat simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod effects;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use effects::{DamageText, Effects, Fading, Particle, Tint};
pub use enemy::Enemy;
pub use player::{Player, PlayerControls, TrailPoint};
pub use projectile::{Projectile, ProjectileKind};
pub use state::{CombatPhase, CombatState, MAX_PARTICLES, Side};
pub use tick::{TickInput, tick};
