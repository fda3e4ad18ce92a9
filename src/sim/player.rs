//! The player character: walk, dash, fly, take hits

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geometry::normalize;
use crate::tuning::Tuning;

/// Held/pressed controls relevant to the player for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerControls {
    pub left: bool,
    pub right: bool,
    /// Dash key went down this tick
    pub dash_pressed: bool,
    pub fly: bool,
}

/// A fading afterimage left behind while dashing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Seconds until this sample disappears
    pub life: f32,
    /// Starting opacity (0-1), scaled by remaining life when drawn
    pub alpha: f32,
}

/// Dash state machine
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dash {
    pub active: bool,
    /// -1 left, 0 in place, 1 right
    pub direction: i8,
    /// Seconds since the current dash began
    pub elapsed: f32,
    /// Seconds until another dash is allowed
    pub cooldown: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Only the vertical component is used
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
    /// Damage is ignored while this is positive
    pub invulnerability: f32,
    /// Push velocity from the last hit, decays every tick
    pub knockback: Vec2,
    pub dash: Dash,
    pub stamina: f32,
    pub max_stamina: f32,
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, GROUND_LEVEL),
            vel: Vec2::ZERO,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            radius: tuning.player_radius,
            invulnerability: 0.0,
            knockback: Vec2::ZERO,
            dash: Dash::default(),
            stamina: tuning.max_stamina,
            max_stamina: tuning.max_stamina,
            trail: Vec::new(),
        }
    }

    /// Advance one tick. Returns true if a dash started this tick.
    pub fn update(&mut self, dt: f32, controls: &PlayerControls, tuning: &Tuning) -> bool {
        self.walk(dt, controls, tuning);
        let dashed = self.try_dash(controls, tuning);
        self.advance_dash(dt, tuning);
        self.fly(dt, controls.fly, tuning);
        self.integrate(dt);
        self.update_trail(dt, tuning);
        self.enforce_boundaries();
        dashed
    }

    /// Constant lateral speed from the held keys (ignored while dashing)
    pub fn walk(&mut self, dt: f32, controls: &PlayerControls, tuning: &Tuning) {
        if self.dash.active {
            return;
        }
        if controls.right {
            self.pos.x += tuning.player_speed * dt;
        }
        if controls.left {
            self.pos.x -= tuning.player_speed * dt;
        }
    }

    /// Start a dash on a fresh press once the cooldown has elapsed
    pub fn try_dash(&mut self, controls: &PlayerControls, tuning: &Tuning) -> bool {
        if !controls.dash_pressed || self.dash.active || self.dash.cooldown > 0.0 {
            return false;
        }
        self.dash.direction = if controls.right {
            1
        } else if controls.left {
            -1
        } else {
            0
        };
        self.dash.active = true;
        self.dash.elapsed = 0.0;
        self.dash.cooldown = tuning.dash_cooldown;
        true
    }

    /// Move at dash speed in the locked direction until the dash expires
    pub fn advance_dash(&mut self, dt: f32, tuning: &Tuning) {
        if !self.dash.active {
            return;
        }
        self.pos.x += self.dash.direction as f32 * tuning.dash_speed * dt;
        self.dash.elapsed += dt;
        if self.dash.elapsed >= tuning.dash_duration {
            self.dash.active = false;
        }
    }

    /// Lift while the fly key is held and stamina remains, otherwise fall
    pub fn fly(&mut self, dt: f32, held: bool, tuning: &Tuning) {
        if held && self.stamina > 0.0 {
            self.vel.y = -tuning.fly_lift;
            self.stamina -= tuning.stamina_use * dt;
        } else {
            self.vel.y += tuning.gravity * dt;
            if self.is_grounded() {
                self.stamina += tuning.stamina_regen * dt;
            }
        }
        self.stamina = self.stamina.clamp(0.0, self.max_stamina);
    }

    /// Apply velocity and knockback, run down the timers
    pub fn integrate(&mut self, dt: f32) {
        self.pos.y += self.vel.y * dt;

        self.pos += self.knockback * dt;
        self.knockback *= (1.0 - KNOCKBACK_DECAY * dt).max(0.0);

        self.invulnerability = (self.invulnerability - dt).max(0.0);
        self.dash.cooldown = (self.dash.cooldown - dt).max(0.0);
    }

    /// Age out old afterimages; lay down a fresh row while dashing
    pub fn update_trail(&mut self, dt: f32, tuning: &Tuning) {
        for point in &mut self.trail {
            point.life -= dt;
        }
        self.trail.retain(|p| p.life > 0.0);

        if self.dash.active {
            let len = tuning.dash_trail_length.max(1);
            let dir = self.dash.direction as f32;
            for i in 0..len {
                let offset = -(i as f32) * DASH_TRAIL_SPACING * dir;
                self.trail.push(TrailPoint {
                    pos: self.pos + Vec2::new(offset, 0.0),
                    life: tuning.dash_trail_lifetime,
                    alpha: 1.0 - i as f32 / len as f32,
                });
            }
        }
    }

    /// Ignored while invulnerable. Returns true if the hit landed.
    pub fn take_damage(&mut self, amount: f32, direction: Vec2) -> bool {
        if self.invulnerability > 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.invulnerability = INVULNERABILITY_TIME;
        self.knockback = normalize(direction) * KNOCKBACK_SPEED;
        true
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Keep inside the arena walls and on or above the ground
    pub fn enforce_boundaries(&mut self) {
        self.pos.x = self.pos.x.clamp(self.radius, ARENA_WIDTH - self.radius);
        if self.pos.y >= GROUND_LEVEL {
            self.pos.y = GROUND_LEVEL;
            // Landed: drop any accumulated fall speed
            self.vel.y = self.vel.y.min(0.0);
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.pos.y >= GROUND_LEVEL
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// 0 right after a dash, 1 when the next dash is available
    pub fn dash_readiness(&self, tuning: &Tuning) -> f32 {
        if tuning.dash_cooldown <= 0.0 {
            return 1.0;
        }
        (1.0 - self.dash.cooldown / tuning.dash_cooldown).clamp(0.0, 1.0)
    }
}
