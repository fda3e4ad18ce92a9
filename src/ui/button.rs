//! Animated text button
//!
//! Size and brightness ease toward their hover/idle targets at a fixed
//! rate. The bound action returns a command for the owning screen.

use glam::Vec2;

use crate::audio::{AudioSink, SoundEffect};
use crate::geometry::approach;
use crate::renderer::{Align, Surface};

/// Easing rate for size and brightness (per second)
const EASE_RATE: f32 = 10.0;
/// Hovered text grows by this factor
const HOVER_SCALE: f32 = 1.25;
const IDLE_BRIGHTNESS: f32 = 200.0;
const HOVER_BRIGHTNESS: f32 = 255.0;
/// Brightness pulse amplitude (0-255 scale) and rate (Hz)
const PULSE_AMPLITUDE: f32 = 15.0;
const PULSE_RATE: f32 = 1.0;
/// Rough glyph advance as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.55;

pub const DEFAULT_FONT_SIZE: f32 = 48.0;

/// What a click does. Errors are reported to the owning screen.
pub type Action<C> = Box<dyn FnMut() -> anyhow::Result<C>>;

pub struct Button<C> {
    pub label: String,
    pub center: Vec2,
    pub enabled: bool,
    base_size: f32,
    font_size: f32,
    brightness: f32,
    hovered: bool,
    pulse_time: f32,
    action: Option<Action<C>>,
}

impl<C> Button<C> {
    pub fn new(label: impl Into<String>, center: Vec2, base_size: f32) -> Self {
        Self {
            label: label.into(),
            center,
            enabled: true,
            base_size,
            font_size: base_size,
            brightness: IDLE_BRIGHTNESS,
            hovered: false,
            pulse_time: 0.0,
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl FnMut() -> anyhow::Result<C> + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Clickable area at the current font size: (min corner, size)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let size = Vec2::new(
            self.label.chars().count() as f32 * self.font_size * GLYPH_WIDTH,
            self.font_size,
        );
        (self.center - size / 2.0, size)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (min, size) = self.bounds();
        let max = min + size;
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Track hover and ease the animation. Returns whether hovered.
    pub fn update(&mut self, dt: f32, pointer: Vec2, audio: &mut dyn AudioSink) -> bool {
        self.pulse_time += dt;
        if !self.enabled {
            self.hovered = false;
            return false;
        }

        let hovered = self.contains(pointer);
        if hovered && !self.hovered {
            audio.play(SoundEffect::ButtonHover);
        }
        self.hovered = hovered;

        let (target_size, target_brightness) = if hovered {
            (self.base_size * HOVER_SCALE, HOVER_BRIGHTNESS)
        } else {
            (self.base_size, IDLE_BRIGHTNESS)
        };
        self.font_size = approach(self.font_size, target_size, EASE_RATE, dt);
        self.brightness = approach(self.brightness, target_brightness, EASE_RATE, dt);
        hovered
    }

    /// Run the action if enabled. `None` when there is nothing to run.
    pub fn click(&mut self, audio: &mut dyn AudioSink) -> Option<anyhow::Result<C>> {
        if !self.enabled {
            return None;
        }
        let action = self.action.as_mut()?;
        audio.play(SoundEffect::ButtonClick);
        Some(action())
    }

    /// Click only if `pos` is on the button
    pub fn click_at(&mut self, pos: Vec2, audio: &mut dyn AudioSink) -> Option<anyhow::Result<C>> {
        if self.contains(pos) {
            self.click(audio)
        } else {
            None
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let pulse = (self.pulse_time * PULSE_RATE * std::f32::consts::TAU).sin() * PULSE_AMPLITUDE;
        let mut value = ((self.brightness + pulse).clamp(0.0, 255.0)) / 255.0;
        if !self.enabled {
            value *= 0.4;
        }
        surface.text(
            self.center,
            &self.label,
            self.font_size,
            [value, value, value, 1.0],
            Align::Center,
        );
    }
}
