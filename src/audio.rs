//! Sound effect hooks
//!
//! Playback itself is a platform concern; the game only emits
//! [`SoundEffect`]s into an [`AudioSink`].

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Pointer moved onto a button
    ButtonHover,
    /// Button activated
    ButtonClick,
    /// Projectile fired
    Shoot,
    /// Projectile struck an enemy
    Hit,
    /// Explosive projectile detonated
    Explosion,
    /// Enemy destroyed
    EnemyDeath,
    /// Player touched an enemy
    PlayerHurt,
    /// Player dashed
    Dash,
    /// Intro warp started
    Warp,
    /// Run ended
    GameOver,
}

/// Receives sound effects as they happen
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Logs effects at trace level and respects the volume setting
#[derive(Debug)]
pub struct LoggingAudio {
    volume: f32,
}

impl LoggingAudio {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

impl AudioSink for LoggingAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        log::trace!("sfx {:?} @ {:.2}", effect, self.volume);
    }
}

/// Collects effects for inspection
#[derive(Debug, Default)]
pub struct Recorder {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

impl Recorder {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}
