//! Sound cues for game events
//!
//! Synthesis belongs to the host. The core maps simulation events to
//! [`SoundEffect`]s and hands them, with a volume, to an [`AudioSink`].

use crate::sim::{BlockType, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    DoubleJump,
    /// Phase ability activated
    PhaseOn,
    /// Gold collected
    Collect,
    /// Ran into a block or mob
    Hit,
    /// Ran into Tnt
    Explosion,
    LevelUp,
    Win,
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Cue for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundEffect::Jump,
            GameEvent::DoubleJump => SoundEffect::DoubleJump,
            GameEvent::PhaseActivated => SoundEffect::PhaseOn,
            GameEvent::Collect => SoundEffect::Collect,
            GameEvent::Hit(BlockType::Tnt) => SoundEffect::Explosion,
            GameEvent::Hit(_) => SoundEffect::Hit,
            GameEvent::LevelUp(_) => SoundEffect::LevelUp,
            GameEvent::Win => SoundEffect::Win,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Whatever actually makes the noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Silent sink
impl AudioSink for () {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sound {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(()))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Swap the output, keeping volume settings
    pub fn set_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.sink = sink;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        // Explosions sit louder than everything else
        let vol = match effect {
            SoundEffect::Explosion => vol,
            SoundEffect::Collect | SoundEffect::Jump | SoundEffect::DoubleJump => vol * 0.6,
            _ => vol * 0.8,
        };
        self.sink.play(effect, vol);
    }

    /// Play the cue for every event of a tick, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}
