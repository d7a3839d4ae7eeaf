//! Sound cue dispatch
//!
//! The game only ever fires cues and forgets them. Sample playback lives
//! behind `AudioBackend`; with no backend (or sound disabled) every cue is
//! silently dropped.

use crate::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Item dropped into its matching receptacle
    Correct,
    /// Item dropped into the wrong receptacle
    Wrong,
    /// Item left the belt unsorted
    Miss,
    /// Difficulty level increased
    LevelUp,
    /// Session ended
    GameOver,
    /// Item picked up / new game
    Click,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::Correct,
        SoundCue::Wrong,
        SoundCue::Miss,
        SoundCue::LevelUp,
        SoundCue::GameOver,
        SoundCue::Click,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Correct => "correct",
            SoundCue::Wrong => "wrong",
            SoundCue::Miss => "miss",
            SoundCue::LevelUp => "level_up",
            SoundCue::GameOver => "game_over",
            SoundCue::Click => "click",
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend: Send {
    fn play(&mut self, cue: SoundCue, volume: f32);

    /// Free device resources; called once when the game thread has exited
    fn release(&mut self) {}
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("sound: {} (volume {:.2})", cue.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager that drops every cue
    pub fn disabled() -> Self {
        Self {
            backend: None,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: true,
        }
    }

    /// Build from player settings
    pub fn from_settings(settings: &Settings, backend: Option<Box<dyn AudioBackend>>) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(!settings.sound_enabled);
        audio
    }

    /// Whether a backend is attached
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
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

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = self.backend.as_mut() else { return };
        backend.play(cue, vol);
    }

    /// Release the backend; later cues are dropped
    pub fn release(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.release();
            log::debug!("Audio released");
        }
    }
}
