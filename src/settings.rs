//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever `--settings` points).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound cues on/off
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Visual Effects ===
    /// Screen shake on wrong sorts and game over
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,

    // === Loop ===
    /// Optional frame cap (frames per second); `None` runs best-effort
    pub frame_cap: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,

            screen_shake: true,
            particles: true,
            reduced_motion: false,

            frame_cap: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings from {}: {e}. Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("trash_rush_settings_{}.json", std::process::id()));
        let settings = Settings {
            sound_enabled: false,
            frame_cap: Some(60),
            ..Default::default()
        };
        settings.save(&path).expect("save");
        let loaded = Settings::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("trash_rush_settings_does_not_exist.json");
        let settings = Settings::load_or_default(Some(&path));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{ "sound_enabled": false }"#).expect("parse");
        assert!(!settings.sound_enabled);
        assert!(settings.particles);
        assert_eq!(settings.frame_cap, None);
    }
}
