//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::SAVE_KEY_SETTINGS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects on/off
    pub sound_on: bool,
    /// Background music on/off
    pub music_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Debug overlays ===
    /// Draw collision circles around ship and asteroids
    pub show_bounding: bool,
    /// Draw a dot at the ship's center
    pub show_centre_dot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            show_bounding: false,
            show_centre_dot: false,
        }
    }
}

impl Settings {
    /// Whether any audio should play at all
    pub fn audio_enabled(&self) -> bool {
        (self.sound_on || self.music_on) && self.master_volume > 0.0
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(SAVE_KEY_SETTINGS) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds read settings from a JSON file next to the binary, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = format!("{SAVE_KEY_SETTINGS}.json");
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed {path}: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
