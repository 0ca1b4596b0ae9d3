//! Player preferences
//!
//! Persisted separately from the game (which is never saved) in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{JUMP_MODIFIER_MAX, JUMP_MODIFIER_MIN};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Jump power multiplier from the HUD slider
    jump_modifier: f32,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jump_modifier: 1.0,
            show_fps: true,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "side_scroller_settings";

    pub fn jump_modifier(&self) -> f32 {
        self.jump_modifier
    }

    /// Set the jump multiplier, clamped to the slider range. Takes effect on
    /// the next grounded jump.
    pub fn set_jump_modifier(&mut self, value: f32) {
        self.jump_modifier = if value.is_nan() {
            1.0
        } else {
            value.clamp(JUMP_MODIFIER_MIN, JUMP_MODIFIER_MAX)
        };
    }

    /// Parse stored settings, re-applying range limits
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.set_jump_modifier(settings.jump_modifier);
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_modifier_is_clamped() {
        let mut settings = Settings::default();
        assert_eq!(settings.jump_modifier(), 1.0);

        settings.set_jump_modifier(3.5);
        assert_eq!(settings.jump_modifier(), JUMP_MODIFIER_MAX);
        settings.set_jump_modifier(0.1);
        assert_eq!(settings.jump_modifier(), JUMP_MODIFIER_MIN);
        settings.set_jump_modifier(1.25);
        assert_eq!(settings.jump_modifier(), 1.25);
        settings.set_jump_modifier(f32::NAN);
        assert_eq!(settings.jump_modifier(), 1.0);
    }

    #[test]
    fn test_stored_values_are_revalidated() {
        let settings = Settings::from_json(r#"{ "jump_modifier": 9.0 }"#).unwrap();
        assert_eq!(settings.jump_modifier(), JUMP_MODIFIER_MAX);
        assert!(settings.show_fps);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.set_jump_modifier(0.75);
        settings.show_fps = false;
        let json = serde_json::to_string(&settings).unwrap();
        let loaded = Settings::from_json(&json).unwrap();
        assert_eq!(loaded.jump_modifier(), 0.75);
        assert!(!loaded.show_fps);
    }
}
