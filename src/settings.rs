//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_MAX_DX, PADDLE_SENSITIVITY, PADDLE_SPIN, STARTING_LIVES};
use crate::platform::storage;
use crate::sim::{GameMode, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game shown on the start screen
    pub mode: GameMode,

    // === Controls ===
    /// Paddle pixels per spinner step
    pub paddle_sensitivity: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Pong,

            paddle_sensitivity: PADDLE_SENSITIVITY,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Sensitivity bounds accepted from storage
    pub const MIN_SENSITIVITY: f32 = 0.25;
    pub const MAX_SENSITIVITY: f32 = 8.0;

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "spinner_arcade_settings";

    /// Clamp values that may have been hand-edited in storage
    pub fn sanitized(mut self) -> Self {
        if !self.paddle_sensitivity.is_finite() {
            self.paddle_sensitivity = PADDLE_SENSITIVITY;
        }
        self.paddle_sensitivity = self
            .paddle_sensitivity
            .clamp(Self::MIN_SENSITIVITY, Self::MAX_SENSITIVITY);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Gameplay tuning derived from these settings
    pub fn tuning(&self) -> Tuning {
        Tuning {
            paddle_sensitivity: self.paddle_sensitivity,
            paddle_spin: PADDLE_SPIN,
            max_ball_dx: BALL_MAX_DX,
            starting_lives: STARTING_LIVES,
        }
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from storage, falling back to defaults
    pub fn load() -> Self {
        storage::load_or_default::<Self>(Self::STORAGE_KEY).sanitized()
    }

    /// Save settings to storage
    pub fn save(&self) {
        storage::save_or_warn(Self::STORAGE_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cabinet() {
        let settings = Settings::default();
        assert_eq!(settings.tuning(), Tuning::default());
        assert_eq!(settings.mode, GameMode::Pong);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"mode":"Breakout"}"#).unwrap();
        assert_eq!(settings.mode, GameMode::Breakout);
        assert_eq!(settings.paddle_sensitivity, PADDLE_SENSITIVITY);
    }

    #[test]
    fn test_sanitize_clamps() {
        let settings = Settings {
            paddle_sensitivity: 100.0,
            master_volume: 3.0,
            sfx_volume: -1.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.paddle_sensitivity, Settings::MAX_SENSITIVITY);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);

        let settings = Settings {
            paddle_sensitivity: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.paddle_sensitivity, PADDLE_SENSITIVITY);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert!((Settings::default().effective_sfx_volume() - 0.8).abs() < 1e-6);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_load_gives_defaults() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
