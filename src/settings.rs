//! Game settings and tuning
//!
//! Persisted in LocalStorage on the web. Native builds read an optional JSON
//! file instead. Missing fields fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::GridModel;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell scale must be positive")]
    ZeroScale,
    #[error("canvas {width}x{height} is smaller than one {scale}px cell")]
    CanvasTooSmall { width: u32, height: u32, scale: u32 },
    #[error("canvas {width}x{height} at {scale}px per cell has too many cells per side")]
    CanvasTooLarge { width: u32, height: u32, scale: u32 },
    #[error("tick interval {base_ms}ms is above the {max_ms}ms limit")]
    TickTooLong { base_ms: u32, max_ms: u32 },
    #[error("tick interval floor must be positive")]
    ZeroTickInterval,
    #[error("tick interval floor {min_ms}ms is above the base interval {base_ms}ms")]
    FloorAboveBase { min_ms: u32, base_ms: u32 },
    #[error("speed-up cadence must be at least one point")]
    ZeroSpeedupCadence,
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Page color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Pixels per grid cell
    pub cell_scale: u32,

    // === Pace ===
    /// Tick interval at game start (ms)
    pub base_tick_ms: u32,
    /// Interval floor (ms)
    pub min_tick_ms: u32,
    /// Interval reduction per milestone (ms)
    pub speedup_step_ms: u32,
    /// Points between milestones
    pub speedup_every: u32,

    // === Food ===
    /// Random draws before placement falls back to a full scan
    pub food_attempts: u32,

    // === Look ===
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_scale: CELL_SCALE,

            base_tick_ms: BASE_TICK_MS,
            min_tick_ms: MIN_TICK_MS,
            speedup_step_ms: SPEEDUP_STEP_MS,
            speedup_every: SPEEDUP_EVERY,

            food_attempts: FOOD_ATTEMPTS,

            theme: Theme::Dark,
        }
    }
}

impl Settings {
    /// Settings for a given canvas size, other fields default
    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }

    /// Playfield derived from the canvas size and cell scale
    pub fn grid(&self) -> Result<GridModel, ConfigError> {
        GridModel::from_canvas(self.canvas_width, self.canvas_height, self.cell_scale)
    }

    /// Check that the settings describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.base_tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickTooLong {
                base_ms: self.base_tick_ms,
                max_ms: MAX_TICK_MS,
            });
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.min_tick_ms > self.base_tick_ms {
            return Err(ConfigError::FloorAboveBase {
                min_ms: self.min_tick_ms,
                base_ms: self.base_tick_ms,
            });
        }
        if self.speedup_every == 0 {
            return Err(ConfigError::ZeroSpeedupCadence);
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a settings JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Copy with the canvas size of the page applied. The stored
    /// preferences in `self` are left alone.
    pub fn fit_canvas(&self, width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..self.clone()
        }
    }

    /// Interval after reaching `score`, given the current interval.
    ///
    /// Shortens by one step on every positive multiple of `speedup_every`
    /// while above the floor, never going below it.
    pub fn next_interval(&self, score: u32, current_ms: u32) -> u32 {
        if score > 0 && score % self.speedup_every == 0 && current_ms > self.min_tick_ms {
            current_ms
                .saturating_sub(self.speedup_step_ms)
                .max(self.min_tick_ms)
        } else {
            current_ms
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_snake_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.grid().unwrap(), GridModel::new(30, 20));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "cell_scale": 10, "theme": "Light" }"#).unwrap();
        assert_eq!(settings.cell_scale, 10);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.base_tick_ms, BASE_TICK_MS);
        assert_eq!(settings.grid().unwrap(), GridModel::new(60, 40));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "cell_scale": 0 }"#),
            Err(ConfigError::ZeroScale)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "canvas_width": 5 }"#),
            Err(ConfigError::CanvasTooSmall { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "min_tick_ms": 150 }"#),
            Err(ConfigError::FloorAboveBase { min_ms: 150, base_ms: 100 })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "speedup_every": 0 }"#),
            Err(ConfigError::ZeroSpeedupCadence)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "min_tick_ms": 0 }"#),
            Err(ConfigError::ZeroTickInterval)
        ));
    }

    #[test]
    fn test_oversized_settings_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "canvas_width": 4294967295, "cell_scale": 1 }"#),
            Err(ConfigError::CanvasTooLarge { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "canvas_height": 4294967295, "cell_scale": 1 }"#),
            Err(ConfigError::CanvasTooLarge { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "base_tick_ms": 4294967295 }"#),
            Err(ConfigError::TickTooLong { max_ms: MAX_TICK_MS, .. })
        ));
        Settings::from_json(&format!(r#"{{ "base_tick_ms": {} }}"#, MAX_TICK_MS)).unwrap();
    }

    #[test]
    fn test_fit_canvas_leaves_stored_preferences() {
        let stored = Settings {
            theme: Theme::Light,
            ..Settings::default()
        };
        let fitted = stored.fit_canvas(800, 600);
        assert_eq!(fitted.grid().unwrap(), GridModel::new(40, 30));
        assert_eq!(fitted.theme, Theme::Light);
        assert_eq!(stored.canvas_width, CANVAS_WIDTH);
        assert_eq!(stored.canvas_height, CANVAS_HEIGHT);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Settings::from_file("/nonexistent/neon-snake.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_speed_ramp() {
        let settings = Settings::default();
        assert_eq!(settings.next_interval(1, 100), 100);
        assert_eq!(settings.next_interval(5, 100), 90);
        assert_eq!(settings.next_interval(10, 90), 80);
        assert_eq!(settings.next_interval(12, 80), 80);
        assert_eq!(settings.next_interval(35, 40), 40);
        assert_eq!(settings.next_interval(0, 100), 100);

        // Floor is respected even when the step overshoots it
        let coarse = Settings {
            speedup_step_ms: 25,
            ..Settings::default()
        };
        assert_eq!(coarse.next_interval(5, 50), 40);
    }

    #[test]
    fn test_theme_round_trip_names() {
        assert_eq!(Theme::from_str("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::from_str(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::from_str("sepia"), None);
    }
}
