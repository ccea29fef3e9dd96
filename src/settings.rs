//! Game settings and per-level tuning
//!
//! Stored as JSON next to the executable. Missing fields take their defaults,
//! so older files keep loading as settings grow.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{Oscillator, TuningParameters};

/// A moving obstacle placed in a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSettings {
    pub start: Vec3,
    pub movement: Vec3,
    pub speed: f32,
}

impl OscillatorSettings {
    pub fn build(&self) -> Oscillator {
        Oscillator::new(self.start, self.movement, self.speed)
    }
}

/// One scene in build order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub name: String,
    pub tuning: TuningParameters,
    pub oscillators: Vec<OscillatorSettings>,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            name: "Level".to_string(),
            tuning: TuningParameters::default(),
            oscillators: Vec::new(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Levels in build order
    pub levels: Vec<LevelSettings>,

    // === Debug ===
    /// Skip-level and fly-through hotkeys
    pub debug_keys: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelSettings {
                    name: "Sandbox".to_string(),
                    ..Default::default()
                },
                LevelSettings {
                    name: "Gate".to_string(),
                    oscillators: vec![OscillatorSettings {
                        start: Vec3::new(0.0, 4.0, 0.0),
                        movement: Vec3::new(0.0, 6.0, 0.0),
                        speed: 0.5,
                    }],
                    ..Default::default()
                },
            ],

            debug_keys: cfg!(debug_assertions),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} levels)",
            path.display(),
            settings.levels.len()
        );
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (level, entry) in self.levels.iter().enumerate() {
            if let Some(reason) = entry.tuning.problem() {
                return Err(ConfigError::InvalidTuning { level, reason });
            }
            if entry.oscillators.iter().any(|o| !o.speed.is_finite()) {
                return Err(ConfigError::InvalidTuning {
                    level,
                    reason: "oscillator speed must be finite",
                });
            }
        }
        Ok(())
    }

    /// Tuning for a level, or the defaults when the level has no entry
    pub fn tuning_for(&self, level: usize) -> TuningParameters {
        self.levels
            .get(level)
            .map(|l| l.tuning)
            .unwrap_or_default()
    }

    /// Fresh oscillators for a level
    pub fn oscillators_for(&self, level: usize) -> Vec<Oscillator> {
        self.levels
            .get(level)
            .map(|l| l.oscillators.iter().map(OscillatorSettings::build).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.levels.len(), 2);
    }

    #[test]
    fn test_json_round_trip_keeps_tuning() {
        let mut settings = Settings::default();
        settings.levels[1].tuning.thrust_strength = 42.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(
            r#"{ "levels": [ { "name": "Only", "tuning": { "rotation_strength": 3.0 } } ] }"#,
        )
        .unwrap();
        assert_eq!(settings.levels.len(), 1);
        assert_eq!(settings.levels[0].tuning.rotation_strength, 3.0);
        assert_eq!(
            settings.levels[0].tuning.thrust_strength,
            TuningParameters::default().thrust_strength
        );
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.levels[0].oscillators.is_empty());
    }

    #[test]
    fn test_empty_levels_rejected() {
        let err = Settings::from_json(r#"{ "levels": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoLevels));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let err = Settings::from_json(
            r#"{ "levels": [ {}, { "tuning": { "transition_delay_seconds": -1.0 } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning { level: 1, .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ levels: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/rocket-boost/settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        let fallback = Settings::load_or_default("/nonexistent/rocket-boost/settings.json");
        assert_eq!(fallback, Settings::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "rocket-boost-malformed-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let loaded = Settings::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "rocket-boost-settings-{}.json",
            std::process::id()
        ));
        let mut settings = Settings::default();
        settings.muted = true;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
        assert!(loaded.muted);
    }

    #[test]
    fn test_tuning_for_unknown_level_is_default() {
        let settings = Settings::default();
        assert_eq!(settings.tuning_for(99), TuningParameters::default());
        assert!(settings.oscillators_for(99).is_empty());
        assert_eq!(settings.oscillators_for(1).len(), 1);
    }
}
