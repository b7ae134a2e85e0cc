//! Game tunables.
//!
//! Defaults reproduce the classic 800x600 field with 20 bubbles. Any field
//! can be overridden from a JSON file in the user's config directory; an
//! override with unusable values is ignored in favor of the defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Play volume, spawn batch and animation timing.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Width of the play area (and window) in logical pixels.
    pub width: f32,
    /// Height of the play area (and window) in logical pixels.
    pub height: f32,
    /// Depth of the play volume. Z is only used as a scale cue.
    pub depth: f32,
    /// Number of bubbles spawned at startup.
    pub bubble_count: usize,
    /// Seconds each explosion frame stays on screen.
    pub explosion_interval: f32,
    /// Maximum absolute X/Y speed in pixels per second.
    pub max_drift: f32,
    /// Maximum Z speed in depth units per second.
    pub max_depth_drift: f32,
    /// Directory the PNG assets are read from.
    pub asset_dir: PathBuf,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            depth: 100.0,
            bubble_count: 20,
            explosion_interval: 0.05,
            max_drift: 250.0,
            max_depth_drift: 250.0,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

/// Why the config override could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("no config file found at {0:?}")]
    Missing(PathBuf),
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl BubbleConfig {
    /// Get the file path for the config override.
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bubble-pop").join("config.json"))
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Reject values the field simulation can't run with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !positive(self.explosion_interval) {
            return Err(ConfigError::Invalid("explosion_interval must be positive"));
        }
        if ![self.width, self.height, self.depth].into_iter().all(positive) {
            return Err(ConfigError::Invalid("width, height and depth must be positive"));
        }
        if self.max_drift < 0.0 || self.max_depth_drift < 0.0 {
            return Err(ConfigError::Invalid("drift speeds must not be negative"));
        }
        Ok(self)
    }

    /// Read the config override from disk.
    ///
    /// Runs before the window exists, so nothing is logged here; pass the
    /// result to [`BubbleConfig::report`] once logging is up.
    pub fn read() -> Result<Self, ConfigError> {
        let path = Self::file_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Err(ConfigError::Missing(path));
        }
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// The config to run with: the override, or defaults if it was unusable.
    pub fn or_default(loaded: &Result<Self, ConfigError>) -> Self {
        loaded.as_ref().cloned().unwrap_or_default()
    }

    /// Log where the config came from.
    pub fn report(loaded: &Result<Self, ConfigError>) {
        match loaded {
            Ok(_) => info!("Loaded config override"),
            Err(e @ ConfigError::Missing(_)) => info!("{}, using default settings", e),
            Err(e) => warn!("{}, using default settings", e),
        }
    }
}

/// Whether `value` is above zero (NaN is not).
fn positive(value: f32) -> bool {
    value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BubbleConfig::from_json(r#"{ "bubble_count": 5, "width": 1024.0 }"#).unwrap();
        assert_eq!(config.bubble_count, 5);
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.explosion_interval, 0.05);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = BubbleConfig::from_json("{}").unwrap();
        assert_eq!(config, BubbleConfig::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = BubbleConfig::from_json("{ bubble_count: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_negative_interval_falls_back_to_defaults() {
        let loaded = BubbleConfig::from_json(r#"{ "explosion_interval": -0.05 }"#);
        assert!(matches!(loaded, Err(ConfigError::Invalid(_))));

        let config = BubbleConfig::or_default(&loaded);
        assert_eq!(config, BubbleConfig::default());
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let err = BubbleConfig::from_json(r#"{ "explosion_interval": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_positive_volume_is_invalid() {
        for json in [
            r#"{ "width": 0.0 }"#,
            r#"{ "height": -600.0 }"#,
            r#"{ "depth": 0.0 }"#,
        ] {
            let err = BubbleConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }
    }

    #[test]
    fn test_valid_override_is_kept() {
        let loaded = BubbleConfig::from_json(r#"{ "explosion_interval": 0.1, "depth": 50.0 }"#);
        let config = BubbleConfig::or_default(&loaded);
        assert_eq!(config.explosion_interval, 0.1);
        assert_eq!(config.depth, 50.0);
    }
}
