//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Values used to prefill the shake settings form.
    #[serde(default)]
    pub shake: ShakeDefaults,

    /// What to do when the shake margin does not fit inside a keyframe.
    #[serde(default)]
    pub geometry_policy: GeometryPolicy,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default shake settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeDefaults {
    /// Phase advance per frame, in degrees.
    pub speed: f64,

    /// Vertical phase multiplier relative to horizontal.
    pub sync_factor: f64,

    /// Vertical displacement in pixels.
    pub amplitude: f64,

    /// Horizontal displacement as a multiple of `amplitude`.
    pub xy_ratio: f64,

    /// Reset the pan/crop to the full frame before shaking.
    pub reset_pan_on_first_frame: bool,

    /// Regenerate one keyframe per frame before shaking.
    pub clear_existing_keyframes: bool,
}

/// Handling of keyframes too small to hold the shake margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryPolicy {
    /// Abort the whole operation before any keyframe is modified.
    #[default]
    Reject,
    /// Apply the scale anyway, even if it inverts the bounds.
    Preserve,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "panshake=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ShakeDefaults {
    fn default() -> Self {
        Self {
            speed: 12.0,
            sync_factor: 1.5,
            amplitude: 4.0,
            xy_ratio: 2.5,
            reset_pan_on_first_frame: false,
            clear_existing_keyframes: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("panshake").join("config.json")
}
