//! TOML-based application configuration.
//!
//! Stores:
//! - Animation variant, duration and spin range
//! - An optional RNG seed for reproducible runs
//! - Calendar event title and details
//!
//! Configuration is read from `~/.config/dayoff/config.toml`. A missing
//! file means defaults; the file is never written by the application.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Which motion model the animator draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Wheel,
    Board,
}

impl std::str::FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wheel" => Ok(Variant::Wheel),
            "board" | "ball" | "plinko" => Ok(Variant::Board),
            other => Err(ConfigError::InvalidValue {
                key: "animation.variant".into(),
                message: format!("unknown variant '{other}' (expected wheel or board)"),
            }),
        }
    }
}

/// Animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_min_rotations")]
    pub min_rotations: u32,
    #[serde(default = "default_max_rotations")]
    pub max_rotations: u32,
    /// Fixed RNG seed (None = entropy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Calendar event and share text configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_details")]
    pub details: String,
    #[serde(default = "default_share_title")]
    pub share_title: String,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

fn default_duration_ms() -> u64 {
    3000
}
fn default_min_rotations() -> u32 {
    5
}
fn default_max_rotations() -> u32 {
    10
}
fn default_title() -> String {
    "Day Off".into()
}
fn default_details() -> String {
    "Scheduled day off from work".into()
}
fn default_share_title() -> String {
    "Day Off Calendar".into()
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            duration_ms: default_duration_ms(),
            min_rotations: default_min_rotations(),
            max_rotations: default_max_rotations(),
            seed: None,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            details: default_details(),
            share_title: default_share_title(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// `~/.config/dayoff/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dayoff")
            .join("config.toml")
    }

    /// Load from the default path, or return defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if it holds invalid values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`, or return defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.animation;
        if a.duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "animation.duration_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        // Fewer than two turns can leave the wheel turning backwards.
        if a.min_rotations < 2 {
            return Err(ConfigError::InvalidValue {
                key: "animation.min_rotations".into(),
                message: "must be at least 2".into(),
            });
        }
        if a.min_rotations > a.max_rotations {
            return Err(ConfigError::InvalidValue {
                key: "animation.min_rotations".into(),
                message: format!(
                    "{} is greater than max_rotations ({})",
                    a.min_rotations, a.max_rotations
                ),
            });
        }
        Ok(())
    }

    /// Render as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
