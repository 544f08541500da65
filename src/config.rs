//! User configuration, stored as TOML next to the task database.

use crate::utils::{APP_NAME, DEFAULT_MINUTES, DEFAULT_PRESETS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_MINUTES: u32 = 999;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duration loaded at startup (minutes)
    pub default_minutes: u32,

    /// Preset durations bound to keys 1..n (minutes)
    pub presets: Vec<u32>,

    /// Play the completion chime
    pub sound: bool,

    /// Delay between display frames
    pub frame_interval_ms: u64,

    /// Log filter directive, e.g. "info" or "pomodial=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_minutes: DEFAULT_MINUTES,
            presets: DEFAULT_PRESETS.to_vec(),
            sound: true,
            frame_interval_ms: 16,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Location of the per-user config file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_NAME).join("config.toml"))
    }

    /// Load from the per-user location; defaults when the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_minutes("default_minutes", self.default_minutes)?;

        if self.presets.is_empty() {
            return Err(ConfigError::Invalid("presets must not be empty".to_string()));
        }
        for minutes in &self.presets {
            validate_minutes("presets", *minutes)?;
        }

        if !(1..=1000).contains(&self.frame_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "frame_interval_ms must be between 1 and 1000, got {}",
                self.frame_interval_ms
            )));
        }
        Ok(())
    }
}

fn validate_minutes(field: &str, minutes: u32) -> Result<(), ConfigError> {
    if (1..=MAX_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be between 1 and {} minutes, got {}",
            field, MAX_MINUTES, minutes
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_minutes, 25);
        assert_eq!(config.presets, vec![25, 5, 15]);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let config = Config {
            default_minutes: 50,
            presets: vec![50, 10],
            sound: false,
            frame_interval_ms: 33,
            log_level: "debug".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sound = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.sound);
        assert_eq!(config.presets, Config::default().presets);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "presets = [oops").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        config.presets.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.presets = vec![0];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.frame_interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
