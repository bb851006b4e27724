//! TOML-based application configuration.
//!
//! Stores the defaults a new timer run starts from:
//! - Session/break lengths in minutes
//! - Notification preferences (terminal bell)
//!
//! Configuration is stored at `~/.config/pomoclock/config.toml`. Set
//! `POMOCLOCK_CONFIG_DIR` to use a different directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::timer::{DEFAULT_BREAK_MIN, DEFAULT_SESSION_MIN, MAX_LENGTH_MIN, MIN_LENGTH_MIN};

/// Timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Session length in minutes, 1..=60.
    #[serde(default = "default_session_length")]
    pub session_length: u64,
    /// Break length in minutes, 1..=60.
    #[serde(default = "default_break_length")]
    pub break_length: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell at phase boundaries.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomoclock/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_session_length() -> u64 {
    DEFAULT_SESSION_MIN
}
fn default_break_length() -> u64 {
    DEFAULT_BREAK_MIN
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_length: default_session_length(),
            break_length: default_break_length(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

/// Keys accepted by `Config::get` / `Config::set`.
pub const KEYS: &[&str] = &[
    "timer.session_length",
    "timer.break_length",
    "notifications.enabled",
    "notifications.bell",
];

impl Config {
    /// Returns the config directory, creating it if needed.
    ///
    /// `~/.config/pomoclock/` unless `POMOCLOCK_CONFIG_DIR` is set.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let dir = match std::env::var("POMOCLOCK_CONFIG_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("pomoclock"),
        };
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
            path: dir.clone(),
            message: e.to_string(),
        })?;
        Ok(dir)
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from disk. A missing file is replaced with the written-out
    /// defaults; an existing file must parse and validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_length("timer.session_length", self.timer.session_length)?;
        validate_length("timer.break_length", self.timer.break_length)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timer.session_length" => Some(self.timer.session_length.to_string()),
            "timer.break_length" => Some(self.timer.break_length.to_string()),
            "notifications.enabled" => Some(self.notifications.enabled.to_string()),
            "notifications.bell" => Some(self.notifications.bell.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key. Length values are validated to 1..=60.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "timer.session_length" => self.timer.session_length = parse_length(key, value)?,
            "timer.break_length" => self.timer.break_length = parse_length(key, value)?,
            "notifications.enabled" => self.notifications.enabled = parse_bool(key, value)?,
            "notifications.bell" => self.notifications.bell = parse_bool(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn validate_length(key: &str, value: u64) -> Result<u64, ConfigError> {
    if (MIN_LENGTH_MIN..=MAX_LENGTH_MIN).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{value} is outside {MIN_LENGTH_MIN}..={MAX_LENGTH_MIN} minutes"),
        })
    }
}

fn parse_length(key: &str, value: &str) -> Result<u64, ConfigError> {
    let minutes: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as minutes"),
    })?;
    validate_length(key, minutes)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as bool"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.session_length, 25);
        assert_eq!(parsed.timer.break_length, 5);
        assert!(parsed.notifications.bell);
    }

    #[test]
    fn get_supports_every_listed_key() {
        let cfg = Config::default();
        for key in KEYS {
            assert!(cfg.get(key).is_some(), "missing key {key}");
        }
        assert!(cfg.get("timer.missing").is_none());
    }

    #[test]
    fn set_updates_lengths_within_bounds() {
        let mut cfg = Config::default();
        cfg.set("timer.session_length", "40").unwrap();
        assert_eq!(cfg.timer.session_length, 40);
        cfg.set("notifications.bell", "false").unwrap();
        assert!(!cfg.notifications.bell);
    }

    #[test]
    fn set_rejects_out_of_range_length() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.session_length", "0").is_err());
        assert!(cfg.set("timer.break_length", "61").is_err());
        assert!(cfg.set("timer.session_length", "abc").is_err());
        assert_eq!(cfg.timer.session_length, 25);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("timer.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn load_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.session_length, 25);
        assert!(path.exists());
    }

    #[test]
    fn load_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\nsession_length = 0\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\nsession_length = 50\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.session_length, 50);
        assert_eq!(cfg.timer.break_length, 5);
        assert!(cfg.notifications.enabled);
    }
}
