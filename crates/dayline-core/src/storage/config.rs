//! TOML-based application configuration.
//!
//! Stores:
//! - Initial values for a newly created profile
//! - Placement defaults (fallback habit duration, drop-slot grid)
//! - Logging level
//! - The user id the CLI acts for
//!
//! Configuration is stored at `~/.config/dayline/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::clock::MinuteOfDay;
use crate::error::ConfigError;
use crate::habit::DEFAULT_HABIT_MINUTES;
use crate::schedule::Profile;
use crate::timeline::DEFAULT_SLOT_MINUTES;

/// Values used by `profile init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefaults {
    #[serde(default = "default_sleep_start")]
    pub sleep_start: MinuteOfDay,
    #[serde(default = "default_sleep_end")]
    pub sleep_end: MinuteOfDay,
    #[serde(default = "default_work_start")]
    pub work_start: MinuteOfDay,
    #[serde(default = "default_work_end")]
    pub work_end: MinuteOfDay,
    #[serde(default = "default_commute")]
    pub commute_minutes: u32,
    #[serde(default = "default_morning_routine")]
    pub morning_routine_minutes: u32,
    #[serde(default = "default_misc")]
    pub misc_minutes: u32,
}

/// Placement configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Duration for habits without a usable `timeRequired`.
    #[serde(default = "default_habit_minutes")]
    pub default_minutes: u32,
    /// Step of the drop-slot grid.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayline/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub defaults: ProfileDefaults,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_sleep_start() -> MinuteOfDay {
    MinuteOfDay::wrapping(22 * 60)
}
fn default_sleep_end() -> MinuteOfDay {
    MinuteOfDay::wrapping(6 * 60)
}
fn default_work_start() -> MinuteOfDay {
    MinuteOfDay::wrapping(9 * 60)
}
fn default_work_end() -> MinuteOfDay {
    MinuteOfDay::wrapping(17 * 60)
}
fn default_commute() -> u32 {
    60
}
fn default_morning_routine() -> u32 {
    30
}
fn default_misc() -> u32 {
    120
}
fn default_habit_minutes() -> u32 {
    DEFAULT_HABIT_MINUTES
}
fn default_slot_minutes() -> u32 {
    DEFAULT_SLOT_MINUTES
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_user_id() -> String {
    "local".into()
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            sleep_start: default_sleep_start(),
            sleep_end: default_sleep_end(),
            work_start: default_work_start(),
            work_end: default_work_end(),
            commute_minutes: default_commute(),
            morning_routine_minutes: default_morning_routine(),
            misc_minutes: default_misc(),
        }
    }
}

impl ProfileDefaults {
    /// A fresh profile with these values and no placements.
    pub fn to_profile(&self) -> Profile {
        Profile {
            sleep_start: self.sleep_start,
            sleep_end: self.sleep_end,
            work_start: self.work_start,
            work_end: self.work_end,
            commute_minutes: self.commute_minutes,
            morning_routine_minutes: self.morning_routine_minutes,
            misc_minutes: self.misc_minutes,
            scheduled_habits: Vec::new(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_habit_minutes(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            defaults: ProfileDefaults::default(),
            placement: PlacementConfig::default(),
            logging: LoggingConfig::default(),
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

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) => {
                        return Err(invalid("cannot replace a whole section".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing the default file when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default file when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// Clock fields are validated as `HH:MM`; the config is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("sleep_start = \"22:00\""));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[placement]\ndefault_minutes = 20\n").unwrap();
        assert_eq!(parsed.placement.default_minutes, 20);
        assert_eq!(parsed.placement.slot_minutes, 30);
        assert_eq!(parsed.user_id, "local");
        assert_eq!(parsed.defaults, ProfileDefaults::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("defaults.work_start").as_deref(), Some("09:00"));
        assert_eq!(cfg.get("placement.default_minutes").as_deref(), Some("15"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("warn"));
        assert!(cfg.get("defaults.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("defaults.sleep_end", "07:15").unwrap();
        cfg.set("placement.default_minutes", "25").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert_eq!(cfg.defaults.sleep_end.to_string(), "07:15");
        assert_eq!(cfg.placement.default_minutes, 25);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("defaults.lunch", "12:00"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("placement.default_minutes", "soon").is_err());
        assert!(cfg.set("defaults", "x").is_err());

        // Parses as a string but fails HH:MM validation on the way back.
        assert!(cfg.set("defaults.work_start", "9am").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn defaults_build_a_profile() {
        let profile = Config::default().defaults.to_profile();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut edited = cfg.clone();
        edited.set("user_id", "alice").unwrap();
        edited.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().user_id, "alice");
    }

    #[test]
    fn load_from_reports_parse_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "user_id = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
