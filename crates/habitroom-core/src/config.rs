//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Which habit is tracked by default and its display name
//! - How a fresh ledger is seeded
//! - The break reason menu
//! - Where the current-streak walk starts
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ledger::{LedgerOptions, StreakAnchor};
use crate::reasons::ReasonCatalog;
use crate::seed::{SeedPlan, DEFAULT_SEED_DAYS, MAX_SEED_DAYS};
use crate::storage::data_dir;

/// Tracked habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitConfig {
    /// Storage key; names the persistence namespaces.
    #[serde(default = "default_habit_key")]
    pub key: String,
    #[serde(default = "default_habit_name")]
    pub name: String,
}

/// Seed used when no ledger state is stored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of days before today marked active.
    #[serde(default = "default_seed_days")]
    pub days: u32,
    /// Explicit dates; takes precedence over `days` when non-empty.
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default)]
    pub anchor: StreakAnchor,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub habit: HabitConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub reasons: ReasonCatalog,
    #[serde(default)]
    pub streak: StreakConfig,
}

fn default_habit_key() -> String {
    "read-on-kindle".into()
}
fn default_habit_name() -> String {
    "Read on Kindle".into()
}
fn default_seed_days() -> u32 {
    DEFAULT_SEED_DAYS
}

impl Default for HabitConfig {
    fn default() -> Self {
        Self {
            key: default_habit_key(),
            name: default_habit_name(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            days: default_seed_days(),
            dates: Vec::new(),
        }
    }
}

impl SeedConfig {
    pub fn plan(&self) -> SeedPlan {
        if self.dates.is_empty() {
            SeedPlan::Preceding { days: self.days }
        } else {
            SeedPlan::Explicit {
                dates: self.dates.clone(),
            }
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
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
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

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
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
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
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

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        if updated.seed.days > MAX_SEED_DAYS {
            return Err(invalid(format!("seed.days must be at most {MAX_SEED_DAYS}")));
        }
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Ledger options for `habit_key`, or the configured habit.
    pub fn ledger_options(&self, habit_key: Option<&str>) -> LedgerOptions {
        LedgerOptions::new(habit_key.unwrap_or(&self.habit.key))
            .with_seed(self.seed.plan())
            .with_anchor(self.streak.anchor)
    }
}
