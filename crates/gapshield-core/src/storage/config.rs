//! TOML-based application configuration.
//!
//! Holds:
//! - Privacy-gap scheduling parameters (`[privacy_gaps]`)
//! - Crisis allowlist settings (`[crisis]`)
//!
//! Configuration is stored at `~/.config/gapshield/config.toml` unless
//! `GAPSHIELD_CONFIG_DIR` points elsewhere. Values are validated when the
//! file is loaded and before any change is written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::config::{PrivacyGapConfig, PrivacyGapSettings};
use crate::crisis::{CrisisAllowlist, CrisisSettings};
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub privacy_gaps: PrivacyGapSettings,
    #[serde(default)]
    pub crisis: CrisisSettings,
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
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                if part == "seed_key" && value.trim().is_empty() {
                    obj.remove(part);
                    return Ok(());
                }
                let existing = obj.get(part);

                let new_value = match existing {
                    Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
                    ),
                    Some(serde_json::Value::Number(_)) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as integer: {e}")))?;
                        serde_json::Value::Number(n.into())
                    }
                    Some(serde_json::Value::Array(_)) => {
                        let items = value
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(|s| serde_json::Value::String(s.to_string()))
                            .collect();
                        serde_json::Value::Array(items)
                    }
                    Some(serde_json::Value::Object(_)) => return Err(unknown()),
                    Some(_) => serde_json::Value::String(value.into()),
                    // Optional keys are omitted while unset.
                    None if part == "seed_key" => serde_json::Value::String(value.into()),
                    None => return Err(unknown()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from(CONFIG_FILE),
            message: e.to_string(),
        })?;
        Ok(dir.join(CONFIG_FILE))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, holds invalid values,
    /// or the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                tracing::debug!(path = %path.display(), "loaded configuration");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::info!(path = %path.display(), "wrote default configuration");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check every section without building anything long-lived.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.privacy_gap_config().map(|_| ())
    }

    /// Validated privacy-gap configuration.
    pub fn privacy_gap_config(&self) -> Result<PrivacyGapConfig, ConfigError> {
        PrivacyGapConfig::try_from(self.privacy_gaps.clone())
    }

    /// Crisis allowlist described by the `[crisis]` section.
    pub fn crisis_allowlist(&self) -> CrisisAllowlist {
        CrisisAllowlist::from_settings(&self.crisis)
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

    /// Change a value by dot-separated key, validating the result.
    ///
    /// The config is left untouched on error. Arrays take comma-separated values.
    /// An empty `privacy_gaps.seed_key` clears the key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
