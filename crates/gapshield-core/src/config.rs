//! Privacy-gap feature configuration.
//!
//! [`PrivacyGapSettings`] is the loose, serde-facing shape read from TOML.
//! [`PrivacyGapConfig`] is the validated form every other module consumes;
//! the only ways to obtain one are [`Default`] and `TryFrom<PrivacyGapSettings>`,
//! so an infeasible configuration never reaches the generator.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::SeedKey;

pub(crate) const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Raw privacy-gap settings as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyGapSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_min_daily_gaps")]
    pub min_daily_gaps: u32,
    #[serde(default = "default_max_daily_gaps")]
    pub max_daily_gaps: u32,
    #[serde(default = "default_min_gap_duration_ms")]
    pub min_gap_duration_ms: i64,
    #[serde(default = "default_max_gap_duration_ms")]
    pub max_gap_duration_ms: i64,
    #[serde(default = "default_min_gap_spacing_ms")]
    pub min_gap_spacing_ms: i64,
    /// UTC hour at which gaps may start being placed.
    #[serde(default = "default_waking_hours_start")]
    pub waking_hours_start: u32,
    /// UTC hour (exclusive) after which no gap may extend.
    #[serde(default = "default_waking_hours_end")]
    pub waking_hours_end: u32,
    /// Hex-encoded secret for keyed seed derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_key: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_min_daily_gaps() -> u32 {
    2
}
fn default_max_daily_gaps() -> u32 {
    4
}
fn default_min_gap_duration_ms() -> i64 {
    5 * MS_PER_MINUTE
}
fn default_max_gap_duration_ms() -> i64 {
    15 * MS_PER_MINUTE
}
fn default_min_gap_spacing_ms() -> i64 {
    2 * MS_PER_HOUR
}
fn default_waking_hours_start() -> u32 {
    7
}
fn default_waking_hours_end() -> u32 {
    22
}

impl Default for PrivacyGapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_daily_gaps: default_min_daily_gaps(),
            max_daily_gaps: default_max_daily_gaps(),
            min_gap_duration_ms: default_min_gap_duration_ms(),
            max_gap_duration_ms: default_max_gap_duration_ms(),
            min_gap_spacing_ms: default_min_gap_spacing_ms(),
            waking_hours_start: default_waking_hours_start(),
            waking_hours_end: default_waking_hours_end(),
            seed_key: None,
        }
    }
}

/// Validated privacy-gap configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PrivacyGapSettings")]
pub struct PrivacyGapConfig {
    enabled: bool,
    min_daily_gaps: u32,
    max_daily_gaps: u32,
    min_gap_duration_ms: i64,
    max_gap_duration_ms: i64,
    min_gap_spacing_ms: i64,
    waking_hours_start: u32,
    waking_hours_end: u32,
    seed_key: Option<SeedKey>,
}

impl PrivacyGapConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn min_daily_gaps(&self) -> u32 {
        self.min_daily_gaps
    }

    pub fn max_daily_gaps(&self) -> u32 {
        self.max_daily_gaps
    }

    pub fn min_gap_duration_ms(&self) -> i64 {
        self.min_gap_duration_ms
    }

    pub fn max_gap_duration_ms(&self) -> i64 {
        self.max_gap_duration_ms
    }

    pub fn min_gap_spacing_ms(&self) -> i64 {
        self.min_gap_spacing_ms
    }

    pub fn waking_hours_start(&self) -> u32 {
        self.waking_hours_start
    }

    pub fn waking_hours_end(&self) -> u32 {
        self.waking_hours_end
    }

    pub fn seed_key(&self) -> Option<&SeedKey> {
        self.seed_key.as_ref()
    }

    /// Length of the waking-hours window in minutes.
    pub fn waking_window_minutes(&self) -> i64 {
        i64::from(self.waking_hours_end - self.waking_hours_start) * 60
    }

    /// Same config with the scheduled-gap path switched on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Same config with keyed seeding.
    pub fn with_seed_key(mut self, key: SeedKey) -> Self {
        self.seed_key = Some(key);
        self
    }

    /// Back to the serde-facing shape.
    pub fn to_settings(&self) -> PrivacyGapSettings {
        PrivacyGapSettings {
            enabled: self.enabled,
            min_daily_gaps: self.min_daily_gaps,
            max_daily_gaps: self.max_daily_gaps,
            min_gap_duration_ms: self.min_gap_duration_ms,
            max_gap_duration_ms: self.max_gap_duration_ms,
            min_gap_spacing_ms: self.min_gap_spacing_ms,
            waking_hours_start: self.waking_hours_start,
            waking_hours_end: self.waking_hours_end,
            seed_key: self.seed_key.as_ref().map(SeedKey::to_hex),
        }
    }
}

impl Default for PrivacyGapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_daily_gaps: default_min_daily_gaps(),
            max_daily_gaps: default_max_daily_gaps(),
            min_gap_duration_ms: default_min_gap_duration_ms(),
            max_gap_duration_ms: default_max_gap_duration_ms(),
            min_gap_spacing_ms: default_min_gap_spacing_ms(),
            waking_hours_start: default_waking_hours_start(),
            waking_hours_end: default_waking_hours_end(),
            seed_key: None,
        }
    }
}

impl Serialize for PrivacyGapConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_settings().serialize(serializer)
    }
}

/// Whole minutes needed to hold `ms`, rounded up.
pub(crate) fn ceil_minutes(ms: i64) -> i64 {
    (ms + MS_PER_MINUTE - 1) / MS_PER_MINUTE
}

impl TryFrom<PrivacyGapSettings> for PrivacyGapConfig {
    type Error = ConfigError;

    fn try_from(s: PrivacyGapSettings) -> Result<Self, Self::Error> {
        if s.min_daily_gaps > s.max_daily_gaps {
            return Err(ConfigError::invalid(
                "max_daily_gaps",
                format!(
                    "must be >= min_daily_gaps ({} > {})",
                    s.min_daily_gaps, s.max_daily_gaps
                ),
            ));
        }
        if s.min_gap_duration_ms <= 0 {
            return Err(ConfigError::invalid(
                "min_gap_duration_ms",
                "must be positive",
            ));
        }
        if s.min_gap_duration_ms > s.max_gap_duration_ms {
            return Err(ConfigError::invalid(
                "max_gap_duration_ms",
                format!(
                    "must be >= min_gap_duration_ms ({} > {})",
                    s.min_gap_duration_ms, s.max_gap_duration_ms
                ),
            ));
        }
        if s.min_gap_spacing_ms < 0 {
            return Err(ConfigError::invalid(
                "min_gap_spacing_ms",
                "must not be negative",
            ));
        }
        if s.waking_hours_end > 24 {
            return Err(ConfigError::invalid(
                "waking_hours_end",
                format!("must be <= 24, got {}", s.waking_hours_end),
            ));
        }
        if s.waking_hours_start >= s.waking_hours_end {
            return Err(ConfigError::invalid(
                "waking_hours_start",
                format!(
                    "must be < waking_hours_end ({} >= {})",
                    s.waking_hours_start, s.waking_hours_end
                ),
            ));
        }

        let window = i64::from(s.waking_hours_end - s.waking_hours_start) * 60;
        let window_ms = window * MS_PER_MINUTE;
        if s.max_gap_duration_ms > window_ms {
            return Err(ConfigError::invalid(
                "max_gap_duration_ms",
                format!("must fit the waking window ({window_ms} ms)"),
            ));
        }
        if s.min_gap_spacing_ms > window_ms {
            return Err(ConfigError::invalid(
                "min_gap_spacing_ms",
                format!("must fit the waking window ({window_ms} ms)"),
            ));
        }

        // The busiest possible day must fit: every gap at its longest, with
        // spacing between neighbours.
        let count = i64::from(s.max_daily_gaps);
        let needed = count
            .checked_mul(ceil_minutes(s.max_gap_duration_ms))
            .zip((count - 1).max(0).checked_mul(ceil_minutes(s.min_gap_spacing_ms)))
            .and_then(|(gaps, spacing)| gaps.checked_add(spacing))
            .unwrap_or(i64::MAX);
        if needed > window {
            return Err(ConfigError::invalid(
                "max_daily_gaps",
                format!(
                    "{} gaps with spacing need {needed} minutes but waking hours only span {window}",
                    s.max_daily_gaps
                ),
            ));
        }

        let seed_key = s.seed_key.as_deref().map(SeedKey::from_hex).transpose()?;

        Ok(Self {
            enabled: s.enabled,
            min_daily_gaps: s.min_daily_gaps,
            max_daily_gaps: s.max_daily_gaps,
            min_gap_duration_ms: s.min_gap_duration_ms,
            max_gap_duration_ms: s.max_gap_duration_ms,
            min_gap_spacing_ms: s.min_gap_spacing_ms,
            waking_hours_start: s.waking_hours_start,
            waking_hours_end: s.waking_hours_end,
            seed_key,
        })
    }
}
