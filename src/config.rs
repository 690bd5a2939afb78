//! Controller configuration
//!
//! All tunable parameters for the alarm controller.  Values come from
//! defaults, optionally overridden by a JSON file and then by the command
//! line of the console driver.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How the two ambiguous alarm rules are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    /// While disarmed with the alarm sounding, any deactivation call (even
    /// for a sensor that was already inactive) drops the alarm to pending.
    pub disarmed_deactivation_downgrades_alarm: bool,
    /// A "no cat" verdict only clears the alarm when no sensor is active.
    pub clear_requires_inactive_sensors: bool,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            disarmed_deactivation_downgrades_alarm: true,
            clear_requires_inactive_sensors: false,
        }
    }
}

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum detector confidence (percent, 0-100) to count as a cat
    pub confidence_threshold: f32,
    /// JSON state file; `None` keeps state in memory only
    pub state_path: Option<PathBuf>,
    /// Seed for the fake detector; `None` seeds from OS entropy
    pub detector_seed: Option<u64>,
    pub policy: DecisionPolicy,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 50.0,
            state_path: None,
            detector_seed: None,
            policy: DecisionPolicy::default(),
        }
    }
}

impl SecurityConfig {
    /// Load and validate a JSON config file.  Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config: Self = serde_json::from_slice(&raw).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ValidationFailed(
                "confidence_threshold must be 0.0-100.0",
            ));
        }
        if self
            .state_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::ValidationFailed("state_path must not be empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file does not exist.
    NotFound,
    /// Config file is not valid JSON for [`SecurityConfig`].
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the file.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
