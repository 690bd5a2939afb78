//! Unified error type for the alarm controller.
//!
//! Every fallible controller operation funnels into [`Error`].  Port
//! failures keep their typed form inside the wrapping variant so callers
//! can still tell a flaky detector from a broken store.

use core::fmt;

use crate::app::ports::{DetectorError, StorageError};
use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The referenced sensor is not known to the repository.
    UnknownSensor(String),
    /// A sensor with the same name and type is already registered.
    DuplicateSensor(String),
    /// The detector failed; alarm status and detection memory are untouched.
    Detector(DetectorError),
    /// A repository write failed; writes made by the same event were reverted.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// The command queue is full and the command was dropped.
    QueueFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSensor(name) => write!(f, "unknown sensor: {name}"),
            Self::DuplicateSensor(name) => write!(f, "sensor already registered: {name}"),
            Self::Detector(e) => write!(f, "detector: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::QueueFull => write!(f, "command queue full"),
        }
    }
}

impl std::error::Error for Error {}

impl From<DetectorError> for Error {
    fn from(e: DetectorError) -> Self {
        Self::Detector(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
