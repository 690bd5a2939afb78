//! Port traits: the boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (repository, detector, event sink) implement these
//! traits.  The [`SecurityService`](super::service::SecurityService) borrows
//! them per call via generics; it never owns a port.
//!
//! - Reads are infallible: a repository loads its state up front and
//!   serves reads from memory.
//! - Writes are fallible and last-write-wins per field.
//! - All port errors are typed; callers must handle every variant.

use std::collections::BTreeSet;

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::image::Image;
use crate::sensor::Sensor;

// ───────────────────────────────────────────────────────────────
// Repository port (driven adapter: domain ↔ durable state)
// ───────────────────────────────────────────────────────────────

/// Durable store of sensors, the alarm status and the arming status.
pub trait SecurityRepository {
    fn alarm_status(&self) -> AlarmStatus;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError>;

    fn arming_status(&self) -> ArmingStatus;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError>;

    /// Every registered sensor with its current activation flag.
    fn sensors(&self) -> BTreeSet<Sensor>;

    /// Register a new sensor.  Fails with [`StorageError::AlreadyExists`]
    /// if a sensor with the same identity is present.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError>;

    /// Persist the activation flag of an existing sensor.  Fails with
    /// [`StorageError::NotFound`] for an unknown identity.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError>;

    /// Unregister a sensor.  Fails with [`StorageError::NotFound`] for an
    /// unknown identity.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError>;

    /// Look up the stored copy of `sensor` by identity.
    fn find_sensor(&self, sensor: &Sensor) -> Option<Sensor> {
        self.sensors().get(sensor).cloned()
    }
}

// ───────────────────────────────────────────────────────────────
// Detector port (driven adapter: domain → vision backend)
// ───────────────────────────────────────────────────────────────

/// Vision capability: does this image show a cat?
///
/// Blocking.  Timeouts and retries belong to the implementation; the
/// controller treats any `Err` as "no verdict".
pub trait ImageDetector {
    /// `confidence_threshold` is a percentage (0-100).
    fn detect(&mut self, image: &Image, confidence_threshold: f32) -> Result<bool, DetectorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → listeners / UI / logs)
// ───────────────────────────────────────────────────────────────

/// The controller emits [`SecurityEvent`](super::events::SecurityEvent)s
/// through this port after each committed change.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::SecurityEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityRepository`] writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Referenced sensor does not exist.
    NotFound,
    /// A sensor with the same identity is already stored.
    AlreadyExists,
    /// Backing store is full.
    Full,
    /// Stored state could not be parsed.
    Corrupted,
    /// Generic I/O error.
    IoError,
}

/// Errors from [`ImageDetector::detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// The vision service could not be reached.
    Unavailable,
    /// The vision service did not answer in time.
    Timeout,
    /// The image could not be decoded.
    InvalidImage,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "sensor not found"),
            Self::AlreadyExists => write!(f, "sensor already exists"),
            Self::Full => write!(f, "storage full"),
            Self::Corrupted => write!(f, "stored state corrupted"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for DetectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "detector unavailable"),
            Self::Timeout => write!(f, "detector timed out"),
            Self::InvalidImage => write!(f, "image could not be decoded"),
        }
    }
}
