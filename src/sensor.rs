//! Sensor entities.
//!
//! A sensor's identity is its `(name, type)` pair.  Equality, ordering and
//! hashing only look at the identity, so a set of sensors never holds two
//! entries for the same physical sensor regardless of their activation flag.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of binary sensor.  Fixed for the lifetime of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [Self::Door, Self::Window, Self::Motion];
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "door"),
            Self::Window => write!(f, "window"),
            Self::Motion => write!(f, "motion"),
        }
    }
}

impl FromStr for SensorType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            "motion" => Ok(Self::Motion),
            _ => Err("sensor type must be door, window or motion"),
        }
    }
}

/// A door, window or motion sensor and its current activation flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: String,
    #[serde(rename = "type")]
    sensor_type: SensorType,
    #[serde(default)]
    active: bool,
}

impl Sensor {
    /// Create an inactive sensor.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Copy of this sensor with the given activation flag.
    pub fn with_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sensor_type)
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sensor_type == other.sensor_type
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sensor_type.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
    }
}
