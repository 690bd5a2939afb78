//! Alarm and arming state definitions.
//!
//! Both statuses are single-valued and process-wide; they live in the
//! repository and are only changed by the controller.  The transition
//! functions that decide the next [`AlarmStatus`] are in [`rules`].
//!
//! ```text
//!   NoAlarm ──[activation edge, armed]──▶ PendingAlarm ──[activation edge, armed]──▶ Alarm
//!      ▲                                      │
//!      └──────────[deactivation edge]─────────┘
//!
//!   any ──[disarm]──▶ NoAlarm          any ──[cat seen, armed home]──▶ Alarm
//! ```

pub mod rules;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alarm status
// ---------------------------------------------------------------------------

/// Current alarm level.  Variants are declared in severity order, so the
/// derived `Ord` gives `NoAlarm < PendingAlarm < Alarm`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub const ALL: [AlarmStatus; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    /// Next severity level, saturating at [`AlarmStatus::Alarm`].
    pub const fn escalated(self) -> Self {
        match self {
            Self::NoAlarm => Self::PendingAlarm,
            Self::PendingAlarm | Self::Alarm => Self::Alarm,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlarm => write!(f, "NO_ALARM"),
            Self::PendingAlarm => write!(f, "PENDING_ALARM"),
            Self::Alarm => write!(f, "ALARM"),
        }
    }
}

// ---------------------------------------------------------------------------
// Arming status
// ---------------------------------------------------------------------------

/// Whether sensor activity is alarm-relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const ALL: [ArmingStatus; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => write!(f, "DISARMED"),
            Self::ArmedHome => write!(f, "ARMED_HOME"),
            Self::ArmedAway => write!(f, "ARMED_AWAY"),
        }
    }
}

impl FromStr for ArmingStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disarmed" | "disarm" => Ok(Self::Disarmed),
            "home" | "armed_home" => Ok(Self::ArmedHome),
            "away" | "armed_away" => Ok(Self::ArmedAway),
            _ => Err("arming status must be disarmed, home or away"),
        }
    }
}
