//! Inbound commands to the controller.
//!
//! These represent actions requested by the outside world (console, UI,
//! camera feed) that the [`SecurityService`](super::service::SecurityService)
//! interprets and acts upon.  Commands can be built directly or parsed from
//! the line-oriented console language:
//!
//! ```text
//! arm home | arm away | disarm
//! sensor add <name> <door|window|motion>
//! sensor remove <name> <type>
//! sensor <name> <type> on|off
//! image <path>
//! status
//! ```

use core::fmt;
use std::path::Path;

use crate::fsm::ArmingStatus;
use crate::image::Image;
use crate::sensor::{Sensor, SensorType};

/// Commands that external adapters can send into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityCommand {
    /// Set a sensor's activation flag.
    SetSensorActive { sensor: Sensor, active: bool },

    /// Change the arming mode.
    SetArmingStatus(ArmingStatus),

    /// Run the detector on a camera image.
    ProcessImage(Image),

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Unregister a sensor.
    RemoveSensor(Sensor),
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleLine {
    Command(SecurityCommand),
    /// Print alarm, arming and active sensors.
    Status,
    /// Blank line or `#` comment.
    Empty,
}

/// A console line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid command: {}", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

fn err(msg: impl Into<String>) -> ParseCommandError {
    ParseCommandError(msg.into())
}

/// Parse one console line.  `image <path>` reads the file immediately.
pub fn parse_line(line: &str) -> Result<ConsoleLine, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(ConsoleLine::Empty);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let keyword = words[0].to_ascii_lowercase();

    let cmd = match (keyword.as_str(), &words[1..]) {
        ("status", []) => return Ok(ConsoleLine::Status),
        ("disarm", []) => SecurityCommand::SetArmingStatus(ArmingStatus::Disarmed),
        ("arm", [mode]) => {
            let status: ArmingStatus = mode.parse().map_err(err)?;
            if !status.is_armed() {
                return Err(err("arm expects home or away"));
            }
            SecurityCommand::SetArmingStatus(status)
        }
        ("sensor", [action, name, kind]) if action.eq_ignore_ascii_case("add") => {
            SecurityCommand::AddSensor(parse_sensor(name, kind)?)
        }
        ("sensor", [action, name, kind]) if action.eq_ignore_ascii_case("remove") => {
            SecurityCommand::RemoveSensor(parse_sensor(name, kind)?)
        }
        ("sensor", [name, kind, state]) => SecurityCommand::SetSensorActive {
            sensor: parse_sensor(name, kind)?,
            active: parse_on_off(state)?,
        },
        ("image", [path]) => {
            let image = Image::from_file(Path::new(path))
                .map_err(|e| err(format!("cannot read image {path}: {e}")))?;
            SecurityCommand::ProcessImage(image)
        }
        _ => return Err(err(line)),
    };
    Ok(ConsoleLine::Command(cmd))
}

fn parse_sensor(name: &str, kind: &str) -> Result<Sensor, ParseCommandError> {
    let sensor_type: SensorType = kind.parse().map_err(err)?;
    Ok(Sensor::new(name, sensor_type))
}

fn parse_on_off(word: &str) -> Result<bool, ParseCommandError> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "active" | "true" => Ok(true),
        "off" | "inactive" | "false" => Ok(false),
        _ => Err(err(format!("expected on or off, got {word}"))),
    }
}
