//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every controller event through the
//! `log` facade.  A display or push-notification adapter would implement
//! the same trait.

use log::info;

use crate::app::events::SecurityEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`SecurityEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SecurityEvent) {
        match event {
            SecurityEvent::AlarmStatusChanged { from, to } => {
                info!("ALARM | {} -> {} | {}", from, to, to.description());
            }
            SecurityEvent::ArmingStatusChanged { from, to } => {
                info!("ARMING | {} -> {} | {}", from, to, to.description());
            }
            SecurityEvent::SensorStatusChanged(sensor) => {
                info!(
                    "SENSOR | {} | {}",
                    sensor,
                    if sensor.is_active() { "active" } else { "inactive" }
                );
            }
            SecurityEvent::CatDetected(seen) => {
                info!("CAMERA | cat {}", if *seen { "detected" } else { "not detected" });
            }
        }
    }
}
