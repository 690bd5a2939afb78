//! Outbound controller events.
//!
//! The [`SecurityService`](super::service::SecurityService) emits these
//! through the [`EventSink`](super::ports::EventSink) port once an event
//! has been fully committed to the repository.  Adapters on the other side
//! decide what to do with them (log, refresh a display, push a notification).

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensor::Sensor;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityEvent {
    /// The alarm status was written with a new value.
    AlarmStatusChanged { from: AlarmStatus, to: AlarmStatus },

    /// The arming status was written.
    ArmingStatusChanged { from: ArmingStatus, to: ArmingStatus },

    /// A sensor's activation flag changed, or it was added or removed.
    SensorStatusChanged(Sensor),

    /// The detector returned a verdict for the last submitted image.
    CatDetected(bool),
}
