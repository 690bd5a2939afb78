//! Pure alarm transition rules.
//!
//! One function per event kind.  Each takes the current statuses and the
//! event's facts and returns `Some(next)` when the alarm status must be
//! written, or `None` to leave it alone.  No I/O, no hidden state: the
//! service reads the inputs from the repository and applies the verdict.
//!
//! ```text
//!  sensor edge        arming      alarm          ─▶ write
//!  ─────────────────  ──────────  ─────────────     ─────────────
//!  inactive→active    armed       NoAlarm           PendingAlarm
//!  inactive→active    armed       PendingAlarm      Alarm
//!  inactive→active    armed       Alarm             -
//!  inactive→active    disarmed    any               -
//!  active→inactive    any         PendingAlarm      NoAlarm
//!  active→inactive    any         NoAlarm / Alarm   -
//!  *→inactive         disarmed    Alarm             PendingAlarm  (policy)
//!  active→active      any         any               -
//! ```

use super::{AlarmStatus, ArmingStatus};
use crate::config::DecisionPolicy;

/// Decide the alarm effect of a sensor's activation flag changing from
/// `was_active` to `now_active`.
pub fn on_sensor_change(
    alarm: AlarmStatus,
    arming: ArmingStatus,
    was_active: bool,
    now_active: bool,
    policy: &DecisionPolicy,
) -> Option<AlarmStatus> {
    if !now_active
        && policy.disarmed_deactivation_downgrades_alarm
        && arming == ArmingStatus::Disarmed
        && alarm == AlarmStatus::Alarm
    {
        return Some(AlarmStatus::PendingAlarm);
    }

    match (was_active, now_active) {
        (false, true) if arming.is_armed() => {
            let next = alarm.escalated();
            (next != alarm).then_some(next)
        }
        (true, false) if alarm == AlarmStatus::PendingAlarm => Some(AlarmStatus::NoAlarm),
        _ => None,
    }
}

/// Decide the alarm effect of switching to `arming`.
///
/// `cat_detected` is the controller's detection memory: the verdict of the
/// last image processed, whatever the arming mode was at the time.
pub fn on_arming_change(arming: ArmingStatus, cat_detected: bool) -> Option<AlarmStatus> {
    match arming {
        ArmingStatus::Disarmed => Some(AlarmStatus::NoAlarm),
        ArmingStatus::ArmedHome if cat_detected => Some(AlarmStatus::Alarm),
        ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => None,
    }
}

/// Decide the alarm effect of a detector verdict.
pub fn on_detection(
    cat_detected: bool,
    arming: ArmingStatus,
    any_sensor_active: bool,
    policy: &DecisionPolicy,
) -> Option<AlarmStatus> {
    if cat_detected {
        return (arming == ArmingStatus::ArmedHome).then_some(AlarmStatus::Alarm);
    }
    if policy.clear_requires_inactive_sensors && any_sensor_active {
        return None;
    }
    Some(AlarmStatus::NoAlarm)
}
