//! Failure paths: a failed event must leave the repository, the detection
//! memory and the event sink exactly as they were.

use super::mock_ports::{ScriptedDetector, fixture, image};

use catpoint::Error;
use catpoint::app::ports::{DetectorError, StorageError};
use catpoint::fsm::{AlarmStatus, ArmingStatus};

#[test]
fn detector_failure_changes_nothing() {
    let mut f = fixture(ArmingStatus::ArmedHome, AlarmStatus::Alarm);
    let mut detector = ScriptedDetector::returning([Err(DetectorError::Timeout)]);

    let err = f
        .service
        .process_image(&image(), &mut f.repo, &mut detector, &mut f.sink)
        .unwrap_err();
    assert_eq!(err, Error::Detector(DetectorError::Timeout));
    assert_eq!(f.service.alarm_status(&f.repo), AlarmStatus::Alarm);
    assert!(!f.service.cat_detected());
    assert!(f.repo.writes.is_empty());
    assert!(f.sink.events.is_empty());
}

#[test]
fn detector_failure_keeps_previous_verdict() {
    let mut f = fixture(ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
    let mut detector = ScriptedDetector::returning([Ok(true), Err(DetectorError::Unavailable)]);

    f.service
        .process_image(&image(), &mut f.repo, &mut detector, &mut f.sink)
        .unwrap();
    assert!(f
        .service
        .process_image(&image(), &mut f.repo, &mut detector, &mut f.sink)
        .is_err());

    f.service
        .set_arming_status(ArmingStatus::ArmedHome, &mut f.repo, &mut f.sink)
        .unwrap();
    assert_eq!(f.service.alarm_status(&f.repo), AlarmStatus::Alarm);
}

#[test]
fn failed_alarm_write_rolls_back_sensor_flag() {
    let mut f = fixture(ArmingStatus::ArmedAway, AlarmStatus::NoAlarm);
    f.repo.fail_alarm_writes = true;

    let err = f
        .service
        .set_sensor_active(&f.door, true, &mut f.repo, &mut f.sink)
        .unwrap_err();
    assert_eq!(err, Error::Storage(StorageError::IoError));
    assert!(!f.repo.is_active(&f.door), "sensor flag must be reverted");
    assert_eq!(f.service.alarm_status(&f.repo), AlarmStatus::NoAlarm);
    assert!(f.sink.events.is_empty());
}

#[test]
fn failed_alarm_write_on_camera_event_keeps_memory() {
    let mut f = fixture(ArmingStatus::ArmedHome, AlarmStatus::NoAlarm);
    f.repo.fail_alarm_writes = true;

    let err = f
        .service
        .process_image(&image(), &mut f.repo, &mut ScriptedDetector::cat(), &mut f.sink)
        .unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert!(!f.service.cat_detected());
    assert!(f.sink.events.is_empty());
}

#[test]
fn failed_arming_write_restores_sensors_and_alarm() {
    let mut f = fixture(ArmingStatus::ArmedAway, AlarmStatus::Alarm);
    f.repo.seed_active(&f.door);
    f.repo.seed_active(&f.motion);
    f.repo.fail_arming_writes = true;

    // Disarm: alarm write succeeds, arming write fails.
    assert!(f
        .service
        .set_arming_status(ArmingStatus::Disarmed, &mut f.repo, &mut f.sink)
        .is_err());
    assert_eq!(f.service.alarm_status(&f.repo), AlarmStatus::Alarm);
    assert_eq!(f.service.arming_status(&f.repo), ArmingStatus::ArmedAway);

    // Re-arm: sensor resets succeed, arming write fails.
    assert!(f
        .service
        .set_arming_status(ArmingStatus::ArmedHome, &mut f.repo, &mut f.sink)
        .is_err());
    assert!(f.repo.is_active(&f.door));
    assert!(f.repo.is_active(&f.motion));
    assert!(f.sink.events.is_empty());
}

#[test]
fn partial_sensor_reset_is_reverted() {
    let mut f = fixture(ArmingStatus::Disarmed, AlarmStatus::NoAlarm);
    f.repo.seed_active(&f.door);
    f.repo.seed_active(&f.window);
    // First reset succeeds, second fails, the revert of the first succeeds.
    f.repo.fail_sensor_write = Some(2);

    let err = f
        .service
        .set_arming_status(ArmingStatus::ArmedAway, &mut f.repo, &mut f.sink)
        .unwrap_err();
    assert_eq!(err, Error::Storage(StorageError::Full));
    assert_eq!(f.service.arming_status(&f.repo), ArmingStatus::Disarmed);
    assert_eq!(f.service.active_sensors(&f.repo).len(), 2);
    assert!(f.sink.events.is_empty());
}
