//! Controller running against the JSON file repository: decisions survive
//! a restart because every committed write lands on disk.

use super::mock_ports::{RecordingSink, ScriptedDetector, image};

use catpoint::adapters::json_store::JsonFileRepository;
use catpoint::app::service::SecurityService;
use catpoint::config::SecurityConfig;
use catpoint::fsm::{AlarmStatus, ArmingStatus};
use catpoint::sensor::{Sensor, SensorType};

#[test]
fn alarm_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let door = Sensor::new("Front Door", SensorType::Door);
    let mut sink = RecordingSink::default();

    {
        let mut repo = JsonFileRepository::open(&path).unwrap();
        let mut service = SecurityService::new(SecurityConfig::default());
        service.add_sensor(door.clone(), &mut repo, &mut sink).unwrap();
        service
            .set_arming_status(ArmingStatus::ArmedAway, &mut repo, &mut sink)
            .unwrap();
        service
            .set_sensor_active(&door, true, &mut repo, &mut sink)
            .unwrap();
    }

    let mut repo = JsonFileRepository::open(&path).unwrap();
    let mut service = SecurityService::new(SecurityConfig::default());
    assert_eq!(service.alarm_status(&repo), AlarmStatus::PendingAlarm);
    assert_eq!(service.arming_status(&repo), ArmingStatus::ArmedAway);
    assert!(service.active_sensors(&repo).contains(&door));

    // Detection memory is process state and starts empty after a restart.
    assert!(!service.cat_detected());
    service
        .process_image(&image(), &mut repo, &mut ScriptedDetector::no_cat(), &mut sink)
        .unwrap();
    assert_eq!(service.alarm_status(&repo), AlarmStatus::NoAlarm);
}
