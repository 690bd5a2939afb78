//! Mock port adapters for integration tests.
//!
//! `MockRepository` records every successful write so tests can assert on
//! the exact write history, and can be told to fail specific writes.
//! `ScriptedDetector` replays queued verdicts; `RecordingSink` keeps every
//! emitted event.

use std::collections::{BTreeSet, VecDeque};

use catpoint::adapters::memory::InMemoryRepository;
use catpoint::app::events::SecurityEvent;
use catpoint::app::ports::{
    DetectorError, EventSink, ImageDetector, SecurityRepository, StorageError,
};
use catpoint::app::service::SecurityService;
use catpoint::config::SecurityConfig;
use catpoint::fsm::{AlarmStatus, ArmingStatus};
use catpoint::image::Image;
use catpoint::sensor::{Sensor, SensorType};

// ── Repository write record ───────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RepoWrite {
    Alarm(AlarmStatus),
    Arming(ArmingStatus),
    Sensor { name: String, active: bool },
    Added(String),
    Removed(String),
}

// ── MockRepository ────────────────────────────────────────────

#[derive(Default)]
pub struct MockRepository {
    pub inner: InMemoryRepository,
    pub writes: Vec<RepoWrite>,
    pub fail_alarm_writes: bool,
    pub fail_arming_writes: bool,
    /// Fail only the n-th sensor write attempt (1-based).
    pub fail_sensor_write: Option<usize>,
    sensor_attempts: usize,
}

#[allow(dead_code)]
impl MockRepository {
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Self {
        Self {
            inner: InMemoryRepository::with_sensors(sensors),
            ..Self::default()
        }
    }

    /// Seed statuses without recording writes.
    pub fn seeded(mut self, arming: ArmingStatus, alarm: AlarmStatus) -> Self {
        self.inner.set_arming_status(arming).unwrap();
        self.inner.set_alarm_status(alarm).unwrap();
        self
    }

    /// Mark a stored sensor active without recording a write.
    pub fn seed_active(&mut self, sensor: &Sensor) {
        self.inner.update_sensor(&sensor.with_active(true)).unwrap();
    }

    pub fn alarm_writes(&self) -> Vec<AlarmStatus> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                RepoWrite::Alarm(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn is_active(&self, sensor: &Sensor) -> bool {
        self.inner
            .find_sensor(sensor)
            .is_some_and(|s| s.is_active())
    }
}

impl SecurityRepository for MockRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.inner.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        if self.fail_alarm_writes {
            return Err(StorageError::IoError);
        }
        self.inner.set_alarm_status(status)?;
        self.writes.push(RepoWrite::Alarm(status));
        Ok(())
    }

    fn arming_status(&self) -> ArmingStatus {
        self.inner.arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        if self.fail_arming_writes {
            return Err(StorageError::IoError);
        }
        self.inner.set_arming_status(status)?;
        self.writes.push(RepoWrite::Arming(status));
        Ok(())
    }

    fn sensors(&self) -> BTreeSet<Sensor> {
        self.inner.sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError> {
        let name = sensor.name().to_owned();
        self.inner.add_sensor(sensor)?;
        self.writes.push(RepoWrite::Added(name));
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.sensor_attempts += 1;
        if self.fail_sensor_write == Some(self.sensor_attempts) {
            return Err(StorageError::Full);
        }
        self.inner.update_sensor(sensor)?;
        self.writes.push(RepoWrite::Sensor {
            name: sensor.name().to_owned(),
            active: sensor.is_active(),
        });
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.inner.remove_sensor(sensor)?;
        self.writes.push(RepoWrite::Removed(sensor.name().to_owned()));
        Ok(())
    }
}

// ── ScriptedDetector ──────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedDetector {
    pub verdicts: VecDeque<Result<bool, DetectorError>>,
    pub thresholds: Vec<f32>,
}

#[allow(dead_code)]
impl ScriptedDetector {
    pub fn returning(verdicts: impl IntoIterator<Item = Result<bool, DetectorError>>) -> Self {
        Self {
            verdicts: verdicts.into_iter().collect(),
            thresholds: Vec::new(),
        }
    }

    pub fn cat() -> Self {
        Self::returning([Ok(true)])
    }

    pub fn no_cat() -> Self {
        Self::returning([Ok(false)])
    }
}

impl ImageDetector for ScriptedDetector {
    fn detect(&mut self, _image: &Image, confidence_threshold: f32) -> Result<bool, DetectorError> {
        self.thresholds.push(confidence_threshold);
        self.verdicts
            .pop_front()
            .unwrap_or(Err(DetectorError::Unavailable))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<SecurityEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &SecurityEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

#[allow(dead_code)]
pub struct Fixture {
    pub service: SecurityService,
    pub repo: MockRepository,
    pub sink: RecordingSink,
    pub door: Sensor,
    pub window: Sensor,
    pub motion: Sensor,
}

pub fn fixture(arming: ArmingStatus, alarm: AlarmStatus) -> Fixture {
    fixture_with(SecurityConfig::default(), arming, alarm)
}

pub fn fixture_with(config: SecurityConfig, arming: ArmingStatus, alarm: AlarmStatus) -> Fixture {
    let door = Sensor::new("Door", SensorType::Door);
    let window = Sensor::new("Window", SensorType::Window);
    let motion = Sensor::new("Motion", SensorType::Motion);
    let repo = MockRepository::with_sensors([door.clone(), window.clone(), motion.clone()])
        .seeded(arming, alarm);
    Fixture {
        service: SecurityService::new(config),
        repo,
        sink: RecordingSink::default(),
        door,
        window,
        motion,
    }
}

pub fn image() -> Image {
    Image::from_bytes(vec![0xff, 0xd8, 0xff, 0xe0]).with_label("test.jpg")
}
