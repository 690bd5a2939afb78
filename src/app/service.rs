//! The alarm controller service.
//!
//! [`SecurityService`] owns the detection memory and the decision policy.
//! Ports are borrowed per call, never stored, so the caller decides which
//! repository, detector and sink an event runs against.
//!
//! ```text
//!  SecurityRepository ◀──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                          │     SecurityService       │
//!       ImageDetector  ◀── │  rules · detection memory │
//!                          └──────────────────────────┘
//! ```
//!
//! Every operation is read → decide → write.  The writes of one event go
//! through a [`Transaction`]: if any write fails, the earlier writes of
//! the same event are reverted and no events are emitted.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::config::SecurityConfig;
use crate::error::{Error, Result};
use crate::fsm::rules;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::image::Image;
use crate::sensor::Sensor;

use super::commands::SecurityCommand;
use super::events::SecurityEvent;
use super::ports::{EventSink, ImageDetector, SecurityRepository, StorageError};

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The alarm controller.
pub struct SecurityService {
    config: SecurityConfig,
    /// Verdict of the last successfully processed image.  Written only by
    /// [`process_image`](Self::process_image), read only by
    /// [`set_arming_status`](Self::set_arming_status).
    cat_detected: bool,
}

impl SecurityService {
    pub fn new(config: SecurityConfig) -> Self {
        Self {
            config,
            cat_detected: false,
        }
    }

    // ── Events ────────────────────────────────────────────────

    /// Record a sensor's new activation flag and apply its alarm effect.
    ///
    /// The flag is always written; the alarm status only when a rule fires.
    /// Fails with [`Error::UnknownSensor`] if the repository doesn't know
    /// the sensor.
    pub fn set_sensor_active(
        &mut self,
        sensor: &Sensor,
        active: bool,
        repo: &mut impl SecurityRepository,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let Some(previous) = repo.find_sensor(sensor) else {
            warn!("Rejected activation change for unknown sensor {}", sensor);
            return Err(Error::UnknownSensor(sensor.name().to_owned()));
        };

        let alarm = repo.alarm_status();
        let arming = repo.arming_status();
        let next = rules::on_sensor_change(
            alarm,
            arming,
            previous.is_active(),
            active,
            &self.config.policy,
        );
        if next.is_none() {
            debug!(
                "Sensor {} {} -> {}: alarm stays {}",
                previous,
                previous.is_active(),
                active,
                alarm
            );
        }

        let mut tx = Transaction::new(repo);
        let updated = previous.with_active(active);
        let result = tx.update_sensor(&previous, &updated).and_then(|()| match next {
            Some(status) => tx.set_alarm_status(status),
            None => Ok(()),
        });
        tx.finish(result, sink)
    }

    /// Switch the arming mode.
    ///
    /// Disarming always clears the alarm.  Arming silently resets every
    /// sensor to inactive (no escalation rules run), then raises the alarm
    /// if arming home while the last image showed a cat.
    pub fn set_arming_status(
        &mut self,
        status: ArmingStatus,
        repo: &mut impl SecurityRepository,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let mut tx = Transaction::new(repo);
        let result = apply_arming(&mut tx, status, self.cat_detected);
        tx.finish(result, sink)
    }

    /// Run the detector on `image` and apply the verdict.
    ///
    /// A detector failure leaves the alarm status and the detection memory
    /// untouched.  Returns the verdict on success.
    pub fn process_image(
        &mut self,
        image: &Image,
        repo: &mut impl SecurityRepository,
        detector: &mut impl ImageDetector,
        sink: &mut impl EventSink,
    ) -> Result<bool> {
        let verdict = detector
            .detect(image, self.config.confidence_threshold)
            .map_err(|e| {
                warn!("Detector failed on {}: {}", image.label(), e);
                Error::from(e)
            })?;
        info!(
            "Image {}: cat {}",
            image.label(),
            if verdict { "detected" } else { "not detected" }
        );

        let any_active = repo.sensors().iter().any(Sensor::is_active);
        let next = rules::on_detection(
            verdict,
            repo.arming_status(),
            any_active,
            &self.config.policy,
        );

        let mut tx = Transaction::new(repo);
        let result = match next {
            Some(status) => tx.set_alarm_status(status),
            None => Ok(()),
        };
        tx.record(SecurityEvent::CatDetected(verdict));
        tx.finish(result, sink)?;

        self.cat_detected = verdict;
        Ok(verdict)
    }

    /// Register a sensor.  The alarm status is not affected.
    pub fn add_sensor(
        &mut self,
        sensor: Sensor,
        repo: &mut impl SecurityRepository,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if repo.find_sensor(&sensor).is_some() {
            warn!("Sensor {} already registered", sensor);
            return Err(Error::DuplicateSensor(sensor.name().to_owned()));
        }
        repo.add_sensor(sensor.clone())?;
        info!("Sensor {} added", sensor);
        sink.emit(&SecurityEvent::SensorStatusChanged(sensor));
        Ok(())
    }

    /// Unregister a sensor.  The alarm status is not affected.
    pub fn remove_sensor(
        &mut self,
        sensor: &Sensor,
        repo: &mut impl SecurityRepository,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let Some(stored) = repo.find_sensor(sensor) else {
            warn!("Cannot remove unknown sensor {}", sensor);
            return Err(Error::UnknownSensor(sensor.name().to_owned()));
        };
        repo.remove_sensor(&stored)?;
        info!("Sensor {} removed", stored);
        sink.emit(&SecurityEvent::SensorStatusChanged(stored));
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (console, UI, camera feed, queue).
    pub fn handle_command(
        &mut self,
        cmd: SecurityCommand,
        repo: &mut impl SecurityRepository,
        detector: &mut impl ImageDetector,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            SecurityCommand::SetSensorActive { sensor, active } => {
                self.set_sensor_active(&sensor, active, repo, sink)
            }
            SecurityCommand::SetArmingStatus(status) => self.set_arming_status(status, repo, sink),
            SecurityCommand::ProcessImage(image) => {
                self.process_image(&image, repo, detector, sink).map(|_| ())
            }
            SecurityCommand::AddSensor(sensor) => self.add_sensor(sensor, repo, sink),
            SecurityCommand::RemoveSensor(sensor) => self.remove_sensor(&sensor, repo, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self, repo: &impl SecurityRepository) -> AlarmStatus {
        repo.alarm_status()
    }

    pub fn arming_status(&self, repo: &impl SecurityRepository) -> ArmingStatus {
        repo.arming_status()
    }

    /// Sensors whose activation flag is set.
    pub fn active_sensors(&self, repo: &impl SecurityRepository) -> BTreeSet<Sensor> {
        repo.sensors().into_iter().filter(Sensor::is_active).collect()
    }

    /// Whether the last successfully processed image showed a cat.
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }
}

fn apply_arming<R: SecurityRepository>(
    tx: &mut Transaction<'_, R>,
    status: ArmingStatus,
    cat_detected: bool,
) -> core::result::Result<(), StorageError> {
    if status.is_armed() {
        for sensor in tx.repo.sensors().into_iter().filter(Sensor::is_active) {
            tx.update_sensor(&sensor, &sensor.with_active(false))?;
        }
    }
    if let Some(alarm) = rules::on_arming_change(status, cat_detected) {
        tx.set_alarm_status(alarm)?;
    }
    tx.set_arming_status(status)
}

// ───────────────────────────────────────────────────────────────
// Transaction
// ───────────────────────────────────────────────────────────────

/// A repository write that can be reverted.
enum Undo {
    Sensor(Sensor),
    Alarm(AlarmStatus),
    Arming(ArmingStatus),
}

/// Write-through unit of work for one event.
///
/// Each write records how to revert it.  [`finish`](Self::finish) either
/// emits the collected events or replays the undo log in reverse.
struct Transaction<'a, R: SecurityRepository> {
    repo: &'a mut R,
    undo: Vec<Undo>,
    events: Vec<SecurityEvent>,
}

impl<'a, R: SecurityRepository> Transaction<'a, R> {
    fn new(repo: &'a mut R) -> Self {
        Self {
            repo,
            undo: Vec::new(),
            events: Vec::new(),
        }
    }

    fn update_sensor(
        &mut self,
        previous: &Sensor,
        next: &Sensor,
    ) -> core::result::Result<(), StorageError> {
        self.repo.update_sensor(next)?;
        self.undo.push(Undo::Sensor(previous.clone()));
        if previous.is_active() != next.is_active() {
            self.events.push(SecurityEvent::SensorStatusChanged(next.clone()));
        }
        Ok(())
    }

    fn set_alarm_status(&mut self, to: AlarmStatus) -> core::result::Result<(), StorageError> {
        let from = self.repo.alarm_status();
        self.repo.set_alarm_status(to)?;
        self.undo.push(Undo::Alarm(from));
        if from != to {
            self.events.push(SecurityEvent::AlarmStatusChanged { from, to });
        }
        Ok(())
    }

    fn set_arming_status(&mut self, to: ArmingStatus) -> core::result::Result<(), StorageError> {
        let from = self.repo.arming_status();
        self.repo.set_arming_status(to)?;
        self.undo.push(Undo::Arming(from));
        self.events.push(SecurityEvent::ArmingStatusChanged { from, to });
        Ok(())
    }

    fn record(&mut self, event: SecurityEvent) {
        self.events.push(event);
    }

    fn finish(
        self,
        result: core::result::Result<(), StorageError>,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                self.commit(sink);
                Ok(())
            }
            Err(e) => {
                warn!("Repository write failed ({}), rolling back event", e);
                self.rollback();
                Err(Error::Storage(e))
            }
        }
    }

    fn commit(self, sink: &mut impl EventSink) {
        for event in &self.events {
            if let SecurityEvent::AlarmStatusChanged { from, to } = event {
                info!("Alarm status: {} -> {}", from, to);
            }
            if let SecurityEvent::ArmingStatusChanged { from, to } = event {
                info!("Arming status: {} -> {}", from, to);
            }
            sink.emit(event);
        }
    }

    fn rollback(self) {
        for undo in self.undo.into_iter().rev() {
            let reverted = match &undo {
                Undo::Sensor(sensor) => self.repo.update_sensor(sensor),
                Undo::Alarm(status) => self.repo.set_alarm_status(*status),
                Undo::Arming(status) => self.repo.set_arming_status(*status),
            };
            if let Err(e) = reverted {
                warn!("Rollback write failed: {}", e);
            }
        }
    }
}
