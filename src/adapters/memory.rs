//! In-memory repository adapter.
//!
//! Implements [`SecurityRepository`] over a plain [`RepositoryState`].
//! Used by tests and by the console driver when no state file is
//! configured.  The JSON file adapter reuses the same state struct.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::app::ports::{SecurityRepository, StorageError};
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensor::Sensor;

/// Everything a repository persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryState {
    pub alarm_status: AlarmStatus,
    pub arming_status: ArmingStatus,
    pub sensors: BTreeSet<Sensor>,
}

impl RepositoryState {
    pub(super) fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError> {
        if self.sensors.insert(sensor) {
            Ok(())
        } else {
            Err(StorageError::AlreadyExists)
        }
    }

    pub(super) fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        if !self.sensors.contains(sensor) {
            return Err(StorageError::NotFound);
        }
        // `replace` swaps in the new activation flag; identity is unchanged.
        self.sensors.replace(sensor.clone());
        Ok(())
    }

    pub(super) fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        if self.sensors.remove(sensor) {
            Ok(())
        } else {
            Err(StorageError::NotFound)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: RepositoryState,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `sensors` (alarm and arming at defaults).
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Self {
        Self {
            state: RepositoryState {
                sensors: sensors.into_iter().collect(),
                ..RepositoryState::default()
            },
        }
    }

    pub fn from_state(state: RepositoryState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }
}

impl SecurityRepository for InMemoryRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.state.alarm_status
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        self.state.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> ArmingStatus {
        self.state.arming_status
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.state.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> BTreeSet<Sensor> {
        self.state.sensors.clone()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError> {
        self.state.add_sensor(sensor)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.state.update_sensor(sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.state.remove_sensor(sensor)
    }

    fn find_sensor(&self, sensor: &Sensor) -> Option<Sensor> {
        self.state.sensors.get(sensor).cloned()
    }
}
