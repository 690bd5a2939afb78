//! JSON file repository adapter.
//!
//! Implements [`SecurityRepository`] with write-through persistence: every
//! setter updates the in-memory [`RepositoryState`] and rewrites the file.
//! Reads never touch the disk.
//!
//! - Missing file on open: start from defaults (first run).
//! - Unparseable file: [`StorageError::Corrupted`], nothing is overwritten.
//! - Atomic writes: the state goes to a sibling temp file that is then
//!   renamed over the target.
//! - A failed write restores the previous in-memory state, so memory and
//!   disk never disagree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::memory::RepositoryState;
use crate::app::ports::{SecurityRepository, StorageError};
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensor::Sensor;

pub struct JsonFileRepository {
    path: PathBuf,
    state: RepositoryState,
}

impl JsonFileRepository {
    /// Open the state file at `path`.  It is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let state = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                warn!("JsonFileRepository: {} is corrupt: {}", path.display(), e);
                StorageError::Corrupted
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "JsonFileRepository: no state at {}, using defaults",
                    path.display()
                );
                RepositoryState::default()
            }
            Err(e) => {
                warn!("JsonFileRepository: cannot read {}: {}", path.display(), e);
                return Err(StorageError::IoError);
            }
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&self.state).map_err(|_| StorageError::IoError)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes)
            .and_then(|()| std::fs::rename(&tmp, &self.path))
            .map_err(|e| {
                warn!(
                    "JsonFileRepository: write to {} failed: {}",
                    self.path.display(),
                    e
                );
                StorageError::IoError
            })?;
        debug!("JsonFileRepository: {} bytes written", bytes.len());
        Ok(())
    }

    /// Apply `change` to the state and persist it, restoring the previous
    /// state if either step fails.
    fn write_with(
        &mut self,
        change: impl FnOnce(&mut RepositoryState) -> Result<(), StorageError>,
    ) -> Result<(), StorageError> {
        let before = self.state.clone();
        let result = change(&mut self.state).and_then(|()| self.persist());
        if result.is_err() {
            self.state = before;
        }
        result
    }
}

impl SecurityRepository for JsonFileRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.state.alarm_status
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        self.write_with(|s| {
            s.alarm_status = status;
            Ok(())
        })
    }

    fn arming_status(&self) -> ArmingStatus {
        self.state.arming_status
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.write_with(|s| {
            s.arming_status = status;
            Ok(())
        })
    }

    fn sensors(&self) -> BTreeSet<Sensor> {
        self.state.sensors.clone()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError> {
        self.write_with(|s| s.add_sensor(sensor))
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.write_with(|s| s.update_sensor(sensor))
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.write_with(|s| s.remove_sensor(sensor))
    }

    fn find_sensor(&self, sensor: &Sensor) -> Option<Sensor> {
        self.state.sensors.get(sensor).cloned()
    }
}
