//! JSON persistence of the most recent projection run
//!
//! Keeps the most recent run as a JSON record at a fixed path so a later
//! session can reload it. The engine itself never reads or writes it.

use crate::enrollment::Enrollment;
use crate::projection::AccrualResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Default location for the persisted run
pub const DEFAULT_STORE_PATH: &str = "data/last_run.json";

/// A persisted projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRun {
    pub inputs: Enrollment,
    pub result: AccrualResult,
    pub saved_at: DateTime<Utc>,
}

/// File-backed store for the most recent run
#[derive(Debug, Clone)]
pub struct RunStore {
    path: PathBuf,
}

impl RunStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location
    pub fn default_location() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }

    /// Persist a run, stamping it with the current time
    pub fn save(&self, inputs: &Enrollment, result: &AccrualResult) -> Result<(), Box<dyn Error>> {
        let record = SavedRun {
            inputs: inputs.clone(),
            result: result.clone(),
            saved_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;

        log::info!("saved run for enrollment {} to {}", inputs.id, self.path.display());
        Ok(())
    }

    /// Reload the persisted run, if any
    pub fn load(&self) -> Result<Option<SavedRun>, Box<dyn Error>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }
}
