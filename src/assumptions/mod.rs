//! Program assumptions: matching terms and service durations

mod match_table;
mod service;
pub mod loader;

pub use match_table::{MatchSchedule, MatchTerms};
pub use service::ServiceTerms;

use std::error::Error;
use std::path::Path;

/// Container for all projection assumptions
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub match_schedule: MatchSchedule,
    pub service_terms: ServiceTerms,
}

impl Assumptions {
    /// Create assumptions with the statutory in-memory tables
    pub fn default_statutory() -> Self {
        Self {
            match_schedule: MatchSchedule::default_statutory(),
            service_terms: ServiceTerms::default_statutory(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let entries = loader::load_match_terms(path)?;
        let match_schedule =
            MatchSchedule::from_entries(entries).ok_or("match term table is empty")?;
        let service_terms = loader::load_service_months(path)?;

        Ok(Self {
            match_schedule,
            service_terms,
        })
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_statutory()
    }
}
