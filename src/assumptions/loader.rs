//! CSV-based assumption loader
//!
//! Loads program assumptions from CSV files in data/assumptions/

use super::match_table::MatchTerms;
use super::service::ServiceTerms;
use crate::enrollment::ServiceBranch;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Load matching terms from CSV.
///
/// Returns the year-keyed table; ratios outside [0, 1] and non-positive
/// caps are rejected at load time so the engine never sees them.
pub fn load_match_terms(path: &Path) -> Result<BTreeMap<i32, MatchTerms>, Box<dyn Error>> {
    let file = File::open(path.join("match_terms.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = BTreeMap::new();

    for result in reader.records() {
        let record = result?;
        let year: i32 = record[0].parse()?;
        let match_ratio: f64 = record[1].parse()?;
        let deposit_cap: f64 = record[2].parse()?;

        if !(0.0..=1.0).contains(&match_ratio) {
            return Err(format!("match ratio out of range for {}: {}", year, match_ratio).into());
        }
        if !deposit_cap.is_finite() || deposit_cap <= 0.0 {
            return Err(format!("non-positive deposit cap for {}: {}", year, deposit_cap).into());
        }

        entries.insert(year, MatchTerms { match_ratio, deposit_cap });
    }

    if entries.is_empty() {
        return Err("match_terms.csv contains no entries".into());
    }

    log::debug!("loaded match terms for {} years", entries.len());
    Ok(entries)
}

/// Load service durations from CSV.
///
/// Starts from the statutory defaults and overrides the branches the file
/// tabulates. Durations below one month are rejected.
pub fn load_service_months(path: &Path) -> Result<ServiceTerms, Box<dyn Error>> {
    let file = File::open(path.join("service_months.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut terms = ServiceTerms::default_statutory();

    for result in reader.records() {
        let record = result?;
        let branch: ServiceBranch = record[0].parse()?;
        let months: u32 = record[1].parse()?;

        if months < 1 {
            return Err(format!("service duration below one month for {}", branch.as_str()).into());
        }

        terms.set_months(branch, months);
    }

    Ok(terms)
}
