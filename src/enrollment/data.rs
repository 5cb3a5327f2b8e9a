//! Enrollment input records consumed by the accrual engine

use crate::error::EngineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Service branch of the enrollee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceBranch {
    Army,
    Navy,
    AirForce,
    Marine,
}

impl ServiceBranch {
    /// All branches, in table order
    pub const ALL: [ServiceBranch; 4] = [
        ServiceBranch::Army,
        ServiceBranch::Navy,
        ServiceBranch::AirForce,
        ServiceBranch::Marine,
    ];

    /// Wire token matching the external input contract
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceBranch::Army => "army",
            ServiceBranch::Navy => "navy",
            ServiceBranch::AirForce => "airforce",
            ServiceBranch::Marine => "marine",
        }
    }
}

impl FromStr for ServiceBranch {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "army" => Ok(ServiceBranch::Army),
            "navy" => Ok(ServiceBranch::Navy),
            "airforce" => Ok(ServiceBranch::AirForce),
            "marine" => Ok(ServiceBranch::Marine),
            other => Err(EngineError::UnknownBranch(other.to_string())),
        }
    }
}

/// Monthly deposit amounts keyed by bucket year, in canonical KRW.
///
/// Amounts are normalized on the way in: negative or non-finite values
/// collapse to zero, so the engine only ever sees non-negative finite
/// deposits. A bucket that was never supplied resolves to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepositPlan {
    amounts: BTreeMap<i32, f64>,
}

impl DepositPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from (bucket year, monthly amount) pairs
    pub fn from_amounts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut plan = Self::new();
        for (year, amount) in pairs {
            plan.set(year, amount);
        }
        plan
    }

    /// Set the monthly amount for a bucket year, normalizing bad input to zero
    pub fn set(&mut self, year: i32, amount: f64) {
        let normalized = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            0.0
        };
        self.amounts.insert(year, normalized);
    }

    /// Monthly amount for a resolved bucket year (zero if never supplied)
    pub fn monthly_for(&self, bucket_year: i32) -> f64 {
        self.amounts.get(&bucket_year).copied().unwrap_or(0.0)
    }

    /// Iterate supplied (bucket year, amount) pairs in year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.amounts.iter().map(|(&year, &amount)| (year, amount))
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// A single validated enrollment record.
///
/// Construction goes through the decoders in [`crate::share`],
/// [`crate::enrollment::loader`], or the CLI, all of which reject missing
/// dates and unknown branch tokens, so an `Enrollment` in hand is always
/// safe to project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Cohort identifier (0 for ad-hoc single runs)
    #[serde(default)]
    pub id: u32,

    /// Enlistment date
    pub start_date: NaiveDate,

    /// Service branch, determines the service duration
    pub branch: ServiceBranch,

    /// Monthly deposit amounts per bucket year
    pub deposits: DepositPlan,
}

impl Enrollment {
    pub fn new(id: u32, start_date: NaiveDate, branch: ServiceBranch, deposits: DepositPlan) -> Self {
        Self {
            id,
            start_date,
            branch,
            deposits,
        }
    }
}
