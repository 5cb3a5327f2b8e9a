//! Scenario runner for efficient batch projections
//!
//! Pre-loads assumptions once, then allows running many projections for
//! different enrollments without re-reading CSV files.

use crate::{Assumptions, Enrollment};
use crate::error::EngineError;
use crate::projection::{AccrualEngine, AccrualResult};

/// Pre-loaded scenario runner for efficient batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for enrollment in &cohort {
///     let result = runner.run(enrollment)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the statutory in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_statutory(),
        }
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection.
    /// Clones the base assumptions internally (two small tables, cheap)
    pub fn run(&self, enrollment: &Enrollment) -> Result<AccrualResult, EngineError> {
        let engine = AccrualEngine::new(self.base_assumptions.clone());
        engine.run(enrollment)
    }

    /// Run projections for a whole cohort with the same assumptions
    pub fn run_cohort(&self, enrollments: &[Enrollment]) -> Result<Vec<AccrualResult>, EngineError> {
        let engine = AccrualEngine::new(self.base_assumptions.clone());
        enrollments.iter().map(|e| engine.run(e)).collect()
    }

    /// Get reference to base assumptions for inspection/modification
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrollment::{DepositPlan, ServiceBranch};
    use chrono::NaiveDate;

    fn enrollment_with_monthly(id: u32, amount: f64) -> Enrollment {
        Enrollment::new(
            id,
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            ServiceBranch::Army,
            DepositPlan::from_amounts([(2023, amount), (2024, amount), (2025, amount)]),
        )
    }

    #[test]
    fn test_cohort_run() {
        let runner = ScenarioRunner::new();

        let cohort: Vec<_> = [100_000.0, 250_000.0, 400_000.0]
            .iter()
            .enumerate()
            .map(|(i, &amount)| enrollment_with_monthly(i as u32 + 1, amount))
            .collect();

        let results = runner.run_cohort(&cohort).unwrap();
        assert_eq!(results.len(), 3);

        // Larger monthly deposits should produce a larger final payout
        assert!(results[2].final_total > results[1].final_total);
        assert!(results[1].final_total > results[0].final_total);
    }

    #[test]
    fn test_runner_matches_direct_engine() {
        let runner = ScenarioRunner::new();
        let enrollment = enrollment_with_monthly(1, 300_000.0);

        let via_runner = runner.run(&enrollment).unwrap();
        let direct = AccrualEngine::new(Assumptions::default_statutory())
            .run(&enrollment)
            .unwrap();

        assert_eq!(via_runner, direct);
    }
}
