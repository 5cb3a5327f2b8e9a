//! Core accrual engine for month-by-month matching projections

use crate::assumptions::Assumptions;
use crate::enrollment::Enrollment;
use crate::error::EngineError;
use super::ledger::{AccrualResult, MonthlyRecord};
use chrono::{Datelike, Months, NaiveDate};

/// Flat simple interest rate applied once to total personal principal
pub const INTEREST_RATE: f64 = 0.05;

/// Main accrual engine.
///
/// A pure function of its inputs: each [`run`](AccrualEngine::run) touches
/// only the enrollment and the read-only assumption tables and returns a
/// freshly allocated result, so concurrent runs never interfere.
pub struct AccrualEngine {
    assumptions: Assumptions,
}

impl AccrualEngine {
    /// Create a new accrual engine with the given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run the projection for a single enrollment.
    ///
    /// Boundary rule: the ledger covers every service month AND the calendar
    /// month containing the discharge date, so it holds `total_months + 1`
    /// records. Month `i` of the ledger is `start_date + i` calendar months
    /// (month-of-year arithmetic; the day is clamped by calendar
    /// normalization only and never shifts the month sequence).
    ///
    /// The only failure is [`EngineError::DateOverflow`], which aborts the
    /// run with no partial ledger.
    pub fn run(&self, enrollment: &Enrollment) -> Result<AccrualResult, EngineError> {
        let total_months = self.assumptions.service_terms.months_for(enrollment.branch);
        let schedule = &self.assumptions.match_schedule;

        let mut result = AccrualResult::new(enrollment.id, total_months);
        let mut total_deposit = 0.0;
        let mut total_matched = 0.0;

        for offset in 0..=total_months {
            let current = advance_months(enrollment.start_date, offset)?;
            let year = current.year();

            let terms = schedule.lookup(year);
            let raw = enrollment.deposits.monthly_for(schedule.bucket_year(year));

            let deposit = raw.min(terms.deposit_cap);
            let matched = deposit * terms.match_ratio;

            total_deposit += deposit;
            total_matched += matched;

            result.add_record(MonthlyRecord {
                year,
                month: current.month(),
                deposit,
                matched,
                running_total: total_deposit + total_matched,
            });
        }

        result.total_deposit = total_deposit;
        result.total_matched = total_matched;
        result.interest = total_deposit * INTEREST_RATE;
        result.final_total = total_deposit + total_matched + result.interest;

        log::debug!(
            "projected enrollment {}: {} ledger months, final total {:.0}",
            enrollment.id,
            result.monthly_ledger.len(),
            result.final_total
        );

        Ok(result)
    }
}

/// Advance a date by whole calendar months, clamping the day as needed
fn advance_months(start: NaiveDate, months: u32) -> Result<NaiveDate, EngineError> {
    start
        .checked_add_months(Months::new(months))
        .ok_or(EngineError::DateOverflow { start, months })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrollment::{DepositPlan, ServiceBranch};
    use approx::assert_relative_eq;

    fn engine() -> AccrualEngine {
        AccrualEngine::new(Assumptions::default_statutory())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn full_plan() -> DepositPlan {
        DepositPlan::from_amounts([
            (2022, 400_000.0),
            (2023, 400_000.0),
            (2024, 400_000.0),
            (2025, 550_000.0),
        ])
    }

    #[test]
    fn test_army_2022_months_match_at_a_third() {
        // Scenario A: every 2022 month deposits at the cap and matches at 0.33
        let deposits = DepositPlan::from_amounts([(2022, 400_000.0)]);
        let enrollment = Enrollment::new(1, date(2022, 1, 1), ServiceBranch::Army, deposits);

        let result = engine().run(&enrollment).unwrap();

        assert_eq!(result.total_months, 18);
        let months_2022: Vec<_> = result
            .monthly_ledger
            .iter()
            .filter(|m| m.year == 2022)
            .collect();
        assert_eq!(months_2022.len(), 12);
        for record in months_2022 {
            assert_eq!(record.deposit, 400_000.0);
            assert_eq!(record.matched, record.deposit * 0.33);
        }

        // 2023 bucket was never supplied, so those months deposit nothing
        for record in result.monthly_ledger.iter().filter(|m| m.year == 2023) {
            assert_eq!(record.deposit, 0.0);
            assert_eq!(record.matched, 0.0);
        }
    }

    #[test]
    fn test_deposit_clamped_to_cap() {
        // Scenario B: 600k against the 400k cap
        let deposits = DepositPlan::from_amounts([(2022, 600_000.0)]);
        let enrollment = Enrollment::new(2, date(2022, 3, 1), ServiceBranch::Army, deposits);

        let result = engine().run(&enrollment).unwrap();
        let first = &result.monthly_ledger[0];

        assert_eq!(first.deposit, 400_000.0);
        assert_eq!(first.matched, 400_000.0 * 0.33);
    }

    #[test]
    fn test_service_period_spans_year_boundaries() {
        // Scenario C: start 2023-11-01, 18 months + discharge month
        let enrollment = Enrollment::new(3, date(2023, 11, 1), ServiceBranch::Army, full_plan());

        let result = engine().run(&enrollment).unwrap();

        let years: std::collections::BTreeSet<i32> =
            result.monthly_ledger.iter().map(|m| m.year).collect();
        assert_eq!(years, [2023, 2024, 2025].into_iter().collect());

        for record in &result.monthly_ledger {
            match record.year {
                2023 => {
                    assert_eq!(record.deposit, 400_000.0);
                    assert_eq!(record.matched, record.deposit * 0.71);
                }
                2024 => {
                    assert_eq!(record.deposit, 400_000.0);
                    assert_eq!(record.matched, record.deposit * 1.0);
                }
                2025 => {
                    assert_eq!(record.deposit, 550_000.0);
                    assert_eq!(record.matched, record.deposit * 1.0);
                }
                other => panic!("unexpected ledger year {}", other),
            }
        }
    }

    #[test]
    fn test_years_beyond_table_use_fallback_terms() {
        // Scenario E: start several years past the last tabulated entry
        let deposits = DepositPlan::from_amounts([(2025, 600_000.0)]);
        let enrollment = Enrollment::new(4, date(2031, 3, 1), ServiceBranch::Army, deposits);

        let result = engine().run(&enrollment).unwrap();

        for record in &result.monthly_ledger {
            // Fallback: ratio 1.0, cap 550k; bucket collapses to 2025
            assert_eq!(record.deposit, 550_000.0);
            assert_eq!(record.matched, 550_000.0);
        }
    }

    #[test]
    fn test_discharge_month_is_included() {
        let enrollment = Enrollment::new(5, date(2022, 1, 15), ServiceBranch::Army, full_plan());

        let result = engine().run(&enrollment).unwrap();

        assert_eq!(result.total_months, 18);
        assert_eq!(result.monthly_ledger.len(), 19);

        let first = &result.monthly_ledger[0];
        assert_eq!((first.year, first.month), (2022, 1));

        // 2022-01-15 + 18 months = 2023-07-15
        let last = result.monthly_ledger.last().unwrap();
        assert_eq!((last.year, last.month), (2023, 7));
    }

    #[test]
    fn test_navy_and_airforce_durations() {
        let navy = Enrollment::new(6, date(2024, 2, 1), ServiceBranch::Navy, full_plan());
        let airforce = Enrollment::new(7, date(2024, 2, 1), ServiceBranch::AirForce, full_plan());

        let navy_result = engine().run(&navy).unwrap();
        let airforce_result = engine().run(&airforce).unwrap();

        assert_eq!(navy_result.total_months, 20);
        assert_eq!(navy_result.monthly_ledger.len(), 21);
        assert_eq!(airforce_result.total_months, 21);
        assert_eq!(airforce_result.monthly_ledger.len(), 22);
    }

    #[test]
    fn test_totals_are_exact_sums_of_the_ledger() {
        let enrollment = Enrollment::new(8, date(2022, 7, 1), ServiceBranch::Navy, full_plan());

        let result = engine().run(&enrollment).unwrap();

        let deposit_sum: f64 = result.monthly_ledger.iter().map(|m| m.deposit).sum();
        let matched_sum: f64 = result.monthly_ledger.iter().map(|m| m.matched).sum();

        assert_eq!(result.total_deposit, deposit_sum);
        assert_eq!(result.total_matched, matched_sum);
        assert_eq!(result.interest, result.total_deposit * INTEREST_RATE);
        assert_eq!(
            result.final_total,
            result.total_deposit + result.total_matched + result.interest
        );
    }

    #[test]
    fn test_running_total_is_non_decreasing() {
        let enrollment = Enrollment::new(9, date(2023, 2, 1), ServiceBranch::AirForce, full_plan());

        let result = engine().run(&enrollment).unwrap();

        for pair in result.monthly_ledger.windows(2) {
            assert!(pair[1].running_total >= pair[0].running_total);
        }
        let last = result.monthly_ledger.last().unwrap();
        assert_eq!(last.running_total, result.total_deposit + result.total_matched);
    }

    #[test]
    fn test_cap_invariant_every_month() {
        let deposits = DepositPlan::from_amounts([
            (2022, 900_000.0),
            (2023, 900_000.0),
            (2024, 900_000.0),
            (2025, 900_000.0),
        ]);
        let enrollment = Enrollment::new(10, date(2022, 5, 1), ServiceBranch::Navy, deposits);

        let e = engine();
        let result = e.run(&enrollment).unwrap();

        for record in &result.monthly_ledger {
            let cap = e.assumptions().match_schedule.lookup(record.year).deposit_cap;
            assert!(record.deposit <= cap);
        }
    }

    #[test]
    fn test_run_is_idempotent() {
        let enrollment = Enrollment::new(11, date(2022, 1, 1), ServiceBranch::Marine, full_plan());

        let e = engine();
        let first = e.run(&enrollment).unwrap();
        let second = e.run(&enrollment).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_final_total_for_known_scenario() {
        // Army from 2024-01-01: 12 months of 2024 terms, then 7 of 2025
        let enrollment = Enrollment::new(12, date(2024, 1, 1), ServiceBranch::Army, full_plan());

        let result = engine().run(&enrollment).unwrap();

        let expected_deposit = 12.0 * 400_000.0 + 7.0 * 550_000.0;
        let expected_matched = expected_deposit; // ratio 1.0 throughout
        assert_relative_eq!(result.total_deposit, expected_deposit);
        assert_relative_eq!(result.total_matched, expected_matched);
        assert_relative_eq!(
            result.final_total,
            expected_deposit + expected_matched + expected_deposit * 0.05
        );
    }

    #[test]
    fn test_date_overflow_aborts_the_run() {
        let enrollment = Enrollment::new(13, NaiveDate::MAX, ServiceBranch::Army, full_plan());

        let err = engine().run(&enrollment).unwrap_err();
        assert!(matches!(err, EngineError::DateOverflow { .. }));
    }
}
