//! Run projections for an entire enlistment cohort
//!
//! Outputs per-enrollment summaries and calendar-month aggregates for the
//! whole cohort.

use anyhow::anyhow;
use enlistment_savings::{enrollment::load_default_cohort, AccrualEngine, AccrualResult, Assumptions};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

/// Aggregated amounts for one calendar month across the cohort
#[derive(Debug, Clone, Default)]
struct AggregatedMonth {
    enrollments: u32,
    deposit: f64,
    matched: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = Instant::now();
    println!("Loading enrollments from data/enlistment_cohort.csv...");

    let enrollments = load_default_cohort().map_err(|e| anyhow!("{}", e))?;
    println!("Loaded {} enrollments in {:?}", enrollments.len(), start.elapsed());

    let assumptions = Assumptions::default_statutory();

    println!("Running projections...");
    let proj_start = Instant::now();

    // Run projections in parallel
    let results: Vec<AccrualResult> = enrollments
        .par_iter()
        .map(|enrollment| {
            let engine = AccrualEngine::new(assumptions.clone());
            engine.run(enrollment)
        })
        .collect::<Result<_, _>>()?;

    println!("Projected {} enrollments in {:?}", results.len(), proj_start.elapsed());

    // Aggregate by calendar month
    let mut by_month: BTreeMap<(i32, u32), AggregatedMonth> = BTreeMap::new();
    for result in &results {
        for record in &result.monthly_ledger {
            let agg = by_month.entry((record.year, record.month)).or_default();
            agg.enrollments += 1;
            agg.deposit += record.deposit;
            agg.matched += record.matched;
        }
    }

    let csv_path = "cohort_output.csv";
    let mut file = File::create(csv_path)?;
    writeln!(file, "Year,Month,Enrollments,Deposit,Matched")?;
    for ((year, month), agg) in &by_month {
        writeln!(file, "{},{},{},{:.2},{:.2}",
            year, month, agg.enrollments, agg.deposit, agg.matched)?;
    }
    println!("Monthly aggregates written to: {}", csv_path);

    // Per-enrollment summaries
    println!("\n{:>4} {:>8} {:>14} {:>14} {:>12} {:>14}",
        "ID", "Months", "Deposit", "Matched", "Interest", "FinalTotal");
    println!("{}", "-".repeat(72));
    for result in &results {
        let s = result.summary();
        println!("{:>4} {:>8} {:>14.0} {:>14.2} {:>12.2} {:>14.2}",
            s.enrollment_id, s.total_months, s.total_deposit, s.total_matched,
            s.interest, s.final_total);
    }

    let cohort_total: f64 = results.iter().map(|r| r.final_total).sum();
    println!("\nCohort projected payout: {:.2} KRW", cohort_total);

    Ok(())
}
