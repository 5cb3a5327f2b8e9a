//! Enlistment Savings CLI
//!
//! Command-line interface for running savings-matching projections

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::Parser;
use enlistment_savings::{
    share, storage::RunStore, AccrualEngine, Assumptions, DepositPlan, Enrollment, EngineError,
    ServiceBranch,
};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Display units are 만원 (ten-thousand KRW); the engine works in KRW
const MANWON: f64 = 10_000.0;

#[derive(Debug, Parser)]
#[command(name = "enlistment_savings", about = "Projected payout for the enlistment savings matching program")]
struct Cli {
    /// Enlistment date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Service branch: army, navy, airforce, marine
    #[arg(long)]
    branch: Option<String>,

    /// Monthly deposit for a bucket year, e.g. --deposit 2022=400000 (repeatable)
    #[arg(long = "deposit", value_name = "YEAR=AMOUNT")]
    deposits: Vec<String>,

    /// Interpret deposit amounts as 만원 display units instead of KRW
    #[arg(long)]
    manwon: bool,

    /// Rebuild the inputs from a shared query string instead of flags
    #[arg(long, value_name = "QUERY")]
    from_link: Option<String>,

    /// Load assumptions from CSV in this directory instead of the statutory defaults
    #[arg(long, value_name = "DIR")]
    assumptions_dir: Option<PathBuf>,

    /// Persist this run to data/last_run.json
    #[arg(long)]
    save: bool,

    /// Print the shareable query string for these inputs
    #[arg(long)]
    print_link: bool,

    /// Write the full ledger to this CSV path
    #[arg(long, default_value = "projection_output.csv")]
    output: PathBuf,
}

fn parse_deposit_flag(raw: &str, manwon: bool) -> anyhow::Result<(i32, f64)> {
    let (year, amount) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("deposit must look like YEAR=AMOUNT, got: {}", raw))?;

    let year: i32 = year.parse().with_context(|| format!("bad deposit year: {}", year))?;
    let amount: f64 = amount
        .parse()
        .with_context(|| format!("bad deposit amount: {}", amount))?;

    let scale = if manwon { MANWON } else { 1.0 };
    Ok((year, amount * scale))
}

fn enrollment_from_args(cli: &Cli) -> anyhow::Result<Enrollment> {
    if let Some(query) = &cli.from_link {
        return Ok(share::from_query_string(query)?);
    }

    let start_date = cli.start_date.ok_or(EngineError::MissingStartDate)?;
    let branch: ServiceBranch = cli
        .branch
        .as_deref()
        .ok_or(EngineError::MissingBranch)?
        .parse()?;

    let mut deposits = DepositPlan::new();
    for raw in &cli.deposits {
        let (year, amount) = parse_deposit_flag(raw, cli.manwon)?;
        deposits.set(year, amount);
    }

    Ok(Enrollment::new(0, start_date, branch, deposits))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let enrollment = enrollment_from_args(&cli)?;

    let assumptions = match &cli.assumptions_dir {
        Some(dir) => Assumptions::from_csv_path(dir).map_err(|e| anyhow!("{}", e))?,
        None => Assumptions::default_statutory(),
    };

    let engine = AccrualEngine::new(assumptions);
    let result = engine.run(&enrollment)?;

    println!("Enlistment Savings v0.1.0");
    println!("=========================\n");
    println!("Start date: {}", enrollment.start_date);
    println!("Branch: {}", enrollment.branch.as_str());
    println!("Service months: {}", result.total_months);
    println!();

    // Ledger table: service months plus the discharge month
    println!("{:>5} {:>6} {:>6} {:>12} {:>12} {:>14}",
        "Month", "Year", "CalMo", "Deposit", "Matched", "RunningTotal");
    println!("{}", "-".repeat(60));
    for (i, record) in result.monthly_ledger.iter().enumerate() {
        println!("{:>5} {:>6} {:>6} {:>12.0} {:>12.2} {:>14.2}",
            i + 1,
            record.year,
            record.month,
            record.deposit,
            record.matched,
            record.running_total,
        );
    }

    // Write full ledger to CSV
    let mut file = File::create(&cli.output)
        .with_context(|| format!("Unable to create {}", cli.output.display()))?;
    writeln!(file, "Month,Year,CalendarMonth,Deposit,Matched,RunningTotal")?;
    for (i, record) in result.monthly_ledger.iter().enumerate() {
        writeln!(file, "{},{},{},{:.2},{:.2},{:.2}",
            i + 1,
            record.year,
            record.month,
            record.deposit,
            record.matched,
            record.running_total,
        )?;
    }
    println!("\nFull ledger written to: {}", cli.output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_months);
    println!("  Ledger Months: {}", summary.ledger_months);
    println!("  Total Deposit: {:.0} KRW", summary.total_deposit);
    println!("  Total Matched: {:.2} KRW", summary.total_matched);
    println!("  Interest (5% on principal): {:.2} KRW", summary.interest);
    println!("  Final Total: {:.2} KRW", summary.final_total);

    if cli.print_link {
        println!("\nShare link query: {}", share::to_query_string(&enrollment));
    }

    if cli.save {
        RunStore::default_location()
            .save(&enrollment, &result)
            .map_err(|e| anyhow!("{}", e))?;
    }

    Ok(())
}
