//! Accrual engine for single and cohort projections

mod engine;
mod ledger;

pub use engine::{AccrualEngine, INTEREST_RATE};
pub use ledger::{AccrualResult, AccrualSummary, MonthlyRecord};
