//! Enlistment Savings - projection engine for the tiered military savings matching program
//!
//! This library provides:
//! - Month-by-month accrual projections with year-specific matching terms
//! - Statutory assumption tables, loadable from CSV
//! - Cohort batch projections
//! - Shareable-link encoding and JSON persistence of runs

pub mod enrollment;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod share;
pub mod storage;
pub mod error;

// Re-export commonly used types
pub use enrollment::{DepositPlan, Enrollment, ServiceBranch};
pub use assumptions::{Assumptions, MatchSchedule, MatchTerms, ServiceTerms};
pub use projection::{AccrualEngine, AccrualResult, MonthlyRecord};
pub use scenario::ScenarioRunner;
pub use error::EngineError;
