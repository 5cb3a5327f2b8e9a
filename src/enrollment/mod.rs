//! Enrollment data structures and cohort loading

mod data;
pub mod loader;

pub use data::{DepositPlan, Enrollment, ServiceBranch};
pub use loader::{load_default_cohort, load_enrollments, load_enrollments_from_reader};
