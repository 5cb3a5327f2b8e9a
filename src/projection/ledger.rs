//! Ledger output structures for accrual projections

use serde::{Deserialize, Serialize};

/// A single month of the accrual ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Calendar year of this month
    pub year: i32,

    /// Calendar month, 1-12
    pub month: u32,

    /// Personal deposit credited this month, after the cap
    pub deposit: f64,

    /// Program matching contribution for this month
    pub matched: f64,

    /// Cumulative deposit + matched through this month, interest excluded
    pub running_total: f64,
}

/// Complete result of one projection run.
///
/// Owned by the caller once returned; the engine keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Enrollment identifier
    pub enrollment_id: u32,

    /// Service duration in months (the ledger holds one extra record for
    /// the discharge month)
    pub total_months: u32,

    /// Total personal principal over the ledger
    pub total_deposit: f64,

    /// Total program matching over the ledger
    pub total_matched: f64,

    /// Flat simple interest on total personal principal
    pub interest: f64,

    /// total_deposit + total_matched + interest
    pub final_total: f64,

    /// Chronological monthly ledger
    pub monthly_ledger: Vec<MonthlyRecord>,
}

impl AccrualResult {
    pub fn new(enrollment_id: u32, total_months: u32) -> Self {
        Self {
            enrollment_id,
            total_months,
            total_deposit: 0.0,
            total_matched: 0.0,
            interest: 0.0,
            final_total: 0.0,
            monthly_ledger: Vec::with_capacity(total_months as usize + 1),
        }
    }

    /// Append a ledger record
    pub fn add_record(&mut self, record: MonthlyRecord) {
        self.monthly_ledger.push(record);
    }

    /// Flat summary for aggregate and batch output
    pub fn summary(&self) -> AccrualSummary {
        AccrualSummary {
            enrollment_id: self.enrollment_id,
            total_months: self.total_months,
            ledger_months: self.monthly_ledger.len() as u32,
            total_deposit: self.total_deposit,
            total_matched: self.total_matched,
            interest: self.interest,
            final_total: self.final_total,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualSummary {
    pub enrollment_id: u32,
    pub total_months: u32,
    pub ledger_months: u32,
    pub total_deposit: f64,
    pub total_matched: f64,
    pub interest: f64,
    pub final_total: f64,
}
