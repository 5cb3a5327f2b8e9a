//! Error taxonomy for input decoding and projection runs

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by input decoders and the accrual engine.
///
/// The validation variants (`MissingStartDate`, `MissingBranch`,
/// `UnknownBranch`, `InvalidDate`) are raised wherever raw text becomes an
/// [`Enrollment`](crate::Enrollment), always before the engine runs.
/// `DateOverflow` is the only fault the engine itself can produce; it aborts
/// the whole run and no partial ledger is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input carried no start date
    #[error("missing start date")]
    MissingStartDate,

    /// Input carried no service branch
    #[error("missing service branch")]
    MissingBranch,

    /// Branch token outside the closed enumeration
    #[error("unknown service branch: {0}")]
    UnknownBranch(String),

    /// Start date did not parse as an ISO calendar date
    #[error("invalid start date: {0}")]
    InvalidDate(String),

    /// Calendar month arithmetic left the representable date range
    #[error("date arithmetic overflowed advancing {months} months from {start}")]
    DateOverflow { start: NaiveDate, months: u32 },
}
