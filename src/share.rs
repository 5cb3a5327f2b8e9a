//! Query-string encoding of engine inputs for shareable links
//!
//! A run is shared as URL query parameters carrying the inputs in canonical
//! KRW. The parameter set is fixed: `start` (ISO date),
//! `branch` (wire token), and one `d<year>` per supplied deposit bucket.
//! None of the values require percent-escaping, so the codec works on the
//! raw pair syntax.

use crate::enrollment::{DepositPlan, Enrollment, ServiceBranch};
use crate::error::EngineError;

/// Encode an enrollment as a shareable query string.
///
/// The enrollment id is a local concern and is not part of the link.
pub fn to_query_string(enrollment: &Enrollment) -> String {
    let mut parts = vec![
        format!("start={}", enrollment.start_date.format("%Y-%m-%d")),
        format!("branch={}", enrollment.branch.as_str()),
    ];

    for (year, amount) in enrollment.deposits.iter() {
        parts.push(format!("d{}={}", year, amount));
    }

    parts.join("&")
}

/// Decode a query string back into an enrollment.
///
/// Accepts an optional leading `?`. Unknown keys are ignored. Deposit
/// amounts that fail to parse are normalized to zero, matching the
/// caller-side sanity rule; a missing or malformed `start` or `branch`
/// rejects the whole link before the engine can run.
pub fn from_query_string(query: &str) -> Result<Enrollment, EngineError> {
    let trimmed = query.strip_prefix('?').unwrap_or(query);
    from_pairs(trimmed.split('&').filter_map(|part| part.split_once('=')))
}

/// Decode (key, value) pairs into an enrollment.
///
/// Shared by the query-string codec and the HTTP handler, which receives
/// the pairs already split by its framework.
pub fn from_pairs<'a, I>(pairs: I) -> Result<Enrollment, EngineError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut start_date = None;
    let mut branch = None;
    let mut deposits = DepositPlan::new();

    for (key, value) in pairs {
        match key {
            "start" => {
                let parsed = value
                    .parse()
                    .map_err(|_| EngineError::InvalidDate(value.to_string()))?;
                start_date = Some(parsed);
            }
            "branch" => {
                branch = Some(value.parse::<ServiceBranch>()?);
            }
            _ => {
                if let Some(year_token) = key.strip_prefix('d') {
                    if let Ok(year) = year_token.parse::<i32>() {
                        deposits.set(year, value.parse().unwrap_or(0.0));
                    }
                }
            }
        }
    }

    let start_date = start_date.ok_or(EngineError::MissingStartDate)?;
    let branch = branch.ok_or(EngineError::MissingBranch)?;

    Ok(Enrollment::new(0, start_date, branch, deposits))
}
