//! Year-by-year matching terms with the statutory fallback

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Matching terms in force for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchTerms {
    /// Fraction of the capped deposit contributed by the program, in [0, 1]
    pub match_ratio: f64,

    /// Maximum monthly personal deposit eligible for matching, KRW
    pub deposit_cap: f64,
}

/// Calendar-year table of matching terms.
///
/// The lookup is total: tabulated years return their entry verbatim, and any
/// other year, past or future, resolves to the most permissive known default
/// (full matching at the latest tabulated cap). Never mutated after load.
#[derive(Debug, Clone)]
pub struct MatchSchedule {
    entries: BTreeMap<i32, MatchTerms>,
    first_year: i32,
    last_year: i32,
    fallback: MatchTerms,
}

impl MatchSchedule {
    /// Build a schedule from tabulated entries.
    ///
    /// Returns `None` for an empty table, which has no latest cap to fall
    /// back to.
    pub fn from_entries(entries: BTreeMap<i32, MatchTerms>) -> Option<Self> {
        let (&first_year, _) = entries.iter().next()?;
        let (&last_year, &latest) = entries.iter().next_back()?;

        Some(Self {
            entries,
            first_year,
            last_year,
            fallback: MatchTerms {
                match_ratio: 1.0,
                deposit_cap: latest.deposit_cap,
            },
        })
    }

    /// The statutory 2022-2025 table
    pub fn default_statutory() -> Self {
        let entries = BTreeMap::from([
            (2022, MatchTerms { match_ratio: 0.33, deposit_cap: 400_000.0 }),
            (2023, MatchTerms { match_ratio: 0.71, deposit_cap: 400_000.0 }),
            (2024, MatchTerms { match_ratio: 1.0, deposit_cap: 400_000.0 }),
            (2025, MatchTerms { match_ratio: 1.0, deposit_cap: 550_000.0 }),
        ]);

        Self {
            entries,
            first_year: 2022,
            last_year: 2025,
            fallback: MatchTerms { match_ratio: 1.0, deposit_cap: 550_000.0 },
        }
    }

    /// Matching terms for a calendar year, falling back for untabulated years
    pub fn lookup(&self, year: i32) -> MatchTerms {
        self.entries.get(&year).copied().unwrap_or(self.fallback)
    }

    /// First tabulated year
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Last tabulated year
    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    /// Bucket year used to select the deposit figure for `year`.
    ///
    /// Years at or before the first tabulated year collapse to it, interior
    /// years map to themselves, and years at or beyond the last tabulated
    /// year collapse to it, so a plan needs at most one figure per tabulated
    /// year.
    pub fn bucket_year(&self, year: i32) -> i32 {
        year.clamp(self.first_year, self.last_year)
    }
}

impl Default for MatchSchedule {
    fn default() -> Self {
        Self::default_statutory()
    }
}
