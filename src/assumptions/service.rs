//! Service duration terms by branch

use crate::enrollment::ServiceBranch;

/// Months of service per branch.
///
/// Total over the closed branch enumeration; an invalid branch token can
/// never reach this table because it is rejected when the input is decoded.
#[derive(Debug, Clone)]
pub struct ServiceTerms {
    army: u32,
    navy: u32,
    air_force: u32,
    marine: u32,
}

impl ServiceTerms {
    /// Statutory service durations
    pub fn default_statutory() -> Self {
        Self {
            army: 18,
            navy: 20,
            air_force: 21,
            marine: 18,
        }
    }

    /// Service duration in months for a branch
    pub fn months_for(&self, branch: ServiceBranch) -> u32 {
        match branch {
            ServiceBranch::Army => self.army,
            ServiceBranch::Navy => self.navy,
            ServiceBranch::AirForce => self.air_force,
            ServiceBranch::Marine => self.marine,
        }
    }

    /// Override the duration for a branch (used by the CSV loader)
    pub fn set_months(&mut self, branch: ServiceBranch, months: u32) {
        let slot = match branch {
            ServiceBranch::Army => &mut self.army,
            ServiceBranch::Navy => &mut self.navy,
            ServiceBranch::AirForce => &mut self.air_force,
            ServiceBranch::Marine => &mut self.marine,
        };
        *slot = months;
    }

    /// Longest tabulated duration, bounds the ledger length of any run
    pub fn max_months(&self) -> u32 {
        self.army.max(self.navy).max(self.air_force).max(self.marine)
    }
}

impl Default for ServiceTerms {
    fn default() -> Self {
        Self::default_statutory()
    }
}
