//! Load enrollment cohorts from enlistment_cohort.csv

use super::{DepositPlan, Enrollment, ServiceBranch};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching enlistment_cohort.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "EnrollmentID")]
    enrollment_id: u32,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "Branch")]
    branch: String,
    #[serde(rename = "Deposit2022")]
    deposit_2022: f64,
    #[serde(rename = "Deposit2023")]
    deposit_2023: f64,
    #[serde(rename = "Deposit2024")]
    deposit_2024: f64,
    #[serde(rename = "Deposit2025")]
    deposit_2025: f64,
}

impl CsvRow {
    fn to_enrollment(self) -> Result<Enrollment, Box<dyn Error>> {
        let start_date = self
            .start_date
            .parse()
            .map_err(|_| format!("Invalid StartDate: {}", self.start_date))?;

        let branch: ServiceBranch = self.branch.parse()?;

        let deposits = DepositPlan::from_amounts([
            (2022, self.deposit_2022),
            (2023, self.deposit_2023),
            (2024, self.deposit_2024),
            (2025, self.deposit_2025),
        ]);

        Ok(Enrollment::new(self.enrollment_id, start_date, branch, deposits))
    }
}

/// Load all enrollments from a CSV file
pub fn load_enrollments<P: AsRef<Path>>(path: P) -> Result<Vec<Enrollment>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut enrollments = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let enrollment = row.to_enrollment()?;
        enrollments.push(enrollment);
    }

    log::debug!("loaded {} enrollments", enrollments.len());
    Ok(enrollments)
}

/// Load enrollments from any reader (e.g., string buffer, network stream)
pub fn load_enrollments_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Enrollment>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut enrollments = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let enrollment = row.to_enrollment()?;
        enrollments.push(enrollment);
    }

    Ok(enrollments)
}

/// Load enrollments from the default enlistment_cohort.csv location
pub fn load_default_cohort() -> Result<Vec<Enrollment>, Box<dyn Error>> {
    load_enrollments("data/enlistment_cohort.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
EnrollmentID,StartDate,Branch,Deposit2022,Deposit2023,Deposit2024,Deposit2025
1,2022-01-03,army,400000,400000,400000,550000
2,2023-06-19,navy,0,300000,400000,400000
";

    #[test]
    fn test_load_from_reader() {
        let enrollments = load_enrollments_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(enrollments.len(), 2);

        let first = &enrollments[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.branch, ServiceBranch::Army);
        assert_eq!(first.deposits.monthly_for(2025), 550_000.0);

        let second = &enrollments[1];
        assert_eq!(second.branch, ServiceBranch::Navy);
        assert_eq!(second.deposits.monthly_for(2022), 0.0);
    }

    #[test]
    fn test_unknown_branch_row_fails() {
        let bad = "\
EnrollmentID,StartDate,Branch,Deposit2022,Deposit2023,Deposit2024,Deposit2025
1,2022-01-03,spaceforce,400000,400000,400000,550000
";
        assert!(load_enrollments_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_load_default_cohort() {
        let enrollments = load_default_cohort().expect("Failed to load cohort");
        assert!(!enrollments.is_empty());
        assert_eq!(enrollments[0].id, 1);
    }
}
