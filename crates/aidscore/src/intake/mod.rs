//! CSV intake for household records.
//!
//! Field coordinators export beneficiary cohorts as CSV; the importer turns
//! each row into a typed [`HouseholdRecord`] plus an optional area tag used
//! to group records for area-level predictions.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::scoring::domain::HouseholdRecord;

/// One imported row: the household plus the area it was registered in.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdImport {
    pub area: Option<String>,
    pub record: HouseholdRecord,
}

#[derive(Debug)]
pub enum IntakeError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::Io(err) => write!(f, "failed to read household CSV: {}", err),
            IntakeError::Csv(err) => write!(f, "invalid household CSV data: {}", err),
            IntakeError::InvalidField { line, field, value } => {
                write!(f, "line {line}: unrecognized {field} value '{value}'")
            }
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Io(err) => Some(err),
            IntakeError::Csv(err) => Some(err),
            IntakeError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct HouseholdCsvImporter;

impl HouseholdCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<HouseholdImport>, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HouseholdImport>, IntakeError> {
        parser::parse_households(reader)
    }
}
