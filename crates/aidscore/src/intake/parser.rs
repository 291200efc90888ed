use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::scoring::domain::{
    BeneficiaryId, EmploymentStatus, HouseholdRecord, HousingType, MigrationStatus,
};

use super::{HouseholdImport, IntakeError};

pub(crate) fn parse_households<R: Read>(reader: R) -> Result<Vec<HouseholdImport>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut imports = Vec::new();

    for (row_index, row) in csv_reader.deserialize::<HouseholdRow>().enumerate() {
        let row = row?;
        // header occupies line 1
        let line = row_index as u64 + 2;
        imports.push(row.into_import(line)?);
    }

    Ok(imports)
}

#[derive(Debug, Deserialize)]
struct HouseholdRow {
    id: String,
    #[serde(default)]
    area: Option<String>,
    members: u32,
    #[serde(default)]
    children: u32,
    #[serde(default)]
    elderly: u32,
    #[serde(default)]
    disabled: u32,
    #[serde(default)]
    monthly_income: Option<f64>,
    #[serde(default)]
    housing: Option<String>,
    #[serde(default)]
    employment: Option<String>,
    #[serde(default)]
    migration: Option<String>,
    #[serde(default)]
    health_conditions: Option<String>,
    #[serde(default)]
    medical_visits: u32,
    #[serde(default)]
    medication_records: u32,
    #[serde(default)]
    last_aid_date: Option<String>,
}

impl HouseholdRow {
    fn into_import(self, line: u64) -> Result<HouseholdImport, IntakeError> {
        let housing = parse_enum(self.housing.as_deref(), parse_housing, line, "housing")?;
        let employment = parse_enum(
            self.employment.as_deref(),
            parse_employment,
            line,
            "employment",
        )?;
        let migration = parse_enum(self.migration.as_deref(), parse_migration, line, "migration")?;
        let last_aid_distribution = parse_enum(
            self.last_aid_date.as_deref(),
            parse_datetime,
            line,
            "last_aid_date",
        )?;

        Ok(HouseholdImport {
            area: self.area,
            record: HouseholdRecord {
                id: BeneficiaryId(self.id),
                members: self.members,
                children: self.children,
                elderly: self.elderly,
                disabled: self.disabled,
                monthly_income: self.monthly_income,
                housing,
                employment,
                migration,
                health_conditions: self.health_conditions,
                medical_visits: self.medical_visits,
                medication_records: self.medication_records,
                last_aid_distribution,
            },
        })
    }
}

fn parse_enum<T>(
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    line: u64,
    field: &'static str,
) -> Result<Option<T>, IntakeError> {
    match raw {
        None => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| IntakeError::InvalidField {
                line,
                field,
                value: value.to_string(),
            }),
    }
}

fn parse_housing(value: &str) -> Option<HousingType> {
    match value.trim().to_lowercase().as_str() {
        "owner" | "proprietaire" | "propriétaire" => Some(HousingType::Owner),
        "tenant" | "locataire" => Some(HousingType::Tenant),
        "precarious" | "precaire" | "précaire" => Some(HousingType::Precarious),
        "unknown" => Some(HousingType::Unknown),
        _ => None,
    }
}

fn parse_employment(value: &str) -> Option<EmploymentStatus> {
    match value.trim().to_lowercase().as_str() {
        "employed" | "worker" | "ouvrier" => Some(EmploymentStatus::Employed),
        "informal" | "informal_work" | "travail informel" => Some(EmploymentStatus::InformalWork),
        "retired" | "retraite" | "retraité" => Some(EmploymentStatus::Retired),
        "unemployed" | "chomage" | "chômage" => Some(EmploymentStatus::Unemployed),
        _ => None,
    }
}

fn parse_migration(value: &str) -> Option<MigrationStatus> {
    match value.trim().to_lowercase().as_str() {
        "none" => Some(MigrationStatus::None),
        "internal" => Some(MigrationStatus::Internal),
        "external" | "immigrant" => Some(MigrationStatus::External),
        "returnee" | "returning" => Some(MigrationStatus::Returnee),
        _ => None,
    }
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,area,members,children,elderly,disabled,monthly_income,housing,employment,migration,health_conditions,medical_visits,medication_records,last_aid_date\n";

    #[test]
    fn parses_a_fully_populated_row() {
        let csv = format!(
            "{HEADER}fam-001,north,5,2,1,0,320.5,precarious,unemployed,internal,\"diabetes, asthma\",4,2,2025-03-15\n"
        );

        let imports = parse_households(Cursor::new(csv)).expect("row parses");

        assert_eq!(imports.len(), 1);
        let import = &imports[0];
        assert_eq!(import.area.as_deref(), Some("north"));
        assert_eq!(import.record.id, BeneficiaryId("fam-001".to_string()));
        assert_eq!(import.record.members, 5);
        assert_eq!(import.record.monthly_income, Some(320.5));
        assert_eq!(import.record.housing, Some(HousingType::Precarious));
        assert_eq!(import.record.employment, Some(EmploymentStatus::Unemployed));
        assert_eq!(import.record.migration, Some(MigrationStatus::Internal));
        assert_eq!(
            import.record.condition_tokens(),
            vec!["diabetes", "asthma"]
        );
        assert!(import.record.last_aid_distribution.is_some());
    }

    #[test]
    fn blank_optionals_become_none() {
        let csv = format!("{HEADER}fam-002,,2,0,0,0,,,,,,0,0,\n");

        let imports = parse_households(Cursor::new(csv)).expect("row parses");

        let record = &imports[0].record;
        assert_eq!(imports[0].area, None);
        assert_eq!(record.monthly_income, None);
        assert_eq!(record.housing, None);
        assert_eq!(record.employment, None);
        assert_eq!(record.migration, None);
        assert_eq!(record.health_conditions, None);
        assert_eq!(record.last_aid_distribution, None);
    }

    #[test]
    fn date_only_values_are_accepted() {
        let rfc = parse_datetime("2025-03-15T10:30:00Z").expect("rfc3339 parses");
        let plain = parse_datetime("2025-03-15").expect("date parses");

        assert_eq!(rfc.date_naive(), plain.date_naive());
        assert!(parse_datetime("  ").is_none());
        assert!(parse_datetime("not-a-date").is_none());
    }

    #[test]
    fn unrecognized_housing_values_are_rejected_with_line_numbers() {
        let csv = format!("{HEADER}fam-003,south,3,1,0,0,100,castle,,,,0,0,\n");

        let error = parse_households(Cursor::new(csv)).expect_err("bad housing rejected");

        match error {
            IntakeError::InvalidField { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "housing");
                assert_eq!(value, "castle");
            }
            other => panic!("expected invalid field error, got {other:?}"),
        }
    }

    #[test]
    fn french_category_spellings_are_understood() {
        assert_eq!(parse_housing("Propriétaire"), Some(HousingType::Owner));
        assert_eq!(parse_housing("précaire"), Some(HousingType::Precarious));
        assert_eq!(
            parse_employment("Chômage"),
            Some(EmploymentStatus::Unemployed)
        );
        assert_eq!(parse_migration("Returnee"), Some(MigrationStatus::Returnee));
    }
}
