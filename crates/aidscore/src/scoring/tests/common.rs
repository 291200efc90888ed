use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::scoring::config::ScoringConfig;
use crate::scoring::domain::{
    BeneficiaryId, EmploymentStatus, HouseholdRecord, HousingType, MigrationStatus,
};
use crate::scoring::VulnerabilityScorer;

pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub(super) fn scorer() -> VulnerabilityScorer {
    VulnerabilityScorer::new(ScoringConfig::default())
}

/// Modest, fully-populated household used as the baseline across tests.
pub(super) fn household(id: &str) -> HouseholdRecord {
    HouseholdRecord {
        id: BeneficiaryId(id.to_string()),
        members: 4,
        children: 2,
        elderly: 0,
        disabled: 0,
        monthly_income: Some(1200.0),
        housing: Some(HousingType::Tenant),
        employment: Some(EmploymentStatus::Employed),
        migration: Some(MigrationStatus::None),
        health_conditions: Some("asthma".to_string()),
        medical_visits: 1,
        medication_records: 0,
        last_aid_distribution: Some(as_of() - Duration::days(10)),
    }
}

/// Household with every hardship signal raised, for cap checks.
pub(super) fn destitute_household(id: &str) -> HouseholdRecord {
    HouseholdRecord {
        id: BeneficiaryId(id.to_string()),
        members: 6,
        children: 4,
        elderly: 1,
        disabled: 1,
        monthly_income: Some(0.0),
        housing: Some(HousingType::Precarious),
        employment: Some(EmploymentStatus::Unemployed),
        migration: Some(MigrationStatus::Returnee),
        health_conditions: Some("tuberculosis, hiv, cancer, diabetes".to_string()),
        medical_visits: 12,
        medication_records: 11,
        last_aid_distribution: None,
    }
}
