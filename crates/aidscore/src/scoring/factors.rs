use chrono::{DateTime, Utc};

use super::config::ScoringConfig;
use super::domain::{
    EmploymentStatus, FactorBreakdown, HouseholdRecord, HousingType, MigrationStatus,
};

/// Severity bonuses for known chronic or serious conditions, matched by
/// substring so spelling variants in intake notes still register.
const CONDITION_SEVERITY: &[(&str, u8)] = &[
    ("hiv", 5),
    ("sida", 5),
    ("cancer", 5),
    ("tuberculos", 4),
    ("paralys", 3),
    ("diabet", 2),
    ("hypertension", 2),
    ("cardiac", 2),
    ("cardiaque", 2),
];

pub(crate) fn compute_factors(
    record: &HouseholdRecord,
    config: &ScoringConfig,
    as_of: DateTime<Utc>,
) -> FactorBreakdown {
    FactorBreakdown {
        economic: economic_factor(record, config),
        health: health_factor(record),
        social: social_factor(record),
        urgency: urgency_factor(record, as_of),
    }
}

/// Economic need, 0-40: grows as per-person income falls below the poverty
/// line and as the dependent ratio rises; employment status adjusts the base.
fn economic_factor(record: &HouseholdRecord, config: &ScoringConfig) -> u8 {
    // Missing income is scored at the poverty line, not as destitution.
    let per_capita = match record.monthly_income {
        Some(income) => income / f64::from(record.members.max(1)),
        None => config.poverty_line,
    };
    let ratio = if config.poverty_line > 0.0 {
        per_capita / config.poverty_line
    } else {
        f64::INFINITY
    };

    let mut points: i32 = if ratio < 0.5 {
        40
    } else if ratio < 1.0 {
        32
    } else if ratio < 1.75 {
        24
    } else if ratio < 2.5 {
        16
    } else if ratio < 4.0 {
        8
    } else {
        0
    };

    points += (record.dependent_ratio() * 6.0).round() as i32;

    match record.employment {
        Some(EmploymentStatus::Unemployed) => points = points.max(30),
        Some(EmploymentStatus::InformalWork) => points += 6,
        Some(EmploymentStatus::Retired) => points += 5,
        Some(EmploymentStatus::Employed) => points -= 3,
        None => {}
    }

    points.clamp(0, 40) as u8
}

/// Health need, 0-30: distinct condition tokens, severity keywords, medical
/// visits, and medication records each contribute a capped share.
fn health_factor(record: &HouseholdRecord) -> u8 {
    let tokens = record.condition_tokens();

    let condition_points = (tokens.len() as u32 * 3).min(9);
    let severity_points = tokens
        .iter()
        .map(|token| u32::from(severity_bonus(token)))
        .sum::<u32>()
        .min(9);

    let visit_points: u32 = match record.medical_visits {
        v if v >= 10 => 8,
        v if v >= 5 => 6,
        v if v >= 2 => 4,
        v if v >= 1 => 2,
        _ => 0,
    };

    let medication_points: u32 = match record.medication_records {
        m if m >= 10 => 4,
        m if m >= 5 => 3,
        m if m >= 1 => 1,
        _ => 0,
    };

    (condition_points + severity_points + visit_points + medication_points).min(30) as u8
}

fn severity_bonus(token: &str) -> u8 {
    CONDITION_SEVERITY
        .iter()
        .filter(|(needle, _)| token.contains(needle))
        .map(|(_, points)| *points)
        .max()
        .unwrap_or(0)
}

/// Social fragility, 0-20: housing precarity, displacement, and vulnerable
/// dependents. The weights sum to exactly 20.
fn social_factor(record: &HouseholdRecord) -> u8 {
    let housing: u8 = match record.housing {
        Some(HousingType::Precarious) => 8,
        Some(HousingType::Tenant) => 4,
        Some(HousingType::Unknown) => 2,
        Some(HousingType::Owner) => 1,
        None => 0,
    };

    let migration: u8 = match record.migration_status() {
        MigrationStatus::Returnee => 5,
        MigrationStatus::External => 4,
        MigrationStatus::Internal => 2,
        MigrationStatus::None => 0,
    };

    let elderly: u8 = if record.elderly > 0 { 3 } else { 0 };
    let disabled: u8 = if record.disabled > 0 { 4 } else { 0 };

    housing + migration + elderly + disabled
}

/// Urgency, 0-10: elapsed time since the last aid distribution. A household
/// that was never aided is maximally urgent.
fn urgency_factor(record: &HouseholdRecord, as_of: DateTime<Utc>) -> u8 {
    let Some(last_aid) = record.last_aid_distribution else {
        return 10;
    };

    let days = (as_of - last_aid).num_days();
    match days {
        d if d > 180 => 10,
        d if d > 120 => 8,
        d if d > 60 => 6,
        d if d > 30 => 4,
        d if d > 14 => 2,
        _ => 1,
    }
}
