use serde::{Deserialize, Serialize};

use crate::scoring::domain::{HouseholdRecord, MigrationStatus};

use super::round1;

/// Share of externally displaced households that flags HIGH risk.
const EXTERNAL_RATIO_ALERT: f64 = 0.20;
/// Share of internally displaced households that flags MEDIUM risk.
const INTERNAL_RATIO_ALERT: f64 = 0.15;
/// Combined displacement share that flags MEDIUM-HIGH risk.
const COMBINED_RATIO_ALERT: f64 = 0.20;

/// Qualitative displacement-risk classification for an analyzed population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum MigrationRiskLevel {
    Low,
    Medium,
    MediumHigh,
    High,
}

impl MigrationRiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            MigrationRiskLevel::Low => "LOW",
            MigrationRiskLevel::Medium => "MEDIUM",
            MigrationRiskLevel::MediumHigh => "MEDIUM-HIGH",
            MigrationRiskLevel::High => "HIGH",
        }
    }

    pub const fn narrative(self) -> &'static str {
        match self {
            MigrationRiskLevel::Low => "Minimal migration trends detected",
            MigrationRiskLevel::Medium => {
                "Internal displacement detected, possible regional crisis"
            }
            MigrationRiskLevel::MediumHigh => "Combined displacement concern",
            MigrationRiskLevel::High => {
                "Significant external migration detected, may indicate regional instability"
            }
        }
    }
}

/// Count and share of one migration status within the analyzed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationStatusSlice {
    pub status: MigrationStatus,
    pub count: usize,
    pub percentage: f64,
}

/// Per-status tabulation plus the derived displacement-risk classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationTrendReport {
    pub total_analyzed: usize,
    pub breakdown: Vec<MigrationStatusSlice>,
    pub internal_displacement: usize,
    pub external_migrants: usize,
    pub returnees: usize,
    pub risk_level: MigrationRiskLevel,
    pub risk_narrative: String,
}

/// Tabulate migration statuses over a population and classify the aggregate
/// displacement risk. A missing status counts as `none`; an empty population
/// reports zero ratios and LOW risk.
pub fn analyze_migration_trends(records: &[HouseholdRecord]) -> MigrationTrendReport {
    let total = records.len();
    let count_of = |status: MigrationStatus| {
        records
            .iter()
            .filter(|record| record.migration_status() == status)
            .count()
    };

    let breakdown: Vec<MigrationStatusSlice> = MigrationStatus::ordered()
        .into_iter()
        .map(|status| {
            let count = count_of(status);
            let percentage = if total == 0 {
                0.0
            } else {
                round1(count as f64 / total as f64 * 100.0)
            };
            MigrationStatusSlice {
                status,
                count,
                percentage,
            }
        })
        .collect();

    let internal = count_of(MigrationStatus::Internal);
    let external = count_of(MigrationStatus::External);
    let returnees = count_of(MigrationStatus::Returnee);

    let (external_ratio, internal_ratio) = if total == 0 {
        (0.0, 0.0)
    } else {
        (
            external as f64 / total as f64,
            internal as f64 / total as f64,
        )
    };

    let risk_level = classify_risk(external_ratio, internal_ratio);

    MigrationTrendReport {
        total_analyzed: total,
        breakdown,
        internal_displacement: internal,
        external_migrants: external,
        returnees,
        risk_level,
        risk_narrative: format!("{}: {}", risk_level.label(), risk_level.narrative()),
    }
}

fn classify_risk(external_ratio: f64, internal_ratio: f64) -> MigrationRiskLevel {
    if external_ratio > EXTERNAL_RATIO_ALERT {
        MigrationRiskLevel::High
    } else if internal_ratio > INTERNAL_RATIO_ALERT {
        MigrationRiskLevel::Medium
    } else if external_ratio + internal_ratio > COMBINED_RATIO_ALERT {
        MigrationRiskLevel::MediumHigh
    } else {
        MigrationRiskLevel::Low
    }
}
