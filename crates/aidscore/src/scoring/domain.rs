use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;

/// Identifier wrapper for beneficiary households.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeneficiaryId(pub String);

impl BeneficiaryId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Housing situation reported at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    Owner,
    Tenant,
    Precarious,
    Unknown,
}

impl HousingType {
    pub const fn label(self) -> &'static str {
        match self {
            HousingType::Owner => "owner",
            HousingType::Tenant => "tenant",
            HousingType::Precarious => "precarious",
            HousingType::Unknown => "unknown",
        }
    }
}

/// Employment situation reported at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    InformalWork,
    Retired,
    Unemployed,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::InformalWork => "informal_work",
            EmploymentStatus::Retired => "retired",
            EmploymentStatus::Unemployed => "unemployed",
        }
    }
}

/// Displacement indicator; a household with no reported status counts as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    None,
    Internal,
    External,
    Returnee,
}

impl MigrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MigrationStatus::None => "none",
            MigrationStatus::Internal => "internal",
            MigrationStatus::External => "external",
            MigrationStatus::Returnee => "returnee",
        }
    }

    pub const fn ordered() -> [MigrationStatus; 4] {
        [
            MigrationStatus::None,
            MigrationStatus::Internal,
            MigrationStatus::External,
            MigrationStatus::Returnee,
        ]
    }
}

/// Immutable snapshot of one beneficiary household's circumstances.
///
/// Family composition counts are validated upstream (each category at most
/// the household size); scoring re-checks the structural invariants before
/// trusting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    pub id: BeneficiaryId,
    pub members: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub elderly: u32,
    #[serde(default)]
    pub disabled: u32,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub housing: Option<HousingType>,
    #[serde(default)]
    pub employment: Option<EmploymentStatus>,
    #[serde(default)]
    pub migration: Option<MigrationStatus>,
    #[serde(default)]
    pub health_conditions: Option<String>,
    #[serde(default)]
    pub medical_visits: u32,
    #[serde(default)]
    pub medication_records: u32,
    #[serde(default)]
    pub last_aid_distribution: Option<DateTime<Utc>>,
}

impl HouseholdRecord {
    pub fn dependents(&self) -> u32 {
        self.children + self.elderly + self.disabled
    }

    /// Dependents over household size. Categories may overlap (a child can
    /// also be disabled), so the ratio can exceed 1.
    pub fn dependent_ratio(&self) -> f64 {
        if self.members == 0 {
            0.0
        } else {
            f64::from(self.dependents()) / f64::from(self.members)
        }
    }

    pub fn migration_status(&self) -> MigrationStatus {
        self.migration.unwrap_or(MigrationStatus::None)
    }

    /// Distinct health-condition tokens: comma-split, trimmed, lower-cased,
    /// kept in encounter order.
    pub fn condition_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        if let Some(raw) = &self.health_conditions {
            for piece in raw.split(',') {
                let token = piece.trim().to_lowercase();
                if token.is_empty() || tokens.contains(&token) {
                    continue;
                }
                tokens.push(token);
            }
        }
        tokens
    }
}

/// Factors composing the vulnerability rubric, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Economic,
    Health,
    Social,
    Urgency,
}

impl FactorKind {
    pub const fn max_points(self) -> u8 {
        match self {
            FactorKind::Economic => 40,
            FactorKind::Health => 30,
            FactorKind::Social => 20,
            FactorKind::Urgency => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Economic => "economic",
            FactorKind::Health => "health",
            FactorKind::Social => "social",
            FactorKind::Urgency => "urgency",
        }
    }

    pub const fn ordered() -> [FactorKind; 4] {
        [
            FactorKind::Economic,
            FactorKind::Health,
            FactorKind::Social,
            FactorKind::Urgency,
        ]
    }
}

/// Bounded sub-scores whose maxima (40/30/20/10) sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub economic: u8,
    pub health: u8,
    pub social: u8,
    pub urgency: u8,
}

impl FactorBreakdown {
    pub const fn total(self) -> u8 {
        self.economic + self.health + self.social + self.urgency
    }

    pub const fn points(self, factor: FactorKind) -> u8 {
        match factor {
            FactorKind::Economic => self.economic,
            FactorKind::Health => self.health,
            FactorKind::Social => self.social,
            FactorKind::Urgency => self.urgency,
        }
    }
}

/// Ordered risk category derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// Policy cut-offs carried by the configuration; defaults classify
    /// 80+ CRITICAL, 60+ HIGH, 35+ MEDIUM, below that LOW.
    pub fn from_score(score: u8, config: &ScoringConfig) -> Self {
        if score >= config.critical_threshold {
            RiskLevel::Critical
        } else if score >= config.high_threshold {
            RiskLevel::High
        } else if score >= config.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// One factor's share of the overall score, for explainability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: FactorKind,
    pub points: u8,
    pub max_points: u8,
}

/// Output of scoring one household record; downstream analyses treat it as a
/// value and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub beneficiary_id: BeneficiaryId,
    pub overall_score: u8,
    pub factors: FactorBreakdown,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub confidence: f32,
    pub contributions: Vec<FactorContribution>,
    pub generated_at: DateTime<Utc>,
}
