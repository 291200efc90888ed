//! Multi-factor vulnerability scoring for beneficiary household records.
//!
//! A [`VulnerabilityScorer`] turns one validated [`domain::HouseholdRecord`]
//! into a bounded, categorized, explainable [`domain::ScoreRecord`]. The
//! [`ScoringOrchestrator`] layers single-record and failure-isolating batch
//! entry points on top of the shared engine.

mod classifier;
pub mod config;
pub mod domain;
mod factors;
pub mod orchestrator;
pub mod router;

#[cfg(test)]
mod tests;

pub use config::ScoringConfig;
pub use domain::{
    BeneficiaryId, EmploymentStatus, FactorBreakdown, FactorContribution, FactorKind,
    HouseholdRecord, HousingType, MigrationStatus, RiskLevel, ScoreRecord,
};
pub use orchestrator::{BatchError, BatchOutcome, ScoringOrchestrator};
pub use router::scoring_router;

use chrono::{DateTime, Utc};

/// Stateless engine applying the weighted rubric to one household record.
pub struct VulnerabilityScorer {
    config: ScoringConfig,
}

impl VulnerabilityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a record, stamping the current time on the result.
    pub fn score(&self, record: &HouseholdRecord) -> Result<ScoreRecord, ScoringError> {
        self.score_at(record, Utc::now())
    }

    /// Score a record as of a fixed instant. Urgency depends on elapsed time
    /// since the last distribution, so tests pin the clock here.
    pub fn score_at(
        &self,
        record: &HouseholdRecord,
        as_of: DateTime<Utc>,
    ) -> Result<ScoreRecord, ScoringError> {
        validate_record(record)?;

        let factors = factors::compute_factors(record, &self.config, as_of);
        let classification = classifier::classify(record, factors, &self.config);

        Ok(ScoreRecord {
            beneficiary_id: record.id.clone(),
            overall_score: classification.overall_score,
            factors,
            risk_level: classification.risk_level,
            recommendations: classification.recommendations,
            confidence: classification.confidence,
            contributions: classification.contributions,
            generated_at: as_of,
        })
    }
}

fn validate_record(record: &HouseholdRecord) -> Result<(), ScoringError> {
    if record.id.is_blank() {
        return Err(ScoringError::BlankBeneficiaryId);
    }
    if record.members == 0 {
        return Err(ScoringError::EmptyHousehold);
    }

    let largest_category = record.children.max(record.elderly).max(record.disabled);
    if largest_category > record.members {
        return Err(ScoringError::DependentsExceedHousehold {
            count: largest_category,
            members: record.members,
        });
    }

    if let Some(income) = record.monthly_income {
        if !income.is_finite() || income < 0.0 {
            return Err(ScoringError::InvalidIncome(income));
        }
    }

    Ok(())
}

/// Raised when a single record cannot be scored. Fatal for single-record
/// calls; isolated and recorded per item in batch mode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("beneficiary id must not be blank")]
    BlankBeneficiaryId,
    #[error("household must have at least one member")]
    EmptyHousehold,
    #[error("dependent category count ({count}) exceeds household size ({members})")]
    DependentsExceedHousehold { count: u32, members: u32 },
    #[error("monthly income must be a finite non-negative amount, got {0}")]
    InvalidIncome(f64),
}
