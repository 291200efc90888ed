use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{HouseholdRecord, ScoreRecord};
use super::{ScoringConfig, ScoringError, VulnerabilityScorer};

/// Coordinates single and batch scoring on top of the shared engine.
///
/// Construct one per configuration and pass it to callers explicitly; there
/// is no process-wide instance.
pub struct ScoringOrchestrator {
    scorer: Arc<VulnerabilityScorer>,
}

impl ScoringOrchestrator {
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_scorer(Arc::new(VulnerabilityScorer::new(config)))
    }

    pub fn with_scorer(scorer: Arc<VulnerabilityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &VulnerabilityScorer {
        &self.scorer
    }

    /// Score one record; structural problems are propagated to the caller.
    pub fn score_one(&self, record: &HouseholdRecord) -> Result<ScoreRecord, ScoringError> {
        self.scorer.score(record)
    }

    /// Score every record, isolating failures so one bad record never aborts
    /// the batch. Successes and errors both keep their input order, and
    /// `results.len() + errors.len()` always equals the input length.
    pub fn score_batch(&self, records: &[HouseholdRecord]) -> BatchOutcome {
        self.score_batch_at(records, Utc::now())
    }

    pub fn score_batch_at(
        &self,
        records: &[HouseholdRecord],
        as_of: DateTime<Utc>,
    ) -> BatchOutcome {
        let mut results = Vec::with_capacity(records.len());
        let mut errors = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match self.scorer.score_at(record, as_of) {
                Ok(score) => results.push(score),
                Err(error) => errors.push(BatchError {
                    index,
                    beneficiary_id: if record.id.is_blank() {
                        "unknown".to_string()
                    } else {
                        record.id.0.clone()
                    },
                    error: error.to_string(),
                }),
            }
        }

        info!(
            total = records.len(),
            successful = results.len(),
            failed = errors.len(),
            "batch scoring complete"
        );

        BatchOutcome { results, errors }
    }
}

/// Outcome of a batch run: scored records plus isolated per-record failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<ScoreRecord>,
    pub errors: Vec<BatchError>,
}

impl BatchOutcome {
    pub fn total_processed(&self) -> usize {
        self.results.len() + self.errors.len()
    }
}

/// Failure detail for one record inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    pub index: usize,
    pub beneficiary_id: String,
    pub error: String,
}
