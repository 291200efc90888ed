use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::domain::{BeneficiaryId, HouseholdRecord, ScoreRecord};

use super::{round2, ValidationError};

/// Cluster size at which a shared condition token becomes an alert.
const MIN_AFFECTED_FAMILIES: usize = 3;
/// Households at which the risk probability saturates.
const SATURATION_FAMILIES: f64 = 10.0;
/// Number of affected ids carried on an alert as a sample.
const SAMPLE_LIMIT: usize = 5;

/// Potential outbreak signal for one health-condition token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAlert {
    pub condition: String,
    pub affected_families: usize,
    pub sample_ids: Vec<BeneficiaryId>,
    pub risk_probability: f64,
    pub recommendation: String,
}

/// Cluster households by normalized health-condition token and flag every
/// token shared by at least three households.
///
/// The scores slice must pair one-to-one with the records slice; a length
/// mismatch is a hard precondition failure, not a recoverable batch item.
pub fn detect_health_patterns(
    records: &[HouseholdRecord],
    scores: &[ScoreRecord],
) -> Result<Vec<HealthAlert>, ValidationError> {
    if records.len() != scores.len() {
        return Err(ValidationError::MismatchedLengths {
            records: records.len(),
            scores: scores.len(),
        });
    }

    let mut clusters: BTreeMap<String, Vec<BeneficiaryId>> = BTreeMap::new();
    for record in records {
        for token in record.condition_tokens() {
            clusters.entry(token).or_default().push(record.id.clone());
        }
    }

    let mut alerts: Vec<HealthAlert> = clusters
        .into_iter()
        .filter(|(_, affected)| affected.len() >= MIN_AFFECTED_FAMILIES)
        .map(|(condition, affected)| {
            let affected_families = affected.len();
            let risk_probability =
                round2((affected_families as f64 / SATURATION_FAMILIES).min(1.0));
            let recommendation =
                format!("Monitor {condition} cases, provide preventive education");
            let sample_ids = affected.into_iter().take(SAMPLE_LIMIT).collect();

            HealthAlert {
                condition,
                affected_families,
                sample_ids,
                risk_probability,
                recommendation,
            }
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.risk_probability
            .partial_cmp(&a.risk_probability)
            .unwrap_or(Ordering::Equal)
    });

    Ok(alerts)
}
