use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::scoring::domain::{BeneficiaryId, HouseholdRecord, HousingType, ScoreRecord};

use super::{round1, round2, ValidationError};

/// Overall-score cut-off above which a household counts as high risk.
const HIGH_RISK_SCORE: u8 = 60;
/// Overall-score cut-off above which a household counts as critical.
const CRITICAL_RISK_SCORE: u8 = 80;
/// Health-factor level that flags a household for medical aid.
const HEALTH_CONCERN_POINTS: u8 = 20;

/// Estimated aid needs for one geographic area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaPrediction {
    pub area: String,
    pub total_families: usize,
    pub avg_vulnerability: f64,
    pub critical_risk_families: usize,
    pub high_risk_families: usize,
    pub food_aid_needed: f64,
    pub medical_aid_needed: f64,
    pub housing_interventions_needed: f64,
    pub economic_avg: f64,
    pub health_avg: f64,
    pub based_on: String,
}

/// Aggregate household scores per area into resource-need estimates.
///
/// Areas whose households have no joinable score are dropped rather than
/// reported as zeros. Output is sorted by average vulnerability, most
/// vulnerable area first; the ordered input map plus a stable sort keeps tie
/// order identical across repeated calls.
pub fn predict_area_needs(
    households_by_area: &BTreeMap<String, Vec<HouseholdRecord>>,
    scores_by_id: &HashMap<BeneficiaryId, ScoreRecord>,
) -> Result<Vec<AreaPrediction>, ValidationError> {
    let mut predictions = Vec::new();

    for (area, households) in households_by_area {
        if area.trim().is_empty() {
            return Err(ValidationError::BlankAreaKey);
        }
        if households.is_empty() {
            continue;
        }

        let joined: Vec<&ScoreRecord> = households
            .iter()
            .filter_map(|household| scores_by_id.get(&household.id))
            .collect();
        if joined.is_empty() {
            continue;
        }

        let count = joined.len() as f64;
        let avg_vulnerability = round2(
            joined
                .iter()
                .map(|score| f64::from(score.overall_score))
                .sum::<f64>()
                / count,
        );
        let economic_avg = round2(
            joined
                .iter()
                .map(|score| f64::from(score.factors.economic))
                .sum::<f64>()
                / count,
        );
        let health_avg = round2(
            joined
                .iter()
                .map(|score| f64::from(score.factors.health))
                .sum::<f64>()
                / count,
        );

        let high_risk_families = joined
            .iter()
            .filter(|score| score.overall_score >= HIGH_RISK_SCORE)
            .count();
        let critical_risk_families = joined
            .iter()
            .filter(|score| score.overall_score >= CRITICAL_RISK_SCORE)
            .count();
        let medical_aid_needed = joined
            .iter()
            .filter(|score| score.factors.health >= HEALTH_CONCERN_POINTS)
            .count() as f64;
        let housing_interventions_needed = households
            .iter()
            .filter(|household| household.housing == Some(HousingType::Precarious))
            .count() as f64;
        let food_aid_needed =
            round1(critical_risk_families as f64 + 0.5 * high_risk_families as f64);

        predictions.push(AreaPrediction {
            area: area.clone(),
            total_families: households.len(),
            avg_vulnerability,
            critical_risk_families,
            high_risk_families,
            food_aid_needed,
            medical_aid_needed,
            housing_interventions_needed,
            economic_avg,
            health_avg,
            based_on: format!("{} household records", households.len()),
        });
    }

    predictions.sort_by(|a, b| {
        b.avg_vulnerability
            .partial_cmp(&a.avg_vulnerability)
            .unwrap_or(Ordering::Equal)
    });

    Ok(predictions)
}
