use chrono::{TimeZone, Utc};

use crate::scoring::domain::{
    BeneficiaryId, FactorBreakdown, FactorContribution, FactorKind, HouseholdRecord, RiskLevel,
    ScoreRecord,
};
use crate::scoring::ScoringConfig;

pub(crate) fn household_in(id: &str) -> HouseholdRecord {
    HouseholdRecord {
        id: BeneficiaryId(id.to_string()),
        members: 3,
        children: 1,
        elderly: 0,
        disabled: 0,
        monthly_income: Some(500.0),
        housing: None,
        employment: None,
        migration: None,
        health_conditions: None,
        medical_visits: 0,
        medication_records: 0,
        last_aid_distribution: None,
    }
}

/// Score record carrying the requested overall score, split across the four
/// factors so the sum identity holds.
pub(crate) fn score_with(id: &str, overall: u8) -> ScoreRecord {
    let factors = FactorBreakdown {
        economic: overall.min(40),
        health: overall.saturating_sub(40).min(30),
        social: overall.saturating_sub(70).min(20),
        urgency: overall.saturating_sub(90).min(10),
    };
    let config = ScoringConfig::default();

    ScoreRecord {
        beneficiary_id: BeneficiaryId(id.to_string()),
        overall_score: factors.total(),
        factors,
        risk_level: RiskLevel::from_score(factors.total(), &config),
        recommendations: vec!["Continue regular monitoring and support".to_string()],
        confidence: 1.0,
        contributions: FactorKind::ordered()
            .into_iter()
            .map(|factor| FactorContribution {
                factor,
                points: factors.points(factor),
                max_points: factor.max_points(),
            })
            .collect(),
        generated_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    }
}
