use super::config::ScoringConfig;
use super::domain::{
    FactorBreakdown, FactorContribution, FactorKind, HouseholdRecord, HousingType, RiskLevel,
};

pub(crate) struct Classification {
    pub(crate) overall_score: u8,
    pub(crate) risk_level: RiskLevel,
    pub(crate) recommendations: Vec<String>,
    pub(crate) confidence: f32,
    pub(crate) contributions: Vec<FactorContribution>,
}

pub(crate) fn classify(
    record: &HouseholdRecord,
    factors: FactorBreakdown,
    config: &ScoringConfig,
) -> Classification {
    let overall_score = factors.total();

    Classification {
        overall_score,
        risk_level: RiskLevel::from_score(overall_score, config),
        recommendations: build_recommendations(record, factors),
        confidence: completeness_confidence(record),
        contributions: ranked_contributions(factors),
    }
}

/// Directives keyed to how close each factor sits to its cap. The fallback
/// keeps the list non-empty so callers can always surface a next step.
fn build_recommendations(record: &HouseholdRecord, factors: FactorBreakdown) -> Vec<String> {
    let mut recommendations = Vec::new();

    if factors.economic >= 30 {
        recommendations.push("Priority: emergency financial aid".to_string());
        recommendations
            .push("Enroll household in income support or job placement programs".to_string());
    } else if factors.economic >= 16 {
        recommendations.push("Schedule recurring economic assistance".to_string());
    }

    if factors.health >= 20 {
        recommendations.push("Immediate medical referral required".to_string());
        recommendations.push("Arrange monthly health check-ups".to_string());
    } else if factors.health >= 12 {
        recommendations.push("Plan quarterly medical follow-up".to_string());
    }

    if factors.social >= 15 || record.housing == Some(HousingType::Precarious) {
        recommendations.push("Urgent: secure a safe housing solution".to_string());
    }

    if factors.urgency >= 8 {
        recommendations.push("Schedule urgent aid distribution".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Continue regular monitoring and support".to_string());
    }

    recommendations
}

/// Confidence reflects record completeness: income and health history carry
/// the heaviest penalties, the remaining optional fields a light one each.
fn completeness_confidence(record: &HouseholdRecord) -> f32 {
    let mut confidence: f32 = 1.0;

    if record.monthly_income.is_none() {
        confidence -= 0.15;
    }
    if record.health_conditions.is_none() {
        confidence -= 0.15;
    }
    if record.housing.is_none() {
        confidence -= 0.05;
    }
    if record.employment.is_none() {
        confidence -= 0.05;
    }
    if record.migration.is_none() {
        confidence -= 0.05;
    }
    if record.last_aid_distribution.is_none() {
        confidence -= 0.05;
    }

    confidence.max(0.5)
}

fn ranked_contributions(factors: FactorBreakdown) -> Vec<FactorContribution> {
    let mut contributions: Vec<FactorContribution> = FactorKind::ordered()
        .into_iter()
        .map(|factor| FactorContribution {
            factor,
            points: factors.points(factor),
            max_points: factor.max_points(),
        })
        .collect();

    // Stable sort keeps the fixed factor order for equal point values.
    contributions.sort_by(|a, b| b.points.cmp(&a.points));
    contributions
}
