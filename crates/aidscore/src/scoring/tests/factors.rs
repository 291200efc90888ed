use chrono::Duration;

use super::common::*;
use crate::scoring::config::ScoringConfig;
use crate::scoring::domain::{EmploymentStatus, HousingType, MigrationStatus};
use crate::scoring::factors::compute_factors;

#[test]
fn economic_rises_as_income_falls() {
    let config = ScoringConfig::default();
    let mut poorer = household("econ-poor");
    let mut richer = household("econ-rich");
    poorer.monthly_income = Some(200.0);
    richer.monthly_income = Some(2400.0);

    let poor_factors = compute_factors(&poorer, &config, as_of());
    let rich_factors = compute_factors(&richer, &config, as_of());

    assert!(poor_factors.economic > rich_factors.economic);
}

#[test]
fn missing_income_is_scored_at_the_poverty_line() {
    let config = ScoringConfig::default();
    let mut unknown_income = household("econ-unknown");
    unknown_income.children = 0;
    unknown_income.members = 1;
    unknown_income.employment = None;
    unknown_income.monthly_income = None;

    let mut at_line = unknown_income.clone();
    at_line.monthly_income = Some(config.poverty_line);

    let unknown_factors = compute_factors(&unknown_income, &config, as_of());
    let at_line_factors = compute_factors(&at_line, &config, as_of());

    assert_eq!(unknown_factors.economic, at_line_factors.economic);
    assert_eq!(unknown_factors.economic, 24);
}

#[test]
fn unemployment_floors_the_economic_factor() {
    let config = ScoringConfig::default();
    let mut comfortable = household("econ-unemployed");
    comfortable.children = 0;
    comfortable.monthly_income = Some(4000.0);
    comfortable.employment = Some(EmploymentStatus::Unemployed);

    let factors = compute_factors(&comfortable, &config, as_of());

    assert_eq!(factors.economic, 30);
}

#[test]
fn economic_factor_caps_at_forty() {
    let factors = compute_factors(
        &destitute_household("econ-cap"),
        &ScoringConfig::default(),
        as_of(),
    );
    assert_eq!(factors.economic, 40);
}

#[test]
fn economic_factor_is_monotone_in_dependent_ratio() {
    let config = ScoringConfig::default();
    let mut fewer = household("dep-few");
    let mut more = household("dep-many");
    fewer.children = 1;
    more.children = 4;

    let fewer_factors = compute_factors(&fewer, &config, as_of());
    let more_factors = compute_factors(&more, &config, as_of());

    assert!(more_factors.economic >= fewer_factors.economic);
}

#[test]
fn health_combines_conditions_visits_and_medications() {
    let config = ScoringConfig::default();
    let mut chronic = household("health-chronic");
    chronic.health_conditions = Some("diabetes, hypertension".to_string());
    chronic.medical_visits = 5;
    chronic.medication_records = 5;

    let factors = compute_factors(&chronic, &config, as_of());

    // 2 tokens (6) + severity bonuses (4) + visit band (6) + medication band (3)
    assert_eq!(factors.health, 19);
}

#[test]
fn health_factor_caps_at_thirty() {
    let factors = compute_factors(
        &destitute_household("health-cap"),
        &ScoringConfig::default(),
        as_of(),
    );
    assert_eq!(factors.health, 30);
}

#[test]
fn health_factor_is_zero_without_signals() {
    let mut healthy = household("health-none");
    healthy.health_conditions = None;
    healthy.medical_visits = 0;
    healthy.medication_records = 0;

    let factors = compute_factors(&healthy, &ScoringConfig::default(), as_of());

    assert_eq!(factors.health, 0);
}

#[test]
fn condition_tokens_are_trimmed_lowercased_and_deduplicated() {
    let mut record = household("tokens");
    record.health_conditions = Some("Diabetes , diabetes,ASTHMA,, ".to_string());

    assert_eq!(record.condition_tokens(), vec!["diabetes", "asthma"]);
}

#[test]
fn social_weights_sum_to_the_cap() {
    let factors = compute_factors(
        &destitute_household("social-cap"),
        &ScoringConfig::default(),
        as_of(),
    );
    assert_eq!(factors.social, 20);
}

#[test]
fn social_factor_is_zero_without_fragility_signals() {
    let mut settled = household("social-none");
    settled.housing = None;
    settled.migration = None;
    settled.elderly = 0;
    settled.disabled = 0;

    let factors = compute_factors(&settled, &ScoringConfig::default(), as_of());

    assert_eq!(factors.social, 0);
}

#[test]
fn social_factor_rises_for_precarious_housing_and_displacement() {
    let config = ScoringConfig::default();
    let mut displaced = household("social-displaced");
    displaced.housing = Some(HousingType::Precarious);
    displaced.migration = Some(MigrationStatus::External);

    let baseline = compute_factors(&household("social-base"), &config, as_of());
    let factors = compute_factors(&displaced, &config, as_of());

    assert!(factors.social > baseline.social);
    assert_eq!(factors.social, 12);
}

#[test]
fn urgency_follows_elapsed_time_bands() {
    let config = ScoringConfig::default();
    let mut record = household("urgency");

    let expectations = [(200, 10), (130, 8), (100, 6), (45, 4), (20, 2), (5, 1)];
    for (days, expected) in expectations {
        record.last_aid_distribution = Some(as_of() - Duration::days(days));
        let factors = compute_factors(&record, &config, as_of());
        assert_eq!(factors.urgency, expected, "after {days} days");
    }

    record.last_aid_distribution = None;
    let factors = compute_factors(&record, &config, as_of());
    assert_eq!(factors.urgency, 10);
}
