use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use aidscore::analytics::{
    analyze_migration_trends, detect_health_patterns, predict_area_needs, AreaPrediction,
    HealthAlert, MigrationTrendReport,
};
use aidscore::error::AppError;
use aidscore::intake::{HouseholdCsvImporter, HouseholdImport};
use aidscore::scoring::{
    BatchOutcome, BeneficiaryId, EmploymentStatus, HouseholdRecord, HousingType, MigrationStatus,
    ScoreRecord, ScoringConfig, ScoringOrchestrator,
};
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ScoreBatchArgs {
    /// Household CSV export to score
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Per-person monthly income used as the poverty line
    #[arg(long)]
    pub(crate) poverty_line: Option<f64>,
    /// Score as of this date instead of now (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional household CSV; a built-in cohort is used when omitted
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Per-person monthly income used as the poverty line
    #[arg(long)]
    pub(crate) poverty_line: Option<f64>,
}

pub(crate) fn run_score_batch(args: ScoreBatchArgs) -> Result<(), AppError> {
    let imports = HouseholdCsvImporter::from_path(&args.csv)?;
    let orchestrator = build_orchestrator(args.poverty_line);
    let records: Vec<HouseholdRecord> =
        imports.into_iter().map(|import| import.record).collect();

    let as_of = args
        .as_of
        .map(crate::infra::start_of_day)
        .unwrap_or_else(Utc::now);
    let outcome = orchestrator.score_batch_at(&records, as_of);

    render_batch(&outcome);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let imports = match args.csv {
        Some(path) => HouseholdCsvImporter::from_path(path)?,
        None => builtin_cohort(),
    };

    let orchestrator = build_orchestrator(args.poverty_line);
    let records: Vec<HouseholdRecord> = imports.iter().map(|i| i.record.clone()).collect();
    let outcome = orchestrator.score_batch(&records);

    println!("Beneficiary vulnerability demo");
    render_batch(&outcome);

    let scores_by_id: HashMap<BeneficiaryId, ScoreRecord> = outcome
        .results
        .iter()
        .map(|score| (score.beneficiary_id.clone(), score.clone()))
        .collect();

    let mut households_by_area: BTreeMap<String, Vec<HouseholdRecord>> = BTreeMap::new();
    for import in &imports {
        if let Some(area) = &import.area {
            households_by_area
                .entry(area.clone())
                .or_default()
                .push(import.record.clone());
        }
    }

    let predictions = predict_area_needs(&households_by_area, &scores_by_id)?;
    render_area_predictions(&predictions);

    // Pair each scored household with its score for the pattern scan.
    let mut scored_records = Vec::new();
    let mut paired_scores = Vec::new();
    for record in &records {
        if let Some(score) = scores_by_id.get(&record.id) {
            scored_records.push(record.clone());
            paired_scores.push(score.clone());
        }
    }

    let alerts = detect_health_patterns(&scored_records, &paired_scores)?;
    render_health_alerts(&alerts);

    let trends = analyze_migration_trends(&records);
    render_migration_report(&trends);

    Ok(())
}

fn build_orchestrator(poverty_line: Option<f64>) -> ScoringOrchestrator {
    let config = match poverty_line {
        Some(line) => ScoringConfig::with_poverty_line(line),
        None => ScoringConfig::default(),
    };
    ScoringOrchestrator::new(config)
}

fn render_batch(outcome: &BatchOutcome) {
    println!(
        "\nScored {} household(s), {} failure(s)",
        outcome.results.len(),
        outcome.errors.len()
    );

    for score in &outcome.results {
        let top = &score.contributions[0];
        println!(
            "- {} | score {} ({}) | driven by {} {}/{} | confidence {:.2}",
            score.beneficiary_id.0,
            score.overall_score,
            score.risk_level.label(),
            top.factor.label(),
            top.points,
            top.max_points,
            score.confidence
        );
        for recommendation in &score.recommendations {
            println!("    * {recommendation}");
        }
    }

    for error in &outcome.errors {
        println!(
            "- record #{} ({}): {}",
            error.index, error.beneficiary_id, error.error
        );
    }
}

fn render_area_predictions(predictions: &[AreaPrediction]) {
    if predictions.is_empty() {
        println!("\nArea needs: no areas with joinable scores");
        return;
    }

    println!("\nArea needs (most vulnerable first)");
    for prediction in predictions {
        println!(
            "- {}: avg vulnerability {} over {} | {} critical / {} high | food {} | medical {} | housing {}",
            prediction.area,
            prediction.avg_vulnerability,
            prediction.based_on,
            prediction.critical_risk_families,
            prediction.high_risk_families,
            prediction.food_aid_needed,
            prediction.medical_aid_needed,
            prediction.housing_interventions_needed
        );
    }
}

fn render_health_alerts(alerts: &[HealthAlert]) {
    if alerts.is_empty() {
        println!("\nHealth patterns: none above the alert threshold");
        return;
    }

    println!("\nHealth patterns");
    for alert in alerts {
        println!(
            "- {}: {} families (risk {:.2}) -> {}",
            alert.condition, alert.affected_families, alert.risk_probability, alert.recommendation
        );
    }
}

fn render_migration_report(report: &MigrationTrendReport) {
    println!("\nMigration trends ({} analyzed)", report.total_analyzed);
    for slice in &report.breakdown {
        println!(
            "- {}: {} ({}%)",
            slice.status.label(),
            slice.count,
            slice.percentage
        );
    }
    println!("Risk assessment: {}", report.risk_narrative);
}

/// Synthetic cohort covering the signal mix the analyses look for: a shared
/// condition cluster, precarious housing, and a displacement spread.
fn builtin_cohort() -> Vec<HouseholdImport> {
    let now = Utc::now();

    let base = |id: &str, area: &str| HouseholdImport {
        area: Some(area.to_string()),
        record: HouseholdRecord {
            id: BeneficiaryId(id.to_string()),
            members: 4,
            children: 2,
            elderly: 0,
            disabled: 0,
            monthly_income: Some(600.0),
            housing: Some(HousingType::Tenant),
            employment: Some(EmploymentStatus::Employed),
            migration: Some(MigrationStatus::None),
            health_conditions: None,
            medical_visits: 0,
            medication_records: 0,
            last_aid_distribution: Some(now - Duration::days(20)),
        },
    };

    let mut cohort = Vec::new();

    let mut fam = base("fam-001", "north");
    fam.record.members = 6;
    fam.record.children = 3;
    fam.record.elderly = 1;
    fam.record.monthly_income = Some(150.0);
    fam.record.housing = Some(HousingType::Precarious);
    fam.record.employment = Some(EmploymentStatus::Unemployed);
    fam.record.migration = Some(MigrationStatus::Internal);
    fam.record.health_conditions = Some("diabetes, hypertension".to_string());
    fam.record.medical_visits = 8;
    fam.record.medication_records = 6;
    fam.record.last_aid_distribution = Some(now - Duration::days(90));
    cohort.push(fam);

    let mut fam = base("fam-002", "north");
    fam.record.monthly_income = Some(300.0);
    fam.record.employment = Some(EmploymentStatus::InformalWork);
    fam.record.health_conditions = Some("diabetes".to_string());
    fam.record.medical_visits = 3;
    cohort.push(fam);

    let mut fam = base("fam-003", "north");
    fam.record.housing = Some(HousingType::Precarious);
    fam.record.migration = Some(MigrationStatus::External);
    fam.record.health_conditions = Some("Diabetes, asthma".to_string());
    fam.record.monthly_income = None;
    cohort.push(fam);

    let mut fam = base("fam-004", "south");
    fam.record.housing = Some(HousingType::Owner);
    fam.record.monthly_income = Some(2500.0);
    fam.record.children = 1;
    cohort.push(fam);

    let mut fam = base("fam-005", "south");
    fam.record.elderly = 2;
    fam.record.employment = Some(EmploymentStatus::Retired);
    fam.record.health_conditions = Some("hypertension".to_string());
    fam.record.medication_records = 4;
    cohort.push(fam);

    let mut fam = base("fam-006", "south");
    fam.record.migration = Some(MigrationStatus::External);
    fam.record.housing = Some(HousingType::Precarious);
    fam.record.monthly_income = Some(100.0);
    fam.record.disabled = 1;
    cohort.push(fam);

    let mut fam = base("fam-007", "south");
    fam.record.migration = Some(MigrationStatus::Internal);
    fam.record.housing = Some(HousingType::Unknown);
    fam.record.last_aid_distribution = None;
    cohort.push(fam);

    let mut fam = base("fam-008", "north");
    fam.record.migration = Some(MigrationStatus::Returnee);
    fam.record.monthly_income = Some(220.0);
    fam.record.last_aid_distribution = Some(now - Duration::days(200));
    cohort.push(fam);

    cohort
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_cohort_scores_cleanly_and_feeds_every_analysis() {
        let imports = builtin_cohort();
        let orchestrator = build_orchestrator(None);
        let records: Vec<HouseholdRecord> =
            imports.iter().map(|i| i.record.clone()).collect();

        let outcome = orchestrator.score_batch(&records);
        assert_eq!(outcome.errors.len(), 0);
        assert_eq!(outcome.results.len(), imports.len());

        let scores_by_id: HashMap<BeneficiaryId, ScoreRecord> = outcome
            .results
            .iter()
            .map(|score| (score.beneficiary_id.clone(), score.clone()))
            .collect();

        let mut by_area: BTreeMap<String, Vec<HouseholdRecord>> = BTreeMap::new();
        for import in &imports {
            if let Some(area) = &import.area {
                by_area
                    .entry(area.clone())
                    .or_default()
                    .push(import.record.clone());
            }
        }

        let predictions = predict_area_needs(&by_area, &scores_by_id).expect("areas predict");
        assert_eq!(predictions.len(), 2);

        let alerts =
            detect_health_patterns(&records, &outcome.results).expect("lengths match");
        assert!(alerts.iter().any(|alert| alert.condition == "diabetes"));

        let trends = analyze_migration_trends(&records);
        assert_eq!(trends.total_analyzed, imports.len());
    }
}
