use std::collections::{BTreeMap, HashMap};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::scoring::domain::{BeneficiaryId, HouseholdRecord, ScoreRecord};

use super::area::{predict_area_needs, AreaPrediction};
use super::health::{detect_health_patterns, HealthAlert};
use super::migration::{analyze_migration_trends, MigrationTrendReport};
use super::ValidationError;

/// Router builder exposing the aggregate prediction endpoints. The analyses
/// are stateless, so the router carries no shared state.
pub fn analytics_router() -> Router {
    Router::new()
        .route("/api/v1/predict/area-needs", post(area_needs_handler))
        .route(
            "/api/v1/predict/health-patterns",
            post(health_patterns_handler),
        )
        .route(
            "/api/v1/predict/migration-trends",
            post(migration_trends_handler),
        )
}

#[derive(Debug, Deserialize)]
pub(crate) struct AreaNeedsRequest {
    pub(crate) households_by_area: BTreeMap<String, Vec<HouseholdRecord>>,
    pub(crate) scores_by_id: HashMap<BeneficiaryId, ScoreRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AreaNeedsResponse {
    pub(crate) predictions: Vec<AreaPrediction>,
}

pub(crate) async fn area_needs_handler(
    axum::Json(request): axum::Json<AreaNeedsRequest>,
) -> Response {
    match predict_area_needs(&request.households_by_area, &request.scores_by_id) {
        Ok(predictions) => {
            (StatusCode::OK, axum::Json(AreaNeedsResponse { predictions })).into_response()
        }
        Err(error) => validation_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthPatternsRequest {
    pub(crate) households: Vec<HouseholdRecord>,
    pub(crate) scores: Vec<ScoreRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthPatternsResponse {
    pub(crate) total_analyzed: usize,
    pub(crate) alerts: Vec<HealthAlert>,
}

pub(crate) async fn health_patterns_handler(
    axum::Json(request): axum::Json<HealthPatternsRequest>,
) -> Response {
    match detect_health_patterns(&request.households, &request.scores) {
        Ok(alerts) => (
            StatusCode::OK,
            axum::Json(HealthPatternsResponse {
                total_analyzed: request.households.len(),
                alerts,
            }),
        )
            .into_response(),
        Err(error) => validation_response(error),
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MigrationTrendsResponse {
    pub(crate) trends: MigrationTrendReport,
}

pub(crate) async fn migration_trends_handler(
    axum::Json(households): axum::Json<Vec<HouseholdRecord>>,
) -> Response {
    let trends = analyze_migration_trends(&households);
    (
        StatusCode::OK,
        axum::Json(MigrationTrendsResponse { trends }),
    )
        .into_response()
}

fn validation_response(error: ValidationError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}
