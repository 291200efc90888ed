use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{HouseholdRecord, ScoreRecord};
use super::orchestrator::{BatchError, ScoringOrchestrator};

/// Router builder exposing the scoring endpoints.
pub fn scoring_router(orchestrator: Arc<ScoringOrchestrator>) -> Router {
    Router::new()
        .route("/api/v1/score", post(score_handler))
        .route("/api/v1/score/batch", post(batch_handler))
        .with_state(orchestrator)
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchScoringRequest {
    pub(crate) households: Vec<HouseholdRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchScoringResponse {
    pub(crate) total_processed: usize,
    pub(crate) successful: usize,
    pub(crate) failed: usize,
    pub(crate) results: Vec<ScoreRecord>,
    pub(crate) errors: Vec<BatchError>,
}

pub(crate) async fn score_handler(
    State(orchestrator): State<Arc<ScoringOrchestrator>>,
    axum::Json(record): axum::Json<HouseholdRecord>,
) -> Response {
    match orchestrator.score_one(&record) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_handler(
    State(orchestrator): State<Arc<ScoringOrchestrator>>,
    axum::Json(request): axum::Json<BatchScoringRequest>,
) -> Response {
    let outcome = orchestrator.score_batch(&request.households);

    let response = BatchScoringResponse {
        total_processed: outcome.total_processed(),
        successful: outcome.results.len(),
        failed: outcome.errors.len(),
        results: outcome.results,
        errors: outcome.errors,
    };

    (StatusCode::OK, axum::Json(response)).into_response()
}
