use crate::infra::AppState;
use aidscore::analytics::analytics_router;
use aidscore::scoring::{scoring_router, FactorKind, ScoringConfig, ScoringOrchestrator};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

pub(crate) fn with_core_routes(orchestrator: Arc<ScoringOrchestrator>) -> axum::Router {
    let info = service_info_payload(orchestrator.scorer().config());

    scoring_router(orchestrator)
        .merge(analytics_router())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/info",
            axum::routing::get(move || {
                let info = info.clone();
                async move { Json(info) }
            }),
        )
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) fn service_info_payload(config: &ScoringConfig) -> Value {
    let factors: Vec<Value> = FactorKind::ordered()
        .iter()
        .map(|factor| {
            json!({
                "name": factor.label(),
                "max_points": factor.max_points(),
            })
        })
        .collect();

    json!({
        "service": "Beneficiary Vulnerability Service",
        "version": env!("CARGO_PKG_VERSION"),
        "poverty_line": config.poverty_line,
        "factors": factors,
        "endpoints": {
            "scoring": ["/api/v1/score", "/api/v1/score/batch"],
            "predictions": [
                "/api/v1/predict/area-needs",
                "/api/v1/predict/health-patterns",
                "/api/v1/predict/migration-trends"
            ]
        }
    })
}
