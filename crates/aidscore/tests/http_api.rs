//! HTTP round-trips through the library routers, exercising the same wiring
//! the service binary mounts.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use aidscore::analytics::analytics_router;
use aidscore::scoring::{scoring_router, ScoringConfig, ScoringOrchestrator};

fn app() -> Router {
    let orchestrator = Arc::new(ScoringOrchestrator::new(ScoringConfig::default()));
    scoring_router(orchestrator).merge(analytics_router())
}

async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds");

    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

fn sample_household(id: &str) -> Value {
    json!({
        "id": id,
        "members": 5,
        "children": 2,
        "elderly": 1,
        "disabled": 0,
        "monthly_income": 250.0,
        "housing": "precarious",
        "employment": "unemployed",
        "migration": "internal",
        "health_conditions": "diabetes, asthma",
        "medical_visits": 6,
        "medication_records": 3
    })
}

#[tokio::test]
async fn score_endpoint_returns_a_complete_score_record() {
    let (status, body) = post_json(app(), "/api/v1/score", sample_household("api-1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["beneficiary_id"], "api-1");

    let overall = body["overall_score"].as_u64().expect("overall score");
    let factors = &body["factors"];
    let sum = factors["economic"].as_u64().unwrap()
        + factors["health"].as_u64().unwrap()
        + factors["social"].as_u64().unwrap()
        + factors["urgency"].as_u64().unwrap();
    assert_eq!(overall, sum);
    assert!(overall <= 100);

    assert!(body["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
    assert_eq!(body["contributions"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn score_endpoint_rejects_structurally_invalid_records() {
    let mut record = sample_household("api-invalid");
    record["members"] = json!(0);

    let (status, body) = post_json(app(), "/api/v1/score", record).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("at least one member")));
}

#[tokio::test]
async fn batch_endpoint_isolates_bad_records() {
    let mut bad = sample_household("api-bad");
    bad["members"] = json!(0);
    let payload = json!({
        "households": [sample_household("api-a"), bad, sample_household("api-b")]
    });

    let (status, body) = post_json(app(), "/api/v1/score/batch", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_processed"], 3);
    assert_eq!(body["successful"], 2);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["errors"][0]["index"], 1);
    assert_eq!(body["errors"][0]["beneficiary_id"], "api-bad");
}

#[tokio::test]
async fn health_pattern_endpoint_rejects_mismatched_lengths() {
    let payload = json!({
        "households": [sample_household("api-hp")],
        "scores": []
    });

    let (status, body) = post_json(app(), "/api/v1/predict/health-patterns", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("matching lengths")));
}

#[tokio::test]
async fn migration_trend_endpoint_reports_the_breakdown() {
    let households: Vec<Value> = (0..4)
        .map(|index| {
            let mut record = sample_household(&format!("api-mt-{index}"));
            record["migration"] = if index == 0 {
                json!("external")
            } else {
                json!("none")
            };
            record
        })
        .collect();

    let (status, body) = post_json(
        app(),
        "/api/v1/predict/migration-trends",
        Value::Array(households),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trends"]["total_analyzed"], 4);
    assert_eq!(body["trends"]["external_migrants"], 1);
    assert_eq!(body["trends"]["risk_level"], "HIGH");
}

#[tokio::test]
async fn area_needs_endpoint_joins_scores_by_id() {
    let batch_payload = json!({ "households": [sample_household("api-area-1")] });
    let (_, batch_body) = post_json(app(), "/api/v1/score/batch", batch_payload).await;
    let score = batch_body["results"][0].clone();

    let payload = json!({
        "households_by_area": { "north": [sample_household("api-area-1")] },
        "scores_by_id": { "api-area-1": score }
    });

    let (status, body) = post_json(app(), "/api/v1/predict/area-needs", payload).await;

    assert_eq!(status, StatusCode::OK);
    let predictions = body["predictions"].as_array().expect("predictions array");
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0]["area"], "north");
    assert_eq!(predictions[0]["total_families"], 1);
    assert_eq!(predictions[0]["housing_interventions_needed"], 1.0);
}

#[tokio::test]
async fn migration_risk_level_serializes_with_its_compound_label() {
    let households: Vec<Value> = (0..20)
        .map(|index| {
            let mut record = sample_household(&format!("api-mix-{index}"));
            record["migration"] = match index {
                0 | 1 => json!("external"),
                2..=4 => json!("internal"),
                _ => json!("none"),
            };
            record
        })
        .collect();

    let (status, body) = post_json(
        app(),
        "/api/v1/predict/migration-trends",
        Value::Array(households),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trends"]["risk_level"], "MEDIUM-HIGH");
}
