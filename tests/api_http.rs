// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /api/score  (happy path, empty transcript, malformed body)
// - GET /api/rubric

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use rubric_scorer::analyzers::Analyzers;
use rubric_scorer::{router, AppState, Rubric, RubricEngine};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Same Router the binary serves, minus `/metrics`.
fn test_router() -> Router {
    let engine = RubricEngine::new(Rubric::default(), Analyzers::builtin());
    router(AppState::new(engine))
}

async fn post_json(app: Router, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("build POST");
    let resp = app.oneshot(req).await.expect("oneshot POST");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, bytes)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_score_returns_expected_json_fields() {
    let payload = json!({
        "transcript": "Hello everyone, my name is Asha. I am 10 years old and I study in class 5. \
                       My family is very supportive. I like painting. Thank you.",
        "duration_sec": 15.0
    });
    let body = Body::from(serde_json::to_vec(&payload).expect("serialize payload"));
    let (status, bytes) = post_json(test_router(), "/api/score", body).await;
    assert_eq!(status, StatusCode::OK);

    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    for key in [
        "overall_score",
        "base_rubric_score",
        "semantic_score_0_10",
        "max_score",
        "words",
        "duration_sec",
        "wpm",
        "criteria",
    ] {
        assert!(v.get(key).is_some(), "missing field `{key}` in {v}");
    }
    assert_eq!(v["max_score"], json!(100.0));

    let criteria = v["criteria"].as_array().expect("criteria array");
    assert_eq!(criteria.len(), 10);
    for c in criteria {
        for key in ["criterion", "max_score", "score", "detail"] {
            assert!(c.get(key).is_some(), "criterion missing `{key}`: {c}");
        }
    }
    assert_eq!(criteria[0]["criterion"], json!("Salutation Level"));
    assert_eq!(criteria[0]["score"], json!(4.0));
    assert_eq!(criteria[1]["score"], json!(20.0));
    assert_eq!(criteria[9]["criterion"], json!("Semantic Alignment"));

    let overall = v["overall_score"].as_f64().expect("overall");
    assert!((0.0..=100.0).contains(&overall));
}

#[tokio::test]
async fn api_score_accepts_empty_transcript() {
    let payload = json!({ "transcript": "   ", "duration_sec": 52.0 });
    let body = Body::from(serde_json::to_vec(&payload).expect("serialize payload"));
    let (status, bytes) = post_json(test_router(), "/api/score", body).await;
    assert_eq!(status, StatusCode::OK);

    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(v["words"], json!(0));
    assert_eq!(v["wpm"], json!(0.0));
    assert_eq!(v["semantic_score_0_10"], json!(0.0));
}

#[tokio::test]
async fn api_score_invalid_duration_scores_zero_rate() {
    let payload = json!({ "transcript": "Hello there", "duration_sec": 0.0 });
    let body = Body::from(serde_json::to_vec(&payload).expect("serialize payload"));
    let (status, bytes) = post_json(test_router(), "/api/score", body).await;
    assert_eq!(status, StatusCode::OK);

    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    let rate = &v["criteria"][4];
    assert_eq!(rate["criterion"], json!("Speech Rate (WPM)"));
    assert_eq!(rate["score"], json!(0.0));
    assert_eq!(rate["detail"], json!("Invalid duration."));
}

#[tokio::test]
async fn api_score_rejects_malformed_json() {
    let (status, _) = post_json(
        test_router(),
        "/api/score",
        Body::from("{\"transcript\": \"hi\", "),
    )
    .await;
    assert!(status.is_client_error(), "expected 4xx, got {status}");

    let missing_duration = Body::from(r#"{"transcript":"hi"}"#);
    let (status, _) = post_json(test_router(), "/api/score", missing_duration).await;
    assert!(status.is_client_error(), "expected 4xx, got {status}");
}

#[tokio::test]
async fn api_rubric_lists_criteria_and_analyzers() {
    let req = Request::builder()
        .method("GET")
        .uri("/api/rubric")
        .body(Body::empty())
        .expect("build GET /api/rubric");
    let resp = test_router().oneshot(req).await.expect("oneshot /api/rubric");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("json body");

    assert_eq!(v["max_score"], json!(100.0));
    let criteria = v["criteria"].as_array().expect("criteria array");
    assert_eq!(criteria.len(), 10);
    let classical: f64 = criteria[..9]
        .iter()
        .map(|c| c["max_score"].as_f64().expect("max_score"))
        .sum();
    assert_eq!(classical, 100.0);

    let analyzers = v["analyzers"].as_array().expect("analyzers array");
    assert_eq!(analyzers.len(), 3);
    assert!(analyzers.iter().all(|a| a["available"] == json!(true)));
}
