pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_request_bytes);
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/requirements/parse",
            post(handlers::handle_parse_requirements),
        )
        .route(
            "/api/v1/experience/estimate",
            post(handlers::handle_estimate_experience),
        )
        .route("/api/v1/screen", post(handlers::handle_screen))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{batch_body_limit, Config};
    use crate::scoring::params::ScoringParams;

    fn config_with_limits(max_document_bytes: usize, max_batch_documents: usize) -> Config {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            default_params: ScoringParams::default(),
            min_years_required: None,
            max_document_bytes,
            max_batch_documents,
            max_request_bytes: batch_body_limit(max_document_bytes, max_batch_documents),
        }
    }

    fn test_state() -> AppState {
        AppState {
            config: config_with_limits(1024, 3),
        }
    }

    async fn post_raw(state: AppState, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn post_json_with(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, bytes) = post_raw(state, uri, body.to_string()).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        post_json_with(test_state(), uri, body).await
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_parse_requirements_route() {
        let (status, body) = post_json(
            "/api/v1/requirements/parse",
            json!({ "requirements_text": "🎯 Must have\nCloud:\nAWS\nTerraform" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["keywords"], json!(["AWS", "Terraform"]));
    }

    #[tokio::test]
    async fn test_estimate_route_with_reference_date() {
        let (status, body) = post_json(
            "/api/v1/experience/estimate",
            json!({ "text": "Jan 2020 - Present", "reference_date": "2024-06-15" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reference_date"], "2024-06-15");
        assert_eq!(body["estimate"]["years"], 4.4);
        assert_eq!(body["estimate"]["source"], "ranges");
        assert_eq!(body["intervals"][0]["start"], "2020-01-15");
        assert_eq!(body["intervals"][0]["end"], "2024-06-15");
    }

    #[tokio::test]
    async fn test_screen_route_end_to_end() {
        let (status, body) = post_json(
            "/api/v1/screen",
            json!({
                "keywords": ["Python", "AWS"],
                "documents": [
                    { "file_name": "jane.pdf", "text": "5 years of Python and AWS experience, Jan 2019 - Jan 2024" },
                    { "file_name": "notes.txt", "text": "ignored" }
                ],
                "params": { "points_per_year": 5.0, "junior_max_years": 2.0, "mid_max_years": 4.0 },
                "reference_date": "2024-06-15"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scored"], 1);
        assert_eq!(body["skipped_files"], json!(["notes.txt"]));

        let result = &body["results"][0];
        assert_eq!(result["file_name"], "jane.pdf");
        assert_eq!(result["estimate"]["years"], 5.0);
        assert_eq!(result["keyword_score"], 20);
        assert_eq!(result["experience_score"], 25.0);
        assert_eq!(result["total_score"], 45.0);
        assert_eq!(result["level"], "Senior");
        assert_eq!(result["matched_keywords"], json!(["Python", "AWS"]));
    }

    #[tokio::test]
    async fn test_screen_rejects_invalid_params() {
        let (status, body) = post_json(
            "/api/v1/screen",
            json!({
                "keywords": ["Rust"],
                "documents": [{ "file_name": "a.pdf", "text": "Rust" }],
                "params": { "points_per_year": -5.0, "junior_max_years": 2.0, "mid_max_years": 6.0 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_screen_rejects_empty_and_oversized_batches() {
        let (status, _) = post_json(
            "/api/v1/screen",
            json!({ "keywords": ["Rust"], "documents": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let docs: Vec<Value> = (0..4)
            .map(|i| json!({ "file_name": format!("{i}.pdf"), "text": "x" }))
            .collect();
        let (status, _) = post_json(
            "/api/v1/screen",
            json!({ "keywords": ["Rust"], "documents": docs }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_screen_rejects_oversized_document() {
        let (status, body) = post_json(
            "/api/v1/screen",
            json!({
                "requirements_text": "Rust",
                "documents": [{ "file_name": "big.pdf", "text": "a".repeat(2048) }]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("big.pdf"));
    }

    #[tokio::test]
    async fn test_screen_requires_requirements_source() {
        let (status, _) = post_json(
            "/api/v1/screen",
            json!({ "documents": [{ "file_name": "a.pdf", "text": "Rust" }] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_screen_accepts_batch_larger_than_axum_default_limit() {
        let state = AppState {
            config: config_with_limits(512 * 1024, 500),
        };
        let text = format!("Rust, Jan 2019 - Jan 2024. {}", "x".repeat(10 * 1024));
        let docs: Vec<Value> = (0..300)
            .map(|i| json!({ "file_name": format!("{i}.pdf"), "text": text }))
            .collect();
        let body = json!({
            "keywords": ["Rust"],
            "documents": docs,
            "reference_date": "2024-06-15"
        });
        assert!(body.to_string().len() > 2 * 1024 * 1024);

        let (status, body) = post_json_with(state, "/api/v1/screen", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scored"], 300);
        assert_eq!(body["results"][0]["estimate"]["years"], 5.0);
    }

    #[tokio::test]
    async fn test_body_over_request_limit_is_rejected() {
        let mut config = config_with_limits(1024, 3);
        config.max_request_bytes = 4096;
        let state = AppState { config };
        let body = json!({
            "keywords": ["Rust"],
            "documents": [{ "file_name": "a.pdf", "text": "a".repeat(8192) }]
        });

        let (status, _) = post_raw(state, "/api/v1/screen", body.to_string()).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_screen_partial_params_use_configured_defaults() {
        let mut config = config_with_limits(1024, 3);
        config.default_params = ScoringParams {
            points_per_year: 5.0,
            junior_max_years: 1.0,
            mid_max_years: 3.0,
        };
        let state = AppState { config };

        let (status, body) = post_json_with(
            state,
            "/api/v1/screen",
            json!({
                "keywords": ["Go"],
                "documents": [{ "file_name": "a.pdf", "text": "Go, 4 years" }],
                "params": { "points_per_year": 2.0 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["params"]["points_per_year"], 2.0);
        assert_eq!(body["params"]["junior_max_years"], 1.0);
        assert_eq!(body["params"]["mid_max_years"], 3.0);
        assert_eq!(body["results"][0]["experience_score"], 8.0);
        assert_eq!(body["results"][0]["level"], "Senior");
    }

    #[tokio::test]
    async fn test_screen_can_disable_configured_min_years() {
        let screen = |enforce: Option<bool>| {
            let mut config = config_with_limits(1024, 3);
            config.min_years_required = Some(3.0);
            let state = AppState { config };
            let mut body = json!({
                "keywords": ["Go"],
                "documents": [{ "file_name": "a.pdf", "text": "Go, 1 year" }]
            });
            if let Some(enforce) = enforce {
                body["enforce_min_years"] = json!(enforce);
            }
            post_json_with(state, "/api/v1/screen", body)
        };

        let (status, body) = screen(None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hidden_below_min_years"], 1);

        let (status, body) = screen(Some(false)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hidden_below_min_years"], 0);
        assert_eq!(body["results"][0]["file_name"], "a.pdf");
    }
}
