//! Health Check API Handler

use axum::Json;
use serde_json::{Value, json};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::api::testing::StubApi;

    #[tokio::test]
    async fn health_is_open() {
        let router = create_router(StubApi::default().into_state());

        let resp = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], serde_json::json!("OK"));
        assert!(body["timestamp"].is_string());
    }
}
