//! Run lifecycle handlers
//!
//! Starting a run returns immediately with the remote-assigned id; the
//! caller polls the status endpoint until a terminal status and then
//! fetches results. The gateway itself keeps nothing between these calls.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use actrun_core::dto::run::{RunResultsResponse, RunStartedResponse, RunStatusResponse};
use actrun_upstream::{ResultsQuery, UpstreamError};

use crate::api::auth::ApiKey;
use crate::api::error::{ApiError, ApiResult};
use crate::api::{AppState, clamp_limit};

const RESULTS_DEFAULT_LIMIT: u32 = 100;
const RESULTS_MAX_LIMIT: u32 = 1000;

/// POST /api/actor/{actor_id}/run
/// Start an actor run with the request body as its input payload
pub async fn start_run(
    State(state): State<AppState>,
    ApiKey(key): ApiKey,
    Path(actor_id): Path<String>,
    Json(input): Json<Value>,
) -> ApiResult<Json<RunStartedResponse>> {
    tracing::info!(actor_id, "Starting actor run");

    let run = state
        .upstream
        .start_run(&key, &actor_id, &input)
        .await
        .map_err(|e| match e {
            UpstreamError::Validation(detail) => ApiError::InvalidInput {
                message: "Invalid input parameters".to_string(),
                detail: Some(detail),
            },
            UpstreamError::NotFound(_) => ApiError::NotFound("Actor not found".to_string()),
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => ApiError::Internal("Failed to start actor run".to_string()),
        })?;

    let check_status_url = format!("/api/run/{}/status", run.id);

    Ok(Json(RunStartedResponse {
        success: true,
        run_id: run.id,
        status: run.status,
        message: Some("Actor run started successfully".to_string()),
        check_status_url,
    }))
}

/// GET /api/run/{run_id}/status
/// Check the current status of a run
pub async fn run_status(
    State(state): State<AppState>,
    ApiKey(key): ApiKey,
    Path(run_id): Path<String>,
) -> ApiResult<Json<RunStatusResponse>> {
    tracing::debug!(run_id, "Checking run status");

    let snapshot = state
        .upstream
        .run_status(&key, &run_id)
        .await
        .map_err(|e| match e {
            UpstreamError::NotFound(_) => ApiError::NotFound("Run not found".to_string()),
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => ApiError::Internal("Failed to check run status".to_string()),
        })?;

    Ok(Json(RunStatusResponse {
        success: true,
        run_id: snapshot.id,
        status: snapshot.status,
        started_at: snapshot.started_at,
        finished_at: snapshot.finished_at,
        stats: snapshot.stats,
        meta: snapshot.meta,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RunResultsParams {
    pub format: Option<String>,
    /// Kept as raw text: non-numeric values fall back to the default
    pub limit: Option<String>,
}

/// GET /api/run/{run_id}/results
/// Fetch the dataset produced by a run
pub async fn run_results(
    State(state): State<AppState>,
    ApiKey(key): ApiKey,
    Path(run_id): Path<String>,
    Query(params): Query<RunResultsParams>,
) -> ApiResult<Json<RunResultsResponse>> {
    let query = ResultsQuery {
        format: params.format.unwrap_or_else(|| "json".to_string()),
        limit: clamp_limit(
            params.limit.as_deref(),
            RESULTS_DEFAULT_LIMIT,
            RESULTS_MAX_LIMIT,
        ),
    };

    tracing::debug!(run_id, ?query, "Fetching run results");

    let results = state
        .upstream
        .run_results(&key, &run_id, &query)
        .await
        .map_err(|e| match e {
            UpstreamError::NotFound(_) => ApiError::NotFound("Run not found".to_string()),
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => ApiError::Internal("Failed to fetch run results".to_string()),
        })?;

    let count = results.as_array().map_or(1, Vec::len);

    Ok(Json(RunResultsResponse {
        success: true,
        results,
        count,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use actrun_upstream::UpstreamError;

    use crate::api::testing::StubApi;
    use crate::api::{AppState, create_router};

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("api-key", "abc123")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn start_run_returns_poll_url() {
        let router = create_router(StubApi::default().into_state());

        let resp = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/actor/a1/run")
                    .header("api-key", "abc123")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({ "url": "https://example.com" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["runId"], json!("r1"));
        assert_eq!(body["status"], json!("READY"));
        assert_eq!(body["checkStatusUrl"], json!("/api/run/r1/status"));
    }

    #[tokio::test]
    async fn rejected_input_is_bad_request_with_detail() {
        let stub =
            StubApi::failing_with(UpstreamError::Validation("url must be absolute".to_string()));
        let router = create_router(stub.into_state());

        let resp = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/actor/a1/run")
                    .header("api-key", "abc123")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({ "url": 5 }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["message"], json!("Invalid input parameters"));
        assert_eq!(body["error"], json!("url must be absolute"));
    }

    #[tokio::test]
    async fn status_reshapes_snapshot() {
        let router = create_router(StubApi::default().into_state());

        let resp = router.oneshot(get("/api/run/r1/status")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["runId"], json!("r1"));
        assert_eq!(body["status"], json!("RUNNING"));
    }

    #[tokio::test]
    async fn results_limit_is_clamped() {
        let stub = Arc::new(StubApi::default());
        let state = AppState {
            upstream: stub.clone(),
        };
        let router = create_router(state);

        router
            .clone()
            .oneshot(get("/api/run/r1/results?limit=9999"))
            .await
            .unwrap();
        router
            .clone()
            .oneshot(get("/api/run/r1/results"))
            .await
            .unwrap();

        let queries = stub.results_queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].limit, 1000);
        assert_eq!(queries[1].limit, 100);
        assert_eq!(queries[1].format, "json");
    }

    #[tokio::test]
    async fn results_count_tracks_array_length() {
        let mut stub = StubApi::default();
        stub.results = Ok(json!([{ "a": 1 }, { "a": 2 }, { "a": 3 }]));
        let router = create_router(stub.into_state());

        let resp = router.oneshot(get("/api/run/r1/results")).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["count"], json!(3));
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
    }
}
