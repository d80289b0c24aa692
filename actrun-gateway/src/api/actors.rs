//! Actor browsing handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use actrun_core::dto::actor::{
    ActorDetailResponse, ActorListResponse, CategoriesResponse, Category,
};
use actrun_upstream::{StoreQuery, UpstreamError};

use crate::api::auth::ApiKey;
use crate::api::error::{ApiError, ApiResult};
use crate::api::{AppState, clamp_limit};

const PUBLIC_ACTORS_DEFAULT_LIMIT: u32 = 50;
const PUBLIC_ACTORS_MAX_LIMIT: u32 = 100;

/// GET /api/my-actors
/// List the actors owned by the caller's account
pub async fn my_actors(
    State(state): State<AppState>,
    ApiKey(key): ApiKey,
) -> ApiResult<Json<ActorListResponse>> {
    tracing::debug!("Listing own actors");

    let actors = state
        .upstream
        .list_own_actors(&key)
        .await
        .map_err(|e| match e {
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => ApiError::Internal("Failed to fetch your actors. Please try again.".to_string()),
        })?;

    Ok(Json(ActorListResponse {
        success: true,
        actors,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PublicActorsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Kept as raw text: non-numeric values fall back to the default
    pub limit: Option<String>,
}

/// GET /api/public-actors
/// List public actors from the store, optionally filtered
pub async fn public_actors(
    State(state): State<AppState>,
    ApiKey(key): ApiKey,
    Query(params): Query<PublicActorsQuery>,
) -> ApiResult<Json<ActorListResponse>> {
    let query = StoreQuery {
        search: params.search.filter(|s| !s.is_empty()),
        category: params.category.filter(|c| !c.is_empty()),
        limit: clamp_limit(
            params.limit.as_deref(),
            PUBLIC_ACTORS_DEFAULT_LIMIT,
            PUBLIC_ACTORS_MAX_LIMIT,
        ),
    };

    tracing::debug!(?query, "Listing public actors");

    let actors = state
        .upstream
        .list_public_actors(&key, &query)
        .await
        .map_err(|e| match e {
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => {
                ApiError::Internal("Failed to fetch public actors. Please try again.".to_string())
            }
        })?;

    Ok(Json(ActorListResponse {
        success: true,
        actors,
    }))
}

/// GET /api/actor/{actor_id}
/// Get actor details, including the declared input schema
pub async fn get_actor(
    State(state): State<AppState>,
    ApiKey(key): ApiKey,
    Path(actor_id): Path<String>,
) -> ApiResult<Json<ActorDetailResponse>> {
    tracing::debug!(actor_id, "Fetching actor details");

    let actor = state
        .upstream
        .get_actor(&key, &actor_id)
        .await
        .map_err(|e| match e {
            UpstreamError::NotFound(_) => ApiError::NotFound("Actor not found".to_string()),
            UpstreamError::Auth(_) => ApiError::Unauthorized(
                "Invalid API key. Please check your credentials.".to_string(),
            ),
            _ => ApiError::Internal("Failed to fetch actor details".to_string()),
        })?;

    Ok(Json(ActorDetailResponse {
        success: true,
        actor,
    }))
}

/// GET /api/categories
/// Static category list; the store exposes no category endpoint, so the
/// set is enumerated here and involves no remote call.
pub async fn categories() -> Json<CategoriesResponse> {
    let categories = [
        ("data-extraction", "Data Extraction"),
        ("automation", "Automation"),
        ("social-media", "Social Media"),
        ("e-commerce", "E-commerce"),
        ("monitoring", "Monitoring"),
        ("ai-ml", "AI & Machine Learning"),
    ]
    .into_iter()
    .map(|(id, title)| Category {
        id: id.to_string(),
        title: title.to_string(),
    })
    .collect();

    Json(CategoriesResponse {
        success: true,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use actrun_upstream::UpstreamError;

    use crate::api::testing::StubApi;
    use crate::api::create_router;

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
    async fn public_actor_limit_is_clamped() {
        let stub = std::sync::Arc::new(StubApi::default());
        let state = crate::api::AppState {
            upstream: stub.clone(),
        };
        let router = create_router(state);

        router
            .clone()
            .oneshot(get("/api/public-actors?limit=9999&search=scraper&category=automation"))
            .await
            .unwrap();
        router
            .clone()
            .oneshot(get("/api/public-actors"))
            .await
            .unwrap();

        let queries = stub.store_queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].limit, 100);
        assert_eq!(queries[0].search.as_deref(), Some("scraper"));
        assert_eq!(queries[0].category.as_deref(), Some("automation"));
        assert_eq!(queries[1].limit, 50);
        assert!(queries[1].search.is_none());
    }

    #[tokio::test]
    async fn missing_actor_is_not_found() {
        let stub = StubApi::failing_with(UpstreamError::NotFound("no such actor".to_string()));
        let router = create_router(stub.into_state());

        let resp = router.oneshot(get("/api/actor/nope")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = body_json(resp).await;
        assert_eq!(body["message"], json!("Actor not found"));
    }

    #[tokio::test]
    async fn categories_need_no_credential() {
        let router = create_router(StubApi::default().into_state());

        let resp = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["categories"].as_array().unwrap().len(), 6);
        assert_eq!(body["categories"][0]["id"], json!("data-extraction"));
    }
}
