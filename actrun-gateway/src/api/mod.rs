//! API Module
//!
//! HTTP surface of the gateway. Each submodule handles endpoints for a
//! specific domain. The gateway itself holds no state between requests:
//! every call is forwarded to the upstream automation API and reshaped.

pub mod actors;
pub mod auth;
pub mod error;
pub mod health;
pub mod runs;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use actrun_upstream::AutomationApi;

/// Shared handler state: the upstream client behind its trait seam.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn AutomationApi>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Credential validation (the only endpoint taking the key in the body)
        .route("/api/validate-key", post(auth::validate_key))
        // Actor browsing
        .route("/api/my-actors", get(actors::my_actors))
        .route("/api/public-actors", get(actors::public_actors))
        .route("/api/actor/{actor_id}", get(actors::get_actor))
        .route("/api/categories", get(actors::categories))
        // Run lifecycle
        .route("/api/actor/{actor_id}/run", post(runs::start_run))
        .route("/api/run/{run_id}/status", get(runs::run_status))
        .route("/api/run/{run_id}/results", get(runs::run_results))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Parses a raw `limit` query value, falling back to `default` and capping
/// at `max`. Non-numeric values get the default, like the rest of the
/// query-string handling this surface keeps lenient.
pub(crate) fn clamp_limit(raw: Option<&str>, default: u32, max: u32) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(default)
        .min(max)
}
