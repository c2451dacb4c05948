//! The consumer-facing HTTP surface.
//!
//! The presentation layer is an external consumer: it calls
//! `/api/v1/dashboard` on whatever schedule it likes and renders the
//! structured snapshot it gets back. A cache hit inside the engine makes
//! repeated calls within the TTL window cheap.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use salesboard_engine::RefreshEngine;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub engine: Arc<RefreshEngine>,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/dashboard", get(dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness plus a directory-source ping.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match salesboard_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": e.to_string() })),
            )
        }
    }
}

/// One dashboard snapshot for today's date.
///
/// Never an HTTP error: cycle failures surface inside the snapshot's
/// `error` field, which the consumer renders as a banner.
async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let snapshot = state.engine.snapshot(today).await;
    Json(snapshot)
}
