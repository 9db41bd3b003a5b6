//! HTTP routes.

mod chat;
mod decision;
mod guidance;
mod settings;
mod upload;

pub use chat::ChatPrompt;

use crate::AppState;
use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// `GET /health`
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the application router.
///
/// Every route runs under `request_timeout`; for the chat stream this
/// bounds the time to the first byte, not the whole stream.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/decision", post(decision::decision))
        .route("/decision/enhanced", post(decision::enhanced_decision))
        .route("/insights", post(decision::insights))
        .route("/optimize-production", post(decision::optimize_production))
        .route(
            "/settings/locations",
            get(settings::list_locations).post(settings::create_location),
        )
        .route("/settings/locations/:id", delete(settings::delete_location))
        .route(
            "/settings/preferences",
            get(settings::get_preferences).post(settings::save_preferences),
        )
        .route("/guidance", post(guidance::submit_guidance))
        .route("/upload", post(upload::upload))
        .route("/stream/chat", post(chat::chat))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
