//! Streaming chat route.

use crate::{ApiError, ApiResult, AppState};
use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;
use tracing::instrument;

/// Chat request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatPrompt {
    /// Text to send
    pub prompt: String,
    /// Earlier turns; accepted for compatibility, not sent upstream
    #[serde(default)]
    pub previous: Option<Vec<String>>,
}

/// `POST /stream/chat`
///
/// Streams `text/plain` deltas in the order the model produces them.
#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatPrompt>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;
    if request.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("Prompt is required"));
    }

    let text = state
        .chat
        .relay(&request.prompt)
        .await
        .map_err(|e| ApiError::from_depot(e, "Failed to start chat stream"))?;

    let body = Body::from_stream(text.map(Ok::<_, Infallible>));
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}
