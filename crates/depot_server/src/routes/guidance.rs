//! User guidance route.

use crate::{ApiError, ApiResult, AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use depot_engine::{GuidanceOutcome, GuidanceSubmission};
use tracing::instrument;

/// `POST /guidance`
#[instrument(skip(state, payload))]
pub async fn submit_guidance(
    State(state): State<AppState>,
    payload: Result<Json<GuidanceSubmission>, JsonRejection>,
) -> ApiResult<Json<GuidanceOutcome>> {
    let Json(submission) = payload?;
    let outcome = state
        .engine
        .process_guidance(submission)
        .await
        .map_err(|e| ApiError::from_depot(e, "Failed to process guidance"))?;
    Ok(Json(outcome))
}
