//! Location and preference routes.

use crate::{ApiError, ApiResult, AppState};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use depot_core::{CompanyLocation, LocationInput, Settings};
use serde_json::{Value, json};
use tracing::{debug, instrument};
use uuid::Uuid;

/// `GET /settings/locations`
#[instrument(skip(state))]
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Json<Vec<CompanyLocation>>> {
    let locations = state
        .settings
        .list_locations()
        .await
        .map_err(|e| ApiError::from_depot(e, "Failed to fetch locations"))?;
    Ok(Json(locations))
}

/// `POST /settings/locations`
#[instrument(skip(state, payload))]
pub async fn create_location(
    State(state): State<AppState>,
    payload: Result<Json<LocationInput>, JsonRejection>,
) -> ApiResult<Json<CompanyLocation>> {
    let Json(input) = payload?;
    let location = input
        .validate()
        .map_err(|e| ApiError::bad_request(e.message))?;

    let created = state
        .settings
        .create_location(location)
        .await
        .map_err(|e| ApiError::from_depot(e, "Failed to create location"))?;
    Ok(Json(created))
}

/// `DELETE /settings/locations/{id}`
///
/// An id that is not a UUID cannot match any row, so it succeeds without
/// touching the store.
#[instrument(skip(state))]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    match Uuid::parse_str(&id) {
        Ok(id) => {
            let removed = state
                .settings
                .delete_location(id)
                .await
                .map_err(|e| ApiError::from_depot(e, "Failed to delete location"))?;
            debug!(%id, removed, "Deleted location");
        }
        Err(_) => debug!(id, "Ignoring delete for malformed location id"),
    }
    Ok(Json(json!({ "success": true })))
}

/// `GET /settings/preferences`
///
/// Returns the defaults until preferences have been saved.
#[instrument(skip(state))]
pub async fn get_preferences(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    let stored = state
        .settings
        .load_settings()
        .await
        .map_err(|e| ApiError::from_depot(e, "Failed to fetch preferences"))?;
    Ok(Json(stored.unwrap_or_default()))
}

/// `POST /settings/preferences`
#[instrument(skip(state, payload))]
pub async fn save_preferences(
    State(state): State<AppState>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> ApiResult<Json<Settings>> {
    let Json(settings) = payload?;
    let saved = state
        .settings
        .save_settings(settings)
        .await
        .map_err(|e| ApiError::from_depot(e, "Failed to save preferences"))?;
    Ok(Json(saved))
}
