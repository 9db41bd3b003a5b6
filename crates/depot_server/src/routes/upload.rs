//! File upload route.

use crate::{ApiError, ApiResult, AppState};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
};
use depot_engine::{FileUpload, store_upload};
use depot_error::{UploadError, UploadErrorKind};
use serde_json::{Value, json};
use tracing::{debug, instrument};

const FAILED: &str = "Failed to process upload";

fn read_error(e: MultipartError) -> ApiError {
    ApiError::from_depot(
        UploadError::new(UploadErrorKind::Read(e.body_text())).into(),
        FAILED,
    )
}

/// `POST /upload`
///
/// Multipart fields: `file` (the content) and `type` (`csv` or `json`).
#[instrument(skip(state, multipart))]
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult<Json<Value>> {
    let mut file: Option<(String, String)> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content = field.text().await.map_err(read_error)?;
                file = Some((filename, content));
            }
            Some("type") => kind = Some(field.text().await.map_err(read_error)?),
            other => debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let (filename, content) = file.ok_or_else(|| {
        ApiError::from_depot(UploadError::new(UploadErrorKind::MissingFile).into(), FAILED)
    })?;

    let summary = store_upload(
        state.uploads.as_ref(),
        FileUpload {
            filename,
            kind: kind.unwrap_or_default(),
            content,
        },
    )
    .await
    .map_err(|e| ApiError::from_depot(e, "Failed to store uploaded data"))?;

    Ok(Json(json!({ "success": true, "data": summary })))
}
