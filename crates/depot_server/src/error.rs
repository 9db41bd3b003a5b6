//! Uniform HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use depot_error::{DepotError, DepotErrorKind, UploadErrorKind};
use serde::Serialize;
use tracing::error;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable summary
    pub error: String,
    /// Extra detail, only for caller mistakes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An error ready to be returned from a handler.
///
/// Caller mistakes become 400 with a message describing the problem.
/// Everything else becomes 500 with a fixed message per route; the
/// underlying error is logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// 400 with a message.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    /// 500 with a generic message.
    pub fn internal(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    /// Attach detail text.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }

    /// Classify a service error, using `fallback` as the 500 message.
    pub fn from_depot(err: DepotError, fallback: &str) -> Self {
        match err.kind() {
            DepotErrorKind::Validation(e) => Self::bad_request(e.message.clone()),
            DepotErrorKind::Upload(e) => match &e.kind {
                UploadErrorKind::MissingFile => Self::bad_request("No file provided"),
                UploadErrorKind::UnsupportedType(_) => {
                    Self::bad_request("Failed to parse file content")
                        .with_details("Unsupported file type")
                }
                UploadErrorKind::Parse { message, .. } => {
                    Self::bad_request("Failed to parse file content").with_details(message.clone())
                }
                UploadErrorKind::Read(message) => {
                    Self::bad_request("Failed to read upload").with_details(message.clone())
                }
            },
            _ => {
                error!(error = %err, "{}", fallback);
                Self::internal(fallback)
            }
        }
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body.
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use depot_error::{DatabaseError, DatabaseErrorKind, UploadError, ValidationError};

    #[test]
    fn validation_is_a_bad_request() {
        let err = ApiError::from_depot(
            ValidationError::new("Name and address are required").into(),
            "Failed to create location",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().error, "Name and address are required");
    }

    #[test]
    fn downstream_failures_hide_detail() {
        let err = ApiError::from_depot(
            DatabaseError::new(DatabaseErrorKind::Connection("password rejected".into())).into(),
            "Failed to fetch locations",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            &ErrorBody {
                error: "Failed to fetch locations".into(),
                details: None
            }
        );
    }

    #[test]
    fn parse_failures_carry_details() {
        let err = ApiError::from_depot(
            UploadError::new(UploadErrorKind::Parse {
                format: "json".into(),
                message: "EOF while parsing".into(),
            })
            .into(),
            "Failed to process upload",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().details.as_deref(), Some("EOF while parsing"));
    }
}
