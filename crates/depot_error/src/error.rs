//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, DatabaseError, DecisionError, JsonError, ModelsError,
    UploadError, ValidationError,
};

/// Every error condition the workspace can raise.
///
/// # Examples
///
/// ```
/// use depot_error::{DepotError, JsonError};
///
/// let json_err = JsonError::new("expected value at line 1");
/// let err: DepotError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DepotErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Persistence error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Language model client error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Model output could not be turned into a decision
    #[from(DecisionError)]
    Decision(DecisionError),
    /// Uploaded file was missing or unreadable
    #[from(UploadError)]
    Upload(UploadError),
    /// Request input was rejected
    #[from(ValidationError)]
    Validation(ValidationError),
}

/// Depot error with kind discrimination.
///
/// # Examples
///
/// ```
/// use depot_error::{DepotResult, ConfigError};
///
/// fn might_fail() -> DepotResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Depot Error: {}", _0)]
pub struct DepotError(Box<DepotErrorKind>);

impl DepotError {
    /// Create a new error from a kind.
    pub fn new(kind: DepotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DepotErrorKind {
        &self.0
    }

    /// True when the error was caused by caller input rather than a fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            DepotErrorKind::Validation(_) | DepotErrorKind::Upload(_)
        )
    }
}

// Generic From implementation for any type that converts to DepotErrorKind
impl<T> From<T> for DepotError
where
    T: Into<DepotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for depot operations.
pub type DepotResult<T> = std::result::Result<T, DepotError>;
