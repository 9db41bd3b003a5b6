//! Client input validation errors.

/// A request was missing a required field or carried an unusable value.
///
/// These are the only errors whose message is safe to show to the caller
/// verbatim.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// Human-readable message returned to the caller
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_error::ValidationError;
    ///
    /// let err = ValidationError::new("Name and address are required");
    /// assert_eq!(err.message, "Name and address are required");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
