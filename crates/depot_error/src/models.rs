//! Language model client errors.

/// Language model client error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Request could not be sent or the connection dropped
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Provider answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Error body returned by the provider
        message: String,
    },

    /// Response body could not be parsed
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),

    /// Streaming response broke off or carried a malformed event
    #[display("Stream error: {}", _0)]
    Stream(String),

    /// Client is misconfigured (missing key, bad URL)
    #[display("Invalid configuration: {}", _0)]
    Configuration(String),

    /// Provider returned no usable output text
    #[display("Model returned no output")]
    EmptyResponse,
}

/// Language model client error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_error::{ModelsError, ModelsErrorKind};
    ///
    /// let err = ModelsError::new(ModelsErrorKind::Api {
    ///     status: 429,
    ///     message: "rate limited".to_string(),
    /// });
    /// assert!(format!("{}", err).contains("429"));
    /// ```
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
