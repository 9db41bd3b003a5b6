//! File upload errors.

/// Upload error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UploadErrorKind {
    /// Multipart body had no `file` part
    #[display("No file uploaded")]
    MissingFile,

    /// File extension is neither `.csv` nor `.json`
    #[display("Unsupported file type: {}", _0)]
    UnsupportedType(String),

    /// File content could not be parsed
    #[display("Failed to parse {}: {}", format, message)]
    Parse {
        /// Format being parsed (`csv` or `json`)
        format: String,
        /// Parser error message
        message: String,
    },

    /// Multipart body could not be read
    #[display("Failed to read upload: {}", _0)]
    Read(String),
}

/// Upload error with location tracking.
///
/// # Examples
///
/// ```
/// use depot_error::{UploadError, UploadErrorKind};
///
/// let err = UploadError::new(UploadErrorKind::UnsupportedType("data.xlsx".into()));
/// assert!(format!("{}", err.kind).contains("data.xlsx"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upload Error: {} at line {} in {}", kind, line, file)]
pub struct UploadError {
    /// The specific error kind
    pub kind: UploadErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl UploadError {
    /// Create a new upload error.
    #[track_caller]
    pub fn new(kind: UploadErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
