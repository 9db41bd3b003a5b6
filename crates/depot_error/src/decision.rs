//! Errors raised while turning model output into a decision.

/// Decision output error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DecisionErrorKind {
    /// Model output was not a JSON document
    #[display("Model output is not valid JSON: {}", _0)]
    InvalidJson(String),

    /// Model output was JSON but did not match the decision shape
    #[display("Model output violates decision schema: {}", _0)]
    SchemaViolation(String),

    /// Model produced nothing to parse
    #[display("Model produced no decision output")]
    MissingOutput,
}

/// Decision error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Decision Error: {} at line {} in {}", kind, line, file)]
pub struct DecisionError {
    /// The specific error kind
    pub kind: DecisionErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl DecisionError {
    /// Create a new decision error.
    #[track_caller]
    pub fn new(kind: DecisionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
