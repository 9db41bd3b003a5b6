//! Request and response types for language model generation.

use crate::Message;
use depot_error::{BuilderError, BuilderErrorKind};
use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use depot_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Summarise the backlog")])
///     .max_tokens(800u32)
///     .temperature(0.2f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(800));
/// assert!(request.model.is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(setter(into, strip_option))]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(setter(into, strip_option))]
    pub temperature: Option<f32>,
    /// Model override; the client default is used when absent
    #[builder(setter(into, strip_option))]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

impl From<GenerateRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: GenerateRequestBuilderError) -> Self {
        BuilderError::new(BuilderErrorKind::ValidationFailed(err.to_string()))
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u64,
    /// Tokens generated
    pub completion_tokens: u64,
    /// Sum of both
    pub total_tokens: u64,
}

/// A completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
    /// Token accounting, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}
