//! Supporting types for the language model traits.

use depot_error::DepotResult;
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Incremental text from a streaming generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Text delta, possibly empty on the final chunk
    pub content: String,
    /// Whether this is the final chunk
    pub is_final: bool,
    /// Why generation stopped, on the final chunk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl StreamChunk {
    /// A non-final text delta.
    pub fn delta(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_final: false,
            finish_reason: None,
        }
    }

    /// The closing chunk.
    pub fn finished(reason: FinishReason) -> Self {
        Self {
            content: String::new(),
            is_final: true,
            finish_reason: Some(reason),
        }
    }
}

/// Why generation stopped.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    /// Model completed naturally
    Stop,
    /// Hit the token limit
    Length,
    /// Content was filtered
    ContentFilter,
    /// Anything else the provider reports
    #[strum(default)]
    Other(String),
}

/// A named JSON schema the model output must conform to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema name reported to the provider
    pub name: String,
    /// JSON Schema document
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    /// Pair a schema document with its name.
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Boxed stream of generation chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = DepotResult<StreamChunk>> + Send>>;
