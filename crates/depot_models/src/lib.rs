//! OpenAI-compatible language model client for depot.
//!
//! [`OpenAiClient`] implements the `LanguageModel`, `JsonMode` and
//! `Streaming` traits against any endpoint that speaks the chat-completions
//! protocol. Requests are never retried; a failed call surfaces immediately.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod metrics;
mod request;
mod response;
mod sse;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
pub use metrics::{LlmMetrics, classify_error};
pub use request::{ChatCompletionRequest, ChatMessage, JsonSchemaSpec, ResponseFormat};
pub use response::{
    ChatCompletionChunk, ChatCompletionResponse, Choice, ChoiceMessage, ChunkChoice, Delta, Usage,
};
pub use sse::{SseDecoder, SseEvent};
