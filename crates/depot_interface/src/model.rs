//! Language model capability traits.

use crate::{ChunkStream, ResponseSchema};
use async_trait::async_trait;
use depot_core::{GenerateRequest, GenerateResponse};
use depot_error::DepotResult;

/// Core trait that every language model backend implements.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate free text for a request.
    async fn generate(&self, req: &GenerateRequest) -> DepotResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// Models that can constrain output to a JSON schema.
#[async_trait]
pub trait JsonMode: LanguageModel {
    /// Generate a JSON document conforming to `schema`.
    ///
    /// Implementations only guarantee the result is JSON; callers validate
    /// the shape themselves.
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &ResponseSchema,
    ) -> DepotResult<serde_json::Value>;
}

/// Models that can stream their output.
#[async_trait]
pub trait Streaming: LanguageModel {
    /// Generate a streaming response.
    ///
    /// Chunks are yielded in the order the provider emits them.
    async fn generate_stream(&self, req: &GenerateRequest) -> DepotResult<ChunkStream>;
}
