use crate::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, LlmMetrics, OpenAiConfig,
    SseDecoder, SseEvent, classify_error, convert,
};
use async_trait::async_trait;
use depot_core::{GenerateRequest, GenerateResponse};
use depot_error::{
    DecisionError, DecisionErrorKind, DepotError, DepotResult, ModelsError, ModelsErrorKind,
};
use depot_interface::{ChunkStream, JsonMode, LanguageModel, ResponseSchema, Streaming};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::time::Instant;
use tracing::{debug, error, instrument};

const PROVIDER: &str = "openai";

type ChatCompletionStream =
    Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, ModelsError>> + Send>>;

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client.
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: OpenAiConfig) -> Self {
        debug!("Creating language model client");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn post(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<reqwest::RequestBuilder, ModelsError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ModelsError::new(ModelsErrorKind::Configuration("API key not configured".into()))
        })?;

        Ok(self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(request))
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ModelsError> {
        let response = builder.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            ModelsError::new(ModelsErrorKind::Http(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Provider returned error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }
        Ok(response)
    }

    /// Send a chat completion request.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelsError> {
        let builder = self.post(request)?.timeout(self.config.timeout);
        let response = self.send(builder).await?;

        let result = response.json().await.map_err(|e| {
            error!("Failed to parse response: {}", e);
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;

        debug!("Chat completion successful");
        Ok(result)
    }

    /// Send a streaming chat completion request.
    ///
    /// No overall timeout is applied; the stream lasts as long as the provider
    /// keeps sending.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChatCompletionStream, ModelsError> {
        request.stream = Some(true);
        let response = self.send(self.post(&request)?).await?;

        debug!("Streaming request accepted, parsing SSE stream");
        Ok(Box::pin(parse_sse_stream(response.bytes_stream())))
    }

    fn observe<T>(
        &self,
        model: &str,
        kind: &str,
        started: Instant,
        result: &Result<T, ModelsError>,
    ) {
        let metrics = LlmMetrics::get();
        match result {
            Ok(_) => metrics.record_request(PROVIDER, model, kind, started.elapsed().as_secs_f64()),
            Err(e) => metrics.record_error(PROVIDER, model, classify_error(&e.to_string())),
        }
    }

    async fn complete(
        &self,
        request: ChatCompletionRequest,
        kind: &str,
    ) -> Result<GenerateResponse, ModelsError> {
        let model = request.model.clone();
        let started = Instant::now();
        let result = self
            .chat_completion(&request)
            .await
            .and_then(convert::from_chat_response);
        self.observe(&model, kind, started, &result);

        if let Some(usage) = result.as_ref().ok().and_then(|r| r.usage) {
            LlmMetrics::get().record_tokens(&model, usage.prompt_tokens, usage.completion_tokens);
        }
        result
    }
}

/// Parse a Server-Sent Events byte stream into chat completion chunks.
///
/// Every complete event in a network read is yielded; the stream ends at
/// `[DONE]` or when the connection closes.
pub(crate) fn parse_sse_stream<S, B, E>(
    bytes: S,
) -> impl Stream<Item = Result<ChatCompletionChunk, ModelsError>>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: std::fmt::Display + Send,
{
    async_stream::stream! {
        let mut decoder = SseDecoder::default();
        let mut bytes = Box::pin(bytes);

        while let Some(read) = bytes.next().await {
            let read = match read {
                Ok(b) => b,
                Err(e) => {
                    yield Err(ModelsError::new(ModelsErrorKind::Stream(e.to_string())));
                    return;
                }
            };

            for event in decoder.push(read.as_ref()) {
                match event {
                    SseEvent::Done => return,
                    SseEvent::Data(data) => {
                        match serde_json::from_str::<ChatCompletionChunk>(&data) {
                            Ok(chunk) => yield Ok(chunk),
                            Err(e) => {
                                yield Err(ModelsError::new(ModelsErrorKind::Stream(format!(
                                    "Failed to parse chunk: {}",
                                    e
                                ))));
                                return;
                            }
                        }
                    }
                }
            }
        }

        if decoder.has_pending() {
            debug!("Stream closed with an unterminated event");
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> DepotResult<GenerateResponse> {
        let request = convert::to_chat_request(req, &self.config.model);
        Ok(self.complete(request, "text").await?)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl JsonMode for OpenAiClient {
    #[instrument(skip(self, req, schema), fields(schema = %schema.name))]
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &ResponseSchema,
    ) -> DepotResult<serde_json::Value> {
        let request =
            convert::with_schema(convert::to_chat_request(req, &self.config.model), schema);
        let response = self.complete(request, "json").await?;

        if response.text.trim().is_empty() {
            return Err(DecisionError::new(DecisionErrorKind::MissingOutput).into());
        }

        let value: serde_json::Value = serde_json::from_str(&response.text)
            .map_err(|e| DecisionError::new(DecisionErrorKind::InvalidJson(e.to_string())))?;
        Ok(value)
    }
}

#[async_trait]
impl Streaming for OpenAiClient {
    #[instrument(skip(self, req))]
    async fn generate_stream(&self, req: &GenerateRequest) -> DepotResult<ChunkStream> {
        let request = convert::to_chat_request(req, &self.config.model);
        let model = request.model.clone();
        let started = Instant::now();

        let result = self.chat_completion_stream(request).await;
        self.observe(&model, "stream", started, &result);
        let stream = result?;

        let converted = stream.filter_map(|chunk| async move {
            match chunk {
                Ok(chunk) => convert::chunk_to_stream_chunk(chunk).map(Ok),
                Err(e) => Some(Err(DepotError::from(e))),
            }
        });
        Ok(Box::pin(converted))
    }
}
