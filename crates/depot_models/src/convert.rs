//! Conversion between depot and chat-completions API types

use crate::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    JsonSchemaSpec, ResponseFormat,
};
use depot_core::{GenerateRequest, GenerateResponse, TokenUsage};
use depot_error::{ModelsError, ModelsErrorKind};
use depot_interface::{FinishReason, ResponseSchema, StreamChunk};

/// Convert a depot request into a chat completion request.
pub fn to_chat_request(request: &GenerateRequest, default_model: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: request
            .model
            .clone()
            .unwrap_or_else(|| default_model.to_string()),
        messages: request
            .messages
            .iter()
            .map(|m| ChatMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect(),
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        stream: None,
        response_format: None,
    }
}

/// Attach a JSON-schema output constraint.
pub fn with_schema(
    mut request: ChatCompletionRequest,
    schema: &ResponseSchema,
) -> ChatCompletionRequest {
    request.response_format = Some(ResponseFormat::JsonSchema {
        json_schema: JsonSchemaSpec {
            name: schema.name.clone(),
            strict: false,
            schema: schema.schema.clone(),
        },
    });
    request
}

/// Extract the first choice's text.
#[track_caller]
pub fn from_chat_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, ModelsError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))?;

    let text = choice
        .message
        .content
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))?;

    Ok(GenerateResponse {
        text,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

/// Map a provider finish reason.
pub fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        other => FinishReason::Other(other.to_string()),
    }
}

/// Convert a streaming chunk; chunks with neither text nor a finish reason are dropped.
pub fn chunk_to_stream_chunk(chunk: ChatCompletionChunk) -> Option<StreamChunk> {
    let choice = chunk.choices.into_iter().next()?;
    let content = choice.delta.content.unwrap_or_default();

    match choice.finish_reason {
        Some(reason) => Some(StreamChunk {
            content,
            is_final: true,
            finish_reason: Some(parse_finish_reason(&reason)),
        }),
        None if content.is_empty() => None,
        None => Some(StreamChunk::delta(content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::Message;
    use serde_json::json;

    #[test]
    fn request_uses_default_model_and_roles() {
        let request = GenerateRequest::builder()
            .messages(vec![Message::system("be brief"), Message::user("hi")])
            .temperature(0.3f32)
            .build()
            .unwrap();

        let chat = to_chat_request(&request, "gpt-4o");
        assert_eq!(chat.model, "gpt-4o");
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.temperature, Some(0.3));

        let body = serde_json::to_value(&chat).unwrap();
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn schema_is_sent_as_json_schema_format() {
        let chat = with_schema(
            to_chat_request(&GenerateRequest::default(), "m"),
            &ResponseSchema::new("supply_decision", json!({"type": "object"})),
        );
        let body = serde_json::to_value(&chat).unwrap();
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "supply_decision");
        assert_eq!(body["response_format"]["json_schema"]["strict"], false);
    }

    #[test]
    fn missing_choices_is_empty_response() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();
        let err = from_chat_response(response).unwrap_err();
        assert_eq!(err.kind, ModelsErrorKind::EmptyResponse);
    }

    #[test]
    fn final_chunk_carries_finish_reason() {
        let chunk: ChatCompletionChunk = serde_json::from_value(json!({
            "choices": [{"delta": {}, "finish_reason": "stop"}]
        }))
        .unwrap();
        let converted = chunk_to_stream_chunk(chunk).unwrap();
        assert!(converted.is_final);
        assert_eq!(converted.finish_reason, Some(FinishReason::Stop));
    }

    #[test]
    fn role_only_chunk_is_dropped() {
        let chunk: ChatCompletionChunk = serde_json::from_value(json!({
            "choices": [{"delta": {"role": "assistant"}}]
        }))
        .unwrap();
        assert!(chunk_to_stream_chunk(chunk).is_none());
    }
}
