//! Client tests against an in-process chat-completions endpoint.

use axum::{
    Json, Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use depot_core::{GenerateRequest, Message};
use depot_error::{DepotErrorKind, ModelsErrorKind};
use depot_interface::{JsonMode, LanguageModel, ResponseSchema, Streaming};
use depot_models::{OpenAiClient, OpenAiConfig};
use futures::StreamExt;
use serde_json::{Value, json};

async fn completions(Json(body): Json<Value>) -> Response {
    if body["stream"] == json!(true) {
        let events = [
            json!({"choices": [{"delta": {"role": "assistant"}}]}),
            json!({"choices": [{"delta": {"content": "Ship "}}]}),
            json!({"choices": [{"delta": {"content": "line A "}}]}),
            json!({"choices": [{"delta": {"content": "first."}}]}),
            json!({"choices": [{"delta": {}, "finish_reason": "stop"}]}),
        ];
        let mut sse: String = events
            .iter()
            .map(|e| format!("data: {}\n\n", e))
            .collect();
        sse.push_str("data: [DONE]\n\n");
        return ([(header::CONTENT_TYPE, "text/event-stream")], sse).into_response();
    }

    let content = if body.get("response_format").is_some() {
        if body["messages"][0]["content"] == "broken" {
            "not json at all".to_string()
        } else {
            json!({"confidence": 88}).to_string()
        }
    } else {
        "plain answer".to_string()
    };

    Json(json!({
        "id": "cmpl-1",
        "model": body["model"],
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    }))
    .into_response()
}

async fn rate_limited() -> Response {
    (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response()
}

async fn spawn(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}/v1", addr))
}

async fn client() -> anyhow::Result<OpenAiClient> {
    let base_url = spawn(Router::new().route("/v1/chat/completions", post(completions))).await?;
    Ok(OpenAiClient::new(
        OpenAiConfig::new(base_url, "test-model").with_api_key("sk-test"),
    ))
}

fn request(text: &str) -> GenerateRequest {
    GenerateRequest {
        messages: vec![Message::user(text)],
        ..Default::default()
    }
}

#[tokio::test]
async fn generates_plain_text() -> anyhow::Result<()> {
    let client = client().await?;
    let response = client.generate(&request("hello")).await?;
    assert_eq!(response.text, "plain answer");
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(15));
    assert_eq!(client.model_name(), "test-model");
    Ok(())
}

#[tokio::test]
async fn generates_json_with_schema() -> anyhow::Result<()> {
    let client = client().await?;
    let schema = ResponseSchema::new("supply_decision", json!({"type": "object"}));
    let value = client.generate_json(&request("decide"), &schema).await?;
    assert_eq!(value["confidence"], 88);
    Ok(())
}

#[tokio::test]
async fn non_json_output_is_a_decision_error() -> anyhow::Result<()> {
    let client = client().await?;
    let schema = ResponseSchema::new("supply_decision", json!({"type": "object"}));
    let err = client
        .generate_json(&request("broken"), &schema)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), DepotErrorKind::Decision(_)));
    Ok(())
}

#[tokio::test]
async fn streams_chunks_in_order() -> anyhow::Result<()> {
    let client = client().await?;
    let mut stream = client.generate_stream(&request("stream please")).await?;

    let mut deltas = Vec::new();
    let mut saw_final = false;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if chunk.is_final {
            saw_final = true;
        } else {
            deltas.push(chunk.content);
        }
    }

    assert_eq!(deltas, vec!["Ship ", "line A ", "first."]);
    assert_eq!(deltas.concat(), "Ship line A first.");
    assert!(saw_final);
    Ok(())
}

#[tokio::test]
async fn provider_errors_carry_status() -> anyhow::Result<()> {
    let base_url = spawn(Router::new().route("/v1/chat/completions", post(rate_limited))).await?;
    let client = OpenAiClient::new(OpenAiConfig::new(base_url, "m").with_api_key("k"));

    let err = client.generate(&request("hi")).await.unwrap_err();
    match err.kind() {
        DepotErrorKind::Models(e) => {
            assert_eq!(
                e.kind,
                ModelsErrorKind::Api {
                    status: 429,
                    message: "slow down".into()
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn missing_api_key_fails_before_sending() {
    let client = OpenAiClient::new(OpenAiConfig::new("http://127.0.0.1:9/v1", "m"));
    let err = client.generate(&request("hi")).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        DepotErrorKind::Models(e) if matches!(e.kind, ModelsErrorKind::Configuration(_))
    ));
}
