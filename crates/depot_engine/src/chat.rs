//! Streaming chat relay.

use crate::TaskProfile;
use depot_core::{GenerateRequest, Message};
use depot_error::{BuilderError, DepotResult};
use depot_interface::Streaming;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Default system prompt for the chat assistant.
pub const DEFAULT_CHAT_PROMPT: &str = "You are a supply chain operations assistant. \
    Answer questions about demand, production capacity, allocations and external risks \
    concisely. When you lack data to answer, say so instead of guessing.";

/// Text deltas in arrival order.
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Forwards a prompt to a streaming model and relays its text.
#[derive(Clone)]
pub struct ChatRelay {
    model: Arc<dyn Streaming>,
    system_prompt: String,
    profile: Option<TaskProfile>,
}

impl ChatRelay {
    /// Relay through `model` with the given system prompt.
    pub fn new(model: Arc<dyn Streaming>, system_prompt: impl Into<String>) -> Self {
        Self {
            model,
            system_prompt: system_prompt.into(),
            profile: None,
        }
    }

    /// Sample with `profile` instead of the provider defaults.
    pub fn with_profile(mut self, profile: TaskProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Start streaming a reply to `prompt`.
    ///
    /// Failing to open the upstream stream is an error. A failure after
    /// text has started flowing is logged and ends the stream early.
    #[instrument(skip(self, prompt), fields(model = self.model.model_name(), prompt_len = prompt.len()))]
    pub async fn relay(&self, prompt: &str) -> DepotResult<TextStream> {
        let mut builder = GenerateRequest::builder();
        builder.messages(vec![
            Message::system(self.system_prompt.clone()),
            Message::user(prompt),
        ]);
        if let Some(profile) = self.profile {
            builder.temperature(profile.temperature);
            if let Some(max) = profile.max_tokens {
                builder.max_tokens(max);
            }
        }
        let request = builder.build().map_err(BuilderError::from)?;

        let mut upstream = self.model.generate_stream(&request).await?;

        Ok(Box::pin(async_stream::stream! {
            let mut relayed = 0usize;
            while let Some(item) = upstream.next().await {
                match item {
                    Ok(chunk) => {
                        if !chunk.content.is_empty() {
                            relayed += chunk.content.len();
                            yield chunk.content;
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Chat stream interrupted");
                        break;
                    }
                }
            }
            info!(bytes = relayed, "Chat stream finished");
        }))
    }
}
