//! Metrics for language model calls.
//!
//! Instruments come from the OpenTelemetry global meter, so they are no-ops
//! until a meter provider is installed.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for language model interactions.
///
/// Labeled with provider, model and the kind of call (`text`, `json`, `stream`).
#[derive(Clone)]
pub struct LlmMetrics {
    _meter: Meter,
    /// Total calls
    pub requests: Counter<u64>,
    /// Failed calls
    pub errors: Counter<u64>,
    /// Call duration in seconds
    pub duration: Histogram<f64>,
    /// Prompt tokens used
    pub prompt_tokens: Counter<u64>,
    /// Completion tokens used
    pub completion_tokens: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("depot_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total language model calls")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed language model calls")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("s")
                .with_description("Language model call duration")
                .build(),
            prompt_tokens: meter
                .u64_counter("llm.tokens.prompt")
                .with_description("Prompt tokens used")
                .build(),
            completion_tokens: meter
                .u64_counter("llm.tokens.completion")
                .with_description("Completion tokens used")
                .build(),
        }
    }

    /// Get the global instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful call.
    pub fn record_request(&self, provider: &str, model: &str, kind: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("kind", kind.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed call.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage.
    pub fn record_tokens(&self, model: &str, prompt_tokens: u64, completion_tokens: u64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.prompt_tokens.add(prompt_tokens, labels);
        self.completion_tokens.add(completion_tokens, labels);
    }
}

/// Classify an error message for metrics labeling.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout", "invalid_request", "unknown"
///
/// # Examples
///
/// ```
/// use depot_models::classify_error;
///
/// assert_eq!(classify_error("API error (status 429): slow down"), "rate_limit");
/// assert_eq!(classify_error("operation timed out"), "timeout");
/// ```
pub fn classify_error(message: &str) -> &'static str {
    let message = message.to_lowercase();

    if message.contains("rate limit") || message.contains("429") {
        "rate_limit"
    } else if message.contains("auth") || message.contains("401") || message.contains("403") {
        "auth"
    } else if message.contains("timeout") || message.contains("timed out") {
        "timeout"
    } else if message.contains("connection") || message.contains("dns") {
        "network"
    } else if message.contains("400") || message.contains("invalid") {
        "invalid_request"
    } else {
        "unknown"
    }
}
