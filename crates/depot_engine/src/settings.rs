//! Tunables for the decision engine.

use serde::{Deserialize, Serialize};

/// Sampling parameters for one kind of model call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskProfile {
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling; the provider default applies when absent
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl TaskProfile {
    /// Profile with a temperature and an optional token ceiling.
    pub const fn new(temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Where external-factor readings come from.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SignalMode {
    /// Fresh random readings per decision
    #[default]
    Random,
    /// The same calm readings every time
    Fixed,
}

/// Decision engine configuration.
///
/// Deserializes from the `[engine]` configuration section; every field
/// has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Basic decision
    pub decision: TaskProfile,
    /// Guidance-aware decision
    pub enhanced_decision: TaskProfile,
    /// Free-text insights
    pub insights: TaskProfile,
    /// Production optimisation
    pub optimize: TaskProfile,
    /// Guidance extraction
    pub guidance: TaskProfile,
    /// Streaming chat
    pub chat: TaskProfile,
    /// Processed guidance records read for an enhanced decision
    pub guidance_history: i64,
    /// Uploads read for an enhanced decision
    pub upload_history: i64,
    /// Production metrics in a decision context
    pub decision_metrics: i64,
    /// Production metrics in the insights dataset
    pub insights_metrics: i64,
    /// Cached feed entries in the insights dataset
    pub insights_cache: i64,
    /// External signal source
    pub signals: SignalMode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            decision: TaskProfile::new(0.3, None),
            enhanced_decision: TaskProfile::new(0.2, None),
            insights: TaskProfile::new(0.4, Some(1000)),
            optimize: TaskProfile::new(0.2, Some(800)),
            guidance: TaskProfile::new(0.3, Some(800)),
            chat: TaskProfile::new(0.7, Some(1024)),
            guidance_history: 5,
            upload_history: 10,
            decision_metrics: 10,
            insights_metrics: 20,
            insights_cache: 10,
            signals: SignalMode::Random,
        }
    }
}
