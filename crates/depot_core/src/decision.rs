//! Audit records of AI decisions and user guidance.

use chrono::{DateTime, Utc};
use depot_error::{BuilderError, BuilderErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What produced an audit record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionType {
    /// Basic schema-constrained allocation decision
    Allocation,
    /// Allocation decision informed by user guidance and uploads
    EnhancedAllocation,
    /// Priority change
    PriorityAdjustment,
    /// Production recommendation
    ProductionRecommendation,
    /// Free-text guidance submitted by a user
    UserGuidance,
}

/// One row of the append-only decision audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDecision {
    /// Primary key
    pub id: Uuid,
    /// What produced the record
    pub decision_type: DecisionType,
    /// Snapshot of the inputs
    pub input_data: serde_json::Value,
    /// Snapshot of the output, absent for guidance records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_data: Option<serde_json::Value>,
    /// Confidence in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    /// Free-text reasoning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// An audit record about to be appended.
///
/// The identifier is assigned here so callers can report it even when the
/// write fails.
///
/// # Examples
///
/// ```
/// use depot_core::{DecisionType, NewAiDecision};
/// use serde_json::json;
///
/// let record = NewAiDecision::builder()
///     .decision_type(DecisionType::UserGuidance)
///     .input_data(json!({"guidance": "ship to Acme first"}))
///     .confidence_score(1.0)
///     .build()
///     .unwrap();
///
/// assert!(record.output_data.is_none());
/// assert_eq!(record.confidence_score, Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct NewAiDecision {
    /// Primary key, generated when not supplied
    #[builder(default = "Uuid::new_v4()")]
    pub id: Uuid,
    /// What produced the record
    pub decision_type: DecisionType,
    /// Snapshot of the inputs
    pub input_data: serde_json::Value,
    /// Snapshot of the output
    #[builder(default, setter(into, strip_option))]
    pub output_data: Option<serde_json::Value>,
    /// Confidence in [0, 1]
    #[builder(default, setter(into, strip_option))]
    pub confidence_score: Option<f64>,
    /// Free-text reasoning
    #[builder(default, setter(into, strip_option))]
    pub reasoning: Option<String>,
}

impl NewAiDecision {
    /// Creates a new record builder.
    pub fn builder() -> NewAiDecisionBuilder {
        NewAiDecisionBuilder::default()
    }
}

impl From<NewAiDecisionBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: NewAiDecisionBuilderError) -> Self {
        BuilderError::new(BuilderErrorKind::ValidationFailed(err.to_string()))
    }
}
