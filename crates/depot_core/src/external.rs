//! Opaque context blobs: cached external feeds, uploads and processed guidance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of cached external feed.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CacheDataType {
    /// Weather feed
    Weather,
    /// News feed
    News,
    /// Trading feed
    Trading,
    /// Market feed
    Market,
}

/// A cached reading from an external feed, used only as prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDataCache {
    /// Primary key
    pub id: Uuid,
    /// Feed kind
    pub data_type: CacheDataType,
    /// Opaque feed payload
    pub data_content: serde_json::Value,
    /// Relevance in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    /// When the entry goes stale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Where a user-supplied context record came from.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataSource {
    /// Parsed file upload
    UserUpload,
    /// Guidance text after model extraction
    UserGuidanceProcessed,
}

/// A stored user upload or processed guidance context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalData {
    /// Primary key
    pub id: Uuid,
    /// Origin of the record
    pub source: DataSource,
    /// Content kind (`csv`, `json`, `guidance_context`)
    pub data_type: String,
    /// Parsed content
    pub raw_data: serde_json::Value,
    /// Descriptive metadata (filename, record count)
    pub metadata: serde_json::Value,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A context record about to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExternalData {
    /// Primary key
    pub id: Uuid,
    /// Origin of the record
    pub source: DataSource,
    /// Content kind
    pub data_type: String,
    /// Parsed content
    pub raw_data: serde_json::Value,
    /// Descriptive metadata
    pub metadata: serde_json::Value,
}

impl NewExternalData {
    /// Create a record with a freshly generated identifier.
    pub fn new(
        source: DataSource,
        data_type: impl Into<String>,
        raw_data: serde_json::Value,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            data_type: data_type.into(),
            raw_data,
            metadata,
        }
    }
}
