//! Production line metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operating state of a production line.
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
pub enum LineStatus {
    /// Producing
    Active,
    /// Down for planned maintenance
    Maintenance,
    /// Not producing
    Offline,
}

/// A snapshot of a production line's throughput and efficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionMetric {
    /// Primary key
    pub id: Uuid,
    /// Production line identifier
    pub production_line: String,
    /// Current output rate
    pub current_rate: f64,
    /// Target output rate
    pub target_rate: f64,
    /// Efficiency in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_percentage: Option<f64>,
    /// Operating state
    pub status: LineStatus,
    /// When the snapshot was taken
    pub recorded_at: DateTime<Utc>,
}
