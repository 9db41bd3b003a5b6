//! Supply allocations.

use crate::DemandOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An assignment of production output to a demand order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyAllocation {
    /// Primary key
    pub id: Uuid,
    /// Demand order being served
    pub demand_order_id: Option<Uuid>,
    /// Quantity assigned
    pub allocated_quantity: i32,
    /// Production line providing the output
    pub production_line: String,
    /// Priority score (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<i32>,
    /// Free-text reason for the allocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_reason: Option<String>,
    /// Weight given to weather
    pub weather_factor: f64,
    /// Weight given to market conditions
    pub market_factor: f64,
    /// Weight given to news sentiment
    pub news_sentiment_factor: f64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Joined demand order row, when the query asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand_order: Option<DemandOrder>,
}
