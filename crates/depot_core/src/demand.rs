//! Demand orders.

use crate::Company;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a demand order.
///
/// # Examples
///
/// ```
/// use depot_core::OrderStatus;
/// use std::str::FromStr;
///
/// assert_eq!(OrderStatus::InProgress.to_string(), "in_progress");
/// assert_eq!(OrderStatus::from_str("pending").unwrap(), OrderStatus::Pending);
/// ```
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
pub enum OrderStatus {
    /// Waiting for an allocation
    Pending,
    /// Allocated and being produced
    InProgress,
    /// Delivered
    Completed,
    /// Withdrawn by the customer
    Cancelled,
}

/// A customer request for a quantity of product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandOrder {
    /// Primary key
    pub id: Uuid,
    /// Ordering company
    pub company_id: Option<Uuid>,
    /// Product being ordered
    pub product_name: String,
    /// Quantity requested
    pub quantity_requested: i32,
    /// Ordinal urgency, higher is more urgent
    pub urgency_level: i32,
    /// Requested delivery date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Lifecycle state
    pub status: OrderStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Joined company row, when the query asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}
