//! Diesel row models.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Database row for the companies table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub priority_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for the demand_orders table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::demand_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DemandOrderRow {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub product_name: String,
    pub quantity_requested: i32,
    pub urgency_level: i32,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for the production_metrics table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::production_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductionMetricRow {
    pub id: Uuid,
    pub production_line: String,
    pub current_rate: f64,
    pub target_rate: f64,
    pub efficiency_percentage: Option<f64>,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

/// Database row for the supply_allocations table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::supply_allocations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupplyAllocationRow {
    pub id: Uuid,
    pub demand_order_id: Option<Uuid>,
    pub allocated_quantity: i32,
    pub production_line: String,
    pub priority_score: Option<i32>,
    pub allocation_reason: Option<String>,
    pub weather_factor: f64,
    pub market_factor: f64,
    pub news_sentiment_factor: f64,
    pub created_at: DateTime<Utc>,
}

/// Database row for the ai_decisions table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::ai_decisions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AiDecisionRow {
    pub id: Uuid,
    pub decision_type: String,
    pub input_data: serde_json::Value,
    pub output_data: Option<serde_json::Value>,
    pub confidence_score: Option<f64>,
    pub reasoning: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for the ai_decisions table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::ai_decisions)]
pub struct NewAiDecisionRow {
    pub id: Uuid,
    pub decision_type: String,
    pub input_data: serde_json::Value,
    pub output_data: Option<serde_json::Value>,
    pub confidence_score: Option<f64>,
    pub reasoning: Option<String>,
}

/// Database row for the external_data_cache table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::external_data_cache)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExternalDataCacheRow {
    pub id: Uuid,
    pub data_type: String,
    pub data_content: serde_json::Value,
    pub relevance_score: Option<f64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Database row for the external_data table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::external_data)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExternalDataRow {
    pub id: Uuid,
    pub source: String,
    pub data_type: String,
    pub raw_data: serde_json::Value,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for the external_data table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::external_data)]
pub struct NewExternalDataRow {
    pub id: Uuid,
    pub source: String,
    pub data_type: String,
    pub raw_data: serde_json::Value,
    pub metadata: serde_json::Value,
}

/// Database row for the company_locations table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::company_locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompanyLocationRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for the company_locations table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::company_locations)]
pub struct NewCompanyLocationRow {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: String,
}

/// Database row for the ai_settings table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::ai_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SettingsRow {
    pub id: i32,
    pub preferences: serde_json::Value,
    pub ai_settings_doc: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
