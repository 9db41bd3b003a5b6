//! Conversions between domain types and database rows.

use crate::models::{
    AiDecisionRow, CompanyLocationRow, CompanyRow, DemandOrderRow, ExternalDataCacheRow,
    ExternalDataRow, NewAiDecisionRow, NewCompanyLocationRow, NewExternalDataRow,
    ProductionMetricRow, SettingsRow, SupplyAllocationRow,
};
use crate::DatabaseResult;
use chrono::Utc;
use depot_core::{
    AiDecision, Company, CompanyLocation, DemandOrder, ExternalData, ExternalDataCache,
    NewAiDecision, NewExternalData, NewLocation, ProductionMetric, Settings, SupplyAllocation,
};
use depot_error::{DatabaseError, DatabaseErrorKind};
use std::str::FromStr;

/// Id of the single settings row.
pub const SETTINGS_ID: i32 = 1;

/// Parse a text column into one of the strum-backed enums.
#[track_caller]
fn parse_enum<T: FromStr>(column: &str, value: &str) -> DatabaseResult<T> {
    value.parse().map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Serialization(format!(
            "Invalid {} value: {}",
            column, value
        )))
    })
}

pub fn row_to_company(row: CompanyRow) -> Company {
    Company {
        id: row.id,
        name: row.name,
        contact_email: row.contact_email,
        priority_level: row.priority_level,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn row_to_demand_order(
    row: DemandOrderRow,
    company: Option<CompanyRow>,
) -> DatabaseResult<DemandOrder> {
    Ok(DemandOrder {
        id: row.id,
        company_id: row.company_id,
        product_name: row.product_name,
        quantity_requested: row.quantity_requested,
        urgency_level: row.urgency_level,
        due_date: row.due_date,
        status: parse_enum("demand_orders.status", &row.status)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
        company: company.map(row_to_company),
    })
}

pub fn row_to_production_metric(row: ProductionMetricRow) -> DatabaseResult<ProductionMetric> {
    Ok(ProductionMetric {
        id: row.id,
        production_line: row.production_line,
        current_rate: row.current_rate,
        target_rate: row.target_rate,
        efficiency_percentage: row.efficiency_percentage,
        status: parse_enum("production_metrics.status", &row.status)?,
        recorded_at: row.recorded_at,
    })
}

pub fn row_to_allocation(
    row: SupplyAllocationRow,
    order: Option<DemandOrderRow>,
) -> DatabaseResult<SupplyAllocation> {
    let demand_order = order
        .map(|o| row_to_demand_order(o, None))
        .transpose()?;

    Ok(SupplyAllocation {
        id: row.id,
        demand_order_id: row.demand_order_id,
        allocated_quantity: row.allocated_quantity,
        production_line: row.production_line,
        priority_score: row.priority_score,
        allocation_reason: row.allocation_reason,
        weather_factor: row.weather_factor,
        market_factor: row.market_factor,
        news_sentiment_factor: row.news_sentiment_factor,
        created_at: row.created_at,
        demand_order,
    })
}

pub fn decision_to_new_row(record: NewAiDecision) -> NewAiDecisionRow {
    NewAiDecisionRow {
        id: record.id,
        decision_type: record.decision_type.to_string(),
        input_data: record.input_data,
        output_data: record.output_data,
        confidence_score: record.confidence_score,
        reasoning: record.reasoning,
    }
}

pub fn row_to_decision(row: AiDecisionRow) -> DatabaseResult<AiDecision> {
    Ok(AiDecision {
        id: row.id,
        decision_type: parse_enum("ai_decisions.decision_type", &row.decision_type)?,
        input_data: row.input_data,
        output_data: row.output_data,
        confidence_score: row.confidence_score,
        reasoning: row.reasoning,
        created_at: row.created_at,
    })
}

pub fn row_to_cache_entry(row: ExternalDataCacheRow) -> DatabaseResult<ExternalDataCache> {
    Ok(ExternalDataCache {
        id: row.id,
        data_type: parse_enum("external_data_cache.data_type", &row.data_type)?,
        data_content: row.data_content,
        relevance_score: row.relevance_score,
        expires_at: row.expires_at,
        created_at: row.created_at,
    })
}

pub fn external_to_new_row(record: NewExternalData) -> NewExternalDataRow {
    NewExternalDataRow {
        id: record.id,
        source: record.source.to_string(),
        data_type: record.data_type,
        raw_data: record.raw_data,
        metadata: record.metadata,
    }
}

pub fn row_to_external(row: ExternalDataRow) -> DatabaseResult<ExternalData> {
    Ok(ExternalData {
        id: row.id,
        source: parse_enum("external_data.source", &row.source)?,
        data_type: row.data_type,
        raw_data: row.raw_data,
        metadata: row.metadata,
        created_at: row.created_at,
    })
}

pub fn location_to_new_row(location: NewLocation) -> NewCompanyLocationRow {
    NewCompanyLocationRow {
        name: location.name,
        address: location.address,
        latitude: location.latitude,
        longitude: location.longitude,
        location_type: location.location_type,
    }
}

pub fn row_to_location(row: CompanyLocationRow) -> CompanyLocation {
    CompanyLocation {
        id: row.id,
        name: row.name,
        address: row.address,
        latitude: row.latitude,
        longitude: row.longitude,
        location_type: row.location_type,
        created_at: row.created_at,
    }
}

pub fn settings_to_row(settings: &Settings) -> DatabaseResult<SettingsRow> {
    Ok(SettingsRow {
        id: SETTINGS_ID,
        preferences: serde_json::to_value(&settings.preferences)?,
        ai_settings_doc: serde_json::to_value(&settings.ai_settings)?,
        updated_at: Utc::now(),
    })
}

pub fn row_to_settings(row: SettingsRow) -> DatabaseResult<Settings> {
    Ok(Settings {
        preferences: serde_json::from_value(row.preferences)?,
        ai_settings: serde_json::from_value(row.ai_settings_doc)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{DecisionType, OrderStatus, RiskLevel};

    #[test]
    fn rejects_unknown_status_text() {
        let now = Utc::now();
        let row = DemandOrderRow {
            id: uuid::Uuid::new_v4(),
            company_id: None,
            product_name: "grain".into(),
            quantity_requested: 10,
            urgency_level: 2,
            due_date: None,
            status: "shipped".into(),
            created_at: now,
            updated_at: now,
        };
        let err = row_to_demand_order(row, None).unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::Serialization(_)));
    }

    #[test]
    fn parses_known_status_text() {
        let now = Utc::now();
        let row = DemandOrderRow {
            id: uuid::Uuid::new_v4(),
            company_id: None,
            product_name: "grain".into(),
            quantity_requested: 10,
            urgency_level: 2,
            due_date: None,
            status: "in_progress".into(),
            created_at: now,
            updated_at: now,
        };
        let order = row_to_demand_order(row, None).unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
    }

    #[test]
    fn decision_type_is_stored_as_snake_case() {
        let record = NewAiDecision::builder()
            .decision_type(DecisionType::EnhancedAllocation)
            .input_data(serde_json::json!({}))
            .build()
            .unwrap();
        let row = decision_to_new_row(record);
        assert_eq!(row.decision_type, "enhanced_allocation");
    }

    #[test]
    fn settings_survive_the_row_round_trip() {
        let mut settings = Settings::default();
        settings.ai_settings.risk_tolerance = RiskLevel::High;
        settings.ai_settings.decision_frequency = 2;

        let row = settings_to_row(&settings).unwrap();
        assert_eq!(row.id, SETTINGS_ID);
        assert_eq!(row_to_settings(row).unwrap(), settings);
    }
}
