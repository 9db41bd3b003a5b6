//! Inputs gathered from the store before prompting.

use crate::{DemandOrder, ExternalDataCache, ProductionMetric, SupplyAllocation};
use serde::{Deserialize, Serialize};

/// Current operational state handed to a decision request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    /// Open demand orders
    pub demand_orders: Vec<DemandOrder>,
    /// Recent production snapshots
    pub production_metrics: Vec<ProductionMetric>,
    /// Existing allocations
    pub current_allocations: Vec<SupplyAllocation>,
}

impl DecisionContext {
    /// Whether `id` names a demand order in this context.
    pub fn has_demand_order(&self, id: &str) -> bool {
        self.demand_orders.iter().any(|o| o.id.to_string() == id)
            || self
                .current_allocations
                .iter()
                .filter_map(|a| a.demand_order_id)
                .any(|d| d.to_string() == id)
    }

    /// Whether `line` names a production line in this context.
    pub fn has_production_line(&self, line: &str) -> bool {
        self.production_metrics
            .iter()
            .any(|m| m.production_line == line)
            || self
                .current_allocations
                .iter()
                .any(|a| a.production_line == line)
    }
}

/// Everything fed into the free-text insights prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsData {
    /// All demand orders
    pub demand_orders: Vec<DemandOrder>,
    /// Recent production snapshots
    pub production_metrics: Vec<ProductionMetric>,
    /// Existing allocations
    pub allocations: Vec<SupplyAllocation>,
    /// Recent cached external feed entries
    pub external_data: Vec<ExternalDataCache>,
}
