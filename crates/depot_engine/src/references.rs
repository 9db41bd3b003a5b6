//! Cross-checking decision identifiers against the input context.
//!
//! Model output is trusted verbatim; these checks only report what does
//! not match so callers can log it.

use crate::SupplyDecision;
use depot_core::DecisionContext;

/// Which identifier of an allocation failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum ReferenceField {
    /// `demandOrderId`
    DemandOrderId,
    /// `productionLine`
    ProductionLine,
}

/// An allocation identifier with no counterpart in the input context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReference {
    /// Position of the allocation in the decision
    pub allocation: usize,
    /// Which identifier
    pub field: ReferenceField,
    /// The identifier the model returned
    pub value: String,
}

/// Allocation identifiers that do not appear in `context`.
///
/// # Examples
///
/// ```
/// use depot_core::DecisionContext;
/// use depot_engine::{DecisionVariant, unknown_references, validate};
/// use serde_json::json;
///
/// let decision = validate(json!({
///     "allocations": [{
///         "demandOrderId": "ord-404",
///         "productionLine": "line-z",
///         "allocatedQuantity": 5,
///         "priorityScore": 50,
///         "reasoning": "made up"
///     }],
///     "productionAdjustments": [],
///     "riskFactors": [],
///     "confidence": 60,
///     "nextReviewTime": "tomorrow"
/// }), DecisionVariant::Basic).unwrap();
///
/// let unknown = unknown_references(&decision, &DecisionContext::default());
/// assert_eq!(unknown.len(), 2);
/// ```
pub fn unknown_references(
    decision: &SupplyDecision,
    context: &DecisionContext,
) -> Vec<UnknownReference> {
    let mut unknown = Vec::new();
    for (index, allocation) in decision.allocations.iter().enumerate() {
        if !context.has_demand_order(&allocation.demand_order_id) {
            unknown.push(UnknownReference {
                allocation: index,
                field: ReferenceField::DemandOrderId,
                value: allocation.demand_order_id.clone(),
            });
        }
        if !context.has_production_line(&allocation.production_line) {
            unknown.push(UnknownReference {
                allocation: index,
                field: ReferenceField::ProductionLine,
                value: allocation.production_line.clone(),
            });
        }
    }
    unknown
}
