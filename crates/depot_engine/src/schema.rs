//! The decision output contract.
//!
//! [`decision_schema`] is the JSON Schema sent to the model; [`validate`]
//! is the local check every model response must pass before it is
//! returned or logged. There is no partial acceptance: one bad field
//! rejects the whole decision.

use depot_core::RiskLevel;
use depot_error::{DecisionError, DecisionErrorKind};
use depot_interface::ResponseSchema;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Value, json};

/// Schema name reported to the provider.
pub const DECISION_SCHEMA_NAME: &str = "supply_chain_decision";

/// Integer percentage in [0, 100].
///
/// Deserializes from any JSON number with no fractional part, so `87`
/// and `87.0` are accepted while `87.5` and `101` are not.
///
/// # Examples
///
/// ```
/// use depot_engine::Score;
///
/// let score: Score = serde_json::from_str("92.0").unwrap();
/// assert_eq!(score.value(), 92);
/// assert!(serde_json::from_str::<Score>("92.5").is_err());
/// assert!(serde_json::from_str::<Score>("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Upper bound.
    pub const MAX: u8 = 100;

    /// Build a score, rejecting values above [`Score::MAX`].
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// The score as an integer percentage.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The score scaled to [0, 1].
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        if raw.fract() != 0.0 || !(0.0..=f64::from(Self::MAX)).contains(&raw) {
            return Err(de::Error::custom(format!(
                "expected an integer between 0 and 100, got {raw}"
            )));
        }
        Ok(Self(raw as u8))
    }
}

/// One proposed assignment of production output to a demand order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAllocation {
    /// Demand order identifier
    pub demand_order_id: String,
    /// Production line identifier
    pub production_line: String,
    /// Quantity to allocate
    pub allocated_quantity: f64,
    /// Priority in [0, 100]
    pub priority_score: Score,
    /// Why the allocation was proposed
    pub reasoning: String,
    /// How user guidance shaped the allocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_guidance_influence: Option<String>,
}

/// A proposed production rate change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionAdjustment {
    /// Production line identifier
    pub production_line: String,
    /// Proposed output rate
    pub recommended_rate: f64,
    /// Why the change was proposed
    pub reasoning: String,
    /// Whether uploaded data drove the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_user_data: Option<bool>,
}

/// A risk the model identified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    /// Short description
    pub factor: String,
    /// Severity
    pub impact: RiskLevel,
    /// Suggested mitigation
    pub mitigation: String,
    /// Whether the user raised the risk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_identified: Option<bool>,
}

/// A validated supply-chain decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDecision {
    /// Proposed allocations
    pub allocations: Vec<ProposedAllocation>,
    /// Proposed production changes
    pub production_adjustments: Vec<ProductionAdjustment>,
    /// Identified risks
    pub risk_factors: Vec<RiskFactor>,
    /// Overall confidence in [0, 100]
    pub confidence: Score,
    /// When the decision should be revisited
    pub next_review_time: String,
    /// Guidance fragments the model reports having used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_guidance_applied: Option<Vec<String>>,
}

impl SupplyDecision {
    /// Drop the fields only the guidance-aware variant asks for.
    pub fn without_guidance_fields(mut self) -> Self {
        self.user_guidance_applied = None;
        for allocation in &mut self.allocations {
            allocation.user_guidance_influence = None;
        }
        for adjustment in &mut self.production_adjustments {
            adjustment.based_on_user_data = None;
        }
        for risk in &mut self.risk_factors {
            risk.user_identified = None;
        }
        self
    }
}

/// Which decision variant a schema or validation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionVariant {
    /// Context and external factors only
    Basic,
    /// Also informed by user guidance and uploads
    Enhanced,
}

/// JSON Schema for the decision the model must produce.
pub fn decision_schema(variant: DecisionVariant) -> ResponseSchema {
    let enhanced = variant == DecisionVariant::Enhanced;

    let mut allocation = json!({
        "type": "object",
        "properties": {
            "demandOrderId": { "type": "string" },
            "productionLine": { "type": "string" },
            "allocatedQuantity": { "type": "number" },
            "priorityScore": { "type": "integer", "minimum": 0, "maximum": 100 },
            "reasoning": { "type": "string" }
        },
        "required": ["demandOrderId", "productionLine", "allocatedQuantity", "priorityScore", "reasoning"]
    });
    let mut adjustment = json!({
        "type": "object",
        "properties": {
            "productionLine": { "type": "string" },
            "recommendedRate": { "type": "number" },
            "reasoning": { "type": "string" }
        },
        "required": ["productionLine", "recommendedRate", "reasoning"]
    });
    let mut risk = json!({
        "type": "object",
        "properties": {
            "factor": { "type": "string" },
            "impact": { "type": "string", "enum": ["low", "medium", "high"] },
            "mitigation": { "type": "string" }
        },
        "required": ["factor", "impact", "mitigation"]
    });
    let mut root = json!({
        "type": "object",
        "properties": {
            "allocations": { "type": "array" },
            "productionAdjustments": { "type": "array" },
            "riskFactors": { "type": "array" },
            "confidence": { "type": "integer", "minimum": 0, "maximum": 100 },
            "nextReviewTime": { "type": "string" }
        },
        "required": ["allocations", "productionAdjustments", "riskFactors", "confidence", "nextReviewTime"]
    });

    if enhanced {
        allocation["properties"]["userGuidanceInfluence"] = json!({ "type": "string" });
        adjustment["properties"]["basedOnUserData"] = json!({ "type": "boolean" });
        risk["properties"]["userIdentified"] = json!({ "type": "boolean" });
        root["properties"]["userGuidanceApplied"] =
            json!({ "type": "array", "items": { "type": "string" } });
    }

    root["properties"]["allocations"]["items"] = allocation;
    root["properties"]["productionAdjustments"]["items"] = adjustment;
    root["properties"]["riskFactors"]["items"] = risk;

    ResponseSchema::new(DECISION_SCHEMA_NAME, root)
}

/// Check a model response against the decision contract.
///
/// Unknown keys are ignored. Identifiers must be non-empty; whether they
/// exist in the input context is a separate question answered by
/// [`crate::unknown_references`]. For [`DecisionVariant::Basic`] the
/// guidance-only fields are dropped.
pub fn validate(value: Value, variant: DecisionVariant) -> Result<SupplyDecision, DecisionError> {
    let decision: SupplyDecision = serde_json::from_value(value)
        .map_err(|e| DecisionError::new(DecisionErrorKind::SchemaViolation(e.to_string())))?;

    for (index, allocation) in decision.allocations.iter().enumerate() {
        if allocation.demand_order_id.trim().is_empty() {
            return Err(DecisionError::new(DecisionErrorKind::SchemaViolation(
                format!("allocations[{index}].demandOrderId is empty"),
            )));
        }
        if allocation.production_line.trim().is_empty() {
            return Err(DecisionError::new(DecisionErrorKind::SchemaViolation(
                format!("allocations[{index}].productionLine is empty"),
            )));
        }
    }

    Ok(match variant {
        DecisionVariant::Basic => decision.without_guidance_fields(),
        DecisionVariant::Enhanced => decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        json!({
            "allocations": [{
                "demandOrderId": "ord-1",
                "productionLine": "line-a",
                "allocatedQuantity": 120,
                "priorityScore": 90,
                "reasoning": "Most urgent order",
                "userGuidanceInfluence": "Customer A first"
            }],
            "productionAdjustments": [{
                "productionLine": "line-a",
                "recommendedRate": 110.5,
                "reasoning": "Backlog",
                "basedOnUserData": true
            }],
            "riskFactors": [{
                "factor": "Storm",
                "impact": "high",
                "mitigation": "Ship early"
            }],
            "confidence": 84,
            "nextReviewTime": "2025-01-16T09:00:00Z",
            "userGuidanceApplied": ["Customer A first"]
        })
    }

    #[test]
    fn accepts_well_formed_decision() {
        let decision = validate(sample(), DecisionVariant::Enhanced).unwrap();
        assert_eq!(decision.confidence.value(), 84);
        assert_eq!(decision.allocations[0].priority_score.value(), 90);
        assert_eq!(decision.risk_factors[0].impact, RiskLevel::High);
        assert_eq!(
            decision.user_guidance_applied,
            Some(vec!["Customer A first".to_string()])
        );
    }

    #[test]
    fn basic_variant_drops_guidance_fields() {
        let decision = validate(sample(), DecisionVariant::Basic).unwrap();
        assert!(decision.user_guidance_applied.is_none());
        assert!(decision.allocations[0].user_guidance_influence.is_none());
        assert!(decision.production_adjustments[0].based_on_user_data.is_none());

        let rendered = serde_json::to_value(&decision).unwrap();
        assert!(rendered.get("userGuidanceApplied").is_none());
    }

    #[test]
    fn rejects_out_of_range_scores() {
        for (pointer, bad) in [
            ("confidence", json!(101)),
            ("confidence", json!(-3)),
            ("confidence", json!(70.5)),
            ("confidence", json!("high")),
        ] {
            let mut value = sample();
            value[pointer] = bad;
            let err = validate(value, DecisionVariant::Basic).unwrap_err();
            assert!(matches!(err.kind, DecisionErrorKind::SchemaViolation(_)));
        }

        let mut value = sample();
        value["allocations"][0]["priorityScore"] = json!(150);
        assert!(validate(value, DecisionVariant::Basic).is_err());
    }

    #[test]
    fn rejects_missing_fields_and_bad_enums() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("nextReviewTime");
        assert!(validate(value, DecisionVariant::Basic).is_err());

        let mut value = sample();
        value["riskFactors"][0]["impact"] = json!("severe");
        assert!(validate(value, DecisionVariant::Basic).is_err());
    }

    #[test]
    fn rejects_empty_identifiers() {
        let mut value = sample();
        value["allocations"][0]["productionLine"] = json!("  ");
        let err = validate(value, DecisionVariant::Basic).unwrap_err();
        assert!(format!("{}", err.kind).contains("productionLine"));
    }

    #[test]
    fn integral_floats_are_scores() {
        let mut value = sample();
        value["confidence"] = json!(75.0);
        let decision = validate(value, DecisionVariant::Basic).unwrap();
        assert_eq!(decision.confidence.fraction(), 0.75);
    }

    #[test]
    fn enhanced_schema_lists_optional_fields() {
        let basic = decision_schema(DecisionVariant::Basic);
        let enhanced = decision_schema(DecisionVariant::Enhanced);

        assert_eq!(basic.name, DECISION_SCHEMA_NAME);
        assert!(basic.schema["properties"].get("userGuidanceApplied").is_none());
        assert!(enhanced.schema["properties"].get("userGuidanceApplied").is_some());
        assert_eq!(
            enhanced.schema["properties"]["allocations"]["items"]["properties"]
                ["userGuidanceInfluence"]["type"],
            "string"
        );
        assert_eq!(
            basic.schema["properties"]["confidence"]["maximum"],
            json!(100)
        );
    }
}
