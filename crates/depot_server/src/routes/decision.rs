//! Model-backed analysis routes.

use crate::{ApiError, ApiResult, AppState};
use axum::{Json, extract::State};
use depot_engine::{DecisionOutcome, Insights, ProductionPlan};
use tracing::instrument;

/// `POST /decision`
#[instrument(skip(state))]
pub async fn decision(State(state): State<AppState>) -> ApiResult<Json<DecisionOutcome>> {
    const FAILED: &str = "Failed to generate AI decision";

    let context = state
        .engine
        .decision_context()
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    let outcome = state
        .engine
        .make_decision(context)
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    Ok(Json(outcome))
}

/// `POST /decision/enhanced`
#[instrument(skip(state))]
pub async fn enhanced_decision(
    State(state): State<AppState>,
) -> ApiResult<Json<DecisionOutcome>> {
    const FAILED: &str = "Failed to generate enhanced AI decision";

    let context = state
        .engine
        .decision_context()
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    let outcome = state
        .engine
        .make_enhanced_decision(context)
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    Ok(Json(outcome))
}

/// `POST /insights`
#[instrument(skip(state))]
pub async fn insights(State(state): State<AppState>) -> ApiResult<Json<Insights>> {
    const FAILED: &str = "Failed to generate insights";

    let data = state
        .engine
        .insights_data()
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    let insights = state
        .engine
        .generate_insights(data)
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    Ok(Json(insights))
}

/// `POST /optimize-production`
#[instrument(skip(state))]
pub async fn optimize_production(
    State(state): State<AppState>,
) -> ApiResult<Json<ProductionPlan>> {
    const FAILED: &str = "Failed to optimize production";

    let (metrics, orders) = state
        .engine
        .optimization_inputs()
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    let plan = state
        .engine
        .optimize_production(metrics, orders)
        .await
        .map_err(|e| ApiError::from_depot(e, FAILED))?;
    Ok(Json(plan))
}
