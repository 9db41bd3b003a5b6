//! Prompt builders.
//!
//! Every builder embeds its inputs as pretty-printed JSON so the model
//! sees the same field names the API exposes.

use crate::upload::preview_of;
use depot_core::{
    DecisionContext, DemandOrder, ExternalData, ExternalFactors, InsightsData, ProductionMetric,
};
use depot_error::{DepotResult, JsonError};
use serde::Serialize;

fn pretty<T: Serialize + ?Sized>(value: &T) -> DepotResult<String> {
    Ok(serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?)
}

fn situation(context: &DecisionContext) -> DepotResult<String> {
    Ok(format!(
        "CURRENT SITUATION:\n\
         Demand Orders: {}\n\
         Production Metrics: {}\n\
         Current Allocations: {}\n",
        pretty(&context.demand_orders)?,
        pretty(&context.production_metrics)?,
        pretty(&context.current_allocations)?,
    ))
}

fn external(factors: &ExternalFactors) -> DepotResult<String> {
    Ok(format!(
        "EXTERNAL FACTORS:\n\
         Weather: {}\n\
         Market: {}\n\
         News Sentiment: {}\n",
        pretty(&factors.weather)?,
        pretty(&factors.market)?,
        pretty(&factors.news)?,
    ))
}

/// Prompt for a decision from operational context and external factors alone.
pub fn decision_prompt(context: &DecisionContext, factors: &ExternalFactors) -> DepotResult<String> {
    Ok(format!(
        "You are a supply chain optimization engine. Analyze the current situation \
         and propose allocation decisions.\n\n\
         {}\n{}\n\
         OPTIMIZATION GOALS:\n\
         1. Maximize customer satisfaction (prioritize urgent orders)\n\
         2. Optimize production efficiency\n\
         3. Minimize costs and risks\n\
         4. Account for external factors (weather, market, news)\n\n\
         Provide specific allocation recommendations, production adjustments and risk assessments. \
         Only reference demand order ids and production lines that appear above.",
        situation(context)?,
        external(factors)?,
    ))
}

/// Digest of processed guidance records, newest first.
pub fn guidance_digest(guidance: &[ExternalData]) -> String {
    if guidance.is_empty() {
        return "No user guidance available\n".to_string();
    }

    let mut out = String::new();
    for record in guidance {
        let text = record
            .raw_data
            .get("userGuidance")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("No text guidance");
        let insights = record
            .raw_data
            .get("processedInsights")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("None");
        let files = record
            .metadata
            .get("fileCount")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        out.push_str(&format!(
            "Guidance: {text}\nProcessed Insights: {insights}\nFiles: {files} uploaded files\nDate: {}\n\n",
            record.created_at.to_rfc3339()
        ));
    }
    out
}

/// Digest of uploaded files, newest first.
pub fn upload_digest(uploads: &[ExternalData]) -> DepotResult<String> {
    if uploads.is_empty() {
        return Ok("No uploaded data available\n".to_string());
    }

    let mut out = String::new();
    for record in uploads {
        let filename = record
            .metadata
            .get("filename")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown");
        let records = record
            .metadata
            .get("recordCount")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        let preview = pretty(&preview_of(&record.raw_data))?;
        out.push_str(&format!(
            "File: {filename}\nType: {}\nRecords: {records}\nPreview: {preview}\n\n",
            record.data_type
        ));
    }
    Ok(out)
}

/// Prompt for a decision that puts user guidance and uploaded data first.
pub fn enhanced_decision_prompt(
    context: &DecisionContext,
    factors: &ExternalFactors,
    guidance: &[ExternalData],
    uploads: &[ExternalData],
) -> DepotResult<String> {
    Ok(format!(
        "You are an advanced supply chain optimization engine with access to user guidance \
         and uploaded data.\n\n\
         {}\n\
         USER GUIDANCE & UPLOADED DATA:\n{}\n\
         UPLOADED DATA SUMMARY:\n{}\n\
         {}\n\
         OPTIMIZATION PRIORITIES (in order):\n\
         1. FOLLOW USER GUIDANCE - user instructions take highest priority\n\
         2. Use uploaded data for better decision accuracy\n\
         3. Maximize customer satisfaction (prioritize urgent orders)\n\
         4. Optimize production efficiency\n\
         5. Minimize costs and risks\n\
         6. Account for external factors\n\n\
         IMPORTANT:\n\
         - Indicate when a decision is influenced by user guidance\n\
         - Reference specific uploaded data when making recommendations\n\
         - List the guidance you applied in userGuidanceApplied\n\
         - Keep confidence high only when user guidance is clear and specific\n\
         - Only reference demand order ids and production lines that appear above",
        situation(context)?,
        guidance_digest(guidance),
        upload_digest(uploads)?,
        external(factors)?,
    ))
}

/// Prompt for free-text analysis of the whole dataset.
pub fn insights_prompt(data: &InsightsData) -> DepotResult<String> {
    Ok(format!(
        "Analyze the following supply chain data and provide actionable insights:\n{}\n\n\
         Focus on:\n\
         1. Efficiency opportunities\n\
         2. Risk mitigation\n\
         3. Cost optimization\n\
         4. Performance improvements\n\n\
         Provide specific, actionable recommendations.",
        pretty(data)?,
    ))
}

/// Prompt for production line recommendations.
pub fn optimization_prompt(
    metrics: &[ProductionMetric],
    orders: &[DemandOrder],
) -> DepotResult<String> {
    Ok(format!(
        "Given the current production capacity and demand requirements, optimize production \
         allocation.\n\n\
         Production Lines: {}\n\
         Demand Requirements: {}\n\n\
         Provide specific recommendations for:\n\
         1. Production line adjustments\n\
         2. Capacity reallocation\n\
         3. Efficiency improvements\n\
         4. Timeline optimization",
        pretty(metrics)?,
        pretty(orders)?,
    ))
}

/// Prompt that turns free-text guidance into structured priorities.
pub fn guidance_extraction_prompt(guidance: &str) -> String {
    format!(
        "Analyze the following user guidance for supply chain optimization and extract \
         actionable insights.\n\n\
         User Guidance: \"{guidance}\"\n\n\
         Extract and structure:\n\
         1. Priority adjustments (which companies or orders to prioritize)\n\
         2. Production constraints or requirements\n\
         3. Timeline considerations\n\
         4. Risk factors mentioned\n\
         5. Specific optimization goals\n\n\
         Provide a structured analysis that can be used to adjust automated decision making."
    )
}
