//! The decision engine.

use crate::prompt::{
    decision_prompt, enhanced_decision_prompt, guidance_extraction_prompt, insights_prompt,
    optimization_prompt,
};
use crate::{
    DecisionVariant, EngineSettings, RandomSignals, SignalSource, SupplyDecision, TaskProfile,
    decision_schema, unknown_references, validate,
};
use chrono::{DateTime, Utc};
use depot_core::{
    DataSource, DecisionContext, DecisionType, DemandOrder, ExternalData, ExternalFactors,
    GenerateRequest, InsightsData, Message, NewAiDecision, NewExternalData, ProductionMetric,
};
use depot_error::{BuilderError, DepotResult, JsonError, ValidationError};
use depot_interface::{AuditLog, ExternalDataStore, JsonMode, SupplyStore};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// A validated decision with the readings it was made under.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    /// The decision itself
    #[serde(flatten)]
    pub decision: SupplyDecision,
    /// Readings embedded in the prompt
    pub external_factors: ExternalFactors,
    /// Guidance and uploads consulted, for the enhanced variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_guidance_context: Option<UserGuidanceContext>,
    /// When the decision was made
    pub timestamp: DateTime<Utc>,
}

/// How much user context informed an enhanced decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGuidanceContext {
    /// Processed guidance records read
    pub guidance_count: usize,
    /// Uploads read
    pub uploaded_files_count: usize,
    /// Creation time of the newest guidance record
    pub last_guidance_date: Option<DateTime<Utc>>,
}

/// Free-text analysis of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Model output
    pub insights: String,
    /// When the analysis was produced
    pub timestamp: DateTime<Utc>,
    /// Display confidence in percent
    pub confidence: u8,
}

/// Free-text production recommendations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionPlan {
    /// Model output
    pub recommendations: String,
    /// When the plan was produced
    pub timestamp: DateTime<Utc>,
}

/// Guidance text and upload summaries submitted by a user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidanceSubmission {
    /// Free-text guidance
    pub guidance: Option<String>,
    /// Upload responses the client is referring to
    pub uploaded_files: Option<Vec<Value>>,
}

impl GuidanceSubmission {
    /// The trimmed guidance text, when it has any content.
    pub fn text(&self) -> Option<&str> {
        self.guidance
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// The referenced uploads.
    pub fn files(&self) -> &[Value] {
        self.uploaded_files.as_deref().unwrap_or_default()
    }
}

/// Stored context derived from a guidance submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceContext {
    /// Submitted text, empty when only files were referenced
    pub user_guidance: String,
    /// Identifiers of the referenced uploads
    pub uploaded_data_ids: Vec<String>,
    /// Priorities extracted by the model
    pub processed_insights: Option<String>,
    /// When the context was built
    pub last_updated: DateTime<Utc>,
}

/// Result of processing a guidance submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceOutcome {
    /// Always true
    pub success: bool,
    /// Confirmation text
    pub message: String,
    /// Identifier of the audit record
    pub guidance_id: Uuid,
    /// Priorities extracted by the model
    pub processed_insights: Option<String>,
    /// The stored context
    pub context: GuidanceContext,
}

/// Turns operational data into model-backed decisions.
///
/// The engine holds no mutable state. Every operation gathers its inputs,
/// prompts the model once and returns; audit writes are best effort.
#[derive(Clone)]
pub struct DecisionEngine {
    model: Arc<dyn JsonMode>,
    supply: Arc<dyn SupplyStore>,
    audit: Arc<dyn AuditLog>,
    external: Arc<dyn ExternalDataStore>,
    signals: Arc<dyn SignalSource>,
    settings: EngineSettings,
}

impl DecisionEngine {
    /// Engine with random signals and default settings.
    pub fn new(
        model: Arc<dyn JsonMode>,
        supply: Arc<dyn SupplyStore>,
        audit: Arc<dyn AuditLog>,
        external: Arc<dyn ExternalDataStore>,
    ) -> Self {
        Self {
            model,
            supply,
            audit,
            external,
            signals: Arc::new(RandomSignals),
            settings: EngineSettings::default(),
        }
    }

    /// Read external factors from `signals`.
    pub fn with_signals(mut self, signals: Arc<dyn SignalSource>) -> Self {
        self.signals = signals;
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Pending orders, recent metrics and all allocations.
    #[instrument(skip(self))]
    pub async fn decision_context(&self) -> DepotResult<DecisionContext> {
        let (demand_orders, production_metrics, current_allocations) = futures::try_join!(
            self.supply.pending_orders(),
            self.supply.recent_metrics(self.settings.decision_metrics),
            self.supply.allocations(),
        )?;
        Ok(DecisionContext {
            demand_orders,
            production_metrics,
            current_allocations,
        })
    }

    /// Every order, recent metrics, all allocations and recent cached feeds.
    #[instrument(skip(self))]
    pub async fn insights_data(&self) -> DepotResult<InsightsData> {
        let (demand_orders, production_metrics, allocations, external_data) = futures::try_join!(
            self.supply.all_orders(),
            self.supply.recent_metrics(self.settings.insights_metrics),
            self.supply.allocations(),
            self.external.recent_cache(self.settings.insights_cache),
        )?;
        Ok(InsightsData {
            demand_orders,
            production_metrics,
            allocations,
            external_data,
        })
    }

    /// Recent metrics and pending orders.
    #[instrument(skip(self))]
    pub async fn optimization_inputs(
        &self,
    ) -> DepotResult<(Vec<ProductionMetric>, Vec<DemandOrder>)> {
        futures::try_join!(
            self.supply.recent_metrics(self.settings.decision_metrics),
            self.supply.pending_orders(),
        )
    }

    /// Propose allocations from context and external factors.
    #[instrument(skip(self, context), fields(orders = context.demand_orders.len()))]
    pub async fn make_decision(&self, context: DecisionContext) -> DepotResult<DecisionOutcome> {
        let factors = self.signals.read();
        let prompt = decision_prompt(&context, &factors)?;

        let decision = self
            .decide(prompt, DecisionVariant::Basic, self.settings.decision, &context)
            .await?;

        let reasoning = format!(
            "AI-generated supply chain optimization based on current demand, production capacity, \
             and external factors including weather ({}), market trends ({}), and news sentiment ({}).",
            factors.weather.condition, factors.market.trend, factors.news.sentiment,
        );
        self.record_decision(
            DecisionType::Allocation,
            json_value(&factors)?,
            &decision,
            reasoning,
        )
        .await;

        Ok(DecisionOutcome {
            decision,
            external_factors: factors,
            user_guidance_context: None,
            timestamp: Utc::now(),
        })
    }

    /// Propose allocations with stored guidance and uploads taking priority.
    #[instrument(skip(self, context), fields(orders = context.demand_orders.len()))]
    pub async fn make_enhanced_decision(
        &self,
        context: DecisionContext,
    ) -> DepotResult<DecisionOutcome> {
        let (guidance, uploads) = futures::try_join!(
            self.external.latest_by_source(
                DataSource::UserGuidanceProcessed,
                self.settings.guidance_history
            ),
            self.external
                .latest_by_source(DataSource::UserUpload, self.settings.upload_history),
        )?;
        debug!(
            guidance = guidance.len(),
            uploads = uploads.len(),
            "Loaded user context"
        );

        let factors = self.signals.read();
        let prompt = enhanced_decision_prompt(&context, &factors, &guidance, &uploads)?;

        let decision = self
            .decide(
                prompt,
                DecisionVariant::Enhanced,
                self.settings.enhanced_decision,
                &context,
            )
            .await?;

        let applied = decision.user_guidance_applied.clone().unwrap_or_default();
        let reasoning = format!(
            "Enhanced AI decision incorporating {} user guidance entries and {} uploaded data files. \
             User guidance applied: {}.",
            guidance.len(),
            uploads.len(),
            if applied.is_empty() {
                "None".to_string()
            } else {
                applied.join(", ")
            },
        );
        let input = json!({
            "externalFactors": factors,
            "userGuidanceCount": guidance.len(),
            "uploadedDataCount": uploads.len(),
            "userGuidanceApplied": applied,
        });
        self.record_decision(DecisionType::EnhancedAllocation, input, &decision, reasoning)
            .await;

        Ok(DecisionOutcome {
            decision,
            external_factors: factors,
            user_guidance_context: Some(UserGuidanceContext {
                guidance_count: guidance.len(),
                uploaded_files_count: uploads.len(),
                last_guidance_date: guidance.first().map(|g: &ExternalData| g.created_at),
            }),
            timestamp: Utc::now(),
        })
    }

    /// Free-text analysis of the whole dataset.
    #[instrument(skip(self, data))]
    pub async fn generate_insights(&self, data: InsightsData) -> DepotResult<Insights> {
        let request = build_request(insights_prompt(&data)?, self.settings.insights)?;
        let response = self.model.generate(&request).await?;

        Ok(Insights {
            insights: response.text,
            timestamp: Utc::now(),
            confidence: rand::thread_rng().gen_range(80..100),
        })
    }

    /// Free-text production line recommendations.
    #[instrument(skip(self, metrics, orders), fields(lines = metrics.len(), orders = orders.len()))]
    pub async fn optimize_production(
        &self,
        metrics: Vec<ProductionMetric>,
        orders: Vec<DemandOrder>,
    ) -> DepotResult<ProductionPlan> {
        let request = build_request(optimization_prompt(&metrics, &orders)?, self.settings.optimize)?;
        let response = self.model.generate(&request).await?;

        Ok(ProductionPlan {
            recommendations: response.text,
            timestamp: Utc::now(),
        })
    }

    /// Extract structured priorities from guidance text.
    ///
    /// Returns `None` when the model call fails; the failure is logged.
    #[instrument(skip(self, guidance), fields(guidance_len = guidance.len()))]
    pub async fn extract_guidance(&self, guidance: &str) -> Option<String> {
        let request = match build_request(guidance_extraction_prompt(guidance), self.settings.guidance)
        {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "Failed to build guidance extraction request");
                return None;
            }
        };
        match self.model.generate(&request).await {
            Ok(response) => Some(response.text),
            Err(e) => {
                warn!(error = %e, "Guidance extraction failed, continuing without it");
                None
            }
        }
    }

    /// Record guidance, extract priorities and store the context for later decisions.
    ///
    /// Rejects submissions with neither text nor files. Store failures are
    /// logged and do not fail the submission.
    #[instrument(skip(self, submission), fields(files = submission.files().len()))]
    pub async fn process_guidance(
        &self,
        submission: GuidanceSubmission,
    ) -> DepotResult<GuidanceOutcome> {
        let text = submission.text();
        let files = submission.files();
        if text.is_none() && files.is_empty() {
            return Err(ValidationError::new("No guidance or files provided").into());
        }

        let record = NewAiDecision::builder()
            .decision_type(DecisionType::UserGuidance)
            .input_data(json!({
                "guidance": text.unwrap_or_default(),
                "uploadedFiles": files,
                "timestamp": Utc::now(),
            }))
            .reasoning(format!(
                "User provided guidance: {}",
                text.unwrap_or("File uploads only")
            ))
            .confidence_score(1.0)
            .build()
            .map_err(BuilderError::from)?;
        let guidance_id = record.id;
        if let Err(e) = self.audit.append(record).await {
            error!(error = %e, "Failed to store guidance audit record");
        }

        let processed_insights = match text {
            Some(text) => self.extract_guidance(text).await,
            None => None,
        };

        let context = GuidanceContext {
            user_guidance: text.unwrap_or_default().to_string(),
            uploaded_data_ids: files
                .iter()
                .filter_map(|f| f.pointer("/data/id"))
                .filter_map(|id| match id {
                    Value::String(s) if !s.is_empty() => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            processed_insights: processed_insights.clone(),
            last_updated: Utc::now(),
        };

        let metadata = json!({
            "guidanceLength": text.map_or(0, |t| t.chars().count()),
            "fileCount": files.len(),
            "processedAt": Utc::now(),
        });
        let stored = NewExternalData::new(
            DataSource::UserGuidanceProcessed,
            "guidance_context",
            json_value(&context)?,
            metadata,
        );
        if let Err(e) = self.external.insert_external(stored).await {
            error!(error = %e, "Failed to store guidance context");
        }

        info!(%guidance_id, extracted = processed_insights.is_some(), "Processed user guidance");

        Ok(GuidanceOutcome {
            success: true,
            message: "User guidance processed successfully".to_string(),
            guidance_id,
            processed_insights,
            context,
        })
    }

    async fn decide(
        &self,
        prompt: String,
        variant: DecisionVariant,
        profile: TaskProfile,
        context: &DecisionContext,
    ) -> DepotResult<SupplyDecision> {
        let request = build_request(prompt, profile)?;
        let raw = self
            .model
            .generate_json(&request, &decision_schema(variant))
            .await?;
        let decision = validate(raw, variant)?;

        for unknown in unknown_references(&decision, context) {
            warn!(
                allocation = unknown.allocation,
                field = %unknown.field,
                value = %unknown.value,
                "Decision references an identifier not present in the input context"
            );
        }

        Ok(decision)
    }

    async fn record_decision(
        &self,
        decision_type: DecisionType,
        input: Value,
        decision: &SupplyDecision,
        reasoning: String,
    ) {
        let record = match serde_json::to_value(decision)
            .map_err(|e| e.to_string())
            .and_then(|output| {
                NewAiDecision::builder()
                    .decision_type(decision_type)
                    .input_data(input)
                    .output_data(output)
                    .confidence_score(decision.confidence.fraction())
                    .reasoning(reasoning)
                    .build()
                    .map_err(|e| e.to_string())
            }) {
            Ok(record) => record,
            Err(e) => {
                error!(error = %e, %decision_type, "Failed to build audit record");
                return;
            }
        };

        match self.audit.append(record).await {
            Ok(stored) => debug!(id = %stored.id, %decision_type, "Recorded decision"),
            Err(e) => error!(error = %e, %decision_type, "Failed to record decision"),
        }
    }
}

fn build_request(prompt: String, profile: TaskProfile) -> DepotResult<GenerateRequest> {
    let mut builder = GenerateRequest::builder();
    builder
        .messages(vec![Message::user(prompt)])
        .temperature(profile.temperature);
    if let Some(max) = profile.max_tokens {
        builder.max_tokens(max);
    }
    Ok(builder.build().map_err(BuilderError::from)?)
}

fn json_value<T: Serialize>(value: &T) -> DepotResult<Value> {
    Ok(serde_json::to_value(value).map_err(|e| JsonError::new(e.to_string()))?)
}
