//! In-memory doubles for the model and the data gateway.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use depot_core::{
    AiDecision, DataSource, DemandOrder, ExternalData, ExternalDataCache, GenerateRequest,
    GenerateResponse, LineStatus, NewAiDecision, NewExternalData, OrderStatus, ProductionMetric,
    SupplyAllocation,
};
use depot_error::{DatabaseError, DatabaseErrorKind, DepotResult, ModelsError, ModelsErrorKind};
use depot_interface::{
    AuditLog, ChunkStream, ExternalDataStore, FinishReason, JsonMode, LanguageModel,
    ResponseSchema, StreamChunk, Streaming, SupplyStore,
};
use serde_json::{Value, json};
use std::sync::Mutex;
use uuid::Uuid;

fn provider_failure() -> ModelsError {
    ModelsError::new(ModelsErrorKind::Api {
        status: 503,
        message: "upstream unavailable".into(),
    })
}

fn store_failure() -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Connection("database unreachable".into()))
}

/// Scripted language model.
#[derive(Default)]
pub struct MockModel {
    json_reply: Option<Value>,
    text_reply: Option<String>,
    chunks: Vec<String>,
    fail_midstream: bool,
    requests: Mutex<Vec<GenerateRequest>>,
    schemas: Mutex<Vec<ResponseSchema>>,
}

impl MockModel {
    /// Answers schema-constrained requests with `value`.
    pub fn json(value: Value) -> Self {
        Self {
            json_reply: Some(value),
            ..Default::default()
        }
    }

    /// Answers free-text requests with `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text_reply: Some(text.into()),
            ..Default::default()
        }
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Streams `chunks`, optionally failing after the first one.
    pub fn streaming(chunks: &[&str], fail_midstream: bool) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail_midstream,
            ..Default::default()
        }
    }

    /// Adds a free-text answer.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_reply = Some(text.into());
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Schemas received so far.
    pub fn schemas(&self) -> Vec<ResponseSchema> {
        self.schemas.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, req: &GenerateRequest) -> DepotResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match &self.text_reply {
            Some(text) => Ok(GenerateResponse {
                text: text.clone(),
                usage: None,
            }),
            None => Err(provider_failure().into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl JsonMode for MockModel {
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &ResponseSchema,
    ) -> DepotResult<Value> {
        self.requests.lock().unwrap().push(req.clone());
        self.schemas.lock().unwrap().push(schema.clone());
        self.json_reply
            .clone()
            .ok_or_else(|| provider_failure().into())
    }
}

#[async_trait]
impl Streaming for MockModel {
    async fn generate_stream(&self, req: &GenerateRequest) -> DepotResult<ChunkStream> {
        self.requests.lock().unwrap().push(req.clone());
        if self.chunks.is_empty() {
            return Err(provider_failure().into());
        }

        let mut items: Vec<DepotResult<StreamChunk>> = Vec::new();
        for (i, chunk) in self.chunks.iter().enumerate() {
            items.push(Ok(StreamChunk::delta(chunk.clone())));
            if self.fail_midstream && i == 0 {
                items.push(Err(ModelsError::new(ModelsErrorKind::Stream(
                    "connection reset".into(),
                ))
                .into()));
            }
        }
        items.push(Ok(StreamChunk::finished(FinishReason::Stop)));
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// In-memory data gateway.
#[derive(Default)]
pub struct MemoryStore {
    pub orders: Vec<DemandOrder>,
    pub metrics: Vec<ProductionMetric>,
    pub allocations: Vec<SupplyAllocation>,
    pub cache: Vec<ExternalDataCache>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub external: Mutex<Vec<ExternalData>>,
    pub decisions: Mutex<Vec<AiDecision>>,
    pub metric_limits: Mutex<Vec<i64>>,
}

impl MemoryStore {
    /// Store seeded with two pending orders, one completed order and two lines.
    pub fn seeded() -> Self {
        Self {
            orders: vec![
                order("Widgets", 5, OrderStatus::Pending),
                order("Gears", 2, OrderStatus::Pending),
                order("Bolts", 1, OrderStatus::Completed),
            ],
            metrics: vec![metric("line-a"), metric("line-b")],
            ..Default::default()
        }
    }

    /// Adds an existing context record.
    pub fn with_external(self, record: ExternalData) -> Self {
        self.external.lock().unwrap().push(record);
        self
    }

    /// Audit records appended so far.
    pub fn decisions(&self) -> Vec<AiDecision> {
        self.decisions.lock().unwrap().clone()
    }

    /// Context records stored so far, oldest first.
    pub fn external_records(&self) -> Vec<ExternalData> {
        self.external.lock().unwrap().clone()
    }

    /// Limits passed to `recent_metrics`.
    pub fn metric_limits(&self) -> Vec<i64> {
        self.metric_limits.lock().unwrap().clone()
    }

    fn read_guard(&self) -> DepotResult<()> {
        if self.fail_reads {
            Err(store_failure().into())
        } else {
            Ok(())
        }
    }

    fn write_guard(&self) -> DepotResult<()> {
        if self.fail_writes {
            Err(store_failure().into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SupplyStore for MemoryStore {
    async fn pending_orders(&self) -> DepotResult<Vec<DemandOrder>> {
        self.read_guard()?;
        Ok(self
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .cloned()
            .collect())
    }

    async fn all_orders(&self) -> DepotResult<Vec<DemandOrder>> {
        self.read_guard()?;
        Ok(self.orders.clone())
    }

    async fn recent_metrics(&self, limit: i64) -> DepotResult<Vec<ProductionMetric>> {
        self.read_guard()?;
        self.metric_limits.lock().unwrap().push(limit);
        Ok(self.metrics.iter().take(limit as usize).cloned().collect())
    }

    async fn allocations(&self) -> DepotResult<Vec<SupplyAllocation>> {
        self.read_guard()?;
        Ok(self.allocations.clone())
    }
}

#[async_trait]
impl AuditLog for MemoryStore {
    async fn append(&self, record: NewAiDecision) -> DepotResult<AiDecision> {
        self.write_guard()?;
        let stored = AiDecision {
            id: record.id,
            decision_type: record.decision_type,
            input_data: record.input_data,
            output_data: record.output_data,
            confidence_score: record.confidence_score,
            reasoning: record.reasoning,
            created_at: Utc::now(),
        };
        self.decisions.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ExternalDataStore for MemoryStore {
    async fn insert_external(&self, record: NewExternalData) -> DepotResult<ExternalData> {
        self.write_guard()?;
        let stored = ExternalData {
            id: record.id,
            source: record.source,
            data_type: record.data_type,
            raw_data: record.raw_data,
            metadata: record.metadata,
            created_at: Utc::now(),
        };
        self.external.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn latest_by_source(
        &self,
        source: DataSource,
        limit: i64,
    ) -> DepotResult<Vec<ExternalData>> {
        self.read_guard()?;
        let mut records: Vec<ExternalData> = self
            .external
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.source == source)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }

    async fn recent_cache(&self, limit: i64) -> DepotResult<Vec<ExternalDataCache>> {
        self.read_guard()?;
        Ok(self.cache.iter().take(limit as usize).cloned().collect())
    }
}

pub fn order(product: &str, urgency: i32, status: OrderStatus) -> DemandOrder {
    let now = Utc::now();
    DemandOrder {
        id: Uuid::new_v4(),
        company_id: None,
        product_name: product.to_string(),
        quantity_requested: 100,
        urgency_level: urgency,
        due_date: None,
        status,
        created_at: now,
        updated_at: now,
        company: None,
    }
}

pub fn metric(line: &str) -> ProductionMetric {
    ProductionMetric {
        id: Uuid::new_v4(),
        production_line: line.to_string(),
        current_rate: 80.0,
        target_rate: 100.0,
        efficiency_percentage: Some(80.0),
        status: LineStatus::Active,
        recorded_at: Utc::now(),
    }
}

/// A processed guidance record created `age_minutes` ago.
pub fn guidance_record(text: &str, age_minutes: i64) -> ExternalData {
    ExternalData {
        id: Uuid::new_v4(),
        source: DataSource::UserGuidanceProcessed,
        data_type: "guidance_context".into(),
        raw_data: json!({
            "userGuidance": text,
            "uploadedDataIds": [],
            "processedInsights": "Prioritise Acme",
            "lastUpdated": Utc::now(),
        }),
        metadata: json!({"guidanceLength": text.len(), "fileCount": 1}),
        created_at: Utc::now() - Duration::minutes(age_minutes),
    }
}

/// An uploaded CSV record.
pub fn upload_record(filename: &str) -> ExternalData {
    ExternalData {
        id: Uuid::new_v4(),
        source: DataSource::UserUpload,
        data_type: "csv".into(),
        raw_data: json!({"headers": ["sku"], "data": [{"sku": "A-1"}], "rowCount": 1}),
        metadata: json!({"filename": filename, "recordCount": 1}),
        created_at: Utc::now(),
    }
}

/// A decision referencing `order_id` on `line`.
pub fn decision_json(order_id: &str, line: &str, confidence: Value) -> Value {
    json!({
        "allocations": [{
            "demandOrderId": order_id,
            "productionLine": line,
            "allocatedQuantity": 100,
            "priorityScore": 95,
            "reasoning": "Most urgent pending order",
            "userGuidanceInfluence": "Customer A first"
        }],
        "productionAdjustments": [{
            "productionLine": line,
            "recommendedRate": 105,
            "reasoning": "Close the backlog"
        }],
        "riskFactors": [{
            "factor": "Supplier delay",
            "impact": "medium",
            "mitigation": "Dual source",
            "userIdentified": true
        }],
        "confidence": confidence,
        "nextReviewTime": "2025-01-16T09:00:00Z",
        "userGuidanceApplied": ["Customer A first"]
    })
}
