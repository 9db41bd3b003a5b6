//! Mocks and request helpers for driving the router in-process.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use depot_core::{
    AiDecision, CompanyLocation, DataSource, DemandOrder, ExternalData, ExternalDataCache,
    GenerateRequest, GenerateResponse, LineStatus, NewAiDecision, NewExternalData, NewLocation,
    OrderStatus, ProductionMetric, Settings, SupplyAllocation,
};
use depot_engine::{EngineSettings, SignalMode};
use depot_error::{DatabaseError, DatabaseErrorKind, DepotResult, ModelsError, ModelsErrorKind};
use depot_interface::{
    AuditLog, ChunkStream, ExternalDataStore, FinishReason, JsonMode, LanguageModel,
    ResponseSchema, SettingsStore, StreamChunk, Streaming, SupplyStore,
};
use depot_server::{build_state, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

fn provider_failure() -> ModelsError {
    ModelsError::new(ModelsErrorKind::Api {
        status: 500,
        message: "provider exploded".into(),
    })
}

fn store_failure() -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Query("relation does not exist".into()))
}

/// Scripted model: fixed JSON, text and stream replies.
#[derive(Default)]
pub struct MockModel {
    json_reply: Option<Value>,
    text_reply: Option<String>,
    chunks: Vec<String>,
    calls: Mutex<usize>,
}

impl MockModel {
    /// Answers schema-constrained requests with `value`.
    pub fn json(value: Value) -> Self {
        Self {
            json_reply: Some(value),
            ..Default::default()
        }
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Adds a free-text answer.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_reply = Some(text.into());
        self
    }

    /// Adds a streamed answer.
    pub fn with_chunks(mut self, chunks: &[&str]) -> Self {
        self.chunks = chunks.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Number of model calls so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn record(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, _req: &GenerateRequest) -> DepotResult<GenerateResponse> {
        self.record();
        self.text_reply
            .clone()
            .map(|text| GenerateResponse { text, usage: None })
            .ok_or_else(|| provider_failure().into())
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
        _req: &GenerateRequest,
        _schema: &ResponseSchema,
    ) -> DepotResult<Value> {
        self.record();
        self.json_reply
            .clone()
            .ok_or_else(|| provider_failure().into())
    }
}

#[async_trait]
impl Streaming for MockModel {
    async fn generate_stream(&self, _req: &GenerateRequest) -> DepotResult<ChunkStream> {
        self.record();
        if self.chunks.is_empty() {
            return Err(provider_failure().into());
        }
        let mut items: Vec<DepotResult<StreamChunk>> = self
            .chunks
            .iter()
            .map(|c| Ok(StreamChunk::delta(c.clone())))
            .collect();
        items.push(Ok(StreamChunk::finished(FinishReason::Stop)));
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// In-memory implementation of every gateway trait.
#[derive(Default)]
pub struct MemoryStore {
    pub orders: Vec<DemandOrder>,
    pub metrics: Vec<ProductionMetric>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub decisions: Mutex<Vec<AiDecision>>,
    pub external: Mutex<Vec<ExternalData>>,
    pub locations: Mutex<Vec<CompanyLocation>>,
    pub settings: Mutex<Option<Settings>>,
}

impl MemoryStore {
    /// One pending order and one production line.
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self {
            orders: vec![DemandOrder {
                id: Uuid::new_v4(),
                company_id: None,
                product_name: "Widgets".into(),
                quantity_requested: 250,
                urgency_level: 4,
                due_date: None,
                status: OrderStatus::Pending,
                created_at: now,
                updated_at: now,
                company: None,
            }],
            metrics: vec![ProductionMetric {
                id: Uuid::new_v4(),
                production_line: "line-a".into(),
                current_rate: 90.0,
                target_rate: 100.0,
                efficiency_percentage: Some(90.0),
                status: LineStatus::Active,
                recorded_at: now,
            }],
            ..Default::default()
        }
    }

    pub fn order_id(&self) -> String {
        self.orders[0].id.to_string()
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
        Ok(self.metrics.iter().take(limit as usize).cloned().collect())
    }

    async fn allocations(&self) -> DepotResult<Vec<SupplyAllocation>> {
        self.read_guard()?;
        Ok(Vec::new())
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
        Ok(self
            .external
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.source == source)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn recent_cache(&self, _limit: i64) -> DepotResult<Vec<ExternalDataCache>> {
        self.read_guard()?;
        Ok(Vec::new())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn list_locations(&self) -> DepotResult<Vec<CompanyLocation>> {
        self.read_guard()?;
        Ok(self.locations.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn create_location(&self, location: NewLocation) -> DepotResult<CompanyLocation> {
        self.write_guard()?;
        let stored = CompanyLocation {
            id: Uuid::new_v4(),
            name: location.name,
            address: location.address,
            latitude: location.latitude,
            longitude: location.longitude,
            location_type: location.location_type,
            created_at: Utc::now(),
        };
        self.locations.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn delete_location(&self, id: Uuid) -> DepotResult<usize> {
        self.write_guard()?;
        let mut locations = self.locations.lock().unwrap();
        let before = locations.len();
        locations.retain(|l| l.id != id);
        Ok(before - locations.len())
    }

    async fn load_settings(&self) -> DepotResult<Option<Settings>> {
        self.read_guard()?;
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save_settings(&self, settings: Settings) -> DepotResult<Settings> {
        self.write_guard()?;
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(settings)
    }
}

/// Router over the mocks, with fixed external signals.
pub fn app(model: &Arc<MockModel>, store: &Arc<MemoryStore>) -> Router {
    let engine = EngineSettings {
        signals: SignalMode::Fixed,
        ..Default::default()
    };
    router(
        build_state(&engine, "You help planners.", model.clone(), store.clone()),
        Duration::from_secs(5),
    )
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

const BOUNDARY: &str = "depot-test-boundary";

/// A multipart upload; either part may be omitted.
pub fn multipart(file: Option<(&str, &str)>, kind: Option<&str>) -> Request<Body> {
    let mut body = String::new();
    if let Some(kind) = kind {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"type\"\r\n\r\n{kind}\r\n"
        ));
    }
    if let Some((filename, content)) = file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send a request and decode the JSON response.
pub async fn send(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

/// Send a request and return the raw response.
pub async fn send_raw(app: Router, request: Request<Body>) -> anyhow::Result<Response> {
    Ok(app.oneshot(request).await?)
}

/// A decision referencing the seeded order.
pub fn decision_json(order_id: &str, confidence: Value) -> Value {
    json!({
        "allocations": [{
            "demandOrderId": order_id,
            "productionLine": "line-a",
            "allocatedQuantity": 250,
            "priorityScore": 88,
            "reasoning": "Only pending order"
        }],
        "productionAdjustments": [],
        "riskFactors": [{"factor": "None", "impact": "low", "mitigation": "Monitor"}],
        "confidence": confidence,
        "nextReviewTime": "2025-01-16T09:00:00Z"
    })
}
