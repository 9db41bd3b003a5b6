//! Supply-chain decision engine.
//!
//! The engine turns demand, production and allocation data into a
//! schema-constrained model request, validates the response and records
//! an audit entry. It also produces free-text insights and production
//! recommendations, extracts priorities from user guidance, parses file
//! uploads and relays streaming chat.
//!
//! # Example
//!
//! ```rust,ignore
//! use depot_engine::{DecisionEngine, FixedSignals};
//! use std::sync::Arc;
//!
//! let engine = DecisionEngine::new(model, store.clone(), store.clone(), store)
//!     .with_signals(Arc::new(FixedSignals::default()));
//!
//! let context = engine.decision_context().await?;
//! let outcome = engine.make_decision(context).await?;
//! println!("confidence {}", outcome.decision.confidence.value());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod engine;
mod prompt;
mod references;
mod schema;
mod settings;
mod signals;
mod upload;

pub use chat::{ChatRelay, DEFAULT_CHAT_PROMPT, TextStream};
pub use engine::{
    DecisionEngine, DecisionOutcome, GuidanceContext, GuidanceOutcome, GuidanceSubmission,
    Insights, ProductionPlan, UserGuidanceContext,
};
pub use prompt::{
    decision_prompt, enhanced_decision_prompt, guidance_digest, guidance_extraction_prompt,
    insights_prompt, optimization_prompt, upload_digest,
};
pub use references::{ReferenceField, UnknownReference, unknown_references};
pub use schema::{
    DECISION_SCHEMA_NAME, DecisionVariant, ProductionAdjustment, ProposedAllocation, RiskFactor,
    Score, SupplyDecision, decision_schema, validate,
};
pub use settings::{EngineSettings, SignalMode, TaskProfile};
pub use signals::{
    DEFAULT_COMMODITY, DEFAULT_LOCATION, DEFAULT_TOPIC, FixedSignals, RandomSignals,
    SignalSource, market_from_delta,
};
pub use upload::{
    FileUpload, PREVIEW_RECORDS, UploadKind, UploadSummary, parse_csv, parse_json, preview_of,
    record_count, store_upload,
};
