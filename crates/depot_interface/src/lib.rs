//! Trait definitions for the depot supply-chain decision service.
//!
//! Language model capabilities and the data gateway are expressed as traits
//! so the decision engine and HTTP layer can run against real backends or
//! in-process test doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod model;
mod store;
mod types;

pub use model::{JsonMode, LanguageModel, Streaming};
pub use store::{AuditLog, ExternalDataStore, SettingsStore, SupplyStore};
pub use types::{ChunkStream, FinishReason, ResponseSchema, StreamChunk};
