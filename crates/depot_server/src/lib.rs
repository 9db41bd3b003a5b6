//! HTTP API for the depot supply-chain decision service.
//!
//! The [`router`] exposes the decision engine, location and preference
//! CRUD, guidance and upload intake, and the streaming chat relay. Errors
//! share one shape, `{error, details?}`: 400 for caller mistakes, 500 for
//! everything else.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod observability;
mod routes;
mod state;

pub use config::{DatabaseSettings, DepotConfig, LlmSettings, LoggingSettings, ServerSettings};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use observability::{ObservabilityConfig, ObservabilityGuard, init_observability};
pub use routes::{ChatPrompt, router};
pub use state::AppState;

use depot_engine::{
    ChatRelay, DecisionEngine, EngineSettings, FixedSignals, RandomSignals, SignalMode,
    SignalSource,
};
use depot_interface::{AuditLog, ExternalDataStore, JsonMode, SettingsStore, Streaming, SupplyStore};
use std::sync::Arc;

/// The signal source for a configured mode.
pub fn signal_source(mode: SignalMode) -> Arc<dyn SignalSource> {
    match mode {
        SignalMode::Random => Arc::new(RandomSignals),
        SignalMode::Fixed => Arc::new(FixedSignals::default()),
    }
}

/// Wire a model and a store into handler state.
///
/// One model serves decisions and chat; one store serves every gateway
/// trait.
pub fn build_state<M, S>(
    engine: &EngineSettings,
    chat_prompt: &str,
    model: Arc<M>,
    store: Arc<S>,
) -> AppState
where
    M: JsonMode + Streaming + 'static,
    S: SupplyStore + AuditLog + ExternalDataStore + SettingsStore + 'static,
{
    let decision_engine = DecisionEngine::new(
        model.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
    .with_signals(signal_source(engine.signals))
    .with_settings(engine.clone());

    AppState {
        engine: decision_engine,
        chat: ChatRelay::new(model, chat_prompt).with_profile(engine.chat),
        settings: store.clone(),
        uploads: store,
    }
}
