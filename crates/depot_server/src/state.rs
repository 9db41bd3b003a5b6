//! Shared handler state.

use depot_engine::{ChatRelay, DecisionEngine};
use depot_interface::{ExternalDataStore, SettingsStore};
use std::sync::Arc;

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Decision engine
    pub engine: DecisionEngine,
    /// Chat relay
    pub chat: ChatRelay,
    /// Locations and preferences
    pub settings: Arc<dyn SettingsStore>,
    /// Upload storage
    pub uploads: Arc<dyn ExternalDataStore>,
}
