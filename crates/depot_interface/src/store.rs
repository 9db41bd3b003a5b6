//! Data gateway traits.
//!
//! Each method maps to a single statement against the backing store.

use async_trait::async_trait;
use depot_core::{
    AiDecision, CompanyLocation, DataSource, DemandOrder, ExternalData, ExternalDataCache,
    NewAiDecision, NewExternalData, NewLocation, ProductionMetric, Settings, SupplyAllocation,
};
use depot_error::DepotResult;
use uuid::Uuid;

/// Read access to demand, production and allocation data.
#[async_trait]
pub trait SupplyStore: Send + Sync {
    /// Pending demand orders with their company joined.
    async fn pending_orders(&self) -> DepotResult<Vec<DemandOrder>>;

    /// Every demand order.
    async fn all_orders(&self) -> DepotResult<Vec<DemandOrder>>;

    /// The most recent production metrics, newest first.
    async fn recent_metrics(&self, limit: i64) -> DepotResult<Vec<ProductionMetric>>;

    /// Every allocation with its demand order joined.
    async fn allocations(&self) -> DepotResult<Vec<SupplyAllocation>>;
}

/// Append-only log of decisions and guidance.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append a record.
    async fn append(&self, record: NewAiDecision) -> DepotResult<AiDecision>;
}

/// Uploaded files, processed guidance and cached external feeds.
#[async_trait]
pub trait ExternalDataStore: Send + Sync {
    /// Store a context record.
    async fn insert_external(&self, record: NewExternalData) -> DepotResult<ExternalData>;

    /// The newest records from one source, newest first.
    async fn latest_by_source(
        &self,
        source: DataSource,
        limit: i64,
    ) -> DepotResult<Vec<ExternalData>>;

    /// The newest cached feed entries, newest first.
    async fn recent_cache(&self, limit: i64) -> DepotResult<Vec<ExternalDataCache>>;
}

/// Locations and the preferences singleton.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// All locations, newest first.
    async fn list_locations(&self) -> DepotResult<Vec<CompanyLocation>>;

    /// Insert a location and return the stored row.
    async fn create_location(&self, location: NewLocation) -> DepotResult<CompanyLocation>;

    /// Delete a location, returning the number of rows removed.
    async fn delete_location(&self, id: Uuid) -> DepotResult<usize>;

    /// The stored settings, if any have been saved.
    async fn load_settings(&self) -> DepotResult<Option<Settings>>;

    /// Upsert the settings singleton and return what was stored.
    async fn save_settings(&self, settings: Settings) -> DepotResult<Settings>;
}
