//! PostgreSQL implementation of the data gateway traits.

use crate::conversions::{
    decision_to_new_row, external_to_new_row, location_to_new_row, row_to_allocation,
    row_to_cache_entry, row_to_decision, row_to_demand_order, row_to_external, row_to_location,
    row_to_production_metric, row_to_settings, settings_to_row, SETTINGS_ID,
};
use crate::models::{
    AiDecisionRow, CompanyLocationRow, CompanyRow, DemandOrderRow, ExternalDataCacheRow,
    ExternalDataRow, ProductionMetricRow, SettingsRow, SupplyAllocationRow,
};
use crate::schema::{
    ai_decisions, ai_settings, companies, company_locations, demand_orders, external_data,
    external_data_cache, production_metrics, supply_allocations,
};
use crate::{DatabaseResult, PgPool};
use async_trait::async_trait;
use depot_core::{
    AiDecision, CompanyLocation, DataSource, DemandOrder, ExternalData, ExternalDataCache,
    NewAiDecision, NewExternalData, NewLocation, OrderStatus, ProductionMetric, Settings,
    SupplyAllocation,
};
use depot_error::{DatabaseError, DatabaseErrorKind, DepotResult};
use depot_interface::{AuditLog, ExternalDataStore, SettingsStore, SupplyStore};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Data gateway backed by a pooled PostgreSQL connection.
///
/// Every call checks out a connection and runs its statement on the
/// blocking thread pool.
///
/// # Example
///
/// ```no_run
/// use depot_database::{establish_pool, PostgresStore};
/// use depot_interface::SupplyStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = establish_pool("postgres://localhost/depot", 4)?;
/// let store = PostgresStore::new(pool);
/// let orders = store.pending_orders().await?;
/// println!("{} pending orders", orders.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> DatabaseResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!("Task join error: {}", e)))
        })?
    }
}

fn load_orders(
    conn: &mut PgConnection,
    status: Option<OrderStatus>,
) -> DatabaseResult<Vec<DemandOrder>> {
    let mut query = demand_orders::table
        .left_join(companies::table)
        .select((DemandOrderRow::as_select(), Option::<CompanyRow>::as_select()))
        .order(demand_orders::created_at.desc())
        .into_boxed();
    if let Some(status) = status {
        query = query.filter(demand_orders::status.eq(status.to_string()));
    }

    query
        .load::<(DemandOrderRow, Option<CompanyRow>)>(conn)?
        .into_iter()
        .map(|(order, company)| row_to_demand_order(order, company))
        .collect()
}

#[async_trait]
impl SupplyStore for PostgresStore {
    #[instrument(skip(self))]
    async fn pending_orders(&self) -> DepotResult<Vec<DemandOrder>> {
        let orders = self
            .with_conn(|conn| load_orders(conn, Some(OrderStatus::Pending)))
            .await?;
        debug!(count = orders.len(), "Loaded pending demand orders");
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn all_orders(&self) -> DepotResult<Vec<DemandOrder>> {
        let orders = self.with_conn(|conn| load_orders(conn, None)).await?;
        debug!(count = orders.len(), "Loaded demand orders");
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn recent_metrics(&self, limit: i64) -> DepotResult<Vec<ProductionMetric>> {
        let metrics = self
            .with_conn(move |conn| {
                production_metrics::table
                    .select(ProductionMetricRow::as_select())
                    .order(production_metrics::recorded_at.desc())
                    .limit(limit)
                    .load::<ProductionMetricRow>(conn)?
                    .into_iter()
                    .map(row_to_production_metric)
                    .collect::<DatabaseResult<Vec<_>>>()
            })
            .await?;
        debug!(count = metrics.len(), "Loaded production metrics");
        Ok(metrics)
    }

    #[instrument(skip(self))]
    async fn allocations(&self) -> DepotResult<Vec<SupplyAllocation>> {
        let allocations = self
            .with_conn(|conn| {
                supply_allocations::table
                    .left_join(demand_orders::table)
                    .select((
                        SupplyAllocationRow::as_select(),
                        Option::<DemandOrderRow>::as_select(),
                    ))
                    .order(supply_allocations::created_at.desc())
                    .load::<(SupplyAllocationRow, Option<DemandOrderRow>)>(conn)?
                    .into_iter()
                    .map(|(allocation, order)| row_to_allocation(allocation, order))
                    .collect::<DatabaseResult<Vec<_>>>()
            })
            .await?;
        debug!(count = allocations.len(), "Loaded supply allocations");
        Ok(allocations)
    }
}

#[async_trait]
impl AuditLog for PostgresStore {
    #[instrument(skip(self, record), fields(decision_type = %record.decision_type))]
    async fn append(&self, record: NewAiDecision) -> DepotResult<AiDecision> {
        let row = decision_to_new_row(record);
        let stored = self
            .with_conn(move |conn| {
                let stored: AiDecisionRow = diesel::insert_into(ai_decisions::table)
                    .values(&row)
                    .returning(AiDecisionRow::as_returning())
                    .get_result(conn)?;
                row_to_decision(stored)
            })
            .await?;
        debug!(id = %stored.id, "Audit record appended");
        Ok(stored)
    }
}

#[async_trait]
impl ExternalDataStore for PostgresStore {
    #[instrument(skip(self, record), fields(source = %record.source))]
    async fn insert_external(&self, record: NewExternalData) -> DepotResult<ExternalData> {
        let row = external_to_new_row(record);
        let stored = self
            .with_conn(move |conn| {
                let stored: ExternalDataRow = diesel::insert_into(external_data::table)
                    .values(&row)
                    .returning(ExternalDataRow::as_returning())
                    .get_result(conn)?;
                row_to_external(stored)
            })
            .await?;
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn latest_by_source(
        &self,
        source: DataSource,
        limit: i64,
    ) -> DepotResult<Vec<ExternalData>> {
        let records = self
            .with_conn(move |conn| {
                external_data::table
                    .filter(external_data::source.eq(source.to_string()))
                    .select(ExternalDataRow::as_select())
                    .order(external_data::created_at.desc())
                    .limit(limit)
                    .load::<ExternalDataRow>(conn)?
                    .into_iter()
                    .map(row_to_external)
                    .collect::<DatabaseResult<Vec<_>>>()
            })
            .await?;
        debug!(count = records.len(), "Loaded context records");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn recent_cache(&self, limit: i64) -> DepotResult<Vec<ExternalDataCache>> {
        let entries = self
            .with_conn(move |conn| {
                external_data_cache::table
                    .select(ExternalDataCacheRow::as_select())
                    .order(external_data_cache::created_at.desc())
                    .limit(limit)
                    .load::<ExternalDataCacheRow>(conn)?
                    .into_iter()
                    .map(row_to_cache_entry)
                    .collect::<DatabaseResult<Vec<_>>>()
            })
            .await?;
        Ok(entries)
    }
}

#[async_trait]
impl SettingsStore for PostgresStore {
    #[instrument(skip(self))]
    async fn list_locations(&self) -> DepotResult<Vec<CompanyLocation>> {
        let locations = self
            .with_conn(|conn| {
                let rows = company_locations::table
                    .select(CompanyLocationRow::as_select())
                    .order(company_locations::created_at.desc())
                    .load::<CompanyLocationRow>(conn)?;
                Ok(rows.into_iter().map(row_to_location).collect::<Vec<_>>())
            })
            .await?;
        Ok(locations)
    }

    #[instrument(skip(self, location), fields(name = %location.name))]
    async fn create_location(&self, location: NewLocation) -> DepotResult<CompanyLocation> {
        let row = location_to_new_row(location);
        let stored = self
            .with_conn(move |conn| {
                let stored: CompanyLocationRow = diesel::insert_into(company_locations::table)
                    .values(&row)
                    .returning(CompanyLocationRow::as_returning())
                    .get_result(conn)?;
                Ok(row_to_location(stored))
            })
            .await?;
        debug!(id = %stored.id, "Location created");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn delete_location(&self, id: Uuid) -> DepotResult<usize> {
        let removed = self
            .with_conn(move |conn| {
                Ok(diesel::delete(company_locations::table.find(id)).execute(conn)?)
            })
            .await?;
        debug!(removed, "Location delete executed");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn load_settings(&self) -> DepotResult<Option<Settings>> {
        let settings = self
            .with_conn(|conn| {
                ai_settings::table
                    .find(SETTINGS_ID)
                    .select(SettingsRow::as_select())
                    .first::<SettingsRow>(conn)
                    .optional()?
                    .map(row_to_settings)
                    .transpose()
            })
            .await?;
        Ok(settings)
    }

    #[instrument(skip(self, settings))]
    async fn save_settings(&self, settings: Settings) -> DepotResult<Settings> {
        let row = settings_to_row(&settings)?;
        let stored = self
            .with_conn(move |conn| {
                let stored: SettingsRow = diesel::insert_into(ai_settings::table)
                    .values(&row)
                    .on_conflict(ai_settings::id)
                    .do_update()
                    .set((
                        ai_settings::preferences.eq(excluded(ai_settings::preferences)),
                        ai_settings::ai_settings_doc.eq(excluded(ai_settings::ai_settings_doc)),
                        ai_settings::updated_at.eq(excluded(ai_settings::updated_at)),
                    ))
                    .returning(SettingsRow::as_returning())
                    .get_result(conn)?;
                row_to_settings(stored)
            })
            .await?;
        Ok(stored)
    }
}
