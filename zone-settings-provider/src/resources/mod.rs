//! Data source and resource implementations

mod zone_cache_reserve;

use async_trait::async_trait;

use crate::error::Diagnostic;
use crate::schema::Schema;
use crate::state::ResourceData;
use crate::traits::ZoneSettingsApi;

pub use zone_cache_reserve::{
    ENABLED_KEY, ZONE_CACHE_RESERVE_TYPE, ZoneCacheReserveDataSource, ZoneCacheReserveResource,
};

/// Read-only view of remote state.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Name the host refers to this data source by.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Validate `config`, fetch the remote object and return the populated state.
    async fn read(
        &self,
        api: &dyn ZoneSettingsApi,
        config: &ResourceData,
    ) -> Result<ResourceData, Diagnostic>;
}

/// Remote object managed through create/read/update/delete.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Name the host refers to this resource by.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    async fn create(
        &self,
        api: &dyn ZoneSettingsApi,
        config: &ResourceData,
    ) -> Result<ResourceData, Diagnostic>;

    /// Refresh `state` from the API.
    ///
    /// Returns an empty state (no id) when the remote object is gone.
    async fn read(
        &self,
        api: &dyn ZoneSettingsApi,
        state: &ResourceData,
    ) -> Result<ResourceData, Diagnostic>;

    async fn update(
        &self,
        api: &dyn ZoneSettingsApi,
        prior: &ResourceData,
        config: &ResourceData,
    ) -> Result<ResourceData, Diagnostic>;

    async fn delete(&self, api: &dyn ZoneSettingsApi, state: &ResourceData)
    -> Result<(), Diagnostic>;

    /// Build state for an existing remote object from its import id.
    async fn import(&self, api: &dyn ZoneSettingsApi, id: &str)
    -> Result<ResourceData, Diagnostic>;
}
