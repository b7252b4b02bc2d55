//! `cloudflare_zone_cache_reserve` data source and resource

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ApiError, Diagnostic};
use crate::schema::{Field, Schema};
use crate::state::ResourceData;
use crate::traits::ZoneSettingsApi;
use crate::types::{CacheReserveSetting, CacheReserveValue, ZoneId};
use crate::validators::{ZONE_ID_KEY, validate_zone_id};

use super::{DataSource, Resource};

pub const ZONE_CACHE_RESERVE_TYPE: &str = "cloudflare_zone_cache_reserve";
pub const ENABLED_KEY: &str = "enabled";

const ZONE_ID_DESCRIPTION: &str = "The zone identifier to target for the resource.";

const DATA_SOURCE_DESCRIPTION: &str = "Provides a Cloudflare data source to look up Cache Reserve \
     status for a given zone.\n\nRequires Cache Reserve subscription.";

const RESOURCE_DESCRIPTION: &str = "Provides a Cloudflare Cache Reserve resource. Cache Reserve \
     can increase cache lifetimes by automatically storing all cacheable files in Cloudflare's \
     persistent object storage buckets.\n\nRequires Cache Reserve subscription.";

#[derive(Debug, Deserialize)]
struct DataSourceConfig {
    zone_id: ZoneId,
}

#[derive(Debug, Deserialize)]
struct ResourceConfig {
    zone_id: ZoneId,
    enabled: bool,
}

fn zone_id_field() -> Field {
    Field::string(ZONE_ID_KEY)
        .required()
        .description(ZONE_ID_DESCRIPTION)
        .validate_with(validate_zone_id)
}

/// 将客户端错误转换为诊断信息
fn remote_error(action: &'static str, zone_id: &ZoneId, err: ApiError) -> Diagnostic {
    if err.is_expected() {
        log::warn!("Cache Reserve {action} failed for zone {zone_id}: {err}");
    } else {
        log::error!("Cache Reserve {action} failed for zone {zone_id}: {err}");
    }

    if err.is_not_found() {
        Diagnostic::NotFound {
            zone_id: zone_id.to_string(),
        }
    } else {
        Diagnostic::Remote {
            action,
            zone_id: zone_id.to_string(),
            source: err,
        }
    }
}

/// Zone id of a stored resource: the attribute, or the id when the attribute is absent.
fn zone_id_from_state(state: &ResourceData) -> Result<ZoneId, Diagnostic> {
    let raw = state
        .get(ZONE_ID_KEY)
        .and_then(serde_json::Value::as_str)
        .or_else(|| state.id())
        .ok_or_else(|| Diagnostic::Decode {
            detail: format!("state has neither an id nor a {ZONE_ID_KEY:?} attribute"),
        })?;
    Ok(ZoneId::parse(raw)?)
}

fn resource_state(zone_id: &ZoneId, setting: &CacheReserveSetting) -> ResourceData {
    let mut state = ResourceData::new();
    state.set(ZONE_ID_KEY, zone_id.as_str());
    state.set(ENABLED_KEY, setting.is_enabled());
    state.set_id(zone_id.as_str());
    state
}

// ============ Data Source ============

/// Looks up whether Cache Reserve is enabled for a zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZoneCacheReserveDataSource;

#[async_trait]
impl DataSource for ZoneCacheReserveDataSource {
    fn type_name(&self) -> &'static str {
        ZONE_CACHE_RESERVE_TYPE
    }

    fn schema(&self) -> Schema {
        Schema {
            description: DATA_SOURCE_DESCRIPTION,
            fields: vec![
                zone_id_field(),
                Field::bool(ENABLED_KEY)
                    .computed()
                    .description("The status of Cache Reserve support."),
            ],
        }
    }

    async fn read(
        &self,
        api: &dyn ZoneSettingsApi,
        config: &ResourceData,
    ) -> Result<ResourceData, Diagnostic> {
        self.schema().validate(config)?;
        let config: DataSourceConfig = config.decode()?;
        let zone_id = config.zone_id;

        log::info!("reading Cache Reserve for zone {zone_id}");

        let setting = api
            .get_cache_reserve(&zone_id)
            .await
            .map_err(|e| remote_error("read", &zone_id, e))?;

        let mut state = ResourceData::new();
        state.set(ZONE_ID_KEY, zone_id.as_str());
        state.set(ENABLED_KEY, setting.is_enabled());
        state.set_id(setting.synthetic_id());
        Ok(state)
    }
}

// ============ Resource ============

/// Switches Cache Reserve on or off for a zone.
///
/// Deleting the resource switches the feature off; the zone itself is untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZoneCacheReserveResource;

impl ZoneCacheReserveResource {
    async fn apply(
        api: &dyn ZoneSettingsApi,
        config: ResourceConfig,
    ) -> Result<ResourceData, Diagnostic> {
        let value = CacheReserveValue::from_enabled(config.enabled);
        log::info!(
            "setting Cache Reserve to {} for zone {}",
            value.as_str(),
            config.zone_id
        );

        let setting = api
            .update_cache_reserve(&config.zone_id, value)
            .await
            .map_err(|e| remote_error("update", &config.zone_id, e))?;

        Ok(resource_state(&config.zone_id, &setting))
    }
}

#[async_trait]
impl Resource for ZoneCacheReserveResource {
    fn type_name(&self) -> &'static str {
        ZONE_CACHE_RESERVE_TYPE
    }

    fn schema(&self) -> Schema {
        Schema {
            description: RESOURCE_DESCRIPTION,
            fields: vec![
                zone_id_field().force_new(),
                Field::bool(ENABLED_KEY).required().description(
                    "Whether to enable or disable Cache Reserve support for a given zone.",
                ),
            ],
        }
    }

    async fn create(
        &self,
        api: &dyn ZoneSettingsApi,
        config: &ResourceData,
    ) -> Result<ResourceData, Diagnostic> {
        self.schema().validate(config)?;
        Self::apply(api, config.decode()?).await
    }

    async fn read(
        &self,
        api: &dyn ZoneSettingsApi,
        state: &ResourceData,
    ) -> Result<ResourceData, Diagnostic> {
        let zone_id = zone_id_from_state(state)?;
        log::info!("reading Cache Reserve for zone {zone_id}");

        match api.get_cache_reserve(&zone_id).await {
            Ok(setting) => Ok(resource_state(&zone_id, &setting)),
            Err(e) if e.is_not_found() => {
                log::warn!("zone {zone_id} no longer exists, removing Cache Reserve from state");
                Ok(ResourceData::new())
            }
            Err(e) => Err(remote_error("read", &zone_id, e)),
        }
    }

    async fn update(
        &self,
        api: &dyn ZoneSettingsApi,
        prior: &ResourceData,
        config: &ResourceData,
    ) -> Result<ResourceData, Diagnostic> {
        let schema = self.schema();
        schema.validate(config)?;

        // Older state may only carry the id; compare against the zone it resolves to.
        let mut prior = prior.clone();
        let prior_zone = zone_id_from_state(&prior)?;
        prior.set(ZONE_ID_KEY, prior_zone.as_str());

        let replace = schema.replacement_fields(&prior, config);
        if !replace.is_empty() {
            return Err(Diagnostic::RequiresReplacement { fields: replace });
        }

        Self::apply(api, config.decode()?).await
    }

    async fn delete(
        &self,
        api: &dyn ZoneSettingsApi,
        state: &ResourceData,
    ) -> Result<(), Diagnostic> {
        let zone_id = zone_id_from_state(state)?;
        log::info!("disabling Cache Reserve for zone {zone_id}");

        match api
            .update_cache_reserve(&zone_id, CacheReserveValue::Off)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                log::warn!("zone {zone_id} no longer exists, nothing to disable");
                Ok(())
            }
            Err(e) => Err(remote_error("disable", &zone_id, e)),
        }
    }

    async fn import(
        &self,
        api: &dyn ZoneSettingsApi,
        id: &str,
    ) -> Result<ResourceData, Diagnostic> {
        let zone_id = ZoneId::parse(id)?;
        log::info!("importing Cache Reserve for zone {zone_id}");

        let mut state = ResourceData::new();
        state.set(ZONE_ID_KEY, zone_id.as_str());
        state.set_id(zone_id.as_str());

        let state = self.read(api, &state).await?;
        if state.id().is_none() {
            return Err(Diagnostic::NotFound {
                zone_id: zone_id.to_string(),
            });
        }
        Ok(state)
    }
}
