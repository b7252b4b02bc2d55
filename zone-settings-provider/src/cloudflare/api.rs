//! Cloudflare `ZoneSettingsApi` 实现

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::traits::{ErrorContext, ZoneSettingsApi};
use crate::types::{CacheReserveSetting, CacheReserveValue, ZoneId};

use super::{CloudflareCacheReserve, CloudflareClient, UpdateSettingBody};

fn cache_reserve_path(zone_id: &ZoneId) -> String {
    format!("/zones/{zone_id}/cache/cache_reserve")
}

#[async_trait]
impl ZoneSettingsApi for CloudflareClient {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn get_cache_reserve(&self, zone_id: &ZoneId) -> ApiResult<CacheReserveSetting> {
        let raw: CloudflareCacheReserve = self
            .get(&cache_reserve_path(zone_id), ErrorContext::for_zone(zone_id))
            .await?;
        Ok(raw.into())
    }

    async fn update_cache_reserve(
        &self,
        zone_id: &ZoneId,
        value: CacheReserveValue,
    ) -> ApiResult<CacheReserveSetting> {
        let raw: CloudflareCacheReserve = self
            .patch(
                &cache_reserve_path(zone_id),
                &UpdateSettingBody { value },
                ErrorContext::for_zone(zone_id),
            )
            .await?;
        Ok(raw.into())
    }
}
