//! Cloudflare API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CacheReserveSetting, CacheReserveValue};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

/// `GET/PATCH /zones/{zone_id}/cache/cache_reserve` 的 result
#[derive(Debug, Deserialize)]
pub struct CloudflareCacheReserve {
    pub value: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
}

impl From<CloudflareCacheReserve> for CacheReserveSetting {
    fn from(raw: CloudflareCacheReserve) -> Self {
        Self {
            value: raw.value,
            editable: raw.editable,
            modified_on: raw.modified_on,
        }
    }
}

/// Zone setting 更新请求体
#[derive(Debug, Serialize)]
pub struct UpdateSettingBody {
    pub value: CacheReserveValue,
}
