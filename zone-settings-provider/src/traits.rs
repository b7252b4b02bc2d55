use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::types::{CacheReserveSetting, CacheReserveValue, ZoneId};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 API 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone ID（用于 `ZoneNotFound`）
    pub zone_id: Option<String>,
    /// HTTP 状态码（错误码缺失时兜底）
    pub http_status: Option<u16>,
}

impl ErrorContext {
    pub fn for_zone(zone_id: &ZoneId) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            http_status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }
}

/// API 错误映射 Trait（内部使用）
pub(crate) trait ErrorMapper {
    /// 返回 API 客户端标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ApiError {
        ApiError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ApiError {
        ApiError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Remote management API for zone-level settings.
///
/// Implementations hold only an immutable client handle and may be shared
/// across concurrent operations.
#[async_trait]
pub trait ZoneSettingsApi: Send + Sync {
    /// API 客户端标识符
    fn id(&self) -> &'static str;

    /// Fetch the Cache Reserve setting of a zone.
    async fn get_cache_reserve(&self, zone_id: &ZoneId) -> ApiResult<CacheReserveSetting>;

    /// Switch Cache Reserve on or off and return the resulting setting.
    async fn update_cache_reserve(
        &self,
        zone_id: &ZoneId,
        value: CacheReserveValue,
    ) -> ApiResult<CacheReserveSetting>;
}
