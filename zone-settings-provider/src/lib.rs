//! # zone-settings-provider
//!
//! Schemas, validators and an API client for declaratively managing
//! zone-level settings of a Cloudflare zone.
//!
//! ## Supported Types
//!
//! | Type name | Kind | Remote endpoint |
//! |-----------|------|-----------------|
//! | `cloudflare_zone_cache_reserve` | data source | `GET /zones/{zone_id}/cache/cache_reserve` |
//! | `cloudflare_zone_cache_reserve` | resource | `GET`/`PATCH /zones/{zone_id}/cache/cache_reserve` |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zone_settings_provider::{
//!     CloudflareClient, DataSource, ProviderConfig, Registry, ResourceData,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load configuration (file optional, environment wins)
//!     let config = ProviderConfig::load(None)?;
//!     let client = CloudflareClient::from_config(&config)?;
//!
//!     // 2. Look up the data source by type name
//!     let registry = Registry::builtin();
//!     let data_source = registry.data_source("cloudflare_zone_cache_reserve")?;
//!
//!     // 3. Read the current state
//!     let config = ResourceData::from_value(serde_json::json!({
//!         "zone_id": "0da42c8d2132a9ddaf714f9e7c920711",
//!     }))?;
//!     let state = data_source.read(&client, &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&state)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Validators
//!
//! ```rust
//! use zone_settings_provider::{validate_record_content, validate_record_type, validate_zone_id};
//!
//! assert!(validate_zone_id("0DA42C8D2132A9DDAF714F9E7C920711").is_ok());
//! assert!(validate_record_type("CNAME", true).is_ok());
//! assert!(validate_record_type("TXT", true).is_err());
//! assert!(validate_record_content("AAAA", "192.168.0.1").is_err());
//! ```
//!
//! ## Error Handling
//!
//! Data source and resource operations return [`Diagnostic`]. API client calls
//! return [`ApiError`], which a [`Diagnostic::Remote`] wraps unchanged:
//!
//! - [`ApiError::ZoneNotFound`]: surfaced as [`Diagnostic::NotFound`]
//! - [`ApiError::InvalidCredentials`] / [`ApiError::PermissionDenied`]: token problems
//! - [`ApiError::RateLimited`]: HTTP 429, reported with `Retry-After` and never retried

mod cloudflare;
mod config;
mod error;
mod http_client;
mod registry;
mod resources;
mod schema;
mod state;
mod traits;
mod types;
mod utils;
mod validators;

// Re-export error types
pub use error::{ApiError, ApiResult, Diagnostic};

// Re-export configuration
pub use config::{
    ConfigError, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_BASE_URL, ENV_API_TOKEN, ProviderConfig,
};

// Re-export API client trait only (internal traits are not exported)
pub use traits::ZoneSettingsApi;

pub use cloudflare::CloudflareClient;

pub use registry::{ProviderSchema, Registry};

pub use resources::{
    DataSource, ENABLED_KEY, Resource, ZONE_CACHE_RESERVE_TYPE, ZoneCacheReserveDataSource,
    ZoneCacheReserveResource,
};

pub use schema::{Field, FieldError, FieldKind, FieldMode, Schema, StringValidator};

pub use state::ResourceData;

pub use types::{CacheReserveSetting, CacheReserveValue, RecordType, ZoneId};

pub use validators::{
    ValidationError, ZONE_ID_KEY, ZONE_ID_LEN, validate_record_content, validate_record_type,
    validate_zone_id,
};

// Re-export utils module
pub use utils::{checksum, datetime};
