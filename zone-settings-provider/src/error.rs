use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::FieldError;
use crate::validators::ValidationError;

/// Error returned by a zone settings API client.
///
/// Each variant includes a `provider` field identifying which client produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated token lacks permission, or the zone lacks the subscription.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified zone was not found.
    ZoneNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone identifier that was not found.
        zone_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected by the API.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    ///
    /// Reported as-is; the client never retries.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ApiError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the remote zone does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ZoneNotFound { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::ZoneNotFound {
                provider,
                zone_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Zone '{zone_id}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Zone '{zone_id}' not found")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// User-facing error of a data source or resource operation.
///
/// Every diagnostic is terminal for the operation that raised it.
#[derive(Debug, Error)]
pub enum Diagnostic {
    /// A single value failed validation outside of schema checking (e.g. an import id).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configuration does not satisfy the schema.
    #[error("invalid configuration: {}", join_field_errors(.0))]
    InvalidConfig(Vec<FieldError>),

    /// The attribute map could not be decoded into the typed configuration.
    #[error("unable to decode configuration: {detail}")]
    Decode {
        /// Decoder message.
        detail: String,
    },

    /// The remote zone does not exist.
    #[error("unable to find zone: {zone_id}")]
    NotFound {
        /// The zone that was looked up.
        zone_id: String,
    },

    /// Any other client-reported failure.
    #[error("unable to {action} Cache Reserve for zone {zone_id:?}: {source}")]
    Remote {
        /// Operation that failed (`read`, `update`, ...).
        action: &'static str,
        /// The zone the operation targeted.
        zone_id: String,
        /// Underlying client error.
        source: ApiError,
    },

    /// An in-place update was requested for attributes that force a new object.
    #[error("changing {} requires replacing the resource", .fields.join(", "))]
    RequiresReplacement {
        /// Force-new attributes whose value changed.
        fields: Vec<&'static str>,
    },

    /// No data source or resource is registered under the requested name.
    #[error("unknown {kind} type {name:?}")]
    UnknownType {
        /// `data source` or `resource`.
        kind: &'static str,
        /// Requested type name.
        name: String,
    },
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ApiError::NetworkError {
            provider: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_zone_not_found_with_message() {
        let e = ApiError::ZoneNotFound {
            provider: "cloudflare".to_string(),
            zone_id: "abc".to_string(),
            raw_message: Some("Could not route".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[cloudflare] Zone 'abc' not found: Could not route"
        );
    }

    #[test]
    fn display_permission_denied_without_message() {
        let e = ApiError::PermissionDenied {
            provider: "cloudflare".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Permission denied");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ApiError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[cloudflare] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_unknown() {
        let e = ApiError::Unknown {
            provider: "test".to_string(),
            raw_code: Some("E001".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[test] something broke");
    }

    #[test]
    fn serialize_carries_code_tag() {
        let e = ApiError::RateLimited {
            provider: "cloudflare".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn only_zone_not_found_is_not_found() {
        assert!(
            ApiError::ZoneNotFound {
                provider: "t".into(),
                zone_id: "z".into(),
                raw_message: None,
            }
            .is_not_found()
        );
        assert!(
            !ApiError::Unknown {
                provider: "t".into(),
                raw_code: Some("7003".into()),
                raw_message: "x".into(),
            }
            .is_not_found()
        );
    }

    #[test]
    fn expected_variants() {
        assert!(
            ApiError::InvalidCredentials {
                provider: "t".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ApiError::Timeout {
                provider: "t".into(),
                detail: "30s".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn diagnostic_not_found_mentions_zone() {
        let d = Diagnostic::NotFound {
            zone_id: "0da42c8d2132a9ddaf714f9e7c920711".to_string(),
        };
        assert_eq!(
            d.to_string(),
            "unable to find zone: 0da42c8d2132a9ddaf714f9e7c920711"
        );
    }

    #[test]
    fn diagnostic_remote_wraps_message() {
        let d = Diagnostic::Remote {
            action: "read",
            zone_id: "0da42c8d2132a9ddaf714f9e7c920711".to_string(),
            source: ApiError::Timeout {
                provider: "cloudflare".into(),
                detail: "30s elapsed".into(),
            },
        };
        assert_eq!(
            d.to_string(),
            "unable to read Cache Reserve for zone \"0da42c8d2132a9ddaf714f9e7c920711\": \
             [cloudflare] Request timeout: 30s elapsed"
        );
    }

    #[test]
    fn diagnostic_invalid_config_joins_errors() {
        let d = Diagnostic::InvalidConfig(vec![
            FieldError::Missing {
                attribute: "zone_id".to_string(),
            },
            FieldError::Unknown {
                attribute: "foo".to_string(),
            },
        ]);
        let msg = d.to_string();
        assert!(msg.starts_with("invalid configuration: "));
        assert!(msg.contains("zone_id"));
        assert!(msg.contains("; "));
        assert!(msg.contains("foo"));
    }
}
