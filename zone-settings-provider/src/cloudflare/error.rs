//! Cloudflare error mapping

use crate::error::ApiError;
use crate::traits::{ErrorContext, ErrorMapper, RawApiError};

use super::CloudflareClient;

/// Cloudflare error code mapping
/// Reference: <https://api.cloudflare.com/#getting-started-responses>
impl ErrorMapper for CloudflareClient {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError {
        let zone_id = || {
            context
                .zone_id
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string())
        };

        match raw.code.as_deref() {
            // Authentication error
            // 6003: Invalid request headers
            // 6103: Invalid format for X-Auth-Key header
            // 6111: Invalid format for Authorization header
            // 9109: Unauthorized to access requested resource / Max auth failures reached
            // 10000: Authentication error
            Some("6003" | "6103" | "6111" | "9109" | "10000") => ApiError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // Invalid parameter
            // 1004: Validation error
            // 1007: Invalid value for zone setting
            Some(code @ ("1004" | "1007")) => ApiError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: if code == "1007" { "value" } else { "general" }.to_string(),
                detail: raw.message,
            },

            // Zone does not exist
            // 1001: Invalid zone identifier
            // 7000: No route for that URI
            // 7003: Could not route to /path. perhaps your object identifier is invalid?
            Some("1001" | "7000" | "7003") => ApiError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone_id: zone_id(),
                raw_message: Some(raw.message),
            },

            // No recognised code: fall back to the HTTP status
            _ => match context.http_status {
                Some(401) => ApiError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                },
                Some(403) => ApiError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                },
                Some(404) => ApiError::ZoneNotFound {
                    provider: self.provider_name().to_string(),
                    zone_id: zone_id(),
                    raw_message: Some(raw.message),
                },
                _ => self.unknown_error(raw),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CloudflareClient {
        CloudflareClient::new("test-token").unwrap()
    }

    fn ctx() -> ErrorContext {
        ErrorContext::default()
    }

    fn ctx_with_zone() -> ErrorContext {
        ErrorContext {
            zone_id: Some("0da42c8d2132a9ddaf714f9e7c920711".to_string()),
            http_status: None,
        }
    }

    // ---- Auth errors ----

    #[test]
    fn auth_error_codes() {
        let c = client();
        for code in ["6003", "6103", "6111", "9109", "10000"] {
            let err = c.map_error(RawApiError::with_code(code, "auth"), ctx());
            assert!(
                matches!(err, ApiError::InvalidCredentials { .. }),
                "{code}: {err:?}"
            );
        }
    }

    // ---- Invalid parameter ----

    #[test]
    fn invalid_param_1007_value() {
        let err = client().map_error(
            RawApiError::with_code("1007", "Invalid value for zone setting cache_reserve"),
            ctx(),
        );
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "value"
        ));
    }

    #[test]
    fn invalid_param_1004_general() {
        let err = client().map_error(RawApiError::with_code("1004", "validation"), ctx());
        assert!(matches!(
            err,
            ApiError::InvalidParameter { param, .. } if param == "general"
        ));
    }

    // ---- Zone not found ----

    #[test]
    fn zone_not_found_7003_uses_context() {
        let err = client().map_error(
            RawApiError::with_code("7003", "could not route"),
            ctx_with_zone(),
        );
        assert!(matches!(
            err,
            ApiError::ZoneNotFound { zone_id, .. } if zone_id == "0da42c8d2132a9ddaf714f9e7c920711"
        ));
    }

    #[test]
    fn zone_not_found_default_context() {
        let err = client().map_error(RawApiError::with_code("7000", "no route"), ctx());
        assert!(matches!(
            err,
            ApiError::ZoneNotFound { zone_id, .. } if zone_id == "<unknown>"
        ));
    }

    // ---- HTTP status fallback ----

    #[test]
    fn status_404_without_code_is_not_found() {
        let err = client().map_error(
            RawApiError::new("HTTP 404"),
            ctx_with_zone().with_status(404),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn status_403_is_permission_denied() {
        let err = client().map_error(
            RawApiError::with_code("99999", "subscription required"),
            ctx().with_status(403),
        );
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[test]
    fn known_code_wins_over_status() {
        let err = client().map_error(
            RawApiError::with_code("10000", "Authentication error"),
            ctx().with_status(403),
        );
        assert!(matches!(err, ApiError::InvalidCredentials { .. }));
    }

    // ---- Fallback ----

    #[test]
    fn fallback_unknown_code() {
        let err = client().map_error(
            RawApiError::with_code("99999", "something unexpected"),
            ctx().with_status(400),
        );
        assert!(matches!(
            err,
            ApiError::Unknown { raw_code, raw_message, .. }
                if raw_code.as_deref() == Some("99999") && raw_message == "something unexpected"
        ));
    }

    #[test]
    fn error_contains_provider_name() {
        let err = client().map_error(RawApiError::with_code("6003", "bad header"), ctx());
        assert!(matches!(
            err,
            ApiError::InvalidCredentials { provider, .. } if provider == "cloudflare"
        ));
    }
}
