//! Generic HTTP client tools
//!
//! Sends a prepared `RequestBuilder`, logs the exchange and turns transport
//! failures into [`ApiError`]s. Request construction (URL, auth headers, body)
//! stays with the API client.
//!
//! Requests are sent exactly once: retrying is left to whoever drives the
//! operation.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Status and body of a response that reached the API.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends the request once and returns the raw response.
    ///
    /// # Errors
    /// * `ApiError::Timeout` - the request timed out
    /// * `ApiError::NetworkError` - connection failure, unreadable body, or HTTP 502/503/504
    /// * `ApiError::RateLimited` - HTTP 429, with `Retry-After` when present
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<RawResponse, ApiError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(provider_name, &e))?;

        let status = response.status().as_u16();
        let retry_after = retry_after_secs(&response);
        log::debug!("[{provider_name}] Response Status: {status}");

        let body = response.text().await.map_err(|e| ApiError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;
        log::debug!("[{provider_name}] Response Body: {}", truncate_for_log(&body));

        match status {
            429 => {
                log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
                Err(ApiError::RateLimited {
                    provider: provider_name.to_string(),
                    retry_after,
                    raw_message: (!body.is_empty()).then_some(body),
                })
            }
            502..=504 => {
                log::warn!("[{provider_name}] Gateway error (HTTP {status})");
                Err(ApiError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
                })
            }
            _ => Ok(RawResponse { status, body }),
        }
    }

    /// Parse JSON response
    ///
    /// # Errors
    /// * `ApiError::ParseError` - the text is not valid JSON for `T`
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!(
                "[{provider_name}] JSON parse failed: {e}; raw response: {}",
                truncate_for_log(response_text)
            );
            ApiError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider_name: &str, err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            provider: provider_name.to_string(),
            detail: err.to_string(),
        }
    } else {
        ApiError::NetworkError {
            provider: provider_name.to_string(),
            detail: err.to_string(),
        }
    }
}

/// `Retry-After` in seconds; HTTP-date values are ignored.
fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Debug)]
    struct Envelope {
        success: bool,
    }

    #[test]
    fn parse_json_valid() {
        let result: Result<Envelope, ApiError> =
            HttpUtils::parse_json(r#"{"success":true,"errors":[]}"#, "test");
        assert!(
            matches!(&result, Ok(Envelope { success: true })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        let result: Result<Envelope, ApiError> = HttpUtils::parse_json("<html>502</html>", "test");
        assert!(
            matches!(&result, Err(ApiError::ParseError { provider, .. }) if provider == "test"),
            "unexpected parse result: {result:?}"
        );
    }
}
