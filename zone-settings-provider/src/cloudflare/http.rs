//! Cloudflare HTTP 请求方法

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiResult;
use crate::http_client::{HttpUtils, RawResponse};
use crate::traits::{ErrorContext, ErrorMapper, RawApiError};

use super::{CloudflareClient, CloudflareResponse};

impl CloudflareClient {
    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> ApiResult<T> {
        let (request, url) = self.request(Method::GET, path);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "GET", &url).await?;
        self.unwrap_envelope(&response, context)
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> ApiResult<T> {
        if let Ok(body_json) = serde_json::to_string(body) {
            log::debug!("Request Body: {body_json}");
        }

        let (request, url) = self.request(Method::PATCH, path);
        let response =
            HttpUtils::execute_request(request.json(body), self.provider_name(), "PATCH", &url)
                .await?;
        self.unwrap_envelope(&response, context)
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_token);
        (request, url)
    }

    /// 解析 Cloudflare 响应信封，失败时映射为统一错误
    fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        response: &RawResponse,
        context: ErrorContext,
    ) -> ApiResult<T> {
        let status = response.status;
        let context = context.with_status(status);

        let envelope: CloudflareResponse<T> =
            match HttpUtils::parse_json(&response.body, self.provider_name()) {
                Ok(r) => r,
                // 非 JSON 的错误页（如网关 404）仍按状态码映射
                Err(_) if status >= 400 => {
                    return Err(self.map_error(RawApiError::new(format!("HTTP {status}")), context));
                }
                Err(e) => return Err(e),
            };

        if !envelope.success || status >= 400 {
            let raw = envelope
                .errors
                .and_then(|errors| errors.into_iter().next())
                .map_or_else(
                    || RawApiError::new(format!("HTTP {status}")),
                    |e| RawApiError::with_code(e.code.to_string(), e.message),
                );
            let err = self.map_error(raw, context);
            if err.is_expected() {
                log::warn!("API 错误: {err}");
            } else {
                log::error!("API 错误: {err}");
            }
            return Err(err);
        }

        envelope
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }
}
