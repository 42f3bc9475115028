//! HTTP transport for OpenRouter chat completions

use super::conversion;
use crate::config::{OpenRouterConfig, ProviderConfig};
use crate::core_types::provider::ProviderReply;
use crate::dispatch::{RequestPayload, TransportMode};
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use crate::providers::http;
use crate::transport::MessagesTransport;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

const PROVIDER: &str = "openrouter";

/// Sends payloads to `{base_url}/chat/completions` in OpenAI format
#[derive(Debug)]
pub struct OpenRouterTransport {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    timeout_secs: u64,
}

impl OpenRouterTransport {
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the API key is missing,
    /// a header value is malformed, or the HTTP client cannot be built.
    pub fn new(config: &OpenRouterConfig) -> LlmResult<Self> {
        config.validate()?;

        Ok(Self {
            client: http::build_client(PROVIDER, config.request_timeout_secs())?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            headers: build_headers(config)?,
            timeout_secs: config.request_timeout_secs(),
        })
    }
}

fn header_value(name: &str, value: &str) -> LlmResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| LlmError::configuration_error(format!("Invalid {name} header value: {e}")))
}

pub(super) fn build_headers(config: &OpenRouterConfig) -> LlmResult<HeaderMap> {
    let api_key = config
        .api_key()
        .ok_or_else(|| LlmError::configuration_error("OpenRouter API key is required"))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        header_value("Authorization", &format!("Bearer {api_key}"))?,
    );
    if let Some(url) = config.app_url.as_deref() {
        headers.insert("HTTP-Referer", header_value("HTTP-Referer", url)?);
    }
    if let Some(title) = config.app_title.as_deref() {
        headers.insert("X-Title", header_value("X-Title", title)?);
    }
    Ok(headers)
}

#[async_trait::async_trait]
impl MessagesTransport for OpenRouterTransport {
    async fn send(
        &self,
        payload: &RequestPayload,
        _mode: &TransportMode,
    ) -> LlmResult<ProviderReply> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = conversion::to_openai_request(payload);

        log_debug!(
            provider = PROVIDER,
            request_json = %serde_json::to_string(&request).unwrap_or_default(),
            "Network request JSON"
        );

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| http::map_send_error(PROVIDER, &url, self.timeout_secs, e))?;

        let raw_body = http::read_json_response(PROVIDER, response).await?;
        conversion::into_reply(raw_body)
    }
}
