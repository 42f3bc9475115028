//! HTTP transport for the Anthropic Messages API

use super::types::AnthropicResponse;
use crate::config::{AnthropicConfig, ProviderConfig};
use crate::core_types::provider::{ProviderReply, TokenUsage};
use crate::dispatch::{RequestPayload, TransportMode};
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use crate::providers::http;
use crate::transport::MessagesTransport;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

const PROVIDER: &str = "anthropic";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sends payloads to `{base_url}/v1/messages`
#[derive(Debug)]
pub struct AnthropicTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl AnthropicTransport {
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the API key is missing or
    /// the HTTP client cannot be built.
    pub fn new(config: &AnthropicConfig) -> LlmResult<Self> {
        config.validate()?;
        let api_key = config
            .api_key()
            .ok_or_else(|| LlmError::configuration_error("Anthropic API key is required"))?
            .to_string();

        Ok(Self {
            client: http::build_client(PROVIDER, config.request_timeout_secs())?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key,
            timeout_secs: config.request_timeout_secs(),
        })
    }

    /// Headers required by Anthropic API, plus the beta header on the cached path
    pub(super) fn build_headers(&self, mode: &TransportMode) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).map_err(|e| {
                LlmError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

        if let Some(beta) = mode.beta_header() {
            headers.insert(
                "anthropic-beta",
                HeaderValue::from_str(beta).map_err(|e| {
                    LlmError::configuration_error(format!("Invalid beta header {beta}: {e}"))
                })?,
            );
        }

        Ok(headers)
    }
}

/// Convert a parsed Messages API response into a provider reply
pub(super) fn into_reply(raw_body: serde_json::Value) -> LlmResult<ProviderReply> {
    let api_response: AnthropicResponse = serde_json::from_value(raw_body.clone())
        .map_err(|e| LlmError::response_parsing_error(format!("Invalid Anthropic response: {e}")))?;

    let usage = TokenUsage {
        input_tokens: api_response.usage.input_tokens,
        output_tokens: api_response.usage.output_tokens,
        cache_creation_input_tokens: api_response
            .usage
            .cache_creation_input_tokens
            .unwrap_or(0),
        cache_read_input_tokens: api_response.usage.cache_read_input_tokens.unwrap_or(0),
    };

    Ok(ProviderReply {
        content: api_response.content,
        model: api_response.model,
        stop_reason: api_response.stop_reason,
        usage: Some(usage),
        raw_body,
    })
}

#[async_trait::async_trait]
impl MessagesTransport for AnthropicTransport {
    async fn send(
        &self,
        payload: &RequestPayload,
        mode: &TransportMode,
    ) -> LlmResult<ProviderReply> {
        let url = format!("{}/v1/messages", self.base_url);
        let headers = self.build_headers(mode)?;

        log_debug!(
            provider = PROVIDER,
            beta = mode.beta_header().unwrap_or("<none>"),
            request_json = %serde_json::to_string(payload).unwrap_or_default(),
            "Network request JSON"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| http::map_send_error(PROVIDER, &url, self.timeout_secs, e))?;

        let raw_body = http::read_json_response(PROVIDER, response).await?;
        into_reply(raw_body)
    }
}
