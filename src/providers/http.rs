//! HTTP plumbing shared by the provider transports
//!
//! Maps reqwest failures and non-success statuses onto [`LlmError`] and reads
//! successful bodies as JSON. Failures are logged here, at the transport
//! boundary; the core above only propagates them.

use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_error};
use std::time::Duration;

/// Build a reqwest client with the configured per-request timeout
pub(crate) fn build_client(provider: &str, timeout_secs: u64) -> LlmResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            LlmError::configuration_error(format!("Failed to build {provider} HTTP client: {e}"))
        })
}

/// Map a send-side reqwest error
pub(crate) fn map_send_error(
    provider: &str,
    url: &str,
    timeout_secs: u64,
    error: reqwest::Error,
) -> LlmError {
    log_error!(
        provider = provider,
        url = %url,
        error = %error,
        "HTTP request failed"
    );
    if error.is_timeout() {
        LlmError::timeout(timeout_secs)
    } else {
        LlmError::request_failed(
            format!("{provider} request failed: {error}"),
            Some(Box::new(error)),
        )
    }
}

/// Read a response: JSON body on success, mapped error otherwise
pub(crate) async fn read_json_response(
    provider: &str,
    response: reqwest::Response,
) -> LlmResult<serde_json::Value> {
    if !response.status().is_success() {
        return Err(handle_error_response(provider, response).await);
    }

    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            provider = provider,
            error = %e,
            "Failed to read response body"
        );
        LlmError::response_parsing_error(format!("Failed to read {provider} response: {e}"))
    })?;

    log_debug!(
        provider = provider,
        response_json = %raw_body,
        "Network response JSON"
    );

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            provider = provider,
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        LlmError::response_parsing_error(format!("Invalid {provider} response: {e}"))
    })
}

/// Check if error JSON indicates auth failure
pub(crate) fn is_auth_error(error_json: &serde_json::Value) -> bool {
    error_json
        .get("error")
        .and_then(|obj| obj.get("type"))
        .and_then(|t| t.as_str())
        .map(|error_type| {
            error_type.contains("authentication") || error_type.contains("invalid_api_key")
        })
        .unwrap_or(false)
}

/// Provider error message from `{"error": {"message": ...}}`, else the raw text
pub(crate) fn error_message(error_text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(error_text)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|obj| obj.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| error_text.to_string())
}

/// Extract retry-after value from headers
pub(crate) fn extract_retry_after(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get("retry-after")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

async fn handle_error_response(provider: &str, response: reqwest::Response) -> LlmError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log_error!(
        provider = provider,
        status = %status,
        error_text = %error_text,
        "Provider API error"
    );

    match status.as_u16() {
        401 => {
            let detail = serde_json::from_str::<serde_json::Value>(&error_text)
                .ok()
                .filter(is_auth_error)
                .map(|_| error_message(&error_text))
                .unwrap_or_else(|| format!("{provider} authentication failed"));
            LlmError::authentication_failed(detail)
        }
        429 => LlmError::rate_limit_exceeded(extract_retry_after(&headers)),
        _ => LlmError::request_failed(
            format!(
                "{provider} API error {status}: {}",
                error_message(&error_text)
            ),
            None,
        ),
    }
}
