//! Unit Tests for OpenRouter Transport Headers
//!
//! UNIT UNDER TEST: build_headers, OpenRouterTransport::new
//!
//! BUSINESS RESPONSIBILITY:
//!   - Authenticates with a bearer token
//!   - Sends optional app attribution headers
//!   - Refuses to build without credentials
//!
//! TEST COVERAGE:
//!   - Bearer authorization and content type
//!   - Attribution headers present only when configured
//!   - Missing key and malformed header values

use super::super::transport::{build_headers, OpenRouterTransport};
use crate::config::OpenRouterConfig;
use crate::error::LlmError;

fn config() -> OpenRouterConfig {
    OpenRouterConfig {
        api_key: Some("sk-or-test".to_string()),
        ..OpenRouterConfig::default()
    }
}

#[test]
fn test_bearer_authorization_header() {
    let headers = build_headers(&config()).unwrap();

    assert_eq!(headers["authorization"], "Bearer sk-or-test");
    assert_eq!(headers["content-type"], "application/json");
    assert!(headers.get("http-referer").is_none());
    assert!(headers.get("x-title").is_none());
}

#[test]
fn test_attribution_headers_when_configured() {
    let config = OpenRouterConfig {
        app_url: Some("https://example.org/agent".to_string()),
        app_title: Some("Cache Demo".to_string()),
        ..config()
    };

    let headers = build_headers(&config).unwrap();

    assert_eq!(headers["http-referer"], "https://example.org/agent");
    assert_eq!(headers["x-title"], "Cache Demo");
}

#[test]
fn test_control_characters_in_header_value_are_rejected() {
    let config = OpenRouterConfig {
        app_title: Some("bad\ntitle".to_string()),
        ..config()
    };

    assert!(matches!(
        build_headers(&config),
        Err(LlmError::ConfigurationError { .. })
    ));
}

#[test]
fn test_new_without_api_key_fails() {
    let result = OpenRouterTransport::new(&OpenRouterConfig::default());

    assert!(matches!(result, Err(LlmError::ConfigurationError { .. })));
}
