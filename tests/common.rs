//! Test helper utilities for prompt-cache-llm integration tests
//!
//! Shared fixtures for the HTTP-level tests that run handlers against a
//! wiremock server.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use prompt_cache_llm::{AnthropicConfig, OpenRouterConfig, Tool};
use serde_json::{json, Value};
use wiremock::ResponseTemplate;

pub const ANTHROPIC_TEST_KEY: &str = "sk-ant-integration";
pub const OPENROUTER_TEST_KEY: &str = "sk-or-integration";

/// Anthropic configuration pointing at a mock server
pub fn anthropic_config(base_url: &str) -> AnthropicConfig {
    AnthropicConfig {
        api_key: Some(ANTHROPIC_TEST_KEY.to_string()),
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
    }
}

/// OpenRouter configuration pointing at a mock server
pub fn openrouter_config(base_url: &str) -> OpenRouterConfig {
    OpenRouterConfig {
        api_key: Some(OPENROUTER_TEST_KEY.to_string()),
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        app_url: None,
        app_title: None,
    }
}

/// Successful Messages API body with cache statistics
pub fn anthropic_text_body(text: &str) -> Value {
    json!({
        "id": "msg_integration",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
        "model": "claude-3-5-sonnet-20240620",
        "stop_reason": "end_turn",
        "usage": {
            "input_tokens": 25,
            "output_tokens": 10,
            "cache_creation_input_tokens": 1500,
            "cache_read_input_tokens": 0
        }
    })
}

/// Successful chat completions body
pub fn openrouter_text_body(text: &str) -> Value {
    json!({
        "id": "gen-integration",
        "model": "anthropic/claude-3.5-sonnet",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25 }
    })
}

/// Provider error body in the shared `{"error": {...}}` shape
pub fn error_response(status: u16, error_type: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "type": "error",
        "error": { "type": error_type, "message": message }
    }))
}

pub fn list_files_tool() -> Tool {
    Tool {
        name: "list_files".to_string(),
        description: "List files in a directory".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"]
        }),
    }
}
