//! Anthropic API response type definitions
//!
//! Requests are sent as [`crate::dispatch::RequestPayload`] directly; it
//! already uses the Messages API field names.

use crate::core_types::messages::ContentBlock;
use serde::{Deserialize, Serialize};

/// Anthropic Messages API response structure
///
/// Only the fields the reply needs; `id`, `role` and `type` are ignored.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub(super) struct AnthropicResponse {
    pub content: Vec<ContentBlock>,
    pub model: String,
    #[serde(default)]
    pub stop_reason: Option<String>,
    pub usage: AnthropicUsage,
}

/// Anthropic usage information with cache statistics
#[derive(Debug, Deserialize, Serialize, Clone)]
pub(super) struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u32>,
    #[serde(default)]
    pub cache_read_input_tokens: Option<u32>,
}
