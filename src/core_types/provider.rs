//! Handler trait and types for LLM abstraction
//!
//! Defines the `ApiHandler` trait that every provider implements, the tool
//! definitions carried in requests, and the response returned to callers.

use crate::catalog::ModelDescriptor;
use crate::core_types::messages::{ContentBlock, Message};
use crate::dispatch::{RequestPayload, TransportMode};
use crate::error::LlmResult;
use serde::{Deserialize, Serialize};

/// Tool definition for LLM operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// Tool name - must be unique within a request
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema defining the tool's input parameters
    pub input_schema: serde_json::Value,
}

/// Tool choice strategy. Requests always let the model decide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    /// Let the model decide whether and which tools to use
    #[default]
    Auto,
}

/// Token usage reported by the provider, including cache statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// Tokens written to the prompt cache on this call
    #[serde(default)]
    pub cache_creation_input_tokens: u32,
    /// Tokens served from the prompt cache on this call
    #[serde(default)]
    pub cache_read_input_tokens: u32,
}

/// Structured reply from a transport, before cost accounting
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    /// Assistant content, normalized to content blocks
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Option<TokenUsage>,
    /// Raw response body for inspection
    pub raw_body: serde_json::Value,
}

/// Response returned to the caller of [`ApiHandler::create_message`]
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Option<TokenUsage>,
    /// Rough cost in USD derived from the model's pricing table
    pub cost_usd: Option<f64>,
    pub raw_body: serde_json::Value,
}

impl Response {
    /// Concatenated text of the assistant reply
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The reply as an assistant message, ready to append to history
    pub fn to_message(&self) -> Message {
        Message::with_blocks(
            crate::core_types::messages::MessageRole::Assistant,
            self.content.clone(),
        )
    }
}

/// Outcome of the optional pre-send review step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Cancel,
}

/// Caller hook that inspects an assembled payload before it is sent.
///
/// Use it for confirmation prompts or request logging. A `Cancel` decision
/// surfaces as [`crate::LlmError::Cancelled`] and leaves the cache state
/// untouched.
#[async_trait::async_trait]
pub trait RequestReviewer: Send + Sync {
    async fn review(&self, payload: &RequestPayload, mode: &TransportMode) -> ReviewDecision;
}

/// Trait for LLM providers to implement
///
/// Every implementation owns the cache state for one conversation. Calls on
/// the same handler are serialized: a turn holds the state from diffing
/// through commit.
#[async_trait::async_trait]
pub trait ApiHandler: Send + Sync {
    /// Send one turn.
    ///
    /// `messages` is the full conversation so far. Only the suffix not yet
    /// cached is treated as new; the state advances only if the provider call
    /// succeeds.
    async fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> LlmResult<Response>;

    /// Descriptor of the model this handler targets
    fn get_model(&self) -> ModelDescriptor;

    /// Get provider name for logging and debugging
    fn provider_name(&self) -> &'static str;
}
