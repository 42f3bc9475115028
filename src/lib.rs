//! # prompt-cache-llm
//!
//! Provider-agnostic request builder for conversational LLM APIs with
//! incremental prompt caching.
//!
//! ## Key Features
//!
//! - **Incremental turns**: callers pass the full history every turn; only the
//!   suffix not yet cached is treated as new
//! - **Cache boundaries**: the last user message carries the cache marker so
//!   each turn reads the previous turn's prefix from the provider cache
//! - **Per-model request shapes**: caching and beta headers are driven by the
//!   model catalog, not by model names in code
//! - **Multiple providers**: Anthropic and OpenRouter behind one trait
//!
//! ## Example
//!
//! ```rust,no_run
//! use prompt_cache_llm::{build_api_handler, ApiHandler, HandlerConfig, Message};
//!
//! # async fn example() -> Result<(), prompt_cache_llm::LlmError> {
//! let config = HandlerConfig {
//!     provider: Some("anthropic".to_string()),
//!     model_id: Some("claude-3-5-sonnet-20240620".to_string()),
//!     ..HandlerConfig::from_env()
//! };
//! let handler = build_api_handler(&config)?;
//!
//! let mut history = vec![Message::user("Hello, how are you?")];
//! let response = handler.create_message("You are terse.", &history, &[]).await?;
//! history.push(response.to_message());
//! # Ok(())
//! # }
//! ```

pub mod caching;
pub mod catalog;
pub mod client;
pub mod config;
pub mod core_types;
pub mod dispatch;
pub mod error;
pub(crate) mod logging;
pub mod providers;
pub mod transport;

#[cfg(test)]
mod tests;

pub use caching::{annotate, CacheState};
pub use catalog::{resolve, ModelCatalog, ModelDescriptor, ModelPricing};
pub use client::build_api_handler;
pub use config::{AnthropicConfig, ApiProvider, HandlerConfig, OpenRouterConfig, ProviderConfig};
pub use core_types::{
    ApiHandler, CacheControl, ContentBlock, Message, MessageContent, MessageRole, ProviderReply,
    RequestReviewer, Response, ReviewDecision, TokenUsage, Tool, ToolChoice,
};
pub use dispatch::{build_request, DispatchPlan, RequestPayload, TransportMode};
pub use error::{LlmError, LlmResult};
pub use providers::{AnthropicHandler, OpenRouterHandler};
pub use transport::MessagesTransport;
