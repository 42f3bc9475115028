//! LLM provider implementations
//!
//! - **anthropic**: Anthropic Claude with native Messages API and prompt caching
//! - **openrouter**: OpenRouter through its OpenAI-compatible API
//!
//! Both handlers delegate turns to a shared `session`, so the cache
//! bookkeeping is identical regardless of provider; they differ only in model
//! catalog and transport.

pub mod anthropic;
mod http;
pub mod openrouter;
mod session;

pub use anthropic::{AnthropicHandler, AnthropicTransport};
pub use openrouter::{OpenRouterHandler, OpenRouterTransport};
