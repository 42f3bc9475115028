//! Anthropic Claude provider implementation
//!
//! Uses Anthropic's native Messages API; the cached request shape goes out
//! with the model's `anthropic-beta` header.
//!
//! ## Module Organization
//!
//! - `types`: Response structures for Anthropic API
//! - `transport`: HTTP transport for `/v1/messages`
//! - `provider`: Handler implementation

mod provider;
mod transport;
mod types;

#[cfg(test)]
mod tests;

pub use provider::AnthropicHandler;
pub use transport::AnthropicTransport;
