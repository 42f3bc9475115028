//! OpenRouter provider implementation
//!
//! Speaks the OpenAI-compatible chat completions API. Payloads are assembled
//! in Messages form by the dispatcher and converted here.

mod conversion;
mod provider;
mod transport;
mod types;

#[cfg(test)]
mod tests;

pub use provider::OpenRouterHandler;
pub use transport::OpenRouterTransport;
