//! Transport collaborator boundary
//!
//! A transport issues an assembled [`RequestPayload`] to one provider's HTTP
//! API and returns the structured reply. Transports own timeouts and wire
//! details; they never touch cache state and never retry.

use crate::core_types::provider::ProviderReply;
use crate::dispatch::{RequestPayload, TransportMode};
use crate::error::LlmResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MessagesTransport: Send + Sync {
    /// Send one request. Errors propagate to the caller unchanged.
    async fn send(
        &self,
        payload: &RequestPayload,
        mode: &TransportMode,
    ) -> LlmResult<ProviderReply>;
}
