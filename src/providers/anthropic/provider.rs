//! Anthropic handler implementation

use super::transport::AnthropicTransport;
use crate::catalog::{ModelDescriptor, ANTHROPIC_MODELS};
use crate::config::AnthropicConfig;
use crate::core_types::messages::Message;
use crate::core_types::provider::{ApiHandler, RequestReviewer, Response, Tool};
use crate::dispatch::Turn;
use crate::error::LlmResult;
use crate::logging::log_debug;
use crate::providers::session::ConversationSession;
use crate::transport::MessagesTransport;
use std::sync::Arc;

/// Anthropic Claude handler
///
/// Uses the cached request shape for every model whose descriptor supports
/// prompt caching, and the plain shape otherwise.
pub struct AnthropicHandler {
    session: ConversationSession,
    transport: Box<dyn MessagesTransport>,
}

impl std::fmt::Debug for AnthropicHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicHandler")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AnthropicHandler {
    /// Create a handler talking to the Anthropic HTTP API
    ///
    /// An unknown or absent `model_id` resolves to the catalog default.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LlmError::ConfigurationError`] if the API key is
    /// missing or the HTTP client cannot be built.
    pub fn new(config: &AnthropicConfig, model_id: Option<&str>) -> LlmResult<Self> {
        let transport = AnthropicTransport::new(config)?;
        let model = ANTHROPIC_MODELS.resolve(model_id);

        log_debug!(
            provider = "anthropic",
            requested_model = model_id.unwrap_or("<default>"),
            model = model.id,
            supports_caching = model.supports_caching,
            "Anthropic handler initialized"
        );

        Ok(Self::with_transport(model, Box::new(transport)))
    }

    /// Create a handler over any transport
    pub fn with_transport(model: ModelDescriptor, transport: Box<dyn MessagesTransport>) -> Self {
        Self {
            session: ConversationSession::new(model),
            transport,
        }
    }

    /// Attach a hook that reviews each payload before it is sent
    pub fn with_reviewer(mut self, reviewer: Arc<dyn RequestReviewer>) -> Self {
        self.session.set_reviewer(reviewer);
        self
    }

    /// Number of messages recorded as cached for this conversation
    pub async fn cached_message_count(&self) -> usize {
        self.session.cached_message_count().await
    }

    pub fn session_id(&self) -> uuid::Uuid {
        self.session.session_id()
    }
}

#[async_trait::async_trait]
impl ApiHandler for AnthropicHandler {
    async fn create_message(
        &self,
        system_prompt: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> LlmResult<Response> {
        let turn = Turn {
            system_prompt,
            conversation: messages,
            tools,
        };
        self.session
            .run(self.provider_name(), self.transport.as_ref(), turn)
            .await
    }

    fn get_model(&self) -> ModelDescriptor {
        self.session.model()
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}
