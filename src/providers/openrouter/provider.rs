//! OpenRouter handler implementation

use super::transport::OpenRouterTransport;
use crate::catalog::{ModelDescriptor, OPENROUTER_MODELS};
use crate::config::OpenRouterConfig;
use crate::core_types::messages::Message;
use crate::core_types::provider::{ApiHandler, RequestReviewer, Response, Tool};
use crate::dispatch::Turn;
use crate::error::LlmResult;
use crate::logging::log_debug;
use crate::providers::session::ConversationSession;
use crate::transport::MessagesTransport;
use std::sync::Arc;

/// OpenRouter handler
///
/// None of the catalog's OpenRouter models are flagged for caching, so turns
/// use the plain shape and send only the messages that are new.
pub struct OpenRouterHandler {
    session: ConversationSession,
    transport: Box<dyn MessagesTransport>,
}

impl std::fmt::Debug for OpenRouterHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterHandler")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl OpenRouterHandler {
    /// Create a handler talking to the OpenRouter HTTP API
    ///
    /// # Errors
    ///
    /// Returns [`crate::LlmError::ConfigurationError`] if the API key is
    /// missing or the HTTP client cannot be built.
    pub fn new(config: &OpenRouterConfig, model_id: Option<&str>) -> LlmResult<Self> {
        let transport = OpenRouterTransport::new(config)?;
        let model = OPENROUTER_MODELS.resolve(model_id);

        log_debug!(
            provider = "openrouter",
            requested_model = model_id.unwrap_or("<default>"),
            model = model.id,
            "OpenRouter handler initialized"
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

    /// Number of messages recorded as sent for this conversation
    pub async fn cached_message_count(&self) -> usize {
        self.session.cached_message_count().await
    }

    pub fn session_id(&self) -> uuid::Uuid {
        self.session.session_id()
    }
}

#[async_trait::async_trait]
impl ApiHandler for OpenRouterHandler {
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
        "openrouter"
    }
}
