//! Per-handler conversation session
//!
//! Owns the cache state for one conversation and runs turns against it. The
//! state lives behind an async mutex held for the whole turn, so concurrent
//! calls on one handler queue up instead of racing between diff and commit.

use crate::caching::CacheState;
use crate::catalog::ModelDescriptor;
use crate::core_types::provider::{RequestReviewer, Response};
use crate::dispatch::{dispatch_turn, Turn};
use crate::error::LlmResult;
use crate::logging::log_debug;
use crate::transport::MessagesTransport;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub(crate) struct ConversationSession {
    session_id: Uuid,
    model: ModelDescriptor,
    state: Mutex<CacheState>,
    reviewer: Option<Arc<dyn RequestReviewer>>,
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("session_id", &self.session_id)
            .field("model", &self.model.id)
            .field("has_reviewer", &self.reviewer.is_some())
            .finish_non_exhaustive()
    }
}

impl ConversationSession {
    pub(crate) fn new(model: ModelDescriptor) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            model,
            state: Mutex::new(CacheState::new()),
            reviewer: None,
        }
    }

    pub(crate) fn set_reviewer(&mut self, reviewer: Arc<dyn RequestReviewer>) {
        self.reviewer = Some(reviewer);
    }

    pub(crate) fn model(&self) -> ModelDescriptor {
        self.model
    }

    pub(crate) fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub(crate) async fn cached_message_count(&self) -> usize {
        self.state.lock().await.len()
    }

    pub(crate) async fn run(
        &self,
        provider: &'static str,
        transport: &dyn MessagesTransport,
        turn: Turn<'_>,
    ) -> LlmResult<Response> {
        let mut state = self.state.lock().await;
        let reply = dispatch_turn(
            &mut state,
            transport,
            self.reviewer.as_deref(),
            turn,
            &self.model,
        )
        .await?;

        let cost_usd = reply
            .usage
            .as_ref()
            .map(|usage| self.model.pricing.estimate_cost(usage));

        if let Some(usage) = reply.usage.as_ref() {
            log_debug!(
                provider = provider,
                session_id = %self.session_id,
                model = %reply.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                cache_creation_input_tokens = usage.cache_creation_input_tokens,
                cache_read_input_tokens = usage.cache_read_input_tokens,
                cost_usd = cost_usd.unwrap_or_default(),
                "Turn completed"
            );
        }

        Ok(Response {
            content: reply.content,
            model: reply.model,
            stop_reason: reply.stop_reason,
            usage: reply.usage,
            cost_usd,
            raw_body: reply.raw_body,
        })
    }
}
