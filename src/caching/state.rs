//! Per-conversation record of the prefix already sent to the provider cache

use crate::core_types::messages::Message;
use crate::error::{LlmError, LlmResult};

/// Messages already incorporated into the provider's cache.
///
/// The recorded sequence is always a prefix of the conversation the caller
/// supplies. Comparison is by position only: callers must never rewrite or
/// reorder history that was already sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheState {
    cached: Vec<Message>,
}

impl CacheState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of `conversation` that follow the recorded prefix.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::PreconditionViolation`] if `conversation` is shorter
    /// than the recorded prefix. The state is not modified.
    pub fn diff_new<'a>(&self, conversation: &'a [Message]) -> LlmResult<&'a [Message]> {
        let cached = self.cached.len();
        if conversation.len() < cached {
            return Err(LlmError::precondition_violation(cached, conversation.len()));
        }
        Ok(&conversation[cached..])
    }

    /// Append messages that the provider just accepted.
    ///
    /// Call once per successful turn, never for failed or cancelled ones.
    pub fn commit(&mut self, sent: &[Message]) {
        self.cached.extend_from_slice(sent);
    }

    pub fn cached(&self) -> &[Message] {
        &self.cached
    }

    pub fn len(&self) -> usize {
        self.cached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cached.is_empty()
    }
}
