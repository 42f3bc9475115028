//! Test helper utilities shared by the unit test modules
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::core_types::messages::{ContentBlock, Message, MessageRole};
use crate::core_types::provider::{
    ProviderReply, RequestReviewer, ReviewDecision, TokenUsage, Tool,
};
use crate::dispatch::{RequestPayload, TransportMode};
use crate::error::LlmResult;
use crate::transport::MessagesTransport;
use std::sync::Mutex;

/// Build a tool definition with a trivial schema
pub fn test_tool(name: &str) -> Tool {
    Tool {
        name: name.to_string(),
        description: format!("Test tool {name}"),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "required": ["path"]
        }),
    }
}

/// Successful text reply as a transport would return it
pub fn text_reply(text: &str) -> ProviderReply {
    ProviderReply {
        content: vec![ContentBlock::text(text)],
        model: "test-model".to_string(),
        stop_reason: Some("end_turn".to_string()),
        usage: Some(TokenUsage {
            input_tokens: 100,
            output_tokens: 20,
            cache_creation_input_tokens: 0,
            cache_read_input_tokens: 0,
        }),
        raw_body: serde_json::json!({ "content": [{ "type": "text", "text": text }] }),
    }
}

/// Three-message history: user, assistant, user
pub fn three_turn_history() -> Vec<Message> {
    vec![
        Message::user("List the files in src"),
        Message::assistant("Which directory do you mean?"),
        Message::user("The project root"),
    ]
}

/// User message made of explicit blocks
pub fn user_blocks(texts: &[&str]) -> Message {
    Message::with_blocks(
        MessageRole::User,
        texts.iter().map(|text| ContentBlock::text(*text)).collect(),
    )
}

/// Total cache markers across all messages of a payload
pub fn marker_count(messages: &[Message]) -> usize {
    messages.iter().map(Message::cache_marker_count).sum()
}

/// Reviewer that always returns the same decision and remembers what it saw
#[derive(Debug)]
pub struct FixedReviewer {
    decision: ReviewDecision,
    seen: Mutex<Vec<(RequestPayload, TransportMode)>>,
}

impl FixedReviewer {
    pub fn new(decision: ReviewDecision) -> Self {
        Self {
            decision,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn reviewed(&self) -> Vec<(RequestPayload, TransportMode)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RequestReviewer for FixedReviewer {
    async fn review(&self, payload: &RequestPayload, mode: &TransportMode) -> ReviewDecision {
        self.seen
            .lock()
            .unwrap()
            .push((payload.clone(), mode.clone()));
        self.decision
    }
}

/// Transport that never completes, for dropping a turn mid-flight
#[derive(Debug)]
pub struct StalledTransport;

#[async_trait::async_trait]
impl MessagesTransport for StalledTransport {
    async fn send(
        &self,
        _payload: &RequestPayload,
        _mode: &TransportMode,
    ) -> LlmResult<ProviderReply> {
        std::future::pending::<()>().await;
        Ok(text_reply("unreachable"))
    }
}
