//! Request shape selection and turn execution
//!
//! Two mutually exclusive request shapes exist, chosen from the model
//! descriptor alone:
//!
//! - **Cached**: system prompt as one marked text block, full history with the
//!   cache boundary from [`annotate`], `anthropic-beta` header when the model
//!   requires one.
//! - **Plain**: system prompt as one unmarked block and only the messages that
//!   are new this turn.

use crate::caching::{annotate, strip_cache_markers, CacheState};
use crate::catalog::ModelDescriptor;
use crate::core_types::messages::{CacheControl, Message};
use crate::core_types::provider::{
    ProviderReply, RequestReviewer, ReviewDecision, Tool, ToolChoice,
};
use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use crate::transport::MessagesTransport;
use serde::Serialize;

/// Sampling temperature for every request; low for predictable tool use.
pub const REQUEST_TEMPERATURE: f32 = 0.2;

/// System prompt block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemBlock {
    #[serde(rename = "type")]
    pub block_type: String, // "text"
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,
}

/// Messages API request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system: Vec<SystemBlock>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    /// Present whenever tools are supplied; always `auto`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

/// Which call path the transport must use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportMode {
    /// Caching-capable path, with the model's beta header if it needs one
    Cached { beta_header: Option<String> },
    Plain,
}

impl TransportMode {
    pub fn is_cached(&self) -> bool {
        matches!(self, TransportMode::Cached { .. })
    }

    pub fn beta_header(&self) -> Option<&str> {
        match self {
            TransportMode::Cached { beta_header } => beta_header.as_deref(),
            TransportMode::Plain => None,
        }
    }
}

/// An assembled request and the path it must travel
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub payload: RequestPayload,
    pub mode: TransportMode,
}

/// One turn's input as supplied by the caller
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    pub system_prompt: &'a str,
    /// Full conversation so far, including already cached messages
    pub conversation: &'a [Message],
    pub tools: &'a [Tool],
}

/// Assemble the payload for one turn. Pure: same input, same payload.
pub fn build_request(
    system_prompt: &str,
    prior_cached: &[Message],
    new_messages: &[Message],
    tools: &[Tool],
    descriptor: &ModelDescriptor,
) -> DispatchPlan {
    let (system, messages, mode) = if descriptor.supports_caching {
        (
            system_block(system_prompt, Some(CacheControl::ephemeral())),
            annotate(prior_cached, new_messages),
            TransportMode::Cached {
                beta_header: descriptor.required_beta_header.map(str::to_string),
            },
        )
    } else {
        (
            system_block(system_prompt, None),
            new_messages
                .iter()
                .cloned()
                .map(strip_cache_markers)
                .collect(),
            TransportMode::Plain,
        )
    };

    let payload = RequestPayload {
        model: descriptor.id.to_string(),
        max_tokens: descriptor.max_tokens,
        temperature: REQUEST_TEMPERATURE,
        system: vec![system],
        messages,
        tools: tools.to_vec(),
        tool_choice: (!tools.is_empty()).then_some(ToolChoice::Auto),
    };

    DispatchPlan { payload, mode }
}

/// Run one turn against `state`: diff, build, review, send, commit.
///
/// The state advances by the new messages only, and only after the transport
/// succeeds. Precondition, review and transport errors all return before the
/// commit, so a retried turn recomputes the same suffix.
pub async fn dispatch_turn(
    state: &mut CacheState,
    transport: &dyn MessagesTransport,
    reviewer: Option<&dyn RequestReviewer>,
    turn: Turn<'_>,
    descriptor: &ModelDescriptor,
) -> LlmResult<ProviderReply> {
    let new_messages = state.diff_new(turn.conversation)?;
    let plan = build_request(
        turn.system_prompt,
        state.cached(),
        new_messages,
        turn.tools,
        descriptor,
    );

    let shape = if plan.mode.is_cached() { "cached" } else { "plain" };
    log_debug!(
        model = descriptor.id,
        shape = shape,
        cached_messages = state.len(),
        new_messages = new_messages.len(),
        sent_messages = plan.payload.messages.len(),
        "Request assembled"
    );

    if let Some(reviewer) = reviewer {
        if reviewer.review(&plan.payload, &plan.mode).await == ReviewDecision::Cancel {
            return Err(LlmError::Cancelled);
        }
    }

    let reply = transport.send(&plan.payload, &plan.mode).await?;
    state.commit(new_messages);

    log_debug!(
        model = descriptor.id,
        cached_messages = state.len(),
        "Cache state advanced"
    );

    Ok(reply)
}

fn system_block(system_prompt: &str, cache_control: Option<CacheControl>) -> SystemBlock {
    SystemBlock {
        block_type: "text".to_string(),
        text: system_prompt.to_string(),
        cache_control,
    }
}
