//! Core types for the provider-agnostic request builder
//!
//! ## Organization
//! - `messages` - Conversation messages, content blocks and cache markers
//! - `provider` - Handler trait, tools, usage and responses

pub mod messages;
pub mod provider;

pub use messages::{CacheControl, ContentBlock, ImageSource, Message, MessageContent, MessageRole};
pub use provider::{
    ApiHandler, ProviderReply, RequestReviewer, Response, ReviewDecision, TokenUsage, Tool,
    ToolChoice,
};
