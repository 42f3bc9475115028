//! Cache boundary placement
//!
//! Exactly one message carries cache markers: the last user message of the
//! combined sequence. Everything before it, including earlier assistant
//! turns, is covered by the provider's prefix cache; the marker moves forward
//! each turn so the previous boundary becomes a cache read.

use crate::core_types::messages::{CacheControl, ContentBlock, Message, MessageContent};

/// Build the message list for a cached request.
///
/// Returns `prior_cached` followed by `new_messages` with every block of the
/// last user message marked ephemeral. Markers anywhere else are removed. If
/// there is no user message, nothing is marked.
///
/// Empty text blocks in that message are marked like any other block. The
/// Messages API rejects empty text content, so callers must not send a user
/// message with empty text.
pub fn annotate(prior_cached: &[Message], new_messages: &[Message]) -> Vec<Message> {
    let mut combined: Vec<Message> = prior_cached
        .iter()
        .chain(new_messages)
        .cloned()
        .map(strip_cache_markers)
        .collect();

    if let Some(target) = combined.iter_mut().rev().find(|msg| msg.is_user()) {
        mark_message(target);
    }

    combined
}

/// Remove every cache marker from a message, leaving its content shape alone.
pub fn strip_cache_markers(mut message: Message) -> Message {
    if let MessageContent::Blocks(blocks) = &mut message.content {
        for block in blocks.iter_mut() {
            block.set_cache_control(None);
        }
    }
    message
}

fn mark_message(message: &mut Message) {
    let content = std::mem::replace(&mut message.content, MessageContent::Blocks(Vec::new()));
    let blocks: Vec<ContentBlock> = content
        .into_blocks()
        .into_iter()
        .map(|mut block| {
            block.set_cache_control(Some(CacheControl::ephemeral()));
            block
        })
        .collect();
    message.content = MessageContent::Blocks(blocks);
}
