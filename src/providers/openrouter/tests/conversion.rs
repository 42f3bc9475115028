//! Unit Tests for OpenRouter Conversion
//!
//! UNIT UNDER TEST: to_openai_request, into_reply
//!
//! BUSINESS RESPONSIBILITY:
//!   - Translates assembled Messages payloads into chat completion requests
//!   - Maps tool calls and tool results between the two formats
//!   - Parses chat completion responses into content blocks
//!
//! TEST COVERAGE:
//!   - System prompt placement and empty system prompts
//!   - Tool results emitted as tool messages ahead of user text
//!   - Assistant tool calls with serialized arguments
//!   - Image blocks as data URLs
//!   - Tool choice mapping
//!   - Response parsing for text, tool calls, usage and error cases

use super::super::conversion::{into_reply, to_openai_request};
use crate::catalog::OPENROUTER_MODELS;
use crate::core_types::messages::{ContentBlock, Message, MessageRole};
use crate::core_types::provider::{Tool, ToolChoice};
use crate::dispatch::{build_request, RequestPayload};
use crate::error::LlmError;
use serde_json::json;

fn payload(system: &str, messages: &[Message], tools: &[Tool]) -> RequestPayload {
    build_request(
        system,
        &[],
        messages,
        tools,
        &OPENROUTER_MODELS.default_model(),
    )
    .payload
}

fn read_file_tool() -> Tool {
    Tool {
        name: "read_file".to_string(),
        description: "Read a file".to_string(),
        input_schema: json!({ "type": "object" }),
    }
}

// ============================================================================
// Request conversion tests
// ============================================================================

#[test]
fn test_system_prompt_becomes_leading_system_message() {
    let request = to_openai_request(&payload("Be terse.", &[Message::user("Hi")], &[]));

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], "anthropic/claude-3.5-sonnet");
    assert_eq!(
        value["messages"],
        json!([
            { "role": "system", "content": "Be terse." },
            { "role": "user", "content": "Hi" }
        ])
    );
    assert!(value.get("tools").is_none());
    assert!(value.get("tool_choice").is_none());
}

#[test]
fn test_empty_system_prompt_is_omitted() {
    let request = to_openai_request(&payload("", &[Message::user("Hi")], &[]));

    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
}

#[test]
fn test_tool_round_trip_messages() {
    let messages = vec![
        Message::user("Open Cargo.toml"),
        Message::with_blocks(
            MessageRole::Assistant,
            vec![
                ContentBlock::text("Reading it."),
                ContentBlock::tool_use("call_1", "read_file", json!({ "path": "Cargo.toml" })),
            ],
        ),
        Message::with_blocks(
            MessageRole::User,
            vec![
                ContentBlock::tool_result("call_1", "no such file", true),
                ContentBlock::text("What now?"),
            ],
        ),
    ];

    let request = to_openai_request(&payload("sys", &messages, &[read_file_tool()]));

    let value = serde_json::to_value(&request).unwrap();
    let converted = value["messages"].as_array().unwrap();
    assert_eq!(converted.len(), 5);
    assert_eq!(converted[2]["content"], "Reading it.");
    assert_eq!(converted[2]["tool_calls"][0]["id"], "call_1");
    assert_eq!(converted[2]["tool_calls"][0]["type"], "function");
    assert_eq!(
        converted[2]["tool_calls"][0]["function"]["arguments"],
        r#"{"path":"Cargo.toml"}"#
    );
    assert_eq!(
        converted[3],
        json!({ "role": "tool", "content": "Error: no such file", "tool_call_id": "call_1" })
    );
    assert_eq!(converted[4], json!({ "role": "user", "content": "What now?" }));
    assert_eq!(value["tool_choice"], "auto");
    assert_eq!(value["tools"][0]["function"]["name"], "read_file");
}

#[test]
fn test_image_blocks_become_data_urls() {
    let message = Message::with_blocks(
        MessageRole::User,
        vec![
            ContentBlock::text("What is this?"),
            ContentBlock::image("image/png", "iVBORw0KGgo="),
        ],
    );

    let request = to_openai_request(&payload("sys", &[message], &[]));

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value["messages"][1]["content"],
        json!([
            { "type": "text", "text": "What is this?" },
            { "type": "image_url", "image_url": { "url": "data:image/png;base64,iVBORw0KGgo=" } }
        ])
    );
}

#[test]
fn test_auto_tool_choice_maps_to_openai_auto() {
    let request_payload = payload("sys", &[Message::user("Hi")], &[read_file_tool()]);

    assert_eq!(request_payload.tool_choice, Some(ToolChoice::Auto));
    assert_eq!(
        to_openai_request(&request_payload).tool_choice,
        Some(json!("auto"))
    );
}

// ============================================================================
// Response conversion tests
// ============================================================================

#[test]
fn test_into_reply_parses_text_and_usage() {
    let body = json!({
        "id": "gen-1",
        "model": "anthropic/claude-3.5-sonnet",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello there" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 }
    });

    let reply = into_reply(body).unwrap();

    assert_eq!(reply.content, vec![ContentBlock::text("Hello there")]);
    assert_eq!(reply.stop_reason.as_deref(), Some("stop"));
    let usage = reply.usage.unwrap();
    assert_eq!(usage.input_tokens, 9);
    assert_eq!(usage.output_tokens, 3);
    assert_eq!(usage.cache_read_input_tokens, 0);
}

#[test]
fn test_into_reply_parses_tool_calls() {
    let body = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_9",
                    "type": "function",
                    "function": { "name": "read_file", "arguments": "{\"path\":\"README.md\"}" }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    });

    let reply = into_reply(body).unwrap();

    assert_eq!(
        reply.content,
        vec![ContentBlock::tool_use("call_9", "read_file", json!({ "path": "README.md" }))]
    );
    assert!(reply.usage.is_none());
}

#[test]
fn test_into_reply_without_choices_fails() {
    let result = into_reply(json!({ "choices": [] }));

    match result {
        Err(LlmError::ResponseParsingError { message }) => {
            assert!(message.contains("no choices"));
        }
        other => panic!("expected parsing error, got {other:?}"),
    }
}

#[test]
fn test_into_reply_rejects_invalid_tool_arguments() {
    let body = json!({
        "choices": [{
            "message": {
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "read_file", "arguments": "{not json" }
                }]
            }
        }]
    });

    assert!(matches!(
        into_reply(body),
        Err(LlmError::ResponseParsingError { .. })
    ));
}

#[test]
fn test_into_reply_treats_blank_tool_arguments_as_empty_object() {
    let body = json!({
        "choices": [{
            "message": {
                "tool_calls": [
                    {
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "list_files", "arguments": "" }
                    },
                    {
                        "id": "call_2",
                        "type": "function",
                        "function": { "name": "git_status", "arguments": "  " }
                    }
                ]
            },
            "finish_reason": "tool_calls"
        }]
    });

    let reply = into_reply(body).unwrap();

    assert_eq!(
        reply.content,
        vec![
            ContentBlock::tool_use("call_1", "list_files", json!({})),
            ContentBlock::tool_use("call_2", "git_status", json!({})),
        ]
    );
}
