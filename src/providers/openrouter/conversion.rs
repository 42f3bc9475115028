//! Conversion between the Messages payload and OpenAI chat completions

use super::types::{
    OpenAIContent, OpenAIContentPart, OpenAIFunctionDef, OpenAIImageUrl, OpenAIMessage,
    OpenAIRequest, OpenAIResponse, OpenAITool, OpenAIToolCall, OpenAIToolFunction,
};
use crate::core_types::messages::{ContentBlock, Message, MessageContent, MessageRole};
use crate::core_types::provider::{ProviderReply, TokenUsage, Tool, ToolChoice};
use crate::dispatch::{RequestPayload, SystemBlock};
use crate::error::{LlmError, LlmResult};

/// Convert an assembled payload to an OpenAI chat completion request.
///
/// Cache markers have no OpenAI equivalent and are dropped.
pub(super) fn to_openai_request(payload: &RequestPayload) -> OpenAIRequest {
    let mut messages: Vec<OpenAIMessage> = system_message(&payload.system).into_iter().collect();
    for message in &payload.messages {
        messages.extend(convert_message(message));
    }

    OpenAIRequest {
        model: payload.model.clone(),
        messages,
        max_tokens: payload.max_tokens,
        temperature: payload.temperature,
        tools: (!payload.tools.is_empty())
            .then(|| payload.tools.iter().map(convert_tool).collect()),
        tool_choice: payload.tool_choice.as_ref().map(convert_tool_choice),
    }
}

fn system_message(blocks: &[SystemBlock]) -> Option<OpenAIMessage> {
    let text = blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        return None;
    }
    Some(text_message("system", OpenAIContent::Text(text)))
}

fn text_message(role: &str, content: OpenAIContent) -> OpenAIMessage {
    OpenAIMessage {
        role: role.to_string(),
        content: Some(content),
        tool_calls: None,
        tool_call_id: None,
    }
}

fn convert_message(message: &Message) -> Vec<OpenAIMessage> {
    match (&message.role, &message.content) {
        (MessageRole::User, MessageContent::Text(text)) => {
            vec![text_message("user", OpenAIContent::Text(text.clone()))]
        }
        (MessageRole::Assistant, MessageContent::Text(text)) => {
            vec![text_message("assistant", OpenAIContent::Text(text.clone()))]
        }
        (MessageRole::User, MessageContent::Blocks(blocks)) => convert_user_blocks(blocks),
        (MessageRole::Assistant, MessageContent::Blocks(blocks)) => {
            vec![convert_assistant_blocks(blocks)]
        }
    }
}

/// Tool results become `tool` messages ahead of the remaining user content,
/// so they directly follow the assistant message that issued the calls.
fn convert_user_blocks(blocks: &[ContentBlock]) -> Vec<OpenAIMessage> {
    let mut converted = Vec::new();
    let mut parts = Vec::new();
    let mut has_image = false;

    for block in blocks {
        match block {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
                ..
            } => {
                let content = if is_error.unwrap_or(false) {
                    format!("Error: {content}")
                } else {
                    content.clone()
                };
                converted.push(OpenAIMessage {
                    role: "tool".to_string(),
                    content: Some(OpenAIContent::Text(content)),
                    tool_calls: None,
                    tool_call_id: Some(tool_use_id.clone()),
                });
            }
            ContentBlock::Text { text, .. } => {
                parts.push(OpenAIContentPart::Text { text: text.clone() });
            }
            ContentBlock::Image { source, .. } => {
                has_image = true;
                parts.push(OpenAIContentPart::ImageUrl {
                    image_url: OpenAIImageUrl {
                        url: format!("data:{};base64,{}", source.media_type, source.data),
                    },
                });
            }
            ContentBlock::ToolUse { .. } => {}
        }
    }

    if parts.is_empty() {
        return converted;
    }

    let content = if has_image {
        OpenAIContent::Parts(parts)
    } else {
        OpenAIContent::Text(
            parts
                .iter()
                .filter_map(|part| match part {
                    OpenAIContentPart::Text { text } => Some(text.as_str()),
                    OpenAIContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };
    converted.push(text_message("user", content));
    converted
}

fn convert_assistant_blocks(blocks: &[ContentBlock]) -> OpenAIMessage {
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text, .. } => texts.push(text.as_str()),
            ContentBlock::ToolUse {
                id, name, input, ..
            } => tool_calls.push(OpenAIToolCall {
                id: id.clone(),
                call_type: "function".to_string(),
                function: OpenAIToolFunction {
                    name: name.clone(),
                    arguments: input.to_string(),
                },
            }),
            ContentBlock::Image { .. } | ContentBlock::ToolResult { .. } => {}
        }
    }

    OpenAIMessage {
        role: "assistant".to_string(),
        content: (!texts.is_empty()).then(|| OpenAIContent::Text(texts.join("\n"))),
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
        tool_call_id: None,
    }
}

fn convert_tool(tool: &Tool) -> OpenAITool {
    OpenAITool {
        tool_type: "function".to_string(),
        function: OpenAIFunctionDef {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.input_schema.clone(),
        },
    }
}

fn convert_tool_choice(choice: &ToolChoice) -> serde_json::Value {
    match choice {
        ToolChoice::Auto => serde_json::json!("auto"),
    }
}

/// Convert a chat completion response into a provider reply
pub(super) fn into_reply(raw_body: serde_json::Value) -> LlmResult<ProviderReply> {
    let api_response: OpenAIResponse = serde_json::from_value(raw_body.clone()).map_err(|e| {
        LlmError::response_parsing_error(format!("Invalid OpenRouter response: {e}"))
    })?;

    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::response_parsing_error("OpenRouter response has no choices"))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content.filter(|text| !text.is_empty()) {
        content.push(ContentBlock::text(text));
    }
    for call in choice.message.tool_calls.unwrap_or_default() {
        let input = parse_tool_arguments(&call.function.name, &call.function.arguments)?;
        content.push(ContentBlock::tool_use(call.id, call.function.name, input));
    }

    Ok(ProviderReply {
        content,
        model: api_response.model.unwrap_or_default(),
        stop_reason: choice.finish_reason,
        usage: api_response.usage.map(|usage| TokenUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            ..TokenUsage::default()
        }),
        raw_body,
    })
}

/// Blank arguments mean a call without parameters; anything else must be JSON.
fn parse_tool_arguments(tool_name: &str, arguments: &str) -> LlmResult<serde_json::Value> {
    if arguments.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(arguments).map_err(|e| {
        LlmError::response_parsing_error(format!(
            "Invalid arguments for tool call {tool_name}: {e}"
        ))
    })
}
