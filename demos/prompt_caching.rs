//! Incremental prompt caching across a multi-turn conversation.
//!
//! Each turn passes the full history. The handler sends the cached request
//! shape, moves the cache boundary to the newest user message, and reports
//! cache writes and reads in the usage statistics.
//!
//! Anthropic only caches prefixes above a minimum size (1,024 tokens for
//! Claude 3.5 Sonnet, 2,048 for Claude 3 Haiku). Below that the request
//! succeeds but both cache counters stay at zero.
//!
//! # Running
//!
//! ```bash
//! export ANTHROPIC_API_KEY="sk-ant-..."
//! cargo run --example prompt_caching
//! ```
//!
//! Set `API_PROVIDER=openrouter` and `OPENROUTER_API_KEY` to compare with the
//! plain request shape.

use async_trait::async_trait;
use prompt_cache_llm::{
    AnthropicHandler, ApiHandler, ApiProvider, HandlerConfig, Message, OpenRouterHandler,
    RequestPayload, RequestReviewer, Response, ReviewDecision, TransportMode,
};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a release engineer for a Rust workspace. \
Answer in at most three sentences and name the exact cargo commands involved.";

const QUESTIONS: &[&str] = &[
    "How do I publish the workspace crates in dependency order?",
    "What should I check before tagging the release?",
    "How do I yank a version that shipped with a bug?",
];

/// Prints the shape of every request before it goes out
struct ShapePrinter;

#[async_trait]
impl RequestReviewer for ShapePrinter {
    async fn review(&self, payload: &RequestPayload, mode: &TransportMode) -> ReviewDecision {
        let markers: usize = payload.messages.iter().map(Message::cache_marker_count).sum();
        println!(
            "  -> {} request, {} messages, {} cache markers, beta: {}",
            if mode.is_cached() { "cached" } else { "plain" },
            payload.messages.len(),
            markers,
            mode.beta_header().unwrap_or("none"),
        );
        ReviewDecision::Approve
    }
}

fn print_usage(response: &Response) {
    if let Some(usage) = response.usage {
        println!(
            "  <- input {}, output {}, cache write {}, cache read {}, ~${:.5}",
            usage.input_tokens,
            usage.output_tokens,
            usage.cache_creation_input_tokens,
            usage.cache_read_input_tokens,
            response.cost_usd.unwrap_or_default(),
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = HandlerConfig::from_env();
    let model_id = config.model_id.as_deref();
    let reviewer = Arc::new(ShapePrinter);

    let handler: Box<dyn ApiHandler> = match config.api_provider() {
        ApiProvider::OpenRouter => {
            Box::new(OpenRouterHandler::new(&config.openrouter, model_id)?.with_reviewer(reviewer))
        }
        ApiProvider::Anthropic => {
            Box::new(AnthropicHandler::new(&config.anthropic, model_id)?.with_reviewer(reviewer))
        }
    };
    let model = handler.get_model();
    println!(
        "Provider: {}, model: {} (caching: {})",
        handler.provider_name(),
        model.id,
        model.supports_caching
    );

    let mut history = Vec::new();
    for question in QUESTIONS {
        println!("\nUser: {question}");
        history.push(Message::user(*question));

        let response = handler.create_message(SYSTEM_PROMPT, &history, &[]).await?;
        print_usage(&response);
        println!("Assistant: {}", response.text());

        history.push(response.to_message());
    }

    Ok(())
}
