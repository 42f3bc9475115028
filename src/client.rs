//! Handler factory
//!
//! Maps a [`HandlerConfig`] to the concrete handler for its provider.

use crate::config::{ApiProvider, HandlerConfig};
use crate::core_types::provider::ApiHandler;
use crate::error::LlmResult;
use crate::logging::log_info;
use crate::providers::{AnthropicHandler, OpenRouterHandler};

/// Build the handler selected by `config`.
///
/// An unrecognized or missing provider identifier selects the Anthropic
/// handler rather than failing, so a typo in the configuration silently
/// changes provider. The fallback is logged at warn level.
///
/// # Errors
///
/// Returns [`crate::LlmError::ConfigurationError`] if the selected provider's
/// credentials are missing or its HTTP client cannot be built.
pub fn build_api_handler(config: &HandlerConfig) -> LlmResult<Box<dyn ApiHandler>> {
    let provider = config.api_provider();
    let model_id = config.model_id.as_deref();

    let handler: Box<dyn ApiHandler> = match provider {
        ApiProvider::Anthropic => Box::new(AnthropicHandler::new(&config.anthropic, model_id)?),
        ApiProvider::OpenRouter => {
            Box::new(OpenRouterHandler::new(&config.openrouter, model_id)?)
        }
    };

    log_info!(
        requested_provider = config.provider.as_deref().unwrap_or("<unset>"),
        provider = handler.provider_name(),
        model = handler.get_model().id,
        "API handler created"
    );

    Ok(handler)
}
