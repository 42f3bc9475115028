use crate::error::{LlmError, LlmResult};
use crate::logging::{log_debug, log_warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Trait for provider-specific configuration
pub trait ProviderConfig: Send + Sync + Debug {
    /// Validate provider configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if required fields such as the
    /// API key are missing or empty.
    fn validate(&self) -> LlmResult<()>;

    /// Get the base URL for API calls
    fn base_url(&self) -> &str;

    /// Get the API key if set
    fn api_key(&self) -> Option<&str>;

    /// Transport timeout for a single request
    fn request_timeout_secs(&self) -> u64;
}

fn validate_api_key(api_key: Option<&str>, provider: &str) -> LlmResult<()> {
    match api_key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(LlmError::configuration_error(format!(
            "{provider} API key is required"
        ))),
    }
}

/// Anthropic-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig for AnthropicConfig {
    fn validate(&self) -> LlmResult<()> {
        validate_api_key(self.api_key(), "Anthropic")
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}

/// OpenRouter-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution
    pub app_url: Option<String>,
    /// Sent as `X-Title` for OpenRouter app attribution
    pub app_title: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            app_url: None,
            app_title: None,
        }
    }
}

impl ProviderConfig for OpenRouterConfig {
    fn validate(&self) -> LlmResult<()> {
        validate_api_key(self.api_key(), "OpenRouter")
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}

/// Supported provider backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    /// Designated fallback for unknown or missing identifiers
    #[default]
    Anthropic,
    OpenRouter,
}

impl ApiProvider {
    /// Parse a provider identifier, case-insensitively. `None` if unknown.
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier.trim().to_lowercase().as_str() {
            "anthropic" => Some(Self::Anthropic),
            "openrouter" => Some(Self::OpenRouter),
            _ => None,
        }
    }

    /// Resolve a configured identifier, falling back to the default provider.
    ///
    /// Misconfiguration is not an error here: an unrecognized identifier
    /// silently selects [`ApiProvider::Anthropic`] (with a warning in the log).
    pub fn from_identifier(identifier: Option<&str>) -> Self {
        match identifier {
            Some(id) => Self::parse(id).unwrap_or_else(|| {
                log_warn!(
                    requested_provider = %id,
                    fallback_provider = %Self::default(),
                    "Unrecognized provider identifier, using default provider"
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

impl std::fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiProvider::Anthropic => write!(f, "anthropic"),
            ApiProvider::OpenRouter => write!(f, "openrouter"),
        }
    }
}

/// Configuration record consumed by the handler factory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Provider identifier, e.g. "anthropic" or "openrouter"
    pub provider: Option<String>,
    /// Model identifier within the provider's catalog
    pub model_id: Option<String>,
    pub anthropic: AnthropicConfig,
    pub openrouter: OpenRouterConfig,
}

impl HandlerConfig {
    /// Provider selected by this configuration, after default fallback
    pub fn api_provider(&self) -> ApiProvider {
        ApiProvider::from_identifier(self.provider.as_deref())
    }

    /// Load configuration from environment variables
    ///
    /// Reads `API_PROVIDER`, `API_MODEL_ID`, `ANTHROPIC_API_KEY`,
    /// `ANTHROPIC_BASE_URL`, `OPENROUTER_API_KEY` and `OPENROUTER_BASE_URL`.
    /// Missing variables keep their defaults; nothing is validated until a
    /// handler is built.
    pub fn from_env() -> Self {
        let mut config = Self {
            provider: std::env::var("API_PROVIDER").ok(),
            model_id: std::env::var("API_MODEL_ID").ok(),
            ..Self::default()
        };

        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            config.anthropic.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("ANTHROPIC_BASE_URL") {
            config.anthropic.base_url = base_url;
        }
        if let Ok(api_key) = std::env::var("OPENROUTER_API_KEY") {
            config.openrouter.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("OPENROUTER_BASE_URL") {
            config.openrouter.base_url = base_url;
        }

        log_debug!(
            provider = config.provider.as_deref().unwrap_or("<unset>"),
            model_id = config.model_id.as_deref().unwrap_or("<unset>"),
            has_anthropic_key = config.anthropic.api_key.is_some(),
            has_openrouter_key = config.openrouter.api_key.is_some(),
            "Loaded handler configuration from environment"
        );

        config
    }

    /// Create configuration from parsed key/value section data
    ///
    /// Recognized keys: `provider`, `model`, `anthropic_api_key`,
    /// `anthropic_base_url`, `openrouter_api_key`, `openrouter_base_url`,
    /// `request_timeout_secs`. Unparseable timeouts keep the default.
    pub fn from_section(section: &HashMap<String, String>) -> Self {
        let mut config = Self {
            provider: section.get("provider").cloned(),
            model_id: section.get("model").cloned(),
            ..Self::default()
        };

        if let Some(key) = section.get("anthropic_api_key") {
            config.anthropic.api_key = Some(key.clone());
        }
        if let Some(url) = section.get("anthropic_base_url") {
            config.anthropic.base_url = url.clone();
        }
        if let Some(key) = section.get("openrouter_api_key") {
            config.openrouter.api_key = Some(key.clone());
        }
        if let Some(url) = section.get("openrouter_base_url") {
            config.openrouter.base_url = url.clone();
        }
        if let Some(timeout) = Self::parse_param::<u64>(section, "request_timeout_secs") {
            config.anthropic.request_timeout_secs = timeout;
            config.openrouter.request_timeout_secs = timeout;
        }

        config
    }

    fn parse_param<T: std::str::FromStr>(
        section: &HashMap<String, String>,
        key: &str,
    ) -> Option<T> {
        section.get(key).and_then(|s| s.parse::<T>().ok())
    }
}
