//! Static model catalogs
//!
//! Each provider has a catalog mapping model identifiers to capability
//! descriptors. Request shape and headers are chosen from the descriptor's
//! fields, never from the identifier, so adding a model only means adding a
//! row here.

use crate::core_types::provider::TokenUsage;
use serde::Serialize;

const PROMPT_CACHING_BETA: &str = "prompt-caching-2024-07-31";
const SONNET_35_BETA: &str = "prompt-caching-2024-07-31,max-tokens-3-5-sonnet-2024-07-15";

/// Per-million-token prices in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPricing {
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
    pub cache_write_per_mtok: Option<f64>,
    pub cache_read_per_mtok: Option<f64>,
}

impl ModelPricing {
    /// Rough USD cost of a call. Not token-accurate.
    pub fn estimate_cost(&self, usage: &TokenUsage) -> f64 {
        let per_token = |tokens: u32, rate: f64| f64::from(tokens) * rate / 1_000_000.0;

        per_token(usage.input_tokens, self.input_per_mtok)
            + per_token(usage.output_tokens, self.output_per_mtok)
            + per_token(
                usage.cache_creation_input_tokens,
                self.cache_write_per_mtok.unwrap_or(self.input_per_mtok),
            )
            + per_token(
                usage.cache_read_input_tokens,
                self.cache_read_per_mtok.unwrap_or(self.input_per_mtok),
            )
    }
}

/// Capability record for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub max_tokens: u32,
    pub supports_caching: bool,
    /// Value for the `anthropic-beta` header on the caching call path
    pub required_beta_header: Option<&'static str>,
    pub pricing: ModelPricing,
}

/// A provider's model table plus its fallback entry
#[derive(Debug)]
pub struct ModelCatalog {
    models: &'static [ModelDescriptor],
    default_id: &'static str,
}

impl ModelCatalog {
    /// Look up `requested_id`; unknown or absent ids get the default descriptor.
    pub fn resolve(&self, requested_id: Option<&str>) -> ModelDescriptor {
        requested_id
            .and_then(|id| self.find(id))
            .unwrap_or_else(|| self.default_model())
    }

    pub fn find(&self, id: &str) -> Option<ModelDescriptor> {
        self.models.iter().find(|model| model.id == id).copied()
    }

    pub fn default_model(&self) -> ModelDescriptor {
        self.models
            .iter()
            .find(|model| model.id == self.default_id)
            .copied()
            .unwrap_or(self.models[0])
    }

    pub fn models(&self) -> &'static [ModelDescriptor] {
        self.models
    }
}

/// Resolve against the Anthropic catalog, the crate's default provider.
pub fn resolve(requested_id: Option<&str>) -> ModelDescriptor {
    ANTHROPIC_MODELS.resolve(requested_id)
}

pub static ANTHROPIC_MODELS: ModelCatalog = ModelCatalog {
    default_id: "claude-3-5-sonnet-20240620",
    models: &[
        ModelDescriptor {
            id: "claude-3-5-sonnet-20240620",
            max_tokens: 8192,
            supports_caching: true,
            required_beta_header: Some(SONNET_35_BETA),
            pricing: ModelPricing {
                input_per_mtok: 3.0,
                output_per_mtok: 15.0,
                cache_write_per_mtok: Some(3.75),
                cache_read_per_mtok: Some(0.3),
            },
        },
        ModelDescriptor {
            id: "claude-3-opus-20240229",
            max_tokens: 4096,
            supports_caching: true,
            required_beta_header: Some(PROMPT_CACHING_BETA),
            pricing: ModelPricing {
                input_per_mtok: 15.0,
                output_per_mtok: 75.0,
                cache_write_per_mtok: Some(18.75),
                cache_read_per_mtok: Some(1.5),
            },
        },
        ModelDescriptor {
            id: "claude-3-haiku-20240307",
            max_tokens: 4096,
            supports_caching: true,
            required_beta_header: Some(PROMPT_CACHING_BETA),
            pricing: ModelPricing {
                input_per_mtok: 0.25,
                output_per_mtok: 1.25,
                cache_write_per_mtok: Some(0.3),
                cache_read_per_mtok: Some(0.03),
            },
        },
        ModelDescriptor {
            id: "claude-3-sonnet-20240229",
            max_tokens: 4096,
            supports_caching: false,
            required_beta_header: None,
            pricing: ModelPricing {
                input_per_mtok: 3.0,
                output_per_mtok: 15.0,
                cache_write_per_mtok: None,
                cache_read_per_mtok: None,
            },
        },
    ],
};

pub static OPENROUTER_MODELS: ModelCatalog = ModelCatalog {
    default_id: "anthropic/claude-3.5-sonnet",
    models: &[
        ModelDescriptor {
            id: "anthropic/claude-3.5-sonnet",
            max_tokens: 8192,
            supports_caching: false,
            required_beta_header: None,
            pricing: ModelPricing {
                input_per_mtok: 3.0,
                output_per_mtok: 15.0,
                cache_write_per_mtok: None,
                cache_read_per_mtok: None,
            },
        },
        ModelDescriptor {
            id: "anthropic/claude-3-opus",
            max_tokens: 4096,
            supports_caching: false,
            required_beta_header: None,
            pricing: ModelPricing {
                input_per_mtok: 15.0,
                output_per_mtok: 75.0,
                cache_write_per_mtok: None,
                cache_read_per_mtok: None,
            },
        },
        ModelDescriptor {
            id: "anthropic/claude-3-haiku",
            max_tokens: 4096,
            supports_caching: false,
            required_beta_header: None,
            pricing: ModelPricing {
                input_per_mtok: 0.25,
                output_per_mtok: 1.25,
                cache_write_per_mtok: None,
                cache_read_per_mtok: None,
            },
        },
        ModelDescriptor {
            id: "openai/gpt-4o",
            max_tokens: 4096,
            supports_caching: false,
            required_beta_header: None,
            pricing: ModelPricing {
                input_per_mtok: 5.0,
                output_per_mtok: 15.0,
                cache_write_per_mtok: None,
                cache_read_per_mtok: None,
            },
        },
        ModelDescriptor {
            id: "openai/gpt-4o-mini",
            max_tokens: 16_384,
            supports_caching: false,
            required_beta_header: None,
            pricing: ModelPricing {
                input_per_mtok: 0.15,
                output_per_mtok: 0.6,
                cache_write_per_mtok: None,
                cache_read_per_mtok: None,
            },
        },
    ],
};
