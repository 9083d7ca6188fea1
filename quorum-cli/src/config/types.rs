use quorum_models::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationOptions, ProviderKind};
use serde::{Deserialize, Serialize};

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawQuorumConfig {
    #[serde(default)]
    pub generation: RawGenerationConfig,

    #[serde(default)]
    pub models: ModelsConfigSection,
}

/// Generation defaults as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawGenerationConfig {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuorumConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub models: ModelsConfigSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature sent with every prompt
    pub temperature: f64,

    /// Output length limit sent with every prompt
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl GenerationConfig {
    /// Options for a call, with optional per-invocation overrides
    pub fn options(&self, temperature: Option<f64>, max_tokens: Option<u32>) -> GenerationOptions {
        GenerationOptions::new()
            .temperature(temperature.unwrap_or(self.temperature))
            .max_tokens(max_tokens.unwrap_or(self.max_tokens))
    }
}

/// Per-provider model id overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelsConfigSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohere: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub huggingface: Option<String>,
}

impl ModelsConfigSection {
    /// Override for one provider, if set
    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_deref(),
            ProviderKind::Anthropic => self.anthropic.as_deref(),
            ProviderKind::Gemini => self.gemini.as_deref(),
            ProviderKind::Cohere => self.cohere.as_deref(),
            ProviderKind::HuggingFace => self.huggingface.as_deref(),
        }
    }
}
