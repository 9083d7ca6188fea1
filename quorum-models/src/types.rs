//! Core types shared by the adapters and the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling temperature used when a caller does not supply one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Output length limit used when a caller does not supply one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// The five supported hosted providers, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions.
    OpenAi,
    /// Anthropic messages.
    Anthropic,
    /// Google Gemini `generateContent`.
    Gemini,
    /// Cohere chat.
    Cohere,
    /// Hugging Face hosted inference.
    HuggingFace,
}

impl ProviderKind {
    /// Every provider, in the fixed order the registry uses.
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Gemini,
        ProviderKind::Cohere,
        ProviderKind::HuggingFace,
    ];

    /// Registry name (e.g., "openai", "huggingface").
    pub fn id(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Cohere => "cohere",
            ProviderKind::HuggingFace => "huggingface",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_var(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
            ProviderKind::Cohere => "COHERE_API_KEY",
            ProviderKind::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }

    /// Vendor name shown in model names and credential notices.
    pub fn vendor(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Gemini => "Google",
            ProviderKind::Cohere => "Cohere",
            ProviderKind::HuggingFace => "Hugging Face",
        }
    }

    /// Name used in "Error generating response from ..." messages.
    ///
    /// Differs from [`vendor`](Self::vendor) only for Gemini, which is
    /// reported by product name rather than by company.
    pub fn error_label(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            other => other.vendor(),
        }
    }

    /// Model used when no override is configured.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-3.5-turbo",
            ProviderKind::Anthropic => "claude-3-haiku-20240307",
            ProviderKind::Gemini => "gemini-pro",
            ProviderKind::Cohere => "command",
            ProviderKind::HuggingFace => "meta-llama/Llama-2-7b-chat-hf",
        }
    }

    /// Public API root for this provider.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
            ProviderKind::Cohere => "https://api.cohere.ai",
            ProviderKind::HuggingFace => "https://api-inference.huggingface.co",
        }
    }

    /// Look up a provider by its registry name.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-call generation parameters.
///
/// Unset fields fall back to [`DEFAULT_TEMPERATURE`] and [`DEFAULT_MAX_TOKENS`].
///
/// # Examples
///
/// ```
/// use quorum_models::GenerationOptions;
///
/// let opts = GenerationOptions::new().temperature(0.9).max_tokens(100);
/// assert_eq!(opts.resolved_temperature(), 0.9);
/// assert_eq!(opts.resolved_max_tokens(), 100);
///
/// let defaults = GenerationOptions::default();
/// assert_eq!(defaults.resolved_max_tokens(), 1000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Temperature to send, applying the default.
    pub fn resolved_temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Output limit to send, applying the default.
    pub fn resolved_max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}
