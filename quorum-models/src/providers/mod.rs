//! Model provider trait and implementations.
//!
//! The [`ModelProvider`] trait is the single contract every hosted API adapter
//! satisfies. Adapters never fail outward: configuration problems and call
//! failures are both rendered into the returned string.
//!
//! # Example
//!
//! ```ignore
//! use quorum_models::providers::{ModelProvider, OpenAiProvider};
//! use quorum_models::GenerationOptions;
//!
//! async fn ask(provider: &dyn ModelProvider) {
//!     let text = provider
//!         .generate_response("Hello!", GenerationOptions::default())
//!         .await;
//!     println!("{}: {}", provider.model_name(), text);
//! }
//! ```

mod anthropic;
mod cohere;
mod gemini;
mod huggingface;
mod openai;

use async_trait::async_trait;
use tracing::{debug, warn};

pub use anthropic::AnthropicProvider;
pub use cohere::CohereProvider;
pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

use crate::auth::{ApiKey, has_valid_key};
use crate::{Error, GenerationOptions, ProviderKind, Result};

/// Trait for hosted text-generation providers.
///
/// # Required Methods
///
/// - [`id`](ModelProvider::id) - Registry name (e.g., "openai")
/// - [`is_available`](ModelProvider::is_available) - Whether a usable credential is held
/// - [`generate_response`](ModelProvider::generate_response) - One prompt, one reply
/// - [`model_name`](ModelProvider::model_name) - Display name, e.g. "OpenAI gpt-3.5-turbo"
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the registry name (e.g., "anthropic", "huggingface").
    fn id(&self) -> &str;

    /// Whether the stored credential is present and not the placeholder.
    ///
    /// Never touches the network.
    fn is_available(&self) -> bool;

    /// Generate text for `prompt`.
    ///
    /// Returns the vendor's text verbatim on success. When unavailable, returns
    /// `"Error: <Vendor> API key not configured"` without any request. Any call
    /// failure is returned as `"Error generating response from <Label>: <detail>"`.
    async fn generate_response(&self, prompt: &str, options: GenerationOptions) -> String;

    /// Returns `"<Vendor> <model id>"`.
    fn model_name(&self) -> String;
}

/// Message returned when a provider has no usable credential.
pub fn not_configured_message(kind: ProviderKind) -> String {
    format!("Error: {}", Error::NotConfigured(kind.vendor().to_string()))
}

/// Message returned when a configured provider's call fails.
pub fn generation_failed_message(kind: ProviderKind, err: &Error) -> String {
    format!("Error generating response from {}: {}", kind.error_label(), err)
}

/// State shared by every adapter: identity, model, credential and client.
///
/// The HTTP client exists if and only if the credential passed validation
/// when the adapter was built.
#[derive(Debug, Clone)]
pub(crate) struct ProviderCore {
    kind: ProviderKind,
    model: String,
    api_key: Option<ApiKey>,
    base_url: String,
    http: Option<reqwest::Client>,
}

impl ProviderCore {
    pub(crate) fn new(kind: ProviderKind, api_key: Option<ApiKey>) -> Self {
        let http = has_valid_key(api_key.as_ref()).then(reqwest::Client::new);
        Self {
            kind,
            model: kind.default_model().to_string(),
            api_key,
            base_url: kind.default_base_url().to_string(),
            http,
        }
    }

    pub(crate) fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub(crate) fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub(crate) fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn is_available(&self) -> bool {
        has_valid_key(self.api_key.as_ref())
    }

    pub(crate) fn model_name(&self) -> String {
        format!("{} {}", self.kind.vendor(), self.model)
    }

    /// Client and key for a request, or `NotConfigured`.
    pub(crate) fn connection(&self) -> Result<(&reqwest::Client, &ApiKey)> {
        match (&self.http, &self.api_key) {
            (Some(http), Some(key)) => {
                debug!(provider = self.kind.id(), model = %self.model, "sending generation request");
                Ok((http, key))
            }
            _ => Err(Error::NotConfigured(self.kind.vendor().to_string())),
        }
    }

    /// Collapse a call outcome into the contract's single string channel.
    pub(crate) fn render(&self, outcome: Result<String>) -> String {
        match outcome {
            Ok(text) => text,
            Err(Error::NotConfigured(_)) => not_configured_message(self.kind),
            Err(err) => {
                warn!(provider = self.kind.id(), error = %err, "generation failed");
                generation_failed_message(self.kind, &err)
            }
        }
    }
}

/// Implements [`ModelProvider`] for an adapter holding a `core: ProviderCore`
/// field and an inherent `complete(&self, &str, GenerationOptions) -> Result<String>`.
macro_rules! impl_model_provider {
    ($provider:ty) => {
        #[async_trait::async_trait]
        impl $crate::providers::ModelProvider for $provider {
            fn id(&self) -> &str {
                self.core.kind().id()
            }

            fn is_available(&self) -> bool {
                self.core.is_available()
            }

            async fn generate_response(
                &self,
                prompt: &str,
                options: $crate::GenerationOptions,
            ) -> String {
                if !self.core.is_available() {
                    return $crate::providers::not_configured_message(self.core.kind());
                }
                self.core.render(self.complete(prompt, options).await)
            }

            fn model_name(&self) -> String {
                self.core.model_name()
            }
        }
    };
}

pub(crate) use impl_model_provider;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_without_key_has_no_client() {
        let core = ProviderCore::new(ProviderKind::Cohere, None);
        assert!(!core.is_available());
        assert!(core.http.is_none());
        assert!(matches!(core.connection(), Err(Error::NotConfigured(_))));
    }

    #[test]
    fn core_with_valid_key_builds_client() {
        let core = ProviderCore::new(ProviderKind::Cohere, Some(ApiKey::new("co-key")));
        assert!(core.is_available());
        assert!(core.http.is_some());
        assert_eq!(core.model(), "command");
        assert_eq!(core.base_url(), "https://api.cohere.ai");
    }

    #[test]
    fn core_with_placeholder_key_has_no_client() {
        let core = ProviderCore::new(
            ProviderKind::OpenAi,
            Some(ApiKey::new(crate::auth::PLACEHOLDER_API_KEY)),
        );
        assert!(!core.is_available());
        assert!(core.http.is_none());
    }

    #[test]
    fn render_passes_text_through_untouched() {
        let core = ProviderCore::new(ProviderKind::OpenAi, Some(ApiKey::new("sk")));
        assert_eq!(core.render(Ok("  spaced  ".to_string())), "  spaced  ");
    }

    #[test]
    fn render_formats_failures_with_label() {
        let core = ProviderCore::new(ProviderKind::Gemini, Some(ApiKey::new("g")));
        let rendered = core.render(Err(Error::Request("connection refused".to_string())));
        assert_eq!(
            rendered,
            "Error generating response from Gemini: request failed: connection refused"
        );
    }

    #[test]
    fn not_configured_message_uses_vendor() {
        assert_eq!(
            not_configured_message(ProviderKind::Gemini),
            "Error: Google API key not configured"
        );
        assert_eq!(
            not_configured_message(ProviderKind::OpenAi),
            "Error: OpenAI API key not configured"
        );
    }

    #[test]
    fn model_name_is_vendor_and_model() {
        let mut core = ProviderCore::new(ProviderKind::HuggingFace, None);
        assert_eq!(
            core.model_name(),
            "Hugging Face meta-llama/Llama-2-7b-chat-hf"
        );
        core.set_model("mistralai/Mistral-7B-Instruct-v0.2");
        assert_eq!(
            core.model_name(),
            "Hugging Face mistralai/Mistral-7B-Instruct-v0.2"
        );
    }
}
