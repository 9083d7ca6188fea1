//! Provider registry and chat-by-name dispatch.
//!
//! The registry owns one adapter per provider, in fixed order, and a derived
//! list of the ones holding usable credentials. It is built once at startup and
//! never changes afterwards; picking up a new key requires a restart.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::auth::Credentials;
use crate::providers::{
    AnthropicProvider, CohereProvider, GeminiProvider, HuggingFaceProvider, ModelProvider,
    OpenAiProvider,
};
use crate::{GenerationOptions, ProviderKind};

/// Everything needed to build the five adapters.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// API keys, one per provider.
    pub credentials: Credentials,
    /// Model id overrides; providers not listed use their default model.
    pub models: HashMap<ProviderKind, String>,
    /// API root overrides, mostly for pointing at mock servers.
    pub base_urls: HashMap<ProviderKind, String>,
}

impl RegistryConfig {
    /// Config with the given credentials and no overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Default::default()
        }
    }

    /// Override the model for one provider.
    pub fn with_model(mut self, kind: ProviderKind, model: impl Into<String>) -> Self {
        self.models.insert(kind, model.into());
        self
    }

    /// Override the API root for one provider.
    pub fn with_base_url(mut self, kind: ProviderKind, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(kind, base_url.into());
        self
    }

    fn model_for(&self, kind: ProviderKind) -> String {
        self.models
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_model().to_string())
    }

    fn base_url_for(&self, kind: ProviderKind) -> String {
        self.base_urls
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_base_url().to_string())
    }

    /// Build the adapter for `kind`. Never fails; without a key the adapter
    /// simply reports itself unavailable.
    fn build(&self, kind: ProviderKind) -> Arc<dyn ModelProvider> {
        let key = self.credentials.get(kind).cloned();
        let model = self.model_for(kind);
        let base_url = self.base_url_for(kind);

        match kind {
            ProviderKind::OpenAi => Arc::new(
                OpenAiProvider::new(key)
                    .with_model(model)
                    .with_base_url(base_url),
            ),
            ProviderKind::Anthropic => Arc::new(
                AnthropicProvider::new(key)
                    .with_model(model)
                    .with_base_url(base_url),
            ),
            ProviderKind::Gemini => Arc::new(
                GeminiProvider::new(key)
                    .with_model(model)
                    .with_base_url(base_url),
            ),
            ProviderKind::Cohere => Arc::new(
                CohereProvider::new(key)
                    .with_model(model)
                    .with_base_url(base_url),
            ),
            ProviderKind::HuggingFace => Arc::new(
                HuggingFaceProvider::new(key)
                    .with_model(model)
                    .with_base_url(base_url),
            ),
        }
    }
}

/// All adapters plus the available subset, in construction order.
pub struct ModelRegistry {
    providers: Vec<Arc<dyn ModelProvider>>,
    /// Indices into `providers` of adapters that reported available.
    available: Vec<usize>,
}

impl ModelRegistry {
    /// Build all five adapters from `config`.
    pub fn new(config: &RegistryConfig) -> Self {
        let providers = ProviderKind::ALL
            .into_iter()
            .map(|kind| config.build(kind))
            .collect();
        Self::with_providers(providers)
    }

    /// Build a registry over arbitrary adapters, keeping their order.
    pub fn with_providers(providers: Vec<Arc<dyn ModelProvider>>) -> Self {
        let available: Vec<usize> = providers
            .iter()
            .enumerate()
            .filter(|(_, provider)| provider.is_available())
            .map(|(index, _)| index)
            .collect();

        debug!(
            total = providers.len(),
            available = available.len(),
            "model registry built"
        );

        Self {
            providers,
            available,
        }
    }

    /// (name, model name) for every available adapter, in order.
    pub fn list_available(&self) -> Vec<(String, String)> {
        self.available_providers()
            .map(|provider| (provider.id().to_string(), provider.model_name()))
            .collect()
    }

    /// Send `prompt` to the available adapter called `name`.
    ///
    /// Unknown or unavailable names yield `"Model '<name>' is not available"`
    /// without touching any adapter. Otherwise the adapter's reply is returned
    /// verbatim, error text included.
    pub async fn chat(&self, name: &str, prompt: &str, options: GenerationOptions) -> String {
        match self.get(name) {
            Some(provider) => provider.generate_response(prompt, options).await,
            None => format!("Model '{name}' is not available"),
        }
    }

    /// 1-based lookup into the available list.
    pub fn get_by_index(&self, n: usize) -> Option<(&str, &Arc<dyn ModelProvider>)> {
        let index = *self.available.get(n.checked_sub(1)?)?;
        let provider = &self.providers[index];
        Some((provider.id(), provider))
    }

    /// Available adapter by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ModelProvider>> {
        self.available_providers()
            .find(|provider| provider.id() == name)
    }

    /// Every adapter, available or not, in order.
    pub fn providers(&self) -> impl Iterator<Item = &Arc<dyn ModelProvider>> {
        self.providers.iter()
    }

    /// Number of available adapters.
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    /// True when no adapter is available.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    fn available_providers(&self) -> impl Iterator<Item = &Arc<dyn ModelProvider>> {
        self.available.iter().map(|&index| &self.providers[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    /// Adapter that counts calls and echoes the prompt.
    struct MockProvider {
        id: &'static str,
        available: bool,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(id: &'static str, available: bool) -> Arc<Self> {
            Arc::new(Self {
                id,
                available,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelProvider for MockProvider {
        fn id(&self) -> &str {
            self.id
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn generate_response(&self, prompt: &str, options: GenerationOptions) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!(
                "{} says {} (t={}, max={})",
                self.id,
                prompt,
                options.resolved_temperature(),
                options.resolved_max_tokens()
            )
        }

        fn model_name(&self) -> String {
            format!("Mock {}", self.id)
        }
    }

    fn registry_of(mocks: &[Arc<MockProvider>]) -> ModelRegistry {
        ModelRegistry::with_providers(
            mocks
                .iter()
                .map(|m| Arc::clone(m) as Arc<dyn ModelProvider>)
                .collect(),
        )
    }

    #[test]
    fn new_builds_all_five_without_credentials() {
        let registry = ModelRegistry::new(&RegistryConfig::default());
        let ids: Vec<_> = registry.providers().map(|p| p.id().to_string()).collect();
        assert_eq!(
            ids,
            vec!["openai", "anthropic", "gemini", "cohere", "huggingface"]
        );
        assert!(registry.is_empty());
        assert!(registry.list_available().is_empty());
    }

    #[test]
    fn list_available_filters_and_keeps_order() {
        let creds = Credentials::new()
            .with_key(ProviderKind::HuggingFace, "hf-key")
            .with_key(ProviderKind::Anthropic, "sk-ant")
            .with_key(ProviderKind::OpenAi, crate::auth::PLACEHOLDER_API_KEY)
            .with_key(ProviderKind::Cohere, "");
        let registry = ModelRegistry::new(&RegistryConfig::new(creds));

        assert_eq!(
            registry.list_available(),
            vec![
                (
                    "anthropic".to_string(),
                    "Anthropic claude-3-haiku-20240307".to_string()
                ),
                (
                    "huggingface".to_string(),
                    "Hugging Face meta-llama/Llama-2-7b-chat-hf".to_string()
                ),
            ]
        );
    }

    #[test]
    fn model_overrides_are_applied() {
        let creds = Credentials::new().with_key(ProviderKind::OpenAi, "sk");
        let config = RegistryConfig::new(creds).with_model(ProviderKind::OpenAi, "gpt-4o-mini");
        let registry = ModelRegistry::new(&config);
        assert_eq!(
            registry.list_available(),
            vec![("openai".to_string(), "OpenAI gpt-4o-mini".to_string())]
        );
    }

    #[test]
    fn get_by_index_is_one_based_and_bounded() {
        let a = MockProvider::new("a", true);
        let b = MockProvider::new("b", false);
        let c = MockProvider::new("c", true);
        let registry = registry_of(&[a, b, c]);

        assert!(registry.get_by_index(0).is_none());
        assert!(registry.get_by_index(3).is_none());

        let (name, _) = registry.get_by_index(1).unwrap();
        assert_eq!(name, registry.list_available()[0].0);
        assert_eq!(name, "a");

        let (name, provider) = registry.get_by_index(2).unwrap();
        assert_eq!(name, "c");
        assert_eq!(provider.model_name(), "Mock c");
    }

    #[tokio::test]
    async fn chat_unknown_name_touches_no_adapter() {
        let a = MockProvider::new("a", true);
        let registry = registry_of(&[Arc::clone(&a)]);

        let reply = registry.chat("x", "hello", GenerationOptions::default()).await;

        assert_eq!(reply, "Model 'x' is not available");
        assert_eq!(a.calls(), 0);
    }

    #[tokio::test]
    async fn chat_unavailable_name_is_rejected() {
        let off = MockProvider::new("off", false);
        let registry = registry_of(&[Arc::clone(&off)]);

        let reply = registry.chat("off", "hello", GenerationOptions::default()).await;

        assert_eq!(reply, "Model 'off' is not available");
        assert_eq!(off.calls(), 0);
    }

    #[tokio::test]
    async fn chat_delegates_with_options() {
        let a = MockProvider::new("a", true);
        let registry = registry_of(&[Arc::clone(&a)]);

        let reply = registry
            .chat("a", "hi", GenerationOptions::new().temperature(0.9).max_tokens(100))
            .await;

        assert_eq!(reply, "a says hi (t=0.9, max=100)");
        assert_eq!(a.calls(), 1);
    }

    #[test]
    fn unconfigured_adapter_reply_is_fixed_text() {
        // A registry never lists an unconfigured adapter, so go through the
        // adapter directly to confirm the text the registry would relay.
        let provider = CohereProvider::new(None);
        let reply =
            tokio_test::block_on(provider.generate_response("hi", GenerationOptions::default()));
        assert_eq!(reply, "Error: Cohere API key not configured");
    }
}
