//! Cohere chat adapter.

use serde::{Deserialize, Serialize};

use super::{ProviderCore, impl_model_provider};
use crate::auth::ApiKey;
use crate::http::{join, send_json};
use crate::{GenerationOptions, ProviderKind, Result};

/// Request body for `/v1/chat`.
#[derive(Debug, Serialize)]
struct CohereChatRequest {
    message: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

/// Response from `/v1/chat`.
#[derive(Debug, Deserialize)]
struct CohereChatResponse {
    text: String,
}

/// Cohere adapter (default model `command`).
#[derive(Debug, Clone)]
pub struct CohereProvider {
    core: ProviderCore,
}

impl CohereProvider {
    /// Create an adapter; a missing or placeholder key leaves it unavailable.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            core: ProviderCore::new(ProviderKind::Cohere, api_key),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.core.set_model(model);
        self
    }

    /// Point at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.core.set_base_url(base_url);
        self
    }

    /// Send one chat turn and return the response text.
    pub async fn complete(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let (http, key) = self.core.connection()?;

        let request = CohereChatRequest {
            message: prompt.to_string(),
            model: self.core.model().to_string(),
            temperature: options.resolved_temperature(),
            max_tokens: options.resolved_max_tokens(),
        };

        let url = join(self.core.base_url(), "/v1/chat");
        let response: CohereChatResponse = send_json(
            http.post(&url)
                .bearer_auth(key.expose_secret())
                .json(&request),
        )
        .await?;

        Ok(response.text)
    }
}

impl_model_provider!(CohereProvider);
