//! Hugging Face hosted inference adapter (text generation task).

use serde::{Deserialize, Serialize};

use super::{ProviderCore, impl_model_provider};
use crate::auth::ApiKey;
use crate::http::{join, send_json};
use crate::{Error, GenerationOptions, ProviderKind, Result};

#[derive(Debug, Serialize)]
struct HuggingFaceParameters {
    max_new_tokens: u32,
    temperature: f64,
    /// The hosted API prepends the prompt unless this is false.
    return_full_text: bool,
}

/// Request body for `models/{model}`.
#[derive(Debug, Serialize)]
struct HuggingFaceRequest {
    inputs: String,
    parameters: HuggingFaceParameters,
}

/// One element of the text-generation response array.
#[derive(Debug, Deserialize)]
struct HuggingFaceGeneration {
    generated_text: String,
}

/// Text of the first generation.
fn first_generation(generations: Vec<HuggingFaceGeneration>) -> Result<String> {
    generations
        .into_iter()
        .next()
        .map(|generation| generation.generated_text)
        .ok_or_else(|| Error::InvalidResponse("no generations returned".to_string()))
}

/// Hugging Face adapter (default model `meta-llama/Llama-2-7b-chat-hf`).
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    core: ProviderCore,
}

impl HuggingFaceProvider {
    /// Create an adapter; a missing or placeholder key leaves it unavailable.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            core: ProviderCore::new(ProviderKind::HuggingFace, api_key),
        }
    }

    /// Use a different model repository.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.core.set_model(model);
        self
    }

    /// Point at a different inference root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.core.set_base_url(base_url);
        self
    }

    /// Run text generation and return the raw generated string.
    pub async fn complete(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let (http, key) = self.core.connection()?;

        let request = HuggingFaceRequest {
            inputs: prompt.to_string(),
            parameters: HuggingFaceParameters {
                max_new_tokens: options.resolved_max_tokens(),
                temperature: options.resolved_temperature(),
                return_full_text: false,
            },
        };

        let path = format!("/models/{}", self.core.model());
        let url = join(self.core.base_url(), &path);
        let generations: Vec<HuggingFaceGeneration> = send_json(
            http.post(&url)
                .bearer_auth(key.expose_secret())
                .json(&request),
        )
        .await?;

        first_generation(generations)
    }
}

impl_model_provider!(HuggingFaceProvider);
