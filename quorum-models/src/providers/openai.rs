//! OpenAI chat completions adapter.
//!
//! # Example
//!
//! ```ignore
//! use quorum_models::providers::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new(Some("sk-...".into())).with_model("gpt-4o-mini");
//! ```

use serde::{Deserialize, Serialize};

use super::{ProviderCore, impl_model_provider};
use crate::auth::ApiKey;
use crate::http::{join, send_json};
use crate::{Error, GenerationOptions, ProviderKind, Result};

// ────────────────────────────────────────────────────────────────────────────
// OpenAI API Types
// ────────────────────────────────────────────────────────────────────────────

/// Message in a chat completion request/response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    /// Absent for tool-call-only replies.
    #[serde(default)]
    content: Option<String>,
}

/// Request body for `/v1/chat/completions`.
#[derive(Debug, Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f64,
    max_tokens: u32,
}

/// Response from `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

impl OpenAiChatResponse {
    /// Content of the first choice.
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("response contained no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| Error::InvalidResponse("first choice has no content".to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAiProvider
// ────────────────────────────────────────────────────────────────────────────

/// OpenAI adapter (default model `gpt-3.5-turbo`).
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    core: ProviderCore,
}

impl OpenAiProvider {
    /// Create an adapter; a missing or placeholder key leaves it unavailable.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            core: ProviderCore::new(ProviderKind::OpenAi, api_key),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.core.set_model(model);
        self
    }

    /// Point at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.core.set_base_url(base_url);
        self
    }

    /// Perform one chat completion and return the first choice's content.
    pub async fn complete(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let (http, key) = self.core.connection()?;

        let request = OpenAiChatRequest {
            model: self.core.model().to_string(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: options.resolved_temperature(),
            max_tokens: options.resolved_max_tokens(),
        };

        let url = join(self.core.base_url(), "/v1/chat/completions");
        let response: OpenAiChatResponse = send_json(
            http.post(&url)
                .bearer_auth(key.expose_secret())
                .json(&request),
        )
        .await?;

        response.into_text()
    }
}

impl_model_provider!(OpenAiProvider);
