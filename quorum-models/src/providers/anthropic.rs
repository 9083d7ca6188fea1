//! Anthropic messages adapter.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{ProviderCore, impl_model_provider};
use crate::auth::ApiKey;
use crate::http::{join, send_json};
use crate::{Error, GenerationOptions, ProviderKind, Result};

/// Pinned Messages API version.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Message in a create-message request.
#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

/// Request body for `/v1/messages`.
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<AnthropicMessage>,
}

/// Response from `/v1/messages`.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
}

/// A content block. Only `text` blocks carry `text`.
#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicResponse {
    /// Text of the first content block.
    fn into_text(self) -> Result<String> {
        let block = self
            .content
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("response contained no content".to_string()))?;
        block.text.ok_or_else(|| {
            Error::InvalidResponse(format!(
                "first content block is '{}', not text",
                block.block_type
            ))
        })
    }
}

/// Anthropic adapter (default model `claude-3-haiku-20240307`).
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    core: ProviderCore,
}

impl AnthropicProvider {
    /// Create an adapter; a missing or placeholder key leaves it unavailable.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            core: ProviderCore::new(ProviderKind::Anthropic, api_key),
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

    /// Create one message and return the first content block's text.
    pub async fn complete(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let (http, key) = self.core.connection()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(key.expose_secret())
                .map_err(|err| Error::Request(format!("invalid API key header: {err}")))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

        let request = AnthropicRequest {
            model: self.core.model().to_string(),
            max_tokens: options.resolved_max_tokens(),
            temperature: options.resolved_temperature(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = join(self.core.base_url(), "/v1/messages");
        let response: AnthropicResponse =
            send_json(http.post(&url).headers(headers).json(&request)).await?;

        response.into_text()
    }
}

impl_model_provider!(AnthropicProvider);
