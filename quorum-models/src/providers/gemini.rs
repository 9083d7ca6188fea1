//! Google Gemini `generateContent` adapter.
//!
//! The output limit travels as `generationConfig.maxOutputTokens`.

use serde::{Deserialize, Serialize};

use super::{ProviderCore, impl_model_provider};
use crate::auth::ApiKey;
use crate::http::{join, send_json};
use crate::{Error, GenerationOptions, ProviderKind, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Response from `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<serde_json::Value>,
}

impl GeminiResponse {
    /// Text of the first candidate, all parts joined.
    fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let detail = self
                .prompt_feedback
                .map(|feedback| format!("no candidates returned (prompt feedback: {feedback})"))
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(Error::InvalidResponse(detail));
        };

        let texts: Vec<String> = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if texts.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(Error::InvalidResponse(format!(
                "candidate has no text parts (finish reason: {reason})"
            )));
        }

        Ok(texts.concat())
    }
}

/// Gemini adapter (default model `gemini-pro`).
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    core: ProviderCore,
}

impl GeminiProvider {
    /// Create an adapter; a missing or placeholder key leaves it unavailable.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            core: ProviderCore::new(ProviderKind::Gemini, api_key),
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

    /// Generate content and return the first candidate's text.
    pub async fn complete(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let (http, key) = self.core.connection()?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: options.resolved_temperature(),
                max_output_tokens: options.resolved_max_tokens(),
            },
        };

        let path = format!("/v1beta/models/{}:generateContent", self.core.model());
        let url = join(self.core.base_url(), &path);
        let response: GeminiResponse = send_json(
            http.post(&url)
                .header("x-goog-api-key", key.expose_secret())
                .json(&request),
        )
        .await?;

        response.into_text()
    }
}

impl_model_provider!(GeminiProvider);
