//! Adapter tests against mock vendor endpoints.
//!
//! Response bodies follow each vendor's published API reference. Call counts
//! are enforced with `expect`, which wiremock verifies when the server drops.

use quorum_models::auth::{ApiKey, PLACEHOLDER_API_KEY};
use quorum_models::providers::{
    AnthropicProvider, CohereProvider, GeminiProvider, HuggingFaceProvider, ModelProvider,
    OpenAiProvider,
};
use quorum_models::GenerationOptions;
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(value: &str) -> Option<ApiKey> {
    Some(ApiKey::new(value))
}

/// Mount a catch-all that must never be hit.
async fn untouchable_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

// ==================== Not configured ====================

#[tokio::test]
async fn unconfigured_adapters_never_hit_the_network() {
    let server = untouchable_server().await;
    let uri = server.uri();

    let cases: Vec<(Box<dyn ModelProvider>, &str)> = vec![
        (
            Box::new(OpenAiProvider::new(None).with_base_url(&uri)),
            "Error: OpenAI API key not configured",
        ),
        (
            Box::new(AnthropicProvider::new(key("")).with_base_url(&uri)),
            "Error: Anthropic API key not configured",
        ),
        (
            Box::new(GeminiProvider::new(key(PLACEHOLDER_API_KEY)).with_base_url(&uri)),
            "Error: Google API key not configured",
        ),
        (
            Box::new(CohereProvider::new(None).with_base_url(&uri)),
            "Error: Cohere API key not configured",
        ),
        (
            Box::new(HuggingFaceProvider::new(key(PLACEHOLDER_API_KEY)).with_base_url(&uri)),
            "Error: Hugging Face API key not configured",
        ),
    ];

    for (provider, expected) in cases {
        assert!(!provider.is_available());
        let reply = provider
            .generate_response("hello", GenerationOptions::default())
            .await;
        assert_eq!(reply, expected);
    }
}

#[test]
fn model_name_is_stable_and_independent_of_credentials() {
    let without = OpenAiProvider::new(None);
    let with = OpenAiProvider::new(key("sk-test"));

    assert_eq!(without.model_name(), "OpenAI gpt-3.5-turbo");
    assert_eq!(without.model_name(), without.model_name());
    assert_eq!(with.model_name(), without.model_name());

    assert_eq!(
        AnthropicProvider::new(None).model_name(),
        "Anthropic claude-3-haiku-20240307"
    );
    assert_eq!(GeminiProvider::new(None).model_name(), "Google gemini-pro");
    assert_eq!(CohereProvider::new(None).model_name(), "Cohere command");
    assert_eq!(
        HuggingFaceProvider::new(None).model_name(),
        "Hugging Face meta-llama/Llama-2-7b-chat-hf"
    );
}

// ==================== OpenAI ====================

#[tokio::test]
async fn openai_returns_first_choice_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "Say hi"}],
            "temperature": 0.7,
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "  Hi there!\n"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(key("sk-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("Say hi", GenerationOptions::default())
        .await;

    assert_eq!(reply, "  Hi there!\n");
}

#[tokio::test]
async fn openai_auth_failure_is_rendered_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(key("sk-wrong")).with_base_url(server.uri());
    let reply = provider
        .generate_response("Say hi", GenerationOptions::default())
        .await;

    assert!(reply.starts_with("Error generating response from OpenAI: "));
    assert!(reply.contains("401"));
    assert!(reply.contains("Incorrect API key provided"));
}

// ==================== Anthropic ====================

#[tokio::test]
async fn anthropic_returns_first_content_block() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 100,
            "temperature": 0.25,
            "messages": [{"role": "user", "content": "Write a haiku"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-haiku-20240307",
            "content": [
                {"type": "text", "text": "Code flows like water"},
                {"type": "text", "text": "ignored"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 6}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(key("sk-ant-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response(
            "Write a haiku",
            GenerationOptions::new().temperature(0.25).max_tokens(100),
        )
        .await;

    assert_eq!(reply, "Code flows like water");
}

#[tokio::test]
async fn anthropic_overloaded_is_rendered() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(key("sk-ant-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("hello", GenerationOptions::default())
        .await;

    assert!(reply.starts_with("Error generating response from Anthropic: "));
    assert!(reply.contains("Overloaded"));
}

// ==================== Gemini ====================

#[tokio::test]
async fn gemini_returns_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", "g-test"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Explain ML"}]}],
            "generationConfig": {"temperature": 0.7, "maxOutputTokens": 1000}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Machine learning is pattern fitting."}]},
                "finishReason": "STOP",
                "index": 0
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(key("g-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("Explain ML", GenerationOptions::default())
        .await;

    assert_eq!(reply, "Machine learning is pattern fitting.");
}

#[tokio::test]
async fn gemini_malformed_body_is_rendered_with_gemini_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(key("g-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("Explain ML", GenerationOptions::default())
        .await;

    assert!(reply.starts_with("Error generating response from Gemini: "));
}

// ==================== Cohere ====================

#[tokio::test]
async fn cohere_returns_text_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .and(header("Authorization", "Bearer co-test"))
        .and(body_partial_json(json!({
            "message": "Tell me a joke",
            "model": "command",
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response_id": "r-1",
            "text": "Why did the compiler cross the road?",
            "generation_id": "g-1",
            "finish_reason": "COMPLETE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = CohereProvider::new(key("co-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("Tell me a joke", GenerationOptions::default())
        .await;

    assert_eq!(reply, "Why did the compiler cross the road?");
}

#[tokio::test]
async fn cohere_rate_limit_is_rendered() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"message": "too many requests"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = CohereProvider::new(key("co-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("hello", GenerationOptions::default())
        .await;

    assert!(reply.starts_with("Error generating response from Cohere: "));
    assert!(reply.contains("429"));
}

// ==================== Hugging Face ====================

#[tokio::test]
async fn huggingface_returns_generated_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/meta-llama/Llama-2-7b-chat-hf"))
        .and(header("Authorization", "Bearer hf-test"))
        .and(body_partial_json(json!({
            "inputs": "Once upon a time",
            "parameters": {"max_new_tokens": 50, "temperature": 0.7, "return_full_text": false}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"generated_text": " there was a borrow checker."}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::new(key("hf-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("Once upon a time", GenerationOptions::new().max_tokens(50))
        .await;

    assert_eq!(reply, " there was a borrow checker.");
}

#[tokio::test]
async fn huggingface_model_loading_is_rendered() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/meta-llama/Llama-2-7b-chat-hf"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Model is currently loading",
            "estimated_time": 20.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::new(key("hf-test")).with_base_url(server.uri());
    let reply = provider
        .generate_response("hello", GenerationOptions::default())
        .await;

    assert!(reply.starts_with("Error generating response from Hugging Face: "));
    assert!(reply.contains("currently loading"));
}

#[tokio::test]
async fn unreachable_endpoint_is_rendered() {
    // Port 9 (discard) is not listening in test environments.
    let provider = CohereProvider::new(key("co-test")).with_base_url("http://127.0.0.1:9");
    let reply = provider
        .generate_response("hello", GenerationOptions::default())
        .await;

    assert!(reply.starts_with("Error generating response from Cohere: request failed"));
}
