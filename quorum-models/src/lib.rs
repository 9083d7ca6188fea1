//! Provider adapters for quorum.
//!
//! This crate provides:
//! - A uniform [`ModelProvider`](providers::ModelProvider) contract over hosted
//!   text-generation APIs
//! - Five thin adapters (OpenAI, Anthropic, Gemini, Cohere, Hugging Face)
//! - Credential loading with placeholder detection
//! - A registry that dispatches prompts by provider name
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ModelRegistry                          │
//! │  ┌────────┐ ┌───────────┐ ┌────────┐ ┌────────┐ ┌─────────┐  │
//! │  │ OpenAI │ │ Anthropic │ │ Gemini │ │ Cohere │ │ HF      │  │
//! │  └────────┘ └───────────┘ └────────┘ └────────┘ └─────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Credentials                          │
//! │              (environment, `.env` loaded by the CLI)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod http;
mod types;

pub mod auth;
pub mod providers;
pub mod registry;

pub use error::{Error, Result};
pub use registry::{ModelRegistry, RegistryConfig};
pub use types::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationOptions, ProviderKind,
};
