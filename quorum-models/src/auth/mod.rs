//! Credential handling for provider API keys.
//!
//! Keys come from environment variables, one per provider. A key that is
//! missing, empty, or still set to the template placeholder marks its provider
//! unavailable.
//!
//! # Example
//!
//! ```ignore
//! use quorum_models::auth::Credentials;
//! use quorum_models::ProviderKind;
//!
//! let creds = Credentials::from_env();
//! if creds.is_configured(ProviderKind::Anthropic) {
//!     // ...
//! }
//! ```

use std::collections::HashMap;
use std::env;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::ProviderKind;

/// Value shipped in `.env.example`; treated the same as an absent key.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// A secure API key that prevents accidental logging.
///
/// The key is wrapped in `SecretString` which:
/// - Implements `Debug` as `"[REDACTED]"`
/// - Zeroizes memory on drop
/// - Requires explicit `.expose_secret()` to access the value
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Create a new API key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the secret key value.
    ///
    /// Use sparingly - only when actually sending to an API.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether this key can be used to authenticate.
    pub fn is_valid(&self) -> bool {
        let key = self.expose_secret();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Availability rule shared by every adapter.
pub fn has_valid_key(key: Option<&ApiKey>) -> bool {
    key.is_some_and(ApiKey::is_valid)
}

/// One optional API key per provider.
///
/// Loaded once at startup and never mutated afterwards. Holds keys verbatim;
/// validity is decided by the adapters via [`has_valid_key`].
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    keys: HashMap<ProviderKind, ApiKey>,
}

impl Credentials {
    /// Credentials with no keys at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every provider's key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read every provider's key through `lookup`, keyed by variable name.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut creds = Self::new();
        for kind in ProviderKind::ALL {
            match lookup(kind.env_var()) {
                Some(value) => {
                    debug!(provider = kind.id(), var = kind.env_var(), "found API key variable");
                    creds.keys.insert(kind, ApiKey::new(value));
                }
                None => debug!(provider = kind.id(), var = kind.env_var(), "API key variable not set"),
            }
        }
        creds
    }

    /// Set the key for a provider.
    pub fn with_key(mut self, kind: ProviderKind, key: impl Into<ApiKey>) -> Self {
        self.keys.insert(kind, key.into());
        self
    }

    /// Raw key for a provider, if one was supplied.
    pub fn get(&self, kind: ProviderKind) -> Option<&ApiKey> {
        self.keys.get(&kind)
    }

    /// Whether the provider has a usable key.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        has_valid_key(self.get(kind))
    }

    /// Providers with usable keys, in registry order.
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.is_configured(*kind))
            .collect()
    }
}
