use super::types::{
    GenerationConfig, ModelsConfigSection, QuorumConfig, RawGenerationConfig, RawQuorumConfig,
};
use anyhow::Result;
use directories::ProjectDirs;
use quorum_models::auth::Credentials;
use quorum_models::{ProviderKind, RegistryConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<QuorumConfig> {
        let mut raw = RawQuorumConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        // Convert to final config with defaults applied
        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "quorum").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with QUORUM_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("QUORUM_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".quorum/config.toml")
        }
    }

    /// Build the registry configuration from environment credentials and model overrides
    pub fn registry_config(config: &QuorumConfig) -> RegistryConfig {
        let mut registry = RegistryConfig::new(Credentials::from_env());
        for kind in ProviderKind::ALL {
            if let Some(model) = config.models.get(kind) {
                registry = registry.with_model(kind, model);
            }
        }
        registry
    }

    fn read_raw(path: &Path) -> Result<RawQuorumConfig> {
        debug!(path = %path.display(), "reading config layer");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawQuorumConfig, overlay: RawQuorumConfig) -> RawQuorumConfig {
        RawQuorumConfig {
            generation: RawGenerationConfig {
                temperature: overlay.generation.temperature.or(base.generation.temperature),
                max_tokens: overlay.generation.max_tokens.or(base.generation.max_tokens),
            },
            models: ModelsConfigSection {
                openai: overlay.models.openai.or(base.models.openai),
                anthropic: overlay.models.anthropic.or(base.models.anthropic),
                gemini: overlay.models.gemini.or(base.models.gemini),
                cohere: overlay.models.cohere.or(base.models.cohere),
                huggingface: overlay.models.huggingface.or(base.models.huggingface),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawQuorumConfig) -> QuorumConfig {
        let defaults = GenerationConfig::default();
        QuorumConfig {
            generation: GenerationConfig {
                temperature: raw.generation.temperature.unwrap_or(defaults.temperature),
                max_tokens: raw.generation.max_tokens.unwrap_or(defaults.max_tokens),
            },
            models: raw.models,
        }
    }

    /// Load a single config file with defaults applied (for testing)
    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<QuorumConfig> {
        if path.exists() {
            Ok(Self::finalize(Self::read_raw(path)?))
        } else {
            Ok(QuorumConfig::default())
        }
    }
}
