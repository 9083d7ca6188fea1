pub mod ask;
pub mod chat;
pub mod compare;
pub mod config;
pub mod models;

use anyhow::Result;
use clap::Args;
use quorum_models::{GenerationOptions, ModelRegistry};

use crate::config::{ConfigLoader, QuorumConfig};

/// Per-invocation overrides of the `[generation]` config section.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct GenerationArgs {
    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl GenerationArgs {
    pub fn resolve(self, config: &QuorumConfig) -> GenerationOptions {
        config.generation.options(self.temperature, self.max_tokens)
    }
}

/// Load configuration and build the registry from it.
pub fn load_registry() -> Result<(QuorumConfig, ModelRegistry)> {
    let config = ConfigLoader::load()?;
    let registry = ModelRegistry::new(&ConfigLoader::registry_config(&config));
    Ok((config, registry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = QuorumConfig::default();
        let args = GenerationArgs {
            temperature: Some(0.2),
            max_tokens: None,
        };

        let options = args.resolve(&config);

        assert_eq!(options.resolved_temperature(), 0.2);
        assert_eq!(options.resolved_max_tokens(), 1000);
    }
}
