//! Provider overview.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use quorum_models::{ModelRegistry, ProviderKind};

use super::load_registry;

/// List every provider with its model and credential status.
pub fn run() -> Result<()> {
    let (_, registry) = load_registry()?;

    println!("{}", provider_table(&registry));
    if registry.is_empty() {
        println!();
        println!("No API keys found. Set one of the variables above or add it to .env.");
    }
    Ok(())
}

fn provider_table(registry: &ModelRegistry) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Provider").fg(Color::Cyan),
        Cell::new("Model").fg(Color::Cyan),
        Cell::new("Variable").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for provider in registry.providers() {
        let env_var = ProviderKind::from_id(provider.id())
            .map(ProviderKind::env_var)
            .unwrap_or("-");
        let status = if provider.is_available() {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new("not configured").fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(provider.id()),
            Cell::new(provider.model_name()),
            Cell::new(env_var),
            status,
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_models::RegistryConfig;
    use quorum_models::auth::Credentials;

    #[test]
    fn table_lists_all_providers_with_status() {
        let credentials = Credentials::new().with_key(ProviderKind::Cohere, "co-test");
        let registry = ModelRegistry::new(&RegistryConfig::new(credentials));

        let mut table = provider_table(&registry);
        table.force_no_tty();
        let rendered = table.to_string();

        for kind in ProviderKind::ALL {
            assert!(rendered.contains(kind.id()), "missing {kind}");
            assert!(rendered.contains(kind.env_var()), "missing {}", kind.env_var());
        }
        assert_eq!(rendered.matches("not configured").count(), 4);
        assert!(rendered.contains("Cohere command"));
    }
}
