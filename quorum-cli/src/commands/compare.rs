use anyhow::Result;
use clap::Args;
use crossterm::style::Stylize;
use quorum_models::ProviderKind;

use super::{GenerationArgs, load_registry};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Prompt to send to every configured provider
    pub prompt: String,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Send the same prompt to each available provider in turn.
pub async fn run(args: CompareArgs) -> Result<()> {
    let (config, registry) = load_registry()?;
    let options = args.generation.resolve(&config);

    if registry.is_empty() {
        let vars: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.env_var()).collect();
        println!("{}", "No AI models are configured!".red());
        println!("Set at least one of {}.", vars.join(", "));
        return Ok(());
    }

    println!("{}", format!("Prompt: {}", args.prompt).yellow());
    for (name, model_name) in registry.list_available() {
        println!();
        println!("{}", format!("--- {model_name} ---").cyan());
        let reply = registry.chat(&name, &args.prompt, options).await;
        println!("{reply}");
    }
    Ok(())
}
