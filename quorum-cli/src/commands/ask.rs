use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::{GenerationArgs, load_registry};

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Prompt to send
    pub prompt: String,

    /// Provider to ask (openai, anthropic, gemini, cohere, huggingface)
    #[arg(short, long)]
    pub model: String,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Send one prompt to one provider and print the reply.
pub async fn run(args: AskArgs) -> Result<()> {
    let (config, registry) = load_registry()?;
    let options = args.generation.resolve(&config);

    debug!(provider = %args.model, "one-shot prompt");
    let reply = registry.chat(&args.model, &args.prompt, options).await;
    println!("{reply}");
    Ok(())
}
