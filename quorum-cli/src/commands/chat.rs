use std::io;

use anyhow::Result;
use clap::Args;

use super::{GenerationArgs, load_registry};
use crate::input::{Interrupt, Readline};
use crate::shell::Shell;

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Run the interactive shell.
pub async fn run(args: ChatArgs) -> Result<()> {
    let (config, registry) = load_registry()?;
    let options = args.generation.resolve(&config);

    // Installed before the first prompt so Ctrl+C never kills the session outright.
    let interrupt = Interrupt::ctrl_c();

    Shell::new(&registry, Readline::new(), io::stdout(), options, interrupt)
        .run()
        .await?;
    Ok(())
}
