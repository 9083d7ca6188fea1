use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod input;
mod shell;

#[derive(Parser)]
#[command(name = "quorum", about = "Ask several hosted AI models from one terminal")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a model and chat with it (default)
    Chat(commands::chat::ChatArgs),
    /// Send one prompt to one model
    Ask(commands::ask::AskArgs),
    /// Send one prompt to every configured model
    Compare(commands::compare::CompareArgs),
    /// List providers and whether they are configured
    Models,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Chat(Default::default())) {
        Commands::Chat(args) => commands::chat::run(args).await,
        Commands::Ask(args) => commands::ask::run(args).await,
        Commands::Compare(args) => commands::compare::run(args).await,
        Commands::Models => commands::models::run(),
        Commands::Config(args) => commands::config::run(args),
    }
}
