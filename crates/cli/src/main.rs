//! tidydesk CLI — the main entry point.
//!
//! Commands:
//! - `organize` — Run the organizing agent against a request
//! - `tools`    — List the registered capabilities
//! - `onboard`  — Initialize the config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "tidydesk",
    about = "tidydesk — a conversational desktop reorganizer",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging and live tool activity
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the agent to inspect, plan, or script a reorganization
    Organize {
        /// What you want done, in plain words
        request: String,
    },

    /// List the capabilities the agent can call
    Tools,

    /// Initialize the configuration file
    Onboard {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Organize { request } => commands::organize::run(request, cli.verbose).await?,
        Commands::Tools => commands::tools::run().await?,
        Commands::Onboard { force } => commands::onboard::run(force).await?,
    }

    Ok(())
}
