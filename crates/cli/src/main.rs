//! rmrkl CLI: the main entry point.
//!
//! Commands:
//! - `render`: Print the assembled chat prompt for the configured tools
//! - `parse` : Parse model output into an action or final answer
//! - `check` : Validate config, tools and templates

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "rmrkl",
    about = "rmrkl: chat zero-shot MRKL agent prompt tooling",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.rmrkl/config.toml)
    #[arg(short, long, global = true, env = "RMRKL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the system and human messages built from the configured tools
    Render {
        /// Fill the human message with this question and an empty scratchpad
        #[arg(short, long)]
        input: Option<String>,

        /// Extra human-template variables as KEY=VALUE
        #[arg(long = "var", value_parser = commands::render::parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Parse model output (stdin when --text is absent) and print the decision as JSON
    Parse {
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Validate the configuration and print the allowed tool names
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { input, vars } => {
            commands::render::run(cli.config.as_deref(), input, vars)?
        }
        Commands::Parse { text } => commands::parse::run(text)?,
        Commands::Check => commands::check::run(cli.config.as_deref())?,
    }

    Ok(())
}
