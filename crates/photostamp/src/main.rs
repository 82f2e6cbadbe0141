//! Photostamp CLI - stamps photos with a caption footer built from their
//! own metadata (capture date and reverse-geocoded location).
//!
//! # Usage
//!
//! ```bash
//! # Caption everything in ./input into ./output
//! photostamp process
//!
//! # Explicit directories, rewriting existing outputs
//! photostamp process -i ~/photos -o ~/captioned --overwrite
//!
//! # View configuration
//! photostamp config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Photostamp - caption photos with their capture date and location.
#[derive(Parser, Debug)]
#[command(name = "photostamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Path to the config file (default: platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Caption a directory of photos
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing config file is written out with defaults; one that exists
    // but cannot be read or parsed stops the run here.
    let config = photostamp_core::Config::load_or_init(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("unable to read config file: {e}"))?;

    logging::init_from_config(&config, cli.verbose, cli.json_logs, cli.log_file.as_deref())?;

    tracing::debug!("Photostamp v{}", photostamp_core::VERSION);

    match cli.command {
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()).await,
    }
}
