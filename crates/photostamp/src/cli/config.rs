//! The `photostamp config` command for configuration management.

use clap::{Args, Subcommand};
use std::path::Path;

use photostamp_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command. `override_path` is the global `--config`
/// flag, which wins over the platform default location.
pub async fn execute(args: ConfigArgs, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    match args.command {
        ConfigCommand::Show => {
            let config = Config::load(Some(&path))?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            Config::default().write_to(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
