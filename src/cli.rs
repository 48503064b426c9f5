use appcost::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "appcost", version, about = "App Cost Calculator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Catalog API base URL (overrides the configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive cost form (default)
    Ui,

    /// List app categories
    Categories,

    /// List the features of a category
    Features {
        /// Category id
        #[arg(long)]
        category: u64,
    },

    /// Price a selection without the interactive form
    Estimate {
        /// Category id
        #[arg(long)]
        category: u64,

        /// Feature id to include (repeatable)
        #[arg(short, long = "feature", required = true)]
        features: Vec<u64>,

        /// Also ask the server for its own quote
        #[arg(long)]
        remote: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Ui if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Ui)
    }
}
