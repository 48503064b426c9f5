use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use appcost::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    if matches!(command, cli::Commands::Version) {
        println!("App Cost Calculator v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut cfg = config::load_config(&args.config)?;
    if let Some(base_url) = args.base_url {
        cfg.api.base_url = base_url;
        config::validate_config(&cfg)?;
    }

    // The form takes over the terminal, so stderr logging is off while it runs
    let interactive = matches!(command, cli::Commands::Ui);
    init_tracing(&cfg.log_level, cfg.log_file.as_deref(), interactive)?;

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Ui => commands::ui::execute(&cfg).await?,
        cli::Commands::Categories => commands::catalog::categories(&cfg).await?,
        cli::Commands::Features { category } => {
            commands::catalog::features(&cfg, category).await?;
        }
        cli::Commands::Estimate {
            category,
            features,
            remote,
        } => {
            commands::estimate::execute(&cfg, category, features, remote).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg, &args.config)?,
        },
        cli::Commands::Version => {}
    }

    Ok(())
}
