use anyhow::Result;
use appcost::config::Config;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after all layers are applied
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this reports where it came from
pub fn validate(cfg: &Config, path: &Path) -> Result<()> {
    info!(path = %path.display(), "Configuration validated");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("  {}: {}", "File".cyan(), source);
    println!("  {}: {}", "API".cyan(), cfg.api.base_url);
    println!("  {}: {}", "Log Level".cyan(), cfg.log_level);
    println!(
        "  {}: {}",
        "Log File".cyan(),
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    Ok(())
}
