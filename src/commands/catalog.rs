//! Listing commands
//!
//! `categories` and `features` print the catalog as plain text, one record
//! per line, so the ids can be fed to `estimate`.

use anyhow::Result;
use appcost::{
    catalog::{Catalog, CatalogClient, CategoryId},
    config::Config,
};
use colored::Colorize;
use tracing::info;

/// Execute the categories command
pub async fn categories(cfg: &Config) -> Result<()> {
    let client = CatalogClient::new(cfg.api.base_url.clone());
    info!(base_url = client.base_url(), "Fetching categories");

    let categories = client.categories().await?;

    if categories.is_empty() {
        println!("{}", "No categories available".yellow());
        return Ok(());
    }

    println!("{}", "App Categories:".green().bold());
    for category in &categories {
        println!("  {:>4}  {}", category.id.to_string().cyan(), category.name);
    }

    Ok(())
}

/// Execute the features command
pub async fn features(cfg: &Config, category: u64) -> Result<()> {
    let client = CatalogClient::new(cfg.api.base_url.clone());
    info!(base_url = client.base_url(), category, "Fetching features");

    let features = client.features(CategoryId(category)).await?;

    if features.is_empty() {
        println!(
            "{}",
            format!("No features for category {}", category).yellow()
        );
        return Ok(());
    }

    println!("{}", format!("App Features (category {}):", category).green().bold());
    for feature in &features {
        println!("  {:>4}  {}", feature.id.to_string().cyan(), feature.label());
    }

    Ok(())
}
