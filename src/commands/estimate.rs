//! Estimate command implementation
//!
//! Prints the result of [`estimate_selection`]: the category, the checked
//! features and the total, plus the server quote with `--remote`.

use anyhow::Result;
use appcost::{
    catalog::{CatalogClient, CategoryId, FeatureId},
    config::Config,
    estimator::batch::estimate_selection,
    form::view::total_line,
};
use colored::Colorize;
use std::sync::Arc;

/// Execute the estimate command
///
/// # Arguments
/// * `category` - Category id
/// * `features` - Feature ids to check; duplicates are ignored
/// * `remote` - Also print the server's quote for the same selection
pub async fn execute(
    cfg: &Config,
    category: u64,
    features: Vec<u64>,
    remote: bool,
) -> Result<()> {
    let client = Arc::new(CatalogClient::new(cfg.api.base_url.clone()));
    let feature_ids: Vec<FeatureId> = features.into_iter().map(FeatureId).collect();

    let report = estimate_selection(client, CategoryId(category), &feature_ids, remote).await?;

    match &report.category {
        Some(c) => println!("{} {}", "Category:".bold(), c.name),
        None => println!("{} {}", "Category:".bold(), category),
    }
    for feature in &report.features {
        println!("  {} {}", "✓".green(), feature.label());
    }

    println!();
    println!("{}", total_line(report.total_cost).green().bold());

    if let Some(quote) = report.remote_total {
        println!("{}", format!("Server quote: {}", total_line(quote)).cyan());
        if report.remote_mismatch() {
            println!(
                "{}",
                "Warning: server quote differs from the local calculation".yellow()
            );
        }
    }

    Ok(())
}
