//! One-shot pricing
//!
//! Runs the same operations the form performs (load, select, toggle,
//! calculate) from a list of ids, for the `estimate` command.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::{CatalogClient, Category, CategoryId, Feature, FeatureId};
use crate::error::AppError;
use crate::estimator::Estimator;

/// Outcome of a one-shot estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateReport {
    /// `None` when the category list failed to load or lacks the id
    pub category: Option<Category>,
    /// Checked features, in id order
    pub features: Vec<Feature>,
    pub total_cost: u64,
    /// Server-side quote, when requested
    pub remote_total: Option<u64>,
}

impl EstimateReport {
    /// True when the server priced the selection differently
    pub fn remote_mismatch(&self) -> bool {
        matches!(self.remote_total, Some(remote) if remote != self.total_cost)
    }
}

/// Price `feature_ids` within `category_id`
///
/// Repeated ids count once. Only the feature list decides success; a failed
/// category list is logged and leaves `category` empty.
///
/// # Errors
/// - `FetchFailed` if the feature list could not be loaded
/// - `UnknownFeature` for an id outside the category
/// - `Validation` when no feature ids are given
/// - any transport error from the server quote
pub async fn estimate_selection(
    client: Arc<CatalogClient>,
    category_id: CategoryId,
    feature_ids: &[FeatureId],
    remote: bool,
) -> Result<EstimateReport, AppError> {
    let mut estimator = Estimator::new(client.clone());
    estimator.load_categories();
    estimator.select_category(Some(category_id));
    estimator.settle().await;

    let state = estimator.state();
    if let Some(notice) = &state.features_notice {
        return Err(AppError::FetchFailed(notice.clone()));
    }
    if let Some(notice) = &state.categories_notice {
        warn!(notice = %notice, "Continuing without the category list");
    }

    let category = state.category(category_id).cloned();
    if category.is_none() {
        warn!(category_id = %category_id, "Category is not in the category list");
    }

    let requested: BTreeSet<FeatureId> = feature_ids.iter().copied().collect();
    let mut features = Vec::with_capacity(requested.len());
    for feature_id in &requested {
        let feature = estimator
            .state()
            .feature(*feature_id)
            .cloned()
            .ok_or(AppError::UnknownFeature(*feature_id))?;
        estimator.toggle_feature(feature.id, feature.hours)?;
        features.push(feature);
    }

    let total_cost = estimator.compute_cost()?;
    info!(category_id = %category_id, total_cost, "Estimate complete");

    let remote_total = if remote {
        let ids: Vec<FeatureId> = requested.into_iter().collect();
        Some(client.quote(Some(category_id), &ids).await?)
    } else {
        None
    };

    Ok(EstimateReport {
        category,
        features,
        total_cost,
        remote_total,
    })
}
