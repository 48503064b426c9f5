use std::collections::BTreeMap;

use crate::catalog::{Category, CategoryId, Feature, FeatureId};

/// Everything the form displays
///
/// Handed out by reference only; changes go through
/// [`Estimator`](crate::estimator::Estimator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimatorState {
    /// Categories loaded at startup
    pub categories: Vec<Category>,
    /// Features of the selected category
    pub features: Vec<Feature>,
    /// `None` is the "Select a category" entry
    pub selected_category: Option<CategoryId>,
    /// Checked features and their hours; absence means unchecked
    pub selected_features: BTreeMap<FeatureId, u32>,
    /// Result of the last successful calculation
    pub total_cost: u64,
    /// Validation message from the last failed calculation
    pub error_message: Option<String>,
    /// Category list fetch failure, kept apart from `error_message`
    pub categories_notice: Option<String>,
    /// Feature list fetch failure for the selected category
    pub features_notice: Option<String>,
}

impl EstimatorState {
    /// Fetch failures to show the user, categories first
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.categories_notice
            .iter()
            .chain(self.features_notice.iter())
            .map(String::as_str)
    }

    pub fn is_selected(&self, feature_id: FeatureId) -> bool {
        self.selected_features.contains_key(&feature_id)
    }

    /// Sum of the hours of all checked features
    pub fn selected_hours(&self) -> u64 {
        self.selected_features.values().map(|h| u64::from(*h)).sum()
    }

    pub fn category(&self, category_id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn feature(&self, feature_id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == feature_id)
    }

    /// Drop features, checks and the computed total.
    pub(crate) fn clear_selection(&mut self) {
        self.selected_features.clear();
        self.features.clear();
        self.total_cost = 0;
    }
}
