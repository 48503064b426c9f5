//! Display snapshot of the form
//!
//! Built fresh from [`EstimatorState`] before every draw so that rendering
//! never reads state that changed mid-frame.

use crate::estimator::EstimatorState;

pub const TITLE: &str = "App Cost Calculator";
pub const CATEGORY_PLACEHOLDER: &str = "Select a category";
pub const FEATURES_PLACEHOLDER: &str = "Please select a category to see features";
pub const CALCULATE_LABEL: &str = "Calculate Cost";
pub const RESET_LABEL: &str = "Reset";

/// One checkbox line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub error_banner: Option<String>,
    /// Fetch failures, categories first
    pub notices: Vec<String>,
    /// Dropdown entries; index 0 is always the placeholder
    pub category_options: Vec<String>,
    /// Index into `category_options` of the current choice
    pub selected_option: usize,
    pub feature_rows: Vec<FeatureRow>,
    pub total_line: String,
}

impl FormView {
    pub fn from_state(state: &EstimatorState) -> Self {
        let mut category_options = Vec::with_capacity(state.categories.len() + 1);
        category_options.push(CATEGORY_PLACEHOLDER.to_string());
        category_options.extend(state.categories.iter().map(|c| c.name.clone()));

        let selected_option = state
            .selected_category
            .and_then(|id| state.categories.iter().position(|c| c.id == id))
            .map(|pos| pos + 1)
            .unwrap_or(0);

        let feature_rows = state
            .features
            .iter()
            .map(|f| FeatureRow {
                label: f.label(),
                checked: state.is_selected(f.id),
            })
            .collect();

        Self {
            error_banner: state.error_message.clone(),
            notices: state.notices().map(str::to_string).collect(),
            category_options,
            selected_option,
            feature_rows,
            total_line: total_line(state.total_cost),
        }
    }

    /// Placeholder shown instead of checkboxes, if any
    pub fn features_placeholder(&self) -> Option<&'static str> {
        self.feature_rows.is_empty().then_some(FEATURES_PLACEHOLDER)
    }
}

/// "Total Cost: $80"
pub fn total_line(total_cost: u64) -> String {
    format!("Total Cost: ${}", total_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, CategoryId, Feature, FeatureId};

    fn loaded_state() -> EstimatorState {
        let mut state = EstimatorState {
            categories: vec![
                Category {
                    id: CategoryId(7),
                    name: "Social".to_string(),
                },
                Category {
                    id: CategoryId(9),
                    name: "Games".to_string(),
                },
            ],
            features: vec![
                Feature {
                    id: FeatureId(1),
                    name: "Chat".to_string(),
                    hours: 20,
                },
                Feature {
                    id: FeatureId(2),
                    name: "Profiles".to_string(),
                    hours: 8,
                },
            ],
            selected_category: Some(CategoryId(9)),
            total_cost: 200,
            ..Default::default()
        };
        state.selected_features.insert(FeatureId(1), 20);
        state
    }

    #[test]
    fn test_empty_state_view() {
        let view = FormView::from_state(&EstimatorState::default());
        assert_eq!(view.category_options, vec!["Select a category"]);
        assert_eq!(view.selected_option, 0);
        assert_eq!(
            view.features_placeholder(),
            Some("Please select a category to see features")
        );
        assert_eq!(view.total_line, "Total Cost: $0");
        assert!(view.error_banner.is_none());
        assert!(view.notices.is_empty());
    }

    #[test]
    fn test_loaded_state_view() {
        let view = FormView::from_state(&loaded_state());
        assert_eq!(view.category_options, vec!["Select a category", "Social", "Games"]);
        assert_eq!(view.selected_option, 2);
        assert_eq!(
            view.feature_rows,
            vec![
                FeatureRow {
                    label: "Chat - 20 hours".to_string(),
                    checked: true,
                },
                FeatureRow {
                    label: "Profiles - 8 hours".to_string(),
                    checked: false,
                },
            ]
        );
        assert!(view.features_placeholder().is_none());
        assert_eq!(view.total_line, "Total Cost: $200");
    }

    #[test]
    fn test_both_fetch_failures_are_listed() {
        let state = EstimatorState {
            categories_notice: Some("Could not load categories: down".to_string()),
            features_notice: Some("Could not load features: down".to_string()),
            ..Default::default()
        };
        let view = FormView::from_state(&state);
        assert_eq!(
            view.notices,
            vec![
                "Could not load categories: down".to_string(),
                "Could not load features: down".to_string(),
            ]
        );
    }

    #[test]
    fn test_selected_category_missing_from_list_shows_placeholder() {
        let mut state = loaded_state();
        state.selected_category = Some(CategoryId(404));
        let view = FormView::from_state(&state);
        assert_eq!(view.selected_option, 0);
    }
}
