use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::catalog::{Catalog, Category, CategoryId, Feature, FeatureId};
use crate::error::AppError;
use crate::estimator::state::EstimatorState;
use crate::estimator::{HOURLY_RATE, VALIDATION_MESSAGE};

/// Result of a spawned catalog fetch
#[derive(Debug)]
pub enum Completion {
    Categories(Result<Vec<Category>, AppError>),
    /// Tagged with the category the request was issued for
    Features {
        category_id: CategoryId,
        result: Result<Vec<Feature>, AppError>,
    },
}

/// Form controller
///
/// Network requests never block an operation: they are spawned onto the
/// runtime and their results queue up until [`Estimator::apply_ready`] or
/// [`Estimator::settle`] is called.
pub struct Estimator {
    catalog: Arc<dyn Catalog>,
    state: EstimatorState,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Estimator {
    /// Create a controller with empty state
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            state: EstimatorState::default(),
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &EstimatorState {
        &self.state
    }

    /// Number of fetches whose completion has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Request the category list
    pub fn load_categories(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        self.spawn_fetch(
            async move { Completion::Categories(catalog.categories().await) },
            |reason| Completion::Categories(Err(AppError::FetchFailed(reason))),
        );
    }

    /// Switch category
    ///
    /// Features, checks and the total are cleared immediately, before the new
    /// feature list arrives. `None` clears without fetching.
    pub fn select_category(&mut self, category_id: Option<CategoryId>) {
        debug!(
            from = ?self.state.selected_category,
            to = ?category_id,
            "Category changed"
        );

        self.state.selected_category = category_id;
        self.state.clear_selection();
        self.state.features_notice = None;

        let Some(category_id) = category_id else {
            return;
        };

        let catalog = Arc::clone(&self.catalog);
        self.spawn_fetch(
            async move {
                Completion::Features {
                    category_id,
                    result: catalog.features(category_id).await,
                }
            },
            move |reason| Completion::Features {
                category_id,
                result: Err(AppError::FetchFailed(reason)),
            },
        );
    }

    /// Check or uncheck a feature
    ///
    /// Returns `true` when the feature is checked afterwards.
    ///
    /// # Errors
    /// `UnknownFeature` if the id is not in the current feature list.
    pub fn toggle_feature(&mut self, feature_id: FeatureId, hours: u32) -> Result<bool, AppError> {
        if self.state.feature(feature_id).is_none() {
            warn!(feature_id = %feature_id, "Toggle for feature not in the current list");
            return Err(AppError::UnknownFeature(feature_id));
        }

        let checked = if self.state.selected_features.remove(&feature_id).is_some() {
            false
        } else {
            self.state.selected_features.insert(feature_id, hours);
            true
        };

        debug!(feature_id = %feature_id, hours, checked, "Feature toggled");
        Ok(checked)
    }

    /// Toggle the feature at `index` in the feature list, using its own hours
    pub fn toggle_feature_at(&mut self, index: usize) -> Result<bool, AppError> {
        let (id, hours) = match self.state.features.get(index) {
            Some(feature) => (feature.id, feature.hours),
            None => {
                return Err(AppError::Validation(format!(
                    "No feature at position {}",
                    index
                )))
            }
        };
        self.toggle_feature(id, hours)
    }

    /// Compute the cost of the current selection
    ///
    /// On failure the validation message is stored and the previous total is
    /// left untouched.
    pub fn compute_cost(&mut self) -> Result<u64, AppError> {
        if self.state.selected_category.is_none() || self.state.selected_features.is_empty() {
            self.state.error_message = Some(VALIDATION_MESSAGE.to_string());
            return Err(AppError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        self.state.error_message = None;
        let hours = self.state.selected_hours();
        self.state.total_cost = hours * HOURLY_RATE;

        info!(
            category_id = ?self.state.selected_category,
            features = self.state.selected_features.len(),
            hours,
            total_cost = self.state.total_cost,
            "Cost calculated"
        );
        Ok(self.state.total_cost)
    }

    /// Return the form to its initial state
    ///
    /// Loaded categories, and any failure to load them, are kept; responses
    /// to feature requests still in flight are discarded when they arrive.
    pub fn reset(&mut self) {
        self.state.selected_category = None;
        self.state.clear_selection();
        self.state.error_message = None;
        self.state.features_notice = None;
        debug!("Form reset");
    }

    /// Apply one fetch result
    pub fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match completion {
            Completion::Categories(Ok(categories)) => {
                info!(count = categories.len(), "Categories loaded");
                self.state.categories = categories;
                self.state.categories_notice = None;
            }
            Completion::Categories(Err(e)) => {
                error!(error = %e, "Error fetching categories");
                self.state.categories.clear();
                self.state.categories_notice =
                    Some(format!("Could not load categories: {}", e));
            }
            Completion::Features { category_id, .. }
                if self.state.selected_category != Some(category_id) =>
            {
                debug!(
                    category_id = %category_id,
                    current = ?self.state.selected_category,
                    "Discarding features for a category that is no longer selected"
                );
            }
            Completion::Features {
                category_id,
                result: Ok(features),
            } => {
                info!(category_id = %category_id, count = features.len(), "Features loaded");
                self.state.features = features;
                self.state.features_notice = None;
            }
            Completion::Features {
                category_id,
                result: Err(e),
            } => {
                error!(category_id = %category_id, error = %e, "Error fetching features");
                self.state.features.clear();
                self.state.features_notice = Some(format!("Could not load features: {}", e));
            }
        }
    }

    /// Apply every completion that has already arrived, without waiting
    ///
    /// Returns the number applied.
    pub fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for every outstanding fetch and apply the results in arrival order
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.completions_rx.recv().await {
                Some(completion) => self.apply(completion),
                None => break,
            }
        }
    }

    /// Run `fetch` on the runtime and queue its completion
    ///
    /// Every spawned fetch produces exactly one completion: if the fetch task
    /// panics or is cancelled, `on_abort` builds a failed one instead.
    fn spawn_fetch<F, A>(&mut self, fetch: F, on_abort: A)
    where
        F: Future<Output = Completion> + Send + 'static,
        A: FnOnce(String) -> Completion + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let completion = match tokio::spawn(fetch).await {
                Ok(completion) => completion,
                Err(e) => {
                    error!(error = %e, "Fetch task aborted");
                    on_abort(e.to_string())
                }
            };
            // The receiver lives as long as the estimator; a send error only
            // means it was dropped.
            let _ = tx.send(completion);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct OneCategory;

    #[async_trait]
    impl Catalog for OneCategory {
        async fn categories(&self) -> Result<Vec<Category>, AppError> {
            Ok(vec![Category {
                id: CategoryId(1),
                name: "Utility".to_string(),
            }])
        }

        async fn features(&self, _category_id: CategoryId) -> Result<Vec<Feature>, AppError> {
            Ok(vec![
                Feature {
                    id: FeatureId(1),
                    name: "Login".to_string(),
                    hours: 5,
                },
                Feature {
                    id: FeatureId(2),
                    name: "Search".to_string(),
                    hours: 3,
                },
            ])
        }
    }

    struct PanickingFeatures;

    #[async_trait]
    impl Catalog for PanickingFeatures {
        async fn categories(&self) -> Result<Vec<Category>, AppError> {
            Ok(Vec::new())
        }

        async fn features(&self, _category_id: CategoryId) -> Result<Vec<Feature>, AppError> {
            panic!("feature source blew up");
        }
    }

    fn estimator() -> Estimator {
        Estimator::new(Arc::new(OneCategory))
    }

    #[tokio::test]
    async fn test_panicking_fetch_still_completes() {
        let mut est = Estimator::new(Arc::new(PanickingFeatures));
        est.select_category(Some(CategoryId(1)));

        tokio::time::timeout(std::time::Duration::from_secs(5), est.settle())
            .await
            .expect("settle must return after a fetch task panics");

        assert_eq!(est.in_flight(), 0);
        assert!(est.state().features.is_empty());
        assert!(est
            .state()
            .features_notice
            .as_deref()
            .unwrap()
            .starts_with("Could not load features"));
    }

    #[tokio::test]
    async fn test_select_category_tracks_in_flight() {
        let mut est = estimator();
        est.select_category(Some(CategoryId(1)));
        assert_eq!(est.in_flight(), 1);

        est.settle().await;
        assert_eq!(est.in_flight(), 0);
        assert_eq!(est.state().features.len(), 2);
    }

    #[tokio::test]
    async fn test_select_none_issues_no_request() {
        let mut est = estimator();
        est.select_category(None);
        assert_eq!(est.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_toggle_feature_at_uses_listed_hours() {
        let mut est = estimator();
        est.select_category(Some(CategoryId(1)));
        est.settle().await;

        assert!(est.toggle_feature_at(1).unwrap());
        assert_eq!(est.state().selected_features.get(&FeatureId(2)), Some(&3));
        assert!(est.toggle_feature_at(5).is_err());
    }

    #[test]
    fn test_stale_features_completion_is_dropped() {
        let mut est = estimator();
        est.state.selected_category = Some(CategoryId(2));
        est.in_flight = 1;

        est.apply(Completion::Features {
            category_id: CategoryId(1),
            result: Ok(vec![Feature {
                id: FeatureId(9),
                name: "Stale".to_string(),
                hours: 1,
            }]),
        });

        assert!(est.state().features.is_empty());
        assert_eq!(est.in_flight(), 0);
    }

    #[test]
    fn test_failed_categories_sets_notice() {
        let mut est = estimator();
        est.apply(Completion::Categories(Err(AppError::DecodeError(
            "bad body".to_string(),
        ))));

        assert!(est.state().categories.is_empty());
        assert!(est
            .state()
            .categories_notice
            .as_deref()
            .unwrap()
            .contains("bad body"));
        assert!(est.state().features_notice.is_none());
        assert!(est.state().error_message.is_none());
    }
}
