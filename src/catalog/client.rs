//! HTTP client for the catalog API
//!
//! A thin wrapper around `reqwest` that knows the three GET endpoints of the
//! catalog service. Requests are issued once; there are no retries and no
//! client-side timeout.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::models::{
    ApiErrorBody, Category, CategoryId, Feature, FeatureId, QuoteResponse,
};
use crate::error::AppError;
use crate::estimator::VALIDATION_MESSAGE;

/// Source of categories and features
///
/// The estimator only depends on this trait so it can be driven by an
/// in-memory catalog in tests.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch every category
    async fn categories(&self) -> Result<Vec<Category>, AppError>;

    /// Fetch the features belonging to one category
    async fn features(&self, category_id: CategoryId) -> Result<Vec<Feature>, AppError>;
}

/// HTTP client for the catalog endpoints
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client
    ///
    /// # Arguments
    /// * `base_url` - Scheme and host of the API (e.g., "https://appcostcalculator.onrender.com")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Ask the server to price a selection
    ///
    /// The same validation as the local form is applied before any request
    /// is sent.
    pub async fn quote(
        &self,
        category_id: Option<CategoryId>,
        feature_ids: &[FeatureId],
    ) -> Result<u64, AppError> {
        let category_id = match category_id {
            Some(id) if !feature_ids.is_empty() => id,
            _ => return Err(AppError::Validation(VALIDATION_MESSAGE.to_string())),
        };

        let mut query = vec![("category_id", category_id.to_string())];
        query.extend(feature_ids.iter().map(|id| ("features[]", id.to_string())));

        let request = self.client.get(self.endpoint("calculate/")).query(&query);
        let quote: QuoteResponse = self.get_json(request).await?;
        Ok(quote.total_cost)
    }

    /// Send a request and decode a JSON body
    ///
    /// # Errors
    /// Returns an error if:
    /// - Network request fails
    /// - Response status is not successful (2xx); the API's `{"error": ...}`
    ///   message is used when present
    /// - Response body is not the expected JSON
    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) if body.is_empty() => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                Err(_) => body,
            };
            return Err(AppError::UpstreamError { status, message });
        }

        let bytes = response.bytes().await?;
        debug!(url = %url, bytes = bytes.len(), "Catalog response received");

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn categories(&self) -> Result<Vec<Category>, AppError> {
        let request = self.client.get(self.endpoint("categories/"));
        self.get_json(request).await
    }

    async fn features(&self, category_id: CategoryId) -> Result<Vec<Feature>, AppError> {
        let request = self
            .client
            .get(self.endpoint("features/"))
            .query(&[("category_id", category_id.to_string())]);
        self.get_json(request).await
    }
}
