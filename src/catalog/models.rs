//! Wire types for the catalog API
//!
//! Categories and features arrive as JSON lists of flat records. Ids are
//! integers on the wire; they are wrapped in newtypes so a feature id can
//! never be passed where a category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an application category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a feature within a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An application category, e.g. "E-commerce"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A feature with its estimated build time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub hours: u32,
}

impl Feature {
    /// Checkbox label, e.g. "Login - 5 hours"
    pub fn label(&self) -> String {
        format!("{} - {} hours", self.name, self.hours)
    }
}

/// Body returned by `/api/calculate/`
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    pub total_cost: u64,
}

/// Error body the API sends alongside 4xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
}
