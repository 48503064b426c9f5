//! Catalog access
//!
//! This module provides the read-only view of the remote catalog: the
//! category list, the per-category feature list and the server-side quote.

pub mod client;
pub mod models;

// Re-export commonly used types
pub use client::{Catalog, CatalogClient};
pub use models::{Category, CategoryId, Feature, FeatureId};
