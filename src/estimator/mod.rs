//! Selection-and-pricing controller
//!
//! [`Estimator`] owns the form state and is the only thing that mutates it.
//! Fetches run as spawned tasks and come back as [`Completion`] values which
//! the owner applies on its own task.

pub mod batch;
pub mod controller;
pub mod state;

pub use batch::{estimate_selection, EstimateReport};
pub use controller::{Completion, Estimator};
pub use state::EstimatorState;

/// Price of one hour of work
pub const HOURLY_RATE: u64 = 10;

/// Shown when a cost is requested without a category or without features
pub const VALIDATION_MESSAGE: &str = "Please select an app category and at least one feature.";
