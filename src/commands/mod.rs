//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - ui: Interactive cost form
//! - catalog: Category and feature listings
//! - estimate: Non-interactive pricing of a selection
//! - config: Configuration display and validation

pub mod catalog;
pub mod config;
pub mod estimate;
pub mod ui;
