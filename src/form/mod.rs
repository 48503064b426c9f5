//! Terminal form for the estimator
//!
//! `view` turns estimator state into plain strings; `ui` draws them with
//! ratatui and maps key presses onto estimator operations.

pub mod ui;
pub mod view;

pub use ui::{FormApp, Pane};
pub use view::FormView;
