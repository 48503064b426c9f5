pub mod catalog;
pub mod config;
pub mod error;
pub mod estimator;
pub mod form;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `default_level`. With a `log_file` every event is
/// appended there. Without one, events go to stderr, unless `quiet` is set
/// (the terminal form owns the screen), in which case they are dropped.
///
/// Note: This function can only be called once.
pub fn init_tracing(
    default_level: &str,
    log_file: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None if quiet => {
            registry
                .with(fmt::layer().with_writer(std::io::sink))
                .init();
        }
        None => {
            registry
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
