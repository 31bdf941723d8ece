pub mod app;
pub mod config;
mod error;
pub mod model;
pub mod templ_manager;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Compact, timestamp-less console logging for development. Honors `RUST_LOG`, defaults to `debug`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(env_filter_or("debug"))
        .compact()
        .init();
}

/// Console logging for release builds. Honors `RUST_LOG`, defaults to `info`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter_or("info"))
        .init();
}

fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
