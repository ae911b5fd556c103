pub mod accumulation;
pub mod breakeven;
pub mod catalog;
pub mod config;
pub mod cost;
pub mod error;
pub mod summarize;
pub mod sweep;
pub mod workload;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
