// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod matcher;
pub mod metrics;
pub mod narrow;
pub mod pipeline;
pub mod profile;
pub mod resolve;
pub mod scoring;
pub mod table;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::ProfilerConfig;
pub use crate::error::{ProfileError, TableError};
pub use crate::pipeline::Predictor;
pub use crate::profile::{Characteristic, Prediction, Profile};
pub use crate::table::ReferenceTable;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs, enabled only when `PROFILER_LOG=1`.
/// Filter comes from `RUST_LOG`, defaulting to `profiler=info,warn`.
pub fn init_tracing() {
    let on = std::env::var("PROFILER_LOG")
        .ok()
        .is_some_and(|v| v == "1");
    if !on {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("profiler=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

