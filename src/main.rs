//! Search Profiler — Binary Entrypoint
//! Boots the Axum HTTP server with reference tables loaded once at startup.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;

use search_profiler::metrics::Metrics;
use search_profiler::{create_router, init_tracing, AppState, ProfilerConfig};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = ProfilerConfig::load_default().context("loading profiler config")?;
    let predictor = cfg.build_predictor()?;

    let metrics = Metrics::init(&predictor)?;
    let router = create_router(AppState::new(predictor)).merge(metrics.router());

    Ok(router.into())
}
