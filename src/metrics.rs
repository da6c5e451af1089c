use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::pipeline::Predictor;
use crate::profile::Characteristic;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and publish static table-size gauges.
    pub fn init(predictor: &Predictor) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        for c in Characteristic::ALL {
            let keywords = predictor.table(c).map(|t| t.len()).unwrap_or(0);
            gauge!("profile_table_keywords", "characteristic" => c.name()).set(keywords as f64);
        }
        gauge!("profile_narrow_gap").set(predictor.narrow_gap() as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
