use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::history::{History, HistoryEntry};
use crate::pipeline::{anon_id, CharacteristicTrace, Predictor};
use crate::profile::Profile;

#[derive(Clone)]
pub struct AppState {
    predictor: Arc<Predictor>,
    history: Arc<History>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
            history: Arc::new(History::with_capacity(2000)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/predict", post(predict))
        .route("/explain", post(explain))
        .route("/debug/history", get(debug_history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct PredictReq {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    searches: Vec<String>,
}

type ApiError = (StatusCode, String);

fn internal(e: impl std::fmt::Display) -> ApiError {
    warn!(target: "profiler", error = %e, "prediction failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

async fn predict(
    State(state): State<AppState>,
    Json(body): Json<PredictReq>,
) -> Result<Json<Profile>, ApiError> {
    let (profile, traces) = state
        .predictor
        .predict_traced(body.name, &body.searches)
        .map_err(internal)?;

    let matched = traces.iter().map(|t| t.keywords.len()).sum();
    state
        .history
        .push(anon_id(&body.searches), matched, &profile);
    Ok(Json(profile))
}

async fn explain(
    State(state): State<AppState>,
    Json(body): Json<PredictReq>,
) -> Result<Json<Vec<CharacteristicTrace>>, ApiError> {
    state
        .predictor
        .explain(&body.searches)
        .map(Json)
        .map_err(internal)
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(10))
}
