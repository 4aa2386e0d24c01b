// GET handlers for the dashboard read API, plus the live/paused toggle

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::models::InferenceRequest;
use crate::version::{NAME, VERSION, banner};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(super) struct LiveBody {
    pub(super) live: bool,
}

/// GET / — plain-text banner.
pub(super) async fn root_handler() -> impl IntoResponse {
    banner()
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn sensors_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    Ok(Json(sim.sensors().to_vec()))
}

/// GET /api/sensors/{id}/reading — 404 for an unknown sensor.
pub(super) async fn sensor_reading_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    Ok(Json(sim.reading(&id)?))
}

/// Normal-operation acoustic level in dB; simulated sensors have no microphone.
const DEFAULT_ACOUSTIC_DB: f64 = 40.0;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InferenceQuery {
    pub(super) acoustic_db: Option<f64>,
}

/// GET /api/sensors/{id}/inference-request — the sensor's current reading as the
/// payload the leak inference service accepts.
pub(super) async fn inference_request_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<InferenceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    let reading = sim.reading(&id)?;
    let acoustic_db = query.acoustic_db.unwrap_or(DEFAULT_ACOUSTIC_DB);
    Ok(Json(InferenceRequest::from_sensor_reading(&reading, acoustic_db)))
}

pub(super) async fn latest_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    Ok(Json(sim.latest()?))
}

/// GET /api/telemetry/history — oldest first.
pub(super) async fn history_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    Ok(Json(sim.history()))
}

pub(super) async fn segments_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    Ok(Json(sim.segments()))
}

pub(super) async fn health_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sim = state.lock_simulator()?;
    Ok(Json(sim.health_report()))
}

pub(super) async fn live_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(LiveBody {
        live: state.live.is_live(),
    })
}

/// PUT /api/live — pause or resume ticking.
pub(super) async fn set_live_handler(
    State(state): State<AppState>,
    Json(body): Json<LiveBody>,
) -> impl IntoResponse {
    let previous = state.live.set(body.live);
    if previous != body.live {
        tracing::info!(live = body.live, "Live flag changed via API");
    }
    Json(body)
}
