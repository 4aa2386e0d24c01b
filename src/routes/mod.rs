// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, MutexGuard};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::error::SimulatorError;
use crate::models::TelemetrySnapshot;
use crate::simulator::Simulator;
use crate::worker::{LiveSwitch, SharedSimulator};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) simulator: SharedSimulator,
    pub(crate) stats_tx: broadcast::Sender<TelemetrySnapshot>,
    pub(crate) live: LiveSwitch,
    pub(crate) ws_telemetry_connections: Arc<AtomicUsize>,
}

impl AppState {
    pub(crate) fn lock_simulator(&self) -> Result<MutexGuard<'_, Simulator>, ApiError> {
        self.simulator.lock().map_err(|_| ApiError::LockPoisoned)
    }
}

/// Errors surfaced to HTTP clients as `{"error": "..."}`.
#[derive(Debug)]
pub(crate) enum ApiError {
    Simulator(SimulatorError),
    LockPoisoned,
}

impl From<SimulatorError> for ApiError {
    fn from(e: SimulatorError) -> Self {
        ApiError::Simulator(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Simulator(e @ SimulatorError::UnknownSensor(_))
            | ApiError::Simulator(e @ SimulatorError::UnknownSegment(_)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::Simulator(e @ SimulatorError::NoSamples) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            ApiError::LockPoisoned => {
                tracing::warn!(operation = "lock_simulator", "simulator lock poisoned");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "simulator unavailable".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn app(
    simulator: SharedSimulator,
    stats_tx: broadcast::Sender<TelemetrySnapshot>,
    live: LiveSwitch,
    ws_telemetry_connections: Arc<AtomicUsize>,
) -> Router {
    let state = AppState {
        simulator,
        stats_tx,
        live,
        ws_telemetry_connections,
    };
    Router::new()
        .route("/", get(http::root_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/sensors", get(http::sensors_handler)) // GET /api/sensors
        .route("/api/sensors/{id}/reading", get(http::sensor_reading_handler)) // GET /api/sensors/{id}/reading
        .route(
            "/api/sensors/{id}/inference-request",
            get(http::inference_request_handler),
        ) // GET /api/sensors/{id}/inference-request
        .route("/api/telemetry/latest", get(http::latest_handler)) // GET /api/telemetry/latest
        .route("/api/telemetry/history", get(http::history_handler)) // GET /api/telemetry/history
        .route("/api/segments", get(http::segments_handler)) // GET /api/segments
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route(
            "/api/live",
            get(http::live_handler).put(http::set_live_handler),
        ) // GET, PUT /api/live
        .route("/ws/telemetry", get(ws::ws_telemetry)) // WS /ws/telemetry
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
