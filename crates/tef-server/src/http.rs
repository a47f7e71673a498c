use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tef_codec::{PurchaseRequest, ReversalRequest, TerminalResponse};
use tef_coordinator::{CoordinatorError, TransactionCoordinator};

#[derive(Clone)]
struct AppState {
    coordinator: TransactionCoordinator,
    timeout: Duration,
}

/// Build the axum router described in `SPEC_FULL.md` §6. `timeout` is the
/// `tef.timeout_ms` configuration value, applied to every purchase/reversal.
pub fn router(coordinator: TransactionCoordinator, timeout: Duration) -> Router {
    let state = Arc::new(AppState { coordinator, timeout });
    Router::new()
        .route("/api/purchase", post(purchase))
        .route("/api/reversal", post(reversal))
        .route("/api/status", get(status))
        .route("/api/health", get(health))
        .route("/api/ports", get(ports))
        .route("/api/connect", post(connect))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

async fn purchase(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<TerminalResponse>, ApiError> {
    let response = state.coordinator.send_purchase(request, Some(state.timeout)).await?;
    info!(approved = response.approved, code = %response.response_code, "purchase handled");
    Ok(Json(response))
}

async fn reversal(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReversalRequest>,
) -> Result<Json<TerminalResponse>, ApiError> {
    let response = state.coordinator.send_reversal(request, Some(state.timeout)).await?;
    info!(approved = response.approved, code = %response.response_code, "reversal handled");
    Ok(Json(response))
}

async fn status(State(state): State<Arc<AppState>>) -> Json<tef_coordinator::Status> {
    Json(state.coordinator.status().await)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
struct PortInfo {
    name: String,
}

async fn ports() -> Json<Vec<PortInfo>> {
    let ports = tokio_serial::available_ports()
        .unwrap_or_default()
        .into_iter()
        .map(|p| PortInfo { name: p.port_name })
        .collect();
    Json(ports)
}

#[derive(Debug, Deserialize)]
struct ConnectBody {
    port: String,
    /// Accepted for forward compatibility with the configuration table's
    /// `serial.baud` key; the coordinator's line parameters are fixed at
    /// construction, so a mismatched value here is logged, not applied.
    baud: Option<u32>,
}

async fn connect(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConnectBody>,
) -> Result<StatusCode, ApiError> {
    if let Some(baud) = body.baud {
        warn!(requested_baud = baud, "per-request baud override is not supported; ignoring");
    }
    if state.coordinator.status().await.connected {
        state.coordinator.disconnect().await;
    }
    state.coordinator.connect(body.port).await?;
    Ok(StatusCode::OK)
}

/// Maps `CoordinatorError` to the status codes in `SPEC_FULL.md` §6.
struct ApiError(CoordinatorError);

impl From<CoordinatorError> for ApiError {
    fn from(err: CoordinatorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoordinatorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CoordinatorError::NotConnected => StatusCode::CONFLICT,
            CoordinatorError::Busy => StatusCode::CONFLICT,
            CoordinatorError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            CoordinatorError::Transport(_) => StatusCode::BAD_GATEWAY,
            CoordinatorError::Closed => StatusCode::CONFLICT,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
