use axum::{extract::State, http::StatusCode, Json};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::api::{
    state::AppState,
    types::{ErrorResponse, HealthResponse},
};
use crate::domain::{Order, Trade};
use crate::error::ExecuteError;

/// POST /api/orders/execute
///
/// Submits an order for execution. Resubmitting a logically identical order
/// returns the previously computed trade without re-executing.
pub async fn execute_order(
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> std::result::Result<Json<Trade>, (StatusCode, Json<ErrorResponse>)> {
    let deadline = Duration::from_millis(state.order_timeout_ms);

    let result = match timeout(deadline, state.coordinator.execute_order(&order)).await {
        Ok(result) => result,
        // Timing out drops the coordinator future; if this caller was the
        // leader, the in-flight slot is released on the way out.
        Err(_) => Err(ExecuteError::TimedOut {
            elapsed_ms: state.order_timeout_ms,
        }),
    };

    match result {
        Ok(trade) => Ok(Json(trade)),
        Err(err) => {
            debug!(error = %err, "order rejected");
            Err((status_for(&err), Json(error_body(&err))))
        }
    }
}

/// GET /health -- lightweight liveness probe
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_seconds(),
    })
}

fn status_for(err: &ExecuteError) -> StatusCode {
    match err {
        ExecuteError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
        ExecuteError::ExecutionFailed(_) => StatusCode::BAD_GATEWAY,
        ExecuteError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        ExecuteError::TimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
    }
}

fn error_body(err: &ExecuteError) -> ErrorResponse {
    ErrorResponse {
        error: err.kind().to_string(),
        message: err.to_string(),
    }
}
