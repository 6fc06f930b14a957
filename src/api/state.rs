use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::execution::ExecutionCoordinator;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Execution coordinator (the deduplicating core)
    pub coordinator: Arc<ExecutionCoordinator>,

    /// Per-request timeout for order execution, in milliseconds
    pub order_timeout_ms: u64,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(coordinator: Arc<ExecutionCoordinator>, order_timeout_ms: u64) -> Self {
        Self {
            coordinator,
            order_timeout_ms,
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
