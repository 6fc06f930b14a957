use serde::{Deserialize, Serialize};

/// Wire shape for any failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable kind ("invalid_order", "execution_failed", ...)
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: i64,
}
