use thiserror::Error;

/// Main error type for the execution service
#[derive(Error, Debug)]
pub enum OrdexError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Order execution errors
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for OrdexError
pub type Result<T> = std::result::Result<T, OrdexError>;

/// Specific error types for order execution.
///
/// Clone + PartialEq so a single failure can be fanned out to every caller
/// waiting on the same in-flight order and matched on by kind at the API
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Execution cancelled")]
    Cancelled,

    #[error("Execution timed out after {elapsed_ms}ms")]
    TimedOut { elapsed_ms: u64 },
}

impl ExecuteError {
    /// Machine-readable kind, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            ExecuteError::InvalidOrder(_) => "invalid_order",
            ExecuteError::ExecutionFailed(_) => "execution_failed",
            ExecuteError::Cancelled => "cancelled",
            ExecuteError::TimedOut { .. } => "timed_out",
        }
    }

    /// Whether resubmitting the same order can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ExecuteError::InvalidOrder(_))
    }
}
