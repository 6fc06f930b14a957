pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod execution;

pub use config::AppConfig;
pub use domain::{Order, OrderKey, Side, Trade};
pub use error::{ExecuteError, OrdexError, Result};
pub use execution::{ExecutionCoordinator, ExecutorConfig, OrderExecutor, SimulatedExecutor};
