pub mod coordinator;
pub mod executor;

pub use coordinator::ExecutionCoordinator;
pub use executor::{ExecutorConfig, OrderExecutor, SimulatedExecutor};
