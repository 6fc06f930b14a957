//! Order execution boundary
//!
//! The coordinator treats execution as an opaque asynchronous capability that
//! may be slow and may fail. Production wiring would put a matching engine or
//! broker connection behind [`OrderExecutor`]; this crate ships a simulated
//! backend with randomized latency and pass-through pricing.

use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::{Order, Trade};
use crate::error::ExecuteError;

/// Asynchronous order execution capability.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Execute a single order and report the resulting trade.
    async fn execute(&self, order: &Order) -> Result<Trade, ExecuteError>;
}

/// Execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Lower bound of the simulated execution delay in milliseconds
    pub min_delay_ms: u64,
    /// Upper bound (exclusive) of the simulated execution delay in milliseconds
    pub max_delay_ms: u64,
    /// Per-request timeout applied around the whole execute call
    pub order_timeout_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 200,
            max_delay_ms: 1000,
            order_timeout_ms: 5000,
        }
    }
}

/// Stand-in execution backend.
///
/// Sleeps a uniformly random duration within the configured window, then
/// fills the order 1:1 at its limit price with an execution time of
/// order time + 1 minute.
pub struct SimulatedExecutor {
    config: ExecutorConfig,
}

impl SimulatedExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl OrderExecutor for SimulatedExecutor {
    async fn execute(&self, order: &Order) -> Result<Trade, ExecuteError> {
        // ThreadRng is not Send; draw the delay before the first await.
        let delay_ms = if self.config.max_delay_ms > self.config.min_delay_ms {
            use rand::Rng;
            rand::thread_rng().gen_range(self.config.min_delay_ms..self.config.max_delay_ms)
        } else {
            self.config.min_delay_ms
        };

        debug!(instrument = %order.instrument, delay_ms, "simulating execution latency");
        sleep(StdDuration::from_millis(delay_ms)).await;

        Ok(Trade {
            side: order.side,
            instrument: order.instrument.clone(),
            executed_quantity: order.quantity,
            executed_price: order.limit_price,
            execution_time: order.order_date + Duration::minutes(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn fast_config() -> ExecutorConfig {
        ExecutorConfig {
            min_delay_ms: 0,
            max_delay_ms: 1,
            order_timeout_ms: 5000,
        }
    }

    #[tokio::test]
    async fn fills_at_limit_one_minute_later() {
        let executor = SimulatedExecutor::new(fast_config());
        let order = Order {
            side: Side::Buy,
            instrument: "AAPL".to_string(),
            quantity: dec!(10),
            limit_price: dec!(150),
            order_date: Utc.with_ymd_and_hms(2025, 11, 10, 0, 0, 0).unwrap(),
        };

        let trade = executor.execute(&order).await.unwrap();
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.instrument, "AAPL");
        assert_eq!(trade.executed_quantity, dec!(10));
        assert_eq!(trade.executed_price, dec!(150));
        assert_eq!(
            trade.execution_time,
            Utc.with_ymd_and_hms(2025, 11, 10, 0, 1, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn passes_extreme_decimals_through_unchanged() {
        let executor = SimulatedExecutor::new(fast_config());
        let order = Order {
            side: Side::Sell,
            instrument: "BTC/USD".to_string(),
            quantity: dec!(0.00000001),
            limit_price: dec!(92233720368547758.08),
            order_date: Utc::now(),
        };

        let trade = executor.execute(&order).await.unwrap();
        assert_eq!(trade.executed_quantity, dec!(0.00000001));
        assert_eq!(trade.executed_price, dec!(92233720368547758.08));
    }
}
