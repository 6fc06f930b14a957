use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;

/// Result of executing an order. Immutable once created.
///
/// Side and instrument always equal the originating order's; executed
/// quantity, price and execution time are whatever the executor reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub instrument: String,
    pub executed_quantity: Decimal,
    pub executed_price: Decimal,
    pub execution_time: DateTime<Utc>,
}
