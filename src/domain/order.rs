use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExecuteError;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order submitted for execution. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub instrument: String,
    /// Quantity to trade. Decimal so fractional and very large sizes carry
    /// full precision through identity and execution.
    pub quantity: Decimal,
    pub limit_price: Decimal,
    pub order_date: DateTime<Utc>,
}

impl Order {
    /// Check field-level validity. Runs before identity computation and
    /// before any shared state is touched.
    pub fn validate(&self) -> Result<(), ExecuteError> {
        if self.instrument.trim().is_empty() {
            return Err(ExecuteError::InvalidOrder(
                "instrument must be non-empty".to_string(),
            ));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(ExecuteError::InvalidOrder(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.limit_price <= Decimal::ZERO {
            return Err(ExecuteError::InvalidOrder(format!(
                "limit price must be positive, got {}",
                self.limit_price
            )));
        }
        Ok(())
    }
}

/// Deterministic identity of an order, derived from its full field tuple.
///
/// Two orders with the same semantic content always produce the same key;
/// orders differing in any field produce different keys. The key is an exact
/// canonical serialization rather than a hash, so collisions cannot occur for
/// distinct tuples under normal input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderKey(String);

impl OrderKey {
    /// Compute the identity of a validated order.
    ///
    /// Decimals are normalized before rendering so scale-only differences
    /// (150 vs 150.00) map to the same key. The timestamp renders as
    /// fixed-width RFC 3339 with nanoseconds, which round-trips exactly.
    pub fn for_order(order: &Order) -> Self {
        Self(format!(
            "{}-{}-{}-{}-{}",
            order.side,
            order.instrument,
            order.quantity.normalize(),
            order.limit_price.normalize(),
            order.order_date.to_rfc3339_opts(SecondsFormat::Nanos, true),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
