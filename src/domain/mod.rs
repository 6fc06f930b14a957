pub mod order;
pub mod trade;

pub use order::{Order, OrderKey, Side};
pub use trade::Trade;
