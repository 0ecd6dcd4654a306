//! Human-readable price formatting.

pub mod money;
pub mod num;

pub use money::{display_brl, display_eth, display_usd, Currency};
