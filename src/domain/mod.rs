//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs` — Domain types and pure logic
//! - `wire.rs` — Raw serde structs matching upstream responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `state.rs` — State containers (pagination, caches)
//! - `client.rs` — Sub-client with HTTP methods and caching

pub mod listing;
pub mod order;
pub mod pricing;
pub mod rates;
