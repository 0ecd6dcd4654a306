//! HTTP client layer — `StorefrontHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::{Endpoints, StorefrontHttp};
pub use retry::{RetryConfig, RetryDecision, RetryPolicy};
