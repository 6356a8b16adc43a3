//! HTTP layer: low-level provider client with retry policies.

pub mod client;
pub mod retry;

pub use client::OverlayHttp;
pub use retry::{RetryConfig, RetryPolicy};
