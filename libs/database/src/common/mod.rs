//! Helpers shared by every store connector

pub mod retry;

pub use retry::{RetryConfig, retry_with_backoff};
