//! Document store connectivity
//!
//! Connection setup, configuration and health probing for the MongoDB
//! deployment backing the service, plus a retry helper for flaky startups.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client helpers
//! - `config` - `core_config::FromEnv` for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::default();
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry_with_backoff};
