//! Shared application state.
//!
//! Built once at startup and handed to route constructors; the store handle
//! inside is never replaced.

use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// The configured logical database
    pub db: Database,
}
