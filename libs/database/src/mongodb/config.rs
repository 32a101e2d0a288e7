#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

pub const DEFAULT_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "appointy";

/// MongoDB connection settings
///
/// Defaults point at a local mongod and the `appointy` database, so a bare
/// `MongoConfig::default()` is enough for development.
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://db:27017", "appointy");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, `mongodb://[user:pass@]host[:port][/db][?options]`
    pub url: String,

    /// Logical database holding the service's collections
    pub database: String,

    /// Reported to the server in connection handshakes
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,

    /// Bounds both socket connect and server selection at startup
    pub connect_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 0,
            connect_timeout_secs: 10,
        }
    }
}

/// Environment variables (all optional):
/// - `MONGODB_URL` / `MONGO_URL` - connection string
/// - `MONGODB_DATABASE` / `MONGO_DATABASE` - database name
/// - `MONGODB_APP_NAME`
/// - `MONGODB_MAX_POOL_SIZE`, `MONGODB_MIN_POOL_SIZE`
/// - `MONGODB_CONNECT_TIMEOUT_SECS`
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .unwrap_or(defaults.url);

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .unwrap_or(defaults.database);

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_appointy() {
        let config = MongoConfig::default();
        assert_eq!(config.url(), "mongodb://localhost:27017");
        assert_eq!(config.database(), "appointy");
        assert_eq!(config.connect_timeout(), std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_builders() {
        let config = MongoConfig::with_database("mongodb://db:27017", "calendar");
        assert_eq!(config.url, "mongodb://db:27017");
        assert_eq!(config.database, "calendar");
        assert_eq!(config.app_name, None);

        let config = MongoConfig::new("mongodb://other:27017");
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_without_variables_uses_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", None),
                ("MONGODB_CONNECT_TIMEOUT_SECS", None),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, DEFAULT_URL);
                assert_eq!(config.database, DEFAULT_DATABASE);
                assert_eq!(config.connect_timeout_secs, 10);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_fallback_names() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_app_name() {
        temp_env::with_var("MONGODB_APP_NAME", Some("meetings-api"), || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.app_name.as_deref(), Some("meetings-api"));
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_bad_timeout() {
        temp_env::with_var("MONGODB_CONNECT_TIMEOUT_SECS", Some("ten"), || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_CONNECT_TIMEOUT_SECS"));
        });
    }
}
