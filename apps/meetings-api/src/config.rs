use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_meetings::MeetingTimeouts;
use domain_meetings::mongodb::DEFAULT_COLLECTION;
use std::time::Duration;

pub use core_config::Environment;

/// Settings owned by the meetings domain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeetingsConfig {
    pub collection: String,
    pub timeouts: MeetingTimeouts,
}

impl FromEnv for MeetingsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = MeetingTimeouts::default();
        let create = env_parse_or("MEETINGS_CREATE_TIMEOUT_SECS", defaults.create.as_secs())?;
        let read = env_parse_or("MEETINGS_READ_TIMEOUT_SECS", defaults.read.as_secs())?;

        Ok(Self {
            collection: env_or_default("MEETINGS_COLLECTION", DEFAULT_COLLECTION),
            timeouts: MeetingTimeouts {
                create: Duration::from_secs(create),
                read: Duration::from_secs(read),
            },
        })
    }
}

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub meetings: MeetingsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let meetings = MeetingsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            meetings,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 9] = [
        "MONGODB_URL",
        "MONGO_URL",
        "MONGODB_DATABASE",
        "MONGO_DATABASE",
        "PORT",
        "HOST",
        "MEETINGS_COLLECTION",
        "MEETINGS_CREATE_TIMEOUT_SECS",
        "MEETINGS_READ_TIMEOUT_SECS",
    ];

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars_unset(VARS, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.mongodb.url(), "mongodb://localhost:27017");
            assert_eq!(config.mongodb.database(), "appointy");
            assert_eq!(config.server.port, 12345);
            assert_eq!(config.meetings.collection, "meetings");
            assert_eq!(config.meetings.timeouts, MeetingTimeouts::default());
            assert_eq!(config.app.name, "meetings_api");
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("MEETINGS_COLLECTION", Some("meetings_v2")),
                ("MEETINGS_CREATE_TIMEOUT_SECS", Some("2")),
                ("MEETINGS_READ_TIMEOUT_SECS", Some("9")),
                ("PORT", Some("8080")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.meetings.collection, "meetings_v2");
                assert_eq!(config.meetings.timeouts.create, Duration::from_secs(2));
                assert_eq!(config.meetings.timeouts.read, Duration::from_secs(9));
                assert_eq!(config.server.port, 8080);
            },
        );
    }

    #[test]
    fn test_bad_timeout_is_parse_error() {
        temp_env::with_var("MEETINGS_READ_TIMEOUT_SECS", Some("soon"), || {
            let err = MeetingsConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "MEETINGS_READ_TIMEOUT_SECS"));
        });
    }
}
