use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::time::Duration;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Bound on every CRUD statement (`DB_QUERY_TIMEOUT_SECS`)
    pub query_timeout: Duration,
    /// Bound on the startup DDL (`DB_INIT_TIMEOUT_SECS`)
    pub init_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let query_timeout = Duration::from_secs(env_parse_or_default("DB_QUERY_TIMEOUT_SECS", "3")?);
        let init_timeout = Duration::from_secs(env_parse_or_default("DB_INIT_TIMEOUT_SECS", "5")?);

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            query_timeout,
            init_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(
            [
                "DATABASE_URL",
                "PORT",
                "HOST",
                "APP_ENV",
                "DB_QUERY_TIMEOUT_SECS",
                "DB_INIT_TIMEOUT_SECS",
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.app.name, "tasks_api");
                assert_eq!(
                    config.database.url(),
                    "postgres://postgres:postgres@db:5432/postgres"
                );
                assert_eq!(config.server.port, 8056);
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.query_timeout, Duration::from_secs(3));
                assert_eq!(config.init_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://u:p@localhost:5433/tasks")),
                ("PORT", Some("9000")),
                ("APP_ENV", Some("production")),
                ("DB_QUERY_TIMEOUT_SECS", Some("1")),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.database.url(), "postgres://u:p@localhost:5433/tasks");
                assert_eq!(config.server.port, 9000);
                assert!(config.environment.is_production());
                assert_eq!(config.query_timeout, Duration::from_secs(1));
            },
        );
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        temp_env::with_var("DB_QUERY_TIMEOUT_SECS", Some("soon"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
