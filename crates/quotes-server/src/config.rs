//! Server configuration
//!
//! Sources, lowest priority first: built-in defaults, an optional
//! `quotes.toml` in the working directory, environment variables
//! (`BIND_ADDRESS`, `DATABASE_URL`, `MAX_CONNECTIONS`).

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "quotes";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/quotes.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_url: String,
    pub max_connections: u32,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::default().try_parsing(true))
    }

    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        if config.max_connections == 0 {
            return Err(ConfigError::Message(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().try_parsing(true).source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load_from(env_with(&[])).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ServerConfig::load_from(env_with(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_zero_connections_rejected() {
        let err = ServerConfig::load_from(env_with(&[("MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(err.to_string().contains("max_connections must be at least 1"));
    }
}
