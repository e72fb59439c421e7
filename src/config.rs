//! # Configuration
//!
//! Service settings read from environment variables.
//!
//! A `.env` file in the working directory is loaded first when present.
//! Keys are matched case-insensitively against the field names below.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GRPC_SERVER_LISTEN_ADDRESS` | `0.0.0.0` |
//! | `GRPC_SERVER_LISTEN_PORT` | `50051` |
//! | `SERVER_LISTEN_ADDRESS` | `0.0.0.0` |
//! | `SERVER_LISTEN_PORT` | `8080` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `RUN_MIGRATIONS` | `false` |
//! | `FCM_KEY` | unset |
//! | `FCM_URL` | `https://fcm.googleapis.com/fcm/send` |
//! | `FCM_TIMEOUT_MS` | `5000` |
//! | `LOG_FORMAT` | `pretty` |

use serde::Deserialize;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

/// Default push notification endpoint.
pub const DEFAULT_FCM_URL: &str = "https://fcm.googleapis.com/fcm/send";

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is missing or has the wrong type.
    #[error("configuration error: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A listen address is not an IP address.
    #[error("invalid listen address for {key}: {value}")]
    InvalidAddress {
        /// Offending variable.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// gRPC listen address.
    pub grpc_server_listen_address: String,
    /// gRPC listen port.
    pub grpc_server_listen_port: u16,
    /// HTTP (health) listen address.
    pub server_listen_address: String,
    /// HTTP (health) listen port.
    pub server_listen_port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Pool size.
    pub database_max_connections: u32,
    /// Apply embedded migrations at start-up.
    pub run_migrations: bool,
    /// Push notification server key.
    #[serde(default)]
    pub fcm_key: Option<String>,
    /// Push notification endpoint.
    pub fcm_url: String,
    /// Push request timeout in milliseconds.
    pub fcm_timeout_ms: u64,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads settings from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if `DATABASE_URL` is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(::config::Environment::default())
    }

    /// Loads settings from an explicit variable map instead of the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(::config::Environment::default().source(Some(vars)))
    }

    fn load(environment: ::config::Environment) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("grpc_server_listen_address", "0.0.0.0")?
            .set_default("grpc_server_listen_port", 50051)?
            .set_default("server_listen_address", "0.0.0.0")?
            .set_default("server_listen_port", 8080)?
            .set_default("database_max_connections", 10)?
            .set_default("run_migrations", false)?
            .set_default("fcm_url", DEFAULT_FCM_URL)?
            .set_default("fcm_timeout_ms", 5000)?
            .set_default("log_format", "pretty")?
            .add_source(environment)
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Returns the gRPC socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` if the address is not an IP.
    pub fn grpc_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(
            "GRPC_SERVER_LISTEN_ADDRESS",
            &self.grpc_server_listen_address,
            self.grpc_server_listen_port,
        )
    }

    /// Returns the HTTP socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` if the address is not an IP.
    pub fn http_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(
            "SERVER_LISTEN_ADDRESS",
            &self.server_listen_address,
            self.server_listen_port,
        )
    }

    /// Returns the push key when one is configured and non-empty.
    #[must_use]
    pub fn push_key(&self) -> Option<&str> {
        self.fcm_key.as_deref().filter(|key| !key.is_empty())
    }
}

fn socket_addr(key: &'static str, address: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    address
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, port))
        .map_err(|_| ConfigError::InvalidAddress {
            key,
            value: address.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_map(vars(&[("DATABASE_URL", "postgres://localhost/catalog")]))
            .unwrap();
        assert_eq!(config.grpc_addr().unwrap(), "0.0.0.0:50051".parse().unwrap());
        assert_eq!(config.http_addr().unwrap(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.database_max_connections, 10);
        assert!(!config.run_migrations);
        assert_eq!(config.fcm_url, DEFAULT_FCM_URL);
        assert_eq!(config.push_key(), None);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_map(vars(&[
            ("DATABASE_URL", "postgres://db/catalog"),
            ("GRPC_SERVER_LISTEN_ADDRESS", "127.0.0.1"),
            ("GRPC_SERVER_LISTEN_PORT", "6000"),
            ("SERVER_LISTEN_PORT", "9000"),
            ("RUN_MIGRATIONS", "true"),
            ("FCM_KEY", "server-key"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.grpc_addr().unwrap(), "127.0.0.1:6000".parse().unwrap());
        assert_eq!(config.http_addr().unwrap().port(), 9000);
        assert!(config.run_migrations);
        assert_eq!(config.push_key(), Some("server-key"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn digit_only_push_key_is_kept_verbatim() {
        let config = AppConfig::from_map(vars(&[
            ("DATABASE_URL", "postgres://db/catalog"),
            ("FCM_KEY", "000123"),
            ("FCM_TIMEOUT_MS", "250"),
            ("RUN_MIGRATIONS", "true"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();
        assert_eq!(config.push_key(), Some("000123"));
        assert_eq!(config.fcm_timeout_ms, 250);
        assert!(config.run_migrations);
        assert_eq!(config.database_max_connections, 4);
    }

    #[test]
    fn missing_database_url_fails() {
        let err = AppConfig::from_map(HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn invalid_port_fails() {
        let err = AppConfig::from_map(vars(&[
            ("DATABASE_URL", "postgres://db/catalog"),
            ("SERVER_LISTEN_PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn hostname_is_not_an_address() {
        let config = AppConfig::from_map(vars(&[
            ("DATABASE_URL", "postgres://db/catalog"),
            ("SERVER_LISTEN_ADDRESS", "localhost"),
        ]))
        .unwrap();
        assert!(matches!(
            config.http_addr(),
            Err(ConfigError::InvalidAddress { key: "SERVER_LISTEN_ADDRESS", .. })
        ));
    }
}
