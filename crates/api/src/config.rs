//! Application configuration loaded from environment variables.

use person_store::{DuplicateNames, IdStrategy};
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` (default: `"0.0.0.0"`)
/// - `PORT` (default: `3001`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `DATABASE_URL`: PostgreSQL connection string; the in-memory store is
///   used when unset
/// - `PHONEBOOK_DUPLICATE_NAMES`: `reject` or `allow` (default: `reject`)
/// - `PHONEBOOK_ID_STRATEGY`: `random` or `sequential` (default: `random`)
/// - `PHONEBOOK_SEED`: `true` to start the in-memory store with sample data
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub duplicate_names: DuplicateNames,
    pub id_strategy: IdStrategy,
    pub seed: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("'{p}' is not a port number"),
            })?,
            None => defaults.port,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    reason: format!("'{other}', expected 'text' or 'json'"),
                });
            }
        };

        let duplicate_names = match lookup("PHONEBOOK_DUPLICATE_NAMES") {
            Some(v) => v.parse().map_err(|reason| ConfigError::Invalid {
                var: "PHONEBOOK_DUPLICATE_NAMES",
                reason,
            })?,
            None => defaults.duplicate_names,
        };

        let id_strategy = match lookup("PHONEBOOK_ID_STRATEGY") {
            Some(v) => v.parse().map_err(|reason| ConfigError::Invalid {
                var: "PHONEBOOK_ID_STRATEGY",
                reason,
            })?,
            None => defaults.id_strategy,
        };

        let seed = match lookup("PHONEBOOK_SEED").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "PHONEBOOK_SEED",
                    reason: format!("'{other}' is not a boolean"),
                });
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            duplicate_names,
            id_strategy,
            seed,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            database_url: None,
            duplicate_names: DuplicateNames::Reject,
            id_strategy: IdStrategy::default(),
            seed: false,
        }
    }
}
