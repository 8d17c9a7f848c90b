//! Service configuration
//!
//! Read from a JSON file; every field has a default so a missing file or an
//! empty object yields a runnable service.
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 5000, "cors_origins": ["*"] },
//!   "connection_strings": { "pizzas": "Data Source=Pizzas.db" },
//!   "logging": { "filter": "info", "format": "json" }
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::{ConnectionString, DEFAULT_CONNECTION_STRING};
use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;

/// Environment variable overriding `connection_strings.pizzas`
pub const CONNECTION_STRING_ENV: &str = "PIZZASTORE_CONNECTION_STRING";

/// Named connection strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStrings {
    #[serde(default)]
    pub pizzas: Option<String>,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub connection_strings: ConnectionStrings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    ConnectionString(#[from] crate::db::DbError),
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load from file if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "event=config_load status=defaults");
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Raw connection string: environment, then file, then the built-in default
    pub fn pizzas_connection_string(&self) -> String {
        self.resolve_connection_string(std::env::var(CONNECTION_STRING_ENV).ok())
    }

    fn resolve_connection_string(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.connection_strings.pizzas.clone())
            .unwrap_or_else(|| DEFAULT_CONNECTION_STRING.to_string())
    }

    /// Parsed connection string for the pizza store
    pub fn pizzas_connection(&self) -> Result<ConnectionString, ConfigError> {
        Ok(self.pizzas_connection_string().parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DataSource;
    use crate::observability::LogFormat;

    #[test]
    fn test_empty_object_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.port, 5000);
    }

    #[test]
    fn test_connection_string_precedence() {
        let mut config = Config::default();
        assert_eq!(
            config.resolve_connection_string(None),
            DEFAULT_CONNECTION_STRING
        );

        config.connection_strings.pizzas = Some("Data Source=file.db".to_string());
        assert_eq!(config.resolve_connection_string(None), "Data Source=file.db");
        assert_eq!(
            config.resolve_connection_string(Some("Data Source=env.db".to_string())),
            "Data Source=env.db"
        );
        assert_eq!(
            config.resolve_connection_string(Some("  ".to_string())),
            "Data Source=file.db"
        );
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_json(
            r#"{
                "http": {"port": 8081, "cors_origins": ["http://example.com"]},
                "connection_strings": {"pizzas": "Data Source=:memory:"},
                "logging": {"format": "json"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.http.port, 8081);
        assert!(!config.http.allows_any_origin());
        assert_eq!(config.logging.format, LogFormat::Json);
        let conn: ConnectionString = config.resolve_connection_string(None).parse().unwrap();
        assert_eq!(conn.data_source(), &DataSource::Memory);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(Config::load(&path), Err(ConfigError::Read { .. })));
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Json(_))));
    }
}
