//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Audit log configuration.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "quill".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration.
///
/// The defaults open a single shared connection to a file database, which is
/// all SQLite needs for serialised writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL (`sqlite://path/to/file.sqlite` or `sqlite::memory:`).
    pub url: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds. `None` keeps connections open forever.
    pub idle_timeout_secs: Option<u64>,
    /// Create the database file when it does not exist.
    pub create_if_missing: bool,
    /// Enforce `REFERENCES` clauses (`PRAGMA foreign_keys`).
    pub foreign_keys: bool,
    /// Apply bundled migrations on startup.
    pub run_migrations: bool,
    /// Log every SQL statement at debug level.
    pub log_queries: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/quill.sqlite".to_string(),
            min_connections: 1,
            max_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: None,
            create_if_missing: true,
            foreign_keys: false,
            run_migrations: true,
            log_queries: false,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database.
    ///
    /// Every SQLite `:memory:` connection is a separate database, so the pool
    /// is pinned to exactly one connection that is never reaped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            idle_timeout_secs: None,
            ..Self::default()
        }
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

/// Audit log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Write audit lines to `path`. When disabled, entries only go to tracing.
    pub enabled: bool,
    /// Append-only log file.
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("logs/audit.log"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log format (json, pretty).
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,quill=debug,tower_http=debug".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_pins_single_connection() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.min_connections, 1);
        assert!(config.idle_timeout().is_none());
        assert!(config.run_migrations);
    }

    #[test]
    fn test_logging_format() {
        let mut logging = LoggingConfig::default();
        assert!(!logging.is_json());
        logging.format = "JSON".to_string();
        assert!(logging.is_json());
    }

    #[test]
    fn test_durations() {
        let db = DatabaseConfig {
            idle_timeout_secs: Some(60),
            ..DatabaseConfig::default()
        };
        assert_eq!(db.connect_timeout(), Duration::from_secs(30));
        assert_eq!(db.idle_timeout(), Some(Duration::from_secs(60)));
    }
}
