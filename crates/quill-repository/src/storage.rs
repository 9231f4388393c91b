//! SQLite storage handle.

use async_trait::async_trait;
use quill_config::DatabaseConfig;
use quill_core::{Interface, QuillError, QuillResult};
use shaku::Component;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;
use tracing::{error, info};

/// Interface for the storage handle shared by all repositories.
#[async_trait]
pub trait StorageHandle: Interface + Send + Sync {
    /// Returns a reference to the underlying SQLite pool.
    fn pool(&self) -> &SqlitePool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> QuillResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> QuillResult<()>;

    /// Closes the handle. Later queries fail with a database error.
    async fn close(&self);
}

/// SQLite handle, opened once at startup and injected into repositories.
#[derive(Component)]
#[shaku(interface = StorageHandle)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> QuillResult<Self> {
        info!("Connecting to SQLite database at {}", config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| QuillError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(config.create_if_missing)
            .foreign_keys(config.foreign_keys);

        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        if let Some(parent) = options.get_filename().parent() {
            if config.create_if_missing && !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    QuillError::Database(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                QuillError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("SQLite connection established");
        Ok(Self { pool })
    }

    /// Wraps a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageHandle for SqliteStorage {
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn health_check(&self) -> QuillResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| QuillError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> QuillResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| QuillError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection...");
        self.pool.close().await;
        info!("Database connection closed");
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let storage = SqliteStorage::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        storage.health_check().await.unwrap();
        storage.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let storage = SqliteStorage::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        storage.run_migrations().await.unwrap();
        storage.run_migrations().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'articles') ORDER BY name",
        )
        .fetch_all(storage.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["articles".to_string(), "users".to_string()]);
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quill.sqlite");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            ..DatabaseConfig::default()
        };

        let storage = SqliteStorage::connect(&config).await.unwrap();
        storage.health_check().await.unwrap();
        storage.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_connect_fails_for_missing_file_without_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sqlite");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            create_if_missing: false,
            connect_timeout_secs: 1,
            ..DatabaseConfig::default()
        };

        let result = SqliteStorage::connect(&config).await;
        assert!(matches!(result, Err(QuillError::Database(_))));
    }

    #[tokio::test]
    async fn test_health_check_fails_after_close() {
        let storage = SqliteStorage::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        storage.close().await;
        assert!(storage.health_check().await.is_err());
    }
}
