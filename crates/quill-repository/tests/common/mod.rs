//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use quill_config::DatabaseConfig;
use quill_core::{QuillError, QuillResult};
use quill_repository::{AuditEntry, AuditLog, MemoryAuditLog, SqliteUserRepository, StorageHandle};
use std::sync::Arc;

/// A migrated in-memory repository plus the audit log it writes to.
pub struct TestContext {
    pub repo: SqliteUserRepository,
    pub audit: Arc<MemoryAuditLog>,
    pub storage: Arc<dyn StorageHandle>,
}

pub async fn setup() -> TestContext {
    let audit = Arc::new(MemoryAuditLog::new());
    let repo = SqliteUserRepository::connect(&DatabaseConfig::in_memory(), audit.clone())
        .await
        .expect("in-memory database");
    let storage = repo.storage();
    TestContext {
        repo,
        audit,
        storage,
    }
}

/// Inserts an article directly; the repository never writes articles.
pub async fn seed_article(storage: &dyn StorageHandle, user_id: i64, title: &str, content: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO articles (user_id, title, content) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(storage.pool())
    .await
    .expect("seed article")
}

/// Audit sink that always fails.
#[derive(Debug, Default)]
pub struct BrokenAuditLog;

#[async_trait]
impl AuditLog for BrokenAuditLog {
    async fn record(&self, _entry: &AuditEntry) -> QuillResult<()> {
        Err(QuillError::internal("disk full"))
    }
}
