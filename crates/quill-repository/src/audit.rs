//! Append-only audit log for user mutations.
//!
//! Every create/update/delete writes one line: a timestamp, a short
//! human-readable message and the JSON of the affected row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{Interface, QuillError, QuillResult};
use serde::Serialize;
use serde_json::Value as JsonValue;
use shaku::Component;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Kind of mutation being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit record.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub message: String,
    pub payload: JsonValue,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Builds an entry for `resource` (e.g. `"User"`) with the serialized row.
    pub fn new<T: Serialize>(action: AuditAction, resource: &str, row: &T) -> QuillResult<Self> {
        Ok(Self {
            action,
            message: format!("{} {}", resource, action),
            payload: serde_json::to_value(row)?,
            timestamp: Utc::now(),
        })
    }

    /// Renders the entry as a single log line (no trailing newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{} {}: {}",
            self.timestamp.to_rfc3339(),
            self.message,
            self.payload
        )
    }
}

/// Sink for audit entries.
#[async_trait]
pub trait AuditLog: Interface + Send + Sync {
    /// Appends an entry. Implementations must never rewrite earlier lines.
    async fn record(&self, entry: &AuditEntry) -> QuillResult<()>;
}

/// Audit log that appends to a file and mirrors every entry to tracing.
///
/// With no path configured only the tracing event is emitted.
#[derive(Component, Default)]
#[shaku(interface = AuditLog)]
pub struct FileAuditLog {
    path: Option<PathBuf>,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileAuditLog {
    /// Creates an audit log appending to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Creates an audit log that only emits tracing events.
    #[must_use]
    pub fn tracing_only() -> Self {
        Self::default()
    }

    /// Returns the file being appended to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    async fn append_line(&self, path: &PathBuf, line: &str) -> QuillResult<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    QuillError::Internal(format!("Failed to create audit log directory: {}", e))
                })?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| QuillError::Internal(format!("Failed to open audit log: {}", e)))?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .await
            .map_err(|e| QuillError::Internal(format!("Failed to write audit log: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| QuillError::Internal(format!("Failed to flush audit log: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl AuditLog for FileAuditLog {
    async fn record(&self, entry: &AuditEntry) -> QuillResult<()> {
        info!(
            target: "audit",
            action = %entry.action,
            payload = %entry.payload,
            "{}",
            entry.message
        );

        match &self.path {
            Some(path) => self.append_line(path, &entry.to_line()).await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for FileAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAuditLog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Audit log that keeps entries in memory. Used by tests.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn record(&self, entry: &AuditEntry) -> QuillResult<()> {
        self.entries
            .lock()
            .map_err(|_| QuillError::internal("audit log mutex poisoned"))?
            .push(entry.clone());
        Ok(())
    }
}
