//! # Quill Repository
//!
//! Data access for Quill:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>   (domain interface)
//! SqliteUserRepository           (SQL for users + articles)
//!   ↓  Arc<dyn StorageHandle>    (shared handle)   → SQLite
//!   ↓  Arc<dyn AuditLog>         (append-only log) → file / tracing
//! ```

pub mod audit;
pub mod sqlite;
pub mod storage;
pub mod traits;

pub use audit::*;
pub use sqlite::*;
pub use storage::*;
pub use traits::*;
