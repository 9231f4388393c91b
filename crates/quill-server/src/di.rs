//! Dependency injection module using Shaku.
//!
//! `AppModule` wires the full stack for a single process:
//! storage handle → audit log → user repository → user service.

use quill_config::AppConfig;
use quill_core::{module, HasComponent, QuillResult};
use quill_repository::{
    AuditLog, FileAuditLog, SqliteStorage, SqliteUserRepository, StorageHandle,
};
use quill_service::{UserService, UserServiceImpl};
use std::sync::Arc;
use tracing::info;

module! {
    pub AppModule {
        components = [
            SqliteStorage,
            FileAuditLog,
            SqliteUserRepository,
            UserServiceImpl,
        ],
        providers = [],
    }
}

impl AppModule {
    /// Resolves the user service.
    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    /// Resolves the shared storage handle.
    pub fn storage(&self) -> Arc<dyn StorageHandle> {
        self.resolve()
    }
}

/// Opens storage, applies migrations and builds the application module.
///
/// The storage handle and audit log need runtime configuration, so they are
/// supplied as overrides; the repository and service are built by Shaku.
pub async fn build_app_module(config: &AppConfig) -> QuillResult<Arc<AppModule>> {
    let storage = SqliteStorage::connect(&config.database).await?;

    if config.database.run_migrations {
        storage.run_migrations().await?;
    }

    let audit_log = if config.audit.enabled {
        info!("Audit log: {}", config.audit.path.display());
        FileAuditLog::new(&config.audit.path)
    } else {
        info!("Audit log file disabled; entries go to tracing only");
        FileAuditLog::tracing_only()
    };

    let module = AppModule::builder()
        .with_component_override::<dyn StorageHandle>(Box::new(storage))
        .with_component_override::<dyn AuditLog>(Box::new(audit_log))
        .build();

    Ok(Arc::new(module))
}
