//! Application state for Axum handlers.

use quill_repository::StorageHandle;
use quill_service::UserService;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub storage: Arc<dyn StorageHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, storage: Arc<dyn StorageHandle>) -> Self {
        Self {
            user_service,
            storage,
        }
    }

    /// Resolves the state's components from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn UserService> + HasComponent<dyn StorageHandle>,
    {
        Self {
            user_service: module.resolve(),
            storage: module.resolve(),
        }
    }
}
