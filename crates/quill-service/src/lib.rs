//! # Quill Service
//!
//! Business rules for user management: request validation, existence
//! checks and the translation of "absent" into `NotFound`.

pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use dto::*;
pub use r#impl::*;
pub use user_service::*;
