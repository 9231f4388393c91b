//! # Quill Core
//!
//! Core types, domain entities, and error definitions for Quill.
//! Every other crate in the workspace builds on the abstractions here.

pub mod domain;
pub mod error;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, Component, HasComponent, Interface, Module};
