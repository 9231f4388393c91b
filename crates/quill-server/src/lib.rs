//! # Quill Server Library
//!
//! Dependency injection wiring and startup utilities for the Quill server.

pub mod di;
pub mod startup;
