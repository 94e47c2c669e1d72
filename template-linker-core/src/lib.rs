//! Core data model for Template Linker
//!
//! This crate contains the shared data structures used across the
//! workspace: the template block descriptor, resolved build options,
//! the option set handed to the external template compiler, and the
//! diagnostics it produces.

pub mod error;
pub mod models;

pub use error::CoreError;
pub use models::*;
