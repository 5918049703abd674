//! Unified error types for odfdoc.
//!
//! This module provides the single error type shared by the container, the
//! XML tree, the query layer and the document facade.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
