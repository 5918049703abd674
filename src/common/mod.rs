//! Common types and utilities shared across the crate.
//!
//! This module provides the unified error type, color interchange helpers
//! and XML text escaping used by the ODF layers.

// Submodule declarations
pub mod color;
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use color::{RGBColor, hex_to_rgb, rgb_to_hex};
pub use error::{Error, Result};
