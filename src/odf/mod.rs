//! OpenDocument editing.
//!
//! - [`xml`]: mutable element trees, parsed from and serialized to part bytes
//! - [`query`]: structural queries over those trees
//! - [`coordinates`]: `A1` cell names and repeated row/cell runs
//! - [`style`]: style families and where their styles are stored
//! - [`core`]: the package container and the parsed-part registry
//! - [`elements`]: builders for paragraphs, tables, notes, styles...
//! - [`Document`]: the facade tying them together

pub mod constants;
pub mod coordinates;
pub mod core;
pub mod elements;
pub mod query;
pub mod style;
pub mod xml;

mod document;

pub use document::{Document, Selector};
