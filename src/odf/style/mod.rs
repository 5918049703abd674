//! Style families and style lookup scopes.

mod family;
mod resolver;

pub use family::{StyleFamily, StyleScope};
pub use resolver::{StyleLookup, StyleName, resolve, resolve_by_name};
