//! In-memory XML tree for ODF parts.
//!
//! Parts are parsed into shared [`Element`] handles, queried with the
//! structural query language of [`crate::odf::query`], mutated in place and
//! serialized back on save.

mod element;
mod parser;
mod writer;

pub use element::{Element, Node, Position};
pub(crate) use element::ElementData;
