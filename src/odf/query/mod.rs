//! Structural queries over element trees.
//!
//! [`QueryBuilder`] renders queries and [`evaluate`] runs them. Both sides
//! share one small grammar: tag or tag union, attribute predicates, an
//! optional ordinal and an optional context path.

mod builder;
mod eval;

pub use builder::{AttrMatch, Predicates, QueryBuilder, StructuralQuery, TagPattern, build_query};
pub use eval::evaluate;
