//! Package plumbing: the container of raw parts, the ZIP writer, save
//! options and the registry of parsed parts.

/// In-memory package
mod container;
/// Save configuration
mod options;
/// Parsed part cache
mod registry;
/// ZIP writing and new-document skeletons
mod writer;

pub use container::Container;
pub use options::{Packaging, SaveOptions};
pub use registry::{DocumentPart, PartRegistry};
pub use writer::{DocumentClass, OdfStructure, PackageWriter, generate_manifest, guess_media_type};
