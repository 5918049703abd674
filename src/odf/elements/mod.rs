//! Builders for the structural elements a document is edited with.
//!
//! Every builder returns a detached [`Element`](crate::odf::xml::Element)
//! ready for one of the `Document::insert_*` methods. Values are stored as
//! attributes or text nodes, never spliced into markup.

/// Frames and images
mod draw;
/// Footnotes and endnotes
mod note;
/// Styles and style properties
mod style;
/// Tables, rows, columns and cells
mod table;
/// Sections, paragraphs, headings and lists
mod text;

pub use draw::{FrameAnchor, frame, image};
pub use note::{NoteClass, note};
pub use style::{style, text_properties};
pub use table::{CellValueType, cell, column, row, table};
pub use text::{check_level, heading, list, list_item, paragraph, section};
