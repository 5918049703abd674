//! odfdoc - structural editing of OpenDocument packages
//!
//! This library opens ODF packages (.odt, .ods, .odp, .odg), parses their XML
//! parts on demand and lets callers find, create and insert paragraphs,
//! headings, tables, cells, frames, notes and styles without writing queries
//! by hand. Edited parts are written back into the package on save; parts
//! never touched keep their original bytes.
//!
//! # Features
//!
//! - **Lazy parts**: `content.xml`, `styles.xml` and friends are parsed the
//!   first time they are needed and cached for the life of the document
//! - **Structural queries**: tag, attribute, position and context constraints
//!   rendered to one deterministic query
//! - **Cell names**: `B12` resolved through repeated rows and cells without
//!   expanding them
//! - **Style scopes**: styles looked up and stored in the right area
//!   (common, automatic or master styles) for their family
//! - **Packaging**: ZIP packages and unpacked folders, templates, new
//!   documents from scratch
//!
//! # Example - Adding content to a new text document
//!
//! ```
//! use odfdoc::odf::Document;
//! use odfdoc::odf::core::{DocumentClass, SaveOptions};
//! use odfdoc::odf::elements::{heading, paragraph};
//! use odfdoc::odf::xml::Position;
//!
//! # fn main() -> odfdoc::Result<()> {
//! let mut document = Document::new_from_class(DocumentClass::Text);
//! document.insert_heading(heading("Heading_20_1", 1, "Minutes")?, None, Position::LastChild)?;
//! document.insert_paragraph(paragraph("Standard", "Nothing to report."), None, Position::LastChild)?;
//!
//! assert_eq!(document.get_heading_list(None, Some(1), None)?.len(), 1);
//! let bytes = document.to_bytes(false)?;
//! let reopened = Document::from_bytes(&bytes)?;
//! assert_eq!(reopened.get_paragraph(1, None)?.unwrap().text(), "Nothing to report.");
//! # let _ = SaveOptions::default();
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a spreadsheet cell
//!
//! ```no_run
//! use odfdoc::odf::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = Document::open("budget.ods")?;
//! let sheet = document.get_table("Sheet1", None)?.expect("no such sheet");
//! let cell = document.get_cell("B12", &sheet)?;
//! println!("B12 = {}", cell.text_recursive());
//! # Ok(())
//! # }
//! ```

/// Shared utilities: errors, colors, XML escaping
pub mod common;

/// OpenDocument trees, queries, packages and the document facade
pub mod odf;

pub use common::{Error, Result};
