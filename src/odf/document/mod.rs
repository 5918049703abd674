//! The document facade.
//!
//! [`Document`] locates, and inserts, structural elements without the caller
//! writing queries. Lookups go through the part registry, so every element
//! handed out belongs to the live tree of its part and edits made through it
//! are written back on [`Document::save`].
//!
//! Element kinds are spread over submodules: text bodies, drawings, tables
//! and styles.

mod draw;
mod styles;
mod table;
mod text;


use crate::common::{Error, Result};
use crate::odf::constants::PART_CONTENT;
use crate::odf::core::{Container, DocumentClass, DocumentPart, PartRegistry, SaveOptions};
use crate::odf::query::{Predicates, QueryBuilder};
use crate::odf::xml::{Element, Position};
use std::path::Path;

/// Picks one element either by ordinal or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// 1-based position in document order
    Position(usize),
    /// Value of the kind's name attribute (`table:name`, `draw:name`)
    Name(&'a str),
}

impl<'a> Selector<'a> {
    /// Build a selector from optional parts. Exactly one must be given.
    pub fn new(position: Option<usize>, name: Option<&'a str>) -> Result<Self> {
        match (position, name) {
            (Some(position), None) => Ok(Selector::Position(position)),
            (None, Some(name)) => Ok(Selector::Name(name)),
            _ => Err(Error::InvalidArgument(
                "either a position or a name must be given, not both".to_string(),
            )),
        }
    }

    /// Position and extra predicates for a kind whose name lives in `name_attr`.
    fn split(self, name_attr: &str) -> (Option<usize>, Predicates) {
        match self {
            Selector::Position(position) => (Some(position), Predicates::new()),
            Selector::Name(name) => (None, Predicates::new().equals(name_attr, name)),
        }
    }
}

impl From<usize> for Selector<'_> {
    fn from(position: usize) -> Self {
        Selector::Position(position)
    }
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(name: &'a str) -> Self {
        Selector::Name(name)
    }
}

/// An ODF document open for editing.
///
/// A `Document` is single-threaded: its trees are shared in place and carry
/// no locks. To work on a document from another thread, clone its
/// [`Container`] (which is `Send`) and build a new `Document` there.
///
/// Cloning a `Document` copies the package bytes and starts with no parsed
/// parts, so the clone and the original never share a tree. Edits that were
/// not saved are not part of the clone.
///
/// # Examples
///
/// ```
/// use odfdoc::odf::Document;
/// use odfdoc::odf::core::DocumentClass;
/// use odfdoc::odf::elements::paragraph;
///
/// # fn main() -> odfdoc::Result<()> {
/// let document = Document::new_from_class(DocumentClass::Text);
/// document.insert_paragraph(paragraph("Standard", "Hello"), None, Default::default())?;
/// let first = document.get_paragraph(1, None)?.unwrap();
/// assert_eq!(first.text(), "Hello");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Document {
    registry: PartRegistry,
}

impl Document {
    /// Open a package file or folder.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_container(Container::open(path)?))
    }

    /// Read a package from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_container(Container::from_bytes(bytes)?))
    }

    /// Wrap an existing container.
    pub fn from_container(container: Container) -> Self {
        Self {
            registry: PartRegistry::new(container),
        }
    }

    /// A new, empty document of the given class.
    pub fn new_from_class(class: DocumentClass) -> Self {
        Self::from_container(Container::new_from_class(class))
    }

    /// A new document from a template package.
    pub fn new_from_template<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_container(Container::new_from_template(path)?))
    }

    /// The package. Edits to parsed parts reach it only on save.
    pub fn container(&self) -> &Container {
        self.registry.container()
    }

    /// Package MIME type.
    pub fn mimetype(&self) -> &str {
        self.registry.container().mimetype()
    }

    /// A part by name (`content`, `styles`, `meta`, ...), parsed on first use.
    pub fn get_part(&self, name: &str) -> Result<DocumentPart> {
        self.registry.get(name)
    }

    /// Write the parsed parts back and persist the package.
    ///
    /// With no destination the document is written to the path it was
    /// opened from.
    pub fn save(&mut self, destination: Option<&Path>, options: SaveOptions) -> Result<()> {
        self.registry.save(destination, options)
    }

    /// Write the parsed parts back and render the package as ZIP bytes.
    pub fn to_bytes(&mut self, pretty: bool) -> Result<Vec<u8>> {
        self.registry.to_bytes(pretty)
    }

    /// All `tag` elements matching `predicates`, in document order.
    ///
    /// With a context the search covers the context's subtree, in whatever
    /// tree the context belongs to; otherwise the whole of `part`.
    fn element_list(
        &self,
        tag: &str,
        predicates: Predicates,
        context: Option<&Element>,
        part: &str,
    ) -> Result<Vec<Element>> {
        self.query(tag, predicates, None, context, part)
    }

    /// The `position`-th match (or the first one), `None` when absent.
    fn element(
        &self,
        tag: &str,
        position: Option<usize>,
        predicates: Predicates,
        context: Option<&Element>,
        part: &str,
    ) -> Result<Option<Element>> {
        Ok(self
            .query(tag, predicates, position, context, part)?
            .into_iter()
            .next())
    }

    fn query(
        &self,
        tag: &str,
        predicates: Predicates,
        position: Option<usize>,
        context: Option<&Element>,
        part: &str,
    ) -> Result<Vec<Element>> {
        let query = QueryBuilder::new(tag)
            .predicates(predicates)
            .position(position)
            .context(context)
            .build()?;
        match context {
            Some(context) => context.get_element_list(query.as_str()),
            None => self.registry.get(part)?.get_element_list(query.as_str()),
        }
    }

    /// Insert into `context`, or append to the body of the content part.
    ///
    /// The body target is the last element child of `office:body`
    /// (`office:text`, `office:spreadsheet`, ...).
    fn insert_element(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        if let Some(context) = context {
            return context.insert_element(element, position);
        }

        let content = self.registry.get(PART_CONTENT)?;
        let body = content
            .get_element("//office:body")?
            .ok_or_else(|| Error::NotFound("office:body in content".to_string()))?;
        let target = body
            .children()
            .pop()
            .ok_or_else(|| Error::NotFound("document container in office:body".to_string()))?;
        target.insert_element(element, Position::LastChild)
    }
}

/// Style attribute predicate when a style is given. Each namespace names its
/// own style attribute (`text:style-name`, `table:style-name`, ...).
fn style_predicate(attribute: &str, style: Option<&str>) -> Predicates {
    Predicates::new().equals_opt(attribute, style)
}
