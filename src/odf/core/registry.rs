//! Lazily parsed document parts.
//!
//! The registry parses a part the first time it is asked for and hands out
//! the same tree afterwards, so edits made through any handle accumulate in
//! one place. On save only the parts that were parsed are serialized back
//! into the container; the others keep their original bytes.

use super::container::Container;
use super::options::SaveOptions;
use crate::common::Result;
use crate::odf::constants::{part_name, part_path};
use crate::odf::xml::Element;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// A named XML part of a package and its root element.
///
/// Cloning shares the tree.
#[derive(Debug, Clone)]
pub struct DocumentPart {
    name: String,
    root: Element,
}

impl DocumentPart {
    /// Part name (`content`, `styles`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root element of the part.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Evaluate a query against the part root.
    pub fn get_element_list(&self, query: &str) -> Result<Vec<Element>> {
        self.root.get_element_list(query)
    }

    /// First match of a query against the part root.
    pub fn get_element(&self, query: &str) -> Result<Option<Element>> {
        self.root.get_element(query)
    }

    /// Serialize the part.
    pub fn serialize(&self, pretty: bool) -> Vec<u8> {
        self.root.to_bytes(pretty)
    }
}

/// Cache of parsed parts over a [`Container`].
pub struct PartRegistry {
    container: Container,
    parts: RefCell<HashMap<String, DocumentPart>>,
}

impl PartRegistry {
    /// Registry over `container` with nothing parsed yet.
    pub fn new(container: Container) -> Self {
        Self {
            container,
            parts: RefCell::new(HashMap::new()),
        }
    }

    /// The underlying container. Parsed parts are only written into it on
    /// [`PartRegistry::sync`] or [`PartRegistry::save`].
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The part called `name`, parsed on first use.
    ///
    /// A standard part name and its package path (`content` and
    /// `content.xml`) share one tree.
    ///
    /// Fails with [`crate::Error::PartNotFound`] when the container has no
    /// such part.
    pub fn get(&self, name: &str) -> Result<DocumentPart> {
        let key = cache_key(name);
        if let Some(part) = self.parts.borrow().get(key) {
            return Ok(part.clone());
        }

        let bytes = self.container.get_part(name)?;
        let part = DocumentPart {
            name: key.to_string(),
            root: Element::from_bytes(bytes)?,
        };
        log::debug!("materialized part {} ({} bytes)", key, bytes.len());
        self.parts.borrow_mut().insert(key.to_string(), part.clone());
        Ok(part)
    }

    /// Whether `name` has been parsed.
    pub fn is_cached(&self, name: &str) -> bool {
        self.parts.borrow().contains_key(cache_key(name))
    }

    /// Names of the parsed parts, sorted.
    pub fn cached_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.parts.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Write every parsed part back into the container.
    pub fn sync(&mut self, pretty: bool) {
        let parts = self.parts.get_mut();
        let mut names: Vec<&String> = parts.keys().collect();
        names.sort();
        for name in names {
            let bytes = parts[name].serialize(pretty);
            log::debug!("synchronized part {} ({} bytes)", name, bytes.len());
            self.container.set_part(name, bytes);
        }
    }

    /// Sync and persist the container.
    pub fn save(&mut self, destination: Option<&Path>, options: SaveOptions) -> Result<()> {
        self.sync(options.pretty);
        self.container.save(destination, options.packaging)
    }

    /// Sync and render the container as ZIP bytes.
    pub fn to_bytes(&mut self, pretty: bool) -> Result<Vec<u8>> {
        self.sync(pretty);
        self.container.to_bytes()
    }
}

/// Standard parts are cached under their short name whichever way they
/// are asked for.
fn cache_key(name: &str) -> &str {
    part_name(part_path(name))
}

impl Clone for PartRegistry {
    /// Copies the container bytes and starts with an empty cache, so the
    /// clone shares no tree with `self`. Unsaved edits of `self` are not
    /// carried over.
    fn clone(&self) -> Self {
        log::debug!("cloned registry ({} cached part(s) dropped)", self.parts.borrow().len());
        Self::new(self.container.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::odf::core::DocumentClass;

    fn registry() -> PartRegistry {
        PartRegistry::new(Container::new_from_class(DocumentClass::Text))
    }

    #[test]
    fn test_same_tree_on_every_get() {
        let registry = registry();
        assert!(!registry.is_cached("content"));
        let first = registry.get("content").unwrap();
        let second = registry.get("content").unwrap();
        assert_eq!(first.root(), second.root());
        assert_eq!(registry.cached_names(), ["content"]);
    }

    #[test]
    fn test_name_and_path_share_one_tree() {
        let mut registry = registry();
        let by_name = registry.get("content").unwrap();
        assert!(registry.is_cached("content.xml"));

        let by_path = registry.get("content.xml").unwrap();
        assert_eq!(by_name.root(), by_path.root());
        assert_eq!(by_path.name(), "content");
        assert_eq!(registry.cached_names(), ["content"]);

        by_name.root().set_attribute("office:version", "1.3");
        registry.sync(false);
        let reparsed = Element::from_bytes(registry.container().get_part("content.xml").unwrap()).unwrap();
        assert_eq!(reparsed.get_attribute("office:version").as_deref(), Some("1.3"));
    }

    #[test]
    fn test_missing_part_propagates() {
        let registry = registry();
        assert!(matches!(registry.get("Pictures/a.png"), Err(Error::PartNotFound(_))));
        assert!(registry.cached_names().is_empty());
    }

    #[test]
    fn test_sync_writes_only_parsed_parts() {
        let mut registry = registry();
        let styles_before = registry.container().get_part("styles").unwrap().to_vec();

        let content = registry.get("content").unwrap();
        let text = content.get_element("//office:text").unwrap().unwrap();
        text.set_attribute("text:use-soft-page-breaks", "true");
        registry.sync(false);

        let reparsed = Element::from_bytes(registry.container().get_part("content").unwrap()).unwrap();
        let text = reparsed.get_element("//office:text").unwrap().unwrap();
        assert_eq!(text.get_attribute("text:use-soft-page-breaks").as_deref(), Some("true"));
        assert_eq!(registry.container().get_part("styles").unwrap(), styles_before.as_slice());
    }

    #[test]
    fn test_clone_starts_empty() {
        let registry = registry();
        let content = registry.get("content").unwrap();
        content.root().set_attribute("office:version", "9");

        let copy = registry.clone();
        assert!(copy.cached_names().is_empty());
        let copied = copy.get("content").unwrap();
        assert_ne!(copied.root(), content.root());
        assert_eq!(copied.root().get_attribute("office:version").as_deref(), Some("1.2"));
    }
}
