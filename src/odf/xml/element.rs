//! Mutable XML element handles.
//!
//! An [`Element`] is a reference-counted handle to a node of a parsed part.
//! Cloning the handle shares the node, so an element returned by a lookup can
//! be mutated in place and the change is visible in the owning part. Use
//! [`Element::deep_clone`] for an independent copy.
//!
//! Handles are `!Send`: a tree belongs to one thread, like the document that
//! owns it.

use crate::common::{Error, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Where [`Element::insert_element`] places the new node, relative to the
/// element it is called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Before all existing children
    FirstChild,
    /// After all existing children
    #[default]
    LastChild,
    /// Right after this element, under the same parent
    NextSibling,
    /// Right before this element, under the same parent
    PreviousSibling,
}

/// A child of an element: either a nested element or character data.
#[derive(Clone)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Unescaped character data
    Text(String),
}

pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Node>,
    parent: Weak<RefCell<ElementData>>,
}

impl ElementData {
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Shared handle to an XML element.
///
/// Equality is identity: two handles are equal when they point at the same node.
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

impl Element {
    /// Create a detached element with the given qualified tag name.
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: Weak::new(),
        })))
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Append a freshly built, detached child. Used by the element builders.
    pub(crate) fn with_child(self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Append a detached child without the move and cycle checks of
    /// [`Element::insert_element`].
    pub(crate) fn push_child(&self, child: Element) {
        debug_assert!(child.parent().is_none());
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(Node::Element(child));
    }

    pub(crate) fn with_data<R>(&self, f: impl FnOnce(&ElementData) -> R) -> R {
        f(&self.0.borrow())
    }

    /// Qualified tag name, e.g. `text:p`.
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// Whether the element has the given qualified tag name.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.0.borrow().tag == tag
    }

    /// Attribute value by qualified name.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attribute(name).map(str::to_string)
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let mut data = self.0.borrow_mut();
        let index = data.attributes.iter().position(|(key, _)| key == name)?;
        Some(data.attributes.remove(index).1)
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0.borrow().attributes.clone()
    }

    /// Direct character data of this element, without descendants.
    pub fn text(&self) -> String {
        let data = self.0.borrow();
        let mut text = String::new();
        for child in &data.children {
            if let Node::Text(t) = child {
                text.push_str(t);
            }
        }
        text
    }

    /// Replace the direct character data of this element. Child elements stay.
    pub fn set_text(&self, text: &str) {
        let mut data = self.0.borrow_mut();
        data.children.retain(|child| matches!(child, Node::Element(_)));
        if !text.is_empty() {
            data.children.insert(0, Node::Text(text.to_string()));
        }
    }

    /// Character data of this element and all descendants, in document order.
    pub fn text_recursive(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.0.borrow().children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Append character data, merging with a trailing text node.
    pub(crate) fn append_text(&self, text: &str) {
        let mut data = self.0.borrow_mut();
        if let Some(Node::Text(last)) = data.children.last_mut() {
            last.push_str(text);
        } else {
            data.children.push(Node::Text(text.to_string()));
        }
    }

    /// Child nodes, elements and text alike.
    pub fn child_nodes(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Child elements in document order.
    pub fn children(&self) -> Vec<Element> {
        self.0
            .borrow()
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Element(e) => Some(e.clone()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Parent element, if attached.
    pub fn parent(&self) -> Option<Element> {
        self.0.borrow().parent.upgrade().map(Element)
    }

    /// Top-most ancestor (the element itself when detached).
    pub fn root(&self) -> Element {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Whether `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Element) -> bool {
        let mut current = other.parent();
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Insert `child` relative to this element.
    ///
    /// A child that already has a parent is moved. Inserting an element into
    /// itself or into one of its descendants fails, as does a sibling
    /// insertion on a detached element.
    pub fn insert_element(&self, child: Element, position: Position) -> Result<()> {
        if child == *self || child.is_ancestor_of(self) {
            return Err(Error::InvalidArgument(format!(
                "cannot insert <{}> into itself or its own descendant",
                child.tag()
            )));
        }

        match position {
            Position::FirstChild | Position::LastChild => {
                child.detach();
                child.0.borrow_mut().parent = Rc::downgrade(&self.0);
                let mut data = self.0.borrow_mut();
                if position == Position::FirstChild {
                    data.children.insert(0, Node::Element(child));
                } else {
                    data.children.push(Node::Element(child));
                }
            },
            Position::NextSibling | Position::PreviousSibling => {
                let parent = self.parent().ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "<{}> has no parent to insert a sibling into",
                        self.tag()
                    ))
                })?;
                child.detach();
                let index = parent
                    .child_index(self)
                    .ok_or_else(|| Error::InvalidFormat("broken parent link".to_string()))?;
                let index = if position == Position::NextSibling {
                    index + 1
                } else {
                    index
                };
                child.0.borrow_mut().parent = Rc::downgrade(&parent.0);
                parent
                    .0
                    .borrow_mut()
                    .children
                    .insert(index, Node::Element(child));
            },
        }
        Ok(())
    }

    /// Index of `child` in this element's child node list.
    fn child_index(&self, child: &Element) -> Option<usize> {
        self.0.borrow().children.iter().position(|node| match node {
            Node::Element(e) => e == child,
            Node::Text(_) => false,
        })
    }

    /// Remove this element from its parent. No-op when detached.
    pub fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent.0.borrow_mut().children.retain(|node| match node {
            Node::Element(e) => e != self,
            Node::Text(_) => true,
        });
        self.0.borrow_mut().parent = Weak::new();
    }

    /// Independent, detached copy of this element and its subtree.
    pub fn deep_clone(&self) -> Element {
        let data = self.0.borrow();
        let copy = Element::new(&data.tag);
        copy.0.borrow_mut().attributes = data.attributes.clone();
        for child in &data.children {
            match child {
                Node::Text(t) => copy.0.borrow_mut().children.push(Node::Text(t.clone())),
                Node::Element(e) => {
                    let sub = e.deep_clone();
                    sub.0.borrow_mut().parent = Rc::downgrade(&copy.0);
                    copy.0.borrow_mut().children.push(Node::Element(sub));
                },
            }
        }
        copy
    }

    /// All descendant elements in depth-first document order, excluding `self`.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants(&self, out: &mut Vec<Element>) {
        for child in self.children() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    /// Absolute path locating this element from its tree root, e.g.
    /// `/office:document-content/office:body[1]/office:text[1]`.
    ///
    /// Each step below the root carries the 1-based index of the element
    /// among its same-tag siblings.
    pub fn locating_path(&self) -> String {
        let mut steps = Vec::new();
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            let tag = current.tag();
            let mut index = 0usize;
            for sibling in parent.children() {
                if sibling.has_tag(&tag) {
                    index += 1;
                }
                if sibling == current {
                    break;
                }
            }
            let mut buffer = itoa::Buffer::new();
            steps.push(format!("/{}[{}]", tag, buffer.format(index)));
            current = parent;
        }
        steps.push(format!("/{}", current.tag()));
        steps.reverse();
        steps.concat()
    }

    /// Identity of the underlying node, for hashing. Equal for handles that
    /// compare equal.
    pub(crate) fn id(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Evaluate a structural query with this element as evaluation base.
    pub fn get_element_list(&self, query: &str) -> Result<Vec<Element>> {
        crate::odf::query::evaluate(self, query)
    }

    /// First match of a structural query, if any.
    pub fn get_element(&self, query: &str) -> Result<Option<Element>> {
        Ok(self.get_element_list(query)?.into_iter().next())
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => fmt::Debug::fmt(e, f),
            Node::Text(t) => f.debug_tuple("Text").field(t).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Element, Element, Element, Element) {
        let body = Element::new("office:body");
        let text = Element::new("office:text");
        let first = Element::new("text:p").with_text("one");
        let second = Element::new("text:p").with_text("two");
        body.insert_element(text.clone(), Position::LastChild).unwrap();
        text.insert_element(first.clone(), Position::LastChild).unwrap();
        text.insert_element(second.clone(), Position::LastChild).unwrap();
        (body, text, first, second)
    }

    #[test]
    fn test_attributes() {
        let e = Element::new("text:p").with_attribute("text:style-name", "Standard");
        assert_eq!(e.get_attribute("text:style-name").as_deref(), Some("Standard"));
        e.set_attribute("text:style-name", "Body");
        e.set_attribute("text:id", "p1");
        assert_eq!(
            e.attributes(),
            vec![
                ("text:style-name".to_string(), "Body".to_string()),
                ("text:id".to_string(), "p1".to_string()),
            ]
        );
        assert_eq!(e.remove_attribute("text:id").as_deref(), Some("p1"));
        assert!(e.get_attribute("text:id").is_none());
    }

    #[test]
    fn test_insert_positions() {
        let (_, text, first, second) = sample();
        let zero = Element::new("text:h");
        let middle = Element::new("text:list");
        let last = Element::new("text:section");
        text.insert_element(zero.clone(), Position::FirstChild).unwrap();
        first.insert_element(middle.clone(), Position::NextSibling).unwrap();
        second.insert_element(last.clone(), Position::NextSibling).unwrap();
        let tags: Vec<String> = text.children().iter().map(Element::tag).collect();
        assert_eq!(tags, ["text:h", "text:p", "text:list", "text:p", "text:section"]);

        let before = Element::new("text:soft-page-break");
        zero.insert_element(before.clone(), Position::PreviousSibling)
            .unwrap();
        assert_eq!(text.children()[0], before);
        assert_eq!(before.parent(), Some(text));
    }

    #[test]
    fn test_insert_moves_attached_child() {
        let (body, text, first, _) = sample();
        body.insert_element(first.clone(), Position::LastChild).unwrap();
        assert_eq!(text.children().len(), 1);
        assert_eq!(first.parent(), Some(body));
    }

    #[test]
    fn test_insert_rejects_cycles() {
        let (body, text, _, _) = sample();
        assert!(matches!(
            text.insert_element(body.clone(), Position::LastChild),
            Err(Error::InvalidArgument(_))
        ));
        assert!(text.insert_element(text.clone(), Position::LastChild).is_err());
        assert!(matches!(
            body.insert_element(Element::new("x"), Position::NextSibling),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_text() {
        let (body, _, first, _) = sample();
        assert_eq!(body.text_recursive(), "onetwo");
        first.set_text("uno");
        assert_eq!(first.text(), "uno");
        first.append_text(" dos");
        assert_eq!(first.text(), "uno dos");
    }

    #[test]
    fn test_locating_path() {
        let (body, text, _, second) = sample();
        assert_eq!(body.locating_path(), "/office:body");
        assert_eq!(text.locating_path(), "/office:body/office:text[1]");
        assert_eq!(second.locating_path(), "/office:body/office:text[1]/text:p[2]");
        assert_eq!(second.id(), second.clone().id());
        assert_ne!(second.id(), body.id());
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let (body, text, first, _) = sample();
        let copy = body.deep_clone();
        assert!(copy.parent().is_none());
        first.set_text("changed");
        assert_eq!(copy.text_recursive(), "onetwo");
        assert_eq!(copy.descendants().len(), body.descendants().len());
        assert_ne!(copy.children()[0], text);
    }

    #[test]
    fn test_detach() {
        let (_, text, first, second) = sample();
        first.detach();
        assert!(first.parent().is_none());
        assert_eq!(text.children(), vec![second]);
        first.detach();
    }
}
