//! Sections, paragraphs, headings, lists and notes.

use super::{Document, style_predicate};
use crate::common::{Error, Result};
use crate::odf::constants::PART_CONTENT;
use crate::odf::elements::{NoteClass, check_level};
use crate::odf::query::Predicates;
use crate::odf::xml::{Element, Position};

const TEXT_STYLE: &str = "text:style-name";

fn level_predicate(predicates: Predicates, level: Option<u32>) -> Result<Predicates> {
    match level {
        Some(level) => {
            check_level(level)?;
            Ok(predicates.equals("text:outline-level", level))
        },
        None => Ok(predicates),
    }
}

impl Document {
    /// Sections, optionally of one style.
    pub fn get_section_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("text:section", style_predicate(TEXT_STYLE, style), context, PART_CONTENT)
    }

    /// The `position`-th section (1-based).
    pub fn get_section(&self, position: usize, context: Option<&Element>) -> Result<Option<Element>> {
        self.element("text:section", Some(position), Predicates::new(), context, PART_CONTENT)
    }

    /// Insert a section into `context`, or at the end of the body.
    pub fn insert_section(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        self.insert_element(element, context, position)
    }

    /// Paragraphs, optionally of one style.
    pub fn get_paragraph_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("text:p", style_predicate(TEXT_STYLE, style), context, PART_CONTENT)
    }

    /// The `position`-th paragraph (1-based).
    pub fn get_paragraph(&self, position: usize, context: Option<&Element>) -> Result<Option<Element>> {
        self.element("text:p", Some(position), Predicates::new(), context, PART_CONTENT)
    }

    /// Insert a paragraph into `context`, or at the end of the body.
    pub fn insert_paragraph(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        self.insert_element(element, context, position)
    }

    /// Headings, optionally filtered by style and outline level.
    pub fn get_heading_list(
        &self,
        style: Option<&str>,
        level: Option<u32>,
        context: Option<&Element>,
    ) -> Result<Vec<Element>> {
        let predicates = level_predicate(style_predicate(TEXT_STYLE, style), level)?;
        self.element_list("text:h", predicates, context, PART_CONTENT)
    }

    /// The `position`-th heading (1-based), optionally counting one level only.
    pub fn get_heading(&self, position: usize, level: Option<u32>, context: Option<&Element>) -> Result<Option<Element>> {
        let predicates = level_predicate(Predicates::new(), level)?;
        self.element("text:h", Some(position), predicates, context, PART_CONTENT)
    }

    /// Insert a heading into `context`, or at the end of the body.
    pub fn insert_heading(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        self.insert_element(element, context, position)
    }

    /// Lists, optionally of one style.
    pub fn get_list_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("text:list", style_predicate(TEXT_STYLE, style), context, PART_CONTENT)
    }

    /// The `position`-th list (1-based).
    pub fn get_list(&self, position: usize, context: Option<&Element>) -> Result<Option<Element>> {
        self.element("text:list", Some(position), Predicates::new(), context, PART_CONTENT)
    }

    /// Insert a list into `context`, or at the end of the body.
    pub fn insert_list(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        self.insert_element(element, context, position)
    }

    /// List items under `context`, or in the whole body.
    pub fn get_list_item_list(&self, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("text:list-item", Predicates::new(), context, PART_CONTENT)
    }

    /// Insert a list item into a list.
    pub fn insert_list_item(&self, element: Element, list: &Element, position: Position) -> Result<()> {
        list.insert_element(element, position)
    }

    /// Notes, optionally of one class.
    pub fn get_note_list(&self, class: Option<NoteClass>, context: Option<&Element>) -> Result<Vec<Element>> {
        let predicates = Predicates::new().equals_opt("text:note-class", class);
        self.element_list("text:note", predicates, context, PART_CONTENT)
    }

    /// The note with the given `text:id`.
    pub fn get_note(&self, id: &str, context: Option<&Element>) -> Result<Option<Element>> {
        let predicates = Predicates::new().equals("text:id", id);
        self.element("text:note", None, predicates, context, PART_CONTENT)
    }

    /// Insert a note into `context`, or at the end of the body.
    pub fn insert_note(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        self.insert_element(element, context, position)
    }

    /// The last `text:note-body` of a note.
    pub fn get_note_body(&self, note: &Element) -> Result<Option<Element>> {
        Ok(self
            .element_list("text:note-body", Predicates::new(), Some(note), PART_CONTENT)?
            .pop())
    }

    /// Append `element` to the last `text:note-body` of a note.
    pub fn insert_note_body(&self, element: Element, note: &Element) -> Result<()> {
        let body = self
            .get_note_body(note)?
            .ok_or_else(|| Error::NotFound(format!("text:note-body in <{}>", note.tag())))?;
        body.insert_element(element, Position::LastChild)
    }
}
