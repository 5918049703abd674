//! Footnotes and endnotes.

use crate::common::{Error, Result};
use crate::odf::xml::Element;
use std::fmt;
use std::str::FromStr;

/// Kind of note (`text:note-class`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteClass {
    #[default]
    Footnote,
    Endnote,
}

impl NoteClass {
    /// Value as written in `text:note-class`.
    pub const fn as_str(self) -> &'static str {
        match self {
            NoteClass::Footnote => "footnote",
            NoteClass::Endnote => "endnote",
        }
    }
}

impl FromStr for NoteClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "footnote" => Ok(NoteClass::Footnote),
            "endnote" => Ok(NoteClass::Endnote),
            _ => Err(Error::UnknownNoteClass(s.to_string())),
        }
    }
}

impl fmt::Display for NoteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<text:note>` with a citation and an empty `<text:note-body>`.
///
/// ```
/// use odfdoc::odf::elements::{NoteClass, note};
///
/// let n = note("1", NoteClass::Footnote, Some("ftn1"));
/// assert_eq!(n.get_attribute("text:id").as_deref(), Some("ftn1"));
/// assert_eq!(n.children()[0].text(), "1");
/// assert!(n.children()[1].has_tag("text:note-body"));
/// ```
pub fn note(citation: &str, class: NoteClass, id: Option<&str>) -> Element {
    let element = Element::new("text:note")
        .with_attribute("text:note-class", class.as_str())
        .with_child(Element::new("text:note-citation").with_text(citation))
        .with_child(Element::new("text:note-body"));
    if let Some(id) = id {
        element.set_attribute("text:id", id);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_classes() {
        assert_eq!("endnote".parse::<NoteClass>().unwrap(), NoteClass::Endnote);
        assert_eq!(NoteClass::default().to_string(), "footnote");
        match "sidenote".parse::<NoteClass>() {
            Err(Error::UnknownNoteClass(name)) => assert_eq!(name, "sidenote"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_note_without_id() {
        let n = note("*", NoteClass::Endnote, None);
        assert!(n.get_attribute("text:id").is_none());
        assert_eq!(n.get_attribute("text:note-class").as_deref(), Some("endnote"));
        assert_eq!(n.children().len(), 2);
    }
}
