//! Text body elements: sections, paragraphs, headings, lists.

use crate::common::{Error, Result};
use crate::odf::xml::Element;

/// `<text:section text:style-name="...">`
pub fn section(style: &str) -> Element {
    Element::new("text:section").with_attribute("text:style-name", style)
}

/// `<text:p>` with a style and optional text.
///
/// ```
/// use odfdoc::odf::elements::paragraph;
///
/// let p = paragraph("Standard", "Hello & goodbye");
/// assert_eq!(p.text(), "Hello & goodbye");
/// assert_eq!(p.get_attribute("text:style-name").as_deref(), Some("Standard"));
/// ```
pub fn paragraph(style: &str, text: &str) -> Element {
    Element::new("text:p")
        .with_attribute("text:style-name", style)
        .with_text(text)
}

/// `<text:h>` with a style, outline level and optional text.
///
/// Levels start at 1.
pub fn heading(style: &str, level: u32, text: &str) -> Result<Element> {
    check_level(level)?;
    let mut buffer = itoa::Buffer::new();
    Ok(Element::new("text:h")
        .with_attribute("text:style-name", style)
        .with_attribute("text:outline-level", buffer.format(level))
        .with_text(text))
}

/// `<text:list text:style-name="...">`
pub fn list(style: &str) -> Element {
    Element::new("text:list").with_attribute("text:style-name", style)
}

/// Empty `<text:list-item>`.
pub fn list_item() -> Element {
    Element::new("text:list-item")
}

/// Reject outline levels below 1.
pub fn check_level(level: u32) -> Result<()> {
    if level < 1 {
        return Err(Error::InvalidArgument("level count begins at 1".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        let h = heading("Heading_20_1", 2, "Intro").unwrap();
        assert_eq!(h.tag(), "text:h");
        assert_eq!(h.get_attribute("text:outline-level").as_deref(), Some("2"));
        assert_eq!(h.text(), "Intro");
        assert!(matches!(heading("Heading", 0, ""), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_markup_is_not_interpreted() {
        let p = paragraph("Standard", "<text:span/>");
        assert!(p.children().is_empty());
        assert_eq!(
            p.to_xml_string(false),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <text:p text:style-name=\"Standard\">&lt;text:span/&gt;</text:p>"
        );
    }

    #[test]
    fn test_empty_paragraph_has_no_text_node() {
        let p = paragraph("Standard", "");
        assert!(p.child_nodes().is_empty());
        assert!(list_item().child_nodes().is_empty());
        assert_eq!(section("Sect1").get_attribute("text:style-name").as_deref(), Some("Sect1"));
        assert_eq!(list("L1").tag(), "text:list");
    }
}
