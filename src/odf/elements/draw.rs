//! Drawing elements: frames and images.

use crate::odf::xml::Element;

/// How a frame is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FrameAnchor {
    /// Anchored to the surrounding paragraph
    #[default]
    Paragraph,
    /// Anchored to a page, optionally at an offset (`svg:x`, `svg:y`)
    Page {
        /// 1-based page number
        page: u32,
        /// Horizontal offset, e.g. `2cm`
        x: Option<String>,
        /// Vertical offset
        y: Option<String>,
    },
}

/// `<draw:frame>` with a name, style, size and anchor.
///
/// # Examples
///
/// ```
/// use odfdoc::odf::elements::{FrameAnchor, frame};
///
/// let f = frame("Logo", "fr1", "4cm", "2cm", &FrameAnchor::Page { page: 1, x: Some("1cm".into()), y: None });
/// assert_eq!(f.get_attribute("text:anchor-type").as_deref(), Some("page"));
/// assert_eq!(f.get_attribute("svg:x").as_deref(), Some("1cm"));
/// assert!(f.get_attribute("svg:y").is_none());
/// ```
pub fn frame(name: &str, style: &str, width: &str, height: &str, anchor: &FrameAnchor) -> Element {
    let element = Element::new("draw:frame")
        .with_attribute("draw:name", name)
        .with_attribute("draw:style-name", style)
        .with_attribute("svg:width", width)
        .with_attribute("svg:height", height);

    match anchor {
        FrameAnchor::Paragraph => element.with_attribute("text:anchor-type", "paragraph"),
        FrameAnchor::Page { page, x, y } => {
            let mut buffer = itoa::Buffer::new();
            let element = element
                .with_attribute("text:anchor-type", "page")
                .with_attribute("text:anchor-page-number", buffer.format(*page));
            if let Some(x) = x {
                element.set_attribute("svg:x", x);
            }
            if let Some(y) = y {
                element.set_attribute("svg:y", y);
            }
            element
        },
    }
}

/// `<draw:image xlink:href="...">`
pub fn image(href: &str) -> Element {
    Element::new("draw:image").with_attribute("xlink:href", href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_anchor() {
        let f = frame("F1", "fr1", "3cm", "1cm", &FrameAnchor::default());
        assert_eq!(f.get_attribute("text:anchor-type").as_deref(), Some("paragraph"));
        assert!(f.get_attribute("text:anchor-page-number").is_none());
        assert_eq!(f.get_attribute("svg:height").as_deref(), Some("1cm"));
    }

    #[test]
    fn test_page_anchor() {
        let anchor = FrameAnchor::Page {
            page: 3,
            x: None,
            y: Some("5mm".to_string()),
        };
        let f = frame("F2", "fr1", "3cm", "1cm", &anchor);
        assert_eq!(f.get_attribute("text:anchor-page-number").as_deref(), Some("3"));
        assert_eq!(f.get_attribute("svg:y").as_deref(), Some("5mm"));
        assert_eq!(image("Pictures/a.png").get_attribute("xlink:href").as_deref(), Some("Pictures/a.png"));
    }
}
