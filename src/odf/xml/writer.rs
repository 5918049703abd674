//! Serialize an [`Element`] tree back to part bytes.

use super::element::{Element, Node};
use crate::common::xml::escape_xml;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const INDENT: &str = "  ";

/// Elements whose children are paragraph content. Whitespace between their
/// children would become text, so they are never laid out.
const INLINE_CONTAINERS: [&str; 4] = ["text:p", "text:h", "text:span", "text:a"];

impl Element {
    /// Serialize this element as a standalone XML document.
    ///
    /// With `pretty`, elements that hold no character data are laid out one
    /// child per line. Elements with mixed content and paragraph content
    /// (`text:p`, `text:span`, ...) are written verbatim so their text is not
    /// altered.
    pub fn to_bytes(&self, pretty: bool) -> Vec<u8> {
        self.to_xml_string(pretty).into_bytes()
    }

    /// String form of [`Element::to_bytes`].
    pub fn to_xml_string(&self, pretty: bool) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECLARATION);
        write_element(self, &mut xml, 0, pretty);
        if pretty {
            xml.push('\n');
        }
        xml
    }
}

fn write_element(element: &Element, output: &mut String, depth: usize, pretty: bool) {
    let children = element.child_nodes();

    output.push('<');
    element.with_data(|data| {
        output.push_str(&data.tag);
        for (key, value) in &data.attributes {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape_xml(value));
            output.push('"');
        }
    });

    if children.is_empty() {
        output.push_str("/>");
        return;
    }
    output.push('>');

    let has_text = children
        .iter()
        .any(|child| matches!(child, Node::Text(t) if !t.trim().is_empty()));
    let inline = element.with_data(|data| INLINE_CONTAINERS.contains(&data.tag.as_str()));
    let layout = pretty && !has_text && !inline;

    for child in &children {
        match child {
            Node::Text(t) => {
                if !layout {
                    output.push_str(&escape_xml(t));
                }
            },
            Node::Element(e) => {
                if layout {
                    newline(output, depth + 1);
                }
                write_element(e, output, depth + 1, layout);
            },
        }
    }

    if layout {
        newline(output, depth);
    }
    output.push_str("</");
    element.with_data(|data| output.push_str(&data.tag));
    output.push('>');
}

fn newline(output: &mut String, depth: usize) {
    output.push('\n');
    for _ in 0..depth {
        output.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_round_trip() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                   <office:text xmlns:text=\"urn:t\">\n  <text:p text:style-name=\"A&amp;B\">x &lt; y<text:s/></text:p>\n</office:text>";
        let root = Element::from_bytes(xml.as_bytes()).unwrap();
        assert_eq!(root.to_xml_string(false), xml);
    }

    #[test]
    fn test_pretty_layout() {
        let root = Element::new("office:body").with_child(
            Element::new("office:text")
                .with_child(Element::new("text:p").with_text("Hello"))
                .with_child(Element::new("text:p")),
        );
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                        <office:body>\n  <office:text>\n    <text:p>Hello</text:p>\n    <text:p/>\n  </office:text>\n</office:body>\n";
        assert_eq!(root.to_xml_string(true), expected);

        let reparsed = Element::from_bytes(&root.to_bytes(true)).unwrap();
        assert_eq!(reparsed.text_recursive().trim(), "Hello");
    }

    #[test]
    fn test_pretty_keeps_paragraph_content_inline() {
        let paragraph = Element::new("text:p")
            .with_child(Element::new("text:span").with_text("a"))
            .with_child(Element::new("text:span").with_child(Element::new("text:a").with_text("b")));
        let root = Element::new("office:text").with_child(paragraph);

        let xml = root.to_xml_string(true);
        assert!(xml.contains("<text:p><text:span>a</text:span><text:span><text:a>b</text:a></text:span></text:p>"));

        let reparsed = Element::from_bytes(xml.as_bytes()).unwrap();
        let paragraph = reparsed.get_element("//text:p").unwrap().unwrap();
        assert_eq!(paragraph.text_recursive(), "ab");
    }
}
