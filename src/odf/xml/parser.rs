//! Parse part bytes into an [`Element`] tree.

use super::element::Element;
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::common::{Error, Result};
use quick_xml::events::{BytesStart, Event};

impl Element {
    /// Parse a complete XML document and return its root element.
    ///
    /// Comments, processing instructions and the XML declaration are dropped;
    /// namespace declarations are kept as ordinary attributes so the tree
    /// serializes back to an equivalent document.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    stack.push(element_from_start(e)?);
                },
                Event::Empty(ref e) => {
                    let element = element_from_start(e)?;
                    close(element, &mut stack, &mut root)?;
                },
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("unbalanced end tag".to_string()))?;
                    close(element, &mut stack, &mut root)?;
                },
                Event::Text(ref t) => {
                    if let Some(current) = stack.last() {
                        let text = std::str::from_utf8(t)?;
                        current.append_text(&unescape_xml(text));
                    }
                },
                Event::CData(ref t) => {
                    if let Some(current) = stack.last() {
                        current.append_text(std::str::from_utf8(t)?);
                    }
                },
                Event::GeneralRef(ref r) => {
                    if let Some(current) = stack.last() {
                        let name = std::str::from_utf8(r)?;
                        let c = resolve_entity(name).ok_or_else(|| {
                            Error::Xml(format!("unknown entity reference &{};", name))
                        })?;
                        current.append_text(c.encode_utf8(&mut [0u8; 4]));
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::Xml(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].tag()
            )));
        }
        root.ok_or_else(|| Error::InvalidFormat("No root element found".to_string()))
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element> {
    let tag = std::str::from_utf8(e.name().as_ref())?.to_string();
    let element = Element::new(&tag);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        element.set_attribute(key, &unescape_xml(value));
    }
    Ok(element)
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match stack.last() {
        Some(parent) => {
            parent.push_child(element);
            Ok(())
        },
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        },
        None => Err(Error::InvalidFormat(
            "more than one root element".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:o" xmlns:text="urn:t" office:version="1.2">
  <office:body><office:text>
    <text:p text:style-name="Standard">Fish &amp; chips<text:s/>&#233;t&#xE9;</text:p>
    <text:p><![CDATA[<raw>]]></text:p>
  </office:text></office:body>
</office:document-content>"#;
        let root = Element::from_bytes(xml).unwrap();
        assert_eq!(root.tag(), "office:document-content");
        assert_eq!(root.get_attribute("xmlns:text").as_deref(), Some("urn:t"));
        let text = root.children()[0].children()[0].clone();
        let paragraphs = text.children();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].get_attribute("text:style-name").as_deref(), Some("Standard"));
        assert_eq!(paragraphs[0].text_recursive(), "Fish & chipsété");
        assert_eq!(paragraphs[0].children()[0].tag(), "text:s");
        assert_eq!(paragraphs[1].text(), "<raw>");
    }

    #[test]
    fn test_attribute_unescape() {
        let root = Element::from_bytes(br#"<a b="x &lt; &quot;y&quot;"/>"#).unwrap();
        assert_eq!(root.get_attribute("b").as_deref(), Some("x < \"y\""));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(Element::from_bytes(b"").is_err());
        assert!(Element::from_bytes(b"<a><b></a>").is_err());
        assert!(Element::from_bytes(b"<a/><b/>").is_err());
        assert!(Element::from_bytes(b"<a>").is_err());
    }
}
