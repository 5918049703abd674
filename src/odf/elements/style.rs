//! Style elements.

use crate::common::RGBColor;
use crate::odf::style::StyleFamily;
use crate::odf::xml::Element;

/// A style of the given family, using the family's own tag.
///
/// Families stored as `style:style` also get a `style:family` attribute.
///
/// ```
/// use odfdoc::odf::elements::style;
/// use odfdoc::odf::style::StyleFamily;
///
/// let s = style("Quote", StyleFamily::Paragraph);
/// assert_eq!(s.tag(), "style:style");
/// assert_eq!(s.get_attribute("style:family").as_deref(), Some("paragraph"));
/// ```
pub fn style(name: &str, family: StyleFamily) -> Element {
    let element = Element::new(family.tag()).with_attribute("style:name", name);
    if family.has_family_attribute() {
        element.set_attribute("style:family", family.as_str());
    }
    element
}

/// `<style:text-properties>`, with `fo:color` when a color is given.
pub fn text_properties(color: Option<RGBColor>) -> Element {
    let element = Element::new("style:text-properties");
    if let Some(color) = color {
        element.set_attribute("fo:color", &color.to_hex());
    }
    element
}
