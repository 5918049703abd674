//! Styles and style properties.
//!
//! Styles are looked up in the styles part, in the area the family is
//! stored in: common styles, automatic styles or master styles.

use super::Document;
use crate::common::{Error, Result};
use crate::odf::constants::PART_STYLES;
use crate::odf::query::{Predicates, QueryBuilder};
use crate::odf::style::{StyleFamily, StyleLookup, StyleName, StyleScope, resolve};
use crate::odf::xml::{Element, Position};

/// Family of a style element, from its `style:family` or its tag.
fn family_of(element: &Element) -> Result<StyleFamily> {
    if let Some(family) = element.get_attribute("style:family") {
        return family.parse();
    }
    let tag = element.tag();
    StyleFamily::ALL
        .into_iter()
        .find(|family| !family.has_family_attribute() && family.tag() == tag)
        .ok_or_else(|| Error::InvalidArgument(format!("<{}> is not a style of a known family", tag)))
}

impl Document {
    fn style_area(&self, lookup: &StyleLookup) -> Result<Option<Element>> {
        let styles = self.registry.get(PART_STYLES)?;
        lookup.scope_element(styles.root())
    }

    /// Styles of a family, or of every family.
    ///
    /// Without `automatic` the whole styles part is searched; with it only
    /// the automatic-styles area. A `context` narrows the search to its
    /// subtree instead.
    pub fn get_style_list(
        &self,
        family: Option<StyleFamily>,
        automatic: bool,
        context: Option<&Element>,
    ) -> Result<Vec<Element>> {
        let lookup = resolve(family, &StyleName::Any, automatic)?;
        let area = match context {
            Some(context) => context.clone(),
            None => match self.style_area(&lookup)? {
                Some(area) => area,
                None => return Ok(Vec::new()),
            },
        };
        let query = QueryBuilder::new(lookup.pattern.clone())
            .predicates(Predicates::new().equals_opt("style:family", lookup.family_attr))
            .context(Some(&area))
            .build()?;
        area.get_element_list(query.as_str())
    }

    /// A style by family and name.
    ///
    /// `name` may be a style name, [`StyleName::Default`] (or `None`) for
    /// the family's default style, or [`StyleName::Any`] for the first
    /// style of the family. A named style that is missing falls back to the
    /// family's default style; `Ok(None)` means neither exists.
    pub fn get_style(&self, family: StyleFamily, name: impl Into<StyleName>) -> Result<Option<Element>> {
        let lookup = resolve(Some(family), &name.into(), false)?;
        if let Some(area) = self.style_area(&lookup)? {
            let scoped = QueryBuilder::new(lookup.pattern.clone())
                .predicates(
                    Predicates::new()
                        .equals_opt("style:family", lookup.family_attr)
                        .equals_opt("style:name", lookup.name.as_deref()),
                )
                .context(Some(&area))
                .build()?;
            if let Some(style) = area.get_element(scoped.as_str())? {
                return Ok(Some(style));
            }
        }

        let Some(fallback) = &lookup.fallback else {
            return Ok(None);
        };
        let defaults = resolve(Some(family), &StyleName::Default, false)?;
        match self.style_area(&defaults)? {
            Some(area) => area.get_element(fallback.as_str()),
            None => Ok(None),
        }
    }

    /// Store a style in the area its family belongs to.
    ///
    /// The family comes from `style:family`, or from the tag for page
    /// layouts, master pages, list and number styles. `automatic` sends
    /// ordinary families to the automatic-styles area. Default styles
    /// always go to the common area.
    pub fn insert_style(&self, element: Element, automatic: bool) -> Result<()> {
        let scope = if element.has_tag("style:default-style") {
            StyleScope::Common
        } else {
            family_of(&element)?.scope(automatic)
        };
        let area_tag = scope.tag().unwrap_or("office:styles");

        let styles = self.registry.get(PART_STYLES)?;
        let area = styles
            .get_element(&format!("//{}", area_tag))?
            .ok_or_else(|| Error::NotFound(format!("{} in styles", area_tag)))?;
        area.insert_element(element, Position::LastChild)
    }

    /// Append a properties element (`style:text-properties`, ...) to a style.
    pub fn insert_style_properties(&self, element: Element, style: &Element) -> Result<()> {
        style.insert_element(element, Position::LastChild)
    }
}
