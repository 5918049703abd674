//! Maps a family and a style name to the area and query that find the style.

use super::family::{StyleFamily, StyleScope};
use crate::common::{Error, Result};
use crate::odf::query::{Predicates, StructuralQuery, TagPattern, build_query};
use crate::odf::xml::Element;

/// Tags that can hold a style, in the order used for "any style" lookups.
const STYLE_TAGS: [&str; 4] = [
    "style:default-style",
    "style:style",
    "style:page-layout",
    "style:master-page",
];

/// Which style of a family is wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleName {
    /// The family's default style (`style:default-style`)
    Default,
    /// Every style, name unconstrained
    Any,
    /// The style with this `style:name`
    Named(String),
}

impl From<&str> for StyleName {
    fn from(name: &str) -> Self {
        StyleName::Named(name.to_string())
    }
}

impl From<Option<&str>> for StyleName {
    /// `None` asks for the default style.
    fn from(name: Option<&str>) -> Self {
        name.map_or(StyleName::Default, StyleName::from)
    }
}

/// Result of [`resolve`]: where to search and what to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleLookup {
    /// Area of the styles part to search
    pub scope: StyleScope,
    /// Tag or tag union to match
    pub pattern: TagPattern,
    /// `style:family` value to require, when the tags carry one
    pub family_attr: Option<StyleFamily>,
    /// `style:name` value to require
    pub name: Option<String>,
    /// Query for the family's default style, tried when the named style is missing
    pub fallback: Option<StructuralQuery>,
}

impl StyleLookup {
    /// Render the primary query.
    pub fn query(&self) -> Result<StructuralQuery> {
        let predicates = Predicates::new()
            .equals_opt("style:family", self.family_attr)
            .equals_opt("style:name", self.name.as_deref());
        build_query(&self.pattern, &predicates, None, None)
    }

    /// The element delimiting this lookup's area in a styles part, if present.
    pub fn scope_element(&self, root: &Element) -> Result<Option<Element>> {
        match self.scope.tag() {
            Some(tag) => root.get_element(&format!("//{}", tag)),
            None => Ok(Some(root.clone())),
        }
    }
}

fn default_style_query(family: StyleFamily) -> Result<StructuralQuery> {
    build_query(
        &"style:default-style".into(),
        &Predicates::new().equals("style:family", family),
        None,
        None,
    )
}

/// Work out the area and tag pattern of a style lookup.
///
/// - [`StyleName::Default`] targets `style:default-style` in the common area.
/// - [`StyleName::Any`] without a family matches every style tag; with a
///   family it matches that family's tag, plus `style:default-style` when
///   the family has one.
/// - [`StyleName::Named`] needs a family and searches the family's area,
///   keeping the default style as a fallback.
///
/// `automatic` moves ordinary families to the automatic-styles area.
pub fn resolve(family: Option<StyleFamily>, name: &StyleName, automatic: bool) -> Result<StyleLookup> {
    match (name, family) {
        (StyleName::Default, family) => Ok(StyleLookup {
            scope: StyleScope::Common,
            pattern: "style:default-style".into(),
            family_attr: family,
            name: None,
            fallback: None,
        }),
        (StyleName::Any, None) => Ok(StyleLookup {
            scope: if automatic {
                StyleScope::Automatic
            } else {
                StyleScope::Document
            },
            pattern: TagPattern::union(STYLE_TAGS),
            family_attr: None,
            name: None,
            fallback: None,
        }),
        (StyleName::Any, Some(family)) => {
            let pattern = if family.has_family_attribute() {
                TagPattern::union([family.tag(), "style:default-style"])
            } else {
                family.tag().into()
            };
            Ok(StyleLookup {
                scope: if automatic {
                    StyleScope::Automatic
                } else {
                    StyleScope::Document
                },
                pattern,
                family_attr: family.has_family_attribute().then_some(family),
                name: None,
                fallback: None,
            })
        },
        (StyleName::Named(_), None) => Err(Error::InvalidArgument(
            "a style family is required to look up a named style".to_string(),
        )),
        (StyleName::Named(name), Some(family)) => {
            let fallback = if family.has_family_attribute() {
                Some(default_style_query(family)?)
            } else {
                None
            };
            Ok(StyleLookup {
                scope: family.scope(automatic),
                pattern: family.tag().into(),
                family_attr: family.has_family_attribute().then_some(family),
                name: Some(name.clone()),
                fallback,
            })
        },
    }
}

/// [`resolve`] with the family given by name.
///
/// Fails with [`Error::UnknownStyleFamily`] for names outside the family list.
pub fn resolve_by_name(family: Option<&str>, name: &StyleName, automatic: bool) -> Result<StyleLookup> {
    let family = family.map(str::parse::<StyleFamily>).transpose()?;
    resolve(family, name, automatic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let lookup = resolve(Some(StyleFamily::Paragraph), &StyleName::Default, true).unwrap();
        assert_eq!(lookup.scope, StyleScope::Common);
        assert_eq!(
            lookup.query().unwrap().as_str(),
            r#"//style:default-style[@style:family="paragraph"]"#
        );
    }

    #[test]
    fn test_any_style_any_family() {
        let lookup = resolve(None, &StyleName::Any, false).unwrap();
        assert_eq!(lookup.scope, StyleScope::Document);
        assert_eq!(
            lookup.query().unwrap().as_str(),
            "(//style:default-style|//style:style|//style:page-layout|//style:master-page)"
        );
        let automatic = resolve(None, &StyleName::Any, true).unwrap();
        assert_eq!(automatic.scope, StyleScope::Automatic);
    }

    #[test]
    fn test_any_style_of_family() {
        let lookup = resolve(Some(StyleFamily::Text), &StyleName::Any, false).unwrap();
        assert_eq!(
            lookup.query().unwrap().as_str(),
            r#"(//style:style|//style:default-style)[@style:family="text"]"#
        );
        let pages = resolve(Some(StyleFamily::MasterPage), &StyleName::Any, false).unwrap();
        assert_eq!(pages.query().unwrap().as_str(), "//style:master-page");
    }

    #[test]
    fn test_named_style_scopes() {
        let named = StyleName::from("Standard");
        let paragraph = resolve(Some(StyleFamily::Paragraph), &named, false).unwrap();
        assert_eq!(paragraph.scope, StyleScope::Common);
        assert_eq!(
            paragraph.query().unwrap().as_str(),
            r#"//style:style[@style:family="paragraph"][@style:name="Standard"]"#
        );
        assert_eq!(
            paragraph.fallback.unwrap().as_str(),
            r#"//style:default-style[@style:family="paragraph"]"#
        );

        let automatic = resolve(Some(StyleFamily::Paragraph), &named, true).unwrap();
        assert_eq!(automatic.scope, StyleScope::Automatic);

        let layout = resolve(Some(StyleFamily::PageLayout), &named, false).unwrap();
        assert_eq!(layout.scope, StyleScope::Automatic);
        assert_eq!(layout.query().unwrap().as_str(), r#"//style:page-layout[@style:name="Standard"]"#);
        assert!(layout.fallback.is_none());

        let master = resolve(Some(StyleFamily::MasterPage), &named, true).unwrap();
        assert_eq!(master.scope, StyleScope::Master);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            resolve(None, &StyleName::from("Standard"), false),
            Err(Error::InvalidArgument(_))
        ));
        match resolve_by_name(Some("bogus"), &StyleName::Any, false) {
            Err(Error::UnknownStyleFamily(name)) => assert_eq!(name, "bogus"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_scope_element() {
        let root = Element::from_bytes(
            b"<office:document-styles><office:styles/><office:master-styles/></office:document-styles>",
        )
        .unwrap();
        let common = resolve(Some(StyleFamily::Text), &StyleName::from("x"), false).unwrap();
        assert!(common.scope_element(&root).unwrap().unwrap().has_tag("office:styles"));
        let automatic = resolve(Some(StyleFamily::Text), &StyleName::from("x"), true).unwrap();
        assert!(automatic.scope_element(&root).unwrap().is_none());
        let any = resolve(None, &StyleName::Any, false).unwrap();
        assert_eq!(any.scope_element(&root).unwrap(), Some(root));
    }
}
