//! Construction of structural queries.
//!
//! A query is built from a tag (or a union of tags), attribute predicates,
//! an optional 1-based ordinal and an optional context element:
//!
//! ```text
//! /office:document-content/office:body[1]/office:text[1]//text:p[@text:style-name="Standard"][2]
//! ```
//!
//! Predicates are kept sorted by attribute name, so the same predicate set
//! always renders the same query text.

use crate::common::{Error, Result};
use crate::odf::xml::Element;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Constraint on a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrMatch {
    /// Attribute equals the value
    Equals(String),
    /// Attribute is present, any value
    Present,
}

/// Attribute predicates, ordered by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicates(BTreeMap<String, AttrMatch>);

impl Predicates {
    /// Empty predicate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `name` to equal the string form of `value`.
    pub fn equals(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.insert(name, AttrMatch::Equals(value.to_string()));
        self
    }

    /// Require `name` to be present.
    pub fn present(mut self, name: &str) -> Self {
        self.insert(name, AttrMatch::Present);
        self
    }

    /// Add or replace the constraint on `name`.
    pub fn insert(&mut self, name: &str, constraint: AttrMatch) {
        self.0.insert(name.to_string(), constraint);
    }

    /// Add an equality constraint when `value` is given.
    pub fn equals_opt(self, name: &str, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.equals(name, value),
            None => self,
        }
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constraints in attribute-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrMatch)> {
        self.0.iter().map(|(name, constraint)| (name.as_str(), constraint))
    }
}

impl<S: Into<String>> FromIterator<(S, AttrMatch)> for Predicates {
    fn from_iter<I: IntoIterator<Item = (S, AttrMatch)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The element name part of a query: one tag or a union of tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPattern {
    /// A single qualified tag
    Tag(String),
    /// Any of several tags, matched in document order
    Union(SmallVec<[String; 4]>),
}

impl TagPattern {
    /// Union of the given tags.
    pub fn union<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        TagPattern::Union(tags.into_iter().map(str::to_string).collect())
    }

    /// Tags matched by this pattern.
    pub fn tags(&self) -> &[String] {
        match self {
            TagPattern::Tag(tag) => std::slice::from_ref(tag),
            TagPattern::Union(tags) => tags,
        }
    }
}

impl From<&str> for TagPattern {
    fn from(tag: &str) -> Self {
        TagPattern::Tag(tag.to_string())
    }
}

/// A rendered structural query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuralQuery(String);

impl StructuralQuery {
    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StructuralQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructuralQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builder for [`StructuralQuery`].
///
/// # Examples
///
/// ```
/// use odfdoc::odf::query::QueryBuilder;
///
/// let query = QueryBuilder::new("text:h")
///     .attribute("text:outline-level", 2)
///     .attribute("text:style-name", "Heading_20_2")
///     .position(Some(1))
///     .build()
///     .unwrap();
/// assert_eq!(
///     query.as_str(),
///     r#"//text:h[@text:outline-level="2"][@text:style-name="Heading_20_2"][1]"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    pattern: TagPattern,
    predicates: Predicates,
    position: Option<usize>,
    context: Option<&'a Element>,
}

impl<'a> QueryBuilder<'a> {
    /// Start a query for the given tag or tag union.
    pub fn new(pattern: impl Into<TagPattern>) -> Self {
        Self {
            pattern: pattern.into(),
            predicates: Predicates::new(),
            position: None,
            context: None,
        }
    }

    /// Replace all predicates.
    pub fn predicates(mut self, predicates: Predicates) -> Self {
        self.predicates = predicates;
        self
    }

    /// Require an attribute value.
    pub fn attribute(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.predicates.insert(name, AttrMatch::Equals(value.to_string()));
        self
    }

    /// Require an attribute to be present.
    pub fn present(mut self, name: &str) -> Self {
        self.predicates.insert(name, AttrMatch::Present);
        self
    }

    /// Select the Nth match (1-based).
    pub fn position(mut self, position: Option<usize>) -> Self {
        self.position = position;
        self
    }

    /// Restrict the search to the subtree of `context`.
    pub fn context(mut self, context: Option<&'a Element>) -> Self {
        self.context = context;
        self
    }

    /// Validate the parts and render the query.
    pub fn build(&self) -> Result<StructuralQuery> {
        build_query(&self.pattern, &self.predicates, self.position, self.context)
    }
}

/// Render a query from its parts.
///
/// Fails with [`Error::InvalidArgument`] when the tag is empty or not a
/// plain qualified name, when the position is 0, or when a value contains
/// both quote characters.
pub fn build_query(
    pattern: &TagPattern,
    predicates: &Predicates,
    position: Option<usize>,
    context: Option<&Element>,
) -> Result<StructuralQuery> {
    if pattern.tags().is_empty() {
        return Err(Error::InvalidArgument("a tag name is required".to_string()));
    }
    for tag in pattern.tags() {
        check_name(tag, "tag")?;
    }
    if position == Some(0) {
        return Err(Error::InvalidArgument(
            "position count begins at 1".to_string(),
        ));
    }

    let scope = context.map(Element::locating_path).unwrap_or_default();
    let mut query = String::with_capacity(64);
    match pattern {
        TagPattern::Tag(tag) => {
            query.push_str(&scope);
            query.push_str("//");
            query.push_str(tag);
        },
        TagPattern::Union(tags) => {
            query.push('(');
            for (i, tag) in tags.iter().enumerate() {
                if i > 0 {
                    query.push('|');
                }
                query.push_str(&scope);
                query.push_str("//");
                query.push_str(tag);
            }
            query.push(')');
        },
    }

    for (name, constraint) in predicates.iter() {
        check_name(name, "attribute")?;
        query.push_str("[@");
        query.push_str(name);
        if let AttrMatch::Equals(value) = constraint {
            let quote = match (value.contains('"'), value.contains('\'')) {
                (false, _) => '"',
                (true, false) => '\'',
                (true, true) => {
                    return Err(Error::InvalidArgument(format!(
                        "value {} of {} cannot be quoted",
                        value, name
                    )));
                },
            };
            query.push('=');
            query.push(quote);
            query.push_str(value);
            query.push(quote);
        }
        query.push(']');
    }

    if let Some(position) = position {
        let mut buffer = itoa::Buffer::new();
        query.push('[');
        query.push_str(buffer.format(position));
        query.push(']');
    }

    Ok(StructuralQuery(query))
}

/// Characters allowed in tag and attribute names.
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ':' | '-' | '_' | '.')
}

fn check_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(Error::InvalidArgument(format!(
            "\"{}\" is not a valid {} name",
            name, what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::xml::Position;
    use proptest::prelude::*;

    #[test]
    fn test_plain_tag() {
        let query = QueryBuilder::new("text:p").build().unwrap();
        assert_eq!(query.as_str(), "//text:p");
    }

    #[test]
    fn test_predicates_are_sorted() {
        let query = QueryBuilder::new("style:style")
            .attribute("style:name", "P1")
            .attribute("style:family", "paragraph")
            .present("style:display-name")
            .build()
            .unwrap();
        assert_eq!(
            query.to_string(),
            r#"//style:style[@style:display-name][@style:family="paragraph"][@style:name="P1"]"#
        );
    }

    #[test]
    fn test_context_prefix() {
        let body = Element::new("office:body");
        let text = Element::new("office:text");
        body.insert_element(text.clone(), Position::LastChild).unwrap();
        let query = QueryBuilder::new("text:p")
            .context(Some(&text))
            .position(Some(3))
            .build()
            .unwrap();
        assert_eq!(query.as_str(), "/office:body/office:text[1]//text:p[3]");
    }

    #[test]
    fn test_union() {
        let query = build_query(
            &TagPattern::union(["style:style", "style:default-style"]),
            &Predicates::new().equals("style:family", "paragraph"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            query.as_str(),
            r#"(//style:style|//style:default-style)[@style:family="paragraph"]"#
        );
    }

    #[test]
    fn test_quoting() {
        let query = QueryBuilder::new("draw:frame")
            .attribute("draw:name", "say \"hi\"")
            .build()
            .unwrap();
        assert_eq!(query.as_str(), r#"//draw:frame[@draw:name='say "hi"']"#);
        assert!(QueryBuilder::new("draw:frame")
            .attribute("draw:name", "it's \"x\"")
            .build()
            .is_err());
    }

    #[test]
    fn test_argument_errors() {
        assert!(matches!(
            QueryBuilder::new("text:p").position(Some(0)).build(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(QueryBuilder::new("").build(), Err(Error::InvalidArgument(_))));
        assert!(QueryBuilder::new("text:p]").build().is_err());
        assert!(QueryBuilder::new("text:p").present("a b").build().is_err());
        assert!(build_query(&TagPattern::Union(SmallVec::new()), &Predicates::new(), None, None).is_err());
    }

    proptest! {
        #[test]
        fn prop_insertion_order_is_irrelevant(
            entries in prop::collection::btree_map("[a-z]{1,6}:[a-z]{1,8}", "[A-Za-z0-9 ]{0,8}", 0..6)
        ) {
            let forward: Predicates = entries
                .iter()
                .map(|(k, v)| (k.clone(), AttrMatch::Equals(v.clone())))
                .collect();
            let mut backward = Predicates::new();
            for (k, v) in entries.iter().rev() {
                backward.insert(k, AttrMatch::Equals(v.clone()));
            }
            let a = build_query(&"text:p".into(), &forward, None, None).unwrap();
            let b = build_query(&"text:p".into(), &backward, None, None).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
