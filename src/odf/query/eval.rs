//! Evaluation of structural queries against an element tree.
//!
//! Supported grammar, nothing more:
//!
//! ```text
//! query     := (alt | "(" alt ("|" alt)* ")") predicate* ordinal?
//! alt       := step* "//" name
//! step      := "/" name ("[" N "]")?
//! predicate := "[@" name "]" | "[@" name "=" quoted "]"
//! ordinal   := "[" N "]"
//! ```
//!
//! `[N]` selects the Nth match in document order.

use super::builder::{AttrMatch, is_name_char};
use crate::common::{Error, Result};
use crate::odf::xml::Element;
use smallvec::SmallVec;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    tag: String,
    index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Alternative {
    path: SmallVec<[Step; 8]>,
    tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedQuery {
    alternatives: SmallVec<[Alternative; 4]>,
    predicates: Vec<(String, AttrMatch)>,
    ordinal: Option<usize>,
}

struct Cursor<'q> {
    query: &'q str,
    rest: &'q str,
}

impl<'q> Cursor<'q> {
    fn error(&self) -> Error {
        Error::InvalidQuery(self.query.to_string())
    }

    fn eat(&mut self, token: &str) -> bool {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            },
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'q str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        head
    }

    fn name(&mut self) -> Result<String> {
        let name = self.take_while(is_name_char);
        if name.is_empty() {
            Err(self.error())
        } else {
            Ok(name.to_string())
        }
    }

    fn number(&mut self) -> Result<usize> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(self.error()),
        }
    }

    fn quoted(&mut self) -> Result<String> {
        let quote = if self.eat("\"") {
            '"'
        } else if self.eat("'") {
            '\''
        } else {
            return Err(self.error());
        };
        let value = self.take_while(|c| c != quote);
        if !self.eat(if quote == '"' { "\"" } else { "'" }) {
            return Err(self.error());
        }
        Ok(value.to_string())
    }

    fn alternative(&mut self) -> Result<Alternative> {
        let mut path = SmallVec::new();
        while self.rest.starts_with('/') && !self.rest.starts_with("//") {
            self.expect("/")?;
            let tag = self.name()?;
            let index = if self.eat("[") {
                let n = self.number()?;
                self.expect("]")?;
                n
            } else {
                1
            };
            path.push(Step { tag, index });
        }
        self.expect("//")?;
        let tag = self.name()?;
        Ok(Alternative { path, tag })
    }
}

fn parse(query: &str) -> Result<ParsedQuery> {
    let mut cursor = Cursor { query, rest: query };

    let mut alternatives = SmallVec::new();
    if cursor.eat("(") {
        alternatives.push(cursor.alternative()?);
        while cursor.eat("|") {
            alternatives.push(cursor.alternative()?);
        }
        cursor.expect(")")?;
    } else {
        alternatives.push(cursor.alternative()?);
    }

    let mut predicates = Vec::new();
    let mut ordinal = None;
    while !cursor.rest.is_empty() {
        if ordinal.is_some() {
            return Err(cursor.error());
        }
        if cursor.eat("[@") {
            let name = cursor.name()?;
            let constraint = if cursor.eat("=") {
                AttrMatch::Equals(cursor.quoted()?)
            } else {
                AttrMatch::Present
            };
            cursor.expect("]")?;
            predicates.push((name, constraint));
        } else if cursor.eat("[") {
            ordinal = Some(cursor.number()?);
            cursor.expect("]")?;
        } else {
            return Err(cursor.error());
        }
    }

    Ok(ParsedQuery {
        alternatives,
        predicates,
        ordinal,
    })
}

/// Follow an absolute locating path from the root of `base`'s tree.
fn resolve_path(base: &Element, path: &[Step]) -> Option<Element> {
    let (first, rest) = path.split_first()?;
    let root = base.root();
    if !root.has_tag(&first.tag) || first.index != 1 {
        return None;
    }
    let mut current = root;
    for step in rest {
        current = current
            .children()
            .into_iter()
            .filter(|child| child.has_tag(&step.tag))
            .nth(step.index - 1)?;
    }
    Some(current)
}

fn candidates(base: &Element, alternative: &Alternative) -> Vec<Element> {
    let (scope, include_scope) = if alternative.path.is_empty() {
        (base.clone(), base.parent().is_none())
    } else {
        match resolve_path(base, &alternative.path) {
            Some(scope) => (scope, false),
            None => return Vec::new(),
        }
    };

    let mut found = Vec::new();
    if include_scope && scope.has_tag(&alternative.tag) {
        found.push(scope.clone());
    }
    found.extend(
        scope
            .descendants()
            .into_iter()
            .filter(|e| e.has_tag(&alternative.tag)),
    );
    found
}

fn matches_predicates(element: &Element, predicates: &[(String, AttrMatch)]) -> bool {
    element.with_data(|data| {
        predicates.iter().all(|(name, constraint)| {
            match (data.attribute(name), constraint) {
                (Some(value), AttrMatch::Equals(expected)) => value == expected,
                (Some(_), AttrMatch::Present) => true,
                (None, _) => false,
            }
        })
    })
}

/// Evaluate `query` with `base` as the evaluation base.
///
/// Results are in document order. A context path that does not resolve in
/// `base`'s tree yields no matches.
pub fn evaluate(base: &Element, query: &str) -> Result<Vec<Element>> {
    let parsed = parse(query)?;

    let mut found: Vec<Element> = if parsed.alternatives.len() == 1 {
        candidates(base, &parsed.alternatives[0])
    } else {
        let matched: HashSet<*const ()> = parsed
            .alternatives
            .iter()
            .flat_map(|alternative| candidates(base, alternative))
            .map(|element| element.id())
            .collect();
        // One preorder walk of the tree yields the union in document order.
        let root = base.root();
        let mut merged = Vec::with_capacity(matched.len());
        if matched.contains(&root.id()) {
            merged.push(root.clone());
        }
        merged.extend(root.descendants().into_iter().filter(|e| matched.contains(&e.id())));
        merged
    };

    found.retain(|e| matches_predicates(e, &parsed.predicates));
    if let Some(n) = parsed.ordinal {
        found = found.into_iter().nth(n - 1).into_iter().collect();
    }

    log::trace!("query {} matched {} element(s)", query, found.len());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::query::QueryBuilder;

    const CONTENT: &str = r#"<office:document-content>
  <office:body>
    <office:text>
      <text:p text:style-name="A">1</text:p>
      <text:section>
        <text:p text:style-name="B">2</text:p>
        <text:p>3</text:p>
      </text:section>
      <text:p text:style-name="A">4</text:p>
    </office:text>
  </office:body>
</office:document-content>"#;

    fn texts(elements: &[Element]) -> Vec<String> {
        elements.iter().map(Element::text_recursive).collect()
    }

    #[test]
    fn test_parse() {
        let parsed = parse(r#"/a/b[2]//c[@x="1"][@y][3]"#).unwrap();
        assert_eq!(parsed.alternatives.len(), 1);
        assert_eq!(parsed.alternatives[0].path.len(), 2);
        assert_eq!(parsed.alternatives[0].path[1].index, 2);
        assert_eq!(parsed.alternatives[0].tag, "c");
        assert_eq!(
            parsed.predicates,
            vec![
                ("x".to_string(), AttrMatch::Equals("1".to_string())),
                ("y".to_string(), AttrMatch::Present),
            ]
        );
        assert_eq!(parsed.ordinal, Some(3));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "text:p", "//", "//a[0]", "//a[1][@b]", "(//a|//b", "//a[@b=\"c]", "//a x"] {
            assert!(
                matches!(parse(bad), Err(Error::InvalidQuery(q)) if q == bad),
                "{:?} parsed",
                bad
            );
        }
    }

    #[test]
    fn test_document_order_and_ordinal() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        let all = root.get_element_list("//text:p").unwrap();
        assert_eq!(texts(&all), ["1", "2", "3", "4"]);

        let third = root.get_element_list("//text:p[3]").unwrap();
        assert_eq!(texts(&third), ["3"]);
        assert!(root.get_element_list("//text:p[5]").unwrap().is_empty());

        let styled = root.get_element_list(r#"//text:p[@text:style-name="A"][2]"#).unwrap();
        assert_eq!(texts(&styled), ["4"]);

        let with_style = root.get_element_list("//text:p[@text:style-name]").unwrap();
        assert_eq!(with_style.len(), 3);
    }

    #[test]
    fn test_root_matches_unscoped_search() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        let found = root.get_element("//office:document-content").unwrap();
        assert_eq!(found, Some(root));
    }

    #[test]
    fn test_context_scope() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        let section = root.get_element("//text:section").unwrap().unwrap();
        let query = QueryBuilder::new("text:p")
            .context(Some(&section))
            .build()
            .unwrap();
        assert_eq!(texts(&root.get_element_list(query.as_str()).unwrap()), ["2", "3"]);
        assert_eq!(texts(&section.get_element_list(query.as_str()).unwrap()), ["2", "3"]);

        // An unscoped query from a subtree only sees that subtree.
        assert_eq!(texts(&section.get_element_list("//text:p").unwrap()), ["2", "3"]);
        assert!(section.get_element_list("//text:section").unwrap().is_empty());
    }

    #[test]
    fn test_unresolved_path_is_empty() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        assert!(root.get_element_list("/office:document-content/office:body[2]//text:p").unwrap().is_empty());
        assert!(root.get_element_list("/office:document-styles//text:p").unwrap().is_empty());
    }

    #[test]
    fn test_union_in_document_order() {
        let root = Element::from_bytes(CONTENT.as_bytes()).unwrap();
        let found = root.get_element_list("(//text:section|//text:p)").unwrap();
        let tags: Vec<String> = found.iter().map(Element::tag).collect();
        assert_eq!(tags, ["text:p", "text:section", "text:p", "text:p", "text:p"]);

        let duplicated = root.get_element_list("(//text:p|//text:p)").unwrap();
        assert_eq!(duplicated.len(), 4);
    }

    #[test]
    fn test_union_over_many_overlapping_matches() {
        let text = Element::new("office:text");
        for i in 0..2000 {
            let tag = if i % 2 == 0 { "text:p" } else { "text:h" };
            text.push_child(Element::new(tag).with_attribute("n", &i.to_string()));
        }
        let root = Element::new("office:body").with_child(text);

        let found = root
            .get_element_list("(//text:h|//text:p|/office:body/office:text[1]//text:p)")
            .unwrap();
        assert_eq!(found.len(), 2000);
        let numbers: Vec<usize> = found
            .iter()
            .map(|e| e.get_attribute("n").unwrap().parse().unwrap())
            .collect();
        assert!(numbers.iter().enumerate().all(|(i, n)| i == *n));

        let scoped = root
            .get_element_list("(//office:body|//text:h)[@n]")
            .unwrap();
        assert_eq!(scoped.len(), 1000);
    }
}
