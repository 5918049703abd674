//! Style families and the storage areas they live in.

use crate::common::{Error, Result};
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// The category of formatting a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    Paragraph,
    Text,
    Section,
    Table,
    TableColumn,
    TableRow,
    TableCell,
    TablePage,
    Chart,
    Default,
    DrawingPage,
    Graphic,
    Presentation,
    Control,
    Ruby,
    PageLayout,
    MasterPage,
    List,
    Number,
}

static FAMILY_NAMES: Map<&'static str, StyleFamily> = phf_map! {
    "paragraph" => StyleFamily::Paragraph,
    "text" => StyleFamily::Text,
    "section" => StyleFamily::Section,
    "table" => StyleFamily::Table,
    "table-column" => StyleFamily::TableColumn,
    "table-row" => StyleFamily::TableRow,
    "table-cell" => StyleFamily::TableCell,
    "table-page" => StyleFamily::TablePage,
    "chart" => StyleFamily::Chart,
    "default" => StyleFamily::Default,
    "drawing-page" => StyleFamily::DrawingPage,
    "graphic" => StyleFamily::Graphic,
    "presentation" => StyleFamily::Presentation,
    "control" => StyleFamily::Control,
    "ruby" => StyleFamily::Ruby,
    "page-layout" => StyleFamily::PageLayout,
    "master-page" => StyleFamily::MasterPage,
    "list" => StyleFamily::List,
    "number" => StyleFamily::Number,
};

impl StyleFamily {
    /// Every family, in declaration order.
    pub const ALL: [StyleFamily; 19] = [
        StyleFamily::Paragraph,
        StyleFamily::Text,
        StyleFamily::Section,
        StyleFamily::Table,
        StyleFamily::TableColumn,
        StyleFamily::TableRow,
        StyleFamily::TableCell,
        StyleFamily::TablePage,
        StyleFamily::Chart,
        StyleFamily::Default,
        StyleFamily::DrawingPage,
        StyleFamily::Graphic,
        StyleFamily::Presentation,
        StyleFamily::Control,
        StyleFamily::Ruby,
        StyleFamily::PageLayout,
        StyleFamily::MasterPage,
        StyleFamily::List,
        StyleFamily::Number,
    ];

    /// Family name as written in `style:family`.
    pub const fn as_str(self) -> &'static str {
        match self {
            StyleFamily::Paragraph => "paragraph",
            StyleFamily::Text => "text",
            StyleFamily::Section => "section",
            StyleFamily::Table => "table",
            StyleFamily::TableColumn => "table-column",
            StyleFamily::TableRow => "table-row",
            StyleFamily::TableCell => "table-cell",
            StyleFamily::TablePage => "table-page",
            StyleFamily::Chart => "chart",
            StyleFamily::Default => "default",
            StyleFamily::DrawingPage => "drawing-page",
            StyleFamily::Graphic => "graphic",
            StyleFamily::Presentation => "presentation",
            StyleFamily::Control => "control",
            StyleFamily::Ruby => "ruby",
            StyleFamily::PageLayout => "page-layout",
            StyleFamily::MasterPage => "master-page",
            StyleFamily::List => "list",
            StyleFamily::Number => "number",
        }
    }

    /// Tag of the elements holding styles of this family.
    pub const fn tag(self) -> &'static str {
        match self {
            StyleFamily::PageLayout => "style:page-layout",
            StyleFamily::MasterPage => "style:master-page",
            StyleFamily::List => "text:list-style",
            StyleFamily::Number => "number:number-style",
            _ => "style:style",
        }
    }

    /// Whether styles of this family carry a `style:family` attribute.
    ///
    /// Only those families can have a `style:default-style`.
    pub const fn has_family_attribute(self) -> bool {
        !matches!(
            self,
            StyleFamily::PageLayout | StyleFamily::MasterPage | StyleFamily::List | StyleFamily::Number
        )
    }

    /// The storage area styles of this family go to.
    ///
    /// `automatic` moves ordinary families to the automatic-styles area;
    /// page layouts and master pages ignore it.
    pub const fn scope(self, automatic: bool) -> StyleScope {
        match self {
            StyleFamily::PageLayout => StyleScope::Automatic,
            StyleFamily::MasterPage => StyleScope::Master,
            _ if automatic => StyleScope::Automatic,
            _ => StyleScope::Common,
        }
    }
}

impl FromStr for StyleFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FAMILY_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| Error::UnknownStyleFamily(s.to_string()))
    }
}

impl fmt::Display for StyleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage area of a style inside the styles part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleScope {
    /// `office:styles`
    Common,
    /// `office:automatic-styles`
    Automatic,
    /// `office:master-styles`
    Master,
    /// The whole part
    Document,
}

impl StyleScope {
    /// Tag of the element delimiting the area, `None` for the whole part.
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            StyleScope::Common => Some("office:styles"),
            StyleScope::Automatic => Some("office:automatic-styles"),
            StyleScope::Master => Some("office:master-styles"),
            StyleScope::Document => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for family in StyleFamily::ALL {
            assert_eq!(family.as_str().parse::<StyleFamily>().unwrap(), family);
        }
        assert_eq!(FAMILY_NAMES.len(), StyleFamily::ALL.len());
    }

    #[test]
    fn test_unknown_family() {
        match "tablecolumn".parse::<StyleFamily>() {
            Err(Error::UnknownStyleFamily(name)) => assert_eq!(name, "tablecolumn"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!("Paragraph".parse::<StyleFamily>().is_err());
    }

    #[test]
    fn test_fixed_scopes() {
        assert_eq!(StyleFamily::PageLayout.scope(false), StyleScope::Automatic);
        assert_eq!(StyleFamily::PageLayout.scope(true), StyleScope::Automatic);
        assert_eq!(StyleFamily::MasterPage.scope(false), StyleScope::Master);
        assert_eq!(StyleFamily::MasterPage.scope(true), StyleScope::Master);
        assert_eq!(StyleFamily::Paragraph.scope(false), StyleScope::Common);
        assert_eq!(StyleFamily::Graphic.scope(true), StyleScope::Automatic);
    }

    #[test]
    fn test_tags() {
        assert_eq!(StyleFamily::Text.tag(), "style:style");
        assert!(StyleFamily::Text.has_family_attribute());
        assert_eq!(StyleFamily::List.tag(), "text:list-style");
        assert!(!StyleFamily::MasterPage.has_family_attribute());
        assert!(!StyleFamily::Number.has_family_attribute());
    }
}
