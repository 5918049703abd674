//! Table elements: tables, columns, rows, cells.

use crate::common::{Error, Result};
use crate::odf::xml::Element;
use std::fmt;
use std::str::FromStr;

/// Value type of a table cell (`office:value-type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellValueType {
    Boolean,
    Currency,
    Date,
    Float,
    Percentage,
    #[default]
    String,
    Time,
}

impl CellValueType {
    /// Value as written in `office:value-type`.
    pub const fn as_str(self) -> &'static str {
        match self {
            CellValueType::Boolean => "boolean",
            CellValueType::Currency => "currency",
            CellValueType::Date => "date",
            CellValueType::Float => "float",
            CellValueType::Percentage => "percentage",
            CellValueType::String => "string",
            CellValueType::Time => "time",
        }
    }
}

impl FromStr for CellValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "boolean" => Ok(CellValueType::Boolean),
            "currency" => Ok(CellValueType::Currency),
            "date" => Ok(CellValueType::Date),
            "float" => Ok(CellValueType::Float),
            "percentage" => Ok(CellValueType::Percentage),
            "string" => Ok(CellValueType::String),
            "time" => Ok(CellValueType::Time),
            _ => Err(Error::UnknownCellType(s.to_string())),
        }
    }
}

impl fmt::Display for CellValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<table:table-cell office:value-type="...">`.
///
/// Currency cells need a three-letter code (`EUR`), stored in
/// `office:currency`; other types ignore `currency`.
pub fn cell(value_type: CellValueType, currency: Option<&str>) -> Result<Element> {
    let element = Element::new("table:table-cell").with_attribute("office:value-type", value_type.as_str());
    if value_type == CellValueType::Currency {
        let code = currency.ok_or(Error::MissingCurrency)?;
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(Error::InvalidArgument(format!(
                "currency \"{}\" is not a three-letter code",
                code
            )));
        }
        element.set_attribute("office:currency", code);
    }
    Ok(element)
}

fn string_cell() -> Element {
    Element::new("table:table-cell").with_attribute("office:value-type", CellValueType::String.as_str())
}

/// `<table:table-row>`, optionally holding `width` string cells.
pub fn row(width: Option<usize>) -> Element {
    let element = Element::new("table:table-row");
    for _ in 0..width.unwrap_or(0) {
        element.push_child(string_cell());
    }
    element
}

/// `<table:table-column table:style-name="...">`
pub fn column(style: &str) -> Element {
    Element::new("table:table-column").with_attribute("table:style-name", style)
}

/// `<table:table>` with a name and style.
///
/// When `width` or `height` is given the table is filled with a grid of
/// string cells; the missing dimension defaults to 1.
///
/// ```
/// use odfdoc::odf::elements::table;
///
/// let t = table("Sheet1", "ta1", Some(3), None);
/// assert_eq!(t.children().len(), 1);
/// assert_eq!(t.children()[0].children().len(), 3);
/// ```
pub fn table(name: &str, style: &str, width: Option<usize>, height: Option<usize>) -> Element {
    let element = Element::new("table:table")
        .with_attribute("table:name", name)
        .with_attribute("table:style-name", style);
    if width.is_some() || height.is_some() {
        let width = width.unwrap_or(1);
        for _ in 0..height.unwrap_or(1) {
            element.push_child(row(Some(width)));
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_types() {
        for name in ["boolean", "currency", "date", "float", "percentage", "string", "time"] {
            assert_eq!(name.parse::<CellValueType>().unwrap().to_string(), name);
        }
        match "money".parse::<CellValueType>() {
            Err(Error::UnknownCellType(name)) => assert_eq!(name, "money"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_currency_cell() {
        let c = cell(CellValueType::Currency, Some("EUR")).unwrap();
        assert_eq!(c.get_attribute("office:currency").as_deref(), Some("EUR"));
        assert!(matches!(cell(CellValueType::Currency, None), Err(Error::MissingCurrency)));
        assert!(matches!(
            cell(CellValueType::Currency, Some("EURO")),
            Err(Error::InvalidArgument(_))
        ));
        let f = cell(CellValueType::Float, Some("EUR")).unwrap();
        assert!(f.get_attribute("office:currency").is_none());
    }

    #[test]
    fn test_table_grid() {
        assert!(table("T", "ta1", None, None).children().is_empty());
        let t = table("T", "ta1", None, Some(2));
        let rows = t.children();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.children().len() == 1));
        let t = table("T", "ta1", Some(2), Some(3));
        assert_eq!(t.get_element_list("//table:table-cell").unwrap().len(), 6);
        assert!(row(None).children().is_empty());
    }
}
