//! Tables, columns, rows and cells.

use super::{Document, Selector, style_predicate};
use crate::common::{Error, Result};
use crate::odf::constants::PART_CONTENT;
use crate::odf::coordinates::{CellAddress, locate_cell, locate_row};
use crate::odf::xml::{Element, Position};

const TABLE_STYLE: &str = "table:style-name";

impl Document {
    /// Tables, optionally of one style.
    pub fn get_table_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("table:table", style_predicate(TABLE_STYLE, style), context, PART_CONTENT)
    }

    /// One table, by position or by `table:name`.
    ///
    /// ```
    /// use odfdoc::odf::{Document, Selector};
    /// use odfdoc::odf::core::DocumentClass;
    ///
    /// # fn main() -> odfdoc::Result<()> {
    /// let document = Document::new_from_class(DocumentClass::Spreadsheet);
    /// assert!(document.get_table("Sheet1", None)?.is_none());
    /// assert!(Selector::new(Some(1), Some("Sheet1")).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_table<'a>(&self, selector: impl Into<Selector<'a>>, context: Option<&Element>) -> Result<Option<Element>> {
        let selector: Selector<'a> = selector.into();
        let (position, predicates) = selector.split("table:name");
        self.element("table:table", position, predicates, context, PART_CONTENT)
    }

    /// Insert a table into `context`, or at the end of the body.
    pub fn insert_table(&self, element: Element, context: Option<&Element>, position: Position) -> Result<()> {
        self.insert_element(element, context, position)
    }

    /// Column definitions, optionally of one style.
    pub fn get_column_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("table:table-column", style_predicate(TABLE_STYLE, style), context, PART_CONTENT)
    }

    /// Insert a column definition into a table.
    pub fn insert_column(&self, element: Element, table: &Element, position: Position) -> Result<()> {
        table.insert_element(element, position)
    }

    /// Row runs, optionally of one style. Each run may stand for several
    /// rows (`table:number-rows-repeated`).
    pub fn get_row_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("table:table-row", style_predicate(TABLE_STYLE, style), context, PART_CONTENT)
    }

    /// Insert a row into a table.
    pub fn insert_row(&self, element: Element, table: &Element, position: Position) -> Result<()> {
        table.insert_element(element, position)
    }

    /// Cell runs, optionally of one style. Each run may stand for several
    /// cells (`table:number-columns-repeated`).
    pub fn get_cell_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("table:table-cell", style_predicate(TABLE_STYLE, style), context, PART_CONTENT)
    }

    /// The cell at `name` (`B12`) inside `table`.
    ///
    /// Repeated rows and cells are resolved without being expanded, so the
    /// returned element may stand for several logical cells; editing it
    /// edits all of them.
    ///
    /// Fails with [`Error::MalformedCellName`] for a bad name and with
    /// [`Error::CellNotFound`] when the name lies past the table's last row
    /// or the row's last cell.
    pub fn get_cell(&self, name: &str, table: &Element) -> Result<Element> {
        let address = CellAddress::parse(name)?;
        let not_found = |err: Error| match err {
            Error::NotFound(_) => Error::CellNotFound(name.to_string()),
            other => other,
        };

        let rows = self.get_row_list(None, Some(table))?;
        let row = locate_row(&rows, address.row).map_err(not_found)?.node;
        let cells = self.get_cell_list(None, Some(&row))?;
        let cell = locate_cell(&cells, address.column).map_err(not_found)?.node;
        Ok(cell)
    }

    /// Insert a cell into a row.
    pub fn insert_cell(&self, element: Element, row: &Element, position: Position) -> Result<()> {
        row.insert_element(element, position)
    }
}
