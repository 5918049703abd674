//! Cell coordinates (A1 notation) and run-length aware row/cell lookup.
//!
//! Columns and rows are 1-based throughout: `A1` is column 1, row 1, and
//! `AA10` is column 27, row 10.
//!
//! Spreadsheet tables compress identical consecutive rows and cells into one
//! element carrying `table:number-rows-repeated` or
//! `table:number-columns-repeated`. The `locate_*` functions walk those runs
//! without expanding them.
//!
//! # References
//!
//! - odfdo: `3rdparty/odfdo/src/odfdo/utils/coordinates.py`

use crate::common::{Error, Result};
use crate::odf::xml::Element;
use std::fmt;
use std::str::FromStr;

/// Attribute holding the repeat count of a row run
pub const ROWS_REPEATED: &str = "table:number-rows-repeated";

/// Attribute holding the repeat count of a cell run
pub const COLUMNS_REPEATED: &str = "table:number-columns-repeated";

/// Convert column letters to a 1-based column number.
///
/// Letters are case-insensitive.
///
/// # Examples
///
/// ```
/// use odfdoc::odf::coordinates::column_number;
///
/// assert_eq!(column_number("A").unwrap(), 1);
/// assert_eq!(column_number("z").unwrap(), 26);
/// assert_eq!(column_number("AA").unwrap(), 27);
/// ```
pub fn column_number(letters: &str) -> Result<usize> {
    let malformed = || Error::MalformedCellName(letters.to_string());
    if letters.is_empty() {
        return Err(malformed());
    }

    let mut column = 0usize;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(malformed());
        }
        let value = (b.to_ascii_uppercase() - b'A' + 1) as usize;
        column = column
            .checked_mul(26)
            .and_then(|c| c.checked_add(value))
            .ok_or_else(malformed)?;
    }
    Ok(column)
}

/// Convert a 1-based column number to upper-case letters.
///
/// Returns an empty string for 0.
///
/// ```
/// use odfdoc::odf::coordinates::column_name;
///
/// assert_eq!(column_name(1), "A");
/// assert_eq!(column_name(26), "Z");
/// assert_eq!(column_name(27), "AA");
/// assert_eq!(column_name(702), "ZZ");
/// ```
pub fn column_name(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        letters.push(b'A' + rem);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Logical cell position, both components 1-based.
///
/// # Examples
///
/// ```
/// use odfdoc::odf::coordinates::CellAddress;
///
/// let address: CellAddress = "b12".parse().unwrap();
/// assert_eq!(address, CellAddress::new(2, 12));
/// assert_eq!(address.to_string(), "B12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Column number (A = 1)
    pub column: usize,
    /// Row number (first row = 1)
    pub row: usize,
}

impl CellAddress {
    /// Create an address from 1-based components.
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Parse a cell name such as `B12`.
    ///
    /// Fails with [`Error::MalformedCellName`] when there are no leading
    /// letters, when the rest is not a decimal number, or when the row is 0.
    pub fn parse(name: &str) -> Result<Self> {
        let malformed = || Error::MalformedCellName(name.to_string());

        let split = name
            .bytes()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(name.len());
        let (letters, digits) = name.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let column = column_number(letters).map_err(|_| malformed())?;
        let row: usize = digits.parse().map_err(|_| malformed())?;
        if row == 0 {
            return Err(malformed());
        }
        Ok(Self::new(column, row))
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.column), self.row)
    }
}

/// A run found by [`locate_run_by`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHit<T> {
    /// The run element (or item) covering the target
    pub node: T,
    /// 0-based index of the run in the sequence
    pub run_index: usize,
    /// 0-based offset of the target inside the run
    pub offset: usize,
}

/// Find the run covering the 1-based logical index `target`.
///
/// `repeat` returns how many logical positions a run stands for. Runs are
/// consumed lazily and never expanded. Returns `Ok(None)` when the runs end
/// before `target`, or when `target` is 0.
pub fn locate_run_by<T, I, F>(runs: I, target: usize, mut repeat: F) -> Result<Option<RunHit<T>>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Result<usize>,
{
    if target == 0 {
        return Ok(None);
    }

    let mut covered = 0usize;
    for (run_index, node) in runs.into_iter().enumerate() {
        let count = repeat(&node)?;
        if target <= covered.saturating_add(count) {
            return Ok(Some(RunHit {
                offset: target - covered - 1,
                node,
                run_index,
            }));
        }
        covered = covered.saturating_add(count);
    }
    Ok(None)
}

/// Repeat count stored in `attribute`, 1 when absent.
pub fn repeat_count(element: &Element, attribute: &str) -> Result<usize> {
    match element.get_attribute(attribute) {
        None => Ok(1),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(Error::InvalidFormat(format!(
                "{}=\"{}\" on <{}> is not a positive count",
                attribute,
                value,
                element.tag()
            ))),
        },
    }
}

fn locate(runs: &[Element], target: usize, attribute: &str, what: &str) -> Result<RunHit<Element>> {
    locate_run_by(runs.iter().cloned(), target, |e| repeat_count(e, attribute))?
        .ok_or_else(|| Error::NotFound(format!("{} {} is past the last {} run", what, target, what)))
}

/// Find the row run holding logical row `y` (1-based).
pub fn locate_row(rows: &[Element], y: usize) -> Result<RunHit<Element>> {
    locate(rows, y, ROWS_REPEATED, "row")
}

/// Find the cell run holding logical column `x` (1-based) within a row.
pub fn locate_cell(cells: &[Element], x: usize) -> Result<RunHit<Element>> {
    locate(cells, x, COLUMNS_REPEATED, "column")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_number() {
        assert_eq!(column_number("A").unwrap(), 1);
        assert_eq!(column_number("Z").unwrap(), 26);
        assert_eq!(column_number("AA").unwrap(), 27);
        assert_eq!(column_number("AZ").unwrap(), 52);
        assert_eq!(column_number("ba").unwrap(), 53);
        assert!(column_number("").is_err());
        assert!(column_number("A1").is_err());
        assert!(column_number(&"Z".repeat(40)).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(1, 1));
        assert_eq!(CellAddress::parse("B12").unwrap(), CellAddress::new(2, 12));
        assert_eq!(CellAddress::parse("aa100").unwrap(), CellAddress::new(27, 100));

        for bad in ["", "12", "A", "A0", "A-1", "A1B", "Ä1", "A 1"] {
            match CellAddress::parse(bad) {
                Err(Error::MalformedCellName(name)) => assert_eq!(name, bad),
                other => panic!("{:?} accepted: {:?}", bad, other),
            }
        }
    }

    fn runs(counts: &[usize]) -> Vec<Element> {
        counts
            .iter()
            .map(|&n| {
                let row = Element::new("table:table-row");
                if n != 1 {
                    row.set_attribute(ROWS_REPEATED, &n.to_string());
                }
                row
            })
            .collect()
    }

    #[test]
    fn test_locate_row_runs() {
        let rows = runs(&[1, 3, 2]);

        let hit = locate_row(&rows, 3).unwrap();
        assert_eq!(hit.node, rows[1]);
        assert_eq!((hit.run_index, hit.offset), (1, 1));

        let hit = locate_row(&rows, 6).unwrap();
        assert_eq!(hit.node, rows[2]);
        assert_eq!(hit.offset, 1);

        assert_eq!(locate_row(&rows, 1).unwrap().run_index, 0);
        assert!(matches!(locate_row(&rows, 7), Err(Error::NotFound(_))));
        assert!(matches!(locate_row(&rows, 0), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_locate_cell_uses_column_repeat() {
        let cells: Vec<Element> = [2usize, 1]
            .iter()
            .map(|&n| {
                Element::new("table:table-cell").with_attribute(COLUMNS_REPEATED, &n.to_string())
            })
            .collect();
        assert_eq!(locate_cell(&cells, 2).unwrap().run_index, 0);
        assert_eq!(locate_cell(&cells, 3).unwrap().run_index, 1);
        assert!(locate_cell(&cells, 4).is_err());

        // Row repeat counts do not apply to cells.
        let rows = runs(&[5]);
        assert!(locate_cell(&rows, 2).is_err());
    }

    #[test]
    fn test_invalid_repeat_count() {
        let row = Element::new("table:table-row").with_attribute(ROWS_REPEATED, "0");
        assert!(matches!(locate_row(&[row], 1), Err(Error::InvalidFormat(_))));
        let row = Element::new("table:table-row").with_attribute(ROWS_REPEATED, "many");
        assert!(matches!(repeat_count(&row, ROWS_REPEATED), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_runs_are_not_expanded() {
        let mut seen = 0;
        let hit = locate_run_by([usize::MAX / 2, 10, 1], 5, |n| {
            seen += 1;
            Ok(*n)
        })
        .unwrap()
        .unwrap();
        assert_eq!(hit.run_index, 0);
        assert_eq!(seen, 1);
    }

    proptest! {
        #[test]
        fn prop_address_round_trip(column in 1usize..20_000, row in 1usize..1_000_000) {
            let address = CellAddress::new(column, row);
            let parsed: CellAddress = address.to_string().parse().unwrap();
            prop_assert_eq!(parsed, address);
            prop_assert_eq!(column_number(&column_name(column)).unwrap(), column);
        }

        #[test]
        fn prop_run_bounds(counts in prop::collection::vec(1usize..5, 1..20), target in 1usize..100) {
            let total: usize = counts.iter().sum();
            let hit = locate_run_by(counts.iter().copied(), target, |n| Ok(*n)).unwrap();
            match hit {
                None => prop_assert!(target > total),
                Some(hit) => {
                    let before: usize = counts[..hit.run_index].iter().sum();
                    prop_assert!(before < target);
                    prop_assert!(target <= before + counts[hit.run_index]);
                    prop_assert_eq!(hit.offset, target - before - 1);
                }
            }
        }
    }
}
