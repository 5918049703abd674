//! Unified error types for odfdoc.
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! carries the offending value (cell name, family, color, part name) so a
//! failure can be diagnosed without re-deriving it.
use thiserror::Error;

/// Main error type for odfdoc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Invalid package or part content
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A parameter has the wrong shape or value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Cell name that does not follow the `A1` convention
    #[error("cell name \"{0}\" is malformed")]
    MalformedCellName(String),

    /// Color string that is not `#RRGGBB`
    #[error("\"{0}\" is not a valid color")]
    InvalidColor(String),

    /// Color name missing from the named color table
    #[error("color \"{0}\" is unknown")]
    UnknownColor(String),

    /// Style family outside the known enumeration
    #[error("\"{0}\" is not a valid style family")]
    UnknownStyleFamily(String),

    /// Cell value type outside the known enumeration
    #[error("\"{0}\" is not a valid cell type")]
    UnknownCellType(String),

    /// Note class outside the known enumeration
    #[error("\"{0}\" is not a valid note class")]
    UnknownNoteClass(String),

    /// Currency cell created without a currency code
    #[error("currency is mandatory in monetary cells")]
    MissingCurrency,

    /// Package part missing from the container
    #[error("part \"{0}\" not found in package")]
    PartNotFound(String),

    /// Cell name outside the logical extent of a table
    #[error("cannot find cell \"{0}\"")]
    CellNotFound(String),

    /// Structural anchor missing from a part
    #[error("not found: {0}")]
    NotFound(String),

    /// Query text outside the supported grammar
    #[error("invalid query \"{0}\"")]
    InvalidQuery(String),
}

/// Result type for odfdoc operations.
pub type Result<T> = std::result::Result<T, Error>;
