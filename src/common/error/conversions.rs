//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! errors of the XML and ZIP layers to the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidFormat(format!("invalid UTF-8: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::InvalidFormat(format!("invalid UTF-8: {}", err.utf8_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_value() {
        assert_eq!(
            Error::MalformedCellName("1A".to_string()).to_string(),
            "cell name \"1A\" is malformed"
        );
        assert_eq!(
            Error::UnknownStyleFamily("tablecolumn".to_string()).to_string(),
            "\"tablecolumn\" is not a valid style family"
        );
        assert_eq!(
            Error::InvalidColor("#GG0000x".to_string()).to_string(),
            "\"#GG0000x\" is not a valid color"
        );
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::Zip(_)));
    }
}
