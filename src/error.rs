//! Error types for the myfinance-import library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction, conversion, and upload.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the XML export.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// Required MyFinance environment variables are not set.
    #[error("missing environment variables: {0}")]
    MissingCredentials(String),

    /// Invalid date format.
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid amount format.
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),

    /// Missing required field.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// General parsing error.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error uploading the statement file to MyFinance.
    #[error("Upload error: {0}")]
    Upload(String),
}

impl From<serde_xml_rs::Error> for Error {
    fn from(err: serde_xml_rs::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upload(err.to_string())
    }
}
