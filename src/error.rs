//! Error types for swcatalog
//!
//! This module defines the error taxonomy used throughout the library.
//! Non-fatal conditions (unrecognized enum values, bad dates) never surface
//! here; they are dropped or logged at the point of decoding.

use thiserror::Error;

/// Result type alias using the swcatalog Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for metadata parsing and serialization
#[derive(Error, Debug)]
pub enum Error {
    /// The document does not parse as well-formed XML
    #[error("malformed XML: {0}")]
    MalformedXml(String),

    /// The document root belongs to the other metadata dialect
    #[error("unexpected format kind: {0}")]
    UnexpectedFormatKind(String),

    /// The document has no root element
    #[error("the XML document is empty")]
    EmptyDocument,

    /// Well-formed XML whose root is neither metadata dialect
    #[error("invalid metadata document: {0}")]
    InvalidDocument(String),

    /// A decoded component failed the validity check; the message carries
    /// a full dump of the component as decoded so far
    #[error("invalid component: {0}")]
    InvalidComponent(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedXml(err.to_string())
    }
}
