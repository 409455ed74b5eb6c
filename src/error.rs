use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type covering every operational failure mode.
///
/// Structural invalidity (the document not conforming to the schema) is not
/// an error; it is carried as diagnostics in the validation result.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Schema parsing error: {file} - {details}")]
    SchemaParsing { file: PathBuf, details: String },

    #[error("XML parsing error: {file} - {details}")]
    DocumentParsing { file: PathBuf, details: String },

    #[error("LibXML2 internal error: {details}")]
    LibXml2Internal { details: String },
}

/// Errors originating in the libxml2 FFI layer.
#[derive(Error, Debug)]
pub enum LibXml2Error {
    #[error("schema could not be parsed: {details}")]
    SchemaParseFailed { details: String },

    #[error("document could not be parsed: {details}")]
    DocumentParseFailed { details: String },

    #[error("validation context creation failed")]
    ValidationContextCreationFailed,

    #[error("memory allocation failed in libxml2")]
    MemoryAllocation,

    #[error("validation produced internal error code {code}")]
    InternalError { code: i32 },

    #[error("path is not representable in the C API: {path}")]
    InvalidPath { path: PathBuf },
}

impl From<LibXml2Error> for ValidationError {
    fn from(err: LibXml2Error) -> Self {
        ValidationError::LibXml2Internal {
            details: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ValidationError>;

/// LibXML2 result type alias
pub type LibXml2Result<T> = std::result::Result<T, LibXml2Error>;
