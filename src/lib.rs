//! # xsd-validate Library
//!
//! Validate an XML document against an XSD schema using libxml2, with a
//! human-readable PASS/FAIL report carrying line-numbered diagnostics.

pub mod cli;
pub mod error;
pub mod libxml2;
pub mod output;
pub mod validator;

pub use cli::Cli;
pub use error::{LibXml2Error, ValidationError};
pub use libxml2::{Diagnostic, LibXml2Wrapper, ValidationResult, XmlDocPtr, XmlSchemaPtr};
pub use output::Output;
pub use validator::{ValidationStatus, Validator, validate};
