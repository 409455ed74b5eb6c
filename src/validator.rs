//! Validation orchestration.
//!
//! A single linear call sequence: compile the schema, parse the document,
//! run the conformance check. Operational failures (missing file, malformed
//! input, libxml2 internal errors) are folded into a reportable status
//! rather than aborting the process.

use std::path::Path;

use crate::error::{LibXml2Error, Result, ValidationError};
use crate::libxml2::{Diagnostic, LibXml2Wrapper, ValidationResult};
use crate::output::Output;

/// Reportable outcome of validating one document against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Document conforms to the schema
    Valid,
    /// Document violates the schema; one diagnostic per violation, in the
    /// order the engine reported them
    Invalid { diagnostics: Vec<Diagnostic> },
    /// Operational failure before or during validation
    Error { message: String },
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationStatus::Invalid { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationStatus::Error { .. })
    }
}

/// Validates XML documents against XSD schemas.
pub struct Validator {
    libxml2: LibXml2Wrapper,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            libxml2: LibXml2Wrapper::new(),
        }
    }

    /// Validate `xml_path` against `xsd_path`.
    ///
    /// Never panics and never returns an error: every operational failure
    /// becomes `ValidationStatus::Error`.
    pub fn validate_document(&self, xml_path: &Path, xsd_path: &Path) -> ValidationStatus {
        match self.run(xml_path, xsd_path) {
            Ok(ValidationResult::Valid) => ValidationStatus::Valid,
            Ok(ValidationResult::Invalid { diagnostics }) => {
                ValidationStatus::Invalid { diagnostics }
            }
            Ok(ValidationResult::InternalError { code }) => ValidationStatus::Error {
                message: ValidationError::from(LibXml2Error::InternalError { code }).to_string(),
            },
            Err(err) => ValidationStatus::Error {
                message: err.to_string(),
            },
        }
    }

    fn run(&self, xml_path: &Path, xsd_path: &Path) -> Result<ValidationResult> {
        let schema = self
            .libxml2
            .parse_schema_file(xsd_path)
            .map_err(|err| match err {
                LibXml2Error::SchemaParseFailed { details } => ValidationError::SchemaParsing {
                    file: xsd_path.to_path_buf(),
                    details,
                },
                other => ValidationError::from(other),
            })?;

        let document = self
            .libxml2
            .parse_document_file(xml_path)
            .map_err(|err| match err {
                LibXml2Error::DocumentParseFailed { details } => ValidationError::DocumentParsing {
                    file: xml_path.to_path_buf(),
                    details,
                },
                other => ValidationError::from(other),
            })?;

        let result = self.libxml2.validate_document(&schema, &document)?;
        Ok(result)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate one XML file against one XSD file, print the report to stdout,
/// and return whether the document validated.
pub fn validate(xml_path: &Path, xsd_path: &Path) -> bool {
    let validator = Validator::new();
    let status = validator.validate_document(xml_path, xsd_path);

    let output = Output::new();
    output.print_status(&status);

    status.is_valid()
}
