//! Safe wrapper around the libxml2 XML Schema API.
//!
//! The Rust ecosystem has no mature pure-Rust XSD validator, so schema
//! compilation and conformance checking are delegated to libxml2 through
//! direct FFI. This module owns everything unsafe: the extern declarations,
//! the structured error callback, and RAII wrappers that guarantee every
//! libxml2 allocation is freed on all exit paths.
//!
//! libxml2's initialization functions are not thread-safe, so they run
//! exactly once behind `std::sync::Once`. Everything else here is a plain
//! linear parse-validate-free sequence.

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Once;

use libc::{c_char, c_int, c_void};

use crate::error::{LibXml2Error, LibXml2Result};

/// One-time libxml2 initialization flag.
static LIBXML2_INIT: Once = Once::new();

/// Keep libxml2 from printing parse errors to stderr itself; we capture
/// them through the structured callback instead.
const XML_PARSE_NOERROR: c_int = 32;
const XML_PARSE_NOWARNING: c_int = 64;

// Opaque libxml2 structures
#[repr(C)]
pub struct XmlDoc {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchema {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaParserCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaValidCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct xmlError {
    pub domain: c_int,
    pub code: c_int,
    pub message: *const c_char,
    pub level: c_int,
    pub file: *const c_char,
    pub line: c_int,
    pub str1: *const c_char,
    pub str2: *const c_char,
    pub str3: *const c_char,
    pub int1: c_int,
    pub int2: c_int,
    pub ctxt: *mut c_void,
    pub node: *mut c_void,
}

pub type XmlStructuredErrorFunc =
    Option<unsafe extern "C" fn(user_data: *mut c_void, error: *mut xmlError)>;

#[cfg_attr(target_os = "windows", link(name = "libxml2"))]
#[cfg_attr(not(target_os = "windows"), link(name = "xml2"))]
unsafe extern "C" {
    pub fn xmlInitParser();
    pub fn xmlInitGlobals();

    // Document parsing
    pub fn xmlReadFile(url: *const c_char, encoding: *const c_char, options: c_int)
    -> *mut XmlDoc;
    pub fn xmlFreeDoc(doc: *mut XmlDoc);
    pub fn xmlSetStructuredErrorFunc(ctx: *mut c_void, handler: XmlStructuredErrorFunc);

    // Schema parsing
    pub fn xmlSchemaNewParserCtxt(url: *const c_char) -> *mut XmlSchemaParserCtxt;
    pub fn xmlSchemaNewMemParserCtxt(
        buffer: *const c_char,
        size: c_int,
    ) -> *mut XmlSchemaParserCtxt;
    pub fn xmlSchemaSetParserStructuredErrors(
        ctxt: *mut XmlSchemaParserCtxt,
        serror: XmlStructuredErrorFunc,
        ctx: *mut c_void,
    );
    pub fn xmlSchemaParse(ctxt: *const XmlSchemaParserCtxt) -> *mut XmlSchema;
    pub fn xmlSchemaFreeParserCtxt(ctxt: *mut XmlSchemaParserCtxt);
    pub fn xmlSchemaFree(schema: *mut XmlSchema);

    // Validation
    pub fn xmlSchemaNewValidCtxt(schema: *const XmlSchema) -> *mut XmlSchemaValidCtxt;
    pub fn xmlSchemaFreeValidCtxt(ctxt: *mut XmlSchemaValidCtxt);
    pub fn xmlSchemaSetValidStructuredErrors(
        ctxt: *mut XmlSchemaValidCtxt,
        sherr: XmlStructuredErrorFunc,
        ctx: *mut c_void,
    );
    pub fn xmlSchemaValidateDoc(ctxt: *const XmlSchemaValidCtxt, doc: *const XmlDoc) -> c_int;
}

/// A single engine-reported problem: the source line it points at and the
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: i32,
    pub message: String,
}

/// Callback for libxml2 structured error reporting.
///
/// `user_data` is a `*mut Vec<Diagnostic>` owned by the caller of the
/// parse/validate function; the callback must not be reachable after that
/// vector goes out of scope.
unsafe extern "C" fn structured_error_callback(user_data: *mut c_void, error: *mut xmlError) {
    let diagnostics = unsafe { &mut *(user_data as *mut Vec<Diagnostic>) };

    if !error.is_null() {
        let msg_ptr = unsafe { (*error).message };
        if !msg_ptr.is_null() {
            let c_str = unsafe { CStr::from_ptr(msg_ptr) };
            if let Ok(s) = c_str.to_str() {
                diagnostics.push(Diagnostic {
                    line: unsafe { (*error).line },
                    message: s.trim().to_string(),
                });
            }
        }
    }
}

/// First captured message, for turning a failed parse into an error detail.
fn first_message(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(|d| d.message.clone())
        .unwrap_or_else(|| "no detail reported by libxml2".to_string())
}

/// Owned, parsed XSD schema. Freed with `xmlSchemaFree` on drop.
#[derive(Debug)]
pub struct XmlSchemaPtr {
    ptr: *mut XmlSchema,
    _phantom: PhantomData<XmlSchema>,
}

impl XmlSchemaPtr {
    /// # Safety
    ///
    /// `ptr` must have been returned by `xmlSchemaParse` and must not be
    /// freed by anyone else.
    pub(crate) unsafe fn from_raw(ptr: *mut XmlSchema) -> LibXml2Result<Self> {
        if ptr.is_null() {
            return Err(LibXml2Error::SchemaParseFailed {
                details: "no detail reported by libxml2".to_string(),
            });
        }
        Ok(XmlSchemaPtr {
            ptr,
            _phantom: PhantomData,
        })
    }

    pub(crate) fn as_ptr(&self) -> *const XmlSchema {
        self.ptr
    }

    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }
}

impl Drop for XmlSchemaPtr {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                xmlSchemaFree(self.ptr);
            }
            self.ptr = std::ptr::null_mut();
        }
    }
}

/// Owned, parsed XML document. Freed with `xmlFreeDoc` on drop.
#[derive(Debug)]
pub struct XmlDocPtr {
    ptr: *mut XmlDoc,
    _phantom: PhantomData<XmlDoc>,
}

impl XmlDocPtr {
    /// # Safety
    ///
    /// `ptr` must have been returned by a libxml2 document parser and must
    /// not be freed by anyone else.
    pub(crate) unsafe fn from_raw(ptr: *mut XmlDoc) -> LibXml2Result<Self> {
        if ptr.is_null() {
            return Err(LibXml2Error::DocumentParseFailed {
                details: "no detail reported by libxml2".to_string(),
            });
        }
        Ok(XmlDocPtr {
            ptr,
            _phantom: PhantomData,
        })
    }

    pub(crate) fn as_ptr(&self) -> *const XmlDoc {
        self.ptr
    }
}

impl Drop for XmlDocPtr {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                xmlFreeDoc(self.ptr);
            }
            self.ptr = std::ptr::null_mut();
        }
    }
}

/// Outcome of a schema-conformance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Validation succeeded (return code 0)
    Valid,
    /// Validation failed with schema violations (return code > 0)
    Invalid { diagnostics: Vec<Diagnostic> },
    /// libxml2 reported an internal error (return code < 0)
    InternalError { code: i32 },
}

impl ValidationResult {
    /// Map a libxml2 return code plus the captured diagnostics.
    pub fn from_code(code: c_int, diagnostics: Vec<Diagnostic>) -> Self {
        match code {
            0 => ValidationResult::Valid,
            n if n > 0 => ValidationResult::Invalid { diagnostics },
            n => ValidationResult::InternalError { code: n },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationResult::Invalid { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationResult::InternalError { .. })
    }
}

/// Safe entry point to libxml2 schema parsing and validation.
///
/// Construction initializes libxml2 exactly once; instances are cheap and
/// carry no state of their own.
pub struct LibXml2Wrapper {
    _phantom: PhantomData<()>,
}

impl LibXml2Wrapper {
    pub fn new() -> Self {
        LIBXML2_INIT.call_once(|| unsafe {
            xmlInitParser();
            xmlInitGlobals();
        });

        LibXml2Wrapper {
            _phantom: PhantomData,
        }
    }

    /// Parse and compile an XSD schema from a file path.
    ///
    /// # Errors
    ///
    /// Returns `LibXml2Error::SchemaParseFailed` with the first engine
    /// message when the file is missing, unreadable, or not a valid schema.
    pub fn parse_schema_file(&self, path: &Path) -> LibXml2Result<XmlSchemaPtr> {
        let c_path = path_to_cstring(path)?;
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let diagnostics_ptr = &mut diagnostics as *mut Vec<Diagnostic> as *mut c_void;

        unsafe {
            let parser_ctxt = xmlSchemaNewParserCtxt(c_path.as_ptr());
            if parser_ctxt.is_null() {
                return Err(LibXml2Error::MemoryAllocation);
            }

            xmlSchemaSetParserStructuredErrors(
                parser_ctxt,
                Some(structured_error_callback),
                diagnostics_ptr,
            );

            let schema_ptr = xmlSchemaParse(parser_ctxt);
            xmlSchemaFreeParserCtxt(parser_ctxt);

            if schema_ptr.is_null() {
                return Err(LibXml2Error::SchemaParseFailed {
                    details: first_message(&diagnostics),
                });
            }

            XmlSchemaPtr::from_raw(schema_ptr)
        }
    }

    /// Parse and compile an XSD schema from an in-memory buffer.
    pub fn parse_schema_from_memory(&self, schema_data: &[u8]) -> LibXml2Result<XmlSchemaPtr> {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let diagnostics_ptr = &mut diagnostics as *mut Vec<Diagnostic> as *mut c_void;

        unsafe {
            let parser_ctxt = xmlSchemaNewMemParserCtxt(
                schema_data.as_ptr() as *const c_char,
                schema_data.len() as c_int,
            );
            if parser_ctxt.is_null() {
                return Err(LibXml2Error::MemoryAllocation);
            }

            xmlSchemaSetParserStructuredErrors(
                parser_ctxt,
                Some(structured_error_callback),
                diagnostics_ptr,
            );

            let schema_ptr = xmlSchemaParse(parser_ctxt);
            xmlSchemaFreeParserCtxt(parser_ctxt);

            if schema_ptr.is_null() {
                return Err(LibXml2Error::SchemaParseFailed {
                    details: first_message(&diagnostics),
                });
            }

            XmlSchemaPtr::from_raw(schema_ptr)
        }
    }

    /// Parse an XML document from a file path.
    ///
    /// # Errors
    ///
    /// Returns `LibXml2Error::DocumentParseFailed` with the first engine
    /// message when the file is missing, unreadable, or not well-formed.
    pub fn parse_document_file(&self, path: &Path) -> LibXml2Result<XmlDocPtr> {
        let c_path = path_to_cstring(path)?;
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let diagnostics_ptr = &mut diagnostics as *mut Vec<Diagnostic> as *mut c_void;

        unsafe {
            // The structured handler is process-global state; install it for
            // the duration of this parse only.
            xmlSetStructuredErrorFunc(diagnostics_ptr, Some(structured_error_callback));
            let doc_ptr = xmlReadFile(
                c_path.as_ptr(),
                std::ptr::null(),
                XML_PARSE_NOERROR | XML_PARSE_NOWARNING,
            );
            xmlSetStructuredErrorFunc(std::ptr::null_mut(), None);

            if doc_ptr.is_null() {
                return Err(LibXml2Error::DocumentParseFailed {
                    details: first_message(&diagnostics),
                });
            }

            XmlDocPtr::from_raw(doc_ptr)
        }
    }

    /// Validate a parsed document against a parsed schema.
    ///
    /// A fresh validation context is created per call; libxml2 requires one
    /// context per validation run.
    ///
    /// # Errors
    ///
    /// Returns `LibXml2Error::ValidationContextCreationFailed` if the
    /// context cannot be allocated, or `LibXml2Error::InternalError` when
    /// libxml2 reports a negative return code.
    pub fn validate_document(
        &self,
        schema: &XmlSchemaPtr,
        document: &XmlDocPtr,
    ) -> LibXml2Result<ValidationResult> {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let diagnostics_ptr = &mut diagnostics as *mut Vec<Diagnostic> as *mut c_void;

        unsafe {
            let valid_ctxt = xmlSchemaNewValidCtxt(schema.as_ptr());
            if valid_ctxt.is_null() {
                return Err(LibXml2Error::ValidationContextCreationFailed);
            }

            xmlSchemaSetValidStructuredErrors(
                valid_ctxt,
                Some(structured_error_callback),
                diagnostics_ptr,
            );

            let result_code = xmlSchemaValidateDoc(valid_ctxt, document.as_ptr());
            xmlSchemaFreeValidCtxt(valid_ctxt);

            match ValidationResult::from_code(result_code, diagnostics) {
                ValidationResult::InternalError { code } => {
                    Err(LibXml2Error::InternalError { code })
                }
                result => Ok(result),
            }
        }
    }
}

impl Default for LibXml2Wrapper {
    fn default() -> Self {
        Self::new()
    }
}

fn path_to_cstring(path: &Path) -> LibXml2Result<CString> {
    let path_str = path.to_str().ok_or_else(|| LibXml2Error::InvalidPath {
        path: path.to_path_buf(),
    })?;
    CString::new(path_str).map_err(|_| LibXml2Error::InvalidPath {
        path: path.to_path_buf(),
    })
}
