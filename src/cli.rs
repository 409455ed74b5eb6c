use clap::Parser;
use std::path::PathBuf;

/// Validate an XML file against an XSD schema
#[derive(Parser, Debug, Clone)]
#[command(name = "xsd-validate")]
#[command(about = "Validate an XML file against an XSD schema")]
#[command(version)]
pub struct Cli {
    /// XML document to validate
    #[arg(value_name = "xml_file")]
    pub xml_file: PathBuf,

    /// XSD schema to validate against
    #[arg(value_name = "xsd_file")]
    pub xsd_file: PathBuf,
}
