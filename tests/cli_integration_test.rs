//! End-to-end tests for the command-line surface: report text on stdout,
//! usage handling, and exit codes.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const NOTE_XSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="note">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="to" type="xs:string"/>
        <xs:element name="from" type="xs:string"/>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;

const VALID_NOTE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<note>
  <to>Alice</to>
  <from>Bob</from>
</note>"#;

const INVALID_NOTE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<note>
  <to>Alice</to>
  <unexpected>Bob</unexpected>
</note>"#;

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xsd-validate"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_valid_document_prints_single_success_line() {
    let temp_dir = TempDir::new().unwrap();
    let xml = temp_dir.path().join("note.xml");
    let xsd = temp_dir.path().join("note.xsd");
    fs::write(&xml, VALID_NOTE).unwrap();
    fs::write(&xsd, NOTE_XSD).unwrap();

    let output = run_binary(&[xml.to_str().unwrap(), xsd.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "VALID: The XML file is valid against the schema.\n");
}

#[test]
fn test_invalid_document_prints_line_numbered_report() {
    let temp_dir = TempDir::new().unwrap();
    let xml = temp_dir.path().join("note.xml");
    let xsd = temp_dir.path().join("note.xsd");
    fs::write(&xml, INVALID_NOTE).unwrap();
    fs::write(&xsd, NOTE_XSD).unwrap();

    let output = run_binary(&[xml.to_str().unwrap(), xsd.to_str().unwrap()]);

    // Validation verdict does not change the exit status.
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "INVALID: The XML file is NOT valid!");
    assert!(lines.len() >= 2);
    assert!(
        lines[1].starts_with("  Line 4: "),
        "Expected a line-4 diagnostic, got: {}",
        lines[1]
    );
}

#[test]
fn test_nonexistent_xml_file_prints_error_line() {
    let temp_dir = TempDir::new().unwrap();
    let xsd = temp_dir.path().join("note.xsd");
    fs::write(&xsd, NOTE_XSD).unwrap();

    let output = run_binary(&["/nonexistent/file.xml", xsd.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.starts_with("Error: "),
        "Expected an Error: line, got: {}",
        stdout
    );
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_malformed_xml_prints_error_line() {
    let temp_dir = TempDir::new().unwrap();
    let xml = temp_dir.path().join("broken.xml");
    let xsd = temp_dir.path().join("note.xsd");
    fs::write(&xml, "<note><to>Alice</note>").unwrap();
    fs::write(&xsd, NOTE_XSD).unwrap();

    let output = run_binary(&[xml.to_str().unwrap(), xsd.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Error: "));
}

#[test]
fn test_malformed_schema_prints_error_line() {
    let temp_dir = TempDir::new().unwrap();
    let xml = temp_dir.path().join("note.xml");
    let xsd = temp_dir.path().join("broken.xsd");
    fs::write(&xml, VALID_NOTE).unwrap();
    fs::write(&xsd, "<not-a-schema/>").unwrap();

    let output = run_binary(&[xml.to_str().unwrap(), xsd.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Error: "));
}

#[test]
fn test_missing_arguments_prints_usage_and_exits_one() {
    let output = run_binary(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage:"));
    // No validation happened, so no report.
    assert!(output.stdout.is_empty());
}

#[test]
fn test_extra_arguments_print_usage_and_exit_one() {
    let output = run_binary(&["a.xml", "b.xsd", "c.txt"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage:"));
}

#[test]
fn test_help_exits_zero() {
    let output = run_binary(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Validate an XML file against an XSD schema"));
}

#[test]
fn test_version_exits_zero() {
    let output = run_binary(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("xsd-validate"));
}

#[test]
fn test_repeated_runs_produce_identical_output() {
    let temp_dir = TempDir::new().unwrap();
    let xml = temp_dir.path().join("note.xml");
    let xsd = temp_dir.path().join("note.xsd");
    fs::write(&xml, INVALID_NOTE).unwrap();
    fs::write(&xsd, NOTE_XSD).unwrap();

    let first = run_binary(&[xml.to_str().unwrap(), xsd.to_str().unwrap()]);
    let second = run_binary(&[xml.to_str().unwrap(), xsd.to_str().unwrap()]);

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}
