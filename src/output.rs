//! Report formatting for validation results.

use atty;

use crate::validator::ValidationStatus;

/// Formats the PASS/FAIL report written to stdout.
pub struct Output {
    show_colors: bool,
}

impl Output {
    pub fn new() -> Self {
        Self {
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Formatter with colors off, regardless of terminal. Piped output and
    /// tests always see plain text.
    pub fn plain() -> Self {
        Self { show_colors: false }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_status(&self, status: &ValidationStatus) -> String {
        match status {
            ValidationStatus::Valid => format!(
                "{}: The XML file is valid against the schema.",
                self.colorize("VALID", "32")
            ),
            ValidationStatus::Invalid { diagnostics } => {
                let mut output = format!(
                    "{}: The XML file is NOT valid!",
                    self.colorize("INVALID", "31")
                );
                for diagnostic in diagnostics {
                    output.push_str(&format!(
                        "\n  Line {}: {}",
                        diagnostic.line, diagnostic.message
                    ));
                }
                output
            }
            ValidationStatus::Error { message } => {
                format!("{}: {}", self.colorize("Error", "33"), message)
            }
        }
    }

    pub fn print_status(&self, status: &ValidationStatus) {
        println!("{}", self.format_status(status));
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
