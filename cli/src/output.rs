//! Terminal formatting shared by the typegen commands.

use std::fmt;
use std::path::Path;

use colored::Colorize;
use typegen_codegen::Backend;
use typegen_types::Dialect;

/// Outcome of a single `typegen check` step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
    Missing,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "{}", "OK".green()),
            Self::Error => write!(f, "{}", "ERROR".red()),
            Self::Missing => write!(f, "{}", "NOT FOUND".yellow()),
        }
    }
}

pub fn heading(text: &str) -> String {
    text.bright_cyan().to_string()
}

pub fn muted(text: &str) -> String {
    text.bright_black().to_string()
}

pub fn success(text: &str) -> String {
    text.bright_green().to_string()
}

pub fn warning(text: &str) -> String {
    text.yellow().to_string()
}

pub fn error(text: &str) -> String {
    text.red().to_string()
}

/// `  Name: value` line of the config summary
pub fn field(name: &str, value: impl fmt::Display) -> String {
    format!("  {}: {value}", name.bright_blue())
}

/// Prefix printed before a check step reports its [`Status`]
pub fn step(subject: &str) -> String {
    format!("  {} {subject}... ", "Checking".bright_blue())
}

/// Warning for a column type no mapper recognized
pub fn unknown_type(raw_type_name: &str) -> String {
    format!(
        "[{}] Unknown type '{raw_type_name}', generated as unknown",
        "Warning".yellow()
    )
}

/// Success line after writing the output file
pub fn generated(path: &Path, tables: usize, enums: usize, dialect: Dialect, backend: Backend) -> String {
    format!(
        "{} {}",
        success(&format!("Generated {}", path.display())),
        muted(&format!("({tables} tables, {enums} enums, {dialect} {backend})"))
    )
}
