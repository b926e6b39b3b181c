//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;
use typegen_codegen::CodegenError;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generation rejected the options
    #[error("Generation failed: {0}")]
    Codegen(#[from] CodegenError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Metadata snapshot could not be decoded
    #[error("Invalid metadata snapshot {}: {}", .0.display(), .1)]
    Metadata(PathBuf, #[source] serde_json::Error),

    /// `--verify` found the output file out of date
    #[error("{} is out of date; run `typegen generate` to update it", .0.display())]
    VerifyMismatch(PathBuf),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
