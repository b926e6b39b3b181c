//! Error type for generation
//!
//! Schema data never fails generation: unrecognized constraints and unknown column
//! types degrade to fallbacks and warnings. Only caller mistakes end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid table pattern '{0}': {1}")]
    InvalidPattern(String, #[source] glob::PatternError),

    #[error("invalid override key '{0}': expected 'table.column' or 'schema.table.column'")]
    InvalidOverride(String),
}

pub type Result<T> = std::result::Result<T, CodegenError>;
