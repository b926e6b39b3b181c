//! Shared type definitions for typegen
//!
//! This crate provides the data model passed between the introspector, the code
//! generator and the CLI:
//!
//! - [`Dialect`] - source database dialect (PostgreSQL, MySQL, SQLite, MSSQL)
//! - [`DatabaseMetadata`], [`Table`], [`Column`], [`Enum`] - introspected schema
//! - [`ParsedConstraint`] - canonical form of a recognized CHECK constraint
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization (snapshot files)

mod constraint;
mod dialect;
mod metadata;

pub use constraint::ParsedConstraint;
pub use dialect::{Dialect, DialectParseError};
pub use metadata::{Column, DatabaseMetadata, Enum, Table};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{Column, DatabaseMetadata, Dialect, Enum, ParsedConstraint, Table};
}
