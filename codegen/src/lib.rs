//! Code generation core for typegen
//!
//! Turns introspected [`DatabaseMetadata`] into TypeScript declarations for a query
//! builder, either as plain interfaces or as Zod schemas:
//!
//! ```text
//! DatabaseMetadata ─► constraints::annotate ─► transform (typemap + naming) ─► Program ─► serializer
//! ```
//!
//! - [`constraints`] reduces each dialect's CHECK text to a [`ParsedConstraint`]
//! - [`typemap`] maps raw column types, tracking helper types and unknown names
//! - [`naming`] owns every generated identifier, including the enum name registry
//! - [`transform`] builds the declaration tree for the selected [`Backend`]
//! - [`serializer`] prints a [`Program`] deterministically
//!
//! # Example
//!
//! ```
//! use typegen_codegen::{GenerateOptions, generate, serialize};
//! use typegen_types::{Column, DatabaseMetadata, Dialect, Table};
//!
//! let metadata = DatabaseMetadata::new(
//!     vec![Table::new("public", "users").column(Column::new("email", "text"))],
//!     vec![],
//! );
//!
//! let generation = generate(&metadata, &GenerateOptions::new(Dialect::PostgreSQL)).unwrap();
//! let source = serialize(&generation.program);
//! assert!(source.contains("export interface User {\n  email: string;\n}"));
//! ```
//!
//! [`ParsedConstraint`]: typegen_types::ParsedConstraint

pub mod ast;
pub mod constraints;
pub mod error;
pub mod filter;
pub mod naming;
pub mod options;
pub mod serializer;
pub mod transform;
pub mod typemap;
mod words;

pub use ast::Program;
pub use error::{CodegenError, Result};
pub use filter::TableFilter;
pub use options::{Backend, GenerateOptions};
pub use serializer::serialize;
pub use transform::{Generation, UnknownType};

use typegen_types::DatabaseMetadata;

/// Run the whole pipeline: annotate CHECK constraints, then build the program.
///
/// Unknown column types never fail generation; they are reported in
/// [`Generation::warnings`].
pub fn generate(metadata: &DatabaseMetadata, options: &GenerateOptions) -> Result<Generation> {
    tracing::debug!(
        dialect = %options.dialect,
        backend = %options.backend,
        tables = metadata.tables.len(),
        enums = metadata.enums.len(),
        "generating"
    );

    let annotated = constraints::annotate(metadata, options.dialect);
    transform::build(&annotated, options)
}
