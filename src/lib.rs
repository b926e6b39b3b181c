//! # typegen
//!
//! TypeScript declarations from introspected database metadata, for PostgreSQL,
//! MySQL, SQLite and SQL Server.
//!
//! ## Quick Start
//!
//! ```rust
//! use typegen::prelude::*;
//!
//! # fn main() -> typegen::Result<()> {
//! let metadata = DatabaseMetadata::new(
//!     vec![Table::new("public", "users")
//!         .column(Column::new("id", "int4").auto_increment())
//!         .column(Column::new("status", "status").nullable())],
//!     vec![Enum::new("public", "status", ["active", "inactive"])],
//! );
//!
//! let (source, warnings) = typegen::generate_source(&metadata, &GenerateOptions::default())?;
//! assert!(source.contains("export type Status = 'active' | 'inactive';"));
//! assert!(source.contains("  status: Status | null;"));
//! assert!(warnings.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Backends
//!
//! | Backend      | Output                                              |
//! |--------------|-----------------------------------------------------|
//! | `Interfaces` | `kysely`-style interfaces with a `DB` root          |
//! | `Zod`        | `z.object` schemas for select / insert / update     |
//!
//! The `typegen` binary lives in the `typegen-cli` crate.

pub use typegen_codegen::{
    Backend, CodegenError, GenerateOptions, Generation, Program, Result, TableFilter, UnknownType,
    ast, constraints, generate, naming, serialize, typemap,
};
pub use typegen_types::{Column, DatabaseMetadata, Dialect, Enum, ParsedConstraint, Table};

/// Generate and print in one step
///
/// Returns the output text and the deduplicated unknown column types.
pub fn generate_source(
    metadata: &DatabaseMetadata,
    options: &GenerateOptions,
) -> Result<(String, Vec<UnknownType>)> {
    let Generation { program, warnings } = generate(metadata, options)?;
    Ok((serialize(&program), warnings))
}

/// Prelude module for commonly used types
pub mod prelude {
    pub use typegen_codegen::{Backend, GenerateOptions};
    pub use typegen_types::prelude::*;
}
