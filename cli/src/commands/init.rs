//! Init command - writes a starter `typegen.config.toml`

use std::path::Path;

use colored::Colorize;
use typegen_codegen::Backend;
use typegen_types::Dialect;

use crate::error::CliError;
use crate::output;

pub fn run(path: &Path, dialect: Dialect, backend: Backend) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::Other(format!(
            "{} already exists. Delete it first to reinitialize.",
            path.display()
        )));
    }

    std::fs::write(path, starter_config(dialect, backend))
        .map_err(|e| CliError::IoError(e.to_string()))?;

    println!("{}", output::success(&format!("Created {}", path.display())));
    println!();
    println!("Next steps:");
    println!(
        "  1. Export your database metadata to {}",
        "./metadata.json".bright_cyan()
    );
    println!("  2. Adjust filters and overrides in {}", path.display());
    println!(
        "  3. Run {} to write your types",
        "typegen generate".bright_cyan()
    );

    Ok(())
}

/// Starter configuration for a dialect and backend
pub fn starter_config(dialect: Dialect, backend: Backend) -> String {
    let default_schemas = match dialect.default_schemas() {
        [] => "# defaultSchemas = [\"app\"]".to_string(),
        schemas => format!(
            "defaultSchemas = [{}]",
            schemas
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };

    format!(
        r#"# typegen configuration
# Flags passed to `typegen generate` override these values.

dialect = "{dialect}"
backend = "{backend}"
metadata = "./metadata.json"
outFile = "./src/db/types.ts"

camelCase = false
booleanCoercion = false
typeOnlyImports = true
{default_schemas}

# includePattern = "public.*"
excludePattern = ["*.migrations", "*.knex_*"]

[overrides]
# "users.settings" = "Record<string, unknown>"
"#
    )
}
