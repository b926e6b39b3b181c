//! Generate command
//!
//! This command generates TypeScript declarations by:
//! 1. Merging command-line flags over `typegen.config.toml`
//! 2. Loading the introspected metadata snapshot (JSON)
//! 3. Running the generator and reporting unknown column types
//! 4. Writing the output file, printing it, or verifying it is up to date

use std::path::{Path, PathBuf};

use typegen_codegen::{Backend, GenerateOptions, generate, serialize};
use typegen_types::{DatabaseMetadata, Dialect};

use crate::config::Config;
use crate::error::CliError;
use crate::output;

/// Flags that override the config file
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub metadata: Option<PathBuf>,
    pub out_file: Option<PathBuf>,
    pub dialect: Option<Dialect>,
    pub backend: Option<Backend>,
    pub camel_case: bool,
    pub include_pattern: Vec<String>,
    pub exclude_pattern: Vec<String>,
    pub boolean_coercion: bool,
    pub default_schemas: Vec<String>,
    pub print: bool,
    pub verify: bool,
}

impl GenerateArgs {
    /// Config options with every flag that was given applied on top
    pub fn options(&self, config: &Config) -> GenerateOptions {
        let mut options = config.generate_options();

        if let Some(dialect) = self.dialect {
            options.dialect = dialect;
        }
        if let Some(backend) = self.backend {
            options.backend = backend;
        }
        options.camel_case |= self.camel_case;
        options.boolean_coercion |= self.boolean_coercion;

        if !self.include_pattern.is_empty() {
            options.include_patterns = self.include_pattern.clone();
        }
        if !self.exclude_pattern.is_empty() {
            options.exclude_patterns = self.exclude_pattern.clone();
        }
        if !self.default_schemas.is_empty() {
            options.default_schemas = Some(self.default_schemas.clone());
        }

        options
    }
}

pub fn run(config: &Config, args: GenerateArgs) -> Result<(), CliError> {
    let options = args.options(config);
    let metadata_path = args.metadata.as_deref().unwrap_or(&config.metadata);
    let out_file = args.out_file.as_deref().unwrap_or(&config.out_file);

    let metadata = load_metadata(metadata_path)?;
    let generation = generate(&metadata, &options)?;

    for unknown in &generation.warnings {
        eprintln!("{}", output::unknown_type(&unknown.raw_type_name));
    }

    let source = serialize(&generation.program);

    if args.print {
        print!("{source}");
        return Ok(());
    }

    if args.verify {
        return verify(out_file, &source);
    }

    write(out_file, &source)?;
    println!(
        "{}",
        output::generated(
            out_file,
            metadata.tables.len(),
            metadata.enums.len(),
            options.dialect,
            options.backend
        )
    );
    Ok(())
}

/// Read and decode a metadata snapshot
pub fn load_metadata(path: &Path) -> Result<DatabaseMetadata, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::IoError(format!("failed to read {}: {e}", path.display())))?;
    let metadata: DatabaseMetadata =
        serde_json::from_str(&content).map_err(|e| CliError::Metadata(path.into(), e))?;

    tracing::debug!(
        path = %path.display(),
        tables = metadata.tables.len(),
        enums = metadata.enums.len(),
        "loaded metadata"
    );
    Ok(metadata)
}

fn write(path: &Path, source: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::IoError(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    std::fs::write(path, source)
        .map_err(|e| CliError::IoError(format!("failed to write {}: {e}", path.display())))
}

fn verify(path: &Path, source: &str) -> Result<(), CliError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CliError::VerifyMismatch(path.into()));
        }
        Err(e) => {
            return Err(CliError::IoError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    if existing != source {
        return Err(CliError::VerifyMismatch(path.into()));
    }

    println!("{}", output::success(&format!("{} is up to date", path.display())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config: Config = toml::from_str(r#"
            dialect = "mysql"
            excludePattern = "*_old"
            camelCase = true
        "#).unwrap();
        let args = GenerateArgs {
            dialect: Some(Dialect::SQLite),
            backend: Some(Backend::Zod),
            exclude_pattern: vec!["*internal*".into()],
            ..GenerateArgs::default()
        };

        let options = args.options(&config);
        assert_eq!(options.dialect, Dialect::SQLite);
        assert_eq!(options.backend, Backend::Zod);
        assert_eq!(options.exclude_patterns, ["*internal*"]);
        assert!(options.camel_case);
    }

    #[test]
    fn absent_flags_keep_config() {
        let config: Config = toml::from_str(r#"
            includePattern = ["public.*"]
            defaultSchemas = ["public", "app"]
        "#).unwrap();
        let options = GenerateArgs::default().options(&config);

        assert_eq!(options.include_patterns, ["public.*"]);
        assert_eq!(
            options.default_schemas,
            Some(vec!["public".to_string(), "app".to_string()])
        );
    }
}
