//! Configuration for typegen CLI
//!
//! Handles loading `typegen.config.toml`. Every key is optional; command-line
//! flags override whatever the file sets.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use typegen_codegen::{Backend, GenerateOptions};
use typegen_types::Dialect;

pub const CONFIG_FILE: &str = "typegen.config.toml";

// ============================================================================
// Configuration
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub dialect: Dialect,

    /// Introspected metadata snapshot (JSON)
    #[serde(default = "default_metadata")]
    pub metadata: PathBuf,

    #[serde(default = "default_out_file")]
    pub out_file: PathBuf,

    #[serde(default, rename = "backend")]
    raw_backend: Option<String>,

    #[serde(default)]
    pub camel_case: bool,

    #[serde(default)]
    pub include_pattern: Option<Filter>,

    #[serde(default)]
    pub exclude_pattern: Option<Filter>,

    #[serde(default)]
    pub boolean_coercion: bool,

    #[serde(default)]
    pub default_schemas: Option<Filter>,

    #[serde(default = "yes")]
    pub type_only_imports: bool,

    /// `table.column` or `schema.table.column` to a verbatim type expression
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

fn default_metadata() -> PathBuf { PathBuf::from("./metadata.json") }
fn default_out_file() -> PathBuf { PathBuf::from("./src/db/types.ts") }
fn yes() -> bool { true }

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            metadata: default_metadata(),
            out_file: default_out_file(),
            raw_backend: None,
            camel_case: false,
            include_pattern: None,
            exclude_pattern: None,
            boolean_coercion: false,
            default_schemas: None,
            type_only_imports: true,
            overrides: BTreeMap::new(),
        }
    }
}

/// Filter (single or multiple values)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    One(String),
    Many(Vec<String>),
}

impl Filter {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::One(s) => std::slice::from_ref(s).iter().map(String::as_str),
            Self::Many(v) => v.iter().map(String::as_str),
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

// ============================================================================
// Config implementation
// ============================================================================

impl Config {
    /// Load from default config file
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from the default config file, or fall back to defaults when it is absent
    pub fn load_or_default() -> Result<Self, Error> {
        match Self::load() {
            Err(Error::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Parse(path.into(), e))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), dialect = %config.dialect, "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if let Some(raw) = &self.raw_backend {
            if Backend::parse(raw).is_none() {
                return Err(Error::InvalidBackend(raw.clone()));
            }
        }

        for pattern in self.patterns() {
            glob::Pattern::new(pattern).map_err(|e| Error::Glob(pattern.into(), e))?;
        }

        for key in self.overrides.keys() {
            let segments = key.split('.').count();
            if !(2..=3).contains(&segments) || key.split('.').any(str::is_empty) {
                return Err(Error::InvalidOverride(key.clone()));
            }
        }

        Ok(())
    }

    /// Output back-end (validated on load)
    pub fn backend(&self) -> Backend {
        self.raw_backend
            .as_deref()
            .and_then(Backend::parse)
            .unwrap_or_default()
    }

    /// Every include and exclude pattern, includes first
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.include_pattern
            .iter()
            .chain(self.exclude_pattern.iter())
            .flat_map(Filter::iter)
    }

    /// Generator options described by this file alone
    pub fn generate_options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::new(self.dialect)
            .backend(self.backend())
            .camel_case(self.camel_case)
            .boolean_coercion(self.boolean_coercion)
            .type_only_imports(self.type_only_imports);

        if let Some(include) = &self.include_pattern {
            options = options.include(include.iter());
        }
        if let Some(exclude) = &self.exclude_pattern {
            options = options.exclude(exclude.iter());
        }
        if let Some(schemas) = &self.default_schemas {
            options = options.default_schemas(schemas.iter());
        }
        for (key, ty) in &self.overrides {
            options = options.override_type(key, ty);
        }

        options
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("unknown backend '{0}' (expected interfaces or zod)")]
    InvalidBackend(String),

    #[error("invalid glob '{0}': {1}")]
    Glob(String, #[source] glob::PatternError),

    #[error("invalid override key '{0}' (expected table.column or schema.table.column)")]
    InvalidOverride(String),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
