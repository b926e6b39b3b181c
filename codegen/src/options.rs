//! Generation options

use std::collections::BTreeMap;

use typegen_types::Dialect;

/// Output shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Plain type aliases and interfaces
    #[default]
    Interfaces,
    /// Zod validation schemas with inferred types
    Zod,
}

impl Backend {
    /// Parse a backend name (case-insensitive)
    ///
    /// ```
    /// use typegen_codegen::Backend;
    ///
    /// assert_eq!(Backend::parse("zod"), Some(Backend::Zod));
    /// assert_eq!(Backend::parse("Interfaces"), Some(Backend::Interfaces));
    /// assert_eq!(Backend::parse("classes"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "interfaces" | "interface" | "types" | "kysely" => Some(Backend::Interfaces),
            "zod" => Some(Backend::Zod),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Backend::Interfaces => "interfaces",
            Backend::Zod => "zod",
        }
    }
}

impl core::fmt::Display for Backend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that shapes one generation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub dialect: Dialect,
    pub backend: Backend,
    /// Convert snake_case column and table keys to camelCase
    pub camel_case: bool,
    /// Globs over `schema.table`; empty keeps everything not excluded
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    /// Zod only: lower `IN (0, 1)` checks to `z.coerce.boolean()`
    pub boolean_coercion: bool,
    /// Schemas whose enums and tables are named without a prefix; `None` uses the
    /// dialect's defaults
    pub default_schemas: Option<Vec<String>>,
    /// `table.column` or `schema.table.column` to a verbatim type expression
    pub overrides: BTreeMap<String, String>,
    /// Emit `import type { ... }` for type-only imports
    pub type_only_imports: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            backend: Backend::default(),
            camel_case: false,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            boolean_coercion: false,
            default_schemas: None,
            overrides: BTreeMap::new(),
            type_only_imports: true,
        }
    }
}

impl GenerateOptions {
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn backend(self, backend: Backend) -> Self {
        Self { backend, ..self }
    }

    #[must_use]
    pub fn camel_case(self, camel_case: bool) -> Self {
        Self { camel_case, ..self }
    }

    #[must_use]
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn boolean_coercion(self, boolean_coercion: bool) -> Self {
        Self {
            boolean_coercion,
            ..self
        }
    }

    #[must_use]
    pub fn default_schemas<I, S>(self, schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_schemas: Some(schemas.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    #[must_use]
    pub fn override_type(mut self, key: impl Into<String>, ty: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), ty.into());
        self
    }

    #[must_use]
    pub fn type_only_imports(self, type_only_imports: bool) -> Self {
        Self {
            type_only_imports,
            ..self
        }
    }

    /// Configured default schemas, or the dialect's
    #[must_use]
    pub fn resolved_default_schemas(&self) -> Vec<String> {
        match &self.default_schemas {
            Some(schemas) => schemas.clone(),
            None => self
                .dialect
                .default_schemas()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
