//! Unified source dialect enum
//!
//! Every stage of the pipeline that behaves differently per database (constraint
//! grammar, type table, default schema) keys off this one enum.

/// Source database dialect
///
/// Each dialect has its own catalog representation, CHECK-constraint text grammar
/// and raw type names.
///
/// # Examples
///
/// ```
/// use typegen_types::Dialect;
///
/// let dialect = Dialect::PostgreSQL;
/// assert_eq!(dialect.default_schemas(), &["public"]);
///
/// assert!(Dialect::MySQL.default_schemas().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// PostgreSQL - catalog-normalized CHECK text, helper-type indirection
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "postgres", alias = "pg"))]
    PostgreSQL,

    /// MySQL / MariaDB - `information_schema` CHECK clauses with charset introducers
    #[cfg_attr(feature = "serde", serde(alias = "mariadb"))]
    MySQL,

    /// SQLite - CHECK constraints recovered from the table's `CREATE TABLE` text
    #[cfg_attr(feature = "serde", serde(alias = "libsql"))]
    SQLite,

    /// Microsoft SQL Server - bracket-quoted identifiers
    #[cfg_attr(feature = "serde", serde(alias = "sqlserver", alias = "tsql"))]
    MSSQL,
}

impl Dialect {
    /// All dialects, in declaration order
    pub const ALL: [Dialect; 4] = [
        Dialect::PostgreSQL,
        Dialect::MySQL,
        Dialect::SQLite,
        Dialect::MSSQL,
    ];

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports various common aliases:
    /// - PostgreSQL: `"postgresql"`, `"postgres"`, `"pg"`
    /// - MySQL: `"mysql"`, `"mariadb"`
    /// - SQLite: `"sqlite"`, `"libsql"`
    /// - MSSQL: `"mssql"`, `"sqlserver"`, `"tsql"`
    ///
    /// # Examples
    ///
    /// ```
    /// use typegen_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("sqlite"), Some(Dialect::SQLite));
    /// assert_eq!(Dialect::parse("postgres"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("SqlServer"), Some(Dialect::MSSQL));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let is = |candidates: &[&str]| candidates.iter().any(|c| s.eq_ignore_ascii_case(c));

        if is(&["postgresql", "postgres", "pg"]) {
            Some(Dialect::PostgreSQL)
        } else if is(&["mysql", "mariadb"]) {
            Some(Dialect::MySQL)
        } else if is(&["sqlite", "libsql"]) {
            Some(Dialect::SQLite)
        } else if is(&["mssql", "sqlserver", "tsql"]) {
            Some(Dialect::MSSQL)
        } else {
            None
        }
    }

    /// Schemas whose enums are named without a schema prefix
    ///
    /// MySQL has no meaningful default: the "schema" is the database itself, so
    /// callers configure it explicitly when they want unqualified names.
    #[must_use]
    pub const fn default_schemas(&self) -> &'static [&'static str] {
        match self {
            Dialect::PostgreSQL => &["public"],
            Dialect::MySQL => &[],
            Dialect::SQLite => &["main"],
            Dialect::MSSQL => &["dbo"],
        }
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
            Dialect::SQLite => "sqlite",
            Dialect::MSSQL => "mssql",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect (expected one of: postgresql, mysql, sqlite, mssql)")
    }
}

impl std::error::Error for DialectParseError {}
