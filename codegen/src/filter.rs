//! Include / exclude table selection
//!
//! Patterns are globs matched against `schema.table`. Partitions are dropped before any
//! pattern runs, then excludes, then includes (an empty include list keeps everything).

use glob::Pattern;
use typegen_types::Table;

use crate::error::{CodegenError, Result};

#[derive(Clone, Debug, Default)]
pub struct TableFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl TableFilter {
    /// Compile include and exclude patterns
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Returns `true` if the table survives both pattern passes
    #[must_use]
    pub fn matches(&self, table: &Table) -> bool {
        let name = table.qualified_name();
        if self.exclude.iter().any(|p| p.matches(&name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches(&name))
    }

    /// Surviving tables, in input order
    pub fn apply<'a>(&self, tables: &'a [Table]) -> Vec<&'a Table> {
        tables
            .iter()
            .filter(|table| {
                if table.is_partition {
                    tracing::debug!(table = %table.qualified_name(), "skipping partition");
                    return false;
                }
                let keep = self.matches(table);
                if !keep {
                    tracing::debug!(table = %table.qualified_name(), "filtered out");
                }
                keep
            })
            .collect()
    }
}

fn compile<I>(patterns: I) -> Result<Vec<Pattern>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Pattern::new(pattern).map_err(|e| CodegenError::InvalidPattern(pattern.to_string(), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Vec<Table> {
        vec![
            Table::new("public", "users"),
            Table::new("public", "posts"),
            Table::new("auth", "sessions"),
            Table::new("public", "internal_logs"),
        ]
    }

    fn names(filter: &TableFilter, tables: &[Table]) -> Vec<String> {
        filter
            .apply(tables)
            .into_iter()
            .map(|t| t.name.clone())
            .collect()
    }

    #[test]
    fn test_exclude_only() {
        let filter = TableFilter::new(Vec::<&str>::new(), ["*internal*"]).unwrap();
        assert_eq!(names(&filter, &tables()), ["users", "posts", "sessions"]);
    }

    #[test]
    fn test_include_only() {
        let filter = TableFilter::new(["public.user*"], Vec::<&str>::new()).unwrap();
        assert_eq!(names(&filter, &tables()), ["users"]);
    }

    #[test]
    fn test_exclude_runs_before_include() {
        let filter = TableFilter::new(["public.*"], ["*internal*"]).unwrap();
        assert_eq!(names(&filter, &tables()), ["users", "posts"]);
    }

    #[test]
    fn test_partitions_always_dropped() {
        let tables = vec![
            Table::new("public", "events"),
            Table::new("public", "events_2024").partition(),
        ];
        let filter = TableFilter::new(["*"], Vec::<&str>::new()).unwrap();
        assert_eq!(names(&filter, &tables), ["events"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = TableFilter::new(["public.[users"], Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidPattern(ref p, _) if p == "public.[users"));
    }
}
