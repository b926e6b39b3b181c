//! SQLite CHECK constraints
//!
//! SQLite does not expose parsed constraints, so they are recovered from the
//! `CREATE TABLE` text kept in `sqlite_master`, either inline on a column definition
//! or as a table constraint:
//!
//! ```text
//! CREATE TABLE t (
//!     status TEXT CHECK (status IN ('a', 'b')),
//!     flag INTEGER,
//!     CHECK ("flag" IN (0, 1))
//! )
//! ```

use std::sync::LazyLock;

use regex::Regex;
use typegen_types::ParsedConstraint;

use super::{closing_paren, parse_value_list, strip_wrapping, unquote_identifier};

const COLUMN: &str = r#"(?P<column>"[^"]+"|`[^`]+`|\[[^\]]+\]|[A-Za-z_][A-Za-z0-9_$]*)"#;

static IN_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)^{COLUMN}\s+in\s*\((?P<list>.*)\)$")).expect("static regex")
});

static CHECK_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bcheck\s*\(\s*{COLUMN}\s+in\s*\(")).expect("static regex")
});

/// Parse a single `col IN (...)` CHECK body
pub fn parse(definition: &str) -> Option<ParsedConstraint> {
    let captures = IN_LIST.captures(strip_wrapping(definition))?;
    parse_value_list(captures.name("list")?.as_str())
}

/// Find every `CHECK (col IN (...))` in a `CREATE TABLE` statement.
///
/// Returns `(column, constraint)` pairs in source order. Checks that combine the list
/// with further predicates are skipped.
#[must_use]
pub fn extract_table_constraints(create_sql: &str) -> Vec<(String, ParsedConstraint)> {
    let mut found = Vec::new();

    for captures in CHECK_IN.captures_iter(create_sql) {
        let (Some(whole), Some(column)) = (captures.get(0), captures.name("column")) else {
            continue;
        };

        // the match ends just past the list's opening paren
        let open = whole.end() - 1;
        let Some(close) = closing_paren(create_sql, open) else {
            continue;
        };
        if !create_sql[close + 1..].trim_start().starts_with(')') {
            continue;
        }

        let column = unquote_identifier(column.as_str());
        match parse_value_list(&create_sql[open + 1..close]) {
            Some(constraint) => found.push((column.to_string(), constraint)),
            None => tracing::trace!(column, "table check not recognized"),
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_check_body() {
        assert_eq!(
            parse("status IN ('draft', 'published')"),
            Some(ParsedConstraint::String {
                values: vec!["draft".into(), "published".into()]
            })
        );
        assert_eq!(
            parse("CHECK(\"flag\" in (1,0))"),
            Some(ParsedConstraint::Boolean)
        );
    }

    #[test]
    fn test_column_named_like_keyword() {
        assert_eq!(parse("checked IN (0, 1)"), Some(ParsedConstraint::Boolean));
        assert_eq!(
            parse("checkpoint IN ('a', 'b')"),
            Some(ParsedConstraint::String {
                values: vec!["a".into(), "b".into()]
            })
        );
    }

    #[test]
    fn test_extract_inline_and_table_constraints() {
        let sql = r#"CREATE TABLE posts (
            id INTEGER PRIMARY KEY,
            status TEXT NOT NULL CHECK (status IN ('draft', 'published')),
            featured INTEGER,
            rank INTEGER CHECK(rank  IN  (1, 2, 3)),
            CHECK ("featured" IN (0, 1))
        )"#;

        assert_eq!(
            extract_table_constraints(sql),
            vec![
                (
                    "status".to_string(),
                    ParsedConstraint::String {
                        values: vec!["draft".into(), "published".into()]
                    }
                ),
                (
                    "rank".to_string(),
                    ParsedConstraint::Number {
                        values: vec![1, 2, 3]
                    }
                ),
                ("featured".to_string(), ParsedConstraint::Boolean),
            ]
        );
    }

    #[test]
    fn test_extract_skips_compound_checks() {
        let sql = "CREATE TABLE t (a INTEGER, b INTEGER, CHECK (a IN (1, 2) AND b > 0), CHECK (b > 0))";
        assert!(extract_table_constraints(sql).is_empty());
    }

    #[test]
    fn test_parenthesis_inside_literal() {
        let sql = "CREATE TABLE t (mood TEXT CHECK (mood IN ('(', ')')))";
        assert_eq!(
            extract_table_constraints(sql),
            vec![(
                "mood".to_string(),
                ParsedConstraint::String {
                    values: vec!["(".into(), ")".into()]
                }
            )]
        );
    }
}
