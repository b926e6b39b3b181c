//! CHECK Constraint Normalization Tests
//!
//! Every dialect's constraint text must reduce to the same `ParsedConstraint` model:
//! - `{0, 1}` in either order is boolean; any other integer set stays numeric
//! - doubled quotes are unescaped exactly once
//! - anything outside the recognized shapes is "not recognized", never an error

use typegen_codegen::constraints::{parse_constraint, sqlite::extract_table_constraints};
use typegen_types::{Dialect, ParsedConstraint};

// =============================================================================
// Helper Functions
// =============================================================================

fn numbers(values: &[i64]) -> Option<ParsedConstraint> {
    Some(ParsedConstraint::Number {
        values: values.to_vec(),
    })
}

fn strings(values: &[&str]) -> Option<ParsedConstraint> {
    Some(ParsedConstraint::String {
        values: values.iter().map(ToString::to_string).collect(),
    })
}

/// The same integer list written in each dialect's native form
fn integer_checks(list: &[i64]) -> Vec<(Dialect, String)> {
    let plain = list
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let mssql = list
        .iter()
        .map(|n| format!("[flag]=({n})"))
        .collect::<Vec<_>>()
        .join(" OR ");

    vec![
        (
            Dialect::PostgreSQL,
            format!("CHECK ((flag = ANY (ARRAY[{plain}])))"),
        ),
        (Dialect::MySQL, format!("(`flag` in ({plain}))")),
        (Dialect::SQLite, format!("flag IN ({plain})")),
        (Dialect::MSSQL, format!("({mssql})")),
    ]
}

// =============================================================================
// Boolean collapse
// =============================================================================

#[test]
fn zero_one_is_boolean_in_every_dialect() {
    for list in [[0, 1], [1, 0]] {
        for (dialect, definition) in integer_checks(&list) {
            assert_eq!(
                parse_constraint(dialect, &definition),
                Some(ParsedConstraint::Boolean),
                "{dialect}: {definition}"
            );
        }
    }
}

#[test]
fn other_integer_sets_stay_numeric_in_every_dialect() {
    for list in [&[0, 1, 2][..], &[0, 2], &[1, 2, 3]] {
        for (dialect, definition) in integer_checks(list) {
            assert_eq!(
                parse_constraint(dialect, &definition),
                numbers(list),
                "{dialect}: {definition}"
            );
        }
    }
}

#[test]
fn single_zero_is_not_boolean() {
    assert_eq!(
        parse_constraint(Dialect::SQLite, "flag IN (0)"),
        numbers(&[0])
    );
    assert_eq!(
        parse_constraint(Dialect::MySQL, "(`flag` in (0))"),
        numbers(&[0])
    );
}

// =============================================================================
// Quote handling
// =============================================================================

#[test]
fn mysql_check_clause_as_stored() {
    assert_eq!(
        parse_constraint(
            Dialect::MySQL,
            r"(`status` in (_utf8mb4\'draft\',_utf8mb4\'it\\\'s\',_utf8mb4\'C:\\\\tmp\'))"
        ),
        strings(&["draft", "it's", "C:\\tmp"])
    );
}

#[test]
fn doubled_quotes_unescape_once_in_every_dialect() {
    let cases = [
        (
            Dialect::PostgreSQL,
            "CHECK ((note = ANY (ARRAY['it''s'::text, 'x'::text])))",
        ),
        (Dialect::MySQL, "(`note` in (_utf8mb4'it''s',_utf8mb4'x'))"),
        (Dialect::SQLite, "note IN ('it''s', 'x')"),
        (Dialect::MSSQL, "([note]='it''s' OR [note]='x')"),
    ];
    for (dialect, definition) in cases {
        assert_eq!(
            parse_constraint(dialect, definition),
            strings(&["it's", "x"]),
            "{dialect}: {definition}"
        );
    }
}

#[test]
fn values_keep_source_order() {
    assert_eq!(
        parse_constraint(
            Dialect::PostgreSQL,
            "CHECK ((size = ANY (ARRAY['small'::text, 'large'::text, 'medium'::text])))"
        ),
        strings(&["small", "large", "medium"])
    );
}

#[test]
fn negative_integers() {
    assert_eq!(
        parse_constraint(
            Dialect::PostgreSQL,
            "CHECK ((delta = ANY (ARRAY['-1'::integer, 0, 1])))"
        ),
        numbers(&[-1, 0, 1])
    );
    assert_eq!(
        parse_constraint(Dialect::SQLite, "delta IN (-1, 1)"),
        numbers(&[-1, 1])
    );
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn unrecognized_shapes_are_none() {
    let cases = [
        (Dialect::PostgreSQL, "CHECK ((age >= 0))"),
        (Dialect::PostgreSQL, "CHECK ((name ~ '^[a-z]+$'::text))"),
        (Dialect::PostgreSQL, "CHECK ((length(code) = 3))"),
        (Dialect::PostgreSQL, "CHECK ((kind = ANY (ARRAY[]::text[])))"),
        (Dialect::MySQL, "(`age` between 0 and 130)"),
        (Dialect::MySQL, "(`a` in (1) or `b` in (2))"),
        (Dialect::SQLite, "age > 0"),
        (Dialect::SQLite, "kind IN ()"),
        (Dialect::MSSQL, "([age]>=(0))"),
        (Dialect::MSSQL, "([a]=(1) OR [b]=(2))"),
        (Dialect::MSSQL, "([code] like '[A-Z]%')"),
    ];
    for (dialect, definition) in cases {
        assert_eq!(
            parse_constraint(dialect, definition),
            None,
            "{dialect}: {definition}"
        );
    }
}

// =============================================================================
// SQLite DDL scanning
// =============================================================================

#[test]
fn sqlite_ddl_scan_finds_inline_and_table_checks() {
    let sql = r#"CREATE TABLE "tasks" (
        "id" integer PRIMARY KEY AUTOINCREMENT NOT NULL,
        "state" text DEFAULT 'todo' NOT NULL CHECK("state" in ('todo', 'doing', 'done')),
        "archived" integer DEFAULT 0 NOT NULL,
        "score" integer CHECK (score > 0),
        CONSTRAINT "archived_flag" CHECK("archived" IN (1, 0))
    )"#;

    assert_eq!(
        extract_table_constraints(sql),
        vec![
            (
                "state".to_string(),
                ParsedConstraint::String {
                    values: vec!["todo".into(), "doing".into(), "done".into()]
                }
            ),
            ("archived".to_string(), ParsedConstraint::Boolean),
        ]
    );
}
