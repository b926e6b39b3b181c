//! CHECK-constraint normalization
//!
//! Each dialect reports CHECK constraints in its own text form. The front ends in the
//! submodules recognize a small closed family of shapes (`col IN (...)`,
//! `col = ANY (ARRAY[...])`, OR-chains of equalities) and reduce them to a
//! [`ParsedConstraint`]. Everything else is "not recognized" (`None`): range checks,
//! pattern predicates, multi-column predicates, function calls and empty lists are
//! never guessed at.
//!
//! The front ends share two algorithms defined here: the quote-aware list scanner
//! with [`parse_value_list`], and the `{0, 1}` boolean collapse in
//! [`ParsedConstraint::from_numbers`].

pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

use std::sync::LazyLock;

use regex::Regex;
use typegen_types::{DatabaseMetadata, Dialect, ParsedConstraint};

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("static regex"));

/// Parse one raw CHECK definition in the given dialect's grammar
#[must_use]
pub fn parse_constraint(dialect: Dialect, definition: &str) -> Option<ParsedConstraint> {
    match dialect {
        Dialect::PostgreSQL => postgres::parse(definition),
        Dialect::MySQL => mysql::parse(definition),
        Dialect::SQLite => sqlite::parse(definition),
        Dialect::MSSQL => mssql::parse(definition),
    }
}

/// Attach a [`ParsedConstraint`] to every column whose raw CHECK text is recognized.
///
/// Column definitions are tried first; for SQLite the table's `CREATE TABLE` text is
/// scanned as well. Columns that already carry a parsed constraint keep it.
#[must_use]
pub fn annotate(metadata: &DatabaseMetadata, dialect: Dialect) -> DatabaseMetadata {
    let mut annotated = metadata.clone();

    for table in &mut annotated.tables {
        let table_checks = match (dialect, table.definition.as_deref()) {
            (Dialect::SQLite, Some(sql)) => sqlite::extract_table_constraints(sql),
            _ => Vec::new(),
        };

        for column in &mut table.columns {
            if column.check_constraint.is_some() {
                continue;
            }

            let from_column = column
                .check_definition
                .as_deref()
                .and_then(|definition| parse_constraint(dialect, definition));
            let parsed = from_column.or_else(|| {
                table_checks
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(&column.name))
                    .map(|(_, constraint)| constraint.clone())
            });

            match &parsed {
                Some(constraint) => tracing::debug!(
                    table = %table.name,
                    column = %column.name,
                    kind = constraint.kind(),
                    "recognized check constraint"
                ),
                None if column.check_definition.is_some() => tracing::trace!(
                    table = %table.name,
                    column = %column.name,
                    "check constraint not recognized"
                ),
                None => {}
            }

            column.check_constraint = parsed;
        }
    }

    annotated
}

/// Classify a comma-separated list of SQL literals.
///
/// All tokens integers (`-?\d+`) gives a number list (or boolean for exactly
/// `{0, 1}`); all tokens quoted gives a string list with `''` unescaped once.
/// Mixed, empty or otherwise malformed lists are not recognized.
#[must_use]
pub fn parse_value_list(list: &str) -> Option<ParsedConstraint> {
    if list.trim().is_empty() {
        return None;
    }

    let tokens: Vec<&str> = split_list(list).into_iter().map(str::trim).collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return None;
    }

    if tokens.iter().all(|t| INTEGER.is_match(t)) {
        let values = tokens
            .iter()
            .map(|t| t.parse::<i64>().ok())
            .collect::<Option<Vec<_>>>()?;
        return Some(ParsedConstraint::from_numbers(values));
    }

    let values = tokens
        .iter()
        .map(|t| unquote_literal(t))
        .collect::<Option<Vec<_>>>()?;
    Some(ParsedConstraint::String { values })
}

/// Read exactly one single-quoted SQL literal, collapsing `''` to `'`.
///
/// Returns `None` if the token is not a single complete literal.
#[must_use]
pub fn unquote_literal(token: &str) -> Option<String> {
    let inner = token.strip_prefix('\'')?.strip_suffix('\'')?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\'' {
            // a quote inside the literal must be doubled
            if chars.next() != Some('\'') {
                return None;
            }
        }
        value.push(c);
    }
    Some(value)
}

/// Returns `true` if the token is a plain (optionally negative) integer
pub(crate) fn is_integer(token: &str) -> bool {
    INTEGER.is_match(token)
}

// =============================================================================
// Scanning
// =============================================================================

/// Remove a leading `CHECK` keyword and any balanced wrapping parentheses
pub(crate) fn strip_wrapping(definition: &str) -> &str {
    let mut text = definition.trim();
    if let (Some(keyword), Some(rest)) = (text.get(..5), text.get(5..)) {
        // `checked IN (0, 1)` names a column, not the keyword
        let boundary = rest.starts_with(|c: char| c == '(' || c.is_whitespace());
        if keyword.eq_ignore_ascii_case("check") && boundary {
            text = rest.trim_start();
        }
    }
    strip_outer_parens(text)
}

/// Remove parentheses that wrap the entire text, repeatedly
pub(crate) fn strip_outer_parens(text: &str) -> &str {
    let mut text = text.trim();
    while text.starts_with('(') && closing_paren(text, 0) == Some(text.len() - 1) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// Byte index of the `)` matching the `(` at `open`, skipping quoted regions
pub(crate) fn closing_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in text[open..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split at every top-level position where `separator` matches.
///
/// `separator` receives the text before and after the candidate position and returns
/// the separator's byte length. Quoted regions and anything nested in `()` or `[]` are
/// never split.
pub(crate) fn split_top_level<'a, F>(text: &'a str, separator: F) -> Vec<&'a str>
where
    F: Fn(&str, &str) -> Option<usize>,
{
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    let mut skip_to = 0usize;

    for (i, c) in text.char_indices() {
        if i < skip_to {
            continue;
        }
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, _) if depth == 0 => {
                if let Some(len) = separator(&text[..i], &text[i..]) {
                    parts.push(&text[start..i]);
                    start = i + len;
                    skip_to = start;
                }
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split a literal list on top-level commas
pub(crate) fn split_list(text: &str) -> Vec<&str> {
    split_top_level(text, |_, rest| rest.starts_with(',').then_some(1))
}

/// Split on top-level `OR` keywords (case-insensitive, whitespace or paren delimited)
pub(crate) fn split_or(text: &str) -> Vec<&str> {
    split_top_level(text, |before, rest| {
        let keyword = rest.get(..2)?;
        if !keyword.eq_ignore_ascii_case("or") {
            return None;
        }
        let before_ok = before
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace() || c == ')');
        let after_ok = rest[2..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '(');
        (before_ok && after_ok).then_some(2)
    })
}

/// Split on top-level `=`
pub(crate) fn split_equals(text: &str) -> Vec<&str> {
    split_top_level(text, |_, rest| rest.starts_with('=').then_some(1))
}

/// Remove identifier quoting: `"name"`, `` `name` `` or `[name]`
pub(crate) fn unquote_identifier(identifier: &str) -> &str {
    let identifier = identifier.trim();
    for (open, close) in [('"', '"'), ('`', '`'), ('[', ']')] {
        if let Some(inner) = identifier
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    identifier
}
