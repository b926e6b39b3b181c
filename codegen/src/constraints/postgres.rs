//! PostgreSQL CHECK definitions, as rendered by `pg_get_constraintdef`
//!
//! ```text
//! CHECK ((status = ANY (ARRAY['a'::text, 'b'::text])))
//! CHECK (((kind)::text = ANY ((ARRAY['x'::character varying, 'y'::character varying])::text[])))
//! CHECK (((status = 'a'::text) OR (status = 'b'::text)))
//! CHECK ((VALUE = ANY (ARRAY[1, 2, 3])))
//! ```

use std::sync::LazyLock;

use regex::Regex;
use typegen_types::ParsedConstraint;

use super::{
    is_integer, parse_value_list, split_equals, split_list, split_or, split_top_level,
    strip_outer_parens, strip_wrapping, unquote_identifier, unquote_literal,
};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"(?:[^"]|"")+"|[A-Za-z_][A-Za-z0-9_$]*)$"#).expect("static regex")
});

/// Casts under which a quoted literal denotes an integer
const INTEGER_CASTS: &[&str] = &[
    "int", "int2", "int4", "int8", "integer", "smallint", "bigint", "numeric",
];

pub fn parse(definition: &str) -> Option<ParsedConstraint> {
    let body = strip_wrapping(definition);
    parse_any_array(body).or_else(|| parse_or_chain(body))
}

/// `col = ANY (ARRAY[...])`, with optional casts on either side
fn parse_any_array(body: &str) -> Option<ParsedConstraint> {
    let [lhs, rhs] = split_equals(body)[..] else {
        return None;
    };
    column_name(lhs)?;

    let rhs = rhs.trim();
    let keyword = rhs.get(..3)?;
    if !keyword.eq_ignore_ascii_case("any") {
        return None;
    }

    let (array, _) = split_cast(strip_outer_parens(&rhs[3..]));
    let array = strip_outer_parens(array);
    let keyword = array.get(..6)?;
    if !keyword.eq_ignore_ascii_case("array[") {
        return None;
    }
    let elements = array[6..].strip_suffix(']')?;

    let tokens: Vec<String> = split_list(elements)
        .into_iter()
        .map(clean_token)
        .collect();
    parse_value_list(&tokens.join(", "))
}

/// `(col = 'a') OR (col = 'b') ...` over one column, at least two arms
fn parse_or_chain(body: &str) -> Option<ParsedConstraint> {
    let arms = split_or(body);
    if arms.len() < 2 {
        return None;
    }

    let mut column: Option<&str> = None;
    let mut tokens = Vec::with_capacity(arms.len());
    for arm in arms {
        let [lhs, rhs] = split_equals(strip_outer_parens(arm))[..] else {
            return None;
        };
        let name = column_name(lhs)?;
        if column.is_some_and(|c| c != name) {
            return None;
        }
        column = Some(name);
        tokens.push(clean_token(rhs));
    }

    parse_value_list(&tokens.join(", "))
}

/// The column named on the left of a comparison, with casts and parens removed
fn column_name(lhs: &str) -> Option<&str> {
    let (expr, _) = split_cast(strip_outer_parens(lhs));
    let expr = strip_outer_parens(expr);
    IDENTIFIER.is_match(expr).then(|| unquote_identifier(expr))
}

/// Split `expr::type` at the first top-level cast
fn split_cast(text: &str) -> (&str, Option<&str>) {
    let parts = split_top_level(text, |_, rest| rest.starts_with("::").then_some(2));
    match parts[..] {
        [expr] => (expr.trim(), None),
        [expr, ..] => (expr.trim(), Some(text[expr.len() + 2..].trim())),
        [] => (text.trim(), None),
    }
}

/// Reduce one literal to its bare SQL text: casts dropped, and a quoted integer cast to
/// an integer type rendered as the integer itself.
fn clean_token(token: &str) -> String {
    let (literal, cast) = split_cast(strip_outer_parens(token));
    let literal = strip_outer_parens(literal);

    if let Some(cast) = cast {
        let cast = cast.trim_end_matches("[]").to_ascii_lowercase();
        if INTEGER_CASTS.contains(&cast.as_str()) {
            if let Some(value) = unquote_literal(literal).filter(|v| is_integer(v)) {
                return value;
            }
        }
    }
    literal.to_string()
}
