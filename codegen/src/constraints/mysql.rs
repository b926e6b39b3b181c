//! MySQL CHECK definitions, as stored in `information_schema.CHECK_CONSTRAINTS`
//!
//! `CHECK_CLAUSE` comes back display-escaped, so every quote carries a backslash:
//!
//! ```text
//! (`status` in (_utf8mb4\'active\',_utf8mb4\'inactive\'))
//! (`flag` in (0,1))
//! ```

use std::sync::LazyLock;

use regex::Regex;
use typegen_types::ParsedConstraint;

use super::{parse_value_list, split_list, strip_wrapping};

static IN_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(?:`[^`]+`|[A-Za-z_][A-Za-z0-9_$]*)\s+in\s*\((?P<list>.*)\)$")
        .expect("static regex")
});

static CHARSET_INTRODUCER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_[A-Za-z0-9]+'").expect("static regex"));

pub fn parse(definition: &str) -> Option<ParsedConstraint> {
    let definition = if is_display_escaped(definition) {
        unescape_display(definition)
    } else {
        definition.to_string()
    };
    let normalized = normalize_literals(&definition)?;
    let body = strip_wrapping(&normalized);

    let captures = IN_LIST.captures(body)?;
    let list = captures.name("list")?.as_str();

    let tokens: Vec<&str> = split_list(list)
        .into_iter()
        .map(|token| strip_introducer(token.trim()))
        .collect();
    parse_value_list(&tokens.join(", "))
}

/// `true` when the first quote in the text is itself backslash-escaped
fn is_display_escaped(definition: &str) -> bool {
    definition
        .find('\'')
        .is_some_and(|i| definition[..i].ends_with('\\'))
}

/// Undo one level of display escaping: every `\c` becomes `c`
fn unescape_display(definition: &str) -> String {
    let mut out = String::with_capacity(definition.len());
    let mut chars = definition.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// Rewrite backslash escapes inside string literals into plain SQL form.
///
/// `\'` becomes a doubled quote; any other `\c` becomes the character it
/// stands for. Returns `None` for a literal that ends in a dangling backslash.
fn normalize_literals(definition: &str) -> Option<String> {
    let mut out = String::with_capacity(definition.len());
    let mut chars = definition.chars().peekable();
    let mut in_literal = false;

    while let Some(c) = chars.next() {
        match (in_literal, c) {
            (false, '\'') => {
                in_literal = true;
                out.push(c);
            }
            (false, c) => out.push(c),
            (true, '\\') => match chars.next()? {
                '\'' => out.push_str("''"),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                escaped => out.push(escaped),
            },
            (true, '\'') if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push_str("''");
            }
            (true, '\'') => {
                in_literal = false;
                out.push(c);
            }
            (true, c) => out.push(c),
        }
    }

    Some(out)
}

/// Drop a `_charset` introducer in front of a string literal
fn strip_introducer(token: &str) -> &str {
    match CHARSET_INTRODUCER.find(token) {
        Some(m) => &token[m.end() - 1..],
        None => token,
    }
}
