//! SQL Server CHECK definitions, as stored in `sys.check_constraints.definition`
//!
//! ```text
//! ([status]='inactive' OR [status]='active')
//! ([flag]=(1) OR [flag]=(0))
//! ([size] IN (N'S', N'M'))
//! ```

use std::sync::LazyLock;

use regex::Regex;
use typegen_types::ParsedConstraint;

use super::{parse_value_list, split_list, split_or, strip_outer_parens, strip_wrapping};

static IN_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\[[^\]]+\]\s+in\s*\((?P<list>.*)\)$").expect("static regex")
});

static EQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\[(?P<column>[^\]]+)\]\s*=\s*(?P<value>.+)$").expect("static regex")
});

pub fn parse(definition: &str) -> Option<ParsedConstraint> {
    let body = strip_wrapping(definition);
    parse_in_list(body).or_else(|| parse_or_chain(body))
}

fn parse_in_list(body: &str) -> Option<ParsedConstraint> {
    let captures = IN_LIST.captures(body)?;
    let tokens: Vec<&str> = split_list(captures.name("list")?.as_str())
        .into_iter()
        .map(clean_token)
        .collect();
    parse_value_list(&tokens.join(", "))
}

fn parse_or_chain(body: &str) -> Option<ParsedConstraint> {
    let arms = split_or(body);
    if arms.len() < 2 {
        return None;
    }

    let mut column: Option<&str> = None;
    let mut tokens = Vec::with_capacity(arms.len());
    for arm in arms {
        let captures = EQUALITY.captures(strip_outer_parens(arm))?;
        let name = captures.name("column")?.as_str();
        if column.is_some_and(|c| c != name) {
            return None;
        }
        column = Some(name);
        tokens.push(clean_token(captures.name("value")?.as_str()));
    }

    parse_value_list(&tokens.join(", "))
}

/// `(1)` -> `1`, `N'x'` -> `'x'`
fn clean_token(token: &str) -> &str {
    let token = strip_outer_parens(token);
    match token.strip_prefix(['N', 'n']) {
        Some(rest) if rest.starts_with('\'') => rest,
        _ => token,
    }
}
