//! Canonical CHECK-constraint representation
//!
//! Four incompatible constraint grammars reduce to this one shape. A column holds at
//! most one; absence means "no recognized constraint", never an error.

/// A CHECK constraint recognized as a closed set of literal values
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum ParsedConstraint {
    /// `col IN ('a', 'b')` - values unescaped, in source order
    String { values: Vec<String> },
    /// `col IN (1, 2, 3)` - integers in source order
    Number { values: Vec<i64> },
    /// `col IN (0, 1)` in either order
    Boolean,
}

impl ParsedConstraint {
    /// Classify a list of integer literals.
    ///
    /// The list is boolean if and only if, ignoring order, it is exactly `{0, 1}`.
    ///
    /// ```
    /// use typegen_types::ParsedConstraint;
    ///
    /// assert_eq!(ParsedConstraint::from_numbers(vec![1, 0]), ParsedConstraint::Boolean);
    /// assert_eq!(
    ///     ParsedConstraint::from_numbers(vec![0, 2]),
    ///     ParsedConstraint::Number { values: vec![0, 2] }
    /// );
    /// ```
    #[must_use]
    pub fn from_numbers(values: Vec<i64>) -> Self {
        let mut set = values.clone();
        set.sort_unstable();
        set.dedup();

        if set == [0, 1] {
            ParsedConstraint::Boolean
        } else {
            ParsedConstraint::Number { values }
        }
    }

    /// Short name of the variant, matching the serialized `kind` tag
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ParsedConstraint::String { .. } => "string",
            ParsedConstraint::Number { .. } => "number",
            ParsedConstraint::Boolean => "boolean",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_one_is_boolean_in_any_order() {
        assert_eq!(ParsedConstraint::from_numbers(vec![0, 1]), ParsedConstraint::Boolean);
        assert_eq!(ParsedConstraint::from_numbers(vec![1, 0]), ParsedConstraint::Boolean);
    }

    #[test]
    fn other_numeric_sets_stay_numeric() {
        for values in [vec![0, 1, 2], vec![0, 2], vec![0], vec![1], vec![-1, 0, 1]] {
            assert_eq!(
                ParsedConstraint::from_numbers(values.clone()),
                ParsedConstraint::Number { values }
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&ParsedConstraint::String {
            values: vec!["a".into()],
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"string","values":["a"]}"#);

        let parsed: ParsedConstraint = serde_json::from_str(r#"{"kind":"boolean"}"#).unwrap();
        assert_eq!(parsed, ParsedConstraint::Boolean);
    }
}
