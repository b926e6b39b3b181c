//! Introspected schema metadata
//!
//! [`DatabaseMetadata`] is produced once per run by an introspector outside this
//! workspace and handed to the code generator fully materialized. Field names
//! serialize in camelCase so snapshots read like the catalog queries that fill them.

use crate::ParsedConstraint;

/// Everything the generator knows about a database
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DatabaseMetadata {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tables: Vec<Table>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enums: Vec<Enum>,
}

impl DatabaseMetadata {
    #[must_use]
    pub fn new(tables: Vec<Table>, enums: Vec<Enum>) -> Self {
        Self { tables, enums }
    }
}

/// A table, view or partition
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Table {
    pub schema: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub columns: Vec<Column>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_view: bool,
    /// Partitions duplicate their parent's shape and are never emitted
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_partition: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub comment: Option<String>,
    /// Raw `CREATE TABLE` text (SQLite only; CHECK constraints live here)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub definition: Option<String>,
}

impl Table {
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a column, keeping source order
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn view(self) -> Self {
        Self {
            is_view: true,
            ..self
        }
    }

    #[must_use]
    pub fn partition(self) -> Self {
        Self {
            is_partition: true,
            ..self
        }
    }

    #[must_use]
    pub fn comment(self, comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..self
        }
    }

    #[must_use]
    pub fn definition(self, sql: impl Into<String>) -> Self {
        Self {
            definition: Some(sql.into()),
            ..self
        }
    }

    /// `schema.name`, the string include/exclude patterns match against
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// A column as seen by the generator
///
/// `data_type` is the resolved base type: domains are already unwrapped, with the
/// domain itself recorded in `domain_name` / `domain_schema`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Column {
    pub name: String,
    pub data_type: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub data_type_schema: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_nullable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_auto_increment: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_default_value: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_array: bool,
    /// Raw CHECK definition text as reported by the catalog
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub check_definition: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub check_constraint: Option<ParsedConstraint>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub domain_name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub domain_schema: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub comment: Option<String>,
}

impl Column {
    /// A non-null column with no default
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn nullable(self) -> Self {
        Self {
            is_nullable: true,
            ..self
        }
    }

    #[must_use]
    pub fn auto_increment(self) -> Self {
        Self {
            is_auto_increment: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_default(self) -> Self {
        Self {
            has_default_value: true,
            ..self
        }
    }

    #[must_use]
    pub fn array(self) -> Self {
        Self {
            is_array: true,
            ..self
        }
    }

    #[must_use]
    pub fn type_schema(self, schema: impl Into<String>) -> Self {
        Self {
            data_type_schema: Some(schema.into()),
            ..self
        }
    }

    #[must_use]
    pub fn check(self, definition: impl Into<String>) -> Self {
        Self {
            check_definition: Some(definition.into()),
            ..self
        }
    }

    #[must_use]
    pub fn constraint(self, constraint: ParsedConstraint) -> Self {
        Self {
            check_constraint: Some(constraint),
            ..self
        }
    }

    #[must_use]
    pub fn domain(self, schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain_schema: Some(schema.into()),
            domain_name: Some(name.into()),
            ..self
        }
    }

    #[must_use]
    pub fn comment(self, comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..self
        }
    }

    /// Auto-increment and default-valued columns may be omitted on insert
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.is_auto_increment || self.has_default_value
    }
}

/// A user-defined enum type; `values` keep declaration order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Enum {
    pub schema: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<String>,
}

impl Enum {
    #[must_use]
    pub fn new<I, S>(schema: impl Into<String>, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema: schema.into(),
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builders() {
        let column = Column::new("id", "int4").auto_increment();
        assert!(column.is_generated());
        assert!(!column.is_nullable);

        let column = Column::new("bio", "text").nullable();
        assert!(!column.is_generated());
        assert!(column.is_nullable);
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(Table::new("auth", "sessions").qualified_name(), "auth.sessions");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "tables": [{
                "schema": "public",
                "name": "users",
                "columns": [
                    { "name": "id", "dataType": "int4", "isAutoIncrement": true },
                    { "name": "status", "dataType": "text", "isNullable": true,
                      "checkDefinition": "CHECK ((status = ANY (ARRAY['a'::text])))" }
                ]
            }],
            "enums": [{ "schema": "public", "name": "mood", "values": ["sad", "ok"] }]
        }"#;

        let metadata: DatabaseMetadata = serde_json::from_str(json).unwrap();
        let users = &metadata.tables[0];
        assert_eq!(users.columns.len(), 2);
        assert!(users.columns[0].is_auto_increment);
        assert!(users.columns[1].is_nullable);
        assert!(users.columns[1].check_definition.is_some());
        assert_eq!(metadata.enums[0].values, vec!["sad", "ok"]);
    }
}
