//! Declaration and property naming

use std::collections::HashMap;

use heck::{ToLowerCamelCase, ToPascalCase};
use typegen_types::Enum;

/// `user_accounts` -> `UserAccounts`
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    name.to_pascal_case()
}

/// `created_at` -> `createdAt`, `a__b` -> `aB`
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Strip exactly one trailing `s`.
///
/// Deliberately naive: `categories` becomes `categorie` and `status` becomes `statu`.
/// Existing output depends on it, so it is not replaced with a dictionary.
#[must_use]
pub fn singularize(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}

/// Declaration name for a table: `blog_posts` -> `BlogPost`
#[must_use]
pub fn table_type_name(table_name: &str) -> String {
    to_pascal_case(singularize(table_name))
}

/// Schema const name for a type name: `NewUser` -> `newUserSchema`
#[must_use]
pub fn schema_const_name(type_name: &str) -> String {
    format!("{}Schema", to_camel_case(type_name))
}

/// Canonical enum names for one run.
///
/// Built once from every enum; the enum's own declaration and every column referring to
/// it look the name up here by `(schema, name)`.
#[derive(Clone, Debug, Default)]
pub struct EnumNames {
    names: HashMap<(String, String), String>,
}

impl EnumNames {
    #[must_use]
    pub fn new(enums: &[Enum], default_schemas: &[String]) -> Self {
        let names = enums
            .iter()
            .map(|e| {
                let name = if default_schemas.iter().any(|s| s == &e.schema) {
                    to_pascal_case(&e.name)
                } else {
                    to_pascal_case(&format!("{}_{}", e.schema, e.name))
                };
                ((e.schema.clone(), e.name.clone()), name)
            })
            .collect();
        Self { names }
    }

    /// The canonical name of the enum `schema.name`, if it exists
    #[must_use]
    pub fn resolve(&self, schema: &str, name: &str) -> Option<&str> {
        self.names
            .get(&(schema.to_string(), name.to_string()))
            .map(String::as_str)
    }
}
