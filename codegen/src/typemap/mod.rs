//! Raw column type names to canonical [`TypeNode`]s
//!
//! Each dialect provides a [`TypeMapper`] with a closed table of scalar types. Array
//! wrapping, nullability and unknown-type fallback are shared by every dialect through
//! the trait's provided [`TypeMapper::map_type`].

pub mod helpers;
mod mssql;
mod mysql;
mod postgres;
mod sqlite;

use std::collections::BTreeSet;

use typegen_types::Dialect;

use crate::ast::TypeNode;
pub use helpers::Helper;
pub use mssql::MssqlMapper;
pub use mysql::MySqlMapper;
pub use postgres::PostgresMapper;
pub use sqlite::SqliteMapper;

/// Column-level flags that shape a mapped type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapOptions {
    pub is_nullable: bool,
    pub is_array: bool,
}

/// Per-run accumulator threaded through every mapping call.
///
/// Records the helpers referenced (with their dependencies) and every raw type name
/// that no table recognized, in first-seen order without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapState {
    used_helpers: BTreeSet<Helper>,
    unknown_types: Vec<String>,
}

impl MapState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a helper, and everything it refers to, as used
    pub fn use_helper(&mut self, helper: Helper) {
        if self.used_helpers.insert(helper) {
            for dependency in helper.dependencies() {
                self.use_helper(*dependency);
            }
        }
    }

    /// A reference to a helper, marking it used
    pub fn helper(&mut self, helper: Helper) -> TypeNode {
        self.use_helper(helper);
        TypeNode::reference(helper.name())
    }

    pub fn record_unknown(&mut self, raw_type_name: &str) {
        if !self.unknown_types.iter().any(|t| t == raw_type_name) {
            self.unknown_types.push(raw_type_name.to_string());
        }
    }

    #[must_use]
    pub fn is_used(&self, helper: Helper) -> bool {
        self.used_helpers.contains(&helper)
    }

    /// Used helpers, in emission order
    pub fn used_helpers(&self) -> impl Iterator<Item = Helper> + '_ {
        self.used_helpers.iter().copied()
    }

    #[must_use]
    pub fn unknown_types(&self) -> &[String] {
        &self.unknown_types
    }
}

/// Dialect-specific scalar type table
pub trait TypeMapper: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Map a single, non-array type name. `None` means "not in the table".
    fn map_scalar(&self, data_type: &str, state: &mut MapState) -> Option<TypeNode>;

    /// The element type name, if `data_type` itself spells an array (`int4[]`)
    fn array_element<'a>(&self, data_type: &'a str) -> Option<&'a str> {
        data_type.trim().strip_suffix("[]")
    }

    /// Map a column type.
    ///
    /// Arrays map their element with array-ness cleared and are wrapped afterwards;
    /// nullability is applied last as a single `| null`. Unrecognized names become
    /// `unknown` and are recorded in `state`.
    fn map_type(&self, data_type: &str, options: MapOptions, state: &mut MapState) -> TypeNode {
        let element = self
            .array_element(data_type)
            .or_else(|| options.is_array.then_some(data_type));

        let mapped = match element {
            Some(element) => {
                let element = self.map_type(element, MapOptions::default(), state);
                wrap_array(element, state)
            }
            None => self.map_scalar(data_type, state).unwrap_or_else(|| {
                tracing::trace!(dialect = %self.dialect(), data_type, "unknown column type");
                state.record_unknown(data_type);
                TypeNode::UNKNOWN
            }),
        };

        if options.is_nullable {
            mapped.or_null()
        } else {
            mapped
        }
    }
}

/// `T[]` for simple primitives, `ArrayType<T>` for everything else
pub fn wrap_array(element: TypeNode, state: &mut MapState) -> TypeNode {
    if element.is_simple_primitive() {
        TypeNode::array(element)
    } else {
        state.use_helper(Helper::ArrayType);
        TypeNode::generic(Helper::ArrayType.name(), vec![element])
    }
}

/// The mapper for a dialect
#[must_use]
pub fn mapper_for(dialect: Dialect) -> &'static dyn TypeMapper {
    match dialect {
        Dialect::PostgreSQL => &PostgresMapper,
        Dialect::MySQL => &MySqlMapper,
        Dialect::SQLite => &SqliteMapper,
        Dialect::MSSQL => &MssqlMapper,
    }
}

/// Lower-case a type name and drop any `(length, scale)` parameters
pub(crate) fn normalize_type_name(data_type: &str) -> String {
    let base = match data_type.find('(') {
        Some(open) => {
            let close = data_type[open..].find(')').map_or(data_type.len(), |i| open + i + 1);
            format!("{}{}", &data_type[..open], &data_type[close..])
        }
        None => data_type.to_string(),
    };
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}
