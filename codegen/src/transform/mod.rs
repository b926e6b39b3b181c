//! Metadata to [`Program`]
//!
//! A shared front end resolves every surviving column once: property name, mapped
//! type, and whether a CHECK constraint, an enum, an override or the scalar type table
//! decides its type. Both builders consume that resolution and differ only in the shape
//! of what they emit.

mod interfaces;
mod zod;

use std::collections::{BTreeMap, BTreeSet};

use typegen_types::{Column, DatabaseMetadata, Enum, ParsedConstraint, Table};

use crate::ast::{Program, TypeNode};
use crate::error::{CodegenError, Result};
use crate::filter::TableFilter;
use crate::naming::{EnumNames, table_type_name, to_camel_case};
use crate::options::{Backend, GenerateOptions};
use crate::typemap::{MapOptions, MapState, mapper_for};

use interfaces::InterfaceBuilder;
use zod::ZodBuilder;

/// A raw column type no dialect table recognized
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnknownType {
    pub raw_type_name: String,
}

/// Result of one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    pub program: Program,
    /// Deduplicated by raw type name, in first-seen order
    pub warnings: Vec<UnknownType>,
}

/// An output backend over the shared resolution
pub(crate) trait ProgramBuilder {
    fn build(&self, schema: &ResolvedSchema<'_>, options: &GenerateOptions) -> Program;
}

/// Build a program from already-annotated metadata
pub fn build(metadata: &DatabaseMetadata, options: &GenerateOptions) -> Result<Generation> {
    let schema = resolve(metadata, options)?;

    let program = match options.backend {
        Backend::Interfaces => InterfaceBuilder.build(&schema, options),
        Backend::Zod => ZodBuilder.build(&schema, options),
    };

    let warnings = schema
        .state
        .unknown_types()
        .iter()
        .map(|raw_type_name| UnknownType {
            raw_type_name: raw_type_name.clone(),
        })
        .collect();

    tracing::debug!(
        backend = %options.backend,
        declarations = program.declarations.len(),
        "built program"
    );
    Ok(Generation { program, warnings })
}

// =============================================================================
// Resolution
// =============================================================================

/// What decided a column's type
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ColumnKind {
    /// A recognized CHECK constraint; wins over everything else
    Check(ParsedConstraint),
    /// A user override, printed verbatim
    Override(String),
    /// A reference to a declared enum, by canonical name
    Enum(String),
    /// The dialect's type table
    Scalar,
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedColumn<'a> {
    pub column: &'a Column,
    pub property: String,
    /// Read type, including the array wrapper and the `| null` arm
    pub ty: TypeNode,
    pub kind: ColumnKind,
    pub is_array: bool,
    pub nullable: bool,
    pub generated: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedTable<'a> {
    pub table: &'a Table,
    pub type_name: String,
    /// Key on the root `DB` interface
    pub property: String,
    pub columns: Vec<ResolvedColumn<'a>>,
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedSchema<'a> {
    /// Every enum with its canonical name, in input order
    pub enums: Vec<(String, &'a Enum)>,
    pub tables: Vec<ResolvedTable<'a>>,
    pub state: MapState,
}

pub(crate) fn resolve<'a>(
    metadata: &'a DatabaseMetadata,
    options: &GenerateOptions,
) -> Result<ResolvedSchema<'a>> {
    let default_schemas = options.resolved_default_schemas();
    let enum_names = EnumNames::new(&metadata.enums, &default_schemas);
    let mut overrides = Overrides::new(&options.overrides)?;
    let filter = TableFilter::new(&options.include_patterns, &options.exclude_patterns)?;
    let mapper = mapper_for(options.dialect);
    let mut state = MapState::new();

    let enums = metadata
        .enums
        .iter()
        .filter_map(|e| Some((enum_names.resolve(&e.schema, &e.name)?.to_string(), e)))
        .collect();

    let mut tables = Vec::new();
    for table in filter.apply(&metadata.tables) {
        let columns = table
            .columns
            .iter()
            .map(|column| {
                let (base_type, is_array) = match mapper.array_element(&column.data_type) {
                    Some(element) => (element, true),
                    None => (column.data_type.as_str(), column.is_array),
                };
                let map_options = MapOptions {
                    is_nullable: column.is_nullable,
                    is_array,
                };

                let type_schema = column.data_type_schema.as_deref().unwrap_or(&table.schema);
                let enum_name = enum_names.resolve(type_schema, base_type);

                let (kind, ty) = if let Some(constraint) = &column.check_constraint {
                    let ty = constraint_type(constraint);
                    (ColumnKind::Check(constraint.clone()), ty)
                } else if let Some(ty) = overrides.find(table, &column.name) {
                    (ColumnKind::Override(ty.to_string()), TypeNode::Verbatim(ty.to_string()))
                } else if let Some(name) = enum_name {
                    (ColumnKind::Enum(name.to_string()), TypeNode::reference(name))
                } else {
                    let ty = mapper.map_type(&column.data_type, map_options, &mut state);
                    (ColumnKind::Scalar, ty)
                };

                // the mapper wraps its own arrays and nulls
                let ty = if kind == ColumnKind::Scalar {
                    ty
                } else {
                    // an override already spells out the whole column type
                    let wrap_array = is_array && !matches!(kind, ColumnKind::Override(_));
                    let ty = if wrap_array { TypeNode::array(ty) } else { ty };
                    if column.is_nullable { ty.or_null() } else { ty }
                };

                tracing::trace!(
                    table = %table.name,
                    column = %column.name,
                    kind = ?kind,
                    "resolved column"
                );

                ResolvedColumn {
                    column,
                    property: property_name(&column.name, options.camel_case),
                    ty,
                    kind,
                    is_array,
                    nullable: column.is_nullable,
                    generated: column.is_generated(),
                }
            })
            .collect();

        let property = if default_schemas.iter().any(|s| s == &table.schema) {
            property_name(&table.name, options.camel_case)
        } else {
            format!(
                "{}.{}",
                property_name(&table.schema, options.camel_case),
                property_name(&table.name, options.camel_case)
            )
        };

        tables.push(ResolvedTable {
            table,
            type_name: table_type_name(&table.name),
            property,
            columns,
        });
    }

    overrides.warn_unused();
    Ok(ResolvedSchema {
        enums,
        tables,
        state,
    })
}

fn property_name(name: &str, camel_case: bool) -> String {
    if camel_case {
        to_camel_case(name)
    } else {
        name.to_string()
    }
}

/// Literal union for a constraint; booleans keep their stored `0 | 1` form
fn constraint_type(constraint: &ParsedConstraint) -> TypeNode {
    let members: Vec<TypeNode> = match constraint {
        ParsedConstraint::String { values } => {
            values.iter().map(TypeNode::string_literal).collect()
        }
        ParsedConstraint::Number { values } => {
            values.iter().copied().map(TypeNode::number_literal).collect()
        }
        ParsedConstraint::Boolean => vec![TypeNode::number_literal(0), TypeNode::number_literal(1)],
    };

    match <[TypeNode; 1]>::try_from(members) {
        Ok([single]) => single,
        Err(members) => TypeNode::Union(members),
    }
}

type OverrideKey<'a> = (Option<&'a str>, &'a str, &'a str);

/// Column type overrides keyed by `table.column` or `schema.table.column`
struct Overrides<'a> {
    entries: BTreeMap<OverrideKey<'a>, &'a str>,
    used: BTreeSet<OverrideKey<'a>>,
}

impl<'a> Overrides<'a> {
    fn new(raw: &'a BTreeMap<String, String>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, ty) in raw {
            let segments: Vec<&str> = key.split('.').collect();
            let parsed = match segments[..] {
                [table, column] if !table.is_empty() && !column.is_empty() => {
                    (None, table, column)
                }
                [schema, table, column]
                    if !schema.is_empty() && !table.is_empty() && !column.is_empty() =>
                {
                    (Some(schema), table, column)
                }
                _ => return Err(CodegenError::InvalidOverride(key.clone())),
            };
            entries.insert(parsed, ty.as_str());
        }
        Ok(Self {
            entries,
            used: BTreeSet::new(),
        })
    }

    /// The qualified key wins over the bare one
    fn find(&mut self, table: &Table, column: &str) -> Option<&'a str> {
        let qualified = (Some(table.schema.as_str()), table.name.as_str(), column);
        let bare = (None, table.name.as_str(), column);

        let (found, ty) = [qualified, bare]
            .into_iter()
            .find_map(|key| self.entries.iter().find(|(k, _)| **k == key))?;
        self.used.insert(*found);
        Some(*ty)
    }

    fn warn_unused(&self) {
        for (schema, table, column) in self.entries.keys().filter(|key| !self.used.contains(*key)) {
            tracing::warn!(?schema, table, column, "override matched no column");
        }
    }
}
