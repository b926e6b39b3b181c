use typegen_types::Dialect;

use super::{Helper, MapState, TypeMapper, normalize_type_name};
use crate::ast::TypeNode;

/// PostgreSQL, by catalog type name (`udt_name`). Read/write asymmetric types go through
/// named helpers.
#[derive(Clone, Copy, Debug, Default)]
pub struct PostgresMapper;

impl TypeMapper for PostgresMapper {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    fn array_element<'a>(&self, data_type: &'a str) -> Option<&'a str> {
        let data_type = data_type.trim();
        data_type
            .strip_suffix("[]")
            .or_else(|| data_type.strip_prefix('_'))
    }

    fn map_scalar(&self, data_type: &str, state: &mut MapState) -> Option<TypeNode> {
        let ty = match normalize_type_name(data_type).as_str() {
            "bool" | "boolean" => TypeNode::BOOLEAN,
            "int2" | "int4" | "float4" | "float8" | "oid" | "smallint" | "integer" | "int"
            | "real" | "double precision" => TypeNode::NUMBER,
            "int8" | "bigint" => state.helper(Helper::Int8),
            "numeric" | "decimal" | "money" => state.helper(Helper::Numeric),
            "date" | "timestamp" | "timestamptz" | "timestamp with time zone"
            | "timestamp without time zone" => state.helper(Helper::Timestamp),
            "interval" => state.helper(Helper::Interval),
            "json" | "jsonb" => state.helper(Helper::Json),
            "bytea" => TypeNode::reference("Buffer"),
            "point" => state.helper(Helper::Point),
            "circle" => state.helper(Helper::Circle),
            "text" | "varchar" | "character varying" | "bpchar" | "character" | "char"
            | "name" | "uuid" | "time" | "timetz" | "inet" | "cidr" | "macaddr" | "macaddr8"
            | "bit" | "varbit" | "xml" | "tsvector" | "tsquery" | "box" | "line" | "lseg"
            | "path" | "polygon" | "citext" => TypeNode::STRING,
            _ => return None,
        };
        Some(ty)
    }
}
