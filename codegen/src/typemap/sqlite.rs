use typegen_types::Dialect;

use super::{MapState, TypeMapper, normalize_type_name};
use crate::ast::TypeNode;

/// SQLite, by declared column type
#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteMapper;

impl TypeMapper for SqliteMapper {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn map_scalar(&self, data_type: &str, _state: &mut MapState) -> Option<TypeNode> {
        let ty = match normalize_type_name(data_type).as_str() {
            "integer" | "int" | "bigint" | "smallint" | "tinyint" | "mediumint" | "real"
            | "double" | "float" | "numeric" | "decimal" | "boolean" => TypeNode::NUMBER,
            "text" | "varchar" | "char" | "clob" | "nchar" | "nvarchar" | "date" | "datetime"
            | "json" => TypeNode::STRING,
            "blob" => TypeNode::reference("Buffer"),
            // typeless columns take any value
            "any" | "" => TypeNode::UNKNOWN,
            _ => return None,
        };
        Some(ty)
    }
}
