use typegen_types::Dialect;

use super::helpers::{int8_shape, numeric_shape, timestamp_shape};
use super::{Helper, MapState, TypeMapper, normalize_type_name};
use crate::ast::TypeNode;

/// MySQL / MariaDB, by `information_schema.COLUMNS.DATA_TYPE`. Asymmetric types are
/// written inline as `ColumnType<...>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MySqlMapper;

impl TypeMapper for MySqlMapper {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn map_scalar(&self, data_type: &str, state: &mut MapState) -> Option<TypeNode> {
        let name = normalize_type_name(data_type);
        let name = name
            .strip_suffix(" unsigned")
            .or_else(|| name.strip_suffix(" zerofill"))
            .unwrap_or(&name);

        let ty = match name {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "year" | "float"
            | "double" | "real" => TypeNode::NUMBER,
            "bigint" => {
                state.use_helper(Helper::ColumnType);
                int8_shape()
            }
            "decimal" | "numeric" => {
                state.use_helper(Helper::ColumnType);
                numeric_shape()
            }
            "date" | "datetime" | "timestamp" => {
                state.use_helper(Helper::ColumnType);
                timestamp_shape()
            }
            "bit" | "binary" | "varbinary" | "blob" | "tinyblob" | "mediumblob"
            | "longblob" => TypeNode::reference("Buffer"),
            "json" => state.helper(Helper::Json),
            "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" | "time"
            | "enum" | "set" => TypeNode::STRING,
            "bool" | "boolean" => TypeNode::BOOLEAN,
            _ => return None,
        };
        Some(ty)
    }
}
