use typegen_types::Dialect;

use super::helpers::{int8_shape, timestamp_shape};
use super::{Helper, MapState, TypeMapper, normalize_type_name};
use crate::ast::TypeNode;

/// SQL Server, by `sys.types` name
#[derive(Clone, Copy, Debug, Default)]
pub struct MssqlMapper;

impl TypeMapper for MssqlMapper {
    fn dialect(&self) -> Dialect {
        Dialect::MSSQL
    }

    fn map_scalar(&self, data_type: &str, state: &mut MapState) -> Option<TypeNode> {
        let ty = match normalize_type_name(data_type).as_str() {
            "tinyint" | "smallint" | "int" | "float" | "real" | "money" | "smallmoney"
            | "decimal" | "numeric" => TypeNode::NUMBER,
            "bigint" => {
                state.use_helper(Helper::ColumnType);
                int8_shape()
            }
            "bit" => TypeNode::BOOLEAN,
            "date" | "datetime" | "datetime2" | "datetimeoffset" | "smalldatetime" | "time" => {
                state.use_helper(Helper::ColumnType);
                timestamp_shape()
            }
            "binary" | "varbinary" | "image" => TypeNode::reference("Buffer"),
            "char" | "nchar" | "varchar" | "nvarchar" | "text" | "ntext"
            | "uniqueidentifier" | "xml" => TypeNode::STRING,
            "sql_variant" => TypeNode::UNKNOWN,
            _ => return None,
        };
        Some(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::serialize_type;
    use crate::typemap::MapOptions;

    fn map(data_type: &str) -> (String, MapState) {
        let mut state = MapState::new();
        let ty = MssqlMapper.map_type(data_type, MapOptions::default(), &mut state);
        (serialize_type(&ty), state)
    }

    #[test]
    fn test_type_table() {
        assert_eq!(map("bit").0, "boolean");
        assert_eq!(map("nvarchar(max)").0, "string");
        assert_eq!(map("uniqueidentifier").0, "string");
        assert_eq!(map("varbinary").0, "Buffer");
        assert_eq!(
            map("datetime2").0,
            "ColumnType<Date, Date | string, Date | string>"
        );
        assert_eq!(
            map("bigint").0,
            "ColumnType<string, bigint | number | string, bigint | number | string>"
        );
    }

    #[test]
    fn test_variant_and_unknown() {
        let (text, state) = map("sql_variant");
        assert_eq!(text, "unknown");
        assert!(state.unknown_types().is_empty());

        let (text, state) = map("hierarchyid");
        assert_eq!(text, "unknown");
        assert_eq!(state.unknown_types(), ["hierarchyid"]);
    }
}
