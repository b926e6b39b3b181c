//! Named helper types shared by every column that needs them
//!
//! A helper is declared at most once per output, in the fixed order of [`Helper::ALL`],
//! and only when some column (directly or through another helper) refers to it.

use crate::ast::{Declaration, ImportDecl, InterfaceDecl, Property, TypeAliasDecl, TypeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Helper {
    ColumnType,
    IPostgresInterval,
    ArrayTypeImpl,
    ArrayType,
    Generated,
    Int8,
    Interval,
    Numeric,
    Timestamp,
    Point,
    Circle,
    JsonPrimitive,
    JsonArray,
    JsonObject,
    JsonValue,
    Json,
}

impl Helper {
    /// Every helper, in emission order
    pub const ALL: [Helper; 16] = [
        Helper::ColumnType,
        Helper::IPostgresInterval,
        Helper::ArrayTypeImpl,
        Helper::ArrayType,
        Helper::Generated,
        Helper::Int8,
        Helper::Interval,
        Helper::Numeric,
        Helper::Timestamp,
        Helper::Point,
        Helper::Circle,
        Helper::JsonPrimitive,
        Helper::JsonArray,
        Helper::JsonObject,
        Helper::JsonValue,
        Helper::Json,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Helper::ColumnType => "ColumnType",
            Helper::IPostgresInterval => "IPostgresInterval",
            Helper::ArrayTypeImpl => "ArrayTypeImpl",
            Helper::ArrayType => "ArrayType",
            Helper::Generated => "Generated",
            Helper::Int8 => "Int8",
            Helper::Interval => "Interval",
            Helper::Numeric => "Numeric",
            Helper::Timestamp => "Timestamp",
            Helper::Point => "Point",
            Helper::Circle => "Circle",
            Helper::JsonPrimitive => "JsonPrimitive",
            Helper::JsonArray => "JsonArray",
            Helper::JsonObject => "JsonObject",
            Helper::JsonValue => "JsonValue",
            Helper::Json => "Json",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.name() == name)
    }

    /// Helpers this one refers to by name
    #[must_use]
    pub const fn dependencies(self) -> &'static [Helper] {
        match self {
            Helper::ArrayTypeImpl
            | Helper::Generated
            | Helper::Int8
            | Helper::Numeric
            | Helper::Timestamp => &[Helper::ColumnType],
            Helper::ArrayType => &[Helper::ArrayTypeImpl, Helper::ColumnType],
            Helper::Interval => &[Helper::ColumnType, Helper::IPostgresInterval],
            Helper::JsonArray | Helper::JsonObject | Helper::Json => &[Helper::JsonValue],
            Helper::JsonValue => &[
                Helper::JsonArray,
                Helper::JsonObject,
                Helper::JsonPrimitive,
            ],
            Helper::ColumnType
            | Helper::IPostgresInterval
            | Helper::Point
            | Helper::Circle
            | Helper::JsonPrimitive => &[],
        }
    }

    /// Module a helper is imported from, for helpers that are not declared locally
    #[must_use]
    pub const fn module(self) -> Option<&'static str> {
        match self {
            Helper::ColumnType => Some("kysely"),
            Helper::IPostgresInterval => Some("postgres-interval"),
            _ => None,
        }
    }

    /// Numeric fields of the structured geometric helpers
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Helper::Point => &["x", "y"],
            Helper::Circle => &["x", "y", "radius"],
            _ => &[],
        }
    }

    /// Body of an alias helper
    #[must_use]
    pub fn definition(self) -> Option<TypeNode> {
        let t = || TypeNode::reference("T");
        let infer_column_type = || {
            TypeNode::generic(
                "ColumnType",
                vec![
                    TypeNode::infer("S"),
                    TypeNode::infer("I"),
                    TypeNode::infer("U"),
                ],
            )
        };

        let body = match self {
            Helper::ColumnType | Helper::IPostgresInterval | Helper::Point | Helper::Circle => {
                return None;
            }
            Helper::ArrayTypeImpl => TypeNode::conditional(
                t(),
                infer_column_type(),
                TypeNode::generic(
                    "ColumnType",
                    ["S", "I", "U"]
                        .into_iter()
                        .map(|p| TypeNode::array(TypeNode::reference(p)))
                        .collect(),
                ),
                TypeNode::array(t()),
            ),
            Helper::ArrayType => {
                let implementation = || TypeNode::generic("ArrayTypeImpl", vec![t()]);
                TypeNode::conditional(
                    implementation(),
                    TypeNode::Verbatim("(infer U)[]".into()),
                    TypeNode::array(TypeNode::reference("U")),
                    implementation(),
                )
            }
            Helper::Generated => TypeNode::conditional(
                t(),
                infer_column_type(),
                TypeNode::generic(
                    "ColumnType",
                    vec![
                        TypeNode::reference("S"),
                        TypeNode::Union(vec![TypeNode::reference("I"), TypeNode::UNDEFINED]),
                        TypeNode::reference("U"),
                    ],
                ),
                TypeNode::generic(
                    "ColumnType",
                    vec![
                        t(),
                        TypeNode::Union(vec![t(), TypeNode::UNDEFINED]),
                        t(),
                    ],
                ),
            ),
            Helper::Int8 => int8_shape(),
            Helper::Interval => {
                let input = || {
                    TypeNode::Union(vec![
                        TypeNode::reference("IPostgresInterval"),
                        TypeNode::NUMBER,
                        TypeNode::STRING,
                    ])
                };
                column_type(TypeNode::reference("IPostgresInterval"), input(), input())
            }
            Helper::Numeric => numeric_shape(),
            Helper::Timestamp => timestamp_shape(),
            Helper::JsonPrimitive => TypeNode::Union(vec![
                TypeNode::BOOLEAN,
                TypeNode::NUMBER,
                TypeNode::STRING,
                TypeNode::NULL,
            ]),
            Helper::JsonArray => TypeNode::array(TypeNode::reference("JsonValue")),
            Helper::JsonObject => {
                TypeNode::Verbatim("{ [x: string]: JsonValue | undefined; }".into())
            }
            Helper::JsonValue => TypeNode::Union(vec![
                TypeNode::reference("JsonArray"),
                TypeNode::reference("JsonObject"),
                TypeNode::reference("JsonPrimitive"),
            ]),
            Helper::Json => TypeNode::reference("JsonValue"),
        };
        Some(body)
    }

    /// The declaration introducing this helper into an output file
    #[must_use]
    pub fn declaration(self, type_only_imports: bool) -> Declaration {
        if let Some(module) = self.module() {
            return Declaration::Import(ImportDecl {
                names: vec![self.name().to_string()],
                module: module.to_string(),
                type_only: type_only_imports,
            });
        }

        match self.definition() {
            Some(body) => Declaration::TypeAlias(TypeAliasDecl {
                name: self.name().to_string(),
                params: self.params().iter().map(ToString::to_string).collect(),
                body,
                doc: None,
            }),
            None => Declaration::Interface(InterfaceDecl {
                name: self.name().to_string(),
                properties: self
                    .fields()
                    .iter()
                    .map(|field| Property::new(*field, TypeNode::NUMBER))
                    .collect(),
                doc: None,
            }),
        }
    }

    const fn params(self) -> &'static [&'static str] {
        match self {
            Helper::ArrayTypeImpl | Helper::ArrayType | Helper::Generated => &["T"],
            _ => &[],
        }
    }
}

/// `ColumnType<S, I, U>`
#[must_use]
pub fn column_type(select: TypeNode, insert: TypeNode, update: TypeNode) -> TypeNode {
    TypeNode::generic("ColumnType", vec![select, insert, update])
}

/// 64-bit integers: read as text, written as any integer-ish value
#[must_use]
pub fn int8_shape() -> TypeNode {
    let input = || TypeNode::Union(vec![TypeNode::BIGINT, TypeNode::NUMBER, TypeNode::STRING]);
    column_type(TypeNode::STRING, input(), input())
}

/// Arbitrary-precision decimals
#[must_use]
pub fn numeric_shape() -> TypeNode {
    let input = || TypeNode::Union(vec![TypeNode::NUMBER, TypeNode::STRING]);
    column_type(TypeNode::STRING, input(), input())
}

/// Temporal values: read as `Date`, written as `Date` or text
#[must_use]
pub fn timestamp_shape() -> TypeNode {
    let input = || TypeNode::Union(vec![TypeNode::reference("Date"), TypeNode::STRING]);
    column_type(TypeNode::reference("Date"), input(), input())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::serialize_declaration;

    #[test]
    fn all_is_in_declaration_order() {
        assert!(Helper::ALL.windows(2).all(|w| w[0] < w[1]));
        for helper in Helper::ALL {
            assert_eq!(Helper::from_name(helper.name()), Some(helper));
        }
        assert_eq!(Helper::from_name("Date"), None);
    }

    #[test]
    fn dependencies_are_known_helpers_or_forward_json() {
        for helper in Helper::ALL {
            for dependency in helper.dependencies() {
                let backward = dependency < &helper;
                let json = matches!(
                    helper,
                    Helper::JsonArray | Helper::JsonObject | Helper::JsonValue
                );
                assert!(backward || json, "{helper:?} -> {dependency:?}");
            }
        }
    }

    #[test]
    fn generated_declaration_text() {
        assert_eq!(
            serialize_declaration(&Helper::Generated.declaration(true)),
            "export type Generated<T> = T extends ColumnType<infer S, infer I, infer U>\n  ? ColumnType<S, I | undefined, U>\n  : ColumnType<T, T | undefined, T>;"
        );
    }

    #[test]
    fn array_type_declaration_text() {
        assert_eq!(
            serialize_declaration(&Helper::ArrayType.declaration(true)),
            "export type ArrayType<T> = ArrayTypeImpl<T> extends (infer U)[]\n  ? U[]\n  : ArrayTypeImpl<T>;"
        );
        assert_eq!(
            serialize_declaration(&Helper::ArrayTypeImpl.declaration(true)),
            "export type ArrayTypeImpl<T> = T extends ColumnType<infer S, infer I, infer U>\n  ? ColumnType<S[], I[], U[]>\n  : T[];"
        );
    }

    #[test]
    fn scalar_and_json_declaration_text() {
        assert_eq!(
            serialize_declaration(&Helper::Int8.declaration(true)),
            "export type Int8 = ColumnType<string, bigint | number | string, bigint | number | string>;"
        );
        assert_eq!(
            serialize_declaration(&Helper::JsonObject.declaration(true)),
            "export type JsonObject = { [x: string]: JsonValue | undefined; };"
        );
        assert_eq!(
            serialize_declaration(&Helper::Circle.declaration(true)),
            "export interface Circle {\n  x: number;\n  y: number;\n  radius: number;\n}"
        );
    }

    #[test]
    fn imports_follow_type_only_toggle() {
        assert_eq!(
            serialize_declaration(&Helper::ColumnType.declaration(true)),
            "import type { ColumnType } from 'kysely';"
        );
        assert_eq!(
            serialize_declaration(&Helper::IPostgresInterval.declaration(false)),
            "import { IPostgresInterval } from 'postgres-interval';"
        );
    }
}
