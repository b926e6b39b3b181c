//! Program serialization
//!
//! A pure `Program -> String` pass. Declarations are separated by one blank line and
//! the output ends with exactly one newline. Property order is emitted exactly as the
//! builder produced it.

use crate::ast::{
    Declaration, ImportDecl, InferDecl, InterfaceDecl, Literal, Program, Property, SchemaDecl,
    SchemaNode, TypeAliasDecl, TypeNode,
};
use crate::words::is_reserved;

const INDENT: &str = "  ";

/// Serialize a program to source text
#[must_use]
pub fn serialize(program: &Program) -> String {
    let mut out = program
        .declarations
        .iter()
        .map(serialize_declaration)
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

/// Serialize a single declaration (no trailing newline)
#[must_use]
pub fn serialize_declaration(declaration: &Declaration) -> String {
    match declaration {
        Declaration::Import(import) => serialize_import(import),
        Declaration::TypeAlias(alias) => serialize_type_alias(alias),
        Declaration::Interface(interface) => serialize_interface(interface),
        Declaration::Schema(schema) => serialize_schema_decl(schema),
        Declaration::Infer(infer) => serialize_infer(infer),
    }
}

/// Escape a string literal body: backslash, quote, newline, carriage return, tab.
///
/// Backslash must go first, otherwise the backslashes introduced for quotes would be
/// escaped a second time.
#[must_use]
pub fn escape_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// `'value'` with escaping applied
#[must_use]
pub fn quote_string(value: &str) -> String {
    format!("'{}'", escape_string(value))
}

/// Returns `true` if `name` cannot be written as a bare property key
#[must_use]
pub fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || is_reserved(name)
        || name.starts_with(|c: char| c.is_ascii_digit())
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A property key, quoted when required
#[must_use]
pub fn property_key(name: &str) -> String {
    if needs_quotes(name) {
        quote_string(name)
    } else {
        name.to_string()
    }
}

// =============================================================================
// Type expressions
// =============================================================================

/// Where a type expression sits, for parenthesization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Position {
    Free,
    UnionMember,
    IntersectionMember,
    ArrayElement,
}

fn needs_parens(node: &TypeNode, position: Position) -> bool {
    match node {
        TypeNode::Union(_) => matches!(
            position,
            Position::IntersectionMember | Position::ArrayElement
        ),
        TypeNode::Intersection(_) => {
            matches!(position, Position::UnionMember | Position::ArrayElement)
        }
        _ => false,
    }
}

/// Serialize a type expression on a single line
#[must_use]
pub fn serialize_type(node: &TypeNode) -> String {
    serialize_type_at(node, Position::Free)
}

fn serialize_type_at(node: &TypeNode, position: Position) -> String {
    let text = match node {
        TypeNode::Primitive(p) => p.as_str().to_string(),
        TypeNode::Literal(literal) => serialize_literal(literal),
        TypeNode::Union(members) => join_members(members, " | ", Position::UnionMember),
        TypeNode::Intersection(members) => {
            join_members(members, " & ", Position::IntersectionMember)
        }
        TypeNode::Array(element) => {
            format!("{}[]", serialize_type_at(element, Position::ArrayElement))
        }
        TypeNode::Generic { name, args } => {
            let args: Vec<String> = args.iter().map(serialize_type).collect();
            format!("{name}<{}>", args.join(", "))
        }
        TypeNode::Reference(name) => name.clone(),
        TypeNode::Tuple(items) => {
            let items: Vec<String> = items.iter().map(serialize_type).collect();
            format!("[{}]", items.join(", "))
        }
        TypeNode::Conditional {
            check,
            extends,
            true_type,
            false_type,
        } => format!(
            "{} extends {} ? {} : {}",
            serialize_type(check),
            serialize_type(extends),
            serialize_type(true_type),
            serialize_type(false_type)
        ),
        TypeNode::Infer(name) => format!("infer {name}"),
        TypeNode::KeyOf(inner) => format!("keyof {}", serialize_type(inner)),
        TypeNode::IndexAccess { object, index } => {
            format!("{}[{}]", serialize_type(object), serialize_type(index))
        }
        TypeNode::Verbatim(text) => text.clone(),
    };

    if needs_parens(node, position) {
        format!("({text})")
    } else {
        text
    }
}

fn join_members(members: &[TypeNode], separator: &str, position: Position) -> String {
    if members.is_empty() {
        return "never".to_string();
    }
    members
        .iter()
        .map(|m| serialize_type_at(m, position))
        .collect::<Vec<_>>()
        .join(separator)
}

fn serialize_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => quote_string(s),
        Literal::Number(n) => n.to_string(),
        Literal::Boolean(b) => b.to_string(),
    }
}

// =============================================================================
// Declarations
// =============================================================================

fn serialize_import(import: &ImportDecl) -> String {
    let keyword = if import.type_only {
        "import type"
    } else {
        "import"
    };
    format!(
        "{keyword} {{ {} }} from {};",
        import.names.join(", "),
        quote_string(&import.module)
    )
}

fn serialize_type_alias(alias: &TypeAliasDecl) -> String {
    let mut out = doc_block(alias.doc.as_deref(), 0);
    out.push_str("export type ");
    out.push_str(&alias.name);
    if !alias.params.is_empty() {
        out.push('<');
        out.push_str(&alias.params.join(", "));
        out.push('>');
    }
    out.push_str(" = ");

    // A top-level conditional is split over three lines
    if let TypeNode::Conditional {
        check,
        extends,
        true_type,
        false_type,
    } = &alias.body
    {
        out.push_str(&format!(
            "{} extends {}\n{INDENT}? {}\n{INDENT}: {}",
            serialize_type(check),
            serialize_type(extends),
            serialize_type(true_type),
            serialize_type(false_type)
        ));
    } else {
        out.push_str(&serialize_type(&alias.body));
    }
    out.push(';');
    out
}

fn serialize_interface(interface: &InterfaceDecl) -> String {
    let mut out = doc_block(interface.doc.as_deref(), 0);
    out.push_str("export interface ");
    out.push_str(&interface.name);

    if interface.properties.is_empty() {
        out.push_str(" {}");
        return out;
    }

    out.push_str(" {\n");
    for property in &interface.properties {
        out.push_str(&serialize_property(property));
    }
    out.push('}');
    out
}

fn serialize_property(property: &Property) -> String {
    let mut out = doc_block(property.doc.as_deref(), 1);
    out.push_str(&format!(
        "{INDENT}{}: {};\n",
        property_key(&property.name),
        serialize_type(&property.ty)
    ));
    out
}

fn serialize_schema_decl(decl: &SchemaDecl) -> String {
    let mut out = doc_block(decl.doc.as_deref(), 0);
    out.push_str("export const ");
    out.push_str(&decl.name);
    if let Some(annotation) = &decl.annotation {
        out.push_str(": ");
        out.push_str(annotation);
    }
    out.push_str(" = ");
    out.push_str(&serialize_schema(&decl.schema, 0));
    out.push(';');
    out
}

fn serialize_infer(infer: &InferDecl) -> String {
    format!(
        "export type {} = z.infer<typeof {}>;",
        infer.name, infer.schema
    )
}

// =============================================================================
// Validation schemas
// =============================================================================

/// Serialize a validation-schema expression; `depth` is the current indent level
#[must_use]
pub fn serialize_schema(node: &SchemaNode, depth: usize) -> String {
    match node {
        SchemaNode::Primitive(p) => format!("z.{}()", p.as_str()),
        SchemaNode::Literal(literal) => format!("z.literal({})", serialize_literal(literal)),
        SchemaNode::Enum(values) => {
            let values: Vec<String> = values.iter().map(|v| quote_string(v)).collect();
            format!("z.enum([{}])", values.join(", "))
        }
        SchemaNode::Union(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|m| serialize_schema(m, depth))
                .collect();
            format!("z.union([{}])", members.join(", "))
        }
        SchemaNode::Array(element) => format!("z.array({})", serialize_schema(element, depth)),
        SchemaNode::Object(properties) => {
            if properties.is_empty() {
                return "z.object({})".to_string();
            }
            let inner = INDENT.repeat(depth + 1);
            let mut out = String::from("z.object({\n");
            for property in properties {
                out.push_str(&doc_block(property.doc.as_deref(), depth + 1));
                out.push_str(&format!(
                    "{inner}{}: {},\n",
                    property_key(&property.name),
                    serialize_schema(&property.schema, depth + 1)
                ));
            }
            out.push_str(&INDENT.repeat(depth));
            out.push_str("})");
            out
        }
        SchemaNode::Reference(name) => name.clone(),
        SchemaNode::InstanceOf(class) => format!("z.instanceof({class})"),
        SchemaNode::Coerce(p) => format!("z.coerce.{}()", p.as_str()),
        SchemaNode::Custom(ty) => format!("z.custom<{ty}>()"),
        SchemaNode::Nullable(inner) => format!("{}.nullable()", serialize_schema(inner, depth)),
        SchemaNode::Optional(inner) => format!("{}.optional()", serialize_schema(inner, depth)),
        SchemaNode::Transform { inner, function } => {
            format!("{}.transform({function})", serialize_schema(inner, depth))
        }
        SchemaNode::Verbatim(text) => text.clone(),
    }
}

// =============================================================================
// Comments
// =============================================================================

/// A `/** ... */` block at the given indent level, or nothing
fn doc_block(doc: Option<&str>, depth: usize) -> String {
    let Some(doc) = doc.map(str::trim).filter(|d| !d.is_empty()) else {
        return String::new();
    };

    let indent = INDENT.repeat(depth);
    let mut out = format!("{indent}/**\n");
    for line in doc.lines() {
        let line = line.trim_end().replace("*/", "*\\/");
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {line}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Primitive, SchemaPrimitive, SchemaProperty};

    #[test]
    fn test_escape_order() {
        // backslash followed by quote: the backslash is doubled before the quote is escaped
        assert_eq!(escape_string("\\'"), "\\\\\\'");
        assert_eq!(escape_string("it's"), "it\\'s");
        assert_eq!(escape_string("a\nb\r\tc"), "a\\nb\\r\\tc");
        assert_eq!(escape_string("C:\\dir"), "C:\\\\dir");
    }

    #[test]
    fn test_property_key_quoting() {
        assert_eq!(property_key("id"), "id");
        assert_eq!(property_key("$meta_2"), "$meta_2");
        assert_eq!(property_key("default"), "'default'");
        assert_eq!(property_key("2fa"), "'2fa'");
        assert_eq!(property_key("first-name"), "'first-name'");
        assert_eq!(property_key("with space"), "'with space'");
        assert_eq!(property_key("o'clock"), "'o\\'clock'");
        assert_eq!(property_key(""), "''");
    }

    #[test]
    fn test_union_inside_array_is_parenthesized() {
        let node = TypeNode::array(TypeNode::Union(vec![TypeNode::STRING, TypeNode::NUMBER]));
        assert_eq!(serialize_type(&node), "(string | number)[]");
    }

    #[test]
    fn test_union_inside_intersection_is_parenthesized() {
        let node = TypeNode::Intersection(vec![
            TypeNode::Union(vec![TypeNode::reference("A"), TypeNode::reference("B")]),
            TypeNode::reference("C"),
        ]);
        assert_eq!(serialize_type(&node), "(A | B) & C");

        let node = TypeNode::Union(vec![
            TypeNode::Intersection(vec![TypeNode::reference("A"), TypeNode::reference("B")]),
            TypeNode::NULL,
        ]);
        assert_eq!(serialize_type(&node), "(A & B) | null");
    }

    #[test]
    fn test_other_nesting_is_not_parenthesized() {
        let nested = TypeNode::Union(vec![
            TypeNode::Union(vec![
                TypeNode::string_literal("a"),
                TypeNode::string_literal("b"),
            ]),
            TypeNode::NULL,
        ]);
        assert_eq!(serialize_type(&nested), "'a' | 'b' | null");

        let generic = TypeNode::generic(
            "Generated",
            vec![TypeNode::Union(vec![TypeNode::NUMBER, TypeNode::NULL])],
        );
        assert_eq!(serialize_type(&generic), "Generated<number | null>");

        let array = TypeNode::array(TypeNode::generic("ArrayType", vec![TypeNode::STRING]));
        assert_eq!(serialize_type(&array), "ArrayType<string>[]");
    }

    #[test]
    fn test_misc_type_shapes() {
        assert_eq!(
            serialize_type(&TypeNode::Tuple(vec![TypeNode::STRING, TypeNode::BIGINT])),
            "[string, bigint]"
        );
        assert_eq!(
            serialize_type(&TypeNode::KeyOf(Box::new(TypeNode::reference("DB")))),
            "keyof DB"
        );
        assert_eq!(
            serialize_type(&TypeNode::IndexAccess {
                object: Box::new(TypeNode::reference("DB")),
                index: Box::new(TypeNode::string_literal("users")),
            }),
            "DB['users']"
        );
        assert_eq!(serialize_type(&TypeNode::Union(vec![])), "never");
    }

    #[test]
    fn test_conditional_alias_is_split_over_lines() {
        let alias = TypeAliasDecl {
            name: "Unwrap".into(),
            params: vec!["T".into()],
            body: TypeNode::conditional(
                TypeNode::reference("T"),
                TypeNode::generic("Promise", vec![TypeNode::infer("U")]),
                TypeNode::reference("U"),
                TypeNode::reference("T"),
            ),
            doc: None,
        };
        assert_eq!(
            serialize_declaration(&Declaration::TypeAlias(alias)),
            "export type Unwrap<T> = T extends Promise<infer U>\n  ? U\n  : T;"
        );
    }

    #[test]
    fn test_interface_with_docs_and_quoted_keys() {
        let interface = InterfaceDecl {
            name: "User".into(),
            properties: vec![
                Property::new("id", TypeNode::NUMBER).doc(Some("Primary key".into())),
                Property::new("class", TypeNode::STRING.or_null()),
            ],
            doc: Some("People.\nEnds with */ here".into()),
        };
        assert_eq!(
            serialize_declaration(&Declaration::Interface(interface)),
            "/**\n * People.\n * Ends with *\\/ here\n */\nexport interface User {\n  /**\n   * Primary key\n   */\n  id: number;\n  'class': string | null;\n}"
        );
    }

    #[test]
    fn test_empty_interface() {
        let interface = InterfaceDecl {
            name: "Empty".into(),
            properties: vec![],
            doc: None,
        };
        assert_eq!(
            serialize_declaration(&Declaration::Interface(interface)),
            "export interface Empty {}"
        );
    }

    #[test]
    fn test_program_layout() {
        let program = Program::new(vec![
            Declaration::Import(ImportDecl {
                names: vec!["ColumnType".into()],
                module: "kysely".into(),
                type_only: true,
            }),
            Declaration::TypeAlias(TypeAliasDecl {
                name: "Id".into(),
                params: vec![],
                body: TypeNode::Primitive(Primitive::Number),
                doc: None,
            }),
        ]);
        assert_eq!(
            serialize(&program),
            "import type { ColumnType } from 'kysely';\n\nexport type Id = number;\n"
        );
    }

    #[test]
    fn test_schema_object_indentation() {
        let decl = SchemaDecl {
            name: "pointSchema".into(),
            annotation: None,
            schema: SchemaNode::Object(vec![
                SchemaProperty {
                    name: "x".into(),
                    schema: SchemaNode::Primitive(SchemaPrimitive::Number),
                    doc: None,
                },
                SchemaProperty {
                    name: "tags".into(),
                    schema: SchemaNode::Object(vec![SchemaProperty {
                        name: "label".into(),
                        schema: SchemaNode::Primitive(SchemaPrimitive::String).nullable(),
                        doc: None,
                    }])
                    .optional(),
                    doc: None,
                },
            ]),
            doc: None,
        };
        assert_eq!(
            serialize_declaration(&Declaration::Schema(decl)),
            "export const pointSchema = z.object({\n  x: z.number(),\n  tags: z.object({\n    label: z.string().nullable(),\n  }).optional(),\n});"
        );
    }

    #[test]
    fn test_schema_leaf_shapes() {
        let boolean = SchemaNode::Transform {
            inner: Box::new(SchemaNode::Union(vec![
                SchemaNode::Literal(Literal::Number(0)),
                SchemaNode::Literal(Literal::Number(1)),
            ])),
            function: "(value) => value === 1".into(),
        };
        assert_eq!(
            serialize_schema(&boolean, 0),
            "z.union([z.literal(0), z.literal(1)]).transform((value) => value === 1)"
        );
        assert_eq!(
            serialize_schema(&SchemaNode::Enum(vec!["a".into(), "it's".into()]), 0),
            "z.enum(['a', 'it\\'s'])"
        );
        assert_eq!(
            serialize_schema(&SchemaNode::InstanceOf("Buffer".into()), 0),
            "z.instanceof(Buffer)"
        );
        assert_eq!(
            serialize_schema(&SchemaNode::Coerce(SchemaPrimitive::Boolean), 0),
            "z.coerce.boolean()"
        );
        assert_eq!(
            serialize_schema(&SchemaNode::Custom("Money".into()).array(), 0),
            "z.array(z.custom<Money>())"
        );
    }

    #[test]
    fn test_infer_declaration() {
        let infer = Declaration::Infer(InferDecl {
            name: "NewUser".into(),
            schema: "newUserSchema".into(),
        });
        assert_eq!(
            serialize_declaration(&infer),
            "export type NewUser = z.infer<typeof newUserSchema>;"
        );
    }
}
