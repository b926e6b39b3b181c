//! Zod validation schemas
//!
//! Per table three object schemas are emitted (select, insert and update shapes) with
//! an inferred type for each. Helper references are lowered through their definitions:
//! a `ColumnType<S, I, U>` contributes `S`, `I` or `U` depending on the shape.

use std::collections::BTreeSet;

use typegen_types::ParsedConstraint;

use crate::ast::{
    Declaration, ImportDecl, InferDecl, Literal, Primitive, Program, SchemaDecl, SchemaNode,
    SchemaPrimitive, SchemaProperty, TypeNode,
};
use crate::naming::schema_const_name;
use crate::options::GenerateOptions;
use crate::typemap::Helper;

use super::{ColumnKind, ProgramBuilder, ResolvedColumn, ResolvedSchema, ResolvedTable};

const JSON_VALUE_SCHEMA: &str = "jsonValueSchema";

/// Which side of a read/write asymmetric type to lower
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    Select,
    Insert,
    Update,
}

impl Shape {
    const fn argument(self) -> usize {
        match self {
            Shape::Select => 0,
            Shape::Insert => 1,
            Shape::Update => 2,
        }
    }
}

/// Zod backend
#[derive(Clone, Copy, Debug, Default)]
pub struct ZodBuilder;

impl ProgramBuilder for ZodBuilder {
    fn build(&self, schema: &ResolvedSchema<'_>, options: &GenerateOptions) -> Program {
        let mut lowering = Lowering::new(options.boolean_coercion);
        let mut body = Vec::new();

        for (name, e) in &schema.enums {
            let const_name = schema_const_name(name);
            let node = if e.values.is_empty() {
                SchemaNode::Verbatim("z.never()".to_string())
            } else {
                SchemaNode::Enum(e.values.clone())
            };
            body.push(schema_decl(&const_name, node, None));
            body.push(infer_decl(name, &const_name));
        }

        for table in &schema.tables {
            body.extend(lowering.table(table));
        }

        let mut program = Program::default();
        program.push(Declaration::Import(ImportDecl {
            names: vec!["z".to_string()],
            module: "zod".to_string(),
            type_only: false,
        }));
        for helper in &lowering.helpers {
            program.push(helper.declaration(options.type_only_imports));
        }
        if lowering.helpers.contains(&Helper::JsonValue) {
            program.push(Declaration::Schema(SchemaDecl {
                name: JSON_VALUE_SCHEMA.to_string(),
                annotation: Some("z.ZodType<JsonValue>".to_string()),
                schema: SchemaNode::Verbatim(format!(
                    "z.lazy(() =>\n  z.union([\n    z.boolean(),\n    z.number(),\n    z.string(),\n    z.null(),\n    z.array({JSON_VALUE_SCHEMA}),\n    z.record(z.string(), {JSON_VALUE_SCHEMA}),\n  ]),\n)"
                )),
                doc: None,
            }));
        }

        for declaration in body {
            program.push(declaration);
        }
        program
    }
}

fn schema_decl(name: &str, schema: SchemaNode, doc: Option<String>) -> Declaration {
    Declaration::Schema(SchemaDecl {
        name: name.to_string(),
        annotation: None,
        schema,
        doc,
    })
}

fn infer_decl(name: &str, schema: &str) -> Declaration {
    Declaration::Infer(InferDecl {
        name: name.to_string(),
        schema: schema.to_string(),
    })
}

/// Lowering state for one run: the type-level helpers the schemas end up needing
struct Lowering {
    boolean_coercion: bool,
    helpers: BTreeSet<Helper>,
}

impl Lowering {
    fn new(boolean_coercion: bool) -> Self {
        Self {
            boolean_coercion,
            helpers: BTreeSet::new(),
        }
    }

    fn table(&mut self, table: &ResolvedTable<'_>) -> Vec<Declaration> {
        let select_type = table.type_name.clone();
        let insert_type = format!("New{}", table.type_name);
        let update_type = format!("{}Update", table.type_name);

        let mut declarations = Vec::with_capacity(6);
        for (type_name, shape) in [
            (&select_type, Shape::Select),
            (&insert_type, Shape::Insert),
            (&update_type, Shape::Update),
        ] {
            let properties = table
                .columns
                .iter()
                .map(|column| SchemaProperty {
                    name: column.property.clone(),
                    schema: self.column(column, shape),
                    doc: column.column.comment.clone(),
                })
                .collect();
            let doc = (shape == Shape::Select)
                .then(|| table.table.comment.clone())
                .flatten();
            declarations.push(schema_decl(
                &schema_const_name(type_name),
                SchemaNode::Object(properties),
                doc,
            ));
        }
        for type_name in [&select_type, &insert_type, &update_type] {
            declarations.push(infer_decl(type_name, &schema_const_name(type_name)));
        }
        declarations
    }

    fn column(&mut self, column: &ResolvedColumn<'_>, shape: Shape) -> SchemaNode {
        let wrap = |node: SchemaNode| {
            let node = if column.is_array { node.array() } else { node };
            if column.nullable { node.nullable() } else { node }
        };
        let node = match &column.kind {
            // the mapped type already carries array and null wrapping
            ColumnKind::Scalar => self.lower(&column.ty, shape),
            ColumnKind::Check(constraint) => wrap(self.constraint(constraint)),
            ColumnKind::Enum(name) => wrap(SchemaNode::Reference(schema_const_name(name))),
            ColumnKind::Override(ty) => {
                let node = SchemaNode::Custom(ty.clone());
                if column.nullable { node.nullable() } else { node }
            }
        };

        let omittable = match shape {
            Shape::Select => false,
            Shape::Insert => column.generated,
            Shape::Update => true,
        };
        if omittable { node.optional() } else { node }
    }

    fn constraint(&self, constraint: &ParsedConstraint) -> SchemaNode {
        match constraint {
            ParsedConstraint::String { values } => SchemaNode::Enum(values.clone()),
            ParsedConstraint::Number { values } => {
                let mut literals: Vec<SchemaNode> = values
                    .iter()
                    .map(|v| SchemaNode::Literal(Literal::Number(*v)))
                    .collect();
                if literals.len() == 1 {
                    literals.remove(0)
                } else {
                    SchemaNode::Union(literals)
                }
            }
            ParsedConstraint::Boolean if self.boolean_coercion => {
                SchemaNode::Coerce(SchemaPrimitive::Boolean)
            }
            ParsedConstraint::Boolean => SchemaNode::Transform {
                inner: Box::new(SchemaNode::Union(vec![
                    SchemaNode::Literal(Literal::Number(0)),
                    SchemaNode::Literal(Literal::Number(1)),
                ])),
                function: "(value) => value === 1".to_string(),
            },
        }
    }

    /// Lower a mapped type to a schema for one shape
    fn lower(&mut self, ty: &TypeNode, shape: Shape) -> SchemaNode {
        match ty {
            TypeNode::Primitive(p) => SchemaNode::Primitive(match p {
                Primitive::String => SchemaPrimitive::String,
                Primitive::Number => SchemaPrimitive::Number,
                Primitive::Boolean => SchemaPrimitive::Boolean,
                Primitive::Bigint => SchemaPrimitive::Bigint,
                Primitive::Null => SchemaPrimitive::Null,
                Primitive::Undefined | Primitive::Unknown => SchemaPrimitive::Unknown,
            }),
            TypeNode::Literal(literal) => SchemaNode::Literal(literal.clone()),
            TypeNode::Union(members) => self.lower_union(members, shape),
            TypeNode::Array(element) => self.lower(element, shape).array(),
            TypeNode::Generic { name, args } => match (name.as_str(), args.as_slice()) {
                ("ColumnType", [select]) => self.lower(select, shape),
                ("ColumnType", args) => match args.get(shape.argument()).or(args.first()) {
                    Some(arg) => self.lower(arg, shape),
                    None => SchemaNode::Primitive(SchemaPrimitive::Unknown),
                },
                ("ArrayType", [element]) => self.lower(element, shape).array(),
                _ => SchemaNode::Primitive(SchemaPrimitive::Unknown),
            },
            TypeNode::Reference(name) => self.lower_reference(name, shape),
            TypeNode::Verbatim(text) => SchemaNode::Custom(text.clone()),
            _ => SchemaNode::Primitive(SchemaPrimitive::Unknown),
        }
    }

    fn lower_union(&mut self, members: &[TypeNode], shape: Shape) -> SchemaNode {
        let nullable = members.contains(&TypeNode::NULL);
        let mut lowered: Vec<SchemaNode> = members
            .iter()
            .filter(|m| **m != TypeNode::NULL && **m != TypeNode::UNDEFINED)
            .map(|m| self.lower(m, shape))
            .collect();

        let node = match lowered.len() {
            0 => SchemaNode::Primitive(SchemaPrimitive::Null),
            1 => lowered.remove(0),
            _ => SchemaNode::Union(lowered),
        };
        if nullable && !matches!(node, SchemaNode::Primitive(SchemaPrimitive::Null)) {
            node.nullable()
        } else {
            node
        }
    }

    fn lower_reference(&mut self, name: &str, shape: Shape) -> SchemaNode {
        match name {
            "Date" => return SchemaNode::Primitive(SchemaPrimitive::Date),
            "Buffer" => return SchemaNode::InstanceOf("Buffer".to_string()),
            _ => {}
        }

        let Some(helper) = Helper::from_name(name) else {
            return SchemaNode::Primitive(SchemaPrimitive::Unknown);
        };
        match helper {
            Helper::Json | Helper::JsonValue => {
                self.use_type_helper(Helper::JsonValue);
                SchemaNode::Reference(JSON_VALUE_SCHEMA.to_string())
            }
            Helper::IPostgresInterval => {
                self.use_type_helper(Helper::IPostgresInterval);
                SchemaNode::Custom(helper.name().to_string())
            }
            Helper::Point | Helper::Circle => SchemaNode::Object(
                helper
                    .fields()
                    .iter()
                    .map(|field| SchemaProperty {
                        name: (*field).to_string(),
                        schema: SchemaNode::Primitive(SchemaPrimitive::Number),
                        doc: None,
                    })
                    .collect(),
            ),
            _ => match helper.definition() {
                Some(definition) => self.lower(&definition, shape),
                None => SchemaNode::Primitive(SchemaPrimitive::Unknown),
            },
        }
    }

    /// Type-level helpers the schemas refer to, with their dependencies
    fn use_type_helper(&mut self, helper: Helper) {
        if self.helpers.insert(helper) {
            for dependency in helper.dependencies() {
                self.use_type_helper(*dependency);
            }
        }
    }
}
