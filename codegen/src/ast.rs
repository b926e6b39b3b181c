//! Canonical declaration tree
//!
//! Both builders produce a [`Program`]; the serializer turns it into text without
//! knowing anything about databases. Declaration order is significant: a
//! declaration only refers to names declared before it (the recursive JSON aliases
//! are the single exception).

/// Primitive type keywords
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Bigint,
    Null,
    Undefined,
    Unknown,
}

impl Primitive {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Bigint => "bigint",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
            Primitive::Unknown => "unknown",
        }
    }

    /// Element types that may appear as a bare `T[]`
    #[must_use]
    pub const fn is_simple(self) -> bool {
        matches!(
            self,
            Primitive::String | Primitive::Number | Primitive::Boolean
        )
    }
}

/// Literal values usable as types
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    Number(i64),
    Boolean(bool),
}

/// A type expression
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeNode {
    Primitive(Primitive),
    Literal(Literal),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    Array(Box<TypeNode>),
    /// `Name<A, B>`
    Generic { name: String, args: Vec<TypeNode> },
    /// A bare name, declared elsewhere or provided by the runtime (`Date`, `Buffer`)
    Reference(String),
    Tuple(Vec<TypeNode>),
    /// `check extends extends ? true_type : false_type`
    Conditional {
        check: Box<TypeNode>,
        extends: Box<TypeNode>,
        true_type: Box<TypeNode>,
        false_type: Box<TypeNode>,
    },
    /// `infer Name`, only meaningful inside a conditional's `extends`
    Infer(String),
    KeyOf(Box<TypeNode>),
    IndexAccess {
        object: Box<TypeNode>,
        index: Box<TypeNode>,
    },
    /// Printed as-is; reserved for fixed library helper bodies and user overrides
    Verbatim(String),
}

impl TypeNode {
    pub const STRING: TypeNode = TypeNode::Primitive(Primitive::String);
    pub const NUMBER: TypeNode = TypeNode::Primitive(Primitive::Number);
    pub const BOOLEAN: TypeNode = TypeNode::Primitive(Primitive::Boolean);
    pub const BIGINT: TypeNode = TypeNode::Primitive(Primitive::Bigint);
    pub const NULL: TypeNode = TypeNode::Primitive(Primitive::Null);
    pub const UNDEFINED: TypeNode = TypeNode::Primitive(Primitive::Undefined);
    pub const UNKNOWN: TypeNode = TypeNode::Primitive(Primitive::Unknown);

    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference(name.into())
    }

    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<TypeNode>) -> Self {
        TypeNode::Generic {
            name: name.into(),
            args,
        }
    }

    #[must_use]
    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array(Box::new(element))
    }

    #[must_use]
    pub fn string_literal(value: impl Into<String>) -> Self {
        TypeNode::Literal(Literal::String(value.into()))
    }

    #[must_use]
    pub fn number_literal(value: i64) -> Self {
        TypeNode::Literal(Literal::Number(value))
    }

    #[must_use]
    pub fn infer(name: impl Into<String>) -> Self {
        TypeNode::Infer(name.into())
    }

    #[must_use]
    pub fn conditional(check: TypeNode, extends: TypeNode, t: TypeNode, f: TypeNode) -> Self {
        TypeNode::Conditional {
            check: Box::new(check),
            extends: Box::new(extends),
            true_type: Box::new(t),
            false_type: Box::new(f),
        }
    }

    /// `self | null`
    #[must_use]
    pub fn or_null(self) -> Self {
        TypeNode::Union(vec![self, TypeNode::NULL])
    }

    /// `boolean`, `number` or `string`
    #[must_use]
    pub fn is_simple_primitive(&self) -> bool {
        matches!(self, TypeNode::Primitive(p) if p.is_simple())
    }
}

/// A named member of an interface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: TypeNode,
    pub doc: Option<String>,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: None,
        }
    }

    #[must_use]
    pub fn doc(self, doc: Option<String>) -> Self {
        Self { doc, ..self }
    }
}

/// Validation-schema primitives (`z.string()`, `z.date()`, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemaPrimitive {
    String,
    Number,
    Boolean,
    Bigint,
    Date,
    Null,
    Unknown,
}

impl SchemaPrimitive {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SchemaPrimitive::String => "string",
            SchemaPrimitive::Number => "number",
            SchemaPrimitive::Boolean => "boolean",
            SchemaPrimitive::Bigint => "bigint",
            SchemaPrimitive::Date => "date",
            SchemaPrimitive::Null => "null",
            SchemaPrimitive::Unknown => "unknown",
        }
    }
}

/// A validation-schema builder expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaNode {
    Primitive(SchemaPrimitive),
    Literal(Literal),
    /// `z.enum([...])`
    Enum(Vec<String>),
    Union(Vec<SchemaNode>),
    Array(Box<SchemaNode>),
    Object(Vec<SchemaProperty>),
    /// Another schema const, by name
    Reference(String),
    /// `z.instanceof(Class)`
    InstanceOf(String),
    /// `z.coerce.<primitive>()`
    Coerce(SchemaPrimitive),
    /// `z.custom<T>()`
    Custom(String),
    Nullable(Box<SchemaNode>),
    Optional(Box<SchemaNode>),
    /// `inner.transform(function)`
    Transform {
        inner: Box<SchemaNode>,
        function: String,
    },
    Verbatim(String),
}

impl SchemaNode {
    #[must_use]
    pub fn nullable(self) -> Self {
        SchemaNode::Nullable(Box::new(self))
    }

    #[must_use]
    pub fn optional(self) -> Self {
        SchemaNode::Optional(Box::new(self))
    }

    #[must_use]
    pub fn array(self) -> Self {
        SchemaNode::Array(Box::new(self))
    }
}

/// A named member of a `z.object({...})`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaProperty {
    pub name: String,
    pub schema: SchemaNode,
    pub doc: Option<String>,
}

/// `import { a, b } from 'module';`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
    pub names: Vec<String>,
    pub module: String,
    pub type_only: bool,
}

/// `export type Name<Params> = body;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: TypeNode,
    pub doc: Option<String>,
}

/// `export interface Name { ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
    pub properties: Vec<Property>,
    pub doc: Option<String>,
}

/// `export const name[: annotation] = schema;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaDecl {
    pub name: String,
    pub annotation: Option<String>,
    pub schema: SchemaNode,
    pub doc: Option<String>,
}

/// `export type Name = z.infer<typeof schema>;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferDecl {
    pub name: String,
    pub schema: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Import(ImportDecl),
    TypeAlias(TypeAliasDecl),
    Interface(InterfaceDecl),
    Schema(SchemaDecl),
    Infer(InferDecl),
}

impl Declaration {
    /// The exported name, if the declaration introduces one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Import(_) => None,
            Declaration::TypeAlias(d) => Some(&d.name),
            Declaration::Interface(d) => Some(&d.name),
            Declaration::Schema(d) => Some(&d.name),
            Declaration::Infer(d) => Some(&d.name),
        }
    }
}

/// An ordered list of declarations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    #[must_use]
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Look up an exported declaration by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == Some(name))
    }

    /// Names of every exported declaration, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().filter_map(Declaration::name)
    }
}
