//! Plain type declarations: one interface per table plus the root `DB` interface

use crate::ast::{Declaration, InterfaceDecl, Program, Property, TypeAliasDecl, TypeNode};
use crate::options::GenerateOptions;
use crate::typemap::Helper;

use super::{ProgramBuilder, ResolvedSchema, ResolvedTable};

/// Interfaces backend
#[derive(Clone, Copy, Debug, Default)]
pub struct InterfaceBuilder;

impl ProgramBuilder for InterfaceBuilder {
    fn build(&self, schema: &ResolvedSchema<'_>, options: &GenerateOptions) -> Program {
        let mut program = Program::default();

        let mut helpers = schema.state.clone();
        if schema
            .tables
            .iter()
            .any(|t| t.columns.iter().any(|c| c.generated))
        {
            helpers.use_helper(Helper::Generated);
        }
        for helper in helpers.used_helpers() {
            program.push(helper.declaration(options.type_only_imports));
        }

        for (name, e) in &schema.enums {
            program.push(Declaration::TypeAlias(TypeAliasDecl {
                name: name.clone(),
                params: Vec::new(),
                body: TypeNode::Union(e.values.iter().map(TypeNode::string_literal).collect()),
                doc: None,
            }));
        }

        for table in &schema.tables {
            program.push(Declaration::Interface(table_interface(table)));
        }

        program.push(Declaration::Interface(InterfaceDecl {
            name: "DB".to_string(),
            properties: schema
                .tables
                .iter()
                .map(|t| Property::new(t.property.clone(), TypeNode::reference(&t.type_name)))
                .collect(),
            doc: None,
        }));

        program
    }
}

fn table_interface(table: &ResolvedTable<'_>) -> InterfaceDecl {
    let properties = table
        .columns
        .iter()
        .map(|column| {
            let ty = if column.generated {
                TypeNode::generic(Helper::Generated.name(), vec![column.ty.clone()])
            } else {
                column.ty.clone()
            };
            Property::new(column.property.clone(), ty).doc(column.column.comment.clone())
        })
        .collect();

    InterfaceDecl {
        name: table.type_name.clone(),
        properties,
        doc: table.table.comment.clone(),
    }
}
