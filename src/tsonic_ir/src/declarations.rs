//! IR declaration nodes: Function, Class, Interface, TypeAlias, Variable, Enum.

use serde::{Deserialize, Serialize};
use tsonic_ir_derive::IrNode;

use crate::expressions::Expr;
use crate::provenance::Provenance;
use crate::statements::Stmt;
use crate::types::{IrType, IrTypeParameter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Internal,
    Private,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: IrType,
    pub default: Option<Expr>,
    pub is_rest: bool,
}

/// A basic block annotated with suspension points, the lowering target for
/// generator/async-generator bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    /// Set when this block contains a yield/await suspension point; the
    /// specialisation stage and emitter use this to decide whether a state
    /// machine is required.
    pub is_suspension_point: bool,
    /// Variables live across this block's boundary, for the state-machine
    /// field list.
    pub live_state: Vec<String>,
}

impl Block {
    pub fn simple(statements: Vec<Stmt>) -> Self {
        Self { statements, is_suspension_point: false, live_state: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseClass {
    pub name: String,
    pub type_arguments: Vec<IrType>,
}

#[derive(Debug, Clone, PartialEq, IrNode, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub provenance: Provenance,
    pub name: String,
    pub visibility: Visibility,
    pub type_parameters: Vec<IrTypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: IrType,
    pub is_async: bool,
    pub is_generator: bool,
    pub body: Vec<Block>,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, IrNode, Serialize, Deserialize)]
pub struct ClassDecl {
    pub provenance: Provenance,
    pub name: String,
    pub visibility: Visibility,
    pub type_parameters: Vec<IrTypeParameter>,
    /// At most one base class; enforced by the builder, not the type system.
    pub base_class: Option<BaseClass>,
    pub interfaces: Vec<BaseClass>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<FunctionDecl>,
    pub constructor: Option<FunctionDecl>,
    /// Tagged when the class (or an interface it extends) descends from the
    /// `struct` marker interface; the marker itself is stripped from
    /// `interfaces` once this is set.
    pub is_value_type: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: IrType,
    pub visibility: Visibility,
    pub readonly: bool,
    pub is_static: bool,
    pub initializer: Option<Expr>,
    /// Set for members synthesised from a TypeScript index signature; the
    /// emitter backs these with a dictionary rather than a plain property.
    pub is_index_signature: bool,
}

/// Interfaces and object type aliases are lowered nominally into class-like
/// nodes with auto-properties; this is the shared shape for both.
#[derive(Debug, Clone, PartialEq, IrNode, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub provenance: Provenance,
    pub name: String,
    pub visibility: Visibility,
    pub type_parameters: Vec<IrTypeParameter>,
    pub extends: Vec<BaseClass>,
    pub members: Vec<FieldDecl>,
    pub is_value_type: bool,
}

#[derive(Debug, Clone, PartialEq, IrNode, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub provenance: Provenance,
    pub name: String,
    pub visibility: Visibility,
    pub type_parameters: Vec<IrTypeParameter>,
    pub aliased: IrType,
}

#[derive(Debug, Clone, PartialEq, IrNode, Serialize, Deserialize)]
pub struct VariableDecl {
    pub provenance: Provenance,
    pub name: String,
    pub visibility: Visibility,
    pub ty: IrType,
    pub initializer: Option<Expr>,
    pub is_const: bool,
    pub is_top_level: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, IrNode, Serialize, Deserialize)]
pub struct EnumDecl {
    pub provenance: Provenance,
    pub name: String,
    pub visibility: Visibility,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrDeclaration {
    Function(FunctionDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Variable(VariableDecl),
    Enum(EnumDecl),
}

impl IrDeclaration {
    pub fn name(&self) -> &str {
        match self {
            IrDeclaration::Function(d) => &d.name,
            IrDeclaration::Class(d) => &d.name,
            IrDeclaration::Interface(d) => &d.name,
            IrDeclaration::TypeAlias(d) => &d.name,
            IrDeclaration::Variable(d) => &d.name,
            IrDeclaration::Enum(d) => &d.name,
        }
    }

    pub fn provenance(&self) -> &Provenance {
        match self {
            IrDeclaration::Function(d) => &d.provenance,
            IrDeclaration::Class(d) => &d.provenance,
            IrDeclaration::Interface(d) => &d.provenance,
            IrDeclaration::TypeAlias(d) => &d.provenance,
            IrDeclaration::Variable(d) => &d.provenance,
            IrDeclaration::Enum(d) => &d.provenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};

    fn dummy_provenance() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    #[test]
    fn declaration_name_dispatches_by_variant() {
        let decl = IrDeclaration::Enum(EnumDecl {
            provenance: dummy_provenance(),
            name: "Color".into(),
            visibility: Visibility::Public,
            members: vec![],
        });
        assert_eq!(decl.name(), "Color");
    }
}
