//! A minimal stand-in for the disciplined TypeScript subset's AST.
//!
//! Parsing and type-checking are owned by an external service reached
//! through the type system facade; this module only gives the IR builder
//! (and its tests) something concrete to lower from in-process. Type
//! annotations here are unresolved source syntax (`AstTypeRef`); resolving
//! them to an `IrType` is the facade's job.

use serde::{Deserialize, Serialize};
use tsonic_common::position::SourceLocation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstTypeRef {
    pub name: String,
    pub type_arguments: Vec<AstTypeRef>,
    pub nullable: bool,
    /// `A | B | C`; non-empty only for a union, in which case `name` and
    /// `type_arguments` are ignored.
    pub union_members: Vec<AstTypeRef>,
    /// Set for `T extends U ? X : Y` conditional types and `{ [K in Keys]: V }`
    /// mapped types, neither of which this subset's facade can expand.
    pub is_conditional_or_mapped: bool,
}

impl AstTypeRef {
    pub fn simple(name: impl Into<String>) -> Self {
        Self { name: name.into(), type_arguments: Vec::new(), nullable: false, union_members: Vec::new(), is_conditional_or_mapped: false }
    }

    pub fn union(members: Vec<AstTypeRef>) -> Self {
        Self { name: String::new(), type_arguments: Vec::new(), nullable: false, union_members: members, is_conditional_or_mapped: false }
    }

    pub fn is_union(&self) -> bool {
        !self.union_members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstTypeParam {
    pub name: String,
    pub nominal_constraint: Option<AstTypeRef>,
    /// `{ m1: T1, m2: T2 }`-shaped structural constraint, member name to type.
    pub structural_constraint: Option<Vec<(String, AstTypeRef, bool)>>,
    pub default: Option<AstTypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstParam {
    pub name: String,
    pub ty: AstTypeRef,
    pub default: Option<AstExpr>,
    pub is_rest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstLiteral {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstExpr {
    Literal(AstLiteral),
    Identifier(String),
    TemplateString { parts: Vec<String>, substitutions: Vec<AstExpr> },
    Array(Vec<AstExpr>),
    Binary { op: String, left: Box<AstExpr>, right: Box<AstExpr> },
    Unary { op: String, operand: Box<AstExpr> },
    InstanceOf { value: Box<AstExpr>, target: String },
    Member { object: Box<AstExpr>, property: String, optional: bool },
    Index { object: Box<AstExpr>, index: Box<AstExpr> },
    Call { callee: Box<AstExpr>, type_arguments: Vec<AstTypeRef>, arguments: Vec<AstExpr> },
    New { type_name: String, type_arguments: Vec<AstTypeRef>, arguments: Vec<AstExpr> },
    Assign { target: Box<AstExpr>, value: Box<AstExpr> },
    Conditional { condition: Box<AstExpr>, then_branch: Box<AstExpr>, else_branch: Box<AstExpr> },
    Yield { value: Option<Box<AstExpr>>, delegate: bool },
    Await(Box<AstExpr>),
    Lambda { parameters: Vec<String>, body: Box<AstExpr> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstStmt {
    Expression(AstExpr),
    Let { name: String, ty: AstTypeRef, initializer: Option<AstExpr>, is_const: bool },
    Return(Option<AstExpr>),
    SuperCall { arguments: Vec<AstExpr> },
    If { condition: AstExpr, then_branch: Vec<AstStmt>, else_branch: Vec<AstStmt> },
    While { condition: AstExpr, body: Vec<AstStmt> },
    ForOf { binding: String, iterable: AstExpr, body: Vec<AstStmt> },
    Break,
    Continue,
    Throw(AstExpr),
    FunctionDecl(AstFunction),
    /// `with (object) { ... }`; no representation in the target's native
    /// scoping, so the body is lowered for diagnostics only.
    With { object: Box<AstExpr>, body: Vec<AstStmt> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AstVisibility {
    Exported,
    /// `export default`; recorded separately from `Exported` since the
    /// target has no anonymous-default-export equivalent.
    ExportedDefault,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstFunction {
    pub name: String,
    pub visibility: AstVisibility,
    pub type_parameters: Vec<AstTypeParam>,
    pub parameters: Vec<AstParam>,
    pub return_type: AstTypeRef,
    pub is_async: bool,
    pub is_generator: bool,
    pub body: Vec<AstStmt>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstField {
    pub name: String,
    pub ty: AstTypeRef,
    pub readonly: bool,
    pub optional: bool,
    pub is_static: bool,
    pub initializer: Option<AstExpr>,
    pub is_index_signature: bool,
    /// `true` for `[key: symbol]: V`; only meaningful when
    /// `is_index_signature` is set. `Symbol`-keyed members can't be
    /// expressed as a nominal .NET member or backed by a dictionary.
    pub index_key_is_symbol: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstClass {
    pub name: String,
    pub visibility: AstVisibility,
    pub type_parameters: Vec<AstTypeParam>,
    pub extends: Option<AstTypeRef>,
    pub implements: Vec<AstTypeRef>,
    pub fields: Vec<AstField>,
    pub methods: Vec<AstFunction>,
    pub constructor: Option<AstFunction>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstInterface {
    pub name: String,
    pub visibility: AstVisibility,
    pub type_parameters: Vec<AstTypeParam>,
    pub extends: Vec<AstTypeRef>,
    pub members: Vec<AstField>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstTypeAlias {
    pub name: String,
    pub visibility: AstVisibility,
    pub type_parameters: Vec<AstTypeParam>,
    /// `Some` only when the alias is an object-literal type; other aliases
    /// resolve straight through the facade to an `IrType`.
    pub object_members: Option<Vec<AstField>>,
    pub aliased: AstTypeRef,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstVariable {
    pub name: String,
    pub visibility: AstVisibility,
    pub ty: AstTypeRef,
    pub initializer: Option<AstExpr>,
    pub is_const: bool,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstEnumMember {
    pub name: String,
    pub value: Option<AstExpr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstEnum {
    pub name: String,
    pub visibility: AstVisibility,
    pub members: Vec<AstEnumMember>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstImportKind {
    LocalTs,
    DotnetNamespace,
    TypeOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstImport {
    pub specifier: String,
    pub kind: AstImportKind,
    pub names: Vec<String>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstReExport {
    pub specifier: String,
    /// `export * as ns from './x'`'s `ns`; `None` for a plain
    /// `export { a, b } from './x'`.
    pub namespace_alias: Option<String>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstItem {
    Function(AstFunction),
    Class(AstClass),
    Interface(AstInterface),
    TypeAlias(AstTypeAlias),
    Variable(AstVariable),
    Enum(AstEnum),
    TopLevelStatement(AstStmt),
    ReExport(AstReExport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub imports: Vec<AstImport>,
    pub items: Vec<AstItem>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), imports: Vec::new(), items: Vec::new() }
    }

    pub fn exported_names(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                AstItem::Function(f) if f.visibility == AstVisibility::Exported => Some(f.name.as_str()),
                AstItem::Class(c) if c.visibility == AstVisibility::Exported => Some(c.name.as_str()),
                AstItem::Interface(i) if i.visibility == AstVisibility::Exported => Some(i.name.as_str()),
                AstItem::TypeAlias(t) if t.visibility == AstVisibility::Exported => Some(t.name.as_str()),
                AstItem::Variable(v) if v.visibility == AstVisibility::Exported => Some(v.name.as_str()),
                AstItem::Enum(e) if e.visibility == AstVisibility::Exported => Some(e.name.as_str()),
                _ => None,
            })
            .collect()
    }
}
