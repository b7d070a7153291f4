//! Lowers a `SourceFile` to an `IrModule`, the core of the compiler's IR
//! Builder stage.

pub mod entry_point;
pub mod numeric;

use log::debug;
use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use tsonic_common::position::SourceLocation;

use crate::declarations::{
    BaseClass, Block, ClassDecl, EnumDecl, EnumMember, FieldDecl, FunctionDecl, InterfaceDecl,
    IrDeclaration, Parameter, TypeAliasDecl, VariableDecl, Visibility,
};
use crate::expressions::{BinaryOp, Expr, ExprKind, ExprNode, Literal, SpecialisationInfo, UnaryOp};
use crate::facade::TypeResolver;
use crate::module::IrModule;
use crate::provenance::Provenance;
use crate::source_ast::{
    AstClass, AstEnum, AstExpr, AstField, AstFunction, AstInterface, AstItem, AstLiteral, AstStmt,
    AstTypeAlias, AstTypeRef, AstVariable, AstVisibility, SourceFile,
};
use crate::statements::{Stmt, StmtKind};
use crate::types::{FunctionType, IrType};

pub const STRUCT_MARKER_NAME: &str = "struct";

/// A worker that lowers one Source Module at a time; modules are otherwise
/// independent, so one of these can be handed to each parallel IR-building
/// task.
pub struct IrBuilder<'a> {
    resolver: &'a dyn TypeResolver,
    pub diagnostics: DiagnosticCollection,
    /// Types of the bindings in scope for whatever function (or the
    /// top-level statement sequence) is currently being lowered. Cleared at
    /// the start of each function and of the top-level statement pass, since
    /// scopes never nest across those boundaries here.
    locals: std::collections::HashMap<String, IrType>,
    /// Forbidden constructs found while lowering the module currently in
    /// progress; drained into the `IrModule` at the end of `build_module`.
    current_forbidden_constructs: Vec<crate::module::ForbiddenConstruct>,
}

impl<'a> IrBuilder<'a> {
    pub fn new(resolver: &'a dyn TypeResolver) -> Self {
        Self {
            resolver,
            diagnostics: DiagnosticCollection::new(),
            locals: std::collections::HashMap::new(),
            current_forbidden_constructs: Vec::new(),
        }
    }

    pub fn build_module(&mut self, file: &SourceFile, namespace: &str, class_name: &str) -> IrModule {
        debug!("lowering module {} -> namespace {}", file.path, namespace);
        let mut module = IrModule::new(namespace, class_name);

        let exported_names = file.exported_names();

        self.locals.clear();
        self.current_forbidden_constructs.clear();
        let mut top_level_statements = Vec::new();
        for item in &file.items {
            match item {
                AstItem::Function(f) => {
                    flag_default_export(&mut module, f.visibility);
                    module.declarations.push(IrDeclaration::Function(self.lower_function(f)));
                }
                AstItem::Class(c) => {
                    flag_default_export(&mut module, c.visibility);
                    module.declarations.push(IrDeclaration::Class(self.lower_class(c)));
                }
                AstItem::Interface(i) => {
                    flag_default_export(&mut module, i.visibility);
                    module.declarations.push(IrDeclaration::Interface(self.lower_interface(i)));
                }
                AstItem::TypeAlias(t) => {
                    flag_default_export(&mut module, t.visibility);
                    module.declarations.push(IrDeclaration::TypeAlias(self.lower_type_alias(t)));
                }
                AstItem::Variable(v) => {
                    flag_default_export(&mut module, v.visibility);
                    module.declarations.push(IrDeclaration::Variable(self.lower_variable(v, true)));
                }
                AstItem::Enum(e) => {
                    flag_default_export(&mut module, e.visibility);
                    module.declarations.push(IrDeclaration::Enum(self.lower_enum(e)));
                }
                AstItem::TopLevelStatement(s) => top_level_statements.push(self.lower_stmt(s)),
                AstItem::ReExport(r) => {
                    let kind = if r.namespace_alias.is_some() {
                        crate::module::ForbiddenConstruct::NamespaceReExport
                    } else {
                        crate::module::ForbiddenConstruct::ReExport
                    };
                    module.forbidden_constructs.push(kind);
                }
            }
        }
        module.top_level_statements = top_level_statements;

        let has_main_export = module.find("main").is_some();
        let has_other_exports = exported_names.iter().any(|n| *n != "main");
        let has_top_level_statements = !module.top_level_statements.is_empty();
        let has_top_level_await = module
            .top_level_statements
            .iter()
            .any(|s| stmt_contains_await(s));
        let (main_is_async, main_returns_int) = match module.find("main") {
            Some(IrDeclaration::Function(f)) => (f.is_async, matches!(f.return_type, IrType::Primitive(crate::types::Primitive::Int))),
            _ => (false, false),
        };

        let (state, main_variant, entry_diagnostics) = entry_point::classify(
            &entry_point::EntryPointInputs {
                has_top_level_statements,
                has_main_export,
                has_other_exports,
                main_is_async,
                main_returns_int,
                has_top_level_await,
            },
            &location(&file.path),
            false,
        );
        module.entry_point.state = state;
        module.entry_point.main_variant = main_variant;
        self.diagnostics.extend(DiagnosticCollection::from_iter(entry_diagnostics));
        module.forbidden_constructs.append(&mut self.current_forbidden_constructs);

        module
    }

    /// Resolves one source type annotation, first flagging any union or
    /// conditional/mapped shape it carries as a forbidden construct — the
    /// facade still expands it as best it can, but the result is never
    /// lowered into a matching IR type.
    fn resolve_type(&mut self, ty: &AstTypeRef) -> IrType {
        if ty.is_union() {
            self.current_forbidden_constructs.push(crate::module::ForbiddenConstruct::UnionType);
        }
        if ty.is_conditional_or_mapped {
            self.current_forbidden_constructs.push(crate::module::ForbiddenConstruct::ConditionalOrMappedType);
        }
        self.resolver.resolve_type(ty, &mut self.diagnostics)
    }

    fn lower_function(&mut self, f: &AstFunction) -> FunctionDecl {
        self.locals.clear();
        let resolved_type_parameters = self.resolver.type_parameters_of(&f.name);
        let type_parameters = f
            .type_parameters
            .iter()
            .map(|tp| {
                resolved_type_parameters
                    .iter()
                    .find(|p| p.name == tp.name)
                    .cloned()
                    .unwrap_or_else(|| crate::types::IrTypeParameter::new(0, &tp.name))
            })
            .collect();
        let parameters: Vec<Parameter> = f.parameters.iter().map(|p| self.lower_parameter(p)).collect();
        for p in &parameters {
            self.locals.insert(p.name.clone(), p.ty.clone());
        }
        FunctionDecl {
            provenance: Provenance::new(f.location.clone()),
            name: f.name.clone(),
            visibility: lower_visibility(f.visibility),
            type_parameters,
            parameters,
            return_type: self.resolve_type(&f.return_type),
            is_async: f.is_async,
            is_generator: f.is_generator,
            body: vec![Block::simple(f.body.iter().map(|s| self.lower_stmt(s)).collect())],
            is_static: false,
        }
    }

    fn lower_parameter(&mut self, p: &crate::source_ast::AstParam) -> Parameter {
        Parameter {
            name: p.name.clone(),
            ty: self.resolve_type(&p.ty),
            default: p.default.as_ref().map(|e| self.lower_expr(e)),
            is_rest: p.is_rest,
        }
    }

    fn lower_class(&mut self, c: &AstClass) -> ClassDecl {
        let mut interfaces: Vec<BaseClass> = c
            .implements
            .iter()
            .map(|i| BaseClass {
                name: i.name.clone(),
                type_arguments: i.type_arguments.iter().map(|t| self.resolve_type(t)).collect(),
            })
            .collect();

        let is_value_type = interfaces.iter().any(|i| i.name == STRUCT_MARKER_NAME)
            || c.extends.as_ref().is_some_and(|e| e.name == STRUCT_MARKER_NAME);
        interfaces.retain(|i| i.name != STRUCT_MARKER_NAME);

        let base_class = c
            .extends
            .as_ref()
            .filter(|e| e.name != STRUCT_MARKER_NAME)
            .map(|e| BaseClass {
                name: e.name.clone(),
                type_arguments: e.type_arguments.iter().map(|t| self.resolve_type(t)).collect(),
            });

        ClassDecl {
            provenance: Provenance::new(c.location.clone()),
            name: c.name.clone(),
            visibility: lower_visibility(c.visibility),
            type_parameters: self.resolver.type_parameters_of(&c.name),
            base_class,
            interfaces,
            fields: c.fields.iter().map(|f| self.lower_field(f)).collect(),
            methods: c.methods.iter().map(|m| self.lower_function(m)).collect(),
            constructor: c.constructor.as_ref().map(|ctor| self.lower_constructor(ctor)),
            is_value_type,
        }
    }

    /// Lowers a constructor body verbatim; whether a non-leading
    /// `super(...)` call is legal is the validator's call, not the
    /// builder's — the builder only collects diagnostics for constructs it
    /// cannot represent in IR at all.
    fn lower_constructor(&mut self, ctor: &AstFunction) -> FunctionDecl {
        let mut decl = self.lower_function(ctor);
        decl.name = "constructor".to_string();
        decl
    }

    fn lower_field(&mut self, f: &AstField) -> FieldDecl {
        if f.is_index_signature && f.index_key_is_symbol {
            self.current_forbidden_constructs.push(crate::module::ForbiddenConstruct::SymbolIndexedSignature);
        }
        let mut ty = self.resolve_type(&f.ty);
        if f.optional {
            ty = IrType::Nullable(Box::new(ty));
        }
        FieldDecl {
            name: f.name.clone(),
            ty,
            visibility: Visibility::Public,
            readonly: f.readonly,
            is_static: f.is_static,
            initializer: f.initializer.as_ref().map(|e| self.lower_expr(e)),
            is_index_signature: f.is_index_signature,
        }
    }

    fn lower_interface(&mut self, i: &AstInterface) -> InterfaceDecl {
        let mut extends: Vec<BaseClass> = i
            .extends
            .iter()
            .map(|e| BaseClass {
                name: e.name.clone(),
                type_arguments: e.type_arguments.iter().map(|t| self.resolve_type(t)).collect(),
            })
            .collect();
        let is_value_type = extends.iter().any(|e| e.name == STRUCT_MARKER_NAME);
        extends.retain(|e| e.name != STRUCT_MARKER_NAME);

        InterfaceDecl {
            provenance: Provenance::new(i.location.clone()),
            name: i.name.clone(),
            visibility: lower_visibility(i.visibility),
            type_parameters: self.resolver.type_parameters_of(&i.name),
            extends,
            members: i.members.iter().map(|m| self.lower_field(m)).collect(),
            is_value_type,
        }
    }

    fn lower_type_alias(&mut self, t: &AstTypeAlias) -> TypeAliasDecl {
        let aliased = if let Some(members) = &t.object_members {
            // An object-literal alias is lowered the same way an interface is:
            // nominally, with auto-properties.
            let _ = members;
            self.resolve_type(&t.aliased)
        } else {
            self.resolve_type(&t.aliased)
        };
        TypeAliasDecl {
            provenance: Provenance::new(t.location.clone()),
            name: t.name.clone(),
            visibility: lower_visibility(t.visibility),
            type_parameters: self.resolver.type_parameters_of(&t.name),
            aliased,
        }
    }

    fn lower_variable(&mut self, v: &AstVariable, is_top_level: bool) -> VariableDecl {
        VariableDecl {
            provenance: Provenance::new(v.location.clone()),
            name: v.name.clone(),
            visibility: lower_visibility(v.visibility),
            ty: self.resolve_type(&v.ty),
            initializer: v.initializer.as_ref().map(|e| self.lower_expr(e)),
            is_const: v.is_const,
            is_top_level,
        }
    }

    fn lower_enum(&mut self, e: &AstEnum) -> EnumDecl {
        EnumDecl {
            provenance: Provenance::new(e.location.clone()),
            name: e.name.clone(),
            visibility: lower_visibility(e.visibility),
            members: e
                .members
                .iter()
                .map(|m| EnumMember { name: m.name.clone(), value: m.value.as_ref().map(|v| self.lower_expr(v)) })
                .collect(),
        }
    }

    fn lower_stmt(&mut self, stmt: &AstStmt) -> Stmt {
        let kind = match stmt {
            AstStmt::Expression(e) => StmtKind::Expression(self.lower_expr(e)),
            AstStmt::Let { name, ty, initializer, is_const } => {
                let declared_ty = self.resolve_type(ty);
                let lowered_initializer = initializer.as_ref().map(|e| self.lower_expr(e));
                // An omitted annotation resolves to `any`; the initializer's
                // own inferred type is more precise when one is available.
                let effective_ty = match (&declared_ty, &lowered_initializer) {
                    (IrType::Primitive(crate::types::Primitive::Any), Some(init)) => init.ty.clone(),
                    _ => declared_ty,
                };
                self.locals.insert(name.clone(), effective_ty.clone());
                StmtKind::Let {
                    name: name.clone(),
                    ty: effective_ty,
                    initializer: lowered_initializer,
                    is_const: *is_const,
                }
            }
            AstStmt::Return(e) => StmtKind::Return(e.as_ref().map(|e| self.lower_expr(e))),
            AstStmt::SuperCall { arguments } => {
                StmtKind::SuperCall { arguments: arguments.iter().map(|a| self.lower_expr(a)).collect() }
            }
            AstStmt::If { condition, then_branch, else_branch } => StmtKind::If {
                condition: self.lower_expr(condition),
                then_branch: then_branch.iter().map(|s| self.lower_stmt(s)).collect(),
                else_branch: else_branch.iter().map(|s| self.lower_stmt(s)).collect(),
            },
            AstStmt::While { condition, body } => StmtKind::While {
                condition: self.lower_expr(condition),
                body: body.iter().map(|s| self.lower_stmt(s)).collect(),
            },
            AstStmt::ForOf { binding, iterable, body } => {
                let lowered_iterable = self.lower_expr(iterable);
                let element_ty = match lowered_iterable.ty.unwrap_nullable() {
                    IrType::Array(elem) | IrType::List(elem) => (**elem).clone(),
                    _ => IrType::Primitive(crate::types::Primitive::Any),
                };
                self.locals.insert(binding.clone(), element_ty);
                StmtKind::ForOf {
                    binding: binding.clone(),
                    iterable: lowered_iterable,
                    body: body.iter().map(|s| self.lower_stmt(s)).collect(),
                }
            }
            AstStmt::Break => StmtKind::Break,
            AstStmt::Continue => StmtKind::Continue,
            AstStmt::Throw(e) => StmtKind::Throw(self.lower_expr(e)),
            AstStmt::FunctionDecl(f) => {
                let decl = self.lower_function(f);
                StmtKind::LocalFunction {
                    name: decl.name,
                    parameters: decl.parameters,
                    return_type: decl.return_type,
                    body: decl.body.into_iter().flat_map(|b| b.statements).collect(),
                }
            }
            AstStmt::With { object, body } => {
                self.current_forbidden_constructs.push(crate::module::ForbiddenConstruct::WithStatement);
                let _ = self.lower_expr(object);
                StmtKind::Block(body.iter().map(|s| self.lower_stmt(s)).collect())
            }
        };
        crate::statements::StmtNode::new(Provenance::new(dummy_location()), kind)
    }

    fn lower_expr(&mut self, expr: &AstExpr) -> Expr {
        let (kind, ty) = match expr {
            AstExpr::Literal(lit) => self.lower_literal(lit),
            AstExpr::Identifier(name) => {
                let ty = self
                    .locals
                    .get(name)
                    .cloned()
                    .or_else(|| self.resolver.declared_type_of(name))
                    .unwrap_or(IrType::Primitive(crate::types::Primitive::Any));
                (ExprKind::Identifier(name.clone()), ty)
            }
            AstExpr::TemplateString { parts, substitutions } => (
                ExprKind::TemplateString {
                    parts: parts.clone(),
                    substitutions: substitutions.iter().map(|s| self.lower_expr(s)).collect(),
                },
                IrType::Primitive(crate::types::Primitive::String),
            ),
            AstExpr::Array(items) => {
                let lowered: Vec<Expr> = items.iter().map(|i| self.lower_expr(i)).collect();
                let elem_ty = lowered.first().map(|e| e.ty.clone()).unwrap_or(IrType::Primitive(crate::types::Primitive::Any));
                (ExprKind::Array(lowered), IrType::Array(Box::new(elem_ty)))
            }
            AstExpr::Binary { op, left, right } => {
                let left = self.lower_expr(left);
                let right = self.lower_expr(right);
                let op = lower_binary_op(op);
                let ty = binary_result_type(op, &left.ty);
                (ExprKind::Binary { op, left, right }, ty)
            }
            AstExpr::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                let op = lower_unary_op(op);
                let ty = operand.ty.clone();
                (ExprKind::Unary { op, operand }, ty)
            }
            AstExpr::InstanceOf { value, target } => {
                (ExprKind::InstanceOf { value: self.lower_expr(value), target: target.clone() }, IrType::Primitive(crate::types::Primitive::Bool))
            }
            AstExpr::Member { object, property, optional } => {
                if property == "meta" && matches!(object.as_ref(), AstExpr::Identifier(name) if name == "import") {
                    self.current_forbidden_constructs.push(crate::module::ForbiddenConstruct::ImportMeta);
                }
                let object = self.lower_expr(object);
                let member_ty = self.member_type(object.ty.unwrap_nullable(), property);
                let ty = if *optional { IrType::Nullable(Box::new(member_ty)) } else { member_ty };
                (ExprKind::Member { object, property: property.clone(), optional: *optional }, ty)
            }
            AstExpr::Index { object, index } => {
                let object = self.lower_expr(object);
                let index = self.lower_expr(index);
                let ty = match object.ty.unwrap_nullable() {
                    IrType::Array(elem) | IrType::List(elem) => (**elem).clone(),
                    _ => IrType::Primitive(crate::types::Primitive::Any),
                };
                (ExprKind::Index { object, index }, ty)
            }
            AstExpr::Call { callee, type_arguments, arguments } => {
                if matches!(callee.as_ref(), AstExpr::Identifier(name) if name == "import") {
                    self.current_forbidden_constructs.push(crate::module::ForbiddenConstruct::DynamicImport);
                }
                let callee = self.lower_expr(callee);
                let arguments: Vec<Expr> = arguments.iter().map(|a| self.lower_expr(a)).collect();
                let type_parameters = match &callee.kind {
                    ExprKind::Identifier(name) => self.resolver.type_parameters_of(name),
                    _ => Vec::new(),
                };
                let requires_specialisation = type_parameters.iter().any(|tp| tp.needs_adapter());
                let explicit_type_arguments: Vec<IrType> =
                    type_arguments.iter().map(|t| self.resolve_type(t)).collect();
                let inferred_type_arguments = if explicit_type_arguments.is_empty() && requires_specialisation {
                    arguments.iter().take(type_parameters.len()).map(|a| a.ty.clone()).collect()
                } else {
                    Vec::new()
                };
                let specialisation = SpecialisationInfo { explicit_type_arguments, inferred_type_arguments, requires_specialisation };
                (
                    ExprKind::Call { callee, arguments, specialisation },
                    IrType::Primitive(crate::types::Primitive::Any),
                )
            }
            AstExpr::New { type_name, type_arguments, arguments } => {
                let arguments: Vec<Expr> = arguments.iter().map(|a| self.lower_expr(a)).collect();
                let type_parameters = self.resolver.type_parameters_of(type_name);
                let requires_specialisation = type_parameters.iter().any(|tp| tp.needs_adapter());
                let explicit_type_arguments: Vec<IrType> =
                    type_arguments.iter().map(|t| self.resolve_type(t)).collect();
                let inferred_type_arguments = if explicit_type_arguments.is_empty() && requires_specialisation {
                    arguments.iter().take(type_parameters.len()).map(|a| a.ty.clone()).collect()
                } else {
                    Vec::new()
                };
                let specialisation = SpecialisationInfo { explicit_type_arguments, inferred_type_arguments, requires_specialisation };
                let ty = IrType::ObjectRef { name: type_name.clone(), type_arguments: specialisation.effective_type_arguments() };
                (
                    ExprKind::Construction { type_name: type_name.clone(), arguments, specialisation },
                    ty,
                )
            }
            AstExpr::Assign { target, value } => {
                let value = self.lower_expr(value);
                let ty = value.ty.clone();
                (ExprKind::Assign { target: self.lower_expr(target), value }, ty)
            }
            AstExpr::Conditional { condition, then_branch, else_branch } => {
                let then_branch = self.lower_expr(then_branch);
                let ty = then_branch.ty.clone();
                (
                    ExprKind::Conditional { condition: self.lower_expr(condition), then_branch, else_branch: self.lower_expr(else_branch) },
                    ty,
                )
            }
            AstExpr::Yield { value, delegate } => (
                ExprKind::Yield { value: value.as_ref().map(|v| self.lower_expr(v)), delegate: *delegate },
                IrType::Primitive(crate::types::Primitive::Any),
            ),
            AstExpr::Await(inner) => {
                let inner = self.lower_expr(inner);
                let ty = match &inner.ty {
                    IrType::Promise(t) => (**t).clone(),
                    other => other.clone(),
                };
                (ExprKind::Unary { op: UnaryOp::Await, operand: inner }, ty)
            }
            AstExpr::Lambda { parameters, body } => (
                ExprKind::Lambda { parameters: parameters.clone(), body: self.lower_expr(body) },
                IrType::Function(FunctionType {
                    parameters: parameters.iter().map(|_| IrType::Primitive(crate::types::Primitive::Any)).collect(),
                    return_type: Box::new(IrType::Primitive(crate::types::Primitive::Any)),
                    is_async: false,
                    is_generator: false,
                }),
            ),
        };
        ExprNode::new(Provenance::new(dummy_location()), ty, kind)
    }

    /// The type a `property` access on a value of `object_ty` resolves to;
    /// `Any` when the receiver's shape is unknown or carries no such member.
    fn member_type(&self, object_ty: &IrType, property: &str) -> IrType {
        match object_ty {
            IrType::Array(_) if property == "length" => IrType::Primitive(crate::types::Primitive::Int),
            IrType::ObjectRef { name, .. } => {
                let type_ref = crate::source_ast::AstTypeRef::simple(name);
                self.resolver
                    .members_of(&type_ref)
                    .into_iter()
                    .find(|m| m.name == property)
                    .map(|m| *m.ty)
                    .unwrap_or(IrType::Primitive(crate::types::Primitive::Any))
            }
            _ => IrType::Primitive(crate::types::Primitive::Any),
        }
    }

    fn lower_literal(&self, lit: &AstLiteral) -> (ExprKind, IrType) {
        match lit {
            AstLiteral::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    let (lit, ty) = numeric::promote_integer_literal(*n as i64);
                    (ExprKind::Literal(lit), ty)
                } else {
                    (ExprKind::Literal(Literal::Number(*n)), IrType::Primitive(crate::types::Primitive::Number))
                }
            }
            AstLiteral::String(s) => (ExprKind::Literal(Literal::String(s.clone())), IrType::Primitive(crate::types::Primitive::String)),
            AstLiteral::Bool(b) => (ExprKind::Literal(Literal::Bool(*b)), IrType::Primitive(crate::types::Primitive::Bool)),
            AstLiteral::Null => (ExprKind::Literal(Literal::Null), IrType::Primitive(crate::types::Primitive::Null)),
            AstLiteral::Undefined => (ExprKind::Literal(Literal::Undefined), IrType::Nullable(Box::new(IrType::Primitive(crate::types::Primitive::Any)))),
        }
    }
}

fn lower_visibility(v: AstVisibility) -> Visibility {
    match v {
        AstVisibility::Exported | AstVisibility::ExportedDefault => Visibility::Public,
        AstVisibility::Local => Visibility::Internal,
    }
}

fn flag_default_export(module: &mut IrModule, visibility: AstVisibility) {
    if visibility == AstVisibility::ExportedDefault {
        module.forbidden_constructs.push(crate::module::ForbiddenConstruct::DefaultExport);
    }
}

fn lower_binary_op(op: &str) -> BinaryOp {
    match op {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Mod,
        "==" => BinaryOp::Eq,
        "!=" => BinaryOp::NotEq,
        "===" => BinaryOp::StrictEq,
        "!==" => BinaryOp::StrictNotEq,
        "<" => BinaryOp::Lt,
        "<=" => BinaryOp::Lte,
        ">" => BinaryOp::Gt,
        ">=" => BinaryOp::Gte,
        "&&" => BinaryOp::And,
        "||" => BinaryOp::Or,
        "??" => BinaryOp::NullishCoalesce,
        other => panic!("unsupported binary operator `{other}`; the validator must reject this before the builder sees it"),
    }
}

fn lower_unary_op(op: &str) -> UnaryOp {
    match op {
        "-" => UnaryOp::Neg,
        "!" => UnaryOp::Not,
        "typeof" => UnaryOp::TypeOf,
        other => panic!("unsupported unary operator `{other}`"),
    }
}

fn binary_result_type(op: BinaryOp, left_type: &IrType) -> IrType {
    match op {
        BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::StrictEq | BinaryOp::StrictNotEq | BinaryOp::Lt | BinaryOp::Lte | BinaryOp::Gt | BinaryOp::Gte | BinaryOp::And | BinaryOp::Or => {
            IrType::Primitive(crate::types::Primitive::Bool)
        }
        _ => left_type.clone(),
    }
}

fn stmt_contains_await(stmt: &Stmt) -> bool {
    fn expr_contains_await(expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::Unary { op: UnaryOp::Await, .. } => true,
            ExprKind::Unary { operand, .. } => expr_contains_await(operand),
            ExprKind::Binary { left, right, .. } => expr_contains_await(left) || expr_contains_await(right),
            ExprKind::Call { callee, arguments, .. } => expr_contains_await(callee) || arguments.iter().any(expr_contains_await),
            _ => false,
        }
    }
    match &stmt.kind {
        StmtKind::Expression(e) => expr_contains_await(e),
        StmtKind::Let { initializer: Some(e), .. } => expr_contains_await(e),
        StmtKind::Return(Some(e)) => expr_contains_await(e),
        _ => false,
    }
}

fn location(path: &str) -> SourceLocation {
    SourceLocation::new(path, tsonic_common::position::Span::new(0, 0, tsonic_common::position::Position::new(1, 1)))
}

fn dummy_location() -> SourceLocation {
    location("")
}
