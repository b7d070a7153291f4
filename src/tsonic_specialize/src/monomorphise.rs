//! Monomorphisation: every call site flagged `requires_specialisation` gets
//! rewritten to target a mangled, fully-concrete clone of the generic
//! declaration it called, cloned and substituted exactly once per distinct
//! (declaration, argument-tuple) pair.

use std::collections::HashMap;

use log::debug;
use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use tsonic_common::limits::TYPE_EXPANSION_DEPTH_CAP;
use tsonic_ir::declarations::{FunctionDecl, IrDeclaration};
use tsonic_ir::expressions::{Expr, ExprKind};
use tsonic_ir::module::IrModule;
use tsonic_ir::statements::{Stmt, StmtKind};
use tsonic_ir::types::IrType;

use crate::mangle::mangled_name;
use crate::substitute::{substitute_stmt, Substitution};

/// Drives one module's monomorphisation pass. Templates are captured up
/// front; call sites are rewritten in a second pass, and newly generated
/// clones are appended only once that pass completes, so the template map
/// never has to be invalidated mid-walk.
pub struct Specialiser {
    templates: HashMap<String, FunctionDecl>,
    visited: HashMap<String, String>,
    generated: Vec<IrDeclaration>,
}

impl Specialiser {
    pub fn new(module: &IrModule) -> Self {
        let templates = module
            .declarations
            .iter()
            .filter_map(|d| match d {
                IrDeclaration::Function(f) if !f.type_parameters.is_empty() => Some((f.name.clone(), f.clone())),
                _ => None,
            })
            .collect();
        Self { templates, visited: HashMap::new(), generated: Vec::new() }
    }

    pub fn run(&mut self, module: &mut IrModule, diagnostics: &mut DiagnosticCollection) {
        for stmt in &mut module.top_level_statements {
            self.rewrite_stmt(stmt, diagnostics);
        }
        for decl in &mut module.declarations {
            match decl {
                IrDeclaration::Function(f) => self.rewrite_function_body(f, diagnostics),
                IrDeclaration::Class(c) => {
                    for method in &mut c.methods {
                        self.rewrite_function_body(method, diagnostics);
                    }
                    if let Some(ctor) = &mut c.constructor {
                        self.rewrite_function_body(ctor, diagnostics);
                    }
                }
                _ => {}
            }
        }
        for decl in self.generated.drain(..) {
            module.append_generated(decl);
        }
    }

    fn rewrite_function_body(&mut self, f: &mut FunctionDecl, diagnostics: &mut DiagnosticCollection) {
        for block in &mut f.body {
            for stmt in &mut block.statements {
                self.rewrite_stmt(stmt, diagnostics);
            }
        }
    }

    fn rewrite_stmt(&mut self, stmt: &mut Stmt, diagnostics: &mut DiagnosticCollection) {
        match &mut stmt.kind {
            StmtKind::Expression(e) | StmtKind::Throw(e) => self.rewrite_expr(e, diagnostics),
            StmtKind::Let { initializer: Some(e), .. } => self.rewrite_expr(e, diagnostics),
            StmtKind::Return(Some(e)) => self.rewrite_expr(e, diagnostics),
            StmtKind::SuperCall { arguments } => {
                for a in arguments {
                    self.rewrite_expr(a, diagnostics);
                }
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                self.rewrite_expr(condition, diagnostics);
                for s in then_branch {
                    self.rewrite_stmt(s, diagnostics);
                }
                for s in else_branch {
                    self.rewrite_stmt(s, diagnostics);
                }
            }
            StmtKind::While { condition, body } => {
                self.rewrite_expr(condition, diagnostics);
                for s in body {
                    self.rewrite_stmt(s, diagnostics);
                }
            }
            StmtKind::ForOf { iterable, body, .. } => {
                self.rewrite_expr(iterable, diagnostics);
                for s in body {
                    self.rewrite_stmt(s, diagnostics);
                }
            }
            StmtKind::LocalFunction { body, .. } => {
                for s in body {
                    self.rewrite_stmt(s, diagnostics);
                }
            }
            StmtKind::Block(body) => {
                for s in body {
                    self.rewrite_stmt(s, diagnostics);
                }
            }
            _ => {}
        }
    }

    fn rewrite_expr(&mut self, expr: &mut Expr, diagnostics: &mut DiagnosticCollection) {
        match &mut expr.kind {
            ExprKind::Call { callee, arguments, specialisation } => {
                self.rewrite_expr(callee, diagnostics);
                for a in arguments.iter_mut() {
                    self.rewrite_expr(a, diagnostics);
                }
                if specialisation.requires_specialisation {
                    let args = specialisation.effective_type_arguments();
                    if let ExprKind::Identifier(name) = &callee.kind {
                        if let Some(mangled) = self.specialise(name, &args, &expr.provenance.location, diagnostics) {
                            callee.kind = ExprKind::Identifier(mangled);
                            specialisation.requires_specialisation = false;
                            specialisation.explicit_type_arguments.clear();
                            specialisation.inferred_type_arguments.clear();
                        }
                    }
                }
            }
            ExprKind::Construction { arguments, .. } => {
                for a in arguments.iter_mut() {
                    self.rewrite_expr(a, diagnostics);
                }
            }
            ExprKind::TemplateString { substitutions, .. } => {
                for s in substitutions.iter_mut() {
                    self.rewrite_expr(s, diagnostics);
                }
            }
            ExprKind::Array(items) | ExprKind::Tuple(items) => {
                for i in items.iter_mut() {
                    self.rewrite_expr(i, diagnostics);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.rewrite_expr(left, diagnostics);
                self.rewrite_expr(right, diagnostics);
            }
            ExprKind::Unary { operand, .. } => self.rewrite_expr(operand, diagnostics),
            ExprKind::InstanceOf { value, .. } => self.rewrite_expr(value, diagnostics),
            ExprKind::Member { object, .. } => self.rewrite_expr(object, diagnostics),
            ExprKind::Index { object, index } => {
                self.rewrite_expr(object, diagnostics);
                self.rewrite_expr(index, diagnostics);
            }
            ExprKind::Assign { target, value } => {
                self.rewrite_expr(target, diagnostics);
                self.rewrite_expr(value, diagnostics);
            }
            ExprKind::Conditional { condition, then_branch, else_branch } => {
                self.rewrite_expr(condition, diagnostics);
                self.rewrite_expr(then_branch, diagnostics);
                self.rewrite_expr(else_branch, diagnostics);
            }
            ExprKind::Yield { value: Some(v), .. } => self.rewrite_expr(v, diagnostics),
            ExprKind::Lambda { body, .. } => self.rewrite_expr(body, diagnostics),
            _ => {}
        }
    }

    /// Returns the mangled name to call instead, generating the clone the
    /// first time this (declaration, argument-tuple) pair is seen.
    fn specialise(
        &mut self,
        declaration_name: &str,
        args: &[IrType],
        location: &tsonic_common::position::SourceLocation,
        diagnostics: &mut DiagnosticCollection,
    ) -> Option<String> {
        let Some(template) = self.templates.get(declaration_name) else { return None };
        let mangled = mangled_name(declaration_name, args);
        if self.visited.contains_key(&mangled) {
            return Some(mangled);
        }
        if self.visited.len() >= TYPE_EXPANSION_DEPTH_CAP {
            diagnostics.push(
                Diagnostic::new(DiagnosticCode::TSN7202, None)
                    .with_message(format!("monomorphisation depth cap exceeded specialising {declaration_name}"))
                    .with_location(location.clone()),
            );
            return None;
        }

        let mut subs = Substitution::new();
        for (tp, arg) in template.type_parameters.iter().zip(args.iter()) {
            subs.insert(tp.ordinal, arg.clone());
        }

        debug!("monomorphising {declaration_name} -> {mangled}");
        let clone = FunctionDecl {
            provenance: template.provenance.clone(),
            name: mangled.clone(),
            visibility: template.visibility,
            type_parameters: vec![],
            parameters: template
                .parameters
                .iter()
                .map(|p| tsonic_ir::declarations::Parameter {
                    name: p.name.clone(),
                    ty: crate::substitute::substitute_type(&p.ty, &subs),
                    default: p.default.as_ref().map(|e| crate::substitute::substitute_expr(e, &subs)),
                    is_rest: p.is_rest,
                })
                .collect(),
            return_type: crate::substitute::substitute_type(&template.return_type, &subs),
            is_async: template.is_async,
            is_generator: template.is_generator,
            body: template
                .body
                .iter()
                .map(|b| tsonic_ir::declarations::Block {
                    statements: b.statements.iter().map(|s| substitute_stmt(s, &subs)).collect(),
                    is_suspension_point: b.is_suspension_point,
                    live_state: b.live_state.clone(),
                })
                .collect(),
            is_static: template.is_static,
        };

        self.visited.insert(mangled.clone(), declaration_name.to_string());
        self.generated.push(IrDeclaration::Function(clone));
        Some(mangled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};
    use tsonic_ir::declarations::Visibility;
    use tsonic_ir::expressions::{ExprNode, Literal, SpecialisationInfo};
    use tsonic_ir::provenance::Provenance;
    use tsonic_ir::statements::StmtNode;
    use tsonic_ir::types::{IrTypeParameter, Primitive};

    fn prov() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    fn identity_template() -> FunctionDecl {
        FunctionDecl {
            provenance: prov(),
            name: "identity".into(),
            visibility: Visibility::Public,
            type_parameters: vec![IrTypeParameter::new(0, "T")],
            parameters: vec![tsonic_ir::declarations::Parameter {
                name: "v".into(),
                ty: IrType::TypeParameterRef { ordinal: 0, name: "T".into() },
                default: None,
                is_rest: false,
            }],
            return_type: IrType::TypeParameterRef { ordinal: 0, name: "T".into() },
            is_async: false,
            is_generator: false,
            body: vec![tsonic_ir::declarations::Block::simple(vec![StmtNode::new(
                prov(),
                StmtKind::Return(Some(ExprNode::new(
                    prov(),
                    IrType::TypeParameterRef { ordinal: 0, name: "T".into() },
                    ExprKind::Identifier("v".into()),
                ))),
            )])],
            is_static: false,
        }
    }

    #[test]
    fn rewrites_call_site_to_mangled_clone() {
        let mut module = IrModule::new("App", "Main");
        module.declarations.push(IrDeclaration::Function(identity_template()));

        let call = ExprNode::new(
            prov(),
            IrType::Primitive(Primitive::String),
            ExprKind::Call {
                callee: ExprNode::new(prov(), IrType::Primitive(Primitive::Any), ExprKind::Identifier("identity".into())),
                arguments: vec![ExprNode::new(prov(), IrType::Primitive(Primitive::String), ExprKind::Literal(Literal::String("a".into())))],
                specialisation: SpecialisationInfo {
                    explicit_type_arguments: vec![IrType::Primitive(Primitive::String)],
                    inferred_type_arguments: vec![],
                    requires_specialisation: true,
                },
            },
        );
        module.top_level_statements.push(StmtNode::new(prov(), StmtKind::Expression(call)));

        let mut diagnostics = DiagnosticCollection::new();
        let mut specialiser = Specialiser::new(&module);
        specialiser.run(&mut module, &mut diagnostics);

        assert!(!diagnostics.has_errors());
        let generated_names: Vec<&str> = module
            .declarations
            .iter()
            .filter_map(|d| if let IrDeclaration::Function(f) = d { Some(f.name.as_str()) } else { None })
            .collect();
        assert!(generated_names.contains(&"identity__string"));

        let StmtKind::Expression(e) = &module.top_level_statements[0].kind else { panic!("expected expression statement") };
        let ExprKind::Call { callee, specialisation, .. } = &e.kind else { panic!("expected call") };
        let ExprKind::Identifier(name) = &callee.kind else { panic!("expected identifier callee") };
        assert_eq!(name, "identity__string");
        assert!(!specialisation.requires_specialisation);
    }
}
