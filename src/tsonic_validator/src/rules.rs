//! Concrete validator rules.

use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode};
use tsonic_ir::declarations::IrDeclaration;
use tsonic_ir::expressions::{Expr, ExprKind, SpecialisationInfo};
use tsonic_ir::module::ForbiddenConstruct;
use tsonic_ir::statements::StmtKind;
use tsonic_ir::types::IrType;

use crate::framework::{Rule, ValidationSession};

/// One `Rule` per `ForbiddenConstruct` the builder can record; each reports
/// its code once per module that used the construct at least once.
macro_rules! forbidden_construct_rule {
    ($rule_name:ident, $name:literal, $construct:ident, $code:ident) => {
        pub struct $rule_name;

        impl Rule for $rule_name {
            fn name(&self) -> &'static str {
                $name
            }

            fn check(&self, session: &mut ValidationSession) {
                if session.module.forbidden_constructs.contains(&ForbiddenConstruct::$construct) {
                    session.diagnostics.push(Diagnostic::new(DiagnosticCode::$code, None));
                }
            }
        }
    };
}

forbidden_construct_rule!(ReExportRule, "re-export", ReExport, TSN3001);
forbidden_construct_rule!(DefaultExportRule, "default-export", DefaultExport, TSN3002);
forbidden_construct_rule!(NamespaceReExportRule, "namespace-re-export", NamespaceReExport, TSN3004);
forbidden_construct_rule!(WithStatementRule, "with-statement", WithStatement, TSN3005);
forbidden_construct_rule!(UnionTypeRule, "union-type", UnionType, TSN3006);
forbidden_construct_rule!(ConditionalOrMappedTypeRule, "conditional-or-mapped-type", ConditionalOrMappedType, TSN3007);
forbidden_construct_rule!(SymbolIndexedSignatureRule, "symbol-indexed-signature", SymbolIndexedSignature, TSN3008);

/// `import(...)` and `import.meta` share one code; either recorded
/// construct is enough to flag it.
pub struct DynamicImportRule;

impl Rule for DynamicImportRule {
    fn name(&self) -> &'static str {
        "dynamic-import"
    }

    fn check(&self, session: &mut ValidationSession) {
        let uses_dynamic_import = session
            .module
            .forbidden_constructs
            .iter()
            .any(|c| matches!(c, ForbiddenConstruct::DynamicImport | ForbiddenConstruct::ImportMeta));
        if uses_dynamic_import {
            session.diagnostics.push(Diagnostic::new(DiagnosticCode::TSN3003, None));
        }
    }
}

const PROMISE_CHAIN_METHODS: &[&str] = &["then", "catch", "finally"];

/// `.then()`/`.catch()`/`.finally()` on a value the builder resolved to a
/// `Promise<T>`; this subset's async model only supports `await`.
pub struct PromiseChainingMethodRule;

impl PromiseChainingMethodRule {
    fn walk(expr: &Expr, diagnostics: &mut tsonic_common::diagnostics::DiagnosticCollection) {
        if let ExprKind::Call { callee, arguments, .. } = &expr.kind {
            if let ExprKind::Member { object, property, .. } = &callee.kind {
                if matches!(object.ty, IrType::Promise(_)) && PROMISE_CHAIN_METHODS.contains(&property.as_str()) {
                    diagnostics.push(Diagnostic::new(DiagnosticCode::TSN3010, None));
                }
            }
            Self::walk(callee, diagnostics);
            arguments.iter().for_each(|a| Self::walk(a, diagnostics));
        }
    }
}

impl Rule for PromiseChainingMethodRule {
    fn name(&self) -> &'static str {
        "promise-chaining-method"
    }

    fn check(&self, session: &mut ValidationSession) {
        walk_all_function_bodies(session, Self::walk);
    }
}

/// `generator.throw(...)` injected into a suspended generator from the
/// outside; this subset lowers generators to iterator state machines that
/// cannot resume into an injected exception.
pub struct GeneratorThrowRule;

impl GeneratorThrowRule {
    fn walk(expr: &Expr, diagnostics: &mut tsonic_common::diagnostics::DiagnosticCollection) {
        if let ExprKind::Call { callee, arguments, .. } = &expr.kind {
            if let ExprKind::Member { object, property, .. } = &callee.kind {
                if matches!(object.ty, IrType::Generator(_)) && property == "throw" {
                    diagnostics.push(Diagnostic::new(DiagnosticCode::TSN3011, None));
                }
            }
            Self::walk(callee, diagnostics);
            arguments.iter().for_each(|a| Self::walk(a, diagnostics));
        }
    }
}

impl Rule for GeneratorThrowRule {
    fn name(&self) -> &'static str {
        "generator-throw"
    }

    fn check(&self, session: &mut ValidationSession) {
        walk_all_function_bodies(session, Self::walk);
    }
}

/// Shared traversal the expression-level rules use to visit every
/// expression reachable from a module's function and method bodies.
fn walk_all_function_bodies(session: &mut ValidationSession, visit: fn(&Expr, &mut tsonic_common::diagnostics::DiagnosticCollection)) {
    fn walk_stmt(stmt: &tsonic_ir::statements::Stmt, visit: fn(&Expr, &mut tsonic_common::diagnostics::DiagnosticCollection), diagnostics: &mut tsonic_common::diagnostics::DiagnosticCollection) {
        match &stmt.kind {
            StmtKind::Expression(e) | StmtKind::Throw(e) => visit(e, diagnostics),
            StmtKind::Let { initializer: Some(e), .. } => visit(e, diagnostics),
            StmtKind::Return(Some(e)) => visit(e, diagnostics),
            StmtKind::If { condition, then_branch, else_branch } => {
                visit(condition, diagnostics);
                then_branch.iter().for_each(|s| walk_stmt(s, visit, diagnostics));
                else_branch.iter().for_each(|s| walk_stmt(s, visit, diagnostics));
            }
            StmtKind::While { condition, body } | StmtKind::ForOf { iterable: condition, body, .. } => {
                visit(condition, diagnostics);
                body.iter().for_each(|s| walk_stmt(s, visit, diagnostics));
            }
            StmtKind::Block(body) => body.iter().for_each(|s| walk_stmt(s, visit, diagnostics)),
            _ => {}
        }
    }

    for decl in &session.module.declarations {
        let functions: Vec<&tsonic_ir::declarations::FunctionDecl> = match decl {
            IrDeclaration::Function(f) => vec![f],
            IrDeclaration::Class(c) => c.methods.iter().chain(c.constructor.as_ref()).collect(),
            _ => continue,
        };
        for function in functions {
            for block in &function.body {
                for stmt in &block.statements {
                    walk_stmt(stmt, visit, &mut session.diagnostics);
                }
            }
        }
    }
}

/// `super(...)` must be the first statement of a constructor body.
pub struct SuperCallFirstStatementRule;

impl Rule for SuperCallFirstStatementRule {
    fn name(&self) -> &'static str {
        "super-call-first-statement"
    }

    fn check(&self, session: &mut ValidationSession) {
        for decl in &session.module.declarations {
            let IrDeclaration::Class(class) = decl else { continue };
            let Some(ctor) = &class.constructor else { continue };
            let Some(block) = ctor.body.first() else { continue };
            for (i, stmt) in block.statements.iter().enumerate() {
                if matches!(stmt.kind, StmtKind::SuperCall { .. }) && i != 0 {
                    session.diagnostics.push(
                        Diagnostic::new(DiagnosticCode::TSN3012, None)
                            .with_location(stmt.provenance.location.clone()),
                    );
                }
            }
        }
    }
}

/// A file's exported symbol name may not equal the file's derived class name.
pub struct FileNameExportCollisionRule;

impl Rule for FileNameExportCollisionRule {
    fn name(&self) -> &'static str {
        "file-name-export-collision"
    }

    fn check(&self, session: &mut ValidationSession) {
        let class_name = &session.module.class_name;
        for decl in &session.module.declarations {
            if decl.name() == class_name {
                session.diagnostics.push(
                    Diagnostic::new(DiagnosticCode::TSN3013, None)
                        .with_location(decl.provenance().location.clone()),
                );
            }
        }
    }
}

/// Function/class type parameters whose trailing rest parameter is itself
/// generic can't be expressed by the target's native generics.
pub struct VariadicGenericConstraintRule;

impl Rule for VariadicGenericConstraintRule {
    fn name(&self) -> &'static str {
        "variadic-generic-constraint"
    }

    fn check(&self, session: &mut ValidationSession) {
        for decl in &session.module.declarations {
            let functions: Vec<&tsonic_ir::declarations::FunctionDecl> = match decl {
                IrDeclaration::Function(f) => vec![f],
                IrDeclaration::Class(c) => c.methods.iter().chain(c.constructor.as_ref()).collect(),
                _ => continue,
            };
            for function in functions {
                if function.type_parameters.is_empty() {
                    continue;
                }
                if let Some(last) = function.parameters.last() {
                    if last.is_rest && matches!(last.ty, IrType::TypeParameterRef { .. }) {
                        session.diagnostics.push(
                            Diagnostic::new(DiagnosticCode::TSN7105, None)
                                .with_location(function.provenance.location.clone()),
                        );
                    }
                }
            }
        }
    }
}

/// A structural constraint member typed as a function or generator can't be
/// represented by the adapter's getter-only property shape.
pub struct UnsupportedStructuralConstraintRule;

impl Rule for UnsupportedStructuralConstraintRule {
    fn name(&self) -> &'static str {
        "unsupported-structural-constraint-shape"
    }

    fn check(&self, session: &mut ValidationSession) {
        for decl in &session.module.declarations {
            let type_parameters = match decl {
                IrDeclaration::Function(f) => &f.type_parameters,
                IrDeclaration::Class(c) => &c.type_parameters,
                IrDeclaration::Interface(i) => &i.type_parameters,
                IrDeclaration::TypeAlias(t) => &t.type_parameters,
                _ => continue,
            };
            for tp in type_parameters {
                let Some(members) = &tp.structural_constraint else { continue };
                for member in members {
                    if matches!(*member.ty, IrType::Function(_) | IrType::Generator(_)) {
                        session.diagnostics.push(
                            Diagnostic::new(DiagnosticCode::TSN7101, None)
                                .with_location(decl.provenance().location.clone()),
                        );
                    }
                }
            }
        }
    }
}

/// A call or construction flagged `requires_specialisation` must leave IR
/// building with a resolvable concrete type argument tuple.
pub struct UnsatisfiableSpecialisationRule;

impl UnsatisfiableSpecialisationRule {
    fn check_specialisation(diagnostics: &mut tsonic_common::diagnostics::DiagnosticCollection, info: &SpecialisationInfo, location: &tsonic_common::position::SourceLocation) {
        if info.requires_specialisation && info.effective_type_arguments().is_empty() {
            diagnostics.push(Diagnostic::new(DiagnosticCode::TSN7102, None).with_location(location.clone()));
        }
    }
}

impl Rule for UnsatisfiableSpecialisationRule {
    fn name(&self) -> &'static str {
        "unsatisfiable-specialisation"
    }

    fn check(&self, session: &mut ValidationSession) {
        fn walk(expr: &tsonic_ir::expressions::Expr, diagnostics: &mut tsonic_common::diagnostics::DiagnosticCollection) {
            let location = &expr.provenance.location;
            match &expr.kind {
                ExprKind::Call { callee, arguments, specialisation } => {
                    UnsatisfiableSpecialisationRule::check_specialisation(diagnostics, specialisation, location);
                    walk(callee, diagnostics);
                    arguments.iter().for_each(|a| walk(a, diagnostics));
                }
                ExprKind::Construction { arguments, specialisation, .. } => {
                    UnsatisfiableSpecialisationRule::check_specialisation(diagnostics, specialisation, location);
                    arguments.iter().for_each(|a| walk(a, diagnostics));
                }
                ExprKind::Binary { left, right, .. } => {
                    walk(left, diagnostics);
                    walk(right, diagnostics);
                }
                ExprKind::Unary { operand, .. } => walk(operand, diagnostics),
                ExprKind::Assign { target, value } => {
                    walk(target, diagnostics);
                    walk(value, diagnostics);
                }
                _ => {}
            }
        }

        fn walk_stmt(stmt: &tsonic_ir::statements::Stmt, diagnostics: &mut tsonic_common::diagnostics::DiagnosticCollection) {
            match &stmt.kind {
                StmtKind::Expression(e) | StmtKind::Throw(e) => walk(e, diagnostics),
                StmtKind::Let { initializer: Some(e), .. } => walk(e, diagnostics),
                StmtKind::Return(Some(e)) => walk(e, diagnostics),
                StmtKind::If { condition, then_branch, else_branch } => {
                    walk(condition, diagnostics);
                    then_branch.iter().for_each(|s| walk_stmt(s, diagnostics));
                    else_branch.iter().for_each(|s| walk_stmt(s, diagnostics));
                }
                StmtKind::While { condition, body } | StmtKind::ForOf { iterable: condition, body, .. } => {
                    walk(condition, diagnostics);
                    body.iter().for_each(|s| walk_stmt(s, diagnostics));
                }
                StmtKind::Block(body) => body.iter().for_each(|s| walk_stmt(s, diagnostics)),
                _ => {}
            }
        }

        for decl in &session.module.declarations {
            let functions: Vec<&tsonic_ir::declarations::FunctionDecl> = match decl {
                IrDeclaration::Function(f) => vec![f],
                IrDeclaration::Class(c) => c.methods.iter().chain(c.constructor.as_ref()).collect(),
                _ => continue,
            };
            for function in functions {
                for block in &function.body {
                    for stmt in &block.statements {
                        walk_stmt(stmt, &mut session.diagnostics);
                    }
                }
            }
        }
    }
}

/// A type alias that only ever expands into other aliases, never reaching a
/// primitive or a nominal (class/interface/enum) declaration, would make the
/// emitter recurse forever trying to print a concrete type.
pub struct RecursiveAliasWithoutBaseRule;

impl RecursiveAliasWithoutBaseRule {
    fn bottoms_out(decl: &tsonic_ir::declarations::TypeAliasDecl, session: &ValidationSession, depth: usize) -> bool {
        if depth > tsonic_common::limits::TYPE_EXPANSION_DEPTH_CAP {
            return false;
        }
        match &decl.aliased {
            IrType::ObjectRef { name, .. } => match session.module.find(name) {
                Some(IrDeclaration::TypeAlias(next)) => Self::bottoms_out(next, session, depth + 1),
                Some(_) | None => true,
            },
            _ => true,
        }
    }
}

impl Rule for RecursiveAliasWithoutBaseRule {
    fn name(&self) -> &'static str {
        "recursive-alias-without-nominal-base"
    }

    fn check(&self, session: &mut ValidationSession) {
        let aliases: Vec<tsonic_ir::declarations::TypeAliasDecl> = session
            .module
            .declarations
            .iter()
            .filter_map(|d| if let IrDeclaration::TypeAlias(t) = d { Some(t.clone()) } else { None })
            .collect();
        for alias in &aliases {
            if !Self::bottoms_out(alias, session, 0) {
                session.diagnostics.push(
                    Diagnostic::new(DiagnosticCode::TSN7201, None).with_location(alias.provenance.location.clone()),
                );
            }
        }
    }
}

/// The default, deterministic registration order the driver feeds `run_all`.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ReExportRule),
        Box::new(NamespaceReExportRule),
        Box::new(DefaultExportRule),
        Box::new(DynamicImportRule),
        Box::new(WithStatementRule),
        Box::new(UnionTypeRule),
        Box::new(ConditionalOrMappedTypeRule),
        Box::new(SymbolIndexedSignatureRule),
        Box::new(PromiseChainingMethodRule),
        Box::new(GeneratorThrowRule),
        Box::new(FileNameExportCollisionRule),
        Box::new(SuperCallFirstStatementRule),
        Box::new(UnsupportedStructuralConstraintRule),
        Box::new(UnsatisfiableSpecialisationRule),
        Box::new(VariadicGenericConstraintRule),
        Box::new(RecursiveAliasWithoutBaseRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};
    use tsonic_ir::declarations::{ClassDecl, FunctionDecl, Visibility};
    use tsonic_ir::module::IrModule;
    use tsonic_ir::provenance::Provenance;
    use tsonic_ir::statements::StmtNode;

    fn prov() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    #[test]
    fn flags_non_leading_super_call() {
        let ctor = FunctionDecl {
            provenance: prov(),
            name: "constructor".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            parameters: vec![],
            return_type: IrType::Primitive(tsonic_ir::types::Primitive::Void),
            is_async: false,
            is_generator: false,
            body: vec![tsonic_ir::declarations::Block::simple(vec![
                StmtNode::new(prov(), StmtKind::Expression(tsonic_ir::expressions::ExprNode::new(prov(), IrType::Primitive(tsonic_ir::types::Primitive::Void), ExprKind::Literal(tsonic_ir::expressions::Literal::Null)))),
                StmtNode::new(prov(), StmtKind::SuperCall { arguments: vec![] }),
            ])],
            is_static: false,
        };
        let class = ClassDecl {
            provenance: prov(),
            name: "Widget".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            base_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
            constructor: Some(ctor),
            is_value_type: false,
        };
        let mut module = IrModule::new("App", "Widget");
        module.declarations.push(IrDeclaration::Class(class));

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(SuperCallFirstStatementRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3012));
    }

    #[test]
    fn flags_file_export_collision() {
        let mut module = IrModule::new("App", "Widget");
        module.declarations.push(IrDeclaration::Enum(tsonic_ir::declarations::EnumDecl {
            provenance: prov(),
            name: "Widget".into(),
            visibility: Visibility::Public,
            members: vec![],
        }));
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(FileNameExportCollisionRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3013));
    }

    #[test]
    fn flags_mutually_recursive_aliases_with_no_nominal_base() {
        use tsonic_ir::declarations::TypeAliasDecl;

        let mut module = IrModule::new("App", "Main");
        module.declarations.push(IrDeclaration::TypeAlias(TypeAliasDecl {
            provenance: prov(),
            name: "A".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            aliased: IrType::ObjectRef { name: "B".into(), type_arguments: vec![] },
        }));
        module.declarations.push(IrDeclaration::TypeAlias(TypeAliasDecl {
            provenance: prov(),
            name: "B".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            aliased: IrType::ObjectRef { name: "A".into(), type_arguments: vec![] },
        }));

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(RecursiveAliasWithoutBaseRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN7201));
    }

    #[test]
    fn alias_resolving_to_a_class_does_not_flag() {
        use tsonic_ir::declarations::TypeAliasDecl;

        let mut module = IrModule::new("App", "Main");
        module.declarations.push(IrDeclaration::Class(ClassDecl {
            provenance: prov(),
            name: "Widget".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            base_class: None,
            interfaces: vec![],
            fields: vec![],
            methods: vec![],
            constructor: None,
            is_value_type: false,
        }));
        module.declarations.push(IrDeclaration::TypeAlias(TypeAliasDecl {
            provenance: prov(),
            name: "Alias".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            aliased: IrType::ObjectRef { name: "Widget".into(), type_arguments: vec![] },
        }));

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(RecursiveAliasWithoutBaseRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn flags_re_export() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::ReExport);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(ReExportRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3001));
    }

    #[test]
    fn namespace_re_export_does_not_trip_the_plain_re_export_rule() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::NamespaceReExport);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(ReExportRule), Box::new(NamespaceReExportRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(!diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3001));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3004));
    }

    #[test]
    fn flags_default_export() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::DefaultExport);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(DefaultExportRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3002));
    }

    #[test]
    fn flags_dynamic_import_and_import_meta_under_the_same_code() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::ImportMeta);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(DynamicImportRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert_eq!(diagnostics.errors().filter(|d| d.code == DiagnosticCode::TSN3003).count(), 1);
    }

    #[test]
    fn flags_with_statement() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::WithStatement);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(WithStatementRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3005));
    }

    #[test]
    fn flags_union_and_conditional_types_independently() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::UnionType);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(UnionTypeRule), Box::new(ConditionalOrMappedTypeRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3006));
        assert!(!diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3007));
    }

    #[test]
    fn flags_symbol_indexed_signature() {
        let mut module = IrModule::new("App", "Main");
        module.forbidden_constructs.push(ForbiddenConstruct::SymbolIndexedSignature);
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(SymbolIndexedSignatureRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3008));
    }

    fn function_returning(body: Vec<tsonic_ir::statements::Stmt>) -> FunctionDecl {
        FunctionDecl {
            provenance: prov(),
            name: "run".into(),
            visibility: Visibility::Public,
            type_parameters: vec![],
            parameters: vec![],
            return_type: IrType::Primitive(tsonic_ir::types::Primitive::Void),
            is_async: false,
            is_generator: false,
            body: vec![tsonic_ir::declarations::Block::simple(body)],
            is_static: false,
        }
    }

    fn member_call(object_ty: IrType, property: &str) -> tsonic_ir::expressions::Expr {
        use tsonic_ir::expressions::ExprNode;

        let object = ExprNode::new(prov(), object_ty, ExprKind::Identifier("value".into()));
        let callee = ExprNode::new(prov(), IrType::Primitive(tsonic_ir::types::Primitive::Any), ExprKind::Member { object, property: property.into(), optional: false });
        ExprNode::new(
            prov(),
            IrType::Primitive(tsonic_ir::types::Primitive::Any),
            ExprKind::Call { callee, arguments: vec![], specialisation: SpecialisationInfo::none() },
        )
    }

    #[test]
    fn flags_then_call_on_a_promise() {
        let promise_ty = IrType::Promise(Box::new(IrType::Primitive(tsonic_ir::types::Primitive::Void)));
        let call = member_call(promise_ty, "then");
        let function = function_returning(vec![StmtNode::new(prov(), StmtKind::Expression(call))]);

        let mut module = IrModule::new("App", "Main");
        module.declarations.push(IrDeclaration::Function(function));

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(PromiseChainingMethodRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3010));
    }

    #[test]
    fn does_not_flag_a_plain_call_on_a_promise() {
        let promise_ty = IrType::Promise(Box::new(IrType::Primitive(tsonic_ir::types::Primitive::Void)));
        let call = member_call(promise_ty, "map");
        let function = function_returning(vec![StmtNode::new(prov(), StmtKind::Expression(call))]);

        let mut module = IrModule::new("App", "Main");
        module.declarations.push(IrDeclaration::Function(function));

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(PromiseChainingMethodRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn flags_throw_call_on_a_generator() {
        let generator_ty = IrType::Generator(tsonic_ir::types::GeneratorType {
            yield_type: Box::new(IrType::Primitive(tsonic_ir::types::Primitive::Number)),
            return_type: Box::new(IrType::Primitive(tsonic_ir::types::Primitive::Void)),
            next_type: Box::new(IrType::Primitive(tsonic_ir::types::Primitive::Void)),
        });
        let call = member_call(generator_ty, "throw");
        let function = function_returning(vec![StmtNode::new(prov(), StmtKind::Expression(call))]);

        let mut module = IrModule::new("App", "Main");
        module.declarations.push(IrDeclaration::Function(function));

        let rules: Vec<Box<dyn Rule>> = vec![Box::new(GeneratorThrowRule)];
        let diagnostics = crate::framework::run_all(&rules, std::iter::once(&module));
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN3011));
    }
}
