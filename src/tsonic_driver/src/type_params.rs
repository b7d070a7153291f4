//! Converts source-level type parameter declarations to their IR shape and
//! registers them with the checker ahead of IR building, since the builder
//! only ever reads type parameters back out by declaration name.

use tsonic_common::diagnostics::DiagnosticCollection;
use tsonic_checker::JsonMetadataChecker;
use tsonic_ir::source_ast::{AstItem, AstTypeParam};
use tsonic_ir::types::{IrTypeParameter, StructuralMember};

fn lower_type_parameter(index: usize, param: &AstTypeParam, checker: &JsonMetadataChecker, diagnostics: &mut DiagnosticCollection) -> IrTypeParameter {
    use tsonic_ir::facade::TypeResolver;

    let mut tp = IrTypeParameter::new(index, param.name.clone());
    tp.nominal_constraint = param.nominal_constraint.as_ref().map(|c| checker.resolve_type(c, diagnostics));
    tp.default = param.default.as_ref().map(|d| checker.resolve_type(d, diagnostics));
    tp.structural_constraint = param.structural_constraint.as_ref().map(|members| {
        members
            .iter()
            .map(|(name, ty, readonly)| StructuralMember {
                name: name.clone(),
                ty: Box::new(checker.resolve_type(ty, diagnostics)),
                readonly: *readonly,
            })
            .collect()
    });
    tp
}

fn lower_all(index_base: usize, params: &[AstTypeParam], checker: &JsonMetadataChecker, diagnostics: &mut DiagnosticCollection) -> Vec<IrTypeParameter> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| lower_type_parameter(index_base + i, p, checker, diagnostics))
        .collect()
}

/// Registers every declaration's type parameters from one module's items,
/// so `IrBuilder::build_module` can look them up by name while lowering.
pub fn declare_module_type_parameters(checker: &mut JsonMetadataChecker, items: &[AstItem], diagnostics: &mut DiagnosticCollection) {
    for item in items {
        match item {
            AstItem::Function(f) => {
                let lowered = lower_all(0, &f.type_parameters, checker, diagnostics);
                checker.declare_type_parameters(f.name.clone(), lowered);
            }
            AstItem::Class(c) => {
                let lowered = lower_all(0, &c.type_parameters, checker, diagnostics);
                checker.declare_type_parameters(c.name.clone(), lowered);
            }
            AstItem::Interface(i) => {
                let lowered = lower_all(0, &i.type_parameters, checker, diagnostics);
                checker.declare_type_parameters(i.name.clone(), lowered);
            }
            AstItem::TypeAlias(t) => {
                let lowered = lower_all(0, &t.type_parameters, checker, diagnostics);
                checker.declare_type_parameters(t.name.clone(), lowered);
            }
            AstItem::Variable(_) | AstItem::Enum(_) | AstItem::TopLevelStatement(_) | AstItem::ReExport(_) => {}
        }
    }
}
