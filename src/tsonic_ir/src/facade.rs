//! The boundary the IR Builder uses to reach the Type Checker. Defined here
//! (rather than in the checker crate) so both the checker and the builder
//! can depend on it without a dependency cycle: the checker crate
//! implements this trait and depends on `tsonic_ir` for the return types.

use tsonic_common::diagnostics::DiagnosticCollection;

use crate::source_ast::{AstTypeRef, SourceFile};
use crate::types::{IrType, IrTypeParameter, StructuralMember};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSymbol {
    pub declaring_module: String,
    pub name: String,
}

/// The single boundary to the Type Checker, the Type System Facade. State
/// is per-compilation; implementations must not hold global mutable state.
pub trait TypeResolver {
    /// Resolves a source type annotation to an IR type, expanding alias
    /// chains and conditional/mapped types. Guards recursive expansion with
    /// an internal depth cap, reporting `TSN7202` into `diagnostics` when it
    /// is exceeded rather than looping.
    fn resolve_type(&self, ast_type: &AstTypeRef, diagnostics: &mut DiagnosticCollection) -> IrType;

    fn type_parameters_of(&self, declaration_name: &str) -> Vec<IrTypeParameter>;

    /// The flattened member list of a (possibly structural) object type,
    /// used by the adapter generator to build `__Constraint_T_<hash>`.
    fn members_of(&self, ast_type: &AstTypeRef) -> Vec<StructuralMember>;

    /// The "type at node" query for a named module-level declaration
    /// (function, class, variable, ...): the type an `Identifier` referring
    /// to it resolves to. `None` when `name` names no registered
    /// declaration, e.g. a local binding the IR builder tracks itself.
    fn declared_type_of(&self, name: &str) -> Option<IrType>;

    fn is_assignable_to(&self, from: &IrType, to: &IrType) -> bool;

    fn is_structural_supertype_of(&self, super_type: &AstTypeRef, sub_type: &AstTypeRef) -> bool;

    fn resolve_symbol(&self, name: &str, from_module: &str) -> Option<ResolvedSymbol>;

    /// Registers a module's sources with the checker session; called once
    /// per module before any other facade method is used against it.
    fn register_module(&mut self, file: &SourceFile);
}
