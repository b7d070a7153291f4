//! Adapter & Specialisation Generator: synthesises nominal adapters for
//! structural generic constraints and monomorphised clones for every call
//! site that needs one. Runs once per module, after validation and before
//! emission, and only ever appends to a module's declaration list.

pub mod adapter;
pub mod mangle;
pub mod monomorphise;
pub mod substitute;

use tsonic_common::diagnostics::DiagnosticCollection;
use tsonic_ir::module::IrModule;

pub use adapter::synthesize_adapters;
pub use mangle::{mangle_type, mangled_name};
pub use monomorphise::Specialiser;

/// Runs both stages against one module: adapters first (type parameters may
/// need their nominal constraint rewritten before call sites referencing
/// them are mangled), then monomorphisation.
pub fn specialize_module(module: &mut IrModule) -> DiagnosticCollection {
    let mut diagnostics = DiagnosticCollection::new();
    synthesize_adapters(module);
    let mut specialiser = Specialiser::new(module);
    specialiser.run(module, &mut diagnostics);
    diagnostics
}
