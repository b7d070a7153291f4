//! The validator's rule framework: a fixed, deterministically-ordered list
//! of checks run once per module between IR building and emission, split
//! into a `Rule` trait and a per-module `ValidationSession`.

use tsonic_common::diagnostics::DiagnosticCollection;
use tsonic_ir::module::IrModule;

pub struct ValidationSession<'a> {
    pub module: &'a IrModule,
    pub diagnostics: DiagnosticCollection,
}

impl<'a> ValidationSession<'a> {
    pub fn new(module: &'a IrModule) -> Self {
        Self { module, diagnostics: DiagnosticCollection::new() }
    }
}

pub trait Rule {
    fn name(&self) -> &'static str;
    fn check(&self, session: &mut ValidationSession);
}

/// Runs every rule, in registration order, against every module, in the
/// order the modules are given (callers pass them in source-file order so
/// the resulting diagnostics stay deterministic).
pub fn run_all<'a>(rules: &[Box<dyn Rule>], modules: impl IntoIterator<Item = &'a IrModule>) -> DiagnosticCollection {
    let mut all = DiagnosticCollection::new();
    for module in modules {
        let mut session = ValidationSession::new(module);
        for rule in rules {
            rule.check(&mut session);
        }
        all.extend(session.diagnostics);
    }
    all
}
