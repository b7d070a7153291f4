//! Wires the Program Builder, Type System Facade, IR Builder, Validator,
//! Specialisation Generator and Emitter into one `compile` entry point.
//! This crate owns no CLI; it is a library boundary a caller (a CLI binary,
//! an MSBuild task, an editor integration) drives with its own argument
//! parsing and its own `SourceLoader` wired to the external TypeScript
//! parser.

pub mod metadata;
pub mod type_params;

use std::path::PathBuf;

use log::info;
use tsonic_checker::JsonMetadataChecker;
use tsonic_common::config::Configuration;
use tsonic_common::diagnostics::DiagnosticCollection;
use tsonic_emitter::{EmittedFile, TimestampSource};
use tsonic_ir::builder::IrBuilder;
use tsonic_ir::facade::TypeResolver;
use tsonic_ir::module::IrModule;
use tsonic_program::{build_program, Program, SourceLoader};
use tsonic_validator::default_rules;

/// Initialises `env_logger` from `RUST_LOG`. Left to the caller to invoke
/// (a CLI's `main`, a test harness) rather than run automatically, since a
/// library must never assume it owns the process-wide logger.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

pub struct CompileRequest {
    pub config: Configuration,
    pub entries: Vec<PathBuf>,
}

pub struct CompileOutcome {
    pub files: Vec<EmittedFile>,
    pub manifest: String,
    pub diagnostics: DiagnosticCollection,
}

/// Runs the whole pipeline end to end. `loader` is the caller's bridge to
/// the external TypeScript parser; `timestamps` is the caller's clock,
/// since this crate must not call the system clock directly (it would
/// break deterministic re-emission of unchanged modules).
pub fn compile(
    request: CompileRequest,
    loader: &dyn SourceLoader,
    timestamps: &dyn TimestampSource,
) -> anyhow::Result<CompileOutcome> {
    request
        .config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let registry = metadata::load_registry(&request.config.type_roots)?;
    let mut checker = JsonMetadataChecker::new(registry);

    info!("building program from {} entr{}", request.entries.len(), if request.entries.len() == 1 { "y" } else { "ies" });
    let program = build_program(
        &request.entries,
        &request.config.source_root,
        &request.config.type_roots,
        &request.config.root_namespace,
        loader,
    )
    .map_err(|diagnostics| anyhow::anyhow!(format_diagnostics(&diagnostics)))?;

    let mut diagnostics = DiagnosticCollection::new();
    let mut modules = lower_program(&program, &mut checker, &mut diagnostics);

    let validation = tsonic_validator::run_all(&default_rules(), modules.iter());
    diagnostics.extend(validation);

    for module in &mut modules {
        diagnostics.extend(tsonic_specialize::specialize_module(module));
    }

    if diagnostics.has_errors() {
        return Ok(CompileOutcome { files: Vec::new(), manifest: String::new(), diagnostics });
    }

    let mut files = Vec::with_capacity(modules.len());
    for module in &modules {
        let (file, emit_diagnostics) = tsonic_emitter::emit_module(module, timestamps);
        diagnostics.extend(emit_diagnostics);
        files.push(file);
    }

    let manifest = tsonic_emitter::emit_manifest(&request.config);

    Ok(CompileOutcome { files, manifest, diagnostics })
}

/// Lowers every module in the program, in entry-first traversal order, so
/// diagnostics stay stable across otherwise-equivalent runs.
fn lower_program(program: &Program, checker: &mut JsonMetadataChecker, diagnostics: &mut DiagnosticCollection) -> Vec<IrModule> {
    let mut modules = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut order: Vec<PathBuf> = Vec::new();
    for entry in program.entries() {
        collect_order(program, entry, &mut seen, &mut order);
    }

    for path in &order {
        let Some(source_module) = program.module_for(path) else { continue };
        checker.register_module(&source_module.ast);
        type_params::declare_module_type_parameters(checker, &source_module.ast.items, diagnostics);

        let mut builder = IrBuilder::new(&*checker);
        let module = builder.build_module(&source_module.ast, &source_module.namespace, &source_module.class_name);
        diagnostics.extend(builder.diagnostics);
        modules.push(module);
    }
    modules
}

fn collect_order(program: &Program, path: &PathBuf, seen: &mut std::collections::HashSet<PathBuf>, order: &mut Vec<PathBuf>) {
    if !seen.insert(path.clone()) {
        return;
    }
    let Some(module) = program.module_for(path) else { return };
    for import in &module.imports {
        if let Some(p) = local_import_path(import) {
            collect_order(program, p, seen, order);
        }
    }
    order.push(path.clone());
}

fn local_import_path(import: &tsonic_program::Import) -> Option<&PathBuf> {
    match import {
        tsonic_program::Import::LocalTs { resolved_path, .. } => Some(resolved_path),
        tsonic_program::Import::TypeOnly { inner } => local_import_path(inner),
        tsonic_program::Import::DotnetNamespace { .. } => None,
    }
}

fn format_diagnostics(diagnostics: &DiagnosticCollection) -> String {
    diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>().join("\n")
}
