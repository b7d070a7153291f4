//! Renders a lowered, validated, specialised `IrModule` to C# source text,
//! and a `Configuration` to its `.csproj` manifest. Pure text assembly: no
//! file I/O, no invocation of the C# compiler or MSBuild, both of which stay
//! the external Build Orchestrator's job.

pub mod banner;
pub mod decl;
pub mod expr;
pub mod manifest;
pub mod program;
pub mod stmt;
pub mod types;
pub mod using;
pub mod writer;

use tsonic_common::diagnostics::DiagnosticCollection;
use tsonic_ir::declarations::{FunctionDecl, IrDeclaration, VariableDecl};
use tsonic_ir::module::IrModule;

pub use banner::{FixedTimestamp, TimestampSource};

/// One emitted `.cs` file: a namespace-relative path and its full text.
pub struct EmittedFile {
    pub relative_path: String,
    pub contents: String,
}

fn namespace_free_declarations(module: &IrModule) -> Vec<&IrDeclaration> {
    module
        .declarations
        .iter()
        .filter(|d| matches!(d, IrDeclaration::Class(_) | IrDeclaration::Interface(_) | IrDeclaration::TypeAlias(_) | IrDeclaration::Enum(_)))
        .collect()
}

fn module_class_members<'a>(module: &'a IrModule) -> (Vec<&'a FunctionDecl>, Vec<&'a VariableDecl>) {
    let mut functions = Vec::new();
    let mut variables = Vec::new();
    for decl in &module.declarations {
        match decl {
            IrDeclaration::Function(f) => functions.push(f),
            IrDeclaration::Variable(v) => variables.push(v),
            _ => {}
        }
    }
    (functions, variables)
}

/// `using Tsonic.Runtime;` is only worth emitting when the module's rendered
/// body actually references the runtime helper namespace; cheapest way to
/// know that without threading a side-channel through every renderer is to
/// check the text that was actually produced.
fn references_runtime_helpers(body: &str) -> bool {
    body.contains("Tsonic.Runtime.")
}

pub fn emit_module(module: &IrModule, timestamps: &dyn TimestampSource) -> (EmittedFile, DiagnosticCollection) {
    let mut diagnostics = DiagnosticCollection::new();
    let mut body = writer::FmtWriter::new();

    let free_decls = namespace_free_declarations(module);
    let (functions, variables) = module_class_members(module);
    let has_module_class_body = !functions.is_empty() || !variables.is_empty() || program_has_main(module);

    let mut first = true;
    for decl in &free_decls {
        if !first {
            body.blank_line();
        }
        first = false;
        decl::render_declaration(&mut body, decl, &mut diagnostics);
    }

    if has_module_class_body {
        if !first {
            body.blank_line();
        }
        first = false;
        body.line(&format!("public static class {}", module.class_name));
        body.line("{");
        body.indent();
        let mut inner_first = true;
        for variable in &variables {
            if !inner_first {
                body.blank_line();
            }
            inner_first = false;
            body.line(&decl::render_variable(variable));
        }
        for function in &functions {
            if !inner_first {
                body.blank_line();
            }
            inner_first = false;
            decl::render_method(&mut body, function);
        }
        if !inner_first {
            body.blank_line();
        }
        program::render_main(&mut body, module);
        body.dedent();
        body.line("}");
    }

    let body_text = body.finish();
    let needs_runtime_helpers = references_runtime_helpers(&body_text);

    let mut out = writer::FmtWriter::new();
    for line in banner::render_banner(&source_path(module), timestamps) {
        out.line(&line);
    }
    out.blank_line();
    for line in using::render_using_block(&module.using_set, needs_runtime_helpers) {
        out.line(&line);
    }
    out.blank_line();
    out.line(&format!("namespace {};", module.namespace));
    out.blank_line();
    for line in body_text.lines() {
        if line.is_empty() {
            out.blank_line();
        } else {
            out.line(line);
        }
    }

    let file = EmittedFile { relative_path: format!("{}.cs", module.class_name), contents: out.finish() };
    (file, diagnostics)
}

fn program_has_main(module: &IrModule) -> bool {
    !matches!(module.entry_point.state, tsonic_ir::module::EntryPointState::NoExport)
}

fn source_path(module: &IrModule) -> String {
    format!("{}.ts", module.class_name)
}

pub fn emit_manifest(config: &tsonic_common::config::Configuration) -> String {
    manifest::render_manifest(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_ir::module::{EntryPoint, EntryPointState, MainVariant};

    #[test]
    fn emits_namespace_and_banner_for_empty_module() {
        let mut module = IrModule::new("Demo", "Program");
        module.entry_point = EntryPoint { state: EntryPointState::NoExport, main_variant: None };
        let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());
        let (file, diagnostics) = emit_module(&module, &ts);
        assert!(file.contents.contains("namespace Demo;"));
        assert!(file.contents.contains("<auto-generated"));
        assert!(diagnostics.is_empty());
        assert_eq!(file.relative_path, "Program.cs");
    }

    #[test]
    fn top_level_only_module_wraps_statements_in_class() {
        let mut module = IrModule::new("Demo", "Program");
        module.entry_point = EntryPoint { state: EntryPointState::TopLevelOnly, main_variant: None };
        let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());
        let (file, _) = emit_module(&module, &ts);
        assert!(file.contents.contains("public static class Program"));
        assert!(file.contents.contains("public static void Main(string[] args)"));
    }

    #[test]
    fn export_main_without_top_level_statements_still_wraps_class() {
        let mut module = IrModule::new("Demo", "Program");
        module.entry_point = EntryPoint { state: EntryPointState::ExportMain, main_variant: Some(MainVariant::Sync) };
        let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());
        let (file, _) = emit_module(&module, &ts);
        assert!(file.contents.contains("public static class Program"));
    }
}
