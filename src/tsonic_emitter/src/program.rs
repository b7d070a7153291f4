//! `Main` synthesis, driven by the entry-point state machine computed during
//! IR building. Each terminal state gets its own wrapper shape; the actual
//! top-level statements and/or the author's `main` are always emitted
//! through the declaration/statement renderers, never duplicated here.

use tsonic_ir::module::{EntryPointState, IrModule, MainVariant};

use crate::stmt::render_stmt;
use crate::writer::FmtWriter;

fn main_signature(variant: &MainVariant) -> &'static str {
    match variant {
        MainVariant::Sync => "public static void Main(string[] args)",
        MainVariant::Async => "public static async Task Main(string[] args)",
        MainVariant::IntReturning => "public static int Main(string[] args)",
    }
}

/// Returns `None` when the module has no synthesized `Main` to write at all
/// (`NoExport`, or `ExportMain` where the author's own `main` method already
/// serves as the entry point and needs no wrapper).
pub fn render_main(w: &mut FmtWriter, module: &IrModule) -> bool {
    match module.entry_point.state {
        EntryPointState::NoExport => false,
        EntryPointState::ExportMain => {
            let variant = module.entry_point.main_variant.as_ref().expect("ExportMain always carries a main_variant");
            w.line(main_signature(variant));
            w.line("{");
            w.indent();
            let call = match variant {
                MainVariant::Sync => format!("{}.main(args);", module.class_name),
                MainVariant::Async => format!("await {}.main(args);", module.class_name),
                MainVariant::IntReturning => format!("return {}.main(args);", module.class_name),
            };
            w.line(&call);
            w.dedent();
            w.line("}");
            true
        }
        EntryPointState::TopLevelOnly | EntryPointState::TopLevelPlusExports => {
            w.line("public static void Main(string[] args)");
            w.line("{");
            w.indent();
            for stmt in &module.top_level_statements {
                render_stmt(w, stmt);
            }
            w.dedent();
            w.line("}");
            true
        }
        EntryPointState::TopLevelPlusMain => {
            let variant = module.entry_point.main_variant.as_ref().expect("TopLevelPlusMain always carries a main_variant");
            w.line(main_signature(variant));
            w.line("{");
            w.indent();
            for stmt in &module.top_level_statements {
                render_stmt(w, stmt);
            }
            let call = match variant {
                MainVariant::Sync => format!("{}.main(args);", module.class_name),
                MainVariant::Async => format!("await {}.main(args);", module.class_name),
                MainVariant::IntReturning => format!("return {}.main(args);", module.class_name),
            };
            w.line(&call);
            w.dedent();
            w.line("}");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_ir::module::EntryPoint;

    #[test]
    fn top_level_only_wraps_statements_in_main() {
        let mut module = IrModule::new("App", "Program");
        module.entry_point = EntryPoint { state: EntryPointState::TopLevelOnly, main_variant: None };
        let mut w = FmtWriter::new();
        let wrote = render_main(&mut w, &module);
        assert!(wrote);
        assert!(w.finish().contains("public static void Main(string[] args)"));
    }

    #[test]
    fn no_export_writes_nothing() {
        let module = IrModule::new("App", "Program");
        let mut w = FmtWriter::new();
        assert!(!render_main(&mut w, &module));
    }

    #[test]
    fn export_main_delegates_to_author_main() {
        let mut module = IrModule::new("App", "Program");
        module.entry_point = EntryPoint { state: EntryPointState::ExportMain, main_variant: Some(MainVariant::Sync) };
        let mut w = FmtWriter::new();
        render_main(&mut w, &module);
        assert!(w.finish().contains("Program.main(args);"));
    }
}
