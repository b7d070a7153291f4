//! End-to-end exercises of `compile` against small, hand-built module
//! graphs. No external TypeScript parser is available in-process, so each
//! test supplies a `SourceLoader` test double that hands back pre-built
//! `SourceFile` values keyed by path; the on-disk layout still has to be
//! real wherever module resolution touches the filesystem (case-sensitive
//! import matching, cycle detection).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tsonic_common::config::{Configuration, OptimisePreference, OutputKind};
use tsonic_common::position::{Position, SourceLocation, Span};
use tsonic_driver::{compile, CompileRequest};
use tsonic_emitter::FixedTimestamp;
use tsonic_ir::source_ast::{AstExpr, AstItem, AstLiteral, AstStmt, SourceFile};
use tsonic_program::SourceLoader;

struct MapLoader {
    files: HashMap<PathBuf, SourceFile>,
}

impl SourceLoader for MapLoader {
    fn load(&self, path: &Path) -> Result<SourceFile, tsonic_common::diagnostics::Diagnostic> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| tsonic_common::diagnostics::Diagnostic::new(tsonic_common::diagnostics::DiagnosticCode::TSN1001, None))
    }
}

fn loc() -> SourceLocation {
    SourceLocation::new("test.ts", Span::new(0, 1, Position::new(1, 1)))
}

fn base_config(source_root: PathBuf) -> Configuration {
    Configuration {
        root_namespace: "Hello".into(),
        entry_point: None,
        source_root,
        output_directory: "out".into(),
        output_name: "hello".into(),
        type_roots: vec![],
        libraries: vec![],
        framework_references: vec![],
        package_references: vec![],
        msbuild_properties: BTreeMap::new(),
        output_kind: OutputKind::ConsoleApp,
        native_aot: true,
        optimise: OptimisePreference::Speed,
        strip_symbols: false,
        invariant_globalisation: true,
        keep_temp: false,
    }
}

fn unique_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tsonic_driver_test_{label}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("src")).unwrap();
    dir
}

#[test]
fn hello_entry_point_wraps_top_level_statements_in_main() {
    let root = unique_dir("hello");
    let entry_path = root.join("src/main.ts");

    let mut main_file = SourceFile::new(entry_path.display().to_string());
    main_file.items.push(AstItem::TopLevelStatement(AstStmt::Expression(AstExpr::Call {
        callee: Box::new(AstExpr::Identifier("print".into())),
        type_arguments: vec![],
        arguments: vec![AstExpr::Literal(AstLiteral::String("hello".into()))],
    })));

    let loader = MapLoader { files: HashMap::from([(entry_path.clone(), main_file)]) };
    let config = base_config(root.join("src"));
    let request = CompileRequest { config, entries: vec![entry_path] };
    let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());

    let outcome = compile(request, &loader, &ts).expect("compile should not hard-fail");
    assert!(!outcome.diagnostics.has_errors());
    assert_eq!(outcome.files.len(), 1);
    assert!(outcome.files[0].contents.contains("public static void Main(string[] args)"));
    assert!(outcome.manifest.contains("<PublishAot>true</PublishAot>"));
}

#[test]
fn case_mismatched_import_is_rejected() {
    let root = unique_dir("case_mismatch");
    std::fs::write(root.join("src/Widget.ts"), "").unwrap();
    let entry_path = root.join("src/main.ts");
    let widget_path = root.join("src/Widget.ts");

    let mut main_file = SourceFile::new(entry_path.display().to_string());
    main_file.imports.push(tsonic_ir::source_ast::AstImport {
        specifier: "./widget.ts".into(),
        kind: tsonic_ir::source_ast::AstImportKind::LocalTs,
        names: vec!["Widget".into()],
        location: loc(),
    });

    let widget_file = SourceFile::new(widget_path.display().to_string());

    let loader = MapLoader {
        files: HashMap::from([(entry_path.clone(), main_file), (widget_path, widget_file)]),
    };
    let config = base_config(root.join("src"));
    let request = CompileRequest { config, entries: vec![entry_path] };
    let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());

    let result = compile(request, &loader, &ts);
    assert!(result.is_err(), "a case mismatch must surface as a hard failure from build_program");
}

#[test]
fn import_cycle_is_rejected() {
    let root = unique_dir("cycle");
    std::fs::write(root.join("src/a.ts"), "").unwrap();
    std::fs::write(root.join("src/b.ts"), "").unwrap();
    let a_path = root.join("src/a.ts");
    let b_path = root.join("src/b.ts");

    let mut a_file = SourceFile::new(a_path.display().to_string());
    a_file.imports.push(tsonic_ir::source_ast::AstImport {
        specifier: "./b.ts".into(),
        kind: tsonic_ir::source_ast::AstImportKind::LocalTs,
        names: vec![],
        location: loc(),
    });
    let mut b_file = SourceFile::new(b_path.display().to_string());
    b_file.imports.push(tsonic_ir::source_ast::AstImport {
        specifier: "./a.ts".into(),
        kind: tsonic_ir::source_ast::AstImportKind::LocalTs,
        names: vec![],
        location: loc(),
    });

    let loader = MapLoader { files: HashMap::from([(a_path.clone(), a_file), (b_path, b_file)]) };
    let config = base_config(root.join("src"));
    let request = CompileRequest { config, entries: vec![a_path] };
    let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());

    let result = compile(request, &loader, &ts);
    assert!(result.is_err(), "an import cycle must surface as a hard failure from build_program");
}
