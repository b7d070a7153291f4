//! Program Builder: assembles a consistent, closed program view from a set
//! of entry files, a source root, and ambient type-root directories.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use tsonic_common::position::SourceLocation;
use tsonic_ir::source_ast::{AstImportKind, SourceFile};
use walkdir::WalkDir;

use crate::module::{Export, ExportKind, Import, SourceModule};
use crate::resolver::{self, ImportClassification};

/// Produces a parsed `SourceFile` for one on-disk path. Implemented by
/// whatever owns the connection to the external TypeScript parser; this
/// crate never parses source text itself.
pub trait SourceLoader {
    fn load(&self, path: &Path) -> Result<SourceFile, Diagnostic>;
}

pub struct Program {
    modules: HashMap<PathBuf, SourceModule>,
    entries: Vec<PathBuf>,
}

impl Program {
    pub fn module_for(&self, path: &Path) -> Option<&SourceModule> {
        self.modules.get(path)
    }

    pub fn modules(&self) -> impl Iterator<Item = &SourceModule> {
        self.modules.values()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

fn export_kind_from_ast(item: &tsonic_ir::source_ast::AstItem) -> Option<(String, ExportKind)> {
    use tsonic_ir::source_ast::{AstItem, AstVisibility};
    match item {
        AstItem::Function(f) if f.visibility == AstVisibility::Exported => Some((f.name.clone(), ExportKind::Function)),
        AstItem::Class(c) if c.visibility == AstVisibility::Exported => Some((c.name.clone(), ExportKind::Class)),
        AstItem::Interface(i) if i.visibility == AstVisibility::Exported => Some((i.name.clone(), ExportKind::Interface)),
        AstItem::TypeAlias(t) if t.visibility == AstVisibility::Exported => Some((t.name.clone(), ExportKind::TypeAlias)),
        AstItem::Variable(v) if v.visibility == AstVisibility::Exported => Some((v.name.clone(), ExportKind::Constant)),
        AstItem::Enum(e) if e.visibility == AstVisibility::Exported => Some((e.name.clone(), ExportKind::Enum)),
        _ => None,
    }
}

/// Resolves a relative specifier against the importing module's directory,
/// enforcing case-sensitivity by comparing each path segment to the actual
/// on-disk directory entry rather than a lower-cased comparison.
fn resolve_case_sensitive(base_dir: &Path, relative: &str, location: &SourceLocation) -> Result<PathBuf, Diagnostic> {
    let mut current = base_dir.to_path_buf();
    for segment in Path::new(relative).components() {
        let wanted = segment.as_os_str().to_string_lossy().to_string();
        if wanted == "." {
            continue;
        }
        if wanted == ".." {
            current.pop();
            continue;
        }
        let entries = std::fs::read_dir(&current).map_err(|_| {
            Diagnostic::new(DiagnosticCode::TSN1001, None)
                .with_location(location.clone())
                .with_message(format!("directory `{}` does not exist", current.display()))
        })?;
        let matched = entries
            .filter_map(|e| e.ok())
            .find(|e| e.file_name().to_string_lossy() == wanted);
        match matched {
            Some(entry) => current = entry.path(),
            None => {
                let case_insensitive_match = std::fs::read_dir(&current)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|e| e.ok())
                    .any(|e| e.file_name().to_string_lossy().eq_ignore_ascii_case(&wanted));
                let code = if case_insensitive_match { DiagnosticCode::TSN1003 } else { DiagnosticCode::TSN1001 };
                return Err(Diagnostic::new(code, None)
                    .with_location(location.clone())
                    .with_message(format!("`{relative}` does not match the on-disk entry `{wanted}` by case")));
            }
        }
    }
    Ok(current)
}

pub fn build_program(
    entries: &[PathBuf],
    source_root: &Path,
    type_roots: &[PathBuf],
    root_namespace: &str,
    loader: &dyn SourceLoader,
) -> Result<Program, DiagnosticCollection> {
    let mut diagnostics = DiagnosticCollection::new();
    let mut modules: HashMap<PathBuf, SourceModule> = HashMap::new();
    let mut queue: VecDeque<PathBuf> = entries.iter().cloned().collect();

    let discovered = scan_type_roots(type_roots);
    debug!("found {} declaration file(s) under {} type root(s)", discovered.len(), type_roots.len());

    while let Some(path) = queue.pop_front() {
        if modules.contains_key(&path) {
            continue;
        }
        let file = match loader.load(&path) {
            Ok(file) => file,
            Err(diag) => {
                diagnostics.push(diag);
                continue;
            }
        };

        let (namespace, class_name) = SourceModule::derive_namespace(&path, source_root, root_namespace);
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let mut imports = Vec::new();

        for import in &file.imports {
            match resolver::classify(&import.specifier, &import.location) {
                Ok(ImportClassification::LocalTs { relative_path }) => {
                    match resolve_case_sensitive(base_dir, &relative_path, &import.location) {
                        Ok(resolved) => {
                            queue.push_back(resolved.clone());
                            let lowered = Import::LocalTs { resolved_path: resolved, names: import.names.clone() };
                            imports.push(if matches!(import.kind, AstImportKind::TypeOnly) {
                                Import::TypeOnly { inner: Box::new(lowered) }
                            } else {
                                lowered
                            });
                        }
                        Err(diag) => diagnostics.push(diag),
                    }
                }
                Ok(ImportClassification::DotnetNamespace { dotted_name }) => {
                    imports.push(Import::DotnetNamespace { dotted_name });
                }
                Err(diag) => diagnostics.push(diag),
            }
        }

        let exports: Vec<Export> = file
            .items
            .iter()
            .filter_map(|item| export_kind_from_ast(item).map(|(name, kind)| Export { name, kind }))
            .collect();

        debug!("resolved module {} ({} imports, {} exports)", path.display(), imports.len(), exports.len());

        modules.insert(
            path.clone(),
            SourceModule { path: path.clone(), namespace, class_name, imports, exports, ast: file },
        );
    }

    check_resolution_closure(&modules, &mut diagnostics);

    if let Some(cycle) = detect_cycle(&modules) {
        diagnostics.push(
            Diagnostic::new(DiagnosticCode::TSN1006, None)
                .with_message(format!("import cycle: {}", cycle.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" -> "))),
        );
    }

    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    Ok(Program { modules, entries: entries.to_vec() })
}

/// Scans type roots recursively for `.d.ts` declaration files and their
/// `.metadata.json` siblings. The checker crate owns turning these into
/// registry entries; this only confirms they're reachable.
fn scan_type_roots(type_roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for root in type_roots {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() || !path.extension().is_some_and(|e| e == "ts") {
                continue;
            }
            debug!("discovered declaration file {}", path.display());
            if path.to_string_lossy().ends_with(".d.ts") {
                let sidecar = path.with_extension("").with_extension("metadata.json");
                if !sidecar.is_file() {
                    warn!("{} has no sibling {}", path.display(), sidecar.display());
                }
            }
            found.push(path.to_path_buf());
        }
    }
    found
}

/// Every `Import`'s `names` must be a subset of the target module's
/// `Export`s; an import naming something its target never exports is
/// rejected here, before IR building ever sees it.
fn check_resolution_closure(modules: &HashMap<PathBuf, SourceModule>, diagnostics: &mut DiagnosticCollection) {
    for module in modules.values() {
        for import in &module.imports {
            let Some((resolved_path, names)) = local_import_target(import) else { continue };
            let Some(target) = modules.get(resolved_path) else { continue };
            for name in names {
                if !target.exports.iter().any(|e| &e.name == name) {
                    diagnostics.push(Diagnostic::new(DiagnosticCode::TSN1007, None).with_message(format!(
                        "`{}` imports `{name}` from `{}`, which does not export it",
                        module.path.display(),
                        resolved_path.display()
                    )));
                }
            }
        }
    }
}

fn local_import_target(import: &Import) -> Option<(&PathBuf, &Vec<String>)> {
    match import {
        Import::LocalTs { resolved_path, names } => Some((resolved_path, names)),
        Import::TypeOnly { inner } => local_import_target(inner),
        Import::DotnetNamespace { .. } => None,
    }
}

/// Coloured DFS cycle detection over the local-import edges; returns the
/// members of the first cycle found, in traversal order.
fn detect_cycle(modules: &HashMap<PathBuf, SourceModule>) -> Option<Vec<PathBuf>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let mut colors: HashMap<&Path, Color> = modules.keys().map(|p| (p.as_path(), Color::White)).collect();
    let mut stack: Vec<PathBuf> = Vec::new();

    fn visit<'a>(
        node: &'a Path,
        modules: &'a HashMap<PathBuf, SourceModule>,
        colors: &mut HashMap<&'a Path, Color>,
        stack: &mut Vec<PathBuf>,
    ) -> Option<Vec<PathBuf>> {
        colors.insert(node, Color::Gray);
        stack.push(node.to_path_buf());
        if let Some(module) = modules.get(node) {
            for import in &module.imports {
                if let Import::LocalTs { resolved_path, .. } = import {
                    match colors.get(resolved_path.as_path()) {
                        Some(Color::Gray) => {
                            let start = stack.iter().position(|p| p == resolved_path).unwrap_or(0);
                            let mut cycle = stack[start..].to_vec();
                            cycle.push(resolved_path.clone());
                            return Some(cycle);
                        }
                        Some(Color::White) | None => {
                            if let Some(cycle) = visit(resolved_path, modules, colors, stack) {
                                return Some(cycle);
                            }
                        }
                        Some(Color::Black) => {}
                    }
                }
            }
        }
        stack.pop();
        colors.insert(node, Color::Black);
        None
    }

    for path in modules.keys() {
        if colors.get(path.as_path()) == Some(&Color::White) {
            if let Some(cycle) = visit(path, modules, &mut colors, &mut stack) {
                return Some(cycle);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tsonic_ir::source_ast::{AstImport, AstImportKind};

    struct FsLoader;

    impl SourceLoader for FsLoader {
        fn load(&self, path: &Path) -> Result<SourceFile, Diagnostic> {
            let contents = fs::read_to_string(path).map_err(|_| {
                Diagnostic::new(DiagnosticCode::TSN1001, None)
                    .with_message(format!("cannot read `{}`", path.display()))
            })?;
            let mut file = SourceFile::new(path.to_string_lossy().to_string());
            for line in contents.lines() {
                if let Some(rest) = line.strip_prefix("import ") {
                    let (names, specifier) = match rest.split_once(" from ") {
                        Some((name, target)) => (vec![name.trim().to_string()], target.trim().to_string()),
                        None => (vec![], rest.trim().to_string()),
                    };
                    file.imports.push(AstImport {
                        specifier,
                        kind: AstImportKind::LocalTs,
                        names,
                        location: SourceLocation::new(path.to_string_lossy().to_string(), tsonic_common::position::Span::new(0, 1, tsonic_common::position::Position::new(1, 1))),
                    });
                }
            }
            Ok(file)
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tsonic_program_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn detects_import_cycle() {
        let dir = scratch_dir("cycle");
        fs::write(dir.join("a.ts"), "import ./b.ts\n").unwrap();
        fs::write(dir.join("b.ts"), "import ./a.ts\n").unwrap();

        let result = build_program(&[dir.join("a.ts")], &dir, &[], "App", &FsLoader);
        let diagnostics = result.expect_err("cyclic program must be rejected");
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN1006));
    }

    #[test]
    fn import_naming_an_unexported_symbol_is_rejected() {
        let dir = scratch_dir("unexported");
        fs::write(dir.join("a.ts"), "import Widget from ./b.ts\n").unwrap();
        fs::write(dir.join("b.ts"), "\n").unwrap();

        let result = build_program(&[dir.join("a.ts")], &dir, &[], "App", &FsLoader);
        let diagnostics = result.expect_err("importing a name the target never exports must be rejected");
        assert!(diagnostics.errors().any(|d| d.code == DiagnosticCode::TSN1007));
    }

    #[test]
    fn builds_acyclic_program() {
        let dir = scratch_dir("acyclic");
        fs::write(dir.join("a.ts"), "import ./b.ts\n").unwrap();
        fs::write(dir.join("b.ts"), "\n").unwrap();

        let program = build_program(&[dir.join("a.ts")], &dir, &[], "App", &FsLoader).unwrap();
        assert!(program.module_for(&dir.join("a.ts")).is_some());
        assert!(program.module_for(&dir.join("b.ts")).is_some());
    }

    #[test]
    fn scan_type_roots_finds_declaration_files() {
        let dir = scratch_dir("typeroots");
        fs::write(dir.join("widget.d.ts"), "").unwrap();
        fs::write(dir.join("widget.metadata.json"), "{}").unwrap();
        fs::write(dir.join("orphan.d.ts"), "").unwrap();

        let found = scan_type_roots(&[dir.clone()]);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&dir.join("widget.d.ts")));
        assert!(found.contains(&dir.join("orphan.d.ts")));
    }
}
