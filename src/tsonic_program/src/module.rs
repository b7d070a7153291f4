//! `Source Module` and its `Import`/`Export` edges.

use std::path::PathBuf;

use tsonic_ir::source_ast::SourceFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    LocalTs { resolved_path: PathBuf, names: Vec<String> },
    DotnetNamespace { dotted_name: String },
    TypeOnly { inner: Box<Import> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Class,
    Function,
    Constant,
    Interface,
    TypeAlias,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub name: String,
    pub kind: ExportKind,
}

/// One node of the Source Program DAG: path, a derived namespace, its
/// imports/exports, and the parsed AST handle. Mutated only during IR
/// building; read-only afterward.
#[derive(Debug, Clone)]
pub struct SourceModule {
    pub path: PathBuf,
    pub namespace: String,
    pub class_name: String,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    pub ast: SourceFile,
}

impl SourceModule {
    /// Path segments between the source root and this file, joined by `.`
    /// under the root namespace; file name without extension becomes the
    /// class name. Case is preserved.
    pub fn derive_namespace(path: &std::path::Path, source_root: &std::path::Path, root_namespace: &str) -> (String, String) {
        let relative = path.strip_prefix(source_root).unwrap_or(path);
        let class_name = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Module")
            .to_string();
        let mut segments: Vec<String> = vec![root_namespace.to_string()];
        if let Some(parent) = relative.parent() {
            segments.extend(parent.components().filter_map(|c| c.as_os_str().to_str().map(str::to_string)));
        }
        (segments.join("."), class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn derives_namespace_from_relative_path() {
        let (namespace, class_name) =
            SourceModule::derive_namespace(Path::new("src/widgets/Button.ts"), Path::new("src"), "App");
        assert_eq!(namespace, "App.widgets");
        assert_eq!(class_name, "Button");
    }

    #[test]
    fn top_level_file_has_bare_root_namespace() {
        let (namespace, class_name) =
            SourceModule::derive_namespace(Path::new("src/main.ts"), Path::new("src"), "App");
        assert_eq!(namespace, "App");
        assert_eq!(class_name, "main");
    }
}
