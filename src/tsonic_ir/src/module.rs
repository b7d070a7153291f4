//! `IrModule`: the read-only artifact an IR Builder worker produces for one
//! Source Module, and the namespace-level container adapters and
//! specialisations are appended into afterwards.

use serde::{Deserialize, Serialize};

use crate::declarations::IrDeclaration;
use crate::statements::Stmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryPointState {
    NoExport,
    ExportMain,
    TopLevelOnly,
    TopLevelPlusExports,
    TopLevelPlusMain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainVariant {
    Sync,
    Async,
    IntReturning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub state: EntryPointState,
    pub main_variant: Option<MainVariant>,
}

/// A source construct the builder recognises but cannot lower into a real
/// IR node; recorded here rather than rejected inline so the validator can
/// report it with its dedicated `TSN3xxx` rule, in the same pass as every
/// other language-rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForbiddenConstruct {
    ReExport,
    NamespaceReExport,
    DefaultExport,
    DynamicImport,
    ImportMeta,
    WithStatement,
    UnionType,
    ConditionalOrMappedType,
    SymbolIndexedSignature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrModule {
    pub namespace: String,
    /// File name without extension; the nominal class name statements and
    /// declarations in this module are emitted under.
    pub class_name: String,
    pub declarations: Vec<IrDeclaration>,
    pub top_level_statements: Vec<Stmt>,
    pub entry_point: EntryPoint,
    /// Dotted .NET namespaces folded in from `DotnetNamespace` imports.
    pub using_set: Vec<String>,
    /// Constructs the builder found and skipped rather than lowered;
    /// surfaced to diagnostics by `tsonic_validator`'s language-rule rules.
    pub forbidden_constructs: Vec<ForbiddenConstruct>,
}

impl IrModule {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            class_name: class_name.into(),
            declarations: Vec::new(),
            top_level_statements: Vec::new(),
            entry_point: EntryPoint { state: EntryPointState::NoExport, main_variant: None },
            using_set: Vec::new(),
            forbidden_constructs: Vec::new(),
        }
    }

    /// Adapters and specialisations are appended after original
    /// declarations so the emitted file stays stable across recompiles.
    pub fn append_generated(&mut self, decl: IrDeclaration) {
        self.declarations.push(decl);
    }

    pub fn find(&self, name: &str) -> Option<&IrDeclaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_generated_preserves_order() {
        use crate::declarations::{EnumDecl, Visibility};
        use crate::provenance::Provenance;
        use tsonic_common::position::{Position, SourceLocation, Span};

        let prov = Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))));
        let mut module = IrModule::new("App", "Main");
        module.append_generated(IrDeclaration::Enum(EnumDecl {
            provenance: prov.clone(),
            name: "First".into(),
            visibility: Visibility::Public,
            members: vec![],
        }));
        module.append_generated(IrDeclaration::Enum(EnumDecl {
            provenance: prov,
            name: "Second".into(),
            visibility: Visibility::Public,
            members: vec![],
        }));
        let names: Vec<&str> = module.declarations.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
