//! The Dotnet Type Metadata Registry: an immutable mapping from fully
//! qualified .NET type name to its shape, built once and read by the IR
//! builder and the emitter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberShape {
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub overload_tag: Option<String>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub kind: TypeKind,
    #[serde(default)]
    pub members: HashMap<String, MemberShape>,
}

/// Built once per compilation from `<Name>.metadata.json` sidecars next to
/// `<Name>.d.ts` files under the configured type roots; read-only afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataRegistry {
    types: HashMap<String, TypeEntry>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fully_qualified_name: impl Into<String>, entry: TypeEntry) {
        self.types.insert(fully_qualified_name.into(), entry);
    }

    pub fn get(&self, fully_qualified_name: &str) -> Option<&TypeEntry> {
        self.types.get(fully_qualified_name)
    }

    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.types.contains_key(fully_qualified_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Parses one `<Name>.metadata.json` sidecar's contents and registers it
    /// under `fully_qualified_name`.
    pub fn load_sidecar(&mut self, fully_qualified_name: &str, json: &str) -> Result<(), serde_json::Error> {
        let entry: TypeEntry = serde_json::from_str(json)?;
        self.insert(fully_qualified_name, entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sidecar_round_trips() {
        let json = r#"{
            "kind": "class",
            "members": { "Length": { "isVirtual": false, "nullable": false } }
        }"#;
        let mut registry = MetadataRegistry::new();
        registry.load_sidecar("System.String", json).unwrap();
        assert!(registry.contains("System.String"));
        assert_eq!(registry.get("System.String").unwrap().kind, TypeKind::Class);
    }
}
