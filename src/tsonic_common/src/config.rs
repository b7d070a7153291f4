//! The `Configuration` record at the core boundary. The core only
//! *consumes* this; locating and parsing an on-disk project file remains the
//! external configuration loader's job.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    Executable,
    Library,
    ConsoleApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimisePreference {
    Size,
    Speed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    pub id: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub root_namespace: String,
    #[serde(default)]
    pub entry_point: Option<PathBuf>,
    pub source_root: PathBuf,
    pub output_directory: PathBuf,
    pub output_name: String,
    #[serde(default)]
    pub type_roots: Vec<PathBuf>,
    #[serde(default)]
    pub libraries: Vec<PathBuf>,
    #[serde(default)]
    pub framework_references: Vec<String>,
    #[serde(default)]
    pub package_references: Vec<PackageReference>,
    #[serde(default)]
    pub msbuild_properties: BTreeMap<String, String>,
    pub output_kind: OutputKind,
    #[serde(default)]
    pub native_aot: bool,
    pub optimise: OptimisePreference,
    #[serde(default)]
    pub strip_symbols: bool,
    #[serde(default)]
    pub invariant_globalisation: bool,
    #[serde(default)]
    pub keep_temp: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("msbuild property key `{0}` does not match `[A-Za-z_][A-Za-z0-9_]*`")]
    InvalidMsBuildPropertyKey(String),
    #[error("root_namespace must not be empty")]
    EmptyRootNamespace,
}

impl Configuration {
    /// Enforced by the driver before the pipeline runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_namespace.trim().is_empty() {
            return Err(ConfigError::EmptyRootNamespace);
        }
        for key in self.msbuild_properties.keys() {
            if !is_valid_msbuild_key(key) {
                return Err(ConfigError::InvalidMsBuildPropertyKey(key.clone()));
            }
        }
        Ok(())
    }
}

fn is_valid_msbuild_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Configuration {
        Configuration {
            root_namespace: "Demo".into(),
            entry_point: None,
            source_root: "src".into(),
            output_directory: "out".into(),
            output_name: "demo".into(),
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

    #[test]
    fn rejects_bad_msbuild_key() {
        let mut c = base();
        c.msbuild_properties.insert("1Bad".into(), "x".into());
        assert_eq!(c.validate(), Err(ConfigError::InvalidMsBuildPropertyKey("1Bad".into())));
    }

    #[test]
    fn accepts_good_msbuild_key() {
        let mut c = base();
        c.msbuild_properties.insert("TieredPGO".into(), "true".into());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_empty_namespace() {
        let mut c = base();
        c.root_namespace = "".into();
        assert_eq!(c.validate(), Err(ConfigError::EmptyRootNamespace));
    }
}
