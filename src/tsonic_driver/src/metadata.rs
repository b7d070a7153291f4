//! Loads `.metadata.json` sidecars under the configured type roots into a
//! `MetadataRegistry`. Scanning `.d.ts`/sidecar pairs from disk is the one
//! piece of filesystem work this crate does itself, rather than delegating
//! to a caller-supplied trait, since the pairing convention is internal to
//! how the type system facade is populated.

use anyhow::Context;
use tsonic_checker::MetadataRegistry;
use walkdir::WalkDir;

const SIDECAR_SUFFIX: &str = ".metadata.json";

pub fn load_registry(type_roots: &[std::path::PathBuf]) -> anyhow::Result<MetadataRegistry> {
    let mut registry = MetadataRegistry::new();
    for root in type_roots {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            let Some(qualified_name) = file_name.strip_suffix(SIDECAR_SUFFIX) else {
                continue;
            };
            let json = std::fs::read_to_string(entry.path())
                .with_context(|| format!("reading sidecar `{}`", entry.path().display()))?;
            registry
                .load_sidecar(qualified_name, &json)
                .with_context(|| format!("parsing sidecar `{}`", entry.path().display()))?;
        }
    }
    Ok(registry)
}
