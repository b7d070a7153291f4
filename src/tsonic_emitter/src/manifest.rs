//! `.csproj` generation from a `Configuration` record. Pure string assembly;
//! no MSBuild SDK is invoked here, the external Build Orchestrator boundary
//! owns actually running `dotnet build` against the file this module writes.

use tsonic_common::config::{Configuration, OptimisePreference, OutputKind};

fn output_type_syntax(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Executable | OutputKind::ConsoleApp => "Exe",
        OutputKind::Library => "Library",
    }
}

pub fn render_manifest(config: &Configuration) -> String {
    let mut props = Vec::new();
    props.push(("OutputType".to_string(), output_type_syntax(config.output_kind).to_string()));
    props.push(("TargetFramework".to_string(), "net8.0".to_string()));
    props.push(("RootNamespace".to_string(), config.root_namespace.clone()));
    props.push(("AssemblyName".to_string(), config.output_name.clone()));
    props.push(("Nullable".to_string(), "enable".to_string()));
    props.push(("ImplicitUsings".to_string(), "enable".to_string()));

    if config.native_aot {
        props.push(("PublishAot".to_string(), "true".to_string()));
    }
    match config.optimise {
        OptimisePreference::Size => props.push(("OptimizationPreference".to_string(), "Size".to_string())),
        OptimisePreference::Speed => props.push(("OptimizationPreference".to_string(), "Speed".to_string())),
    }
    if config.strip_symbols {
        props.push(("StripSymbols".to_string(), "true".to_string()));
        props.push(("DebugType".to_string(), "none".to_string()));
    }
    if config.invariant_globalisation {
        props.push(("InvariantGlobalization".to_string(), "true".to_string()));
    }
    for (key, value) in &config.msbuild_properties {
        props.push((key.clone(), value.clone()));
    }

    let mut out = String::from("<Project Sdk=\"Microsoft.NET.Sdk\">\n\n");
    out.push_str("  <PropertyGroup>\n");
    for (key, value) in &props {
        out.push_str(&format!("    <{key}>{value}</{key}>\n"));
    }
    out.push_str("  </PropertyGroup>\n");

    if !config.framework_references.is_empty() {
        out.push_str("\n  <ItemGroup>\n");
        for fr in &config.framework_references {
            out.push_str(&format!("    <FrameworkReference Include=\"{fr}\" />\n"));
        }
        out.push_str("  </ItemGroup>\n");
    }

    if !config.package_references.is_empty() {
        out.push_str("\n  <ItemGroup>\n");
        for pkg in &config.package_references {
            out.push_str(&format!("    <PackageReference Include=\"{}\" Version=\"{}\" />\n", pkg.id, pkg.version));
        }
        out.push_str("  </ItemGroup>\n");
    }

    if !config.libraries.is_empty() {
        out.push_str("\n  <ItemGroup>\n");
        for lib in &config.libraries {
            out.push_str(&format!("    <Reference Include=\"{}\" />\n", lib.display()));
        }
        out.push_str("  </ItemGroup>\n");
    }

    out.push_str("\n</Project>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

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
    fn native_aot_sets_publish_aot() {
        let manifest = render_manifest(&base());
        assert!(manifest.contains("<PublishAot>true</PublishAot>"));
        assert!(manifest.contains("<OutputType>Exe</OutputType>"));
    }

    #[test]
    fn package_references_become_item_group() {
        let mut config = base();
        config.package_references.push(tsonic_common::config::PackageReference {
            id: "System.Text.Json".into(),
            version: "8.0.0".into(),
        });
        let manifest = render_manifest(&config);
        assert!(manifest.contains("PackageReference Include=\"System.Text.Json\" Version=\"8.0.0\""));
    }
}
