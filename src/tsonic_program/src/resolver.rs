//! Module Resolver: classifies an import specifier against the decision
//! table, checked in order with first match winning.

use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode};
use tsonic_common::position::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportClassification {
    LocalTs { relative_path: String },
    DotnetNamespace { dotted_name: String },
}

const NODE_STYLE_SPECIFIERS: &[&str] = &["fs", "path", "os", "http", "crypto"];

/// Runs the decision table. A `relative` specifier starts with `./` or
/// `../`; anything else without those prefixes is treated as an absolute
/// ambient (`DotnetNamespace`) reference unless it matches a rejected shape
/// first.
pub fn classify(specifier: &str, location: &SourceLocation) -> Result<ImportClassification, Diagnostic> {
    if specifier.starts_with("node:") || NODE_STYLE_SPECIFIERS.contains(&specifier) {
        return Err(Diagnostic::new(DiagnosticCode::TSN1004, None)
            .with_location(location.clone())
            .with_message(format!("`{specifier}` is a Node-style bare module specifier")));
    }
    if specifier.ends_with(".json") {
        return Err(Diagnostic::new(DiagnosticCode::TSN1005, None)
            .with_location(location.clone())
            .with_message(format!("`{specifier}` is a JSON import")));
    }

    let is_relative = specifier.starts_with("./") || specifier.starts_with("../");
    if is_relative {
        if specifier.ends_with(".ts") {
            return Ok(ImportClassification::LocalTs { relative_path: specifier.to_string() });
        }
        if let Some(dot) = specifier.rfind('.') {
            if specifier[dot..].chars().skip(1).all(|c| c.is_ascii_alphanumeric()) && dot > specifier.rfind('/').unwrap_or(0) {
                return Err(Diagnostic::new(DiagnosticCode::TSN1002, None)
                    .with_location(location.clone())
                    .with_message(format!("`{specifier}` has an unsupported extension")));
            }
        }
        return Err(Diagnostic::new(DiagnosticCode::TSN1001, None)
            .with_location(location.clone())
            .with_message(format!("`{specifier}` has no extension; relative imports must end in `.ts`")));
    }

    if !specifier.contains('.') {
        return Err(Diagnostic::new(DiagnosticCode::TSN1001, None)
            .with_location(location.clone())
            .with_message(format!("`{specifier}` is neither a relative `.ts` import nor a dotted namespace")));
    }

    Ok(ImportClassification::DotnetNamespace { dotted_name: specifier.to_string() })
}
