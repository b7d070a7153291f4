//! Rich diagnostic system: stable `TSN####` codes, severities, categories,
//! and an accumulating collection, split into diagnostic_code / diagnostic /
//! diagnostic_collection / format sibling files.

mod code;
mod collection;
mod diagnostic;
mod format;

pub use code::{DiagnosticCategory, DiagnosticCode};
pub use collection::DiagnosticCollection;
pub use diagnostic::Diagnostic;
pub use format::render_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticSeverity::Error => f.write_str("error"),
            DiagnosticSeverity::Warning => f.write_str("warning"),
        }
    }
}
