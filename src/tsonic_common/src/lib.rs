//! Common types shared by every `tsonic` crate: diagnostics, source
//! positions/spans, the external `Configuration` record, and fixed limits.

pub mod config;
pub mod diagnostics;
pub mod limits;
pub mod position;

pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticCode, DiagnosticCollection, DiagnosticSeverity};
pub use position::{Position, SourceLocation, Span};
