use super::{Diagnostic, DiagnosticCode};
use crate::position::SourceLocation;
use serde::{Deserialize, Serialize};

/// Accumulates diagnostics across a pipeline stage. A stage never fails
/// fast, collecting as many diagnostics as possible before the pipeline
/// aborts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, code: DiagnosticCode, location: Option<SourceLocation>, message: impl Into<String>) {
        self.push(Diagnostic::new(code, location).with_message(message));
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Sorts into the required deterministic order: by source file path,
    /// then by location within the file.
    pub fn sort_by_source_order(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let key = |d: &Diagnostic| {
                d.location
                    .as_ref()
                    .map(|l| (l.file.clone(), l.span.start_offset))
                    .unwrap_or_else(|| (String::new(), 0))
            };
            key(a).cmp(&key(b))
        });
    }
}

impl FromIterator<Diagnostic> for DiagnosticCollection {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self { diagnostics: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Position, Span};

    fn loc(file: &str, offset: usize) -> SourceLocation {
        SourceLocation::new(file, Span::new(offset, offset + 1, Position::new(1, offset + 1)))
    }

    #[test]
    fn sorts_by_file_then_offset() {
        let mut c = DiagnosticCollection::new();
        c.error(DiagnosticCode::TSN1003, Some(loc("b.ts", 5)), "b first");
        c.error(DiagnosticCode::TSN1003, Some(loc("a.ts", 9)), "a second");
        c.error(DiagnosticCode::TSN1003, Some(loc("a.ts", 2)), "a first");
        c.sort_by_source_order();
        let msgs: Vec<_> = c.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(msgs, vec!["a first", "a second", "b first"]);
    }

    #[test]
    fn has_errors_ignores_warnings() {
        let mut c = DiagnosticCollection::new();
        c.error(DiagnosticCode::TSN4002, None, "warn only");
        assert!(!c.has_errors());
        c.error(DiagnosticCode::TSN1006, None, "fatal");
        assert!(c.has_errors());
    }
}
