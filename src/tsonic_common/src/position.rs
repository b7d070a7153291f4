//! Source positions and spans shared by every downstream crate.

use serde::{Deserialize, Serialize};

/// A 1-based line/column position within a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open byte range plus its resolved start position, attached to
/// every IR node and AST-adjacent record for diagnostic reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_offset: usize,
    pub end_offset: usize,
    pub start: Position,
}

impl Span {
    pub fn new(start_offset: usize, end_offset: usize, start: Position) -> Self {
        Self { start_offset, end_offset, start }
    }

    pub fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A span paired with the file it belongs to — what a `Diagnostic` anchors
/// on. Kept distinct from `Span` because most IR structures already know
/// their owning file and would otherwise repeat the path on every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub span: Span,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, span: Span) -> Self {
        Self { file: file.into(), span }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.span.start.line, self.span.start.column)
    }
}
