use super::{DiagnosticCode, DiagnosticSeverity};
use crate::position::SourceLocation;
use serde::{Deserialize, Serialize};

/// A single diagnostic record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub location: Option<SourceLocation>,
    /// Suggested fix text, rendered verbatim by callers. `TSN3012` and the
    /// `TSN40xx` naming codes carry one.
    pub suggested_fix: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, location: Option<SourceLocation>) -> Self {
        Self {
            severity: code.severity(),
            message: code.default_message().to_string(),
            code,
            location,
            suggested_fix: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Overrides the severity a code normally carries, e.g. when a rejection
    /// is relaxed to a warning under an opt-in flag.
    pub fn downgrade(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, DiagnosticSeverity::Error)
    }
}

impl std::fmt::Display for Diagnostic {
    /// `TSN<code>: <message> [at <file>:<line>:<col>]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " [at {loc}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let d = Diagnostic::new(DiagnosticCode::TSN1006, None).with_message("cycle: a.ts -> b.ts -> a.ts");
        assert_eq!(d.to_string(), "TSN1006: cycle: a.ts -> b.ts -> a.ts");
    }
}
