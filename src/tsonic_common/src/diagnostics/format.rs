use super::Diagnostic;

/// Renders the wire format: `TSN<code>: <message> [at <file>:<line>:<col>]`.
///
/// Kept as a free function (rather than relying solely on `Display`) because
/// downstream tools treat this string as part of their contract and should
/// not need to know it happens to be `Diagnostic`'s `Display` impl.
pub fn render_message(diagnostic: &Diagnostic) -> String {
    diagnostic.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;
    use crate::position::{Position, SourceLocation, Span};

    #[test]
    fn renders_with_location() {
        let loc = SourceLocation::new("src/hello.ts", Span::new(0, 3, Position::new(2, 1)));
        let d = Diagnostic::new(DiagnosticCode::TSN3012, Some(loc));
        assert_eq!(
            render_message(&d),
            "TSN3012: `super()` must be the first statement in a constructor [at src/hello.ts:2:1]"
        );
    }
}
