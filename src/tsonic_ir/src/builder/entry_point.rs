//! Entry-point state machine: classifies a module from the shape of its
//! top-level statements and exports, ahead of emission.

use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSeverity};
use tsonic_common::position::SourceLocation;

use crate::module::{EntryPointState, MainVariant};

pub struct EntryPointInputs {
    pub has_top_level_statements: bool,
    pub has_main_export: bool,
    pub has_other_exports: bool,
    pub main_is_async: bool,
    pub main_returns_int: bool,
    pub has_top_level_await: bool,
}

/// Computes the terminal state and the diagnostics it implies.
///
/// `relax_top_level_plus_exports` is the opt-in escape hatch for the
/// otherwise-rejected `TopLevelPlusExports` shape: when set, that shape is
/// accepted with a downgraded warning instead of aborting the module.
pub fn classify(
    inputs: &EntryPointInputs,
    location: &SourceLocation,
    relax_top_level_plus_exports: bool,
) -> (EntryPointState, Option<MainVariant>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    if inputs.has_top_level_await {
        diagnostics.push(
            Diagnostic::new(DiagnosticCode::TSN1021, None)
                .with_message("top-level `await` is not supported; move it inside an async `main`")
                .with_location(location.clone()),
        );
    }

    let state = match (
        inputs.has_top_level_statements,
        inputs.has_main_export,
        inputs.has_other_exports,
    ) {
        (false, false, _) => EntryPointState::NoExport,
        (false, true, _) => EntryPointState::ExportMain,
        (true, true, _) => EntryPointState::TopLevelPlusMain,
        (true, false, false) => EntryPointState::TopLevelOnly,
        (true, false, true) => {
            if relax_top_level_plus_exports {
                diagnostics.push(
                    Diagnostic::new(DiagnosticCode::TSN1020, None)
                        .with_message("top-level statements alongside non-main exports without a `main` export; accepted under the relaxation flag")
                        .with_location(location.clone())
                        .downgrade(DiagnosticSeverity::Warning),
                );
                EntryPointState::TopLevelPlusExports
            } else {
                diagnostics.push(
                    Diagnostic::new(DiagnosticCode::TSN1020, None)
                        .with_location(location.clone()),
                );
                EntryPointState::TopLevelPlusExports
            }
        }
    };

    let main_variant = if inputs.has_main_export || matches!(state, EntryPointState::TopLevelPlusMain) {
        Some(if inputs.main_is_async {
            MainVariant::Async
        } else if inputs.main_returns_int {
            MainVariant::IntReturning
        } else {
            MainVariant::Sync
        })
    } else {
        None
    };

    (state, main_variant, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, Span};

    fn loc() -> SourceLocation {
        SourceLocation::new("entry.ts", Span::new(0, 1, Position::new(1, 1)))
    }

    #[test]
    fn no_statements_no_exports_is_no_export() {
        let inputs = EntryPointInputs {
            has_top_level_statements: false,
            has_main_export: false,
            has_other_exports: false,
            main_is_async: false,
            main_returns_int: false,
            has_top_level_await: false,
        };
        let (state, _variant, diags) = classify(&inputs, &loc(), false);
        assert_eq!(state, EntryPointState::NoExport);
        assert!(diags.is_empty());
    }

    #[test]
    fn top_level_plus_exports_without_main_is_rejected_by_default() {
        let inputs = EntryPointInputs {
            has_top_level_statements: true,
            has_main_export: false,
            has_other_exports: true,
            main_is_async: false,
            main_returns_int: false,
            has_top_level_await: false,
        };
        let (state, _variant, diags) = classify(&inputs, &loc(), false);
        assert_eq!(state, EntryPointState::TopLevelPlusExports);
        assert!(diags.iter().any(|d| d.is_error()));
    }

    #[test]
    fn top_level_plus_exports_relaxed_downgrades_to_warning() {
        let inputs = EntryPointInputs {
            has_top_level_statements: true,
            has_main_export: false,
            has_other_exports: true,
            main_is_async: false,
            main_returns_int: false,
            has_top_level_await: false,
        };
        let (state, _variant, diags) = classify(&inputs, &loc(), true);
        assert_eq!(state, EntryPointState::TopLevelPlusExports);
        assert!(!diags.iter().any(|d| d.is_error()));
    }

    #[test]
    fn export_main_yields_its_variant() {
        let inputs = EntryPointInputs {
            has_top_level_statements: false,
            has_main_export: true,
            has_other_exports: false,
            main_is_async: true,
            main_returns_int: false,
            has_top_level_await: false,
        };
        let (state, variant, _diags) = classify(&inputs, &loc(), false);
        assert_eq!(state, EntryPointState::ExportMain);
        assert_eq!(variant, Some(MainVariant::Async));
    }

    #[test]
    fn top_level_await_is_always_rejected() {
        let inputs = EntryPointInputs {
            has_top_level_statements: true,
            has_main_export: true,
            has_other_exports: false,
            main_is_async: false,
            main_returns_int: false,
            has_top_level_await: true,
        };
        let (_, _variant, diags) = classify(&inputs, &loc(), false);
        assert!(diags.iter().any(|d| d.code == DiagnosticCode::TSN1021));
    }
}
