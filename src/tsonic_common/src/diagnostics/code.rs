//! The stable `TSN####` diagnostic code table.
//!
//! Declared with [`tsonic_diagnostics_macros::diagnostic_codes`] rather than
//! hand-written so that adding a code can never desync the enum from its
//! default message.

use super::DiagnosticSeverity;
use tsonic_diagnostics_macros::diagnostic_codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DiagnosticCategory {
    Resolver,
    EmitterSurface,
    LanguageRule,
    Naming,
    GenericsAndTypes,
    Internal,
}

diagnostic_codes! {
    // TSN1xxx — module / resolver
    TSN1001 => { message: "import specifier must end in `.ts` and resolve to an existing file" },
    TSN1002 => { message: "import specifier has an unsupported extension; only local `.ts` imports are accepted" },
    TSN1003 => { message: "import specifier differs from the on-disk file by case" },
    TSN1004 => { message: "Node-style bare module specifiers are not supported" },
    TSN1005 => { message: "JSON imports are not supported" },
    TSN1006 => { message: "import cycle detected" },
    TSN1007 => { message: "imported name is not exported by the target module" },
    TSN1020 => { message: "top-level statements alongside other exports require an explicit `main` export" },
    TSN1021 => { message: "top-level `await` is not supported" },

    // TSN2xxx — emitter-surface constraints
    TSN2001 => { message: "unsupported getter/setter shape" },
    TSN2002 => { message: "class-field arrow function initializers are not supported" },

    // TSN3xxx — language rule
    TSN3001 => { message: "re-exports are not supported" },
    TSN3002 => { message: "default exports are not supported" },
    TSN3003 => { message: "dynamic `import()` and `import.meta` are not supported" },
    TSN3004 => { message: "namespace re-exports are not supported" },
    TSN3005 => { message: "`with` statements are not supported" },
    TSN3006 => { message: "union types are not supported" },
    TSN3007 => { message: "arbitrary conditional/mapped types are not supported" },
    TSN3008 => { message: "symbol-indexed signatures are not supported" },
    TSN3009 => { message: "variadic generic constraints are not supported" },
    TSN3010 => { message: "promise-chaining methods are not supported" },
    TSN3011 => { message: "`generator.throw()` injected at a suspended yield is not supported" },
    TSN3012 => { message: "`super()` must be the first statement in a constructor" },
    TSN3013 => { message: "a file's exported symbol name may not equal its containing file's derived class name" },

    // TSN4xxx — naming / collision
    TSN4001 => { message: "structural adapter interface name collides within its namespace" },
    TSN4002 => { message: "source identifier collides with its containing class name; a suffix was applied" },

    // TSN7101-7105 — generics
    TSN7101 => { message: "unsupported structural generic constraint shape" },
    TSN7102 => { message: "generic instantiation is unsatisfiable against its constraint" },
    TSN7103 => { message: "type argument count mismatch" },
    TSN7104 => { message: "nullable type parameter cannot be expressed in the target without an added constraint" },
    TSN7105 => { message: "variadic generic constraints are not supported by the target's native generics" },

    // TSN7201-7204 — type aliases / interfaces
    TSN7201 => { message: "purely structural recursive type alias has no nominal base case" },
    TSN7202 => { message: "conditional/mapped type expansion exceeded its depth cap" },
    TSN7203 => { message: "symbol-indexed signatures cannot be expressed nominally" },
    TSN7204 => { message: "variadic generic constraints are rejected" },

    // TSN9xxx — internal compiler error
    TSN9001 => { message: "internal compiler error: invariant violated" },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_codes_are_errors() {
        assert_eq!(DiagnosticCode::TSN1006.severity(), DiagnosticSeverity::Error);
        assert_eq!(DiagnosticCode::TSN1006.category(), DiagnosticCategory::Resolver);
    }

    #[test]
    fn naming_codes_are_warnings() {
        assert_eq!(DiagnosticCode::TSN4002.severity(), DiagnosticSeverity::Warning);
        assert_eq!(DiagnosticCode::TSN4002.category(), DiagnosticCategory::Naming);
    }

    #[test]
    fn code_display_matches_identifier() {
        assert_eq!(DiagnosticCode::TSN3012.as_str(), "TSN3012");
        assert_eq!(DiagnosticCode::TSN3012.to_string(), "TSN3012");
    }

    #[test]
    fn internal_errors_classify_as_internal() {
        assert_eq!(DiagnosticCode::TSN9001.category(), DiagnosticCategory::Internal);
        assert_eq!(DiagnosticCode::TSN9001.severity(), DiagnosticSeverity::Error);
    }
}
