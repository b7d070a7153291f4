//! Declarative diagnostic-code table generator.
//!
//! Expands a flat list of `Code => { message: "..." }` entries into the
//! `DiagnosticCode` enum plus lookup methods, deriving severity from the
//! code's numeric prefix instead of requiring it to be spelled out at every
//! call site.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Ident, LitStr, Token, braced,
    parse::Parse,
    parse_macro_input,
    punctuated::Punctuated,
    token::Comma,
};

struct Entry {
    code: Ident,
    message: LitStr,
}

impl Parse for Entry {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let code: Ident = input.parse()?;
        let _arrow: Token![=>] = input.parse()?;
        let content;
        let _brace = braced!(content in input);
        let mut message: Option<LitStr> = None;
        while !content.is_empty() {
            let field: Ident = content.parse()?;
            let _colon: Token![:] = content.parse()?;
            match field.to_string().as_str() {
                "message" => message = Some(content.parse()?),
                _ => {
                    let _ = content.parse::<syn::Expr>()?;
                }
            }
            let _ = content.parse::<Comma>();
        }
        let message = message
            .ok_or_else(|| syn::Error::new(code.span(), "missing `message` field for diagnostic code"))?;
        Ok(Entry { code, message })
    }
}

struct Spec {
    entries: Punctuated<Entry, Comma>,
}

impl Parse for Spec {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        Ok(Spec {
            entries: Punctuated::parse_terminated(input)?,
        })
    }
}

/// Severity and category follow the TSN prefix contract:
/// `TSN1xxx` resolver, `TSN2xxx` emitter-surface, `TSN3xxx` language-rule,
/// `TSN4xxx` naming/collision, `TSN7xxx` generics/types. Everything is an
/// error except the naming/collision family, which is always
/// warning-severity suggested-fix diagnostics.
fn classify(code_str: &str) -> (proc_macro2::TokenStream, proc_macro2::TokenStream) {
    let digits = code_str.trim_start_matches("TSN");
    let family = digits.chars().next().unwrap_or('0');
    let category = match family {
        '1' => quote! { DiagnosticCategory::Resolver },
        '2' => quote! { DiagnosticCategory::EmitterSurface },
        '3' => quote! { DiagnosticCategory::LanguageRule },
        '4' => quote! { DiagnosticCategory::Naming },
        '7' => quote! { DiagnosticCategory::GenericsAndTypes },
        _ => quote! { DiagnosticCategory::Internal },
    };
    let severity = if family == '4' {
        quote! { DiagnosticSeverity::Warning }
    } else {
        quote! { DiagnosticSeverity::Error }
    };
    (severity, category)
}

#[proc_macro]
pub fn diagnostic_codes(input: TokenStream) -> TokenStream {
    let Spec { entries } = parse_macro_input!(input as Spec);

    let mut variants = Vec::new();
    let mut as_str_arms = Vec::new();
    let mut message_arms = Vec::new();
    let mut severity_arms = Vec::new();
    let mut category_arms = Vec::new();

    for entry in entries.iter() {
        let ident = &entry.code;
        let code_str = ident.to_string();
        let msg = &entry.message;
        let (severity, category) = classify(&code_str);

        variants.push(quote! { #ident });
        as_str_arms.push(quote! { DiagnosticCode::#ident => #code_str });
        message_arms.push(quote! { DiagnosticCode::#ident => #msg });
        severity_arms.push(quote! { DiagnosticCode::#ident => #severity });
        category_arms.push(quote! { DiagnosticCode::#ident => #category });
    }

    let expanded = quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum DiagnosticCode {
            #( #variants ),*
        }

        impl DiagnosticCode {
            /// The stable `TSN####` identifier, e.g. `"TSN1003"`.
            pub fn as_str(&self) -> &'static str {
                match self { #( #as_str_arms, )* }
            }

            /// Default human-readable message template for this code.
            pub fn default_message(&self) -> &'static str {
                match self { #( #message_arms, )* }
            }

            pub fn severity(&self) -> DiagnosticSeverity {
                match self { #( #severity_arms, )* }
            }

            pub fn category(&self) -> DiagnosticCategory {
                match self { #( #category_arms, )* }
            }
        }

        impl std::fmt::Display for DiagnosticCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };

    expanded.into()
}
