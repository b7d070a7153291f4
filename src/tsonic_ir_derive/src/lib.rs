//! `#[derive(IrNode)]`: generates the `IrNode` boilerplate (`provenance()` /
//! `kind_name()`) for every IR declaration's inner struct, keeping that
//! boilerplate out of each declaration file.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(IrNode)]
pub fn derive_ir_node(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let has_provenance_field = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().any(|f| f.ident.as_ref().is_some_and(|id| id == "provenance")),
            _ => false,
        },
        _ => false,
    };

    let name_str = name.to_string();

    let expanded = if has_provenance_field {
        quote! {
            impl crate::IrNode for #name {
                fn provenance(&self) -> &crate::Provenance {
                    &self.provenance
                }
                fn kind_name(&self) -> &'static str {
                    #name_str
                }
            }
        }
    } else {
        quote! {
            compile_error!("#[derive(IrNode)] requires a named field `provenance: Provenance`.");
        }
    };

    TokenStream::from(expanded)
}
