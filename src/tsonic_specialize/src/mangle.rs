//! Stable text tokens for types, used both for adapter member-set hashing
//! and for monomorphised declaration names.

use tsonic_ir::types::{IrType, Primitive};

fn primitive_token(p: Primitive) -> &'static str {
    match p {
        Primitive::Number => "number",
        Primitive::String => "string",
        Primitive::Bool => "bool",
        Primitive::Void => "void",
        Primitive::Null => "null",
        Primitive::Any => "any",
        Primitive::Unknown => "unknown",
        Primitive::Int => "int",
        Primitive::Long => "long",
        Primitive::Decimal => "decimal",
        Primitive::Float => "float",
        Primitive::Byte => "byte",
        Primitive::Double => "double",
    }
}

/// Renders a type to a token suitable for embedding in a mangled name or a
/// member-signature hash. Not meant to round-trip; only to be stable and
/// collision-resistant for the shapes this compiler actually produces.
pub fn mangle_type(ty: &IrType) -> String {
    match ty {
        IrType::Primitive(p) => primitive_token(*p).to_string(),
        IrType::Nullable(inner) => format!("Nullable_{}", mangle_type(inner)),
        IrType::Array(inner) => format!("Array_{}", mangle_type(inner)),
        IrType::List(inner) => format!("List_{}", mangle_type(inner)),
        IrType::Tuple(items) => format!("Tuple_{}", items.iter().map(mangle_type).collect::<Vec<_>>().join("_")),
        IrType::ObjectRef { name, type_arguments } => {
            if type_arguments.is_empty() {
                name.clone()
            } else {
                format!("{}_{}", name, type_arguments.iter().map(mangle_type).collect::<Vec<_>>().join("_"))
            }
        }
        IrType::Function(f) => format!("Fn{}_{}", f.parameters.len(), mangle_type(&f.return_type)),
        IrType::TypeParameterRef { name, .. } => name.clone(),
        IrType::Promise(inner) => format!("Task_{}", mangle_type(inner)),
        IrType::Generator(g) => format!("Gen_{}", mangle_type(&g.yield_type)),
    }
}

/// `declaration_name + "__" + joined argument tokens`.
pub fn mangled_name(declaration_name: &str, type_arguments: &[IrType]) -> String {
    let tokens = type_arguments.iter().map(mangle_type).collect::<Vec<_>>().join("_");
    format!("{declaration_name}__{tokens}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangles_nested_generic_arguments() {
        let ty = IrType::List(Box::new(IrType::Primitive(Primitive::Int)));
        assert_eq!(mangle_type(&ty), "List_int");
    }

    #[test]
    fn mangled_name_joins_multiple_arguments() {
        let args = vec![IrType::Primitive(Primitive::String), IrType::Primitive(Primitive::Int)];
        assert_eq!(mangled_name("pair", &args), "pair__string_int");
    }
}
