//! Renders an `IrType` to the C# type syntax the emitter writes at
//! parameter, field, and return-type positions.

use tsonic_ir::types::{IrType, Primitive};

fn primitive_syntax(p: Primitive) -> &'static str {
    match p {
        Primitive::Number => "double",
        Primitive::String => "string",
        Primitive::Bool => "bool",
        Primitive::Void => "void",
        Primitive::Null => "object",
        Primitive::Any => "object",
        Primitive::Unknown => "object",
        Primitive::Int => "int",
        Primitive::Long => "long",
        Primitive::Decimal => "decimal",
        Primitive::Float => "float",
        Primitive::Byte => "byte",
        Primitive::Double => "double",
    }
}

pub fn render_type(ty: &IrType) -> String {
    match ty {
        IrType::Primitive(p) => primitive_syntax(*p).to_string(),
        IrType::Nullable(inner) => {
            let rendered = render_type(inner);
            if rendered == "object" {
                rendered
            } else {
                format!("{rendered}?")
            }
        }
        IrType::Array(inner) => format!("{}[]", render_type(inner)),
        IrType::List(inner) => format!("List<{}>", render_type(inner)),
        IrType::Tuple(items) => format!("({})", items.iter().map(render_type).collect::<Vec<_>>().join(", ")),
        IrType::ObjectRef { name, type_arguments } => {
            if type_arguments.is_empty() {
                name.clone()
            } else {
                format!("{}<{}>", name, type_arguments.iter().map(render_type).collect::<Vec<_>>().join(", "))
            }
        }
        IrType::Function(f) => {
            if matches!(f.return_type.as_ref(), IrType::Primitive(Primitive::Void)) {
                format!("Action<{}>", f.parameters.iter().map(render_type).collect::<Vec<_>>().join(", "))
            } else {
                let mut params: Vec<String> = f.parameters.iter().map(render_type).collect();
                params.push(render_type(&f.return_type));
                format!("Func<{}>", params.join(", "))
            }
        }
        IrType::TypeParameterRef { name, .. } => name.clone(),
        IrType::Promise(inner) => {
            if matches!(inner.as_ref(), IrType::Primitive(Primitive::Void)) {
                "Task".to_string()
            } else {
                format!("Task<{}>", render_type(inner))
            }
        }
        IrType::Generator(g) => format!("IAsyncEnumerator<{}>", render_type(&g.yield_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nullable_list_of_string() {
        let ty = IrType::Nullable(Box::new(IrType::List(Box::new(IrType::Primitive(Primitive::String)))));
        assert_eq!(render_type(&ty), "List<string>?");
    }

    #[test]
    fn renders_promise_of_int_as_task() {
        let ty = IrType::Promise(Box::new(IrType::Primitive(Primitive::Int)));
        assert_eq!(render_type(&ty), "Task<int>");
    }

    #[test]
    fn renders_void_promise_as_bare_task() {
        let ty = IrType::Promise(Box::new(IrType::Primitive(Primitive::Void)));
        assert_eq!(render_type(&ty), "Task");
    }
}
