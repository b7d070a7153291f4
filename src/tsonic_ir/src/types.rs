//! The typed vocabulary every declaration, expression and statement node is
//! built from.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Number,
    String,
    Bool,
    Void,
    Null,
    Any,
    Unknown,
    Int,
    Long,
    Decimal,
    Float,
    Byte,
    Double,
}

/// One required structural member: `{ name: type, readonly? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralMember {
    pub name: String,
    pub ty: Box<IrType>,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub parameters: Vec<IrType>,
    pub return_type: Box<IrType>,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorType {
    pub yield_type: Box<IrType>,
    pub return_type: Box<IrType>,
    pub next_type: Box<IrType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrType {
    Primitive(Primitive),
    Nullable(Box<IrType>),
    /// "JS array" semantic (sparse, length-settable).
    Array(Box<IrType>),
    /// ".NET list" semantic.
    List(Box<IrType>),
    Tuple(Vec<IrType>),
    /// A reference to a nominal declaration, with optional type arguments.
    ObjectRef {
        name: String,
        type_arguments: Vec<IrType>,
    },
    Function(FunctionType),
    TypeParameterRef {
        ordinal: usize,
        name: String,
    },
    /// Lowered to `Task`/`Task<T>`.
    Promise(Box<IrType>),
    /// Lowered to an `IAsyncEnumerator`-equivalent contract.
    Generator(GeneratorType),
}

impl IrType {
    pub fn is_nullable(&self) -> bool {
        matches!(self, IrType::Nullable(_))
    }

    pub fn unwrap_nullable(&self) -> &IrType {
        match self {
            IrType::Nullable(inner) => inner.unwrap_nullable(),
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrTypeParameter {
    pub ordinal: usize,
    pub name: String,
    pub nominal_constraint: Option<IrType>,
    pub structural_constraint: Option<Vec<StructuralMember>>,
    pub default: Option<IrType>,
    pub requires_specialisation: bool,
}

impl IrTypeParameter {
    pub fn new(ordinal: usize, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
            nominal_constraint: None,
            structural_constraint: None,
            default: None,
            requires_specialisation: false,
        }
    }

    /// A type parameter needs monomorphisation (or an adapter) when it
    /// carries a structural constraint the target's native generics cannot
    /// express directly.
    pub fn needs_adapter(&self) -> bool {
        self.structural_constraint.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_unwraps_to_inner() {
        let t = IrType::Nullable(Box::new(IrType::Primitive(Primitive::Number)));
        assert_eq!(t.unwrap_nullable(), &IrType::Primitive(Primitive::Number));
    }

    #[test]
    fn structural_type_parameter_needs_adapter() {
        let mut tp = IrTypeParameter::new(0, "T");
        assert!(!tp.needs_adapter());
        tp.structural_constraint = Some(vec![StructuralMember {
            name: "length".into(),
            ty: Box::new(IrType::Primitive(Primitive::Int)),
            readonly: true,
        }]);
        assert!(tp.needs_adapter());
    }
}
