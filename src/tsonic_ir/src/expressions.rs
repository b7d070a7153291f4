//! IR expression tree. Every node carries its resolved type; Call and
//! Construction additionally carry type argument / specialisation metadata.

use serde::{Deserialize, Serialize};

use crate::provenance::Provenance;
use crate::types::IrType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    Int(i32),
    Long(i64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    NullishCoalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
    TypeOf,
    Await,
}

/// The part of a call/construction that records how the target generic
/// instantiation was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialisationInfo {
    pub explicit_type_arguments: Vec<IrType>,
    pub inferred_type_arguments: Vec<IrType>,
    pub requires_specialisation: bool,
}

impl SpecialisationInfo {
    pub fn none() -> Self {
        Self {
            explicit_type_arguments: Vec::new(),
            inferred_type_arguments: Vec::new(),
            requires_specialisation: false,
        }
    }

    /// The type arguments actually driving monomorphisation: explicit ones
    /// win over checker-inferred ones, position for position.
    pub fn effective_type_arguments(&self) -> Vec<IrType> {
        if !self.explicit_type_arguments.is_empty() {
            self.explicit_type_arguments.clone()
        } else {
            self.inferred_type_arguments.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprNode {
    pub provenance: Provenance,
    pub ty: IrType,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    TemplateString {
        parts: Vec<String>,
        substitutions: Vec<Expr>,
    },
    Array(Vec<Expr>),
    Tuple(Vec<Expr>),
    Binary {
        op: BinaryOp,
        left: Expr,
        right: Expr,
    },
    Unary {
        op: UnaryOp,
        operand: Expr,
    },
    /// `a instanceof B`.
    InstanceOf {
        value: Expr,
        target: String,
    },
    Member {
        object: Expr,
        property: String,
        optional: bool,
    },
    Index {
        object: Expr,
        index: Expr,
    },
    Call {
        callee: Expr,
        arguments: Vec<Expr>,
        specialisation: SpecialisationInfo,
    },
    Construction {
        type_name: String,
        arguments: Vec<Expr>,
        specialisation: SpecialisationInfo,
    },
    Assign {
        target: Expr,
        value: Expr,
    },
    Conditional {
        condition: Expr,
        then_branch: Expr,
        else_branch: Expr,
    },
    /// `yield`/`yield*` inside a generator body.
    Yield {
        value: Option<Expr>,
        delegate: bool,
    },
    Lambda {
        parameters: Vec<String>,
        body: Expr,
    },
}

pub type Expr = Box<ExprNode>;

impl ExprNode {
    pub fn new(provenance: Provenance, ty: IrType, kind: ExprKind) -> Expr {
        Box::new(Self { provenance, ty, kind })
    }
}
