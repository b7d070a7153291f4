//! IR statement tree.

use serde::{Deserialize, Serialize};

use crate::declarations::Parameter;
use crate::expressions::Expr;
use crate::provenance::Provenance;
use crate::types::IrType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StmtNode {
    pub provenance: Provenance,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    Expression(Expr),
    Let {
        name: String,
        ty: IrType,
        initializer: Option<Expr>,
        is_const: bool,
    },
    Return(Option<Expr>),
    /// Constructor-only; must be the first statement in its body or the
    /// validator rejects it.
    SuperCall {
        arguments: Vec<Expr>,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    ForOf {
        binding: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Break,
    Continue,
    Throw(Expr),
    /// `function` expression statements lower to a local method group rather
    /// than a closure when they capture no outer state.
    LocalFunction {
        name: String,
        parameters: Vec<Parameter>,
        return_type: IrType,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
}

pub type Stmt = Box<StmtNode>;

impl StmtNode {
    pub fn new(provenance: Provenance, kind: StmtKind) -> Stmt {
        Box::new(Self { provenance, kind })
    }
}
