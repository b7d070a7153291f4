//! The typed intermediate representation and the builder that lowers a
//! source AST into it.

pub mod builder;
pub mod declarations;
pub mod expressions;
pub mod facade;
pub mod module;
pub mod provenance;
pub mod source_ast;
pub mod statements;
pub mod types;

pub use builder::IrBuilder;
pub use declarations::IrDeclaration;
pub use expressions::{Expr, ExprKind, ExprNode};
pub use facade::TypeResolver;
pub use module::IrModule;
pub use provenance::{IrNode, Provenance};
pub use statements::{Stmt, StmtKind, StmtNode};
pub use types::{IrType, IrTypeParameter};
