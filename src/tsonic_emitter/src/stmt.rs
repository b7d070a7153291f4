//! Statement lowering, writing directly into an `FmtWriter`.

use tsonic_ir::statements::{Stmt, StmtKind};

use crate::expr::render_expr;
use crate::types::render_type;
use crate::writer::FmtWriter;

pub fn render_stmt(w: &mut FmtWriter, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Expression(e) => w.line(&format!("{};", render_expr(e))),
        StmtKind::Let { name, ty, initializer, .. } => {
            let rendered_ty = render_type(ty);
            match initializer {
                Some(init) => w.line(&format!("{rendered_ty} {name} = {};", render_expr(init))),
                None => w.line(&format!("{rendered_ty} {name};")),
            }
        }
        StmtKind::Return(Some(e)) => w.line(&format!("return {};", render_expr(e))),
        StmtKind::Return(None) => w.line("return;"),
        StmtKind::SuperCall { .. } => {
            // Lowered into the constructor's `: base(...)` clause by the
            // declaration emitter, never written as an in-body statement.
        }
        StmtKind::If { condition, then_branch, else_branch } => {
            w.line(&format!("if ({})", render_expr(condition)));
            w.line("{");
            w.indent();
            for s in then_branch {
                render_stmt(w, s);
            }
            w.dedent();
            if else_branch.is_empty() {
                w.line("}");
            } else {
                w.line("}");
                w.line("else");
                w.line("{");
                w.indent();
                for s in else_branch {
                    render_stmt(w, s);
                }
                w.dedent();
                w.line("}");
            }
        }
        StmtKind::While { condition, body } => {
            w.line(&format!("while ({})", render_expr(condition)));
            w.line("{");
            w.indent();
            for s in body {
                render_stmt(w, s);
            }
            w.dedent();
            w.line("}");
        }
        StmtKind::ForOf { binding, iterable, body } => {
            w.line(&format!("foreach (var {binding} in {})", render_expr(iterable)));
            w.line("{");
            w.indent();
            for s in body {
                render_stmt(w, s);
            }
            w.dedent();
            w.line("}");
        }
        StmtKind::Break => w.line("break;"),
        StmtKind::Continue => w.line("continue;"),
        StmtKind::Throw(e) => w.line(&format!("throw {};", render_expr(e))),
        StmtKind::LocalFunction { name, parameters, return_type, body } => {
            let params = parameters
                .iter()
                .map(|p| format!("{} {}", render_type(&p.ty), p.name))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(&format!("{} {name}({params})", render_type(return_type)));
            w.line("{");
            w.indent();
            for s in body {
                render_stmt(w, s);
            }
            w.dedent();
            w.line("}");
        }
        StmtKind::Block(body) => {
            w.line("{");
            w.indent();
            for s in body {
                render_stmt(w, s);
            }
            w.dedent();
            w.line("}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};
    use tsonic_ir::expressions::{ExprNode, Literal};
    use tsonic_ir::provenance::Provenance;
    use tsonic_ir::statements::StmtNode;
    use tsonic_ir::types::{IrType, Primitive};

    fn prov() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    #[test]
    fn renders_return_with_expression() {
        let mut w = FmtWriter::new();
        let stmt = StmtNode::new(
            prov(),
            tsonic_ir::statements::StmtKind::Return(Some(ExprNode::new(
                prov(),
                IrType::Primitive(Primitive::Int),
                tsonic_ir::expressions::ExprKind::Literal(Literal::Int(1)),
            ))),
        );
        render_stmt(&mut w, &stmt);
        assert_eq!(w.finish(), "return 1;\n");
    }
}
