//! Expression lowering. Most expressions map straight across; a few source
//! idioms with no direct C# equivalent route through static runtime helpers
//! instead (JS array/string methods, `typeof`, `instanceof`).

use tsonic_ir::expressions::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use tsonic_ir::types::IrType;

use crate::types::render_type;

fn binary_op_syntax(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::StrictEq => "==",
        BinaryOp::StrictNotEq => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Lte => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Gte => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::NullishCoalesce => "??",
    }
}

fn literal_syntax(lit: &Literal) -> String {
    match lit {
        Literal::Number(n) => format!("{n}d"),
        Literal::Int(i) => i.to_string(),
        Literal::Long(l) => format!("{l}L"),
        Literal::String(s) => format!("{:?}", s),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Undefined => "null".to_string(),
    }
}

/// Whether a call to `property(...)` on a receiver of this type must route
/// through a static runtime helper rather than dispatching as a member call.
fn routes_through_runtime_helper(receiver_ty: &IrType) -> Option<&'static str> {
    match receiver_ty.unwrap_nullable() {
        IrType::Array(_) => Some("Tsonic.Runtime.ArrayHelpers"),
        IrType::Primitive(tsonic_ir::types::Primitive::String) => Some("Tsonic.Runtime.StringHelpers"),
        _ => None,
    }
}

pub fn render_expr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(l) => literal_syntax(l),
        ExprKind::Identifier(name) => name.clone(),
        ExprKind::TemplateString { parts, substitutions } => {
            let mut out = String::from("$\"");
            for (i, part) in parts.iter().enumerate() {
                out.push_str(&part.replace('"', "\\\""));
                if let Some(sub) = substitutions.get(i) {
                    out.push('{');
                    out.push_str(&render_expr(sub));
                    out.push('}');
                }
            }
            out.push('"');
            out
        }
        ExprKind::Array(items) => format!("new[] {{ {} }}", items.iter().map(render_expr).collect::<Vec<_>>().join(", ")),
        ExprKind::Tuple(items) => format!("({})", items.iter().map(render_expr).collect::<Vec<_>>().join(", ")),
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", render_expr(left), binary_op_syntax(*op), render_expr(right))
        }
        ExprKind::Unary { op, operand } => match op {
            UnaryOp::Neg => format!("(-{})", render_expr(operand)),
            UnaryOp::Not => format!("(!{})", render_expr(operand)),
            UnaryOp::TypeOf => format!("Tsonic.Runtime.TypeHelpers.TypeOf({})", render_expr(operand)),
            UnaryOp::Await => format!("(await {})", render_expr(operand)),
        },
        ExprKind::InstanceOf { value, target } => format!("({} is {})", render_expr(value), target),
        ExprKind::Member { object, property, optional } => {
            let sep = if *optional { "?." } else { "." };
            format!("{}{sep}{property}", render_expr(object))
        }
        ExprKind::Index { object, index } => format!("{}[{}]", render_expr(object), render_expr(index)),
        ExprKind::Call { callee, arguments, specialisation } => {
            let args: Vec<String> = arguments.iter().map(render_expr).collect();
            if let ExprKind::Member { object, property, .. } = &callee.kind {
                if let Some(helper) = routes_through_runtime_helper(&object.ty) {
                    let mut all_args = vec![render_expr(object)];
                    all_args.extend(args);
                    return format!("{helper}.{property}({})", all_args.join(", "));
                }
            }
            let type_args = specialisation.effective_type_arguments();
            let generic = if type_args.is_empty() {
                String::new()
            } else {
                format!("<{}>", type_args.iter().map(render_type).collect::<Vec<_>>().join(", "))
            };
            format!("{}{generic}({})", render_expr(callee), args.join(", "))
        }
        ExprKind::Construction { type_name, arguments, specialisation } => {
            let args: Vec<String> = arguments.iter().map(render_expr).collect();
            let type_args = specialisation.effective_type_arguments();
            let generic = if type_args.is_empty() {
                String::new()
            } else {
                format!("<{}>", type_args.iter().map(render_type).collect::<Vec<_>>().join(", "))
            };
            format!("new {type_name}{generic}({})", args.join(", "))
        }
        ExprKind::Assign { target, value } => format!("{} = {}", render_expr(target), render_expr(value)),
        ExprKind::Conditional { condition, then_branch, else_branch } => {
            format!("({} ? {} : {})", render_expr(condition), render_expr(then_branch), render_expr(else_branch))
        }
        ExprKind::Yield { value, delegate } => match (value, delegate) {
            (Some(v), true) => format!("yield return* {}", render_expr(v)),
            (Some(v), false) => format!("yield return {}", render_expr(v)),
            (None, _) => "yield break".to_string(),
        },
        ExprKind::Lambda { parameters, body } => format!("({}) => {}", parameters.join(", "), render_expr(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};
    use tsonic_ir::expressions::{ExprNode, SpecialisationInfo};
    use tsonic_ir::provenance::Provenance;
    use tsonic_ir::types::Primitive;

    fn prov() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    #[test]
    fn array_push_routes_through_runtime_helper() {
        let receiver = ExprNode::new(prov(), IrType::Array(Box::new(IrType::Primitive(Primitive::Int))), ExprKind::Identifier("xs".into()));
        let callee = ExprNode::new(
            prov(),
            IrType::Primitive(Primitive::Any),
            ExprKind::Member { object: receiver, property: "push".into(), optional: false },
        );
        let call = ExprNode::new(
            prov(),
            IrType::Primitive(Primitive::Void),
            ExprKind::Call {
                callee,
                arguments: vec![ExprNode::new(prov(), IrType::Primitive(Primitive::Int), ExprKind::Literal(Literal::Int(1)))],
                specialisation: SpecialisationInfo::none(),
            },
        );
        assert_eq!(render_expr(&call), "Tsonic.Runtime.ArrayHelpers.push(xs, 1)");
    }

    #[test]
    fn template_string_interpolates_substitutions() {
        let sub = ExprNode::new(prov(), IrType::Primitive(Primitive::Int), ExprKind::Identifier("n".into()));
        let expr = ExprNode::new(
            prov(),
            IrType::Primitive(Primitive::String),
            ExprKind::TemplateString { parts: vec!["count: ".into(), "".into()], substitutions: vec![sub] },
        );
        assert_eq!(render_expr(&expr), "$\"count: {n}\"");
    }

    #[test]
    fn instanceof_becomes_is_pattern() {
        let value = ExprNode::new(prov(), IrType::Primitive(Primitive::Any), ExprKind::Identifier("v".into()));
        let expr = ExprNode::new(
            prov(),
            IrType::Primitive(Primitive::Bool),
            ExprKind::InstanceOf { value, target: "Widget".into() },
        );
        assert_eq!(render_expr(&expr), "(v is Widget)");
    }
}
