//! Recursive substitution of type-parameter references by concrete types,
//! applied to IR types, expressions and statements when cloning a generic
//! declaration into a monomorphised copy.

use std::collections::HashMap;

use tsonic_ir::expressions::{Expr, ExprKind, SpecialisationInfo};
use tsonic_ir::statements::{Stmt, StmtKind};
use tsonic_ir::types::{FunctionType, GeneratorType, IrType, StructuralMember};

pub type Substitution = HashMap<usize, IrType>;

pub fn substitute_type(ty: &IrType, subs: &Substitution) -> IrType {
    match ty {
        IrType::TypeParameterRef { ordinal, .. } => subs.get(ordinal).cloned().unwrap_or_else(|| ty.clone()),
        IrType::Primitive(_) => ty.clone(),
        IrType::Nullable(inner) => IrType::Nullable(Box::new(substitute_type(inner, subs))),
        IrType::Array(inner) => IrType::Array(Box::new(substitute_type(inner, subs))),
        IrType::List(inner) => IrType::List(Box::new(substitute_type(inner, subs))),
        IrType::Tuple(items) => IrType::Tuple(items.iter().map(|t| substitute_type(t, subs)).collect()),
        IrType::ObjectRef { name, type_arguments } => IrType::ObjectRef {
            name: name.clone(),
            type_arguments: type_arguments.iter().map(|t| substitute_type(t, subs)).collect(),
        },
        IrType::Function(f) => IrType::Function(FunctionType {
            parameters: f.parameters.iter().map(|t| substitute_type(t, subs)).collect(),
            return_type: Box::new(substitute_type(&f.return_type, subs)),
            is_async: f.is_async,
            is_generator: f.is_generator,
        }),
        IrType::Promise(inner) => IrType::Promise(Box::new(substitute_type(inner, subs))),
        IrType::Generator(g) => IrType::Generator(GeneratorType {
            yield_type: Box::new(substitute_type(&g.yield_type, subs)),
            return_type: Box::new(substitute_type(&g.return_type, subs)),
            next_type: Box::new(substitute_type(&g.next_type, subs)),
        }),
    }
}

fn substitute_member(member: &StructuralMember, subs: &Substitution) -> StructuralMember {
    StructuralMember {
        name: member.name.clone(),
        ty: Box::new(substitute_type(&member.ty, subs)),
        readonly: member.readonly,
    }
}

pub fn substitute_members(members: &[StructuralMember], subs: &Substitution) -> Vec<StructuralMember> {
    members.iter().map(|m| substitute_member(m, subs)).collect()
}

fn substitute_specialisation(info: &SpecialisationInfo, subs: &Substitution) -> SpecialisationInfo {
    SpecialisationInfo {
        explicit_type_arguments: info.explicit_type_arguments.iter().map(|t| substitute_type(t, subs)).collect(),
        inferred_type_arguments: info.inferred_type_arguments.iter().map(|t| substitute_type(t, subs)).collect(),
        requires_specialisation: info.requires_specialisation,
    }
}

pub fn substitute_expr(expr: &Expr, subs: &Substitution) -> Expr {
    let ty = substitute_type(&expr.ty, subs);
    let kind = match &expr.kind {
        ExprKind::Literal(l) => ExprKind::Literal(l.clone()),
        ExprKind::Identifier(name) => ExprKind::Identifier(name.clone()),
        ExprKind::TemplateString { parts, substitutions } => ExprKind::TemplateString {
            parts: parts.clone(),
            substitutions: substitutions.iter().map(|e| substitute_expr(e, subs)).collect(),
        },
        ExprKind::Array(items) => ExprKind::Array(items.iter().map(|e| substitute_expr(e, subs)).collect()),
        ExprKind::Tuple(items) => ExprKind::Tuple(items.iter().map(|e| substitute_expr(e, subs)).collect()),
        ExprKind::Binary { op, left, right } => {
            ExprKind::Binary { op: *op, left: substitute_expr(left, subs), right: substitute_expr(right, subs) }
        }
        ExprKind::Unary { op, operand } => ExprKind::Unary { op: *op, operand: substitute_expr(operand, subs) },
        ExprKind::InstanceOf { value, target } => {
            ExprKind::InstanceOf { value: substitute_expr(value, subs), target: target.clone() }
        }
        ExprKind::Member { object, property, optional } => {
            ExprKind::Member { object: substitute_expr(object, subs), property: property.clone(), optional: *optional }
        }
        ExprKind::Index { object, index } => {
            ExprKind::Index { object: substitute_expr(object, subs), index: substitute_expr(index, subs) }
        }
        ExprKind::Call { callee, arguments, specialisation } => ExprKind::Call {
            callee: substitute_expr(callee, subs),
            arguments: arguments.iter().map(|e| substitute_expr(e, subs)).collect(),
            specialisation: substitute_specialisation(specialisation, subs),
        },
        ExprKind::Construction { type_name, arguments, specialisation } => ExprKind::Construction {
            type_name: type_name.clone(),
            arguments: arguments.iter().map(|e| substitute_expr(e, subs)).collect(),
            specialisation: substitute_specialisation(specialisation, subs),
        },
        ExprKind::Assign { target, value } => {
            ExprKind::Assign { target: substitute_expr(target, subs), value: substitute_expr(value, subs) }
        }
        ExprKind::Conditional { condition, then_branch, else_branch } => ExprKind::Conditional {
            condition: substitute_expr(condition, subs),
            then_branch: substitute_expr(then_branch, subs),
            else_branch: substitute_expr(else_branch, subs),
        },
        ExprKind::Yield { value, delegate } => {
            ExprKind::Yield { value: value.as_ref().map(|e| substitute_expr(e, subs)), delegate: *delegate }
        }
        ExprKind::Lambda { parameters, body } => {
            ExprKind::Lambda { parameters: parameters.clone(), body: substitute_expr(body, subs) }
        }
    };
    tsonic_ir::expressions::ExprNode::new(expr.provenance.clone(), ty, kind)
}

pub fn substitute_stmt(stmt: &Stmt, subs: &Substitution) -> Stmt {
    let kind = match &stmt.kind {
        StmtKind::Expression(e) => StmtKind::Expression(substitute_expr(e, subs)),
        StmtKind::Let { name, ty, initializer, is_const } => StmtKind::Let {
            name: name.clone(),
            ty: substitute_type(ty, subs),
            initializer: initializer.as_ref().map(|e| substitute_expr(e, subs)),
            is_const: *is_const,
        },
        StmtKind::Return(e) => StmtKind::Return(e.as_ref().map(|e| substitute_expr(e, subs))),
        StmtKind::SuperCall { arguments } => {
            StmtKind::SuperCall { arguments: arguments.iter().map(|e| substitute_expr(e, subs)).collect() }
        }
        StmtKind::If { condition, then_branch, else_branch } => StmtKind::If {
            condition: substitute_expr(condition, subs),
            then_branch: then_branch.iter().map(|s| substitute_stmt(s, subs)).collect(),
            else_branch: else_branch.iter().map(|s| substitute_stmt(s, subs)).collect(),
        },
        StmtKind::While { condition, body } => StmtKind::While {
            condition: substitute_expr(condition, subs),
            body: body.iter().map(|s| substitute_stmt(s, subs)).collect(),
        },
        StmtKind::ForOf { binding, iterable, body } => StmtKind::ForOf {
            binding: binding.clone(),
            iterable: substitute_expr(iterable, subs),
            body: body.iter().map(|s| substitute_stmt(s, subs)).collect(),
        },
        StmtKind::Break => StmtKind::Break,
        StmtKind::Continue => StmtKind::Continue,
        StmtKind::Throw(e) => StmtKind::Throw(substitute_expr(e, subs)),
        StmtKind::LocalFunction { name, parameters, return_type, body } => StmtKind::LocalFunction {
            name: name.clone(),
            parameters: parameters
                .iter()
                .map(|p| tsonic_ir::declarations::Parameter {
                    name: p.name.clone(),
                    ty: substitute_type(&p.ty, subs),
                    default: p.default.as_ref().map(|e| substitute_expr(e, subs)),
                    is_rest: p.is_rest,
                })
                .collect(),
            return_type: substitute_type(return_type, subs),
            body: body.iter().map(|s| substitute_stmt(s, subs)).collect(),
        },
        StmtKind::Block(body) => StmtKind::Block(body.iter().map(|s| substitute_stmt(s, subs)).collect()),
    };
    tsonic_ir::statements::StmtNode::new(stmt.provenance.clone(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};
    use tsonic_ir::expressions::ExprNode;
    use tsonic_ir::provenance::Provenance;
    use tsonic_ir::types::Primitive;

    fn prov() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    #[test]
    fn substitutes_type_parameter_ref() {
        let mut subs = Substitution::new();
        subs.insert(0, IrType::Primitive(Primitive::Int));
        let ty = IrType::Nullable(Box::new(IrType::TypeParameterRef { ordinal: 0, name: "T".into() }));
        assert_eq!(substitute_type(&ty, &subs), IrType::Nullable(Box::new(IrType::Primitive(Primitive::Int))));
    }

    #[test]
    fn substitutes_through_identifier_expression() {
        let mut subs = Substitution::new();
        subs.insert(0, IrType::Primitive(Primitive::String));
        let expr = ExprNode::new(
            prov(),
            IrType::TypeParameterRef { ordinal: 0, name: "T".into() },
            ExprKind::Identifier("v".into()),
        );
        let substituted = substitute_expr(&expr, &subs);
        assert_eq!(substituted.ty, IrType::Primitive(Primitive::String));
    }
}
