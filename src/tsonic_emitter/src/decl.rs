//! Declaration lowering: fields, constructor, methods (instance before
//! static, both in source order), then nested types, each member separated
//! by a blank line.

use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use tsonic_ir::declarations::{
    BaseClass, Block, ClassDecl, EnumDecl, FieldDecl, FunctionDecl, InterfaceDecl, IrDeclaration, Parameter, TypeAliasDecl,
    VariableDecl, Visibility,
};
use tsonic_ir::expressions::Expr;
use tsonic_ir::statements::StmtKind;
use tsonic_ir::types::IrTypeParameter;

use crate::expr::render_expr;
use crate::stmt::render_stmt;
use crate::types::render_type;
use crate::writer::FmtWriter;

fn visibility_syntax(v: Visibility) -> &'static str {
    match v {
        Visibility::Public => "public",
        Visibility::Internal => "internal",
        Visibility::Private => "private",
        Visibility::Protected => "protected",
    }
}

fn render_type_parameters(type_parameters: &[IrTypeParameter]) -> String {
    if type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", type_parameters.iter().map(|tp| tp.name.clone()).collect::<Vec<_>>().join(", "))
    }
}

fn render_where_clauses(type_parameters: &[IrTypeParameter]) -> Vec<String> {
    type_parameters
        .iter()
        .filter_map(|tp| tp.nominal_constraint.as_ref().map(|c| format!("where {} : {}", tp.name, render_type(c))))
        .collect()
}

fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| match &p.default {
            Some(d) => format!("{} {} = {}", render_type(&p.ty), p.name, render_expr(d)),
            None => format!("{} {}", render_type(&p.ty), p.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A generator/async body lowers to a flat sequence of C# statements; the
/// block boundaries only matter to the specialiser's state-machine sizing,
/// not to the textual output.
fn render_body(w: &mut FmtWriter, blocks: &[Block]) {
    for block in blocks {
        for stmt in &block.statements {
            render_stmt(w, stmt);
        }
    }
}

fn render_method_signature(f: &FunctionDecl) -> String {
    let modifier = if f.is_static { "static " } else { "" };
    let async_modifier = if f.is_async { "async " } else { "" };
    let return_ty = if f.is_async {
        format!("Task<{}>", render_type(&f.return_type))
    } else {
        render_type(&f.return_type)
    };
    let type_params = render_type_parameters(&f.type_parameters);
    format!(
        "{} {modifier}{async_modifier}{return_ty} {}{type_params}({})",
        visibility_syntax(f.visibility),
        f.name,
        render_parameters(&f.parameters)
    )
}

pub fn render_method(w: &mut FmtWriter, f: &FunctionDecl) {
    w.line(&render_method_signature(f));
    for clause in render_where_clauses(&f.type_parameters) {
        w.indent();
        w.line(&clause);
        w.dedent();
    }
    w.line("{");
    w.indent();
    render_body(w, &f.body);
    w.dedent();
    w.line("}");
}

fn split_super_call(body: &[Block]) -> (Option<Vec<Expr>>, Vec<Block>) {
    let mut blocks = body.to_vec();
    if let Some(first_block) = blocks.first_mut() {
        if let Some(first_stmt) = first_block.statements.first() {
            if let StmtKind::SuperCall { arguments } = &first_stmt.kind {
                let args: Vec<Expr> = arguments.clone();
                first_block.statements.remove(0);
                return (Some(args), blocks);
            }
        }
    }
    (None, blocks)
}

fn render_constructor(w: &mut FmtWriter, class_name: &str, ctor: &FunctionDecl) {
    let (super_args, rest) = split_super_call(&ctor.body);
    let base_clause = match &super_args {
        Some(args) if !args.is_empty() => format!(" : base({})", args.iter().map(render_expr).collect::<Vec<_>>().join(", ")),
        Some(_) => " : base()".to_string(),
        None => String::new(),
    };
    w.line(&format!(
        "{} {class_name}({}){base_clause}",
        visibility_syntax(ctor.visibility),
        render_parameters(&ctor.parameters)
    ));
    w.line("{");
    w.indent();
    render_body(w, &rest);
    w.dedent();
    w.line("}");
}

fn render_field(w: &mut FmtWriter, field: &FieldDecl, class_name: &str, diagnostics: &mut DiagnosticCollection) {
    let name = resolve_member_name(&field.name, class_name, diagnostics);
    let modifier = if field.is_static { "static " } else { "" };
    let readonly = if field.readonly { "readonly " } else { "" };
    match &field.initializer {
        Some(init) => w.line(&format!(
            "{} {modifier}{readonly}{} {name} = {};",
            visibility_syntax(field.visibility),
            render_type(&field.ty),
            render_expr(init)
        )),
        None => w.line(&format!(
            "{} {modifier}{readonly}{} {name};",
            visibility_syntax(field.visibility),
            render_type(&field.ty)
        )),
    }
}

/// A field or method sharing its containing class's name does not compile
/// in C# (it collides with the constructor); suffixed with `Member` and
/// recorded as TSN4002 rather than silently producing broken output.
fn resolve_member_name(name: &str, class_name: &str, diagnostics: &mut DiagnosticCollection) -> String {
    if name == class_name {
        diagnostics.push(
            Diagnostic::new(DiagnosticCode::TSN4002, None)
                .with_suggested_fix(format!("{name}Member")),
        );
        format!("{name}Member")
    } else {
        name.to_string()
    }
}

pub fn render_class(w: &mut FmtWriter, class: &ClassDecl, diagnostics: &mut DiagnosticCollection) {
    let mut bases = Vec::new();
    if let Some(base) = &class.base_class {
        bases.push(render_base(base));
    }
    for iface in &class.interfaces {
        bases.push(render_base(iface));
    }
    let base_clause = if bases.is_empty() { String::new() } else { format!(" : {}", bases.join(", ")) };
    let (kind, sealed_modifier) = if class.is_value_type { ("struct", "") } else { ("class", "sealed ") };
    w.line(&format!(
        "{} {sealed_modifier}{kind} {}{}{base_clause}",
        visibility_syntax(class.visibility),
        class.name,
        render_type_parameters(&class.type_parameters)
    ));
    for clause in render_where_clauses(&class.type_parameters) {
        w.indent();
        w.line(&clause);
        w.dedent();
    }
    w.line("{");
    w.indent();

    let mut first = true;
    for field in &class.fields {
        if !first {
            w.blank_line();
        }
        first = false;
        render_field(w, field, &class.name, diagnostics);
    }
    if let Some(ctor) = &class.constructor {
        if !first {
            w.blank_line();
        }
        first = false;
        render_constructor(w, &class.name, ctor);
    }
    for method in class.methods.iter().filter(|m| !m.is_static) {
        if !first {
            w.blank_line();
        }
        first = false;
        render_method(w, method);
    }
    for method in class.methods.iter().filter(|m| m.is_static) {
        if !first {
            w.blank_line();
        }
        first = false;
        render_method(w, method);
    }

    w.dedent();
    w.line("}");
}

fn render_base(base: &BaseClass) -> String {
    if base.type_arguments.is_empty() {
        base.name.clone()
    } else {
        format!("{}<{}>", base.name, base.type_arguments.iter().map(render_type).collect::<Vec<_>>().join(", "))
    }
}

pub fn render_interface(w: &mut FmtWriter, iface: &InterfaceDecl) {
    let extends: Vec<String> = iface.extends.iter().map(render_base).collect();
    let extends_clause = if extends.is_empty() { String::new() } else { format!(" : {}", extends.join(", ")) };
    w.line(&format!(
        "{} interface {}{}{}",
        visibility_syntax(iface.visibility),
        iface.name,
        render_type_parameters(&iface.type_parameters),
        extends_clause
    ));
    w.line("{");
    w.indent();
    for member in &iface.members {
        let ty = render_type(&member.ty);
        w.line(&format!("{ty} {} {{ get; {}}}", member.name, if member.readonly { "" } else { "set; " }));
    }
    w.dedent();
    w.line("}");
}

/// Type aliases have no runtime representation once specialised; resolved
/// aliases are inlined at use sites by the type facade, so the only
/// surviving textual form is a `using` alias directive for simple renames.
pub fn render_type_alias(alias: &TypeAliasDecl) -> String {
    format!("using {} = {};", alias.name, render_type(&alias.aliased))
}

pub fn render_enum(w: &mut FmtWriter, e: &EnumDecl) {
    w.line(&format!("{} enum {}", visibility_syntax(e.visibility), e.name));
    w.line("{");
    w.indent();
    for member in &e.members {
        match &member.value {
            Some(v) => w.line(&format!("{} = {},", member.name, render_expr(v))),
            None => w.line(&format!("{},", member.name)),
        }
    }
    w.dedent();
    w.line("}");
}

pub fn render_variable(var: &VariableDecl) -> String {
    let modifier = if var.is_const { "const" } else { "static" };
    match &var.initializer {
        Some(init) => format!(
            "{} {modifier} {} {} = {};",
            visibility_syntax(var.visibility),
            render_type(&var.ty),
            var.name,
            render_expr(init)
        ),
        None => format!("{} {modifier} {} {};", visibility_syntax(var.visibility), render_type(&var.ty), var.name),
    }
}

pub fn render_declaration(w: &mut FmtWriter, decl: &IrDeclaration, diagnostics: &mut DiagnosticCollection) {
    match decl {
        IrDeclaration::Function(f) => render_method(w, f),
        IrDeclaration::Class(c) => render_class(w, c, diagnostics),
        IrDeclaration::Interface(i) => render_interface(w, i),
        IrDeclaration::TypeAlias(a) => w.line(&render_type_alias(a)),
        IrDeclaration::Variable(v) => w.line(&render_variable(v)),
        IrDeclaration::Enum(e) => render_enum(w, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_common::position::{Position, SourceLocation, Span};
    use tsonic_ir::declarations::{FieldDecl as Field, Visibility as Vis};
    use tsonic_ir::provenance::Provenance;
    use tsonic_ir::types::{IrType, Primitive};

    fn prov() -> Provenance {
        Provenance::new(SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1))))
    }

    #[test]
    fn field_colliding_with_class_name_is_suffixed_and_flagged() {
        let mut w = FmtWriter::new();
        let mut diagnostics = DiagnosticCollection::new();
        let field = Field {
            name: "Widget".into(),
            ty: IrType::Primitive(Primitive::Int),
            visibility: Vis::Public,
            readonly: false,
            is_static: false,
            initializer: None,
            is_index_signature: false,
        };
        render_field(&mut w, &field, "Widget", &mut diagnostics);
        assert!(w.finish().contains("WidgetMember"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().code, DiagnosticCode::TSN4002);
    }

    #[test]
    fn constructor_super_call_becomes_base_clause() {
        let ctor = FunctionDecl {
            provenance: prov(),
            name: "ctor".into(),
            visibility: Vis::Public,
            type_parameters: vec![],
            parameters: vec![],
            return_type: IrType::Primitive(Primitive::Void),
            is_async: false,
            is_generator: false,
            body: vec![Block::simple(vec![tsonic_ir::statements::StmtNode::new(
                prov(),
                StmtKind::SuperCall { arguments: vec![] },
            )])],
            is_static: false,
        };
        let mut w = FmtWriter::new();
        render_constructor(&mut w, "Widget", &ctor);
        let out = w.finish();
        assert!(out.contains(": base()"));
        assert!(!out.contains("base();\n"));
    }
}
