//! `JsonMetadataChecker`: a concrete `TypeResolver` backed by the metadata
//! registry plus a minimal structural evaluator, standing in for the real
//! external TypeScript type-checker service.

use std::collections::HashMap;

use log::warn;
use tsonic_common::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection};
use tsonic_common::limits::TYPE_EXPANSION_DEPTH_CAP;
use tsonic_common::position::{Position, SourceLocation, Span};
use tsonic_ir::facade::{ResolvedSymbol, TypeResolver};
use tsonic_ir::source_ast::{AstItem, AstTypeRef, SourceFile};
use tsonic_ir::types::{FunctionType, IrType, IrTypeParameter, Primitive, StructuralMember};

use crate::registry::MetadataRegistry;

fn primitive_for(name: &str) -> Option<Primitive> {
    Some(match name {
        "number" => Primitive::Number,
        "string" => Primitive::String,
        "boolean" | "bool" => Primitive::Bool,
        "void" => Primitive::Void,
        "null" => Primitive::Null,
        "any" => Primitive::Any,
        "unknown" => Primitive::Unknown,
        "int" => Primitive::Int,
        "long" => Primitive::Long,
        "decimal" => Primitive::Decimal,
        "float" => Primitive::Float,
        "byte" => Primitive::Byte,
        "double" => Primitive::Double,
        _ => return None,
    })
}

pub struct JsonMetadataChecker {
    registry: MetadataRegistry,
    /// Declared type parameters per declaration name, populated by the
    /// program builder as modules are registered.
    type_parameters: HashMap<String, Vec<IrTypeParameter>>,
    /// Exported symbol -> declaring module, populated from registered
    /// modules for `resolve_symbol`.
    exports: HashMap<String, String>,
    /// Declared type per module-level declaration name, populated from
    /// registered modules for `declared_type_of`.
    declared_types: HashMap<String, IrType>,
}

impl JsonMetadataChecker {
    pub fn new(registry: MetadataRegistry) -> Self {
        Self { registry, type_parameters: HashMap::new(), exports: HashMap::new(), declared_types: HashMap::new() }
    }

    pub fn declare_type_parameters(&mut self, declaration_name: impl Into<String>, params: Vec<IrTypeParameter>) {
        self.type_parameters.insert(declaration_name.into(), params);
    }

    fn resolve_type_with_depth(&self, ast_type: &AstTypeRef, diagnostics: &mut DiagnosticCollection, depth: usize) -> IrType {
        if depth > TYPE_EXPANSION_DEPTH_CAP {
            diagnostics.push(
                Diagnostic::new(DiagnosticCode::TSN7202, None)
                    .with_location(internal_location())
                    .with_message(format!("expansion of `{}` exceeded the depth cap", ast_type.name)),
            );
            return IrType::Primitive(Primitive::Unknown);
        }

        let mut inner = if let Some(primitive) = primitive_for(&ast_type.name) {
            IrType::Primitive(primitive)
        } else {
            match ast_type.name.as_str() {
                "Array" => {
                    let elem = ast_type
                        .type_arguments
                        .first()
                        .map(|t| self.resolve_type_with_depth(t, diagnostics, depth + 1))
                        .unwrap_or(IrType::Primitive(Primitive::Any));
                    IrType::Array(Box::new(elem))
                }
                "List" => {
                    let elem = ast_type
                        .type_arguments
                        .first()
                        .map(|t| self.resolve_type_with_depth(t, diagnostics, depth + 1))
                        .unwrap_or(IrType::Primitive(Primitive::Any));
                    IrType::List(Box::new(elem))
                }
                "Promise" => {
                    let inner = ast_type
                        .type_arguments
                        .first()
                        .map(|t| self.resolve_type_with_depth(t, diagnostics, depth + 1))
                        .unwrap_or(IrType::Primitive(Primitive::Void));
                    IrType::Promise(Box::new(inner))
                }
                "Function" => IrType::Function(FunctionType {
                    parameters: Vec::new(),
                    return_type: Box::new(IrType::Primitive(Primitive::Any)),
                    is_async: false,
                    is_generator: false,
                }),
                _ => IrType::ObjectRef {
                    name: ast_type.name.clone(),
                    type_arguments: ast_type
                        .type_arguments
                        .iter()
                        .map(|t| self.resolve_type_with_depth(t, diagnostics, depth + 1))
                        .collect(),
                },
            }
        };

        if ast_type.nullable {
            inner = IrType::Nullable(Box::new(inner));
        }
        inner
    }
}

impl TypeResolver for JsonMetadataChecker {
    fn resolve_type(&self, ast_type: &AstTypeRef, diagnostics: &mut DiagnosticCollection) -> IrType {
        self.resolve_type_with_depth(ast_type, diagnostics, 0)
    }

    fn type_parameters_of(&self, declaration_name: &str) -> Vec<IrTypeParameter> {
        self.type_parameters.get(declaration_name).cloned().unwrap_or_default()
    }

    fn members_of(&self, ast_type: &AstTypeRef) -> Vec<StructuralMember> {
        let Some(entry) = self.registry.get(&ast_type.name) else {
            warn!("members_of: `{}` is absent from the metadata registry", ast_type.name);
            return Vec::new();
        };
        entry
            .members
            .iter()
            .map(|(name, shape)| {
                let base = IrType::Primitive(Primitive::Any);
                let ty = if shape.nullable { IrType::Nullable(Box::new(base)) } else { base };
                StructuralMember { name: name.clone(), ty: Box::new(ty), readonly: !shape.is_virtual }
            })
            .collect()
    }

    fn is_assignable_to(&self, from: &IrType, to: &IrType) -> bool {
        from == to || matches!(to, IrType::Primitive(Primitive::Any | Primitive::Unknown))
    }

    fn is_structural_supertype_of(&self, super_type: &AstTypeRef, sub_type: &AstTypeRef) -> bool {
        let required = self.members_of(super_type);
        let available = self.members_of(sub_type);
        required.iter().all(|req| available.iter().any(|m| m.name == req.name))
    }

    fn resolve_symbol(&self, name: &str, from_module: &str) -> Option<ResolvedSymbol> {
        self.exports
            .get(name)
            .map(|declaring_module| ResolvedSymbol { declaring_module: declaring_module.clone(), name: name.to_string() })
            .or_else(|| {
                warn!("resolve_symbol: `{name}` not found from module `{from_module}`");
                None
            })
    }

    fn register_module(&mut self, file: &SourceFile) {
        for name in file.exported_names() {
            self.exports.insert(name.to_string(), file.path.clone());
        }

        // Declared-type registration never surfaces diagnostics of its own;
        // a malformed annotation here is reported again, with full context,
        // when the owning declaration is actually lowered.
        let mut scratch = DiagnosticCollection::new();
        for item in &file.items {
            match item {
                AstItem::Function(f) => {
                    let ty = IrType::Function(FunctionType {
                        parameters: f.parameters.iter().map(|p| self.resolve_type_with_depth(&p.ty, &mut scratch, 0)).collect(),
                        return_type: Box::new(self.resolve_type_with_depth(&f.return_type, &mut scratch, 0)),
                        is_async: f.is_async,
                        is_generator: f.is_generator,
                    });
                    self.declared_types.insert(f.name.clone(), ty);
                }
                AstItem::Class(c) => {
                    self.declared_types.insert(c.name.clone(), IrType::ObjectRef { name: c.name.clone(), type_arguments: Vec::new() });
                }
                AstItem::Interface(i) => {
                    self.declared_types.insert(i.name.clone(), IrType::ObjectRef { name: i.name.clone(), type_arguments: Vec::new() });
                }
                AstItem::Enum(e) => {
                    self.declared_types.insert(e.name.clone(), IrType::ObjectRef { name: e.name.clone(), type_arguments: Vec::new() });
                }
                AstItem::TypeAlias(t) => {
                    let ty = self.resolve_type_with_depth(&t.aliased, &mut scratch, 0);
                    self.declared_types.insert(t.name.clone(), ty);
                }
                AstItem::Variable(v) => {
                    let ty = self.resolve_type_with_depth(&v.ty, &mut scratch, 0);
                    self.declared_types.insert(v.name.clone(), ty);
                }
                AstItem::TopLevelStatement(_) | AstItem::ReExport(_) => {}
            }
        }
    }

    fn declared_type_of(&self, name: &str) -> Option<IrType> {
        self.declared_types.get(name).cloned()
    }
}

fn internal_location() -> SourceLocation {
    SourceLocation::new("<type-expansion>", Span::new(0, 0, Position::new(1, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_ir::source_ast::AstTypeRef;

    #[test]
    fn resolves_primitive() {
        let checker = JsonMetadataChecker::new(MetadataRegistry::new());
        let mut diags = DiagnosticCollection::new();
        let ty = checker.resolve_type(&AstTypeRef::simple("number"), &mut diags);
        assert_eq!(ty, IrType::Primitive(Primitive::Number));
        assert!(diags.is_empty());
    }

    #[test]
    fn resolves_array_element_type() {
        let checker = JsonMetadataChecker::new(MetadataRegistry::new());
        let mut diags = DiagnosticCollection::new();
        let ast = AstTypeRef { name: "Array".into(), type_arguments: vec![AstTypeRef::simple("string")], nullable: false, union_members: Vec::new(), is_conditional_or_mapped: false };
        let ty = checker.resolve_type(&ast, &mut diags);
        assert_eq!(ty, IrType::Array(Box::new(IrType::Primitive(Primitive::String))));
    }

    #[test]
    fn register_module_populates_declared_type_of_a_variable() {
        use tsonic_common::position::{Position, Span};
        use tsonic_ir::source_ast::{AstItem, AstVariable, AstVisibility};

        let mut checker = JsonMetadataChecker::new(MetadataRegistry::new());
        let loc = SourceLocation::new("a.ts", Span::new(0, 1, Position::new(1, 1)));
        let mut file = SourceFile::new("a.ts".to_string());
        file.items.push(AstItem::Variable(AstVariable {
            name: "items".into(),
            visibility: AstVisibility::Local,
            ty: AstTypeRef { name: "Array".into(), type_arguments: vec![AstTypeRef::simple("number")], nullable: false, union_members: Vec::new(), is_conditional_or_mapped: false },
            initializer: None,
            is_const: true,
            location: loc,
        }));
        checker.register_module(&file);

        assert_eq!(checker.declared_type_of("items"), Some(IrType::Array(Box::new(IrType::Primitive(Primitive::Number)))));
        assert_eq!(checker.declared_type_of("nonexistent"), None);
    }

    #[test]
    fn members_of_wraps_nullable_members() {
        use crate::registry::{MemberShape, TypeEntry, TypeKind};

        let mut registry = MetadataRegistry::new();
        let mut members = HashMap::new();
        members.insert("Name".to_string(), MemberShape { nullable: true, ..Default::default() });
        members.insert("Length".to_string(), MemberShape { nullable: false, ..Default::default() });
        registry.insert("Widget", TypeEntry { kind: TypeKind::Class, members });
        let checker = JsonMetadataChecker::new(registry);

        let result = checker.members_of(&AstTypeRef::simple("Widget"));
        let name = result.iter().find(|m| m.name == "Name").unwrap();
        let length = result.iter().find(|m| m.name == "Length").unwrap();
        assert_eq!(*name.ty, IrType::Nullable(Box::new(IrType::Primitive(Primitive::Any))));
        assert_eq!(*length.ty, IrType::Primitive(Primitive::Any));
    }

    #[test]
    fn depth_cap_reports_tsn7202() {
        let checker = JsonMetadataChecker::new(MetadataRegistry::new());
        let mut diags = DiagnosticCollection::new();
        let ty = checker.resolve_type_with_depth(&AstTypeRef::simple("Foo"), &mut diags, TYPE_EXPANSION_DEPTH_CAP + 1);
        assert_eq!(ty, IrType::Primitive(Primitive::Unknown));
        assert!(diags.errors().any(|d| d.code == DiagnosticCode::TSN7202));
    }
}
