//! Adapter synthesis: a structural generic constraint `{ m1: T1, m2: T2, … }`
//! becomes a nominal interface plus a sealed wrapper class, so the target's
//! nominal generics can express a `where T : Interface` constraint.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tsonic_common::position::SourceLocation;
use tsonic_ir::declarations::{
    BaseClass, Block, ClassDecl, FieldDecl, FunctionDecl, InterfaceDecl, IrDeclaration, Parameter, Visibility,
};
use tsonic_ir::module::IrModule;
use tsonic_ir::provenance::Provenance;
use tsonic_ir::types::{IrType, StructuralMember};

use crate::mangle::mangle_type;

fn member_set_hash(members: &[StructuralMember]) -> u64 {
    let mut tokens: Vec<String> =
        members.iter().map(|m| format!("{}:{}:{}", m.name, mangle_type(&m.ty), m.readonly)).collect();
    tokens.sort();
    let mut hasher = DefaultHasher::new();
    tokens.join(",").hash(&mut hasher);
    hasher.finish()
}

fn generated_location(namespace: &str) -> SourceLocation {
    SourceLocation::new(format!("<generated:{namespace}>"), tsonic_common::position::Span::new(0, 0, tsonic_common::position::Position::new(1, 1)))
}

/// Builds the interface + wrapper pair for one structural constraint and
/// returns them in declaration order (interface first, so the wrapper's
/// `implements` clause resolves).
fn build_adapter(namespace: &str, type_param_name: &str, hash: u64, members: &[StructuralMember]) -> (String, IrDeclaration, IrDeclaration) {
    let interface_name = format!("__Constraint_{type_param_name}_{hash:x}");
    let wrapper_name = format!("__Wrapper_{type_param_name}_{hash:x}");
    let provenance = Provenance::new(generated_location(namespace));

    let interface_members: Vec<FieldDecl> = members
        .iter()
        .map(|m| FieldDecl {
            name: m.name.clone(),
            ty: (*m.ty).clone(),
            visibility: Visibility::Public,
            readonly: m.readonly,
            is_static: false,
            initializer: None,
            is_index_signature: false,
        })
        .collect();

    let interface = InterfaceDecl {
        provenance: provenance.clone(),
        name: interface_name.clone(),
        visibility: Visibility::Public,
        type_parameters: vec![],
        extends: vec![],
        members: interface_members.clone(),
        is_value_type: false,
    };

    let constructor = FunctionDecl {
        provenance: provenance.clone(),
        name: "constructor".into(),
        visibility: Visibility::Public,
        type_parameters: vec![],
        parameters: members
            .iter()
            .map(|m| Parameter { name: m.name.clone(), ty: (*m.ty).clone(), default: None, is_rest: false })
            .collect(),
        return_type: IrType::Primitive(tsonic_ir::types::Primitive::Void),
        is_async: false,
        is_generator: false,
        body: vec![Block::simple(vec![])],
        is_static: false,
    };

    let wrapper = ClassDecl {
        provenance,
        name: wrapper_name,
        visibility: Visibility::Public,
        type_parameters: vec![],
        base_class: None,
        interfaces: vec![BaseClass { name: interface_name.clone(), type_arguments: vec![] }],
        fields: interface_members,
        methods: vec![],
        constructor: Some(constructor),
        is_value_type: false,
    };

    (interface_name, IrDeclaration::Interface(interface), IrDeclaration::Class(wrapper))
}

/// Walks every type parameter carrying a structural constraint across the
/// module's declarations, synthesising (and deduplicating by member-set
/// hash) one adapter pair per distinct shape, then rewriting the type
/// parameter's nominal constraint to reference the synthesised interface.
///
/// Deduplication is scoped to this module; two modules sharing a namespace
/// do not currently share adapters.
pub fn synthesize_adapters(module: &mut IrModule) {
    let namespace = module.namespace.clone();
    let mut seen: HashMap<u64, String> = HashMap::new();
    let mut generated: Vec<IrDeclaration> = Vec::new();

    let mut type_param_lists: Vec<&mut Vec<tsonic_ir::types::IrTypeParameter>> = Vec::new();
    for decl in &mut module.declarations {
        match decl {
            IrDeclaration::Function(f) => type_param_lists.push(&mut f.type_parameters),
            IrDeclaration::Interface(i) => type_param_lists.push(&mut i.type_parameters),
            IrDeclaration::TypeAlias(t) => type_param_lists.push(&mut t.type_parameters),
            IrDeclaration::Class(c) => {
                type_param_lists.push(&mut c.type_parameters);
                for method in &mut c.methods {
                    type_param_lists.push(&mut method.type_parameters);
                }
                if let Some(ctor) = &mut c.constructor {
                    type_param_lists.push(&mut ctor.type_parameters);
                }
            }
            IrDeclaration::Variable(_) | IrDeclaration::Enum(_) => {}
        }
    }

    for type_parameters in type_param_lists {
        for tp in type_parameters.iter_mut() {
            let Some(members) = tp.structural_constraint.clone() else { continue };
            let hash = member_set_hash(&members);
            let interface_name = seen.entry(hash).or_insert_with(|| {
                let (name, interface, wrapper) = build_adapter(&namespace, &tp.name, hash, &members);
                generated.push(interface);
                generated.push(wrapper);
                name
            });
            tp.nominal_constraint = Some(IrType::ObjectRef { name: interface_name.clone(), type_arguments: vec![] });
        }
    }

    for decl in generated {
        module.append_generated(decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsonic_ir::declarations::IrDeclaration as Decl;
    use tsonic_ir::declarations::{FunctionDecl as Fn_, Visibility as Vis};
    use tsonic_ir::types::{IrTypeParameter, Primitive};

    fn prov() -> Provenance {
        Provenance::new(generated_location("App"))
    }

    #[test]
    fn generates_one_adapter_per_distinct_shape() {
        let mut module = IrModule::new("App", "Main");
        let mut tp = IrTypeParameter::new(0, "T");
        tp.structural_constraint = Some(vec![StructuralMember {
            name: "length".into(),
            ty: Box::new(IrType::Primitive(Primitive::Int)),
            readonly: true,
        }]);
        let f = Fn_ {
            provenance: prov(),
            name: "sized".into(),
            visibility: Vis::Public,
            type_parameters: vec![tp],
            parameters: vec![],
            return_type: IrType::Primitive(Primitive::Void),
            is_async: false,
            is_generator: false,
            body: vec![],
            is_static: false,
        };
        module.declarations.push(Decl::Function(f));
        synthesize_adapters(&mut module);

        let interfaces: Vec<&str> = module
            .declarations
            .iter()
            .filter_map(|d| if let Decl::Interface(i) = d { Some(i.name.as_str()) } else { None })
            .collect();
        assert_eq!(interfaces.len(), 1);

        let Decl::Function(f) = &module.declarations[0] else { panic!("expected function") };
        assert!(matches!(f.type_parameters[0].nominal_constraint, Some(IrType::ObjectRef { .. })));
    }
}
