//! Validator: the fixed set of rules run over every lowered module between
//! IR building and specialisation/emission. The builder only rejects
//! constructs it cannot represent in IR at all; every other rejection is
//! produced here, so the emitter can assume well-formed IR.

pub mod framework;
pub mod rules;

pub use framework::{run_all, Rule, ValidationSession};
pub use rules::{
    default_rules, FileNameExportCollisionRule, RecursiveAliasWithoutBaseRule, SuperCallFirstStatementRule,
    UnsatisfiableSpecialisationRule, UnsupportedStructuralConstraintRule, VariadicGenericConstraintRule,
};
