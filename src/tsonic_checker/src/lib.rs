//! Type System Facade: the single boundary between the rest of the compiler
//! and the (external, out-of-process) TypeScript type checker, plus the
//! .NET metadata registry the facade and emitter both read.

pub mod checker;
pub mod registry;

pub use checker::JsonMetadataChecker;
pub use registry::{MemberShape, MetadataRegistry, TypeEntry, TypeKind};
pub use tsonic_ir::facade::TypeResolver as TypeChecker;
