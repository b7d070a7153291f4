//! Program Builder and Module Resolver: assembles a consistent, closed
//! program view from a set of entry files and resolves each import against
//! the module-resolution decision table.

pub mod module;
pub mod program;
pub mod resolver;

pub use module::{Export, ExportKind, Import, SourceModule};
pub use program::{build_program, Program, SourceLoader};
pub use resolver::{classify, ImportClassification};
