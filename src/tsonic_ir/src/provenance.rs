//! Provenance: every IR declaration records the source file and range it was
//! lowered from, for diagnostics.

use serde::{Deserialize, Serialize};
use tsonic_common::position::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub location: SourceLocation,
}

impl Provenance {
    pub fn new(location: SourceLocation) -> Self {
        Self { location }
    }
}

/// Implemented (via `#[derive(IrNode)]`) by every IR declaration's inner
/// struct.
pub trait IrNode {
    fn provenance(&self) -> &Provenance;
    fn kind_name(&self) -> &'static str;
}
