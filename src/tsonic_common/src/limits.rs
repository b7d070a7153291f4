//! Fixed limits referenced by more than one crate, kept in one place so they
//! can't drift out of sync.

/// Depth cap for conditional/mapped type expansion; exceeding it raises
/// `TSN7202` instead of looping forever.
pub const TYPE_EXPANSION_DEPTH_CAP: usize = 64;

/// Maximum emitted line width in columns.
pub const MAX_LINE_WIDTH: usize = 120;

/// Indentation unit in spaces.
pub const INDENT_WIDTH: usize = 4;
