//! Shared widget constants

/// Width in characters of the numeric entry next to each slider
pub const COMPONENT_ENTRY_WIDTH: u16 = 4;

/// Width in characters of an HTML color entry (`#rrggbb`)
pub const HEX_ENTRY_WIDTH: u16 = 7;

/// Default number of color states kept for undo
pub const UNDO_STACK_LIMIT: usize = 100;
