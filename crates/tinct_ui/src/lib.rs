//! tinct_ui - Host-facing plumbing for the tinct color selector
//!
//! Widgets live on a host [`Surface`]; this crate provides the pieces the
//! selector core builds on: callbacks, echo-suppressing input fields, undo
//! history, keyboard shortcut tracking and window placement helpers.

mod callback;
mod constants;
mod field;
mod history;
mod keys;
pub mod placement;
mod surface;

pub use callback::{Callback, Callback0, SideEffect};
pub use constants::{COMPONENT_ENTRY_WIDTH, HEX_ENTRY_WIDTH, UNDO_STACK_LIMIT};
pub use field::{ComponentField, EditSource, TextField};
pub use history::UndoStack;
pub use keys::{KeyCodes, KeyEventsManager, Platform, PlatformError};
pub use surface::{HeadlessSurface, HeadlessWidget, Placement, Surface, WidgetId, WidgetKind};
