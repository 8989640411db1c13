//! Selector variants: interchangeable on-screen representations of one color.
//!
//! A selector never owns a [`Color`]. The controller lends it the shared color
//! to read in [`Selector::update`] and to write in [`Selector::write_color`].

mod components;
mod hex;
mod hsv;
mod rgb;

use std::fmt;

use serde::{Deserialize, Serialize};
use tinct_ui::{Surface, WidgetId};

use crate::color::Color;
use crate::error::{ColorError, SelectorError};

pub use hex::HexSelector;
pub use hsv::{HSV_SCALE, HsvSelector};
pub use rgb::RgbSelector;

/// Which representation a slot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorKind {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "HSV")]
    Hsv,
    #[serde(rename = "HTML")]
    Html,
}

impl SelectorKind {
    /// Name shown in the slot's kind chooser.
    pub fn name(self) -> &'static str {
        match self {
            SelectorKind::Rgb => "RGB",
            SelectorKind::Hsv => "HSV",
            SelectorKind::Html => "HTML",
        }
    }

    /// All kinds, in chooser order.
    pub fn all() -> &'static [SelectorKind] {
        &[SelectorKind::Rgb, SelectorKind::Hsv, SelectorKind::Html]
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A user edit on one field of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Slider of component `field` moved to `value`
    Slider { field: usize, value: i32 },
    /// Entry of component `field` now holds `text`
    Text { field: usize, text: String },
}

impl FieldEdit {
    pub fn slider(field: usize, value: i32) -> Self {
        FieldEdit::Slider { field, value }
    }

    pub fn text(field: usize, text: impl Into<String>) -> Self {
        FieldEdit::Text {
            field,
            text: text.into(),
        }
    }

    /// Index of the edited field.
    pub fn field(&self) -> usize {
        match self {
            FieldEdit::Slider { field, .. } | FieldEdit::Text { field, .. } => *field,
        }
    }
}

/// Common contract of every selector variant.
pub trait Selector {
    fn kind(&self) -> SelectorKind;

    /// Top-level widget of the selector, placed by the owning slot.
    fn container(&self) -> WidgetId;

    /// Show `color`. Programmatic: never reported as a user edit.
    fn update(&mut self, color: &Color) -> Result<(), ColorError>;

    /// Apply a user edit to the displayed fields.
    ///
    /// Returns `true` when the selector now shows a valid color that has to be
    /// pushed into the shared model, `false` when the edit was kept on screen
    /// only (for example half-typed text).
    fn apply_edit(&mut self, edit: FieldEdit) -> Result<bool, SelectorError>;

    /// Write the displayed color into `color`.
    fn write_color(&self, color: &mut Color) -> Result<(), ColorError>;

    /// Text entries eligible for focus and clipboard handling.
    fn editable_fields(&self) -> Vec<WidgetId>;

    /// Current entry texts, in field order.
    fn display(&self) -> Vec<String>;

    /// Destroy every widget the selector created.
    fn dispose(self: Box<Self>, surface: &mut dyn Surface);
}
