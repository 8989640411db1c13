//! HTML hex text selector.

use tinct_ui::{EditSource, HEX_ENTRY_WIDTH, Placement, Surface, TextField, WidgetId};

use super::{FieldEdit, Selector, SelectorKind};
use crate::color::{Color, valid_html_color};
use crate::error::{ColorError, SelectorError};

/// Single entry holding `#rrggbb`.
///
/// Text that is not a complete HTML color stays on screen so the user can
/// keep typing; only a valid color is pushed.
#[derive(Debug)]
pub struct HexSelector {
    field: TextField,
}

impl HexSelector {
    pub fn new(surface: &mut dyn Surface, parent: WidgetId) -> Self {
        Self {
            field: TextField::new(surface, parent, Placement::default(), HEX_ENTRY_WIDTH),
        }
    }

    pub fn text(&self) -> &str {
        self.field.text()
    }
}

impl Selector for HexSelector {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Html
    }

    fn container(&self) -> WidgetId {
        self.field.entry()
    }

    fn update(&mut self, color: &Color) -> Result<(), ColorError> {
        let html = color.html()?;
        self.field.set_text(html, EditSource::Program);
        Ok(())
    }

    fn apply_edit(&mut self, edit: FieldEdit) -> Result<bool, SelectorError> {
        match edit {
            FieldEdit::Text { field: 0, text } => Ok(self
                .field
                .set_text(text, EditSource::User)
                .is_some_and(valid_html_color)),
            other => Err(SelectorError::NoSuchField {
                kind: SelectorKind::Html.name(),
                field: other.field(),
            }),
        }
    }

    fn write_color(&self, color: &mut Color) -> Result<(), ColorError> {
        color.set_from_html(self.field.text())
    }

    fn editable_fields(&self) -> Vec<WidgetId> {
        vec![self.field.entry()]
    }

    fn display(&self) -> Vec<String> {
        vec![self.field.text().to_string()]
    }

    fn dispose(self: Box<Self>, surface: &mut dyn Surface) {
        self.field.dispose(surface);
    }
}
