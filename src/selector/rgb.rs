//! RGB selector: one byte-range slider per channel.

use tinct_ui::{Surface, WidgetId};

use super::components::ComponentGroup;
use super::{FieldEdit, Selector, SelectorKind};
use crate::color::{Color, MAX_CHANNEL, MIN_CHANNEL};
use crate::error::{ColorError, SelectorError};

/// Trough tint of the red, green and blue sliders
const TROUGHS: [Option<&str>; 3] = [Some("red"), Some("green"), Some("blue")];

#[derive(Debug)]
pub struct RgbSelector {
    group: ComponentGroup,
}

impl RgbSelector {
    pub fn new(surface: &mut dyn Surface, parent: WidgetId) -> Self {
        Self {
            group: ComponentGroup::new(surface, parent, MIN_CHANNEL..=MAX_CHANNEL, TROUGHS),
        }
    }
}

impl Selector for RgbSelector {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Rgb
    }

    fn container(&self) -> WidgetId {
        self.group.frame()
    }

    fn update(&mut self, color: &Color) -> Result<(), ColorError> {
        self.group.show(color.components());
        Ok(())
    }

    fn apply_edit(&mut self, edit: FieldEdit) -> Result<bool, SelectorError> {
        self.group.apply_edit(SelectorKind::Rgb, edit)
    }

    fn write_color(&self, color: &mut Color) -> Result<(), ColorError> {
        color.set_rgb(self.group.values());
        Ok(())
    }

    fn editable_fields(&self) -> Vec<WidgetId> {
        self.group.entries()
    }

    fn display(&self) -> Vec<String> {
        self.group.texts()
    }

    fn dispose(self: Box<Self>, surface: &mut dyn Surface) {
        self.group.dispose(surface);
    }
}
