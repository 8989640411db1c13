//! Three slider/entry pairs stacked in one frame, shared by RGB and HSV.

use std::ops::RangeInclusive;

use tinct_ui::{ComponentField, EditSource, Surface, WidgetId, WidgetKind};

use super::{FieldEdit, SelectorKind};
use crate::error::SelectorError;

#[derive(Debug)]
pub(super) struct ComponentGroup {
    frame: WidgetId,
    fields: [ComponentField; 3],
}

impl ComponentGroup {
    pub(super) fn new(
        surface: &mut dyn Surface,
        parent: WidgetId,
        range: RangeInclusive<i32>,
        troughs: [Option<&'static str>; 3],
    ) -> Self {
        let frame = surface.create(Some(parent), WidgetKind::Frame);
        let fields = [
            ComponentField::new(surface, frame, 0, range.clone(), troughs[0]),
            ComponentField::new(surface, frame, 1, range.clone(), troughs[1]),
            ComponentField::new(surface, frame, 2, range, troughs[2]),
        ];
        Self { frame, fields }
    }

    pub(super) fn frame(&self) -> WidgetId {
        self.frame
    }

    /// Slider values, in field order.
    pub(super) fn values(&self) -> [i32; 3] {
        [
            self.fields[0].value(),
            self.fields[1].value(),
            self.fields[2].value(),
        ]
    }

    /// Show `values` without reporting an edit.
    pub(super) fn show(&mut self, values: [i32; 3]) {
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.set_value(value, EditSource::Program);
        }
    }

    pub(super) fn apply_edit(
        &mut self,
        kind: SelectorKind,
        edit: FieldEdit,
    ) -> Result<bool, SelectorError> {
        let index = edit.field();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(SelectorError::NoSuchField {
                kind: kind.name(),
                field: index,
            })?;

        let accepted = match edit {
            FieldEdit::Slider { value, .. } => field.set_value(value, EditSource::User),
            FieldEdit::Text { text, .. } => field.set_text(text, EditSource::User),
        };
        if accepted.is_none() {
            log::trace!("{kind}: field {index} holds {:?}, not pushed", field.text());
        }
        Ok(accepted.is_some())
    }

    pub(super) fn entries(&self) -> Vec<WidgetId> {
        self.fields.iter().map(ComponentField::entry).collect()
    }

    pub(super) fn texts(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.text().to_string()).collect()
    }

    pub(super) fn dispose(self, surface: &mut dyn Surface) {
        for field in self.fields {
            field.dispose(surface);
        }
        surface.destroy(self.frame);
    }
}
