//! Input fields with echo suppression
//!
//! Every write into a field carries an [`EditSource`]. Only user writes are
//! reported back to the owner; programmatic writes (a refresh after some other
//! selector changed the color) update the displayed value silently, so a
//! refresh can never masquerade as a new edit.

use std::ops::RangeInclusive;

use crate::constants::COMPONENT_ENTRY_WIDTH;
use crate::surface::{Placement, Surface, WidgetId, WidgetKind};

/// Who is writing into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    /// Keystrokes or slider drags from the user
    User,
    /// Refresh pushed by the owning selector
    Program,
}

/// A slider paired with a numeric entry over an inclusive integer range.
///
/// Both widgets always show the same value once the entry text is valid. While
/// the user is typing an invalid intermediate string the text is kept as-is
/// and the slider keeps its last valid value.
#[derive(Debug)]
pub struct ComponentField {
    frame: WidgetId,
    entry: WidgetId,
    range: RangeInclusive<i32>,
    text: String,
    value: i32,
}

impl ComponentField {
    /// Create the field widgets under `parent`, in grid row `row`.
    pub fn new(
        surface: &mut dyn Surface,
        parent: WidgetId,
        row: u16,
        range: RangeInclusive<i32>,
        trough: Option<&'static str>,
    ) -> Self {
        let frame = surface.create(Some(parent), WidgetKind::Frame);
        let entry = surface.create(
            Some(frame),
            WidgetKind::Entry {
                width: COMPONENT_ENTRY_WIDTH,
            },
        );
        let slider = surface.create(
            Some(frame),
            WidgetKind::Slider {
                min: *range.start(),
                max: *range.end(),
                trough,
            },
        );
        surface.place(entry, Placement::new(0, 0));
        surface.place(slider, Placement::new(0, 1));
        surface.place(frame, Placement::new(row, 0));

        let value = *range.start();
        Self {
            frame,
            entry,
            range,
            text: value.to_string(),
            value,
        }
    }

    /// The numeric text entry.
    pub fn entry(&self) -> WidgetId {
        self.entry
    }

    /// Last valid value (the slider position).
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Current entry text, which may be an invalid intermediate string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Move the slider. The entry text follows without echoing back.
    ///
    /// Returns the new value for user moves, `None` for programmatic ones.
    pub fn set_value(&mut self, value: i32, source: EditSource) -> Option<i32> {
        let value = value.clamp(*self.range.start(), *self.range.end());
        self.value = value;
        self.text = value.to_string();
        match source {
            EditSource::User => Some(value),
            EditSource::Program => None,
        }
    }

    /// Replace the entry text.
    ///
    /// A user write that parses to an in-range number moves the slider and
    /// returns the value. Anything else only changes the text.
    pub fn set_text(&mut self, text: impl Into<String>, source: EditSource) -> Option<i32> {
        self.text = text.into();
        if source == EditSource::Program {
            return None;
        }
        let value = self.parse_text()?;
        self.value = value;
        Some(value)
    }

    fn parse_text(&self) -> Option<i32> {
        if self.text.is_empty() || !self.text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.text
            .parse::<i32>()
            .ok()
            .filter(|value| self.range.contains(value))
    }

    /// Destroy the field widgets.
    pub fn dispose(self, surface: &mut dyn Surface) {
        surface.destroy(self.frame);
    }
}

/// A free-text entry whose validation is left to its owner.
#[derive(Debug)]
pub struct TextField {
    entry: WidgetId,
    text: String,
}

impl TextField {
    /// Create the entry under `parent` at `at`.
    pub fn new(surface: &mut dyn Surface, parent: WidgetId, at: Placement, width: u16) -> Self {
        let entry = surface.create(Some(parent), WidgetKind::Entry { width });
        surface.place(entry, at);
        Self {
            entry,
            text: String::new(),
        }
    }

    pub fn entry(&self) -> WidgetId {
        self.entry
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. User writes hand the new text back for validation.
    pub fn set_text(&mut self, text: impl Into<String>, source: EditSource) -> Option<&str> {
        self.text = text.into();
        match source {
            EditSource::User => Some(&self.text),
            EditSource::Program => None,
        }
    }

    pub fn dispose(self, surface: &mut dyn Surface) {
        surface.destroy(self.entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;

    fn byte_field(surface: &mut HeadlessSurface) -> ComponentField {
        let root = surface.create(None, WidgetKind::Frame);
        ComponentField::new(surface, root, 0, 0..=255, Some("red"))
    }

    #[test]
    fn test_new_field_starts_at_range_start() {
        let mut surface = HeadlessSurface::new();
        let field = byte_field(&mut surface);
        assert_eq!(field.value(), 0);
        assert_eq!(field.text(), "0");
        // root + frame + entry + slider
        assert_eq!(surface.live_count(), 4);
    }

    #[test]
    fn test_user_slider_move_reports_value() {
        let mut surface = HeadlessSurface::new();
        let mut field = byte_field(&mut surface);
        assert_eq!(field.set_value(200, EditSource::User), Some(200));
        assert_eq!(field.text(), "200");
    }

    #[test]
    fn test_program_write_is_silent() {
        let mut surface = HeadlessSurface::new();
        let mut field = byte_field(&mut surface);
        assert_eq!(field.set_value(17, EditSource::Program), None);
        assert_eq!(field.value(), 17);
        assert_eq!(field.text(), "17");
        assert_eq!(field.set_text("18", EditSource::Program), None);
        assert_eq!(field.value(), 17);
    }

    #[test]
    fn test_invalid_text_keeps_slider() {
        let mut surface = HeadlessSurface::new();
        let mut field = byte_field(&mut surface);
        field.set_value(40, EditSource::Program);

        for text in ["", "-1", "12a", "256", "+5", "99999999999"] {
            assert_eq!(field.set_text(text, EditSource::User), None, "{text:?}");
            assert_eq!(field.text(), text);
            assert_eq!(field.value(), 40);
        }

        assert_eq!(field.set_text("255", EditSource::User), Some(255));
        assert_eq!(field.value(), 255);
    }

    #[test]
    fn test_slider_value_is_clamped() {
        let mut surface = HeadlessSurface::new();
        let mut field = byte_field(&mut surface);
        assert_eq!(field.set_value(300, EditSource::User), Some(255));
        assert_eq!(field.set_value(-3, EditSource::User), Some(0));
    }

    #[test]
    fn test_dispose_destroys_widgets() {
        let mut surface = HeadlessSurface::new();
        let field = byte_field(&mut surface);
        field.dispose(&mut surface);
        assert_eq!(surface.live_count(), 1);
    }

    #[test]
    fn test_text_field_echo() {
        let mut surface = HeadlessSurface::new();
        let root = surface.create(None, WidgetKind::Frame);
        let mut field = TextField::new(&mut surface, root, Placement::default(), 7);

        assert_eq!(field.set_text("#12", EditSource::User), Some("#12"));
        assert_eq!(field.set_text("#123456", EditSource::Program), None);
        assert_eq!(field.text(), "#123456");
    }
}
