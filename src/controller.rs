//! Synchronization controller: one shared color, many selectors.
//!
//! A user edit on slot *i* is pushed into the shared [`Color`], every other
//! slot is refreshed from it, and the color-changed observer fires once. The
//! refresh writes into fields as [`EditSource::Program`](tinct_ui::EditSource),
//! so refreshed selectors never report edits of their own.

use tinct_ui::{Placement, SideEffect, Surface, UndoStack, WidgetId, WidgetKind};

use crate::color::Color;
use crate::config::PickerConfig;
use crate::error::{ColorError, SelectorError};
use crate::registry::{DEFAULT_SLOTS, SelectorRegistry};
use crate::selector::{FieldEdit, Selector, SelectorKind};

/// Whether a propagation is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationState {
    /// Every selector shows the shared color
    #[default]
    Idle,
    /// Selectors are being refreshed; `source` is the slot that was edited
    Propagating { source: Option<usize> },
}

/// One row of the selector: a kind chooser above the active selector.
struct Slot {
    frame: WidgetId,
    chooser: WidgetId,
    selector: Box<dyn Selector>,
}

/// A stack of interchangeable selectors kept in sync around one color.
pub struct ColorSelector<S: Surface> {
    surface: S,
    panel: WidgetId,
    color: Color,
    slots: Vec<Slot>,
    registry: SelectorRegistry,
    state: PropagationState,
    history: UndoStack<Color>,
    on_color_change: SideEffect,
}

impl<S: Surface> ColorSelector<S> {
    /// Black, with the default RGB / HSV / HTML slots.
    pub fn new(surface: S) -> Result<Self, SelectorError> {
        Self::with_registry(surface, SelectorRegistry::new(), &DEFAULT_SLOTS)
    }

    /// Black, with `kinds` built through `registry`.
    pub fn with_registry(
        surface: S,
        registry: SelectorRegistry,
        kinds: &[SelectorKind],
    ) -> Result<Self, SelectorError> {
        Self::build(surface, registry, kinds, Color::default(), UndoStack::default())
    }

    /// Slots, initial color and history size taken from `config`.
    pub fn from_config(surface: S, config: &PickerConfig) -> Result<Self, SelectorError> {
        let color = Color::from_html(&config.initial_color)?;
        Self::build(
            surface,
            SelectorRegistry::new(),
            &config.initial_slots,
            color,
            UndoStack::new(config.history_limit),
        )
    }

    fn build(
        mut surface: S,
        registry: SelectorRegistry,
        kinds: &[SelectorKind],
        color: Color,
        history: UndoStack<Color>,
    ) -> Result<Self, SelectorError> {
        let panel = surface.create(None, WidgetKind::Frame);
        let mut selector = Self {
            surface,
            panel,
            color,
            slots: Vec::new(),
            registry,
            state: PropagationState::Idle,
            history,
            on_color_change: SideEffect::none(),
        };
        for &kind in kinds {
            selector.add_slot(kind)?;
        }
        Ok(selector)
    }

    /// Set the observer called after every completed propagation.
    pub fn on_color_change<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_color_change = SideEffect::new(handler);
        self
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Top-level frame holding all slots.
    pub fn panel(&self) -> WidgetId {
        self.panel
    }

    pub fn registry(&self) -> &SelectorRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn state(&self) -> PropagationState {
        self.state
    }

    pub fn is_propagating(&self) -> bool {
        matches!(self.state, PropagationState::Propagating { .. })
    }

    pub fn slot_kind(&self, index: usize) -> Option<SelectorKind> {
        self.slots.get(index).map(|slot| slot.selector.kind())
    }

    pub fn slot_kinds(&self) -> Vec<SelectorKind> {
        self.slots.iter().map(|slot| slot.selector.kind()).collect()
    }

    /// Entry texts currently shown by a slot.
    pub fn slot_display(&self, index: usize) -> Option<Vec<String>> {
        self.slots.get(index).map(|slot| slot.selector.display())
    }

    /// Kind chooser widget of a slot.
    pub fn slot_chooser(&self, index: usize) -> Option<WidgetId> {
        self.slots.get(index).map(|slot| slot.chooser)
    }

    /// Text entries of every slot, in slot order.
    pub fn editable_fields(&self) -> Vec<WidgetId> {
        self.slots
            .iter()
            .flat_map(|slot| slot.selector.editable_fields())
            .collect()
    }

    /// Indices of the slots currently showing HTML text.
    pub fn hex_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.selector.kind() == SelectorKind::Html)
            .map(|(index, _)| index)
            .collect()
    }

    /// Append a slot of `kind` showing the current color.
    pub fn add_slot(&mut self, kind: SelectorKind) -> Result<usize, SelectorError> {
        let index = self.slots.len();
        let frame = self.surface.create(Some(self.panel), WidgetKind::Frame);
        self.surface.place(frame, Placement::new(index as u16, 0));
        let chooser = self.surface.create(
            Some(frame),
            WidgetKind::Chooser {
                options: self.registry.names(),
            },
        );
        self.surface.place(chooser, Placement::new(0, 0));

        let selector = match self.build_selector(kind, frame) {
            Ok(selector) => selector,
            Err(err) => {
                self.surface.destroy(frame);
                return Err(err);
            }
        };
        self.slots.push(Slot {
            frame,
            chooser,
            selector,
        });
        log::debug!("ColorSelector: added {} slot {}", kind, index);
        Ok(index)
    }

    /// Remove the last slot. Returns its kind, or `None` if there were no slots.
    pub fn remove_slot(&mut self) -> Option<SelectorKind> {
        let slot = self.slots.pop()?;
        let kind = slot.selector.kind();
        slot.selector.dispose(&mut self.surface);
        self.surface.destroy(slot.frame);
        log::debug!("ColorSelector: removed {} slot {}", kind, self.slots.len());
        Some(kind)
    }

    /// Replace the selector of slot `index` with a fresh one of `kind`.
    pub fn retype_slot(&mut self, index: usize, kind: SelectorKind) -> Result<(), SelectorError> {
        let frame = self.slot(index)?.frame;
        let selector = self.build_selector(kind, frame)?;
        let old = std::mem::replace(&mut self.slots[index].selector, selector);
        log::debug!("ColorSelector: slot {} {} -> {}", index, old.kind(), kind);
        old.dispose(&mut self.surface);
        Ok(())
    }

    /// [`retype_slot`](Self::retype_slot) by chooser name.
    pub fn retype_slot_by_name(&mut self, index: usize, name: &str) -> Result<(), SelectorError> {
        let kind = self.registry.resolve(name)?;
        self.retype_slot(index, kind)
    }

    /// Apply a user edit to slot `index`.
    ///
    /// Returns `true` when the edit was pushed into the shared color and
    /// propagated, `false` when it was only kept on screen.
    pub fn edit(&mut self, index: usize, edit: FieldEdit) -> Result<bool, SelectorError> {
        if self.is_propagating() {
            log::warn!("ColorSelector: edit on slot {} ignored during propagation", index);
            return Ok(false);
        }

        let slot = self.slot_mut(index)?;
        if !slot.selector.apply_edit(edit)? {
            return Ok(false);
        }
        self.notify_edit(index)?;
        Ok(true)
    }

    /// Replace the shared color and refresh every slot.
    ///
    /// A color that cannot be shown is rejected and nothing changes.
    pub fn set_color(&mut self, color: Color) -> Result<(), SelectorError> {
        self.commit(color, None)
    }

    /// Current color as HTML text, for the clipboard.
    pub fn copy_html(&self) -> Result<String, ColorError> {
        self.color.html()
    }

    /// Set the color from clipboard text. Invalid text leaves everything untouched.
    pub fn paste_html(&mut self, text: &str) -> Result<(), SelectorError> {
        let color = Color::from_html(text.trim())?;
        self.set_color(color)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Go back to the color before the last change. Returns `false` if there is none.
    pub fn undo(&mut self) -> Result<bool, SelectorError> {
        let Some(previous) = self.history.undo(self.color) else {
            return Ok(false);
        };
        self.color = previous;
        self.propagate(None)?;
        Ok(true)
    }

    /// Reapply the last undone change. Returns `false` if there is none.
    pub fn redo(&mut self) -> Result<bool, SelectorError> {
        let Some(next) = self.history.redo(self.color) else {
            return Ok(false);
        };
        self.color = next;
        self.propagate(None)?;
        Ok(true)
    }

    /// Set the background of every HTML entry, e.g. to flash a copy.
    pub fn highlight_hex_fields(&mut self, background: &str) {
        for index in self.hex_slots() {
            for field in self.slots[index].selector.editable_fields() {
                self.surface.set_background(field, background);
            }
        }
    }

    /// Dispose every slot and the panel, handing the surface back.
    pub fn close(mut self) -> S {
        while self.remove_slot().is_some() {}
        self.surface.destroy(self.panel);
        self.surface
    }

    fn slot(&self, index: usize) -> Result<&Slot, SelectorError> {
        let len = self.slots.len();
        self.slots
            .get(index)
            .ok_or(SelectorError::SlotOutOfRange { index, len })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot, SelectorError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(SelectorError::SlotOutOfRange { index, len })
    }

    fn build_selector(
        &mut self,
        kind: SelectorKind,
        frame: WidgetId,
    ) -> Result<Box<dyn Selector>, SelectorError> {
        let mut selector = self.registry.build(kind, &mut self.surface, frame)?;
        self.surface.place(selector.container(), Placement::new(1, 0));
        if let Err(err) = selector.update(&self.color) {
            log::error!("ColorSelector: new {} slot cannot show {}: {}", kind, self.color, err);
            selector.dispose(&mut self.surface);
            return Err(err.into());
        }
        Ok(selector)
    }

    /// Push slot `index`'s displayed color into the model, then propagate.
    fn notify_edit(&mut self, index: usize) -> Result<(), SelectorError> {
        let mut color = self.color;
        self.slots[index].selector.write_color(&mut color)?;
        self.commit(color, Some(index))
    }

    /// Make `color` the shared color and propagate it. The current color,
    /// its history and every slot stay untouched when `color` is out of range.
    fn commit(&mut self, color: Color, source: Option<usize>) -> Result<(), SelectorError> {
        if let Err(err) = color.html() {
            log::warn!("ColorSelector: rejected {}: {}", color, err);
            return Err(err.into());
        }
        self.record(color);
        self.color = color;
        self.propagate(source)
    }

    fn record(&mut self, next: Color) {
        if next != self.color {
            self.history.push(self.color);
        }
    }

    fn propagate(&mut self, source: Option<usize>) -> Result<(), SelectorError> {
        self.state = PropagationState::Propagating { source };
        let refreshed = self.refresh(source);
        self.state = PropagationState::Idle;

        if let Err(err) = refreshed {
            log::error!("ColorSelector: refresh failed for {}: {}", self.color, err);
            return Err(err.into());
        }
        log::debug!("ColorSelector: color is now {}", self.color);
        self.on_color_change.emit();
        Ok(())
    }

    fn refresh(&mut self, skip: Option<usize>) -> Result<(), ColorError> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if Some(index) == skip {
                continue;
            }
            log::trace!("ColorSelector: refresh slot {}", index);
            slot.selector.update(&self.color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::HsvSelector;
    use std::cell::Cell;
    use std::rc::Rc;
    use tinct_ui::HeadlessSurface;

    fn picker() -> (ColorSelector<HeadlessSurface>, Rc<Cell<usize>>) {
        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        let picker = ColorSelector::new(HeadlessSurface::new())
            .unwrap()
            .on_color_change(move || counter.set(counter.get() + 1));
        (picker, changes)
    }

    /// Every slot shows exactly the shared color.
    fn assert_in_sync(picker: &ColorSelector<HeadlessSurface>) {
        let color = *picker.color();
        for index in 0..picker.len() {
            let shown = picker.slot_display(index).unwrap();
            let expected: Vec<String> = match picker.slot_kind(index).unwrap() {
                SelectorKind::Rgb => color.components().map(|c| c.to_string()).to_vec(),
                SelectorKind::Hsv => HsvSelector::scaled(&color).map(|c| c.to_string()).to_vec(),
                SelectorKind::Html => vec![color.html().unwrap()],
            };
            assert_eq!(shown, expected, "slot {index}");
        }
    }

    #[test]
    fn test_default_slots() {
        let (picker, changes) = picker();
        assert_eq!(
            picker.slot_kinds(),
            vec![SelectorKind::Rgb, SelectorKind::Hsv, SelectorKind::Html]
        );
        assert_eq!(picker.color().components(), [0, 0, 0]);
        assert_eq!(picker.slot_display(2).unwrap(), vec!["#000000"]);
        assert_eq!(picker.editable_fields().len(), 7);
        assert_eq!(picker.hex_slots(), vec![2]);
        assert_eq!(changes.get(), 0);
        assert_in_sync(&picker);
    }

    #[test]
    fn test_rgb_edit_propagates() {
        let (mut picker, changes) = picker();
        assert!(picker.edit(0, FieldEdit::slider(0, 255)).unwrap());

        assert_eq!(picker.color().components(), [255, 0, 0]);
        assert_eq!(picker.slot_display(1).unwrap(), vec!["0", "1000", "1000"]);
        assert_eq!(picker.slot_display(2).unwrap(), vec!["#ff0000"]);
        assert_eq!(changes.get(), 1);
        assert_in_sync(&picker);
    }

    #[test]
    fn test_hex_edit_propagates() {
        let (mut picker, changes) = picker();
        assert!(picker.edit(2, FieldEdit::text(0, "#1A2b3C")).unwrap());

        assert_eq!(picker.color().components(), [0x1a, 0x2b, 0x3c]);
        assert_eq!(picker.slot_display(0).unwrap(), vec!["26", "43", "60"]);
        // The edited slot keeps the user's text as typed.
        assert_eq!(picker.slot_display(2).unwrap(), vec!["#1A2b3C"]);
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_hsv_edit_propagates() {
        let (mut picker, changes) = picker();
        picker.edit(1, FieldEdit::slider(1, 1000)).unwrap();
        picker.edit(1, FieldEdit::slider(2, 1000)).unwrap();
        picker.edit(1, FieldEdit::text(0, "500")).unwrap();

        assert_eq!(picker.color().components(), [0, 255, 255]);
        assert_eq!(picker.slot_display(0).unwrap(), vec!["0", "255", "255"]);
        assert_eq!(picker.slot_display(2).unwrap(), vec!["#00ffff"]);
        assert_eq!(changes.get(), 3);
        assert_in_sync(&picker);
    }

    #[test]
    fn test_invalid_text_does_not_propagate() {
        let (mut picker, changes) = picker();
        picker.edit(0, FieldEdit::slider(2, 77)).unwrap();

        assert!(!picker.edit(2, FieldEdit::text(0, "#12")).unwrap());
        assert!(!picker.edit(0, FieldEdit::text(1, "abc")).unwrap());
        assert_eq!(picker.color().components(), [0, 0, 77]);
        assert_eq!(picker.slot_display(2).unwrap(), vec!["#12"]);
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_refresh_does_not_echo() {
        let (mut picker, changes) = picker();
        for value in [10, 20, 30] {
            picker.edit(0, FieldEdit::slider(1, value)).unwrap();
        }
        // One observer call per edit, nothing from the refreshed slots.
        assert_eq!(changes.get(), 3);
        assert!(!picker.is_propagating());
        assert_eq!(picker.state(), PropagationState::Idle);
    }

    #[test]
    fn test_edit_errors() {
        let (mut picker, _) = picker();
        assert_eq!(
            picker.edit(9, FieldEdit::slider(0, 1)).unwrap_err(),
            SelectorError::SlotOutOfRange { index: 9, len: 3 }
        );
        assert!(matches!(
            picker.edit(2, FieldEdit::slider(0, 1)),
            Err(SelectorError::NoSuchField { .. })
        ));
    }

    #[test]
    fn test_add_then_remove_restores_views() {
        let (mut picker, _) = picker();
        let fields = picker.editable_fields();
        let hex = picker.hex_slots();
        let kinds = picker.slot_kinds();
        let widgets = picker.surface().live_count();

        assert_eq!(picker.add_slot(SelectorKind::Html).unwrap(), 3);
        assert_eq!(picker.hex_slots(), vec![2, 3]);
        assert_eq!(picker.remove_slot(), Some(SelectorKind::Html));

        assert_eq!(picker.editable_fields(), fields);
        assert_eq!(picker.hex_slots(), hex);
        assert_eq!(picker.slot_kinds(), kinds);
        assert_eq!(picker.surface().live_count(), widgets);
    }

    #[test]
    fn test_added_slot_shows_current_color() {
        let (mut picker, _) = picker();
        picker.edit(2, FieldEdit::text(0, "#336699")).unwrap();
        let index = picker.add_slot(SelectorKind::Rgb).unwrap();
        assert_eq!(picker.slot_display(index).unwrap(), vec!["51", "102", "153"]);
    }

    #[test]
    fn test_remove_on_empty() {
        let mut picker =
            ColorSelector::with_registry(HeadlessSurface::new(), SelectorRegistry::new(), &[])
                .unwrap();
        assert!(picker.is_empty());
        assert_eq!(picker.remove_slot(), None);
    }

    #[test]
    fn test_retype_slot() {
        let (mut picker, changes) = picker();
        picker.edit(0, FieldEdit::slider(0, 200)).unwrap();
        let widgets = picker.surface().live_count();

        picker.retype_slot(1, SelectorKind::Html).unwrap();
        assert_eq!(picker.slot_kind(1), Some(SelectorKind::Html));
        assert_eq!(picker.slot_display(1).unwrap(), vec!["#c80000"]);
        assert_eq!(picker.hex_slots(), vec![1, 2]);
        assert_eq!(picker.editable_fields().len(), 5);
        // HSV group (frame + 3 * 3 widgets) replaced by one entry.
        assert_eq!(picker.surface().live_count(), widgets - 10 + 1);
        assert_eq!(changes.get(), 1);

        picker.retype_slot_by_name(1, "hsv").unwrap();
        assert_eq!(picker.slot_kind(1), Some(SelectorKind::Hsv));
        assert_eq!(picker.surface().live_count(), widgets);
        assert!(picker.retype_slot_by_name(1, "cmyk").is_err());
        assert!(picker.retype_slot(7, SelectorKind::Rgb).is_err());
    }

    #[test]
    fn test_paste_and_copy() {
        let (mut picker, changes) = picker();
        picker.paste_html(" #00ff80\n").unwrap();
        assert_eq!(picker.copy_html().unwrap(), "#00ff80");
        assert_eq!(changes.get(), 1);
        assert_in_sync(&picker);

        let err = picker.paste_html("not a color").unwrap_err();
        assert!(matches!(err, SelectorError::Color(ColorError::InvalidColor { .. })));
        assert_eq!(picker.copy_html().unwrap(), "#00ff80");
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_out_of_range_color_is_reported() {
        let (mut picker, changes) = picker();
        let err = picker.set_color(Color::new(300, 0, 0)).unwrap_err();
        assert!(matches!(err, SelectorError::Color(ColorError::OutOfRange { .. })));
        assert_eq!(changes.get(), 0);
        assert!(!picker.is_propagating());
    }

    #[test]
    fn test_rejected_color_changes_nothing() {
        let (mut picker, changes) = picker();
        picker.edit(0, FieldEdit::slider(0, 10)).unwrap();
        let displays: Vec<_> = (0..picker.len())
            .map(|index| picker.slot_display(index).unwrap())
            .collect();

        assert!(picker.set_color(Color::new(300, 0, 0)).is_err());
        assert!(picker.paste_html("#0a0000").is_ok());
        assert_eq!(changes.get(), 2);

        assert!(picker.set_color(Color::new(0, -1, 0)).is_err());
        assert_eq!(picker.color().components(), [10, 0, 0]);
        assert_eq!(picker.copy_html().unwrap(), "#0a0000");
        for (index, display) in displays.iter().enumerate() {
            assert_eq!(picker.slot_display(index).as_ref(), Some(display));
        }
        assert_in_sync(&picker);

        // Only the slider edit is in the history
        assert!(picker.undo().unwrap());
        assert_eq!(picker.color().components(), [0, 0, 0]);
        assert!(!picker.can_undo());
    }

    #[test]
    fn test_undo_redo() {
        let (mut picker, changes) = picker();
        picker.edit(0, FieldEdit::slider(0, 10)).unwrap();
        picker.edit(0, FieldEdit::slider(0, 20)).unwrap();
        assert!(picker.can_undo());

        assert!(picker.undo().unwrap());
        assert_eq!(picker.color().components(), [10, 0, 0]);
        assert_in_sync(&picker);
        assert!(picker.undo().unwrap());
        assert_eq!(picker.color().components(), [0, 0, 0]);
        assert!(!picker.undo().unwrap());

        assert!(picker.redo().unwrap());
        assert_eq!(picker.color().components(), [10, 0, 0]);
        assert_eq!(changes.get(), 5);
    }

    #[test]
    fn test_unchanged_edit_is_not_recorded() {
        let (mut picker, changes) = picker();
        picker.edit(0, FieldEdit::text(0, "0")).unwrap();
        assert!(!picker.can_undo());
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn test_highlight_hex_fields() {
        let (mut picker, _) = picker();
        picker.add_slot(SelectorKind::Html).unwrap();
        picker.highlight_hex_fields("yellow");

        let hex_entries: Vec<WidgetId> = picker
            .hex_slots()
            .into_iter()
            .flat_map(|index| picker.slots[index].selector.editable_fields())
            .collect();
        assert_eq!(hex_entries.len(), 2);
        for id in hex_entries {
            let widget = picker.surface().get(id).unwrap();
            assert_eq!(widget.background.as_deref(), Some("yellow"));
        }
        let rgb_entry = picker.slots[0].selector.editable_fields()[0];
        assert_eq!(picker.surface().get(rgb_entry).unwrap().background, None);
    }

    #[test]
    fn test_from_config() {
        let config = PickerConfig {
            initial_slots: vec![SelectorKind::Html, SelectorKind::Rgb],
            initial_color: "#102030".to_string(),
            ..PickerConfig::default()
        };
        let picker = ColorSelector::from_config(HeadlessSurface::new(), &config).unwrap();
        assert_eq!(picker.slot_kinds(), vec![SelectorKind::Html, SelectorKind::Rgb]);
        assert_eq!(picker.slot_display(1).unwrap(), vec!["16", "32", "48"]);
    }

    #[test]
    fn test_close_releases_everything() {
        let (picker, _) = picker();
        let surface = picker.close();
        assert_eq!(surface.live_count(), 0);
    }
}
