//! Host widget surface
//!
//! Selectors never talk to a toolkit directly. They ask a [`Surface`] to create
//! child widgets, place them on a grid and destroy them again. The host
//! application implements the trait for its toolkit; [`HeadlessSurface`] keeps
//! the widget tree in memory for tests and the command-line driver.

use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle to a widget created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of widget to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// Plain container for other widgets
    Frame,
    /// Single-line text entry, `width` in characters
    Entry { width: u16 },
    /// Horizontal slider over an inclusive integer range
    Slider {
        min: i32,
        max: i32,
        /// Trough color name, if the slider is tinted
        trough: Option<&'static str>,
    },
    /// Read-only drop-down listing selector names
    Chooser { options: Vec<String> },
}

/// Grid cell a widget is placed in, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub row: u16,
    pub column: u16,
}

impl Placement {
    pub fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }
}

/// The host-side collaborator that owns real widgets.
pub trait Surface {
    /// Create a widget under `parent` (or at the top level).
    fn create(&mut self, parent: Option<WidgetId>, kind: WidgetKind) -> WidgetId;

    /// Position a widget inside its parent.
    fn place(&mut self, id: WidgetId, at: Placement);

    /// Destroy a widget and everything created under it.
    fn destroy(&mut self, id: WidgetId);

    /// Change the background color of a widget. Hosts without styling may ignore it.
    fn set_background(&mut self, id: WidgetId, color: &str) {
        let _ = (id, color);
    }
}

/// A widget tracked by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWidget {
    pub parent: Option<WidgetId>,
    pub kind: WidgetKind,
    pub placement: Option<Placement>,
    pub background: Option<String>,
}

/// In-memory surface that records the widget tree without drawing anything.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    widgets: BTreeMap<WidgetId, HeadlessWidget>,
    next_id: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of widgets that are currently alive.
    pub fn live_count(&self) -> usize {
        self.widgets.len()
    }

    /// Look up a live widget.
    pub fn get(&self, id: WidgetId) -> Option<&HeadlessWidget> {
        self.widgets.get(&id)
    }

    /// Whether the widget is still alive.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Direct children of `id`, in creation order.
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|(_, w)| w.parent == Some(id))
            .map(|(child, _)| *child)
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn create(&mut self, parent: Option<WidgetId>, kind: WidgetKind) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        log::trace!("surface: create {} {:?} under {:?}", id, kind, parent);
        self.widgets.insert(
            id,
            HeadlessWidget {
                parent,
                kind,
                placement: None,
                background: None,
            },
        );
        id
    }

    fn place(&mut self, id: WidgetId, at: Placement) {
        match self.widgets.get_mut(&id) {
            Some(widget) => widget.placement = Some(at),
            None => log::warn!("surface: place on destroyed widget {}", id),
        }
    }

    fn destroy(&mut self, id: WidgetId) {
        // Children first, so the whole subtree goes away.
        for child in self.children(id) {
            self.destroy(child);
        }
        if self.widgets.remove(&id).is_some() {
            log::trace!("surface: destroyed {}", id);
        }
    }

    fn set_background(&mut self, id: WidgetId, color: &str) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.background = Some(color.to_string());
        }
    }
}
