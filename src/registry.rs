//! Registry of selector kinds and the factories that build them.

use tinct_ui::{Surface, WidgetId};

use crate::error::SelectorError;
use crate::selector::{HexSelector, HsvSelector, RgbSelector, Selector, SelectorKind};

/// Builds a selector under the given parent widget.
pub type SelectorFactory = fn(&mut dyn Surface, WidgetId) -> Box<dyn Selector>;

/// Slots a fresh color selector starts with.
pub const DEFAULT_SLOTS: [SelectorKind; 3] =
    [SelectorKind::Rgb, SelectorKind::Hsv, SelectorKind::Html];

/// Registry of available selector kinds.
///
/// Order of registration is the order the kind chooser lists them in.
pub struct SelectorRegistry {
    factories: Vec<(SelectorKind, SelectorFactory)>,
}

impl SelectorRegistry {
    /// Create a new registry with all built-in selectors registered.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: Vec::new(),
        };

        registry.register(SelectorKind::Rgb, |surface, parent| {
            Box::new(RgbSelector::new(surface, parent))
        });
        registry.register(SelectorKind::Hsv, |surface, parent| {
            Box::new(HsvSelector::new(surface, parent))
        });
        registry.register(SelectorKind::Html, |surface, parent| {
            Box::new(HexSelector::new(surface, parent))
        });

        registry
    }

    /// Register (or replace) the factory for a kind.
    pub fn register(&mut self, kind: SelectorKind, factory: SelectorFactory) {
        match self.factories.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((kind, factory)),
        }
    }

    /// Look up a kind by its chooser name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<SelectorKind> {
        self.factories
            .iter()
            .map(|(kind, _)| *kind)
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Like [`get`](Self::get), but unknown names are an error.
    pub fn resolve(&self, name: &str) -> Result<SelectorKind, SelectorError> {
        self.get(name)
            .ok_or_else(|| SelectorError::UnknownSelector(name.to_string()))
    }

    /// Chooser names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.factories
            .iter()
            .map(|(kind, _)| kind.name().to_string())
            .collect()
    }

    /// Build a selector of `kind` under `parent`.
    pub fn build(
        &self,
        kind: SelectorKind,
        surface: &mut dyn Surface,
        parent: WidgetId,
    ) -> Result<Box<dyn Selector>, SelectorError> {
        let (_, factory) = self
            .factories
            .iter()
            .find(|(k, _)| *k == kind)
            .ok_or_else(|| SelectorError::UnknownSelector(kind.name().to_string()))?;
        Ok(factory(surface, parent))
    }
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
