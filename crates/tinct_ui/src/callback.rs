//! Callback wrappers for selector observers and shortcut handlers
//!
//! Instead of spelling out `Option<Box<dyn Fn(T) -> M>>` at every seam, the
//! selector controller and the keyboard tracker store a `Callback<T, M>` or a
//! `SideEffect`.
//!
//! # Examples
//!
//! ```
//! use tinct_ui::{Callback0, SideEffect};
//!
//! #[derive(Debug, PartialEq)]
//! enum Action {
//!     Copy,
//! }
//!
//! let on_copy: Callback0<Action> = Callback0::new(|()| Action::Copy);
//! assert_eq!(on_copy.emit(), Some(Action::Copy));
//!
//! let on_change = SideEffect::new(|| println!("color changed"));
//! on_change.emit();
//! ```

use std::fmt;

/// An optional handler turning a value into a message.
///
/// - `T`: The input type for the callback (e.g. a key code)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `None` if no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// A callback that takes no parameters, such as a copy or paste shortcut.
pub type Callback0<M> = Callback<(), M>;

impl<M> Callback0<M> {
    /// Call the callback without any parameters.
    pub fn emit(&self) -> Option<M> {
        self.call(())
    }
}

/// A side-effect callback that doesn't return a message.
///
/// The selector controller uses this for its color-changed observer: the host
/// repaints a preview swatch or similar, nothing flows back.
pub struct SideEffect {
    f: Option<Box<dyn Fn()>>,
}

impl SideEffect {
    /// Create a new side-effect callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty side-effect callback.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the side-effect callback, if it exists.
    pub fn emit(&self) {
        if let Some(ref f) = self.f {
            f();
        }
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl Default for SideEffect {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffect")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_empty_callback_returns_none() {
        let callback: Callback<u32, u32> = Callback::none();
        assert!(!callback.is_some());
        assert_eq!(callback.call(3), None);
    }

    #[test]
    fn test_callback_maps_value() {
        let callback = Callback::new(|code: u32| code * 2);
        assert_eq!(callback.call(21), Some(42));
    }

    #[test]
    fn test_side_effect_runs_each_emit() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let effect = SideEffect::new(move || counter.set(counter.get() + 1));

        effect.emit();
        effect.emit();
        assert_eq!(count.get(), 2);

        SideEffect::none().emit();
    }
}
