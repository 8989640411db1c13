//! Keyboard shortcut tracking for clipboard and history actions.
//!
//! Hosts forward raw key codes. Which numeric code means Ctrl, C, V and so on
//! depends on the windowing system, so the table is an explicit [`KeyCodes`]
//! value picked once at startup from [`Platform::detect`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::callback::Callback0;

/// Platform family, as far as key codes and icon formats are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

/// Errors from platform detection.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Unsupported platform family '{0}'")]
    Unsupported(String),
}

impl Platform {
    /// Platform of the running process.
    pub fn detect() -> Result<Self, PlatformError> {
        Self::from_family(std::env::consts::FAMILY)
    }

    /// Map a `std::env::consts::FAMILY` string to a platform.
    pub fn from_family(family: &str) -> Result<Self, PlatformError> {
        match family {
            "windows" => Ok(Platform::Windows),
            "unix" => Ok(Platform::Unix),
            other => Err(PlatformError::Unsupported(other.to_string())),
        }
    }
}

/// Raw key codes of the keys the shortcut tracker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCodes {
    pub ctrl: u32,
    pub shift: u32,
    pub c: u32,
    pub v: u32,
    pub z: u32,
}

impl KeyCodes {
    /// Virtual-key codes reported by Win32.
    pub const WINDOWS: KeyCodes = KeyCodes {
        ctrl: 17,
        shift: 16,
        c: 67,
        v: 86,
        z: 90,
    };

    /// X11 hardware key codes.
    pub const X11: KeyCodes = KeyCodes {
        ctrl: 37,
        shift: 50,
        c: 54,
        v: 55,
        z: 52,
    };

    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Windows => Self::WINDOWS,
            Platform::Unix => Self::X11,
        }
    }
}

/// Tracks held keys and turns Ctrl chords into messages.
///
/// - Ctrl+C → copy
/// - Ctrl+V → paste
/// - Ctrl+Z → undo, Ctrl+Shift+Z → redo
///
/// Auto-repeat presses of a key that is already held are ignored, so holding
/// Ctrl+V pastes once.
pub struct KeyEventsManager<M> {
    codes: KeyCodes,
    pressed: HashSet<u32>,
    on_copy: Callback0<M>,
    on_paste: Callback0<M>,
    on_undo: Callback0<M>,
    on_redo: Callback0<M>,
}

impl<M> KeyEventsManager<M> {
    pub fn new(codes: KeyCodes) -> Self {
        Self {
            codes,
            pressed: HashSet::new(),
            on_copy: Callback0::none(),
            on_paste: Callback0::none(),
            on_undo: Callback0::none(),
            on_redo: Callback0::none(),
        }
    }

    pub fn on_copy<F>(mut self, handler: F) -> Self
    where
        F: Fn(()) -> M + 'static,
    {
        self.on_copy = Callback0::new(handler);
        self
    }

    pub fn on_paste<F>(mut self, handler: F) -> Self
    where
        F: Fn(()) -> M + 'static,
    {
        self.on_paste = Callback0::new(handler);
        self
    }

    pub fn on_undo<F>(mut self, handler: F) -> Self
    where
        F: Fn(()) -> M + 'static,
    {
        self.on_undo = Callback0::new(handler);
        self
    }

    pub fn on_redo<F>(mut self, handler: F) -> Self
    where
        F: Fn(()) -> M + 'static,
    {
        self.on_redo = Callback0::new(handler);
        self
    }

    pub fn codes(&self) -> KeyCodes {
        self.codes
    }

    /// Whether `code` is currently held.
    pub fn is_pressed(&self, code: u32) -> bool {
        self.pressed.contains(&code)
    }

    /// Handle a key press, returning the shortcut message it triggers.
    pub fn key_pressed(&mut self, code: u32) -> Option<M> {
        if !self.pressed.insert(code) {
            return None;
        }
        if !self.pressed.contains(&self.codes.ctrl) {
            return None;
        }

        if code == self.codes.c {
            log::debug!("KeyEventsManager: copy");
            self.on_copy.emit()
        } else if code == self.codes.v {
            log::debug!("KeyEventsManager: paste");
            self.on_paste.emit()
        } else if code == self.codes.z {
            if self.pressed.contains(&self.codes.shift) {
                log::debug!("KeyEventsManager: redo");
                self.on_redo.emit()
            } else {
                log::debug!("KeyEventsManager: undo");
                self.on_undo.emit()
            }
        } else {
            None
        }
    }

    /// Handle a key release.
    ///
    /// Releases of keys that were never seen (pressed while the window was
    /// unfocused) are ignored.
    pub fn key_released(&mut self, code: u32) {
        self.pressed.remove(&code);
    }
}
