//! Error types for the color model and the selector controller.

use thiserror::Error;

/// Errors raised by [`Color`](crate::color::Color) conversions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Text is not `#` followed by exactly six hexadecimal digits
    #[error("Invalid HTML color: {text:?}")]
    InvalidColor {
        /// The rejected text
        text: String,
    },

    /// A channel holds a value that does not fit in a byte
    #[error("Channel {channel} value {value} is outside 0-255")]
    OutOfRange {
        /// Channel name (red, green or blue)
        channel: &'static str,
        /// The offending value
        value: i32,
    },
}

impl ColorError {
    /// Create an invalid color error for the given text.
    pub fn invalid_color(text: impl Into<String>) -> Self {
        Self::InvalidColor { text: text.into() }
    }
}

/// Errors raised by [`ColorSelector`](crate::controller::ColorSelector) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Slot index past the end of the slot list
    #[error("Slot {index} out of range ({len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    /// Selector name not known to the registry
    #[error("Unknown selector '{0}'")]
    UnknownSelector(String),

    /// Edit addressed a field the selector does not have
    #[error("Selector {kind} has no field {field}")]
    NoSuchField { kind: &'static str, field: usize },

    /// Color conversion failed while propagating
    #[error(transparent)]
    Color(#[from] ColorError),
}
