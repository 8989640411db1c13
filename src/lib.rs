//! tinct - Synchronized color selector
//!
//! One shared [`Color`] shown by a stack of interchangeable selectors (RGB
//! sliders, HSV sliders, an HTML hex entry). Editing any of them updates the
//! color and every other selector, then notifies an observer.

pub mod color;
pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod registry;
pub mod selector;

pub use color::{Color, Hsv, valid_html_color};
pub use config::{ConfigError, LogLevel, PickerConfig};
pub use controller::{ColorSelector, PropagationState};
pub use error::{ColorError, SelectorError};
pub use registry::{DEFAULT_SLOTS, SelectorFactory, SelectorRegistry};
pub use selector::{FieldEdit, HexSelector, HsvSelector, RgbSelector, Selector, SelectorKind};
