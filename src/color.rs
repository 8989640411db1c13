//! RGB color model with HSV and HTML conversions.
//!
//! HSV uses a piecewise-linear hue wheel of 1530 integer steps (six sectors
//! of 255). Every RGB color with a channel at 0 or at 255 survives
//! an `hsv()` / `set_from_hsv()` round trip exactly.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

pub const MIN_CHANNEL: i32 = 0x00;
pub const MAX_CHANNEL: i32 = 0xff;

/// Steps on the full hue circle (6 * 255)
const HUE_STEPS: i64 = 1530;
/// Steps covered by one leading channel (2 * 255)
const SECTOR_STEPS: i64 = 510;
/// Saturation below this is reported as gray
const ACHROMATIC_EPSILON: f64 = 1e-8;
/// Tolerance when deciding which neighbour of the leading channel is empty
const ZERO_EPSILON: f64 = 1e-6;

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// HSV triple, each component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// A 24-bit RGB color without alpha.
///
/// Channels are not range-checked on write. Formatting with [`Color::html`]
/// reports values outside `0..=255` as [`ColorError::OutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    components: [i32; 3],
}

impl Color {
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            components: [r, g, b],
        }
    }

    /// Parse a `#rrggbb` string.
    pub fn from_html(text: &str) -> Result<Self, ColorError> {
        let mut color = Self::default();
        color.set_from_html(text)?;
        Ok(color)
    }

    /// Build a color from an HSV triple.
    pub fn from_hsv(hsv: Hsv) -> Self {
        let mut color = Self::default();
        color.set_from_hsv(hsv);
        color
    }

    /// Replace all three channels. Callers keep them within `0..=255`.
    pub fn set_rgb(&mut self, components: [i32; 3]) {
        self.components = components;
    }

    /// Current `[r, g, b]` channels.
    pub fn components(&self) -> [i32; 3] {
        self.components
    }

    /// HTML code of the color, `#rrggbb` in lowercase.
    pub fn html(&self) -> Result<String, ColorError> {
        let mut html = String::with_capacity(7);
        html.push('#');
        for (value, channel) in self.components.into_iter().zip(CHANNEL_NAMES) {
            if !(MIN_CHANNEL..=MAX_CHANNEL).contains(&value) {
                return Err(ColorError::OutOfRange { channel, value });
            }
            html.push_str(&format!("{value:02x}"));
        }
        Ok(html)
    }

    /// Set the color from a `#rrggbb` string (digits in either case).
    pub fn set_from_html(&mut self, text: &str) -> Result<(), ColorError> {
        if !valid_html_color(text) {
            return Err(ColorError::invalid_color(text));
        }

        let mut components = [0; 3];
        for (i, component) in components.iter_mut().enumerate() {
            let pair = &text[1 + 2 * i..3 + 2 * i];
            *component = i32::from_str_radix(pair, 16)
                .map_err(|_| ColorError::invalid_color(text))?;
        }
        self.set_rgb(components);
        Ok(())
    }

    /// Set the color from HSV components in `[0, 1]`.
    pub fn set_from_hsv(&mut self, hsv: Hsv) {
        let max = f64::from(MAX_CHANNEL);
        let hue = (hsv.h * HUE_STEPS as f64).round_ties_even() as i64;
        let sector = hue.div_euclid(SECTOR_STEPS).rem_euclid(3) as usize;
        let offset = hue.rem_euclid(SECTOR_STEPS);

        // Hue: the leading channel holds then falls, the next one rises then holds.
        let mut color = [0.0_f64; 3];
        color[sector] = if offset <= i64::from(MAX_CHANNEL) {
            max
        } else {
            (SECTOR_STEPS - offset) as f64
        };
        color[(sector + 1) % 3] = if offset < i64::from(MAX_CHANNEL) {
            offset as f64
        } else {
            max
        };

        // Saturation: blend the weaker channels toward white.
        let strongest = color.iter().copied().fold(f64::MIN, f64::max);
        let desaturation = 1.0 - hsv.s;
        for channel in color.iter_mut() {
            if *channel != strongest {
                *channel += (max - *channel) * desaturation;
            }
        }

        // Value: scale everything toward black.
        self.set_rgb(color.map(|channel| (channel * hsv.v).round_ties_even() as i32));
    }

    /// HSV representation of the color.
    ///
    /// Black reports `(0, 0, 0)` and grays report hue and saturation 0.
    pub fn hsv(&self) -> Hsv {
        let max = f64::from(MAX_CHANNEL);
        let mut color = self.components.map(f64::from);

        let v = color.iter().copied().fold(f64::MIN, f64::max) / max;
        if v == 0.0 {
            return Hsv::default();
        }
        for channel in color.iter_mut() {
            *channel /= v;
        }

        let whiteness = color.iter().copied().fold(f64::MAX, f64::min) / max;
        let s = 1.0 - whiteness;
        if s < ACHROMATIC_EPSILON {
            return Hsv::new(0.0, 0.0, v);
        }
        for channel in color.iter_mut() {
            *channel = (*channel - max * whiteness) / s;
        }

        // The leading channel fixes the sector; the non-empty neighbour says
        // whether we are on the rising or the falling half.
        let rounded = color.map(f64::round_ties_even);
        let top = rounded.iter().copied().fold(f64::MIN, f64::max);
        let leading = rounded.iter().position(|&c| c == top).unwrap_or(0);
        let next = color[(leading + 1) % 3];
        let previous = color[(leading + 2) % 3];

        let steps = (SECTOR_STEPS * leading as i64) as f64
            + if previous.abs() < ZERO_EPSILON {
                next
            } else {
                -previous
            };
        let h = steps.rem_euclid(HUE_STEPS as f64) / HUE_STEPS as f64;
        Hsv::new(h, s, v)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.components;
        write!(f, "r: {r}, g: {g}, b: {b}")
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_html(s)
    }
}

/// Whether `text` is a valid HTML color: `#` followed by exactly six hex digits.
pub fn valid_html_color(text: &str) -> bool {
    match text.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
