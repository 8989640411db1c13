//! Window placement and icon helpers
//!
//! Pure geometry: the host reads screen and window sizes from its toolkit,
//! asks for a [`Geometry`], and applies it.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::keys::Platform;

/// Window size and position, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl Geometry {
    pub fn new(width: i32, height: i32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Formats as the X11-style geometry string `WxH+X+Y`.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// How a window is aligned against the window it is placed within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Align {
    /// Put the left edge at the base window's right edge instead of centering
    pub right: bool,
    /// Put the top edge at the base window's bottom edge instead of centering
    pub bottom: bool,
}

/// Center a window of `size` on a screen of `screen` pixels.
pub fn center_on_screen(screen: (i32, i32), size: (i32, i32)) -> Geometry {
    Geometry::new(
        size.0,
        size.1,
        screen.0 / 2 - size.0 / 2,
        screen.1 / 2 - size.1 / 2,
    )
}

/// Place a window within `base`.
///
/// `size` of `None` keeps the window's current size.
pub fn center_within(
    current: Geometry,
    base: Geometry,
    size: Option<(i32, i32)>,
    align: Align,
) -> Geometry {
    let (width, height) = size.unwrap_or(current.size());

    let x = base.x
        + if align.right {
            base.width
        } else {
            base.width / 2 - width / 2
        };
    let y = base.y
        + if align.bottom {
            base.height
        } else {
            base.height / 2 - height / 2
        };

    Geometry::new(width, height, x, y)
}

/// Path of a window icon next to `dir`: `.ico` on Windows, `.png` elsewhere.
pub fn icon_path(dir: &Path, base_name: &str, platform: Platform) -> PathBuf {
    let extension = match platform {
        Platform::Windows => "ico",
        Platform::Unix => "png",
    };
    dir.join(format!("{base_name}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_on_screen() {
        let geometry = center_on_screen((1920, 1080), (480, 360));
        assert_eq!(geometry, Geometry::new(480, 360, 720, 360));
        assert_eq!(geometry.to_string(), "480x360+720+360");
    }

    #[test]
    fn test_center_within_keeps_size() {
        let base = Geometry::new(800, 600, 100, 50);
        let dialog = Geometry::new(200, 100, 0, 0);
        let placed = center_within(dialog, base, None, Align::default());
        assert_eq!(placed, Geometry::new(200, 100, 400, 300));
    }

    #[test]
    fn test_center_within_aligned() {
        let base = Geometry::new(800, 600, 100, 50);
        let dialog = Geometry::new(200, 100, 0, 0);
        let placed = center_within(
            dialog,
            base,
            Some((300, 200)),
            Align {
                right: true,
                bottom: false,
            },
        );
        assert_eq!(placed, Geometry::new(300, 200, 900, 250));
    }

    #[test]
    fn test_icon_extension() {
        let dir = Path::new("assets");
        assert_eq!(
            icon_path(dir, "tinct", Platform::Windows),
            PathBuf::from("assets/tinct.ico")
        );
        assert_eq!(
            icon_path(dir, "tinct", Platform::Unix),
            PathBuf::from("assets/tinct.png")
        );
    }
}
