//! HSV selector. Sliders run over `0..=HSV_SCALE` and map to `[0, 1]`.

use tinct_ui::{Surface, WidgetId};

use super::components::ComponentGroup;
use super::{FieldEdit, Selector, SelectorKind};
use crate::color::{Color, Hsv};
use crate::error::{ColorError, SelectorError};

/// Slider steps per unit of hue, saturation or value
pub const HSV_SCALE: i32 = 1000;

#[derive(Debug)]
pub struct HsvSelector {
    group: ComponentGroup,
}

impl HsvSelector {
    pub fn new(surface: &mut dyn Surface, parent: WidgetId) -> Self {
        Self {
            group: ComponentGroup::new(surface, parent, 0..=HSV_SCALE, [None; 3]),
        }
    }

    /// Slider positions for `color`.
    pub fn scaled(color: &Color) -> [i32; 3] {
        let Hsv { h, s, v } = color.hsv();
        [h, s, v].map(|c| (c * f64::from(HSV_SCALE)).round_ties_even() as i32)
    }
}

impl Selector for HsvSelector {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Hsv
    }

    fn container(&self) -> WidgetId {
        self.group.frame()
    }

    fn update(&mut self, color: &Color) -> Result<(), ColorError> {
        self.group.show(Self::scaled(color));
        Ok(())
    }

    fn apply_edit(&mut self, edit: FieldEdit) -> Result<bool, SelectorError> {
        self.group.apply_edit(SelectorKind::Hsv, edit)
    }

    fn write_color(&self, color: &mut Color) -> Result<(), ColorError> {
        let [h, s, v] = self
            .group
            .values()
            .map(|c| f64::from(c) / f64::from(HSV_SCALE));
        color.set_from_hsv(Hsv::new(h, s, v));
        Ok(())
    }

    fn editable_fields(&self) -> Vec<WidgetId> {
        self.group.entries()
    }

    fn display(&self) -> Vec<String> {
        self.group.texts()
    }

    fn dispose(self: Box<Self>, surface: &mut dyn Surface) {
        self.group.dispose(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_ui::{HeadlessSurface, WidgetKind};

    fn selector(surface: &mut HeadlessSurface) -> HsvSelector {
        let root = surface.create(None, WidgetKind::Frame);
        HsvSelector::new(surface, root)
    }

    #[test]
    fn test_update_scales_hsv() {
        let mut surface = HeadlessSurface::new();
        let mut hsv = selector(&mut surface);

        hsv.update(&Color::new(0, 0, 255)).unwrap();
        assert_eq!(hsv.display(), vec!["667", "1000", "1000"]);

        hsv.update(&Color::new(128, 128, 128)).unwrap();
        assert_eq!(hsv.display(), vec!["0", "0", "502"]);
    }

    #[test]
    fn test_write_color_from_sliders() {
        let mut surface = HeadlessSurface::new();
        let mut hsv = selector(&mut surface);
        hsv.update(&Color::new(255, 0, 0)).unwrap();

        assert!(hsv.apply_edit(FieldEdit::slider(0, 500)).unwrap());
        let mut color = Color::default();
        hsv.write_color(&mut color).unwrap();
        assert_eq!(color.components(), [0, 255, 255]);
    }

    #[test]
    fn test_text_out_of_scale_is_not_pushed() {
        let mut surface = HeadlessSurface::new();
        let mut hsv = selector(&mut surface);
        assert!(!hsv.apply_edit(FieldEdit::text(2, "1001")).unwrap());
        assert!(hsv.apply_edit(FieldEdit::text(2, "1000")).unwrap());
    }
}
