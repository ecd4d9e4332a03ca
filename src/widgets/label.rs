//! Label widget: a single line of text.

use std::any::Any;

use crate::css::styles::{Styles, TextAlign};
use crate::geometry::{Region, Size};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// A non-interactive line of text, aligned per its computed styles.
pub struct Label {
    text: String,
}

impl Label {
    /// Create a label with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(self.text.chars().count() as i32, 1)
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let width = region.width as usize;
        let text: String = self.text.chars().take(width).collect();
        let len = text.chars().count();

        let pad_left = match styles.text_align.unwrap_or(TextAlign::Left) {
            TextAlign::Left => 0,
            TextAlign::Center => width.saturating_sub(len) / 2,
            TextAlign::Right => width.saturating_sub(len),
        };

        let mut strip = Strip::new(region.y, region.x);
        for _ in 0..pad_left {
            strip.push(' ', style.clone());
        }
        strip.push_str(&text, style.clone());
        strip.fill(region.width, style.clone());

        let mut strips = vec![strip];
        // Remaining rows are background fill.
        for row in 1..region.height {
            strips.push(crate::render::strip::blank_row(region, row, style.clone()));
        }
        strips
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn region(w: i32, h: i32) -> Region {
        Region::new(0, 0, w, h)
    }

    #[test]
    fn widget_type_and_size() {
        let label = Label::new("hello");
        assert_eq!(label.widget_type(), "Label");
        assert_eq!(label.intrinsic_size(), Size::new(5, 1));
        assert_eq!(label.text(), "hello");
    }

    #[test]
    fn renders_left_aligned_by_default() {
        let label = Label::new("Hi");
        let strips = label.render(region(6, 1), &Styles::new());
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].cells[0].ch, 'H');
        assert_eq!(strips[0].cells[1].ch, 'i');
        assert_eq!(strips[0].width(), 6);
    }

    #[test]
    fn renders_centered() {
        let mut styles = Styles::new();
        styles.text_align = Some(TextAlign::Center);
        let strips = Label::new("Hi").render(region(6, 1), &styles);
        assert_eq!(strips[0].cells[2].ch, 'H');
    }

    #[test]
    fn renders_right_aligned() {
        let mut styles = Styles::new();
        styles.text_align = Some(TextAlign::Right);
        let strips = Label::new("Hi").render(region(6, 1), &styles);
        assert_eq!(strips[0].cells[4].ch, 'H');
        assert_eq!(strips[0].cells[5].ch, 'i');
    }

    #[test]
    fn truncates_to_width() {
        let strips = Label::new("a very long line").render(region(4, 1), &Styles::new());
        assert_eq!(strips[0].width(), 4);
        assert_eq!(strips[0].cells[3].ch, 'e');
    }

    #[test]
    fn fills_extra_rows_with_background() {
        let strips = Label::new("x").render(region(3, 2), &Styles::new());
        assert_eq!(strips.len(), 2);
        assert!(strips[1].cells.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn empty_region_renders_nothing() {
        assert!(Label::new("x").render(region(0, 1), &Styles::new()).is_empty());
        assert!(Label::new("x").render(region(3, 0), &Styles::new()).is_empty());
    }

    #[test]
    fn carries_style_colors() {
        let mut styles = Styles::new();
        styles.color = Some("black".into());
        styles.background = Some("#c0c0c0".into());
        let strips = Label::new("x").render(region(2, 1), &styles);
        assert_eq!(strips[0].cells[0].style.fg, Some("black".into()));
        assert_eq!(strips[0].cells[1].style.bg, Some("#c0c0c0".into()));
    }
}
