//! Button widget: a beveled push button.
//!
//! Tall buttons render the full raised bevel; single-row buttons (the usual
//! case in a window's button row) lean on the `:active` reverse-video rule
//! for press feedback instead.

use std::any::Any;

use crate::css::styles::{Styles, TextAlign};
use crate::geometry::{Region, Size};
use crate::render::bevel;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// Caller-supplied press handler.
pub type ClickHandler = Box<dyn FnMut()>;

/// An interactive button with a centered label.
pub struct Button {
    label: String,
    disabled: bool,
    on_click: Option<ClickHandler>,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            on_click: None,
        }
    }

    /// Set whether the button is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the press handler (builder). Missing handler means pressing is a
    /// silent no-op.
    pub fn on_click(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// The button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Press the button: fires the handler unless disabled.
    pub fn press(&mut self) {
        if self.disabled {
            return;
        }
        if let Some(handler) = &mut self.on_click {
            handler();
        }
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn default_css(&self) -> &str {
        "Button { min-width: 10; text-align: center; }"
    }

    fn can_focus(&self) -> bool {
        !self.disabled
    }

    fn node_data(&self) -> crate::dom::node::NodeData {
        crate::dom::node::NodeData::new("Button")
            .focusable(!self.disabled)
            .disabled(self.disabled)
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(crate::layout::button_width(&self.label), 1)
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let mut strips = Vec::new();

        // Background fill first.
        for row in 0..region.height {
            strips.push(crate::render::strip::blank_row(region, row, style.clone()));
        }

        // Tall buttons get a real bevel; the label lives in the interior.
        let interior = if region.height >= 3 {
            strips.extend(bevel::frame_strips(region, styles));
            bevel::interior(region, styles)
        } else {
            region
        };

        if !interior.size().is_drawable() {
            return strips;
        }

        let label_row = interior.y + interior.height / 2;
        let width = interior.width as usize;
        let label: String = self.label.chars().take(width).collect();
        let len = label.chars().count();

        let pad_left = match styles.text_align.unwrap_or(TextAlign::Center) {
            TextAlign::Left => 0,
            TextAlign::Center => width.saturating_sub(len) / 2,
            TextAlign::Right => width.saturating_sub(len),
        };

        let mut strip = Strip::new(label_row, interior.x);
        for _ in 0..pad_left {
            strip.push(' ', style.clone());
        }
        strip.push_str(&label, style.clone());
        strip.fill(interior.width, style.clone());
        strips.push(strip);

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
    use std::cell::Cell;
    use std::rc::Rc;

    fn region(w: i32, h: i32) -> Region {
        Region::new(0, 0, w, h)
    }

    #[test]
    fn widget_type_and_css() {
        let b = Button::new("OK");
        assert_eq!(b.widget_type(), "Button");
        assert!(b.default_css().contains("min-width: 10"));
    }

    #[test]
    fn focus_follows_disabled() {
        assert!(Button::new("OK").can_focus());
        assert!(!Button::new("OK").disabled(true).can_focus());

        let data = Button::new("OK").disabled(true).node_data();
        assert!(data.disabled);
        assert!(!data.focusable);
    }

    #[test]
    fn intrinsic_size_has_minimum() {
        assert_eq!(Button::new("OK").intrinsic_size(), Size::new(10, 1));
        assert_eq!(Button::new("Continue...").intrinsic_size(), Size::new(15, 1));
    }

    #[test]
    fn press_fires_handler() {
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        let mut b = Button::new("OK").on_click(move || count_c.set(count_c.get() + 1));
        b.press();
        b.press();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn press_without_handler_is_noop() {
        let mut b = Button::new("OK");
        b.press(); // must not panic
    }

    #[test]
    fn press_disabled_is_noop() {
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        let mut b = Button::new("OK")
            .disabled(true)
            .on_click(move || count_c.set(count_c.get() + 1));
        b.press();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn single_row_label_centered() {
        let b = Button::new("OK");
        let strips = b.render(region(10, 1), &Styles::new());
        let row: &Strip = strips.iter().find(|s| s.cells.iter().any(|c| c.ch == 'O')).unwrap();
        let text: String = row.cells.iter().map(|c| c.ch).collect();
        assert_eq!(text.trim(), "OK");
        assert_eq!(row.cells[4].ch, 'O');
    }

    #[test]
    fn tall_button_renders_bevel() {
        use crate::css::styles::{Bevel, BevelKind};
        let mut styles = Styles::new();
        styles.border = Some(Bevel { kind: BevelKind::Raised });
        styles.border_light = Some("#ffffff".into());
        styles.border_dark = Some("#5a5e5b".into());

        let b = Button::new("OK");
        let strips = b.render(region(10, 3), &styles);
        // Frame cells carry the highlight color somewhere.
        assert!(strips
            .iter()
            .flat_map(|s| &s.cells)
            .any(|c| c.style.fg == Some("#ffffff".into())));
        // Label on the middle row.
        assert!(strips.iter().any(|s| s.y == 1 && s.cells.iter().any(|c| c.ch == 'O')));
    }

    #[test]
    fn empty_region_renders_nothing() {
        assert!(Button::new("OK").render(region(0, 1), &Styles::new()).is_empty());
    }

    #[test]
    fn truncates_long_label() {
        let b = Button::new("Very Long Label");
        let strips = b.render(region(5, 1), &Styles::new());
        assert!(strips.iter().all(|s| s.right() <= 5));
    }
}
