//! List widget: a vertical run of text items inside a raised panel.
//!
//! Lists are what modal submenus show when a menu header is pressed; they
//! also serve as free-standing item panels. Items render one per row inside
//! the bevel frame.

use std::any::Any;

use crate::css::styles::Styles;
use crate::geometry::{Region, Size};
use crate::render::bevel;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// A vertical list of text items.
pub struct List {
    items: Vec<String>,
}

impl List {
    /// Create a list from items.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { items: items.into_iter().map(Into::into).collect() }
    }

    /// The list items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item on a given row of the rendered list, accounting for the
    /// bevel frame. `local_y` is relative to the list region's top.
    pub fn item_at(&self, local_y: i32) -> Option<&str> {
        let index = local_y - 1; // first row is the frame
        if index < 0 {
            return None;
        }
        self.items.get(index as usize).map(String::as_str)
    }
}

impl Widget for List {
    fn widget_type(&self) -> &str {
        "List"
    }

    fn intrinsic_size(&self) -> Size {
        let widest = self
            .items
            .iter()
            .map(|i| i.chars().count() as i32)
            .max()
            .unwrap_or(0);
        // One cell of bevel and one of padding per side.
        Size::new(widest + 4, self.items.len() as i32 + 2)
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let mut strips = Vec::new();

        // Background fill, then frame on top.
        for row in 0..region.height {
            strips.push(crate::render::strip::blank_row(region, row, style.clone()));
        }
        strips.extend(bevel::frame_strips(region, styles));

        let interior = bevel::interior(region, styles);
        for (i, item) in self.items.iter().enumerate() {
            let y = interior.y + i as i32;
            if y >= interior.bottom() {
                break;
            }
            let mut strip = Strip::new(y, interior.x);
            strip.push(' ', style.clone());
            let text: String = item
                .chars()
                .take(interior.width.saturating_sub(1) as usize)
                .collect();
            strip.push_str(&text, style.clone());
            strip.fill(interior.width, style.clone());
            strips.push(strip);
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
