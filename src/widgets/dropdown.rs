//! Dropdown widget: a sunken select field with a popup option list.
//!
//! Click the field to open the list, click an option to select it. The
//! default option set is the illustrative path-like list the gallery shows.

use std::any::Any;

use crate::css::styles::Styles;
use crate::dom::node::NodeData;
use crate::geometry::{Region, Size};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// Caller-supplied selection handler; receives the selected option index.
pub type SelectHandler = Box<dyn FnMut(usize)>;

/// The arrow glyph on the field's right edge.
const ARROW: char = '▼';

/// A select field with a popup option list.
pub struct Dropdown {
    options: Vec<String>,
    selected: usize,
    open: bool,
    disabled: bool,
    on_change: Option<SelectHandler>,
}

impl Dropdown {
    /// Create a dropdown with the default illustrative options.
    pub fn new() -> Self {
        Self::with_options([
            "",
            "C:\\Documents and Settings",
            "C:\\Documents and Settings\\Documents",
            "iexplorer.exe",
        ])
    }

    /// Create a dropdown with explicit options.
    pub fn with_options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
            open: false,
            disabled: false,
            on_change: None,
        }
    }

    /// Set the initially selected option index (builder). Out-of-range
    /// indexes clamp to the last option.
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index.min(self.options.len().saturating_sub(1));
        self
    }

    /// Set whether the dropdown is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the selection handler (builder).
    pub fn on_change(mut self, handler: impl FnMut(usize) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// The options.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The selected option's text, empty when there are no options.
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The selected option index.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Whether the option list is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the dropdown is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Open the option list. Disabled dropdowns stay closed.
    pub fn open_list(&mut self) {
        if !self.disabled && !self.options.is_empty() {
            self.open = true;
        }
    }

    /// Close the option list.
    pub fn close_list(&mut self) {
        self.open = false;
    }

    /// Select the option at `index`, close the list, and fire the handler.
    ///
    /// Out-of-range indexes are ignored (the list stays open).
    pub fn select(&mut self, index: usize) {
        if index >= self.options.len() {
            return;
        }
        self.selected = index;
        self.open = false;
        if let Some(handler) = &mut self.on_change {
            handler(index);
        }
    }

    /// The region the open list occupies, directly under the field.
    pub fn list_region(&self, field: Region) -> Region {
        Region::new(field.x, field.bottom(), field.width, self.options.len() as i32)
    }

    /// Map a row of the open list back to an option index.
    pub fn option_at(&self, list: Region, y: i32) -> Option<usize> {
        let index = y - list.y;
        if index < 0 || index >= self.options.len() as i32 {
            None
        } else {
            Some(index as usize)
        }
    }

    /// Render the open option list into `region` (canvas colors, selected
    /// row reversed).
    pub fn render_list(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }
        let base = CellStyle::from_styles(styles);
        let mut strips = Vec::new();
        for (i, option) in self.options.iter().enumerate() {
            let y = region.y + i as i32;
            if y >= region.bottom() {
                break;
            }
            let mut style = base.clone();
            style.reverse = i == self.selected;
            let mut strip = Strip::new(y, region.x);
            strip.push(' ', style.clone());
            let text: String = option
                .chars()
                .take(region.width.saturating_sub(1) as usize)
                .collect();
            strip.push_str(&text, style.clone());
            strip.fill(region.width, style);
            strips.push(strip);
        }
        strips
    }
}

impl Default for Dropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Dropdown {
    fn widget_type(&self) -> &str {
        "Dropdown"
    }

    fn can_focus(&self) -> bool {
        !self.disabled
    }

    fn node_data(&self) -> NodeData {
        NodeData::new("Dropdown")
            .focusable(!self.disabled)
            .disabled(self.disabled)
    }

    fn intrinsic_size(&self) -> Size {
        let widest = self
            .options
            .iter()
            .map(|o| o.chars().count() as i32)
            .max()
            .unwrap_or(0);
        // " text ... ▼" with a space of padding each side of the arrow.
        Size::new((widest + 4).max(12), 1)
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let mut strip = Strip::new(region.y, region.x);
        strip.push(' ', style.clone());

        let text_width = region.width.saturating_sub(3) as usize;
        let text: String = self.value().chars().take(text_width).collect();
        strip.push_str(&text, style.clone());
        strip.fill(region.width.saturating_sub(2), style.clone());
        strip.push(ARROW, style.clone());
        strip.push(' ', style.clone());

        let mut strips = vec![strip];
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
