//! Checkbox widget: a check well plus a text label.
//!
//! All construction options are optional with silent defaults: a missing
//! change handler is a no-op, a missing label renders just the well.
//! Conditional styling (`:checked`, `:disabled`, `:focus`) comes from the
//! stylesheet via the node's state flags.

use std::any::Any;

use crate::css::styles::Styles;
use crate::dom::node::NodeData;
use crate::geometry::{Region, Size};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

/// Caller-supplied change handler; receives the new checked state.
pub type ChangeHandler = Box<dyn FnMut(bool)>;

/// The check glyph drawn in a checked well.
const CHECK_MARK: char = '✓';

/// A toggleable checkbox with a label.
pub struct Checkbox {
    label: String,
    checked: bool,
    disabled: bool,
    on_change: Option<ChangeHandler>,
}

impl Checkbox {
    /// Create a checkbox with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            disabled: false,
            on_change: None,
        }
    }

    /// Set the initial checked state (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set whether the checkbox is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the change handler (builder). Missing handler means changes are
    /// silent.
    pub fn on_change(mut self, handler: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current checked state.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether the checkbox is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Toggle the checkbox, firing the change handler with the new state.
    ///
    /// Disabled checkboxes ignore toggles. Returns the (possibly unchanged)
    /// checked state.
    pub fn toggle(&mut self) -> bool {
        if self.disabled {
            return self.checked;
        }
        self.checked = !self.checked;
        if let Some(handler) = &mut self.on_change {
            handler(self.checked);
        }
        self.checked
    }
}

impl Widget for Checkbox {
    fn widget_type(&self) -> &str {
        "Checkbox"
    }

    fn can_focus(&self) -> bool {
        !self.disabled
    }

    fn node_data(&self) -> NodeData {
        NodeData::new("Checkbox")
            .focusable(!self.disabled)
            .disabled(self.disabled)
            .checked(self.checked)
    }

    fn intrinsic_size(&self) -> Size {
        // "[x] " + label
        Size::new(4 + self.label.chars().count() as i32, 1)
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        // The well keeps canvas colors so the mark stays legible on any
        // surrounding surface.
        let well_style = CellStyle {
            fg: style.fg.clone(),
            bg: Some("#ffffff".into()),
            ..CellStyle::default()
        };

        let mut strip = Strip::new(region.y, region.x);
        strip.push('[', well_style.clone());
        strip.push(
            if self.checked { CHECK_MARK } else { ' ' },
            well_style.clone(),
        );
        strip.push(']', well_style);
        strip.push(' ', style.clone());

        let remaining = region.width.saturating_sub(4) as usize;
        let label: String = self.label.chars().take(remaining).collect();
        strip.push_str(&label, style.clone());
        strip.fill(region.width, style.clone());

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
