//! Modal window widget and its chrome parts.
//!
//! A modal composes, in order: a [`TitleBar`] (icon, title, help/close
//! affordances — also the drag handle), an optional [`MenuBar`] of
//! [`MenuItem`]s with popup [`List`]s, a [`Content`] region holding the
//! caller's widgets, and an optional [`ButtonRow`] of [`Button`]s.
//!
//! The modal owns two pieces of window-manager state: the id it registered
//! under (drawn once at mount, stable for its lifetime) and the
//! exclusive-open submenu name — at most one submenu is open at a time
//! within one modal, and opening another implicitly closes the first.

use std::any::Any;

use crate::css::scalar::Scalar;
use crate::css::styles::Styles;
use crate::dom::node::NodeData;
use crate::geometry::{Offset, Region, Size};
use crate::layout::Alignment;
use crate::render::bevel;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;
use crate::widgets::button::Button;
use crate::widgets::list::List;
use crate::window::registry::{WindowDescriptor, WindowId};

/// Caller-supplied close handler.
pub type CloseHandler = Box<dyn FnMut()>;

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// A retro modal window.
///
/// Every construction option is optional with a silent default: the title
/// falls back to `"Modal"`, a missing close handler is a no-op, empty
/// buttons/menu suppress their chrome rows entirely.
pub struct Modal {
    title: String,
    icon: Option<char>,
    menu: Vec<(String, List)>,
    buttons: Vec<Button>,
    content: Vec<Box<dyn Widget>>,
    default_position: Offset,
    width: Option<Scalar>,
    height: Option<Scalar>,
    buttons_alignment: Alignment,
    on_close: Option<CloseHandler>,
    menu_opened: Option<String>,
    window_id: Option<WindowId>,
}

impl Modal {
    /// Create a modal with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            menu: Vec::new(),
            buttons: Vec::new(),
            content: Vec::new(),
            default_position: Offset::ZERO,
            width: None,
            height: None,
            buttons_alignment: Alignment::End,
            on_close: None,
            menu_opened: None,
            window_id: None,
        }
    }

    /// Set the title-bar icon glyph (builder).
    pub fn icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Add a menu with its popup list (builder).
    pub fn menu(mut self, name: impl Into<String>, list: List) -> Self {
        self.menu.push((name.into(), list));
        self
    }

    /// Add a bottom-row button (builder).
    pub fn button(mut self, value: impl Into<String>, on_click: impl FnMut() + 'static) -> Self {
        self.buttons.push(Button::new(value).on_click(on_click));
        self
    }

    /// Add a content child widget (builder).
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.content.push(Box::new(widget));
        self
    }

    /// Set the initial window position (builder).
    pub fn default_position(mut self, x: i32, y: i32) -> Self {
        self.default_position = Offset::new(x, y);
        self
    }

    /// Set an explicit frame width in cells (builder).
    pub fn width(mut self, cells: i32) -> Self {
        self.width = Some(Scalar::cells(cells as f32));
        self
    }

    /// Set an explicit frame height in cells (builder).
    pub fn height(mut self, cells: i32) -> Self {
        self.height = Some(Scalar::cells(cells as f32));
        self
    }

    /// Set the button-row alignment (builder).
    pub fn buttons_alignment(mut self, alignment: Alignment) -> Self {
        self.buttons_alignment = alignment;
        self
    }

    /// Set the close handler (builder). Missing handler means closing only
    /// deregisters the window.
    pub fn on_close(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The title-bar icon glyph, if any.
    pub fn icon_glyph(&self) -> Option<char> {
        self.icon
    }

    /// The initial window position.
    pub fn initial_position(&self) -> Offset {
        self.default_position
    }

    /// Explicit frame width, if set.
    pub fn frame_width(&self) -> Option<Scalar> {
        self.width
    }

    /// Explicit frame height, if set.
    pub fn frame_height(&self) -> Option<Scalar> {
        self.height
    }

    /// The button-row alignment.
    pub fn alignment(&self) -> Alignment {
        self.buttons_alignment
    }

    // ── Window identity ──────────────────────────────────────────────

    /// The id this modal registered under, once mounted.
    pub fn window_id(&self) -> Option<&WindowId> {
        self.window_id.as_ref()
    }

    /// Record the id drawn at mount. Called once by the desktop; the id is
    /// never regenerated.
    pub fn set_window_id(&mut self, id: WindowId) {
        self.window_id = Some(id);
    }

    /// Build this modal's registry descriptor for the given id.
    pub fn descriptor(&self, id: WindowId) -> WindowDescriptor {
        WindowDescriptor::new(id, self.title.clone(), self.icon)
    }

    /// Fire the caller's close handler (no-op when none was supplied).
    pub fn invoke_close(&mut self) {
        if let Some(handler) = &mut self.on_close {
            handler();
        }
    }

    // ── Submenu exclusivity ──────────────────────────────────────────

    /// Open the named submenu, unconditionally.
    ///
    /// Opening a second menu implicitly closes the first; re-opening the one
    /// already open is not a toggle.
    pub fn open_menu(&mut self, name: impl Into<String>) {
        self.menu_opened = Some(name.into());
    }

    /// Close whichever submenu is open.
    pub fn close_menu(&mut self) {
        self.menu_opened = None;
    }

    /// The currently open submenu name, if any.
    pub fn open_menu_name(&self) -> Option<&str> {
        self.menu_opened.as_deref()
    }
}

impl Widget for Modal {
    fn widget_type(&self) -> &str {
        "Modal"
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }
        let style = CellStyle::from_styles(styles);
        let mut strips = Vec::new();
        for row in 0..region.height {
            strips.push(crate::render::strip::blank_row(region, row, style.clone()));
        }
        strips.extend(bevel::frame_strips(region, styles));
        strips
    }

    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        let mut children: Vec<Box<dyn Widget>> = Vec::new();

        children.push(Box::new(TitleBar::new(self.title.clone(), self.icon)));

        if !self.menu.is_empty() {
            let items = std::mem::take(&mut self.menu)
                .into_iter()
                .map(|(name, list)| MenuItem::new(name, list))
                .collect();
            children.push(Box::new(MenuBar::new(items)));
        }

        children.push(Box::new(Content::new(std::mem::take(&mut self.content))));

        if !self.buttons.is_empty() {
            children.push(Box::new(ButtonRow::new(std::mem::take(&mut self.buttons))));
        }

        children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// TitleBar
// ---------------------------------------------------------------------------

/// Width of the `?` / `X` affordance boxes.
pub const AFFORDANCE_WIDTH: i32 = 3;

/// The close affordance region within a title bar.
pub fn close_button_region(title_bar: Region) -> Region {
    Region::new(title_bar.right() - AFFORDANCE_WIDTH, title_bar.y, AFFORDANCE_WIDTH, 1)
}

/// The help affordance region within a title bar.
pub fn help_button_region(title_bar: Region) -> Region {
    let close = close_button_region(title_bar);
    Region::new(close.x - AFFORDANCE_WIDTH, title_bar.y, AFFORDANCE_WIDTH, 1)
}

/// The window's title bar: icon, title text, `?` and `X` affordances.
///
/// Mounts with the `draggable` class — the desktop starts drags from any
/// press that lands here outside the affordances.
pub struct TitleBar {
    title: String,
    icon: Option<char>,
}

impl TitleBar {
    /// Create a title bar.
    pub fn new(title: impl Into<String>, icon: Option<char>) -> Self {
        Self { title: title.into(), icon }
    }

    /// The title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Cells the icon and title occupy on the bar's left side.
    pub fn label_width(&self) -> i32 {
        let icon = if self.icon.is_some() { 2 } else { 0 };
        icon + self.title.chars().count() as i32 + 1
    }
}

impl Widget for TitleBar {
    fn widget_type(&self) -> &str {
        "TitleBar"
    }

    fn node_data(&self) -> NodeData {
        NodeData::new("TitleBar").with_class("draggable")
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }

        let style = CellStyle::from_styles(styles);
        let mut strip = Strip::new(region.y, region.x);

        if let Some(icon) = self.icon {
            strip.push(icon, style.clone());
            strip.push(' ', style.clone());
        }
        strip.push_str(&self.title, style.clone());
        // Pad to width; an over-long title is cut at the bar's edge.
        strip.fill(region.width, style.clone());

        // Affordances render reversed so they read as raised buttons on the
        // header color.
        let mut affordance = style.clone();
        affordance.reverse = true;
        affordance.bold = false;
        let help = help_button_region(region);
        let close = close_button_region(region);
        if region.width >= 2 * AFFORDANCE_WIDTH + self.label_width() {
            for (r, glyph) in [(help, '?'), (close, 'X')] {
                for (i, cell) in strip.cells.iter_mut().enumerate() {
                    let x = region.x + i as i32;
                    if r.contains(x, region.y) {
                        cell.style = affordance.clone();
                        cell.ch = if x == r.x + 1 { glyph } else { ' ' };
                    }
                }
            }
        }

        vec![strip]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// MenuBar / MenuItem
// ---------------------------------------------------------------------------

/// The horizontal menu header row.
pub struct MenuBar {
    items: Vec<MenuItem>,
}

impl MenuBar {
    /// Create a menu bar from its items.
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }
}

impl Widget for MenuBar {
    fn widget_type(&self) -> &str {
        "MenuBar"
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }
        let style = CellStyle::from_styles(styles);
        vec![crate::render::strip::blank_row(region, 0, style)]
    }

    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        std::mem::take(&mut self.items)
            .into_iter()
            .map(|item| Box::new(item) as Box<dyn Widget>)
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One menu header; its popup [`List`] mounts as a child node that the
/// desktop overlays while the header is open.
pub struct MenuItem {
    name: String,
    list: Option<List>,
}

impl MenuItem {
    /// Create a menu item with its popup list.
    pub fn new(name: impl Into<String>, list: List) -> Self {
        Self { name: name.into(), list: Some(list) }
    }

    /// The header label.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Widget for MenuItem {
    fn widget_type(&self) -> &str {
        "MenuItem"
    }

    fn intrinsic_size(&self) -> Size {
        Size::new(crate::layout::menu_item_width(&self.name), 1)
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }
        let style = CellStyle::from_styles(styles);
        let mut strip = Strip::new(region.y, region.x);
        strip.push(' ', style.clone());
        let text: String = self
            .name
            .chars()
            .take(region.width.saturating_sub(1) as usize)
            .collect();
        strip.push_str(&text, style.clone());
        strip.fill(region.width, style);
        vec![strip]
    }

    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        match self.list.take() {
            // The popup starts hidden; the desktop flips visibility while
            // this menu is the open one.
            Some(list) => vec![Box::new(HiddenList(list))],
            None => Vec::new(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Wrapper mounting a [`List`] with `visible: false` node data.
struct HiddenList(List);

impl Widget for HiddenList {
    fn widget_type(&self) -> &str {
        self.0.widget_type()
    }

    fn node_data(&self) -> NodeData {
        let mut data = self.0.node_data();
        data.visible = false;
        data
    }

    fn intrinsic_size(&self) -> Size {
        self.0.intrinsic_size()
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        self.0.render(region, styles)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn inner_any(&self) -> &dyn Any {
        self.0.inner_any()
    }

    fn inner_any_mut(&mut self) -> &mut dyn Any {
        self.0.inner_any_mut()
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// The window's content region: holds the caller's widgets.
pub struct Content {
    children: Vec<Box<dyn Widget>>,
}

impl Content {
    /// Create a content region from child widgets.
    pub fn new(children: Vec<Box<dyn Widget>>) -> Self {
        Self { children }
    }
}

impl Widget for Content {
    fn widget_type(&self) -> &str {
        "Content"
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }
        let style = CellStyle::from_styles(styles);
        (0..region.height)
            .map(|row| crate::render::strip::blank_row(region, row, style.clone()))
            .collect()
    }

    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        std::mem::take(&mut self.children)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// ButtonRow
// ---------------------------------------------------------------------------

/// The bottom button row.
pub struct ButtonRow {
    buttons: Vec<Button>,
}

impl ButtonRow {
    /// Create a button row from its buttons.
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }
}

impl Widget for ButtonRow {
    fn widget_type(&self) -> &str {
        "ButtonRow"
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        if !region.size().is_drawable() {
            return Vec::new();
        }
        let style = CellStyle::from_styles(styles);
        vec![crate::render::strip::blank_row(region, 0, style)]
    }

    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        std::mem::take(&mut self.buttons)
            .into_iter()
            .map(|b| Box::new(b) as Box<dyn Widget>)
            .collect()
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
