//! The desktop: per-tree window coordinator.
//!
//! One `Desktop` owns everything a tree of windows needs: the DOM and widget
//! instances, computed styles, the window stack (z-order), the window
//! registry handle, the drag controller, the focus chain, and the
//! compositor. All window-manager transitions run here, synchronously inside
//! event handling:
//!
//! - mouse-down inside a window claims the active pointer (unconditionally);
//! - mouse-down on a menu header opens that submenu, implicitly closing any
//!   other; pressing the content area or button row closes it;
//! - the close affordance raises a [`CloseWindow`] message — the close path
//!   fires the caller's handler, removes the registry entry *by title*, and
//!   unmounts; any other unmount leaves the registry entry behind;
//! - title-bar presses hand the gesture to the [`DragController`].

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::SecondaryMap;
use tracing::debug;

use crate::css::parse_css;
use crate::css::parser::ParseError;
use crate::css::styles::Styles;
use crate::css::stylesheet::CompiledStylesheet;
use crate::dom::{Dom, NodeData, NodeId};
use crate::event::input::MouseEvent;
use crate::event::message::{CloseWindow, Envelope};
use crate::geometry::{Offset, Region, Size};
use crate::layout::{solve_window, submenu_region, WindowLayout, WindowSpec};
use crate::reactive::create_effect;
use crate::render::compositor::Compositor;
use crate::render::strip::CellStyle;
use crate::theme::{Theme, DEFAULT_CHROME_CSS};
use crate::widget::lifecycle::LifecycleTracker;
use crate::widget::traits::Widget;
use crate::widgets::button::Button;
use crate::widgets::checkbox::Checkbox;
use crate::widgets::dropdown::Dropdown;
use crate::widgets::modal::{MenuItem, Modal, TitleBar};
use crate::window::drag::DragController;
use crate::window::registry::{WindowId, WindowRegistry};

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Maintains an ordered list of focusable nodes for tab navigation.
///
/// The chain is scoped: it is rebuilt from the active window's subtree (or
/// the whole surface when no window is active), walking depth-first and
/// keeping nodes that are focusable, visible, and enabled.
#[derive(Debug, Default)]
pub struct FocusChain {
    nodes: Vec<NodeId>,
    current: Option<usize>,
}

impl FocusChain {
    /// Create an empty focus chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chain from the subtree rooted at `scope`.
    ///
    /// If the previously focused node is still in the new chain, focus is
    /// preserved; otherwise it is cleared.
    pub fn rebuild(&mut self, dom: &Dom, scope: NodeId) {
        let old_focused = self.current_node();

        self.nodes.clear();
        self.current = None;

        for id in dom.walk_depth_first(scope) {
            if let Some(data) = dom.get(id) {
                if data.focusable && data.visible && !data.disabled {
                    self.nodes.push(id);
                }
            }
        }

        if let Some(old_id) = old_focused {
            if let Some(pos) = self.nodes.iter().position(|&n| n == old_id) {
                self.current = Some(pos);
            }
        }
    }

    /// The currently focused node, if any.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Move focus to the next node in the chain. Wraps around.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = Some(next);
        self.nodes.get(next).copied()
    }

    /// Move focus to the previous node in the chain. Wraps around.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.nodes.len() - 1,
            Some(idx) => idx - 1,
        };
        self.current = Some(prev);
        self.nodes.get(prev).copied()
    }

    /// Focus a specific node by id. Returns `true` if the node is in the
    /// chain.
    pub fn focus_node(&mut self, id: NodeId) -> bool {
        if let Some(pos) = self.nodes.iter().position(|&n| n == id) {
            self.current = Some(pos);
            true
        } else {
            false
        }
    }

    /// Number of focusable nodes in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Desktop
// ---------------------------------------------------------------------------

/// The per-tree coordinator. Created at tree root, dropped with it; the
/// registry handle it owns is the only one its windows share.
pub struct Desktop {
    /// The DOM tree.
    pub dom: Dom,
    /// Widget instance per mounted node.
    widgets: SecondaryMap<NodeId, Box<dyn Widget>>,
    /// Computed styles per node, refreshed by [`Desktop::refresh`].
    pub styles: HashMap<NodeId, Styles>,
    /// Screen buffer and frame diffing.
    pub compositor: Compositor,
    /// Mount/unmount tracking.
    pub lifecycle: LifecycleTracker,
    /// Tab-order focus chain, scoped to the active window.
    pub focus: FocusChain,
    /// The shared window registry handle.
    pub registry: WindowRegistry,
    /// Title-bar drag gestures.
    pub drag: DragController,

    theme: Theme,
    /// Built-in widget stylesheets, keyed by widget type.
    defaults: HashMap<String, CompiledStylesheet>,
    /// The theme-resolved chrome stylesheet.
    chrome: CompiledStylesheet,
    /// User-supplied stylesheet, highest priority.
    user: Option<CompiledStylesheet>,

    root: NodeId,
    /// Modal root nodes, back to front (last = topmost).
    window_stack: Vec<NodeId>,
    /// Window origins (top-left frame corner).
    positions: SecondaryMap<NodeId, Offset>,
    /// Solved window layouts, refreshed by [`Desktop::refresh`].
    layouts: HashMap<NodeId, WindowLayout>,
    /// Regions of free-standing widgets mounted directly on the surface.
    surface_regions: HashMap<NodeId, Region>,
    /// Set by a signal effect whenever the registry changes.
    registry_changed: Rc<Cell<bool>>,
}

impl Desktop {
    /// Create a desktop surface of the given size with the given theme.
    pub fn new(width: u16, height: u16, theme: Theme) -> Self {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("Desktop"));

        let registry = WindowRegistry::new();

        // Registry listeners re-render: any add/remove/activate flips this
        // flag, which the next tick folds into the compositor dirty state.
        let registry_changed = Rc::new(Cell::new(false));
        let flag = registry_changed.clone();
        create_effect(move || {
            let _ = registry.windows();
            let _ = registry.active_window();
            flag.set(true);
        });

        let chrome_sheet =
            parse_css(DEFAULT_CHROME_CSS).expect("built-in chrome stylesheet must parse");
        let chrome = CompiledStylesheet::compile(&theme.resolve(&chrome_sheet), true);

        Self {
            dom,
            widgets: SecondaryMap::new(),
            styles: HashMap::new(),
            compositor: Compositor::new(width, height),
            lifecycle: LifecycleTracker::new(),
            focus: FocusChain::new(),
            registry,
            drag: DragController::new(),
            theme,
            defaults: HashMap::new(),
            chrome,
            user: None,
            root,
            window_stack: Vec::new(),
            positions: SecondaryMap::new(),
            layouts: HashMap::new(),
            surface_regions: HashMap::new(),
            registry_changed,
        }
    }

    /// The surface root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The window stack, back to front.
    pub fn window_stack(&self) -> &[NodeId] {
        &self.window_stack
    }

    /// A window's current origin.
    pub fn window_position(&self, window: NodeId) -> Option<Offset> {
        self.positions.get(window).copied()
    }

    /// The solved layout of a window (valid after [`Desktop::refresh`]).
    pub fn window_layout(&self, window: NodeId) -> Option<&WindowLayout> {
        self.layouts.get(&window)
    }

    /// The viewport size in cells.
    pub fn viewport(&self) -> Size {
        Size::new(self.compositor.width as i32, self.compositor.height as i32)
    }

    /// Apply a user stylesheet (highest cascade priority).
    pub fn set_user_css(&mut self, css: &str) -> Result<(), ParseError> {
        let sheet = parse_css(css)?;
        self.user = Some(CompiledStylesheet::compile(&self.theme.resolve(&sheet), false));
        self.compositor.mark_dirty();
        Ok(())
    }

    /// Resize the surface.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.compositor.resize(width, height);
    }

    /// Fold the registry-effect flag into the compositor dirty state.
    ///
    /// Called once per tick by the app loop.
    pub fn absorb_registry_changes(&mut self) {
        if self.registry_changed.replace(false) {
            self.compositor.mark_dirty();
        }
    }

    // ── Mounting ─────────────────────────────────────────────────────

    /// Mount a widget tree on the surface.
    ///
    /// Modals join the window stack (on top) and acquire their registry
    /// entry here: the id is drawn once, collision-checked, and the
    /// descriptor registered. Mounting does *not* claim the active pointer —
    /// that happens on first interaction.
    pub fn mount(&mut self, widget: impl Widget + 'static) -> NodeId {
        let node = self.mount_under(self.root, Box::new(widget));

        if let Some(position) = self.modal_mut(node).map(|m| m.initial_position()) {
            self.positions.insert(node, position);
            self.window_stack.push(node);

            let id = self.registry.allocate_id();
            let descriptor = {
                let modal = self.modal_mut(node).expect("modal present after mount");
                modal.set_window_id(id.clone());
                modal.descriptor(id)
            };
            self.registry.add_window(descriptor);
        }

        self.focus.rebuild(&self.dom, self.focus_scope());
        self.compositor.mark_dirty();
        node
    }

    /// Recursively insert a widget subtree below `parent`.
    fn mount_under(&mut self, parent: NodeId, mut widget: Box<dyn Widget>) -> NodeId {
        self.register_default_css(widget.as_ref());

        let node = self.dom.insert_child(parent, widget.node_data());
        self.lifecycle.on_mount(node);

        let children = widget.take_children();
        self.widgets.insert(node, widget);

        for child in children {
            self.mount_under(node, child);
        }
        node
    }

    /// Compile a widget type's default CSS the first time the type mounts.
    fn register_default_css(&mut self, widget: &dyn Widget) {
        let ty = widget.widget_type();
        if widget.default_css().is_empty() || self.defaults.contains_key(ty) {
            return;
        }
        if let Ok(sheet) = parse_css(widget.default_css()) {
            let compiled = CompiledStylesheet::compile(&self.theme.resolve(&sheet), true);
            self.defaults.insert(ty.to_string(), compiled);
        }
    }

    // ── Window lifecycle ─────────────────────────────────────────────

    /// Run the close path for a window: fire the caller's close handler,
    /// release the registry entry (matched by title), and unmount.
    pub fn close_window(&mut self, window: NodeId) {
        let title = match self.modal_mut(window) {
            Some(modal) => {
                modal.invoke_close();
                modal.title().to_string()
            }
            None => return,
        };
        debug!(title = %title, "window closing");
        self.registry.remove_window(&title);
        self.unmount(window);
    }

    /// Unmount a subtree without running the close path.
    ///
    /// A force-unmounted modal's registry entry survives — release is tied
    /// to the close affordance, nothing else.
    pub fn force_unmount(&mut self, node: NodeId) {
        self.unmount(node);
    }

    fn unmount(&mut self, node: NodeId) {
        let Some((_, removed_ids)) = self.dom.remove_subtree(node) else {
            return;
        };
        for id in removed_ids {
            self.lifecycle.on_unmount(id);
            self.widgets.remove(id);
            self.styles.remove(&id);
            self.surface_regions.remove(&id);
        }
        self.positions.remove(node);
        self.layouts.remove(&node);
        self.window_stack.retain(|&w| w != node);
        if self.drag.dragging_window() == Some(node) {
            self.drag.end();
        }
        self.focus.rebuild(&self.dom, self.focus_scope());
        self.compositor.mark_dirty();
    }

    /// Claim the active pointer for a window and raise it to the top of the
    /// stack.
    pub fn activate(&mut self, window: NodeId) {
        if let Some(id) = self.modal_window_id(window) {
            self.registry.set_active_window(id);
        }
        self.window_stack.retain(|&w| w != window);
        self.window_stack.push(window);

        for w in self.window_stack.clone() {
            if let Some(data) = self.dom.get_mut(w) {
                data.active = w == window;
            }
        }
        self.focus.rebuild(&self.dom, self.focus_scope());
        self.compositor.mark_dirty();
    }

    /// The active window node: the one whose id the registry points at.
    pub fn active_window_node(&self) -> Option<NodeId> {
        let active = self.registry.active_window()?;
        self.window_stack
            .iter()
            .copied()
            .find(|&w| self.modal_window_id_ref(w) == Some(&active))
    }

    fn focus_scope(&self) -> NodeId {
        self.active_window_node().unwrap_or(self.root)
    }

    // ── Widget access helpers ────────────────────────────────────────

    fn modal_mut(&mut self, node: NodeId) -> Option<&mut Modal> {
        self.widgets
            .get_mut(node)?
            .inner_any_mut()
            .downcast_mut::<Modal>()
    }

    fn modal_ref(&self, node: NodeId) -> Option<&Modal> {
        self.widgets.get(node)?.inner_any().downcast_ref::<Modal>()
    }

    fn modal_window_id(&mut self, node: NodeId) -> Option<WindowId> {
        self.modal_mut(node).and_then(|m| m.window_id().cloned())
    }

    fn modal_window_id_ref(&self, node: NodeId) -> Option<&WindowId> {
        self.modal_ref(node).and_then(|m| m.window_id())
    }

    /// Find a direct child of `node` by widget type.
    fn child_of_type(&self, node: NodeId, ty: &str) -> Option<NodeId> {
        self.dom
            .children(node)
            .iter()
            .copied()
            .find(|&c| self.dom.get(c).is_some_and(|d| d.widget_type == ty))
    }

    /// The menu item nodes of a window, in order.
    fn menu_item_nodes(&self, window: NodeId) -> Vec<NodeId> {
        match self.child_of_type(window, "MenuBar") {
            Some(bar) => self.dom.children(bar).to_vec(),
            None => Vec::new(),
        }
    }

    /// The content child nodes of a window, in order.
    fn content_child_nodes(&self, window: NodeId) -> Vec<NodeId> {
        match self.child_of_type(window, "Content") {
            Some(content) => self.dom.children(content).to_vec(),
            None => Vec::new(),
        }
    }

    /// The button nodes of a window, in order.
    fn button_nodes(&self, window: NodeId) -> Vec<NodeId> {
        match self.child_of_type(window, "ButtonRow") {
            Some(row) => self.dom.children(row).to_vec(),
            None => Vec::new(),
        }
    }

    fn menu_item_name(&self, item: NodeId) -> Option<String> {
        self.widgets
            .get(item)?
            .inner_any()
            .downcast_ref::<MenuItem>()
            .map(|mi| mi.name().to_string())
    }

    // ── Styles & layout ──────────────────────────────────────────────

    /// Recompute styles and window layouts. Run before hit-testing or
    /// rendering.
    pub fn refresh(&mut self) {
        self.compute_styles();
        self.solve_layouts();
    }

    fn compute_styles(&mut self) {
        self.styles.clear();
        for node in self.dom.walk_depth_first(self.root) {
            let mut styles = Styles::new();
            if let Some(data) = self.dom.get(node) {
                if let Some(sheet) = self.defaults.get(&data.widget_type) {
                    styles = styles.merge(&sheet.compute_styles(node, &self.dom));
                }
            }
            styles = styles.merge(&self.chrome.compute_styles(node, &self.dom));
            if let Some(user) = &self.user {
                styles = styles.merge(&user.compute_styles(node, &self.dom));
            }
            self.styles.insert(node, styles);
        }
    }

    fn solve_layouts(&mut self) {
        self.layouts.clear();
        let viewport = self.viewport();

        for window in self.window_stack.clone() {
            let spec = self.window_spec(window);
            let origin = self.positions.get(window).copied().unwrap_or(Offset::ZERO);
            self.layouts.insert(window, solve_window(&spec, origin, viewport));
        }

        // Free-standing widgets stack down the surface's left side.
        self.surface_regions.clear();
        let mut y = 1;
        for child in self.dom.children(self.root).to_vec() {
            let Some(data) = self.dom.get(child) else { continue };
            if data.widget_type == "Modal" || !data.visible {
                continue;
            }
            let size = self
                .widgets
                .get(child)
                .map(|w| w.intrinsic_size())
                .unwrap_or(Size::new(0, 1));
            let region = Region::new(2, y, size.width.max(1), size.height.max(1));
            self.surface_regions.insert(child, region);
            y = region.bottom() + 1;
        }
    }

    /// Assemble the layout input for one window from its mounted parts.
    fn window_spec(&self, window: NodeId) -> WindowSpec {
        let mut spec = WindowSpec::default();

        if let Some(title_node) = self.child_of_type(window, "TitleBar") {
            if let Some(bar) = self
                .widgets
                .get(title_node)
                .and_then(|w| w.inner_any().downcast_ref::<TitleBar>())
            {
                spec.title_width = bar.label_width();
            }
        }

        for item in self.menu_item_nodes(window) {
            if let Some(name) = self.menu_item_name(item) {
                spec.menu_names.push(name);
            }
        }

        for child in self.content_child_nodes(window) {
            if !self.dom.get(child).is_some_and(|d| d.visible) {
                continue;
            }
            let size = self
                .widgets
                .get(child)
                .map(|w| w.intrinsic_size())
                .unwrap_or(Size::new(0, 1));
            spec.content_rows.push(size.height.max(1));
            spec.content_min_width = spec.content_min_width.max(size.width);
        }

        for button in self.button_nodes(window) {
            if let Some(b) = self
                .widgets
                .get(button)
                .and_then(|w| w.inner_any().downcast_ref::<Button>())
            {
                spec.button_labels.push(b.label().to_string());
            }
        }

        if let Some(content_node) = self.child_of_type(window, "Content") {
            if let Some(padding) = self
                .styles
                .get(&content_node)
                .and_then(|s| s.padding.as_ref())
            {
                let vp = self.viewport();
                spec.content_padding = padding.resolve(vp.width, vp.height);
            }
        }

        if let Some(modal) = self.modal_ref(window) {
            let styles = self.styles.get(&window);
            spec.buttons_alignment = modal.alignment();
            spec.width = modal.frame_width().or_else(|| styles.and_then(|s| s.width));
            spec.height = modal
                .frame_height()
                .or_else(|| styles.and_then(|s| s.height));
        }

        spec
    }

    // ── Menu state ───────────────────────────────────────────────────

    /// Open a submenu by name in a window. Exclusive within that window:
    /// any other open submenu closes implicitly.
    pub fn open_menu(&mut self, window: NodeId, name: &str) {
        if let Some(modal) = self.modal_mut(window) {
            modal.open_menu(name);
        }
        self.sync_menu_flags(window);
        self.compositor.mark_dirty();
    }

    /// Close whichever submenu is open in a window.
    pub fn close_menu(&mut self, window: NodeId) {
        if let Some(modal) = self.modal_mut(window) {
            modal.close_menu();
        }
        self.sync_menu_flags(window);
        self.compositor.mark_dirty();
    }

    /// The open submenu name of a window, if any.
    pub fn open_menu_name(&self, window: NodeId) -> Option<String> {
        self.modal_ref(window)?.open_menu_name().map(str::to_string)
    }

    /// Mirror a modal's open-menu name onto its menu item and popup nodes.
    fn sync_menu_flags(&mut self, window: NodeId) {
        let opened = self.open_menu_name(window);

        for item in self.menu_item_nodes(window) {
            let is_open =
                opened.is_some() && self.menu_item_name(item).as_deref() == opened.as_deref();
            if let Some(data) = self.dom.get_mut(item) {
                data.open = is_open;
            }
            // The popup list node tracks its header's open state.
            for list_node in self.dom.children(item).to_vec() {
                if let Some(data) = self.dom.get_mut(list_node) {
                    data.visible = is_open;
                }
            }
        }
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// Move focus forward and mirror the `:focus` flag.
    pub fn focus_next(&mut self) {
        let next = self.focus.focus_next();
        self.sync_focus_flags(next);
    }

    /// Move focus backward and mirror the `:focus` flag.
    pub fn focus_previous(&mut self) {
        let prev = self.focus.focus_previous();
        self.sync_focus_flags(prev);
    }

    fn sync_focus_flags(&mut self, focused: Option<NodeId>) {
        for node in self.dom.walk_depth_first(self.root) {
            if let Some(data) = self.dom.get_mut(node) {
                data.focused = Some(node) == focused;
            }
        }
        self.compositor.mark_dirty();
    }

    // ── Mouse routing ────────────────────────────────────────────────

    /// Route a mouse event. Returns app-level messages raised by the
    /// interaction (the close affordance raises [`CloseWindow`]).
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Envelope> {
        self.refresh();
        let point = event.position();
        let mut out = Vec::new();

        // An in-flight drag owns the pointer until release.
        if event.is_left_drag() && self.drag.is_dragging() {
            if let Some((window, origin)) = self.drag.update(point) {
                self.positions.insert(window, origin);
                self.compositor.mark_dirty();
            }
            return out;
        }
        if event.is_left_up() {
            self.drag.end();
            return out;
        }
        if !event.is_left_down() {
            return out;
        }

        // Topmost window under the pointer wins; open overlays count as part
        // of their window.
        let hit = self
            .window_stack
            .iter()
            .rev()
            .copied()
            .find(|&w| self.window_hit_region(w, point));

        match hit {
            Some(window) => {
                self.activate(window);
                self.route_window_press(window, point, &mut out);
            }
            None => self.route_surface_press(point),
        }

        self.compositor.mark_dirty();
        out
    }

    /// Whether a point falls on a window's frame or one of its open
    /// overlays.
    fn window_hit_region(&self, window: NodeId, point: Offset) -> bool {
        let Some(layout) = self.layouts.get(&window) else {
            return false;
        };
        if layout.frame.contains_offset(point) {
            return true;
        }
        if let Some(region) = self.open_submenu_overlay(window) {
            if region.contains_offset(point) {
                return true;
            }
        }
        self.open_dropdown_overlay_in(window)
            .is_some_and(|(_, region)| region.contains_offset(point))
    }

    /// The open submenu's overlay region in a window, if a menu is open.
    fn open_submenu_overlay(&self, window: NodeId) -> Option<Region> {
        let opened = self.open_menu_name(window)?;
        let layout = self.layouts.get(&window)?;

        for (index, item) in self.menu_item_nodes(window).iter().enumerate() {
            if self.menu_item_name(*item).as_deref() != Some(opened.as_str()) {
                continue;
            }
            let anchor = *layout.menu_items.get(index)?;
            let list_node = self.dom.children(*item).first().copied()?;
            let size = self.widgets.get(list_node)?.intrinsic_size();
            return Some(submenu_region(anchor, size.height, size.width));
        }
        None
    }

    /// The popup list node of the open submenu, if any.
    fn open_submenu_list_node(&self, window: NodeId) -> Option<NodeId> {
        let opened = self.open_menu_name(window)?;
        for item in self.menu_item_nodes(window) {
            if self.menu_item_name(item).as_deref() == Some(opened.as_str()) {
                return self.dom.children(item).first().copied();
            }
        }
        None
    }

    /// The open dropdown and its overlay region in a window, if any.
    fn open_dropdown_overlay_in(&self, window: NodeId) -> Option<(NodeId, Region)> {
        let layout = self.layouts.get(&window)?;
        for (index, &child) in self.content_child_nodes(window).iter().enumerate() {
            if let Some(dd) = self
                .widgets
                .get(child)
                .and_then(|w| w.inner_any().downcast_ref::<Dropdown>())
            {
                if dd.is_open() {
                    let field = *layout.content_children.get(index)?;
                    return Some((child, dd.list_region(field)));
                }
            }
        }
        None
    }

    /// Resolve a press inside a window to its state transitions.
    fn route_window_press(&mut self, window: NodeId, point: Offset, out: &mut Vec<Envelope>) {
        // Open overlays take priority over the chrome beneath them.
        if let Some((dd_node, region)) = self.open_dropdown_overlay_in(window) {
            if region.contains_offset(point) {
                self.select_dropdown_option(dd_node, region, point);
                return;
            }
        }
        if let Some(region) = self.open_submenu_overlay(window) {
            if region.contains_offset(point) {
                // A press on the popup dismisses it.
                self.close_menu(window);
                return;
            }
        }

        let Some(layout) = self.layouts.get(&window).cloned() else {
            return;
        };

        if layout.close_button.contains_offset(point) {
            out.push(Envelope::new(CloseWindow { node: window }, window));
            return;
        }
        if layout.help_button.contains_offset(point) {
            // The help affordance renders but does nothing.
            return;
        }
        if layout.title_bar.contains_offset(point) {
            let origin = self.positions.get(window).copied().unwrap_or(Offset::ZERO);
            self.drag.begin(window, point, origin);
            return;
        }

        // Menu headers open on press, unconditionally.
        for (index, item) in self.menu_item_nodes(window).iter().enumerate() {
            if layout
                .menu_items
                .get(index)
                .is_some_and(|r| r.contains_offset(point))
            {
                if let Some(name) = self.menu_item_name(*item) {
                    self.open_menu(window, &name);
                }
                return;
            }
        }

        // Content and button row presses close any open menu, then interact.
        if layout.content.contains_offset(point) {
            self.close_menu(window);
            for (index, &child) in self.content_child_nodes(window).iter().enumerate() {
                if layout
                    .content_children
                    .get(index)
                    .is_some_and(|r| r.contains_offset(point))
                {
                    self.interact_with_child(child);
                    return;
                }
            }
            return;
        }
        if layout.button_row.is_some_and(|r| r.contains_offset(point)) {
            self.close_menu(window);
            for (index, &button) in self.button_nodes(window).iter().enumerate() {
                if layout
                    .buttons
                    .get(index)
                    .is_some_and(|r| r.contains_offset(point))
                {
                    self.press_button_node(button);
                    return;
                }
            }
        }
    }

    /// Resolve a press on the bare surface (free-standing widgets).
    fn route_surface_press(&mut self, point: Offset) {
        // A press on an open free-standing dropdown's list selects.
        let open_overlay = self
            .dom
            .children(self.root)
            .to_vec()
            .into_iter()
            .find_map(|child| {
                let region = *self.surface_regions.get(&child)?;
                let dd = self
                    .widgets
                    .get(child)?
                    .inner_any()
                    .downcast_ref::<Dropdown>()?;
                if dd.is_open() {
                    Some((child, dd.list_region(region)))
                } else {
                    None
                }
            });
        if let Some((node, region)) = open_overlay {
            if region.contains_offset(point) {
                self.select_dropdown_option(node, region, point);
                return;
            }
        }

        let hit = self
            .surface_regions
            .iter()
            .find(|(_, region)| region.contains_offset(point))
            .map(|(&node, _)| node);
        if let Some(node) = hit {
            self.interact_with_child(node);
        }
    }

    /// Interact with a pressed leaf widget: toggle a checkbox, open/close a
    /// dropdown, press a button.
    fn interact_with_child(&mut self, node: NodeId) {
        if self.focus.focus_node(node) {
            self.sync_focus_flags(Some(node));
        }

        enum Outcome {
            Checked(bool),
            Open(bool),
            Pressed,
            None,
        }

        let outcome = match self.widgets.get_mut(node) {
            Some(widget) => {
                let any = widget.inner_any_mut();
                if let Some(checkbox) = any.downcast_mut::<Checkbox>() {
                    Outcome::Checked(checkbox.toggle())
                } else if let Some(dropdown) = any.downcast_mut::<Dropdown>() {
                    if dropdown.is_open() {
                        dropdown.close_list();
                    } else {
                        dropdown.open_list();
                    }
                    Outcome::Open(dropdown.is_open())
                } else if any.downcast_mut::<Button>().is_some() {
                    Outcome::Pressed
                } else {
                    Outcome::None
                }
            }
            None => Outcome::None,
        };

        match outcome {
            Outcome::Checked(checked) => {
                if let Some(data) = self.dom.get_mut(node) {
                    data.checked = checked;
                }
            }
            Outcome::Open(open) => {
                if let Some(data) = self.dom.get_mut(node) {
                    data.open = open;
                }
            }
            Outcome::Pressed => self.press_button_node(node),
            Outcome::None => {}
        }
    }

    fn press_button_node(&mut self, node: NodeId) {
        if let Some(button) = self
            .widgets
            .get_mut(node)
            .and_then(|w| w.inner_any_mut().downcast_mut::<Button>())
        {
            button.press();
        }
    }

    fn select_dropdown_option(&mut self, node: NodeId, list: Region, point: Offset) {
        let open = match self
            .widgets
            .get_mut(node)
            .and_then(|w| w.inner_any_mut().downcast_mut::<Dropdown>())
        {
            Some(dropdown) => {
                if let Some(index) = dropdown.option_at(list, point.y) {
                    dropdown.select(index);
                } else {
                    dropdown.close_list();
                }
                dropdown.is_open()
            }
            None => return,
        };
        if let Some(data) = self.dom.get_mut(node) {
            data.open = open;
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Paint the whole surface into the compositor: background, free
    /// widgets, then every window back to front, overlays last.
    pub fn render(&mut self) {
        self.refresh();

        let screen = Region::new(
            0,
            0,
            self.compositor.width as i32,
            self.compositor.height as i32,
        );
        let surface_style = self
            .styles
            .get(&self.root)
            .map(CellStyle::from_styles)
            .unwrap_or_default();
        self.compositor.begin_frame(surface_style);

        // Free-standing widgets, then their overlays.
        let surface: Vec<(NodeId, Region)> =
            self.surface_regions.iter().map(|(&n, &r)| (n, r)).collect();
        for &(node, region) in &surface {
            self.render_node(node, region, screen);
        }
        for &(node, region) in &surface {
            self.render_dropdown_overlay(node, region, screen);
        }

        for window in self.window_stack.clone() {
            self.render_window(window, screen);
        }
    }

    fn render_window(&mut self, window: NodeId, screen: Region) {
        let Some(layout) = self.layouts.get(&window).cloned() else {
            return;
        };
        let clip = layout.frame;

        self.render_node(window, layout.frame, clip);

        if let Some(title_node) = self.child_of_type(window, "TitleBar") {
            self.render_node(title_node, layout.title_bar, clip);
        }
        if let (Some(bar_region), Some(bar_node)) =
            (layout.menu_bar, self.child_of_type(window, "MenuBar"))
        {
            self.render_node(bar_node, bar_region, clip);
            for (index, item) in self.menu_item_nodes(window).into_iter().enumerate() {
                if let Some(&region) = layout.menu_items.get(index) {
                    self.render_node(item, region, clip);
                }
            }
        }
        if let Some(content_node) = self.child_of_type(window, "Content") {
            self.render_node(content_node, layout.content, clip);
        }
        for (index, child) in self.content_child_nodes(window).into_iter().enumerate() {
            if let Some(&region) = layout.content_children.get(index) {
                self.render_node(child, region, clip);
            }
        }
        if let (Some(row_region), Some(row_node)) =
            (layout.button_row, self.child_of_type(window, "ButtonRow"))
        {
            self.render_node(row_node, row_region, clip);
            for (index, button) in self.button_nodes(window).into_iter().enumerate() {
                if let Some(&region) = layout.buttons.get(index) {
                    self.render_node(button, region, clip);
                }
            }
        }

        // Overlays clip to the screen, not the frame — they hang below it.
        if let Some(region) = self.open_submenu_overlay(window) {
            if let Some(list_node) = self.open_submenu_list_node(window) {
                self.render_node(list_node, region, screen);
            }
        }
        if let Some((dd_node, region)) = self.open_dropdown_overlay_in(window) {
            let styles = self.styles.get(&dd_node).cloned().unwrap_or_default();
            if let Some(dd) = self
                .widgets
                .get(dd_node)
                .and_then(|w| w.inner_any().downcast_ref::<Dropdown>())
            {
                let strips = dd.render_list(region, &styles);
                self.compositor.place_strips(&strips, screen);
            }
        }
    }

    fn render_dropdown_overlay(&mut self, node: NodeId, region: Region, screen: Region) {
        let styles = self.styles.get(&node).cloned().unwrap_or_default();
        if let Some(dd) = self
            .widgets
            .get(node)
            .and_then(|w| w.inner_any().downcast_ref::<Dropdown>())
        {
            if dd.is_open() {
                let strips = dd.render_list(dd.list_region(region), &styles);
                self.compositor.place_strips(&strips, screen);
            }
        }
    }

    fn render_node(&mut self, node: NodeId, region: Region, clip: Region) {
        let Some(data) = self.dom.get(node) else { return };
        if !data.visible {
            return;
        }
        let styles = self.styles.get(&node).cloned().unwrap_or_default();
        if let Some(widget) = self.widgets.get(node) {
            let strips = widget.render(region, &styles);
            self.compositor.place_strips(&strips, clip);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{Modifiers, MouseAction, MouseButton};
    use crate::widgets::list::List;
    use std::cell::Cell;

    fn desktop() -> Desktop {
        Desktop::new(80, 24, Theme::retro())
    }

    fn left_down(x: i32, y: i32) -> MouseEvent {
        MouseEvent {
            kind: MouseAction::Down(MouseButton::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    fn left_drag(x: i32, y: i32) -> MouseEvent {
        MouseEvent {
            kind: MouseAction::Drag(MouseButton::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    fn left_up(x: i32, y: i32) -> MouseEvent {
        MouseEvent {
            kind: MouseAction::Up(MouseButton::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// A 40-cell-wide notepad-ish modal with menus, content, and buttons,
    /// at the origin. Geometry with this spec: title bar y=1, menu bar y=2,
    /// content starts y=3, button row on the second-to-last frame row.
    fn notepad() -> Modal {
        Modal::new("Notepad")
            .width(40)
            .menu("File", List::new(["New", "Open"]))
            .menu("Edit", List::new(["Copy", "Paste"]))
            .child(Checkbox::new("Word wrap"))
            .button("Ok", || {})
            .button("Cancel", || {})
    }

    // ── Mounting & registration ──────────────────────────────────────

    #[test]
    fn mount_modal_registers_window() {
        let mut d = desktop();
        let w = d.mount(notepad());

        assert_eq!(d.registry.len(), 1);
        assert!(d.registry.contains_title("Notepad"));
        assert_eq!(d.window_stack(), &[w]);

        // The id was drawn at mount and stored on the instance.
        let id = d.modal_window_id(w).unwrap();
        assert_eq!(d.registry.windows()[0].id, id);
    }

    #[test]
    fn mount_does_not_claim_active_pointer() {
        let mut d = desktop();
        d.mount(notepad());
        assert!(d.registry.active_window().is_none());
        assert!(d.active_window_node().is_none());
    }

    #[test]
    fn mount_builds_part_nodes() {
        let mut d = desktop();
        let w = d.mount(notepad());
        assert!(d.child_of_type(w, "TitleBar").is_some());
        assert!(d.child_of_type(w, "MenuBar").is_some());
        assert!(d.child_of_type(w, "Content").is_some());
        assert!(d.child_of_type(w, "ButtonRow").is_some());
        assert_eq!(d.menu_item_nodes(w).len(), 2);
        assert_eq!(d.button_nodes(w).len(), 2);
        assert_eq!(d.content_child_nodes(w).len(), 1);
    }

    #[test]
    fn free_standing_widget_mounts_on_surface() {
        let mut d = desktop();
        let cb = d.mount(Checkbox::new("standalone"));
        d.refresh();
        assert!(d.surface_regions.contains_key(&cb));
        assert!(d.window_stack().is_empty());
        assert!(d.registry.is_empty());
    }

    // ── Activation ───────────────────────────────────────────────────

    #[test]
    fn press_inside_window_activates_it() {
        let mut d = desktop();
        let notepad_node = d.mount(notepad());
        let paint_node = d.mount(Modal::new("Paint").width(30).default_position(45, 0));

        d.handle_mouse(left_down(5, 3));
        let notepad_id = d.modal_window_id(notepad_node).unwrap();
        assert_eq!(d.registry.active_window(), Some(notepad_id));
        assert_eq!(d.active_window_node(), Some(notepad_node));

        // Notepad raised above Paint.
        assert_eq!(d.window_stack(), &[paint_node, notepad_node]);
        assert!(d.dom.get(notepad_node).unwrap().active);
        assert!(!d.dom.get(paint_node).unwrap().active);
    }

    #[test]
    fn activation_moves_between_windows() {
        let mut d = desktop();
        let notepad_node = d.mount(notepad());
        let paint_node = d.mount(Modal::new("Paint").width(30).default_position(45, 0));

        d.handle_mouse(left_down(5, 3)); // Notepad
        d.handle_mouse(left_down(50, 2)); // Paint

        let paint_id = d.modal_window_id(paint_node).unwrap();
        assert_eq!(d.registry.active_window(), Some(paint_id));
        assert!(!d.dom.get(notepad_node).unwrap().active);
        assert!(d.dom.get(paint_node).unwrap().active);
    }

    #[test]
    fn topmost_window_wins_overlap() {
        let mut d = desktop();
        // Two windows at the same origin: the later mount is on top.
        let below = d.mount(Modal::new("Below").width(30));
        let above = d.mount(Modal::new("Above").width(30));
        let _ = below;

        d.handle_mouse(left_down(5, 3));
        assert_eq!(d.active_window_node(), Some(above));
    }

    // ── Menu exclusivity ─────────────────────────────────────────────

    #[test]
    fn menu_opens_on_press_and_is_exclusive() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let layout = d.window_layout(w).unwrap().clone();
        let file = layout.menu_items[0];
        let edit = layout.menu_items[1];

        d.handle_mouse(left_down(file.x + 1, file.y));
        assert_eq!(d.open_menu_name(w).as_deref(), Some("File"));
        assert!(d.dom.get(d.menu_item_nodes(w)[0]).unwrap().open);

        // Opening Edit implicitly closes File — exactly one open.
        d.handle_mouse(left_down(edit.x + 1, edit.y));
        assert_eq!(d.open_menu_name(w).as_deref(), Some("Edit"));
        assert!(!d.dom.get(d.menu_item_nodes(w)[0]).unwrap().open);
        assert!(d.dom.get(d.menu_item_nodes(w)[1]).unwrap().open);
    }

    #[test]
    fn repressing_open_header_is_not_a_toggle() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let file = d.window_layout(w).unwrap().menu_items[0];

        d.handle_mouse(left_down(file.x + 1, file.y));
        d.handle_mouse(left_down(file.x + 1, file.y));
        assert_eq!(d.open_menu_name(w).as_deref(), Some("File"));
    }

    #[test]
    fn content_press_closes_menu() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let layout = d.window_layout(w).unwrap().clone();

        d.open_menu(w, "File");
        // Press in the content area but below the checkbox row.
        let content = layout.content;
        d.handle_mouse(left_down(content.x, content.bottom() - 1));
        assert!(d.open_menu_name(w).is_none());
    }

    #[test]
    fn button_row_press_closes_menu() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let layout = d.window_layout(w).unwrap().clone();

        d.open_menu(w, "Edit");
        let row = layout.button_row.unwrap();
        // A spot in the row left of both end-aligned buttons.
        d.handle_mouse(left_down(row.x, row.y));
        assert!(d.open_menu_name(w).is_none());
    }

    #[test]
    fn submenu_popup_node_visibility_follows_open_menu() {
        let mut d = desktop();
        let w = d.mount(notepad());

        let file_item = d.menu_item_nodes(w)[0];
        let popup = d.dom.children(file_item)[0];
        assert!(!d.dom.get(popup).unwrap().visible);

        d.open_menu(w, "File");
        assert!(d.dom.get(popup).unwrap().visible);

        d.close_menu(w);
        assert!(!d.dom.get(popup).unwrap().visible);
    }

    #[test]
    fn press_on_open_popup_dismisses_it() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        d.open_menu(w, "File");

        let overlay = d.open_submenu_overlay(w).unwrap();
        d.handle_mouse(left_down(overlay.x + 2, overlay.y + 1));
        assert!(d.open_menu_name(w).is_none());
    }

    // ── Close path ───────────────────────────────────────────────────

    #[test]
    fn close_affordance_raises_close_message() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let close = d.window_layout(w).unwrap().close_button;

        let out = d.handle_mouse(left_down(close.x + 1, close.y));
        assert_eq!(out.len(), 1);
        let msg = out[0].downcast_ref::<CloseWindow>().unwrap();
        assert_eq!(msg.node, w);
        // The message is raised; the entry is still present until handled.
        assert!(d.registry.contains_title("Notepad"));
    }

    #[test]
    fn help_affordance_does_nothing() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let help = d.window_layout(w).unwrap().help_button;

        let out = d.handle_mouse(left_down(help.x + 1, help.y));
        assert!(out.is_empty());
        assert!(d.registry.contains_title("Notepad"));
        assert!(d.dom.contains(w));
    }

    #[test]
    fn close_window_fires_callback_and_deregisters() {
        let mut d = desktop();
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        let w = d.mount(
            Modal::new("Paint")
                .width(30)
                .on_close(move || count_c.set(count_c.get() + 1)),
        );

        d.close_window(w);
        assert_eq!(count.get(), 1);
        assert!(!d.registry.contains_title("Paint"));
        assert!(!d.dom.contains(w));
        assert!(d.window_stack().is_empty());
        assert!(!d.lifecycle.is_mounted(w));
    }

    #[test]
    fn force_unmount_leaves_registry_entry() {
        // The documented gap: only the close path releases the entry.
        let mut d = desktop();
        let w = d.mount(Modal::new("Stale").width(30));

        d.force_unmount(w);
        assert!(!d.dom.contains(w));
        assert!(d.window_stack().is_empty());
        assert!(d.registry.contains_title("Stale"));
        assert_eq!(d.registry.len(), 1);
    }

    #[test]
    fn close_window_on_non_modal_is_noop() {
        let mut d = desktop();
        let cb = d.mount(Checkbox::new("x"));
        d.close_window(cb);
        assert!(d.dom.contains(cb));
    }

    // ── Dragging ─────────────────────────────────────────────────────

    #[test]
    fn title_bar_drag_moves_window() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let title = d.window_layout(w).unwrap().title_bar;

        d.handle_mouse(left_down(title.x + 4, title.y));
        assert!(d.drag.is_dragging());

        d.handle_mouse(left_drag(title.x + 14, title.y + 5));
        assert_eq!(d.window_position(w), Some(Offset::new(10, 5)));

        d.handle_mouse(left_up(title.x + 14, title.y + 5));
        assert!(!d.drag.is_dragging());

        // The layout follows the new origin.
        d.refresh();
        assert_eq!(d.window_layout(w).unwrap().frame.x, 10);
        assert_eq!(d.window_layout(w).unwrap().frame.y, 5);
    }

    #[test]
    fn content_press_does_not_start_drag() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let content = d.window_layout(w).unwrap().content;

        d.handle_mouse(left_down(content.x, content.y));
        assert!(!d.drag.is_dragging());

        d.handle_mouse(left_drag(content.x + 10, content.y + 3));
        assert_eq!(d.window_position(w), Some(Offset::ZERO));
    }

    // ── Content interactions ─────────────────────────────────────────

    #[test]
    fn click_toggles_checkbox_and_mirrors_flag() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.refresh();
        let region = d.window_layout(w).unwrap().content_children[0];
        let cb_node = d.content_child_nodes(w)[0];

        d.handle_mouse(left_down(region.x + 1, region.y));
        assert!(d.dom.get(cb_node).unwrap().checked);

        d.handle_mouse(left_down(region.x + 1, region.y));
        assert!(!d.dom.get(cb_node).unwrap().checked);
    }

    #[test]
    fn button_press_fires_handler() {
        let mut d = desktop();
        let count = Rc::new(Cell::new(0));
        let count_c = count.clone();
        let w = d.mount(
            Modal::new("Dialog")
                .width(40)
                .button("Ok", move || count_c.set(count_c.get() + 1)),
        );
        d.refresh();
        let ok = d.window_layout(w).unwrap().buttons[0];

        d.handle_mouse(left_down(ok.x + 2, ok.y));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dropdown_opens_selects_and_closes() {
        let mut d = desktop();
        let w = d.mount(
            Modal::new("Open file")
                .width(40)
                .child(Dropdown::with_options(["alpha", "beta", "gamma"])),
        );
        d.refresh();
        let field = d.window_layout(w).unwrap().content_children[0];
        let dd_node = d.content_child_nodes(w)[0];

        // Open.
        d.handle_mouse(left_down(field.x + 1, field.y));
        assert!(d.dom.get(dd_node).unwrap().open);

        // Select the second option from the overlay.
        let (_, list) = d.open_dropdown_overlay_in(w).unwrap();
        d.handle_mouse(left_down(list.x + 1, list.y + 1));

        let dd = d
            .widgets
            .get(dd_node)
            .unwrap()
            .inner_any()
            .downcast_ref::<Dropdown>()
            .unwrap();
        assert_eq!(dd.value(), "beta");
        assert!(!dd.is_open());
        assert!(!d.dom.get(dd_node).unwrap().open);
    }

    #[test]
    fn free_standing_checkbox_toggles() {
        let mut d = desktop();
        let cb = d.mount(Checkbox::new("standalone"));
        d.refresh();
        let region = *d.surface_regions.get(&cb).unwrap();

        d.handle_mouse(left_down(region.x + 1, region.y));
        assert!(d.dom.get(cb).unwrap().checked);
    }

    // ── Focus ────────────────────────────────────────────────────────

    #[test]
    fn focus_cycles_within_active_window() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.handle_mouse(left_down(5, 3)); // activate

        // Chain: checkbox + Ok + Cancel.
        assert_eq!(d.focus.len(), 3);
        d.focus_next();
        let first = d.focus.current_node().unwrap();
        assert!(d.dom.get(first).unwrap().focused);

        d.focus_next();
        let second = d.focus.current_node().unwrap();
        assert!(d.dom.get(second).unwrap().focused);
        assert!(!d.dom.get(first).unwrap().focused);
        let _ = w;
    }

    // ── Styling ──────────────────────────────────────────────────────

    #[test]
    fn active_window_styles_differ_from_inactive() {
        let mut d = desktop();
        let w = d.mount(notepad());
        let title_node = d.child_of_type(w, "TitleBar").unwrap();

        d.refresh();
        let inactive_bg = d.styles.get(&title_node).unwrap().background.clone();

        d.activate(w);
        d.refresh();
        let active_bg = d.styles.get(&title_node).unwrap().background.clone();

        assert_eq!(inactive_bg, Some("#7f787f".into()));
        assert_eq!(active_bg, Some("#000080".into()));
    }

    #[test]
    fn user_css_overrides_chrome() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.set_user_css("Modal { background: #123456; }").unwrap();
        d.refresh();
        assert_eq!(
            d.styles.get(&w).unwrap().background,
            Some("#123456".into())
        );
    }

    #[test]
    fn invalid_user_css_is_an_error() {
        let mut d = desktop();
        assert!(d.set_user_css("Modal { background: ").is_err());
    }

    // ── Registry effect ──────────────────────────────────────────────

    #[test]
    fn registry_changes_mark_compositor_dirty() {
        let mut d = desktop();
        d.render();
        let _ = d.compositor.finish_frame();
        d.registry_changed.set(false);
        assert!(!d.compositor.is_dirty());

        d.registry
            .set_active_window(WindowId::from_raw("0001"));
        d.absorb_registry_changes();
        assert!(d.compositor.is_dirty());
    }

    // ── Rendering smoke ──────────────────────────────────────────────

    #[test]
    fn render_paints_window_chrome() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.activate(w);
        d.render();

        // The title text lands in the title bar row.
        let row: String = (0..40)
            .map(|x| d.compositor.get_cell(x, 1).map(|c| c.ch).unwrap_or(' '))
            .collect();
        assert!(row.contains("Notepad"));
        assert!(row.contains('X'));

        // Menu headers on the next row.
        let row: String = (0..40)
            .map(|x| d.compositor.get_cell(x, 2).map(|c| c.ch).unwrap_or(' '))
            .collect();
        assert!(row.contains("File"));
        assert!(row.contains("Edit"));
    }

    #[test]
    fn render_overlays_open_submenu() {
        let mut d = desktop();
        let w = d.mount(notepad());
        d.open_menu(w, "File");
        d.render();

        let overlay = d.open_submenu_overlay(w).unwrap();
        let found = (overlay.y..overlay.bottom()).any(|y| {
            let row: String = (overlay.x..overlay.right())
                .map(|x| {
                    d.compositor
                        .get_cell(x as u16, y as u16)
                        .map(|c| c.ch)
                        .unwrap_or(' ')
                })
                .collect();
            row.contains("New")
        });
        assert!(found);
    }
}
