//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node.
///
/// Besides the selector-addressable parts (type, id, classes), a node carries
/// the boolean state flags that pseudo-classes match against. Widgets do not
/// style themselves conditionally in code — they flip a flag here and the
/// stylesheet does the rest.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Widget type name (e.g. "Modal", "Checkbox").
    pub widget_type: String,
    /// Optional unique id (CSS #id selector).
    pub id: Option<String>,
    /// CSS classes (for .class selector).
    pub classes: Vec<String>,
    /// Whether this node is rendered at all.
    pub visible: bool,
    /// Whether this node can receive keyboard focus.
    pub focusable: bool,
    /// Whether this node is disabled (`:disabled`).
    pub disabled: bool,
    /// Whether this node is the active one of its kind (`:active`) —
    /// the active window, or a button while pressed.
    pub active: bool,
    /// Whether this node is checked (`:checked`).
    pub checked: bool,
    /// Whether this node currently holds focus (`:focus`).
    pub focused: bool,
    /// Whether this node's popup is open (`:open`) — a menu item with its
    /// submenu showing, or a dropdown with its list showing.
    pub open: bool,
}

impl NodeData {
    /// Create a new `NodeData` with the given widget type and default state.
    pub fn new(widget_type: impl Into<String>) -> Self {
        Self {
            widget_type: widget_type.into(),
            id: None,
            classes: Vec::new(),
            visible: true,
            focusable: false,
            disabled: false,
            active: false,
            checked: false,
            focused: false,
            open: false,
        }
    }

    /// Set the CSS id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set whether this node can receive focus (builder).
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Set whether this node is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether this node is checked (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}
