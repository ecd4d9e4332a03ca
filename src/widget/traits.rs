//! Widget trait: the core abstraction for all UI elements.
//!
//! Every widget knows its type name (for CSS type selectors), its default
//! CSS, the DOM node data it mounts as, and how to render itself into strips
//! within a region. The `WidgetExt` trait adds builder-style convenience for
//! attaching CSS ids and classes.

use std::any::Any;

use crate::css::styles::Styles;
use crate::dom::node::NodeData;
use crate::geometry::{Region, Size};
use crate::render::strip::Strip;

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets in tui95.
///
/// Widget is object-safe: the desktop stores `Box<dyn Widget>` per DOM node
/// and reaches concrete types through `inner_any_mut` when an interaction
/// needs widget-specific state (toggling a checkbox, opening a dropdown).
pub trait Widget {
    /// The CSS type name for this widget (e.g. "Modal", "Checkbox").
    ///
    /// Used for CSS type selectors.
    fn widget_type(&self) -> &str;

    /// Default CSS for this widget type. Returns an empty string if none.
    ///
    /// Compiled at the lowest priority, below the chrome stylesheet and any
    /// user styles.
    fn default_css(&self) -> &str {
        ""
    }

    /// The DOM node data this widget mounts as.
    ///
    /// Widgets with state flags (checked, disabled) override this so the
    /// flags are present from the first style computation.
    fn node_data(&self) -> NodeData {
        NodeData::new(self.widget_type()).focusable(self.can_focus())
    }

    /// Whether this widget can receive keyboard focus.
    fn can_focus(&self) -> bool {
        false
    }

    /// The cells this widget wants when stacked in a content region.
    fn intrinsic_size(&self) -> Size {
        Size::new(0, 1)
    }

    /// Render this widget's content into strips within the given region.
    ///
    /// `region` is in absolute screen coordinates; `styles` are the fully
    /// cascaded CSS styles for this widget's node.
    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip>;

    /// Take this widget's children for mounting. Defaults to none (leaf).
    ///
    /// Called once while the widget mounts; containers hand their children
    /// over to become DOM nodes of their own.
    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        Vec::new()
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Like [`Widget::as_any`], but wrappers delegate to the wrapped widget
    /// — so a `WidgetBuilder<Checkbox>` still downcasts to `Checkbox`.
    fn inner_any(&self) -> &dyn Any {
        self.as_any()
    }

    /// Mutable counterpart of [`Widget::inner_any`].
    fn inner_any_mut(&mut self) -> &mut dyn Any {
        self.as_any_mut()
    }
}

// ---------------------------------------------------------------------------
// WidgetExt
// ---------------------------------------------------------------------------

/// Extension trait providing builder-style convenience methods for widgets.
///
/// Automatically implemented for all types that implement `Widget`.
pub trait WidgetExt: Widget {
    /// Wrap this widget with a CSS id.
    fn with_id(self, id: &str) -> WidgetBuilder<Self>
    where
        Self: Sized,
    {
        WidgetBuilder {
            widget: self,
            id: Some(id.to_owned()),
            classes: Vec::new(),
        }
    }

    /// Wrap this widget with a single CSS class.
    fn with_class(self, class: &str) -> WidgetBuilder<Self>
    where
        Self: Sized,
    {
        WidgetBuilder {
            widget: self,
            id: None,
            classes: vec![class.to_owned()],
        }
    }
}

// Blanket implementation: every Widget gets WidgetExt for free.
impl<T: Widget> WidgetExt for T {}

// ---------------------------------------------------------------------------
// WidgetBuilder
// ---------------------------------------------------------------------------

/// A wrapper around a widget that adds id and class metadata.
///
/// Created by `WidgetExt::with_id` / `with_class`. Delegates all `Widget`
/// methods to the inner widget, augmenting only the mounted node data.
#[derive(Debug)]
pub struct WidgetBuilder<W: Widget> {
    /// The wrapped widget.
    pub widget: W,
    /// Optional CSS id.
    pub id: Option<String>,
    /// CSS classes.
    pub classes: Vec<String>,
}

impl<W: Widget> WidgetBuilder<W> {
    /// Add a CSS class (chainable).
    pub fn add_class(mut self, class: &str) -> Self {
        let class = class.to_owned();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }
}

impl<W: Widget + 'static> Widget for WidgetBuilder<W> {
    fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    fn default_css(&self) -> &str {
        self.widget.default_css()
    }

    fn node_data(&self) -> NodeData {
        let mut data = self.widget.node_data();
        if let Some(id) = &self.id {
            data = data.with_id(id.clone());
        }
        for class in &self.classes {
            data.add_class(class);
        }
        data
    }

    fn can_focus(&self) -> bool {
        self.widget.can_focus()
    }

    fn intrinsic_size(&self) -> Size {
        self.widget.intrinsic_size()
    }

    fn render(&self, region: Region, styles: &Styles) -> Vec<Strip> {
        self.widget.render(region, styles)
    }

    fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        self.widget.take_children()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn inner_any(&self) -> &dyn Any {
        self.widget.inner_any()
    }

    fn inner_any_mut(&mut self) -> &mut dyn Any {
        self.widget.inner_any_mut()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip::CellStyle;

    #[derive(Debug)]
    struct TestLabel {
        text: String,
    }

    impl TestLabel {
        fn new(text: &str) -> Self {
            Self { text: text.to_owned() }
        }
    }

    impl Widget for TestLabel {
        fn widget_type(&self) -> &str {
            "Label"
        }

        fn default_css(&self) -> &str {
            "Label { color: black; }"
        }

        fn intrinsic_size(&self) -> Size {
            Size::new(self.text.chars().count() as i32, 1)
        }

        fn render(&self, region: Region, _styles: &Styles) -> Vec<Strip> {
            if !region.size().is_drawable() {
                return Vec::new();
            }
            let mut strip = Strip::new(region.y, region.x);
            let text: String = self.text.chars().take(region.width as usize).collect();
            strip.push_str(&text, CellStyle::default());
            vec![strip]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct FocusableWidget;

    impl Widget for FocusableWidget {
        fn widget_type(&self) -> &str {
            "Button"
        }

        fn can_focus(&self) -> bool {
            true
        }

        fn render(&self, _region: Region, _styles: &Styles) -> Vec<Strip> {
            Vec::new()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    // ── Widget defaults ──────────────────────────────────────────────

    #[test]
    fn widget_type_and_css() {
        let label = TestLabel::new("hello");
        assert_eq!(label.widget_type(), "Label");
        assert_eq!(label.default_css(), "Label { color: black; }");
        assert_eq!(FocusableWidget.default_css(), "");
    }

    #[test]
    fn node_data_reflects_focusability() {
        let data = FocusableWidget.node_data();
        assert_eq!(data.widget_type, "Button");
        assert!(data.focusable);

        let data = TestLabel::new("x").node_data();
        assert!(!data.focusable);
    }

    #[test]
    fn intrinsic_size_default_and_override() {
        assert_eq!(FocusableWidget.intrinsic_size(), Size::new(0, 1));
        assert_eq!(TestLabel::new("hello").intrinsic_size(), Size::new(5, 1));
    }

    #[test]
    fn render_produces_strips() {
        let label = TestLabel::new("Hi");
        let strips = label.render(Region::new(0, 0, 10, 1), &Styles::new());
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].cells[0].ch, 'H');
    }

    #[test]
    fn render_empty_region() {
        let label = TestLabel::new("Hi");
        assert!(label.render(Region::new(0, 0, 0, 0), &Styles::new()).is_empty());
    }

    #[test]
    fn take_children_default_empty() {
        let mut label = TestLabel::new("x");
        assert!(label.take_children().is_empty());
    }

    #[test]
    fn as_any_downcast() {
        let label = TestLabel::new("test");
        assert_eq!(
            label.as_any().downcast_ref::<TestLabel>().unwrap().text,
            "test"
        );
    }

    // ── WidgetBuilder ────────────────────────────────────────────────

    #[test]
    fn builder_with_id() {
        let built = TestLabel::new("hello").with_id("greeting");
        assert_eq!(built.id, Some("greeting".to_owned()));
        assert!(built.classes.is_empty());
        assert_eq!(built.widget_type(), "Label");
    }

    #[test]
    fn builder_with_class_and_add_class() {
        let built = TestLabel::new("hello")
            .with_class("primary")
            .add_class("large")
            .add_class("primary"); // duplicate — not added
        assert_eq!(built.classes, vec!["primary", "large"]);
    }

    #[test]
    fn builder_node_data_carries_id_and_classes() {
        let built = FocusableWidget.with_id("ok-button").add_class("primary");
        let data = built.node_data();
        assert_eq!(data.id.as_deref(), Some("ok-button"));
        assert!(data.has_class("primary"));
        assert!(data.focusable); // inner widget's contribution survives
    }

    #[test]
    fn builder_delegates_render_and_size() {
        let built = TestLabel::new("AB").with_id("t");
        assert_eq!(built.intrinsic_size(), Size::new(2, 1));
        let strips = built.render(Region::new(0, 0, 10, 1), &Styles::new());
        assert_eq!(strips.len(), 1);
    }

    #[test]
    fn builder_inner_any_reaches_wrapped_widget() {
        let mut built = TestLabel::new("inner").with_id("t");
        // as_any_mut sees the builder...
        assert!(built
            .as_any_mut()
            .downcast_mut::<WidgetBuilder<TestLabel>>()
            .is_some());
        // ...inner_any_mut sees through it.
        let inner = built.inner_any_mut().downcast_mut::<TestLabel>().unwrap();
        assert_eq!(inner.text, "inner");
    }

    // ── Object safety ────────────────────────────────────────────────

    #[test]
    fn widget_is_object_safe() {
        let label: Box<dyn Widget> = Box::new(TestLabel::new("dynamic"));
        assert_eq!(label.widget_type(), "Label");

        let built: Box<dyn Widget> = Box::new(TestLabel::new("x").with_id("t"));
        assert_eq!(built.widget_type(), "Label");
    }
}
