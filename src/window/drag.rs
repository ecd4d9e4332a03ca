//! Drag controller: pointer-tracking for title-bar drags.
//!
//! The desktop delegates the whole gesture here: it reports button-down on a
//! drag handle, pointer movement, and button-up; the controller owns the
//! grab-offset math and answers with new window origins. Windows only ever
//! declare their handle region and starting position.

use crate::dom::node::NodeId;
use crate::geometry::Offset;

/// State of one in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    /// The window (modal root node) being dragged.
    window: NodeId,
    /// Pointer position relative to the window origin at grab time. Kept
    /// constant for the whole gesture so the window doesn't jump under the
    /// cursor.
    grab: Offset,
}

/// Tracks at most one drag gesture at a time.
#[derive(Debug, Default)]
pub struct DragController {
    state: Option<DragState>,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `window`. `pointer` is the press position and
    /// `origin` the window's current top-left corner.
    ///
    /// A new gesture replaces any stale one (a missed button-up).
    pub fn begin(&mut self, window: NodeId, pointer: Offset, origin: Offset) {
        self.state = Some(DragState { window, grab: pointer - origin });
    }

    /// Feed a pointer movement. Returns the dragged window and its new
    /// origin, or `None` when no drag is in flight.
    pub fn update(&mut self, pointer: Offset) -> Option<(NodeId, Offset)> {
        let state = self.state?;
        Some((state.window, pointer - state.grab))
    }

    /// End the gesture. Returns the window that was being dragged, if any.
    pub fn end(&mut self) -> Option<NodeId> {
        self.state.take().map(|s| s.window)
    }

    /// Whether a drag is in flight.
    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// The window currently being dragged, if any.
    pub fn dragging_window(&self) -> Option<NodeId> {
        self.state.map(|s| s.window)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
