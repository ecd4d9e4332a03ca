//! Widget lifecycle: mount and unmount tracking.
//!
//! The `LifecycleTracker` records which nodes are currently mounted in the
//! DOM and accumulates lifecycle events that the application loop drains.
//! The window registry's acquire/release discipline hangs off these events:
//! a modal's registry entry is created when its mount event is processed,
//! and — deliberately — only the close path ever releases it.

use std::collections::HashSet;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during the widget lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A widget was mounted into the DOM.
    Mount { node_id: NodeId },
    /// A widget was unmounted from the DOM.
    Unmount { node_id: NodeId },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks mounted nodes and accumulates mount/unmount events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    /// Set of currently mounted node ids.
    mounted: HashSet<NodeId>,
    /// Pending lifecycle events, in order of occurrence.
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    /// Create a new, empty lifecycle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a node has been mounted.
    ///
    /// If the node was already mounted, this is a no-op (no duplicate event).
    pub fn on_mount(&mut self, id: NodeId) {
        if self.mounted.insert(id) {
            self.pending.push(LifecycleEvent::Mount { node_id: id });
        }
    }

    /// Record that a node has been unmounted.
    ///
    /// If the node was not mounted, this is a no-op (no spurious event).
    pub fn on_unmount(&mut self, id: NodeId) {
        if self.mounted.remove(&id) {
            self.pending.push(LifecycleEvent::Unmount { node_id: id });
        }
    }

    /// Check whether a node is currently mounted.
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.mounted.contains(&id)
    }

    /// The number of currently mounted nodes.
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain and return all pending lifecycle events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether there are any pending events.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
