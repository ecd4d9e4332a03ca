//! Event dispatch: message queue and bubble path computation.
//!
//! [`EventDispatcher`] maintains a queue of [`Envelope`]s. The `bubble_path`
//! static method computes the traversal order from a node up to the DOM root
//! for bubble-phase message delivery — a click on a button inside a window
//! bubbles through the content region and the modal before reaching the
//! desktop.

use std::collections::VecDeque;

use super::message::Envelope;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based event dispatcher.
///
/// Messages are enqueued via `push` and drained for processing via `drain`.
/// The dispatcher does not itself route messages — that responsibility
/// belongs to the application loop, which uses `bubble_path` and the DOM to
/// walk messages through the widget hierarchy.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    /// Enqueue a message envelope for later processing.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Drain all pending messages and return them as a `Vec`.
    ///
    /// The queue is empty after this call.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., root]`.
    /// If `start` does not exist in the DOM, returns an empty vec.
    pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(dom.ancestors(start));
        path
    }
}

// ===========================================================================
// Tests
// ===========================================================================
