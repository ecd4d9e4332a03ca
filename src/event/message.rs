//! Message trait, envelope, and built-in messages.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with routing metadata (sender, target).
//! Built-ins cover the app-level requests widgets and bindings can raise:
//! [`Quit`], [`Refresh`], [`FocusNext`], [`FocusPrevious`], [`CloseWindow`],
//! and [`Custom`].

use std::any::Any;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
///
/// All messages must implement `as_any` for downcasting and `message_name`
/// for debug/logging purposes.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The node that sent this message.
    pub sender: NodeId,
    /// If `Some`, the message is targeted at a specific node.
    /// If `None`, the message bubbles up from the sender.
    pub target: Option<NodeId>,
    /// Whether this message has been handled (stops propagation).
    pub handled: bool,
}

impl Envelope {
    /// Create a new envelope that will bubble from the sender.
    pub fn new(message: impl Message, sender: NodeId) -> Self {
        Self {
            message: Box::new(message),
            sender,
            target: None,
            handled: false,
        }
    }

    /// Create a new envelope targeted at a specific node.
    pub fn targeted(message: impl Message, sender: NodeId, target: NodeId) -> Self {
        Self {
            message: Box::new(message),
            sender,
            target: Some(target),
            handled: false,
        }
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message + 'static>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Mark this envelope as handled, stopping further propagation.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .field("target", &self.target)
            .field("handled", &self.handled)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// Request application shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quit;

impl Message for Quit {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "Quit"
    }
}

/// Request a full re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh;

impl Message for Refresh {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "Refresh"
    }
}

/// Move focus to the next focusable widget in the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusNext;

impl Message for FocusNext {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "FocusNext"
    }
}

/// Move focus to the previous focusable widget in the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusPrevious;

impl Message for FocusPrevious {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "FocusPrevious"
    }
}

/// Close a window: fire its close callback and release its registry entry.
///
/// Raised when a window's close affordance is clicked; handled by the app,
/// which asks the desktop to run the close path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseWindow {
    /// The modal's root node.
    pub node: NodeId,
}

impl Message for CloseWindow {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "CloseWindow"
    }
}

/// User-defined string message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custom(pub String);

impl Custom {
    /// Create a new custom message.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Message for Custom {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "Custom"
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_id(sm: &mut SlotMap<NodeId, ()>) -> NodeId {
        sm.insert(())
    }

    #[test]
    fn message_names() {
        assert_eq!(Quit.message_name(), "Quit");
        assert_eq!(Refresh.message_name(), "Refresh");
        assert_eq!(FocusNext.message_name(), "FocusNext");
        assert_eq!(FocusPrevious.message_name(), "FocusPrevious");
        assert_eq!(Custom::new("x").message_name(), "Custom");
    }

    #[test]
    fn envelope_bubbles_by_default() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(Quit, sender);
        assert_eq!(env.sender, sender);
        assert!(env.target.is_none());
        assert!(!env.handled);
    }

    #[test]
    fn envelope_targeted() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let target = make_id(&mut sm);
        let env = Envelope::targeted(Refresh, sender, target);
        assert_eq!(env.target, Some(target));
    }

    #[test]
    fn envelope_downcast() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let node = make_id(&mut sm);
        let env = Envelope::new(CloseWindow { node }, sender);

        let msg = env.downcast_ref::<CloseWindow>().unwrap();
        assert_eq!(msg.node, node);
        assert!(env.downcast_ref::<Quit>().is_none());
    }

    #[test]
    fn envelope_mark_handled() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let mut env = Envelope::new(Quit, sender);
        env.mark_handled();
        assert!(env.handled);
    }

    #[test]
    fn envelope_debug_uses_message_name() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(Custom::new("open-file"), sender);
        let dbg = format!("{env:?}");
        assert!(dbg.contains("Custom"));
    }
}
