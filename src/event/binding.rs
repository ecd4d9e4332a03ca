//! Key binding registry: map key chords to app-level actions.
//!
//! Pointer interaction drives the window manager; the keyboard layer stays
//! small — quit and tab-order focus movement by default, plus user-defined
//! bindings resolved to [`Custom`](crate::event::message::Custom) messages.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// The action a key binding resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingAction {
    /// Quit the application.
    Quit,
    /// Move focus to the next focusable widget.
    FocusNext,
    /// Move focus to the previous focusable widget.
    FocusPrevious,
    /// A user-defined action, delivered as a `Custom` message.
    Custom(String),
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Maps key events to [`BindingAction`]s.
#[derive(Debug, Default)]
pub struct KeyBindingRegistry {
    bindings: HashMap<KeyEvent, BindingAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry with no bindings.
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Create a registry with the default bindings:
    ///
    /// - `Ctrl+C` → [`BindingAction::Quit`]
    /// - `Tab` → [`BindingAction::FocusNext`]
    /// - `Shift+Tab` (BackTab) → [`BindingAction::FocusPrevious`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(
            KeyEvent::new(Key::Char('c'), Modifiers::CTRL),
            BindingAction::Quit,
        );
        registry.bind(
            KeyEvent::new(Key::Tab, Modifiers::NONE),
            BindingAction::FocusNext,
        );
        registry.bind(
            KeyEvent::new(Key::BackTab, Modifiers::NONE),
            BindingAction::FocusPrevious,
        );
        registry
    }

    /// Register (or replace) a binding.
    pub fn bind(&mut self, event: KeyEvent, action: BindingAction) {
        self.bindings.insert(event, action);
    }

    /// Remove a binding. No-op if absent.
    pub fn unbind(&mut self, event: &KeyEvent) {
        self.bindings.remove(event);
    }

    /// Resolve a key event to its bound action, if any.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.bindings.get(event)
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry() {
        let registry = KeyBindingRegistry::new();
        assert!(registry.is_empty());
        assert!(registry
            .resolve(&KeyEvent::new(Key::Tab, Modifiers::NONE))
            .is_none());
    }

    #[test]
    fn defaults() {
        let registry = KeyBindingRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.resolve(&KeyEvent::new(Key::Char('c'), Modifiers::CTRL)),
            Some(&BindingAction::Quit)
        );
        assert_eq!(
            registry.resolve(&KeyEvent::new(Key::Tab, Modifiers::NONE)),
            Some(&BindingAction::FocusNext)
        );
        assert_eq!(
            registry.resolve(&KeyEvent::new(Key::BackTab, Modifiers::NONE)),
            Some(&BindingAction::FocusPrevious)
        );
    }

    #[test]
    fn unbound_key_resolves_none() {
        let registry = KeyBindingRegistry::with_defaults();
        assert!(registry
            .resolve(&KeyEvent::new(Key::Char('z'), Modifiers::NONE))
            .is_none());
        // Same key, different modifiers — still unbound.
        assert!(registry
            .resolve(&KeyEvent::new(Key::Char('c'), Modifiers::NONE))
            .is_none());
    }

    #[test]
    fn custom_binding() {
        let mut registry = KeyBindingRegistry::new();
        registry.bind(
            KeyEvent::new(Key::F(1), Modifiers::NONE),
            BindingAction::Custom("help".into()),
        );
        assert_eq!(
            registry.resolve(&KeyEvent::new(Key::F(1), Modifiers::NONE)),
            Some(&BindingAction::Custom("help".into()))
        );
    }

    #[test]
    fn rebind_replaces() {
        let mut registry = KeyBindingRegistry::with_defaults();
        registry.bind(
            KeyEvent::new(Key::Char('c'), Modifiers::CTRL),
            BindingAction::Custom("copy".into()),
        );
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.resolve(&KeyEvent::new(Key::Char('c'), Modifiers::CTRL)),
            Some(&BindingAction::Custom("copy".into()))
        );
    }

    #[test]
    fn unbind_removes() {
        let mut registry = KeyBindingRegistry::with_defaults();
        registry.unbind(&KeyEvent::new(Key::Tab, Modifiers::NONE));
        assert_eq!(registry.len(), 2);
        assert!(registry
            .resolve(&KeyEvent::new(Key::Tab, Modifiers::NONE))
            .is_none());
    }
}
