//! The window registry: the shared coordinator for sibling windows.
//!
//! One registry exists per desktop tree. It owns two pieces of observable
//! state — the ordered list of registered windows and the active-window
//! pointer — both stored in signals so listeners re-run when either changes.
//! The handle is `Copy`: every modal instance carries one and talks to the
//! same underlying state. It is created with its desktop and passed
//! explicitly; there is no process-wide registry.
//!
//! Key discipline (kept intentionally asymmetric): windows are *added* keyed
//! by generated id but *removed* by title. Duplicate titles therefore
//! collide on removal — the first-added match goes. See the regression tests
//! pinning this.

use std::fmt;

use rand::Rng;
use tracing::{debug, trace};

use crate::reactive::{batch, create_signal, ReadSignal, WriteSignal};

// ---------------------------------------------------------------------------
// WindowId
// ---------------------------------------------------------------------------

/// Identifier of a registered window: four lowercase hex digits.
///
/// Drawn once when a modal mounts and stable for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(String);

impl WindowId {
    /// Wrap an existing id string. Test and interop use; normal allocation
    /// goes through [`WindowRegistry::allocate_id`].
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// WindowDescriptor
// ---------------------------------------------------------------------------

/// One registered window: id, title, optional title-bar icon.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<char>,
}

impl WindowDescriptor {
    /// Create a descriptor.
    pub fn new(id: WindowId, title: impl Into<String>, icon: Option<char>) -> Self {
        Self { id, title: title.into(), icon }
    }
}

// ---------------------------------------------------------------------------
// WindowRegistry
// ---------------------------------------------------------------------------

/// Shared handle to the per-tree window state.
///
/// Cheap to copy (it only stores signal ids); all copies observe and mutate
/// the same state. All operations are total — there are no error paths.
#[derive(Debug, Clone, Copy)]
pub struct WindowRegistry {
    windows: ReadSignal<Vec<WindowDescriptor>>,
    set_windows: WriteSignal<Vec<WindowDescriptor>>,
    active: ReadSignal<Option<WindowId>>,
    set_active: WriteSignal<Option<WindowId>>,
}

impl WindowRegistry {
    /// Create a registry with no windows and no active pointer.
    pub fn new() -> Self {
        let (windows, set_windows) = create_signal(Vec::new());
        let (active, set_active) = create_signal(None);
        Self { windows, set_windows, active, set_active }
    }

    /// Draw a fresh window id: four random hex digits, re-drawn until the id
    /// is not already registered.
    pub fn allocate_id(&self) -> WindowId {
        let mut rng = rand::rng();
        loop {
            let candidate = WindowId(format!("{:04x}", rng.random_range(0u32..0x1_0000)));
            let taken = self
                .windows
                .with(|ws| ws.iter().any(|w| w.id == candidate));
            if !taken {
                return candidate;
            }
        }
    }

    /// Register a window. Listeners re-run.
    pub fn add_window(&self, descriptor: WindowDescriptor) {
        debug!(id = %descriptor.id, title = %descriptor.title, "window registered");
        self.set_windows.update(|ws| ws.push(descriptor));
    }

    /// Remove the first-added window whose title matches. No-op when no
    /// title matches.
    ///
    /// When the removed window was the active one, the active pointer falls
    /// back to the most recently added remaining window, or clears.
    pub fn remove_window(&self, title: &str) -> Option<WindowDescriptor> {
        let position = self.windows.with(|ws| ws.iter().position(|w| w.title == title));
        let position = position?;

        let mut removed: Option<WindowDescriptor> = None;
        batch(|| {
            let mut taken = None;
            self.set_windows.update(|ws| {
                taken = Some(ws.remove(position));
            });
            let taken = taken.expect("position was validated above");

            if self.active.get_untracked().as_ref() == Some(&taken.id) {
                let fallback = self.windows.with(|ws| ws.last().map(|w| w.id.clone()));
                trace!(from = %taken.id, to = ?fallback, "active pointer reassigned");
                self.set_active.set(fallback);
            }
            removed = Some(taken);
        });

        if let Some(w) = &removed {
            debug!(id = %w.id, title = %w.title, "window deregistered");
        }
        removed
    }

    /// Point the active-window pointer at `id`, unconditionally.
    ///
    /// No validation that `id` names a registered window.
    pub fn set_active_window(&self, id: WindowId) {
        trace!(id = %id, "window activated");
        self.set_active.set(Some(id));
    }

    /// The current active-window pointer. Tracked: reading inside an effect
    /// subscribes it.
    pub fn active_window(&self) -> Option<WindowId> {
        self.active.get()
    }

    /// Whether `id` is the active window.
    pub fn is_active(&self, id: &WindowId) -> bool {
        self.active.with(|a| a.as_ref() == Some(id))
    }

    /// Snapshot of the registered windows, in registration order. Tracked.
    pub fn windows(&self) -> Vec<WindowDescriptor> {
        self.windows.get()
    }

    /// Number of registered windows.
    pub fn len(&self) -> usize {
        self.windows.with(|ws| ws.len())
    }

    /// Whether no windows are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any registered window carries this title.
    pub fn contains_title(&self, title: &str) -> bool {
        self.windows.with(|ws| ws.iter().any(|w| w.title == title))
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
