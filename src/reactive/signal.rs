//! Signal<T>, create_signal(), and effects for reactive state.
//!
//! Fine-grained reactive primitives: signals store values, effects auto-track
//! reads and re-run when a tracked signal changes. Single-threaded and
//! synchronous — the runtime lives in a thread-local, matching the
//! cooperative event-loop model of the rest of the toolkit.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

// ---------------------------------------------------------------------------
// IDs
// ---------------------------------------------------------------------------

/// Identifies a signal slot inside the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalId(usize);

/// Identifies an effect slot inside the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(usize);

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

struct SignalState {
    value: Box<dyn Any>,
    subscribers: HashSet<EffectId>,
}

struct EffectState {
    /// The effect closure. Wrapped in `Option` so it can be taken out while
    /// running (avoids holding a `RefMut` on the runtime across the user
    /// callback).
    callback: Option<Box<dyn FnMut()>>,
    dependencies: HashSet<SignalId>,
    active: bool,
}

struct Runtime {
    signals: Vec<SignalState>,
    effects: Vec<EffectState>,
    /// The effect currently executing (for auto-tracking).
    tracking: Option<EffectId>,
    /// When > 0 we are inside a `batch()` call — effects are deferred.
    batch_depth: usize,
    /// Effects queued to re-run once the outermost batch (or the current
    /// notification loop) finishes.
    pending_effects: Vec<EffectId>,
    /// Guard against re-entrant notification (effect -> set -> effect -> ...).
    running_effects: bool,
}

impl Runtime {
    fn new() -> Self {
        Self {
            signals: Vec::new(),
            effects: Vec::new(),
            tracking: None,
            batch_depth: 0,
            pending_effects: Vec::new(),
            running_effects: false,
        }
    }
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

// ---------------------------------------------------------------------------
// Signal creation
// ---------------------------------------------------------------------------

/// Create a reactive signal with the given initial value.
///
/// Returns a `(ReadSignal<T>, WriteSignal<T>)` pair. Reading inside an effect
/// automatically subscribes that effect to changes.
pub fn create_signal<T: 'static>(initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let id = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        let id = SignalId(rt.signals.len());
        rt.signals.push(SignalState {
            value: Box::new(initial),
            subscribers: HashSet::new(),
        });
        id
    });

    (
        ReadSignal { id, _marker: PhantomData },
        WriteSignal { id, _marker: PhantomData },
    )
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read-half of a signal. `Copy` — only stores an id.
pub struct ReadSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

// Manual impls so we don't require T: Copy/Clone for the signal itself.
impl<T: 'static> Copy for ReadSignal<T> {}
impl<T: 'static> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSignal").field("id", &self.id.0).finish()
    }
}

impl<T: 'static> ReadSignal<T> {
    /// Read the current value, subscribing the running effect (if any).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(|v| v.clone())
    }

    /// Read by reference without cloning. Still subscribes the running effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        RUNTIME.with(|rt| {
            // -- track dependency --
            {
                let mut rt_ref = rt.borrow_mut();
                if let Some(eid) = rt_ref.tracking {
                    rt_ref.signals[self.id.0].subscribers.insert(eid);
                    rt_ref.effects[eid.0].dependencies.insert(self.id);
                }
            }
            // -- read value (immutable borrow is fine now) --
            let rt_ref = rt.borrow();
            let any_ref = &rt_ref.signals[self.id.0].value;
            f(any_ref.downcast_ref::<T>().expect("signal type mismatch"))
        })
    }

    /// Read without tracking — will not subscribe any running effect.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        RUNTIME.with(|rt| {
            let rt_ref = rt.borrow();
            let any_ref = &rt_ref.signals[self.id.0].value;
            any_ref
                .downcast_ref::<T>()
                .expect("signal type mismatch")
                .clone()
        })
    }
}

// ---------------------------------------------------------------------------
// WriteSignal
// ---------------------------------------------------------------------------

/// Write-half of a signal. `Copy` — only stores an id.
pub struct WriteSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for WriteSignal<T> {}
impl<T: 'static> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for WriteSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSignal").field("id", &self.id.0).finish()
    }
}

impl<T: 'static> WriteSignal<T> {
    /// Overwrite the signal value and notify subscribers.
    pub fn set(&self, value: T) {
        let subs = RUNTIME.with(|rt| {
            let mut rt_ref = rt.borrow_mut();
            rt_ref.signals[self.id.0].value = Box::new(value);
            rt_ref.signals[self.id.0]
                .subscribers
                .iter()
                .copied()
                .collect::<Vec<_>>()
        });
        notify_subscribers(subs);
    }

    /// Mutate the value in-place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let subs = RUNTIME.with(|rt| {
            let mut rt_ref = rt.borrow_mut();
            let any_mut = &mut rt_ref.signals[self.id.0].value;
            let val = any_mut.downcast_mut::<T>().expect("signal type mismatch");
            f(val);
            rt_ref.signals[self.id.0]
                .subscribers
                .iter()
                .copied()
                .collect::<Vec<_>>()
        });
        notify_subscribers(subs);
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Create a side-effect that auto-tracks signal reads.
///
/// The closure runs immediately once (establishing initial subscriptions),
/// then re-runs whenever any tracked signal changes.
pub fn create_effect(f: impl FnMut() + 'static) {
    let _ = create_effect_with_id(f);
}

/// Create an effect and return its [`EffectId`] so it can later be disposed.
pub fn create_effect_with_id(f: impl FnMut() + 'static) -> EffectId {
    let eid = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        let eid = EffectId(rt_ref.effects.len());
        rt_ref.effects.push(EffectState {
            callback: Some(Box::new(f)),
            dependencies: HashSet::new(),
            active: true,
        });
        eid
    });
    run_effect(eid);
    eid
}

/// Deactivate an effect so it no longer re-runs when its dependencies change.
pub fn dispose_effect(eid: EffectId) {
    RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        if eid.0 < rt_ref.effects.len() {
            rt_ref.effects[eid.0].active = false;
            let deps: Vec<SignalId> = rt_ref.effects[eid.0].dependencies.drain().collect();
            for sid in deps {
                rt_ref.signals[sid.0].subscribers.remove(&eid);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Batch multiple signal writes so that effects run only once.
///
/// ```ignore
/// batch(|| {
///     set_windows(list);
///     set_active(Some(id));
/// });
/// // Effects that depend on either signal run once here.
/// ```
pub fn batch(f: impl FnOnce()) {
    RUNTIME.with(|rt| {
        rt.borrow_mut().batch_depth += 1;
    });

    f();

    let pending = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        rt_ref.batch_depth -= 1;
        if rt_ref.batch_depth == 0 {
            // Deduplicate while preserving order.
            let mut seen = HashSet::new();
            rt_ref
                .pending_effects
                .drain(..)
                .filter(|id| seen.insert(*id))
                .collect()
        } else {
            Vec::new()
        }
    });

    for eid in pending {
        run_effect(eid);
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Run a single effect: clear old deps, set tracking, execute callback.
fn run_effect(eid: EffectId) {
    // Check the effect is still active; take the callback out.
    let maybe_cb = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        if eid.0 >= rt_ref.effects.len() || !rt_ref.effects[eid.0].active {
            return None;
        }
        // Clear old dependency edges so conditional reads re-track.
        let old_deps: Vec<SignalId> = rt_ref.effects[eid.0].dependencies.drain().collect();
        for sid in old_deps {
            rt_ref.signals[sid.0].subscribers.remove(&eid);
        }
        rt_ref.effects[eid.0].callback.take()
    });

    let Some(mut cb) = maybe_cb else {
        return;
    };

    let prev_tracking = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        let prev = rt_ref.tracking.take();
        rt_ref.tracking = Some(eid);
        prev
    });

    // Run the user callback — signal reads will subscribe us.
    cb();

    RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        rt_ref.tracking = prev_tracking;
        if eid.0 < rt_ref.effects.len() && rt_ref.effects[eid.0].active {
            rt_ref.effects[eid.0].callback = Some(cb);
        }
    });
}

/// Notify a list of subscriber effects that a signal changed.
fn notify_subscribers(subs: Vec<EffectId>) {
    if subs.is_empty() {
        return;
    }

    let defer = RUNTIME.with(|rt| {
        let rt_ref = rt.borrow();
        rt_ref.batch_depth > 0 || rt_ref.running_effects
    });

    if defer {
        // Inside a batch or already inside the notification loop — queue.
        RUNTIME.with(|rt| {
            rt.borrow_mut().pending_effects.extend(subs);
        });
        return;
    }

    RUNTIME.with(|rt| {
        rt.borrow_mut().running_effects = true;
    });

    let mut queue: Vec<EffectId> = subs;
    while !queue.is_empty() {
        let current_batch = std::mem::take(&mut queue);
        for eid in current_batch {
            let active = RUNTIME.with(|rt| {
                let rt_ref = rt.borrow();
                eid.0 < rt_ref.effects.len() && rt_ref.effects[eid.0].active
            });
            if active {
                run_effect(eid);
            }
        }
        // Effects may have queued more work via nested sets.
        RUNTIME.with(|rt| {
            let mut rt_ref = rt.borrow_mut();
            queue.append(&mut rt_ref.pending_effects);
        });
    }

    RUNTIME.with(|rt| {
        rt.borrow_mut().running_effects = false;
    });
}

// ---------------------------------------------------------------------------
// Test helper: reset the thread-local runtime between tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn reset_runtime() {
    RUNTIME.with(|rt| {
        *rt.borrow_mut() = Runtime::new();
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
