//! Signals and effects (Leptos-style auto-tracking reactivity).
//!
//! Single-threaded, synchronous, thread-local runtime. The window registry
//! stores its observable state in signals so that interested parties — the
//! desktop's dirty-marking effect, taskbar-style listeners — re-run when
//! windows are added, removed, or activated.

pub mod signal;

pub use signal::{
    batch, create_effect, create_effect_with_id, create_signal, dispose_effect, EffectId,
    ReadSignal, SignalId, WriteSignal,
};
