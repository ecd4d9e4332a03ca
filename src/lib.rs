//! # tui95
//!
//! A CSS-styled terminal widget toolkit that recreates retro desktop chrome:
//! draggable modal windows with title bars and menu bars, checkboxes,
//! dropdowns, and beveled buttons — rendered into any terminal that speaks
//! ANSI.
//!
//! tui95 keeps a retained DOM of mounted widgets, styles it with a real CSS
//! engine (type/class/id selectors, state pseudo-classes, specificity,
//! cascade), lays out window interiors with flexbox, and paints overlapping
//! windows back-to-front through a strip compositor.
//!
//! ## Core Systems
//!
//! - **[`css`]** — CSS engine: tokenizer, parser, specificity, cascade,
//!   state-aware pseudo-class matching
//! - **[`theme`]** — retro palette tokens and the default chrome stylesheet
//! - **[`dom`]** — slotmap-backed arena of mounted widget nodes
//! - **[`layout`]** — Taffy-powered window interior and surface layout
//! - **[`widget`]** — Widget trait and mount/unmount lifecycle tracking
//! - **[`widgets`]** — Button, Checkbox, Dropdown, Label, List, Modal
//! - **[`window`]** — window registry (active-window tracking) and the drag
//!   controller
//! - **[`desktop`]** — the per-tree coordinator: window stack, mouse routing,
//!   menu exclusivity
//! - **[`event`]** — input events, message envelopes, key bindings
//! - **[`reactive`]** — signals and effects backing the registry's
//!   observable state
//! - **[`render`]** — z-layered strip compositor and crossterm driver
//! - **[`app`]** — application struct and async run loop
//! - **[`testing`]** — headless pilot and snapshot helpers

// Foundation
pub mod geometry;

// Styling
pub mod css;
pub mod theme;

// Core systems
pub mod dom;
pub mod layout;

// Widget system
pub mod widget;
pub mod widgets;

// Window management
pub mod desktop;
pub mod window;

// Events and reactivity
pub mod event;
pub mod reactive;

// Rendering
pub mod render;

// Application
pub mod app;

// Test support
pub mod testing;
