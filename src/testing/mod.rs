//! Test support: headless pilot and snapshot helpers.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{compositor_to_string, render_to_string, render_to_styled_string, strips_to_string};
