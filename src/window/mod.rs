//! Window management: registry and drag controller.

pub mod drag;
pub mod registry;

pub use drag::DragController;
pub use registry::{WindowDescriptor, WindowId, WindowRegistry};
