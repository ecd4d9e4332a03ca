//! Widget trait and lifecycle tracking.

pub mod lifecycle;
pub mod traits;

pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use traits::{Widget, WidgetBuilder, WidgetExt};
