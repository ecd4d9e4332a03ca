//! Rendering: strips, bevel chrome, compositor, crossterm driver.

pub mod bevel;
pub mod compositor;
pub mod driver;
pub mod strip;

pub use compositor::{CellUpdate, Compositor};
pub use driver::Driver;
pub use strip::{CellStyle, Strip, StyledCell};
