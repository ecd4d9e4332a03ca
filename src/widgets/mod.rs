//! Built-in widgets: Button, Checkbox, Dropdown, Label, List, Modal.

pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod label;
pub mod list;
pub mod modal;

pub use button::Button;
pub use checkbox::Checkbox;
pub use dropdown::Dropdown;
pub use label::Label;
pub use list::List;
pub use modal::{ButtonRow, Content, MenuBar, MenuItem, Modal, TitleBar};
