//! Input events, message envelopes, key bindings.

pub mod binding;
pub mod handler;
pub mod input;
pub mod message;

pub use binding::{BindingAction, KeyBindingRegistry};
pub use handler::EventDispatcher;
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseButton, MouseEvent};
pub use message::{Envelope, Message};
