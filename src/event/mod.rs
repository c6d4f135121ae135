//! Input events and key bindings for picker navigation.

pub mod binding;
pub mod input;

pub use binding::{KeyBindingRegistry, PickerAction};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseEvent};
