pub(crate) mod input;
pub(crate) mod keymap;
mod fill_ui;
mod options;
mod runtime;
mod status;
mod terminal;

pub use fill_ui::FillUI;
pub use input::{AppCommand, CommandDispatch, InputRouter, KeyAction};
pub use keymap::{Keymap, KeymapContext, KeymapError, default_keymap};
pub use options::UiOptions;

#[cfg(test)]
pub(crate) use runtime::App;
