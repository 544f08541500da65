pub mod dial;
pub mod keymap;
pub mod progress_formatter;
pub mod terminal;
pub mod tui;
