//! Widgets shared by the menu screens

pub mod button;

pub use button::{Action, Button, DEFAULT_FONT_SIZE};
