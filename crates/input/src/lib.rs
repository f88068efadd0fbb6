//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`UiCommand`]s. Which keys mean what
//! depends on the screen: the registration screen turns printable keys into
//! text, every other screen uses them as shortcuts.

pub mod map;

pub use body_quest_types as types;

pub use map::{map_key, should_quit, UiCommand};
