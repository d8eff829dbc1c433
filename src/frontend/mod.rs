//! Window, keyboard and sound adapters around the headless game.
//!
//! - `display`: raylib drawing of the cell grid, status line and Game Over prompt
//! - `keys`: key bindings to `Command`s and prompt answers
//! - `audio`: rodio sound cues

pub mod audio;
pub mod display;
pub mod keys;
