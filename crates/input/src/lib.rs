//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the four engine actions. Keys that map to
//! nothing are ignored by the caller. Host controls (quit, new game) are
//! reported separately so they never reach the engine.

pub mod map;

pub use tetris_lite_types as types;

pub use map::{handle_key_event, is_key_down, should_quit, should_restart};
