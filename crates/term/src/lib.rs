//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a [`GameView`] draws a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] flushes that framebuffer to a crossterm backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep drawing pure so it can be asserted on cell by cell
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_lite_core as core;
pub use tetris_lite_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
