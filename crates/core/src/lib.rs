//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on terminals, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Any host that can deliver ticks and key presses can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`game_state`]: Complete game state and the falling/locking/game-over state machine
//! - [`pieces`]: The five piece templates and matrix rotation
//! - [`rng`]: Weighted random piece generation
//! - [`scoring`]: Score, level and tick interval rules
//! - [`session`]: Tick scheduler port and the session that (re)installs it
//! - [`snapshot`]: Render-ready copy of the state
//!
//! # Game Rules
//!
//! - **Pieces**: C, L, O, T and I, each drawn with probability 0.2
//! - **Gravity**: One row per tick; a piece that cannot fall locks immediately
//! - **Rotation**: 90° clockwise, rejected on collision by default (no wall kicks)
//! - **Scoring**: 100 points per cleared line
//! - **Levels**: 1 below 100 points, 2 below 300, 3 from there on
//! - **Game over**: A freshly spawned piece collides where it appears
//!
//! # Example
//!
//! ```
//! use tetris_lite_core::{GameState, TickOutcome};
//! use tetris_lite_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! let snapshot = game.start_game();
//! assert_eq!(snapshot.score, 0);
//! assert_eq!(snapshot.level, 1);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//! assert_eq!(game.tick(), TickOutcome::Fell);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetris_lite_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{
    ActivePiece, GameEvent, GameState, LockReport, ParseRuleError, Phase, RotationMode, Rules,
    TickOutcome,
};
pub use pieces::{get_shape, PieceShape, ShapeMatrix, PIECES};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{compute_level, compute_tick_interval_ms, legacy_tick_interval_ms, SpeedCurve};
pub use session::{Session, TickScheduler};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
