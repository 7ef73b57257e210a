//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (5, 0), i.e. column `BOARD_WIDTH / 2` on the top row
//!
//! # Progression
//!
//! Every cleared line is worth [`POINTS_PER_LINE`] points. The level is a pure
//! function of the score:
//!
//! | Score | Level | Tick interval |
//! |-------|-------|---------------|
//! | 0-99 | 1 | 500ms |
//! | 100-299 | 2 | 250ms |
//! | 300+ | 3 | 100ms |
//!
//! # Examples
//!
//! ```
//! use tetris_lite_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL[PieceKind::I.index()], PieceKind::I);
//! assert_eq!(GameAction::SoftDrop.delta(), Some((0, 1)));
//! assert_eq!(GameAction::Rotate.delta(), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column where every new piece spawns (top-left corner of its matrix)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8;

/// Row where every new piece spawns
pub const SPAWN_Y: i8 = 0;

/// Points awarded for each cleared line
pub const POINTS_PER_LINE: u32 = 100;

/// Score needed to reach level 2
pub const LEVEL_2_SCORE: u32 = 100;

/// Score needed to reach level 3
pub const LEVEL_3_SCORE: u32 = 300;

/// Tick interval at level 1
pub const LEVEL_1_TICK_MS: u32 = 500;

/// Tick interval at level 2
pub const LEVEL_2_TICK_MS: u32 = 250;

/// Tick interval at level 3
pub const LEVEL_3_TICK_MS: u32 = 100;

/// Largest piece matrix side (the I piece is 1x4 / 4x1)
pub const MAX_PIECE_SIDE: usize = 4;

/// Number of pieces in the fixed piece set
pub const PIECE_COUNT: usize = 5;

/// The five piece kinds, in declaration (and probability accumulation) order
///
/// - **C**: 3x2 cup, open at the bottom middle
/// - **L**: 3x2 hook
/// - **O**: 2x2 square
/// - **T**: 3x2 tee
/// - **I**: 4x1 bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    C,
    L,
    O,
    T,
    I,
}

impl PieceKind {
    /// All kinds in declaration order
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::C,
        PieceKind::L,
        PieceKind::O,
        PieceKind::T,
        PieceKind::I,
    ];

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::C => 0,
            PieceKind::L => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::I => 4,
        }
    }
}

/// Display color of a piece
///
/// Renderers decide the concrete palette; the names are the ones the pieces
/// are known by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Red,
    Brown,
    Purple,
    Yellow,
    Orange,
}

/// Game actions that can be applied to the active piece
///
/// These are the only inputs the engine recognizes. Host-level controls
/// (quit, new game) are handled outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
}

impl GameAction {
    /// Cell delta for translating actions, `None` for rotation
    pub fn delta(&self) -> Option<(i8, i8)> {
        match self {
            GameAction::MoveLeft => Some((-1, 0)),
            GameAction::MoveRight => Some((1, 0)),
            GameAction::SoftDrop => Some((0, 1)),
            GameAction::Rotate => None,
        }
    }
}

/// A cell on the game board
///
/// - `false`: Empty cell
/// - `true`: Filled cell
///
/// Locked cells carry no piece identity; they render uniformly.
pub type Cell = bool;
