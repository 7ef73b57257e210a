use crate::game_state::ActivePiece;
use crate::pieces::{PieceShape, ShapeMatrix};
use crate::types::{Cell, PieceColor, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: PieceColor,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: PieceColor,
}

impl From<&PieceShape> for NextSnapshot {
    fn from(value: &PieceShape) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            color: value.color,
        }
    }
}

/// Render-ready copy of the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<NextSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub tick_interval_ms: u32,
    pub game_over: bool,
    pub game_id: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[false; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            level: 1,
            lines: 0,
            tick_interval_ms: 0,
            game_over: false,
            game_id: 0,
        }
    }
}
