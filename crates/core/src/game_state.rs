//! Game state module - manages the complete game state
//!
//! This module ties together the board, the piece set, the generator and the
//! score/level rules. It owns the falling/locking/game-over state machine and
//! is the only place game state is mutated.
//!
//! One call to [`GameState::tick`] is one gravity step: the active piece either
//! falls one row, or locks, clears lines and hands over to the next piece.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};

use crate::board::Board;
use crate::pieces::{get_shape, PieceShape, ShapeMatrix};
use crate::rng::PieceGenerator;
use crate::scoring::{compute_level, line_clear_points, SpeedCurve};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// Active falling piece
///
/// Holds its own copy of the matrix; rotating it never touches the template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: PieceColor,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece from a template at the spawn position
    pub fn spawn(shape: &PieceShape) -> Self {
        Self {
            kind: shape.kind,
            matrix: shape.matrix,
            color: shape.color,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Create a piece of the given kind at the spawn position
    pub fn of_kind(kind: PieceKind) -> Self {
        Self::spawn(get_shape(kind))
    }

    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }
}

/// What `rotate_piece` does when the rotated matrix would collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Reject the rotation (no wall kicks)
    #[default]
    Checked,
    /// Always rotate, even into walls or filled cells
    Unchecked,
}

/// A rule name that is not one of the accepted values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRuleError {
    rule: &'static str,
    value: String,
}

impl ParseRuleError {
    pub(crate) fn new(rule: &'static str, value: &str) -> Self {
        Self {
            rule,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.rule, self.value)
    }
}

impl std::error::Error for ParseRuleError {}

/// Parses "checked" / "unchecked", case-insensitive
impl FromStr for RotationMode {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checked" => Ok(RotationMode::Checked),
            "unchecked" => Ok(RotationMode::Unchecked),
            _ => Err(ParseRuleError::new("rotation mode", s)),
        }
    }
}

impl RotationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::Checked => "checked",
            RotationMode::Unchecked => "unchecked",
        }
    }
}

/// Rule switches for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub rotation: RotationMode,
    pub speed_curve: SpeedCurve,
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game started yet
    Idle,
    /// Active piece descending
    Falling,
    /// Terminal until the next `start_game`
    GameOver,
}

/// Result of a piece lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub lines_cleared: u32,
    pub score: u32,
    pub level: u32,
    pub level_changed: bool,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not falling (idle or game over); nothing happened
    Ignored,
    /// Active piece moved down one row
    Fell,
    /// Active piece locked and the next piece took over
    Locked(LockReport),
    /// The piece that took over collided at spawn
    GameOver { final_score: u32 },
}

impl TickOutcome {
    /// The terminal event, if this tick ended the game
    pub fn game_over(&self) -> Option<GameEvent> {
        match *self {
            TickOutcome::GameOver { final_score } => Some(GameEvent::GameOver { final_score }),
            _ => None,
        }
    }
}

/// Notification for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The game ended; present the final score to the player
    GameOver { final_score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    generator: PieceGenerator,
    rules: Rules,
    phase: Phase,
    score: u32,
    level: u32,
    /// Monotonic game counter (increments on every `start_game`).
    game_id: u32,
    /// Number of pieces locked in the current game.
    pieces_locked: u32,
    lines: u32,
}

impl GameState {
    /// Create a new idle game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    /// Create a new idle game with explicit rules
    pub fn with_rules(seed: u32, rules: Rules) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            generator: PieceGenerator::new(seed),
            rules,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            game_id: 0,
            pieces_locked: 0,
            lines: 0,
        }
    }

    /// Reset board, score and level, spawn the active and next pieces
    ///
    /// Can be called at any time; an ongoing game is discarded.
    pub fn start_game(&mut self) -> GameSnapshot {
        self.board.clear();
        self.score = 0;
        self.level = compute_level(self.score);
        self.lines = 0;
        self.pieces_locked = 0;
        self.game_id = self.game_id.wrapping_add(1);

        let first = self.generate_piece();
        let second = self.generate_piece();
        self.active = Some(ActivePiece::spawn(first));
        self.next = Some(second.kind);
        self.phase = Phase::Falling;

        info!(
            "game {} started: active={:?} next={:?} interval={}ms",
            self.game_id,
            first.kind,
            second.kind,
            self.tick_interval_ms()
        );

        self.snapshot()
    }

    /// Draw a piece template from the weighted generator
    pub fn generate_piece(&mut self) -> &'static PieceShape {
        self.generator.generate()
    }

    /// Whether `piece`'s matrix would collide with its top-left corner at (x, y)
    pub fn check_collision(&self, piece: &ActivePiece, x: i8, y: i8) -> bool {
        self.board.collides(&piece.matrix, x, y)
    }

    /// Mark the piece's cells filled with its top-left corner at (x, y)
    ///
    /// The position must already be collision-free.
    pub fn lock_piece(&mut self, piece: &ActivePiece, x: i8, y: i8) {
        if !self.board.lock_piece(&piece.matrix, x, y) {
            debug!("{:?} locked partly outside the board at ({}, {})", piece.kind, x, y);
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
    }

    /// Remove full rows, add their points and recompute the level
    ///
    /// Returns the number of rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared > 0 {
            self.lines += cleared;
            self.score = self.score.saturating_add(line_clear_points(cleared));
            let level = compute_level(self.score);
            if level != self.level {
                info!(
                    "level {} -> {} (score {}, interval {}ms)",
                    self.level,
                    level,
                    self.score,
                    self.rules.speed_curve.interval_ms(level)
                );
            }
            self.level = level;
        }
        cleared
    }

    /// Advance one gravity step
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Falling {
            return TickOutcome::Ignored;
        }
        let Some(active) = self.active else {
            return TickOutcome::Ignored;
        };

        if !self.check_collision(&active, active.x, active.y + 1) {
            self.active = Some(active.at(active.x, active.y + 1));
            return TickOutcome::Fell;
        }

        // Locking: place, resolve lines, promote next.
        let level_before = self.level;
        self.lock_piece(&active, active.x, active.y);
        let lines_cleared = self.clear_lines();

        let promoted = self.next.map(get_shape).unwrap_or_else(|| self.generate_piece());
        let upcoming = self.generate_piece();
        let spawned = ActivePiece::spawn(promoted);
        self.active = Some(spawned);
        self.next = Some(upcoming.kind);

        debug!(
            "locked {:?} at ({}, {}), cleared {}, next {:?}",
            active.kind, active.x, active.y, lines_cleared, upcoming.kind
        );

        if self.check_collision(&spawned, spawned.x, spawned.y) {
            self.phase = Phase::GameOver;
            info!(
                "game {} over: score={} lines={} pieces={}",
                self.game_id, self.score, self.lines, self.pieces_locked
            );
            return TickOutcome::GameOver {
                final_score: self.score,
            };
        }

        TickOutcome::Locked(LockReport {
            lines_cleared,
            score: self.score,
            level: self.level,
            level_changed: self.level != level_before,
        })
    }

    /// Translate the active piece by whole cells if the destination is free
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let x = active.x.saturating_add(dx);
        let y = active.y.saturating_add(dy);
        if self.check_collision(&active, x, y) {
            return false;
        }
        self.active = Some(active.at(x, y));
        true
    }

    /// Rotate the active piece 90° clockwise
    ///
    /// Under [`RotationMode::Unchecked`] this always succeeds, even if the
    /// rotated matrix overlaps a wall or filled cells. Under
    /// [`RotationMode::Checked`] a colliding rotation is rejected and the piece
    /// is left as it was. Returns whether the matrix changed.
    pub fn rotate_piece(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            matrix: active.matrix.rotated(),
            ..active
        };

        if self.rules.rotation == RotationMode::Checked
            && self.check_collision(&rotated, rotated.x, rotated.y)
        {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Apply an input action to the active piece
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action.delta() {
            Some((dx, dy)) => self.move_piece(dx, dy),
            None => self.rotate_piece(),
        }
    }

    /// Current tick interval under the active speed curve
    pub fn tick_interval_ms(&self) -> u32 {
        self.rules.speed_curve.interval_ms(self.level)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> Option<&'static PieceShape> {
        self.next.map(get_shape)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up scenarios
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (scenario setup)
    #[doc(hidden)]
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    /// Replace the next piece (scenario setup)
    #[doc(hidden)]
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = Some(kind);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(|kind| NextSnapshot::from(get_shape(kind)));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.tick_interval_ms = self.tick_interval_ms();
        out.game_over = self.game_over();
        out.game_id = self.game_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32, rules: Rules) -> GameState {
        let mut gs = GameState::with_rules(seed, rules);
        gs.start_game();
        gs
    }

    #[test]
    fn rotation_mode_parses_case_insensitively() {
        assert_eq!("Unchecked".parse::<RotationMode>(), Ok(RotationMode::Unchecked));
        assert_eq!(" checked".parse::<RotationMode>(), Ok(RotationMode::Checked));

        let err = "kick".parse::<RotationMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown rotation mode \"kick\"");
    }

    #[test]
    fn test_new_game_is_idle_and_ignores_input() {
        let mut gs = GameState::new(1);
        assert_eq!(gs.phase(), Phase::Idle);
        assert!(gs.active().is_none());
        assert_eq!(gs.tick(), TickOutcome::Ignored);
        assert!(!gs.move_piece(1, 0));
        assert!(!gs.rotate_piece());
    }

    #[test]
    fn test_start_game_resets_state() {
        let mut gs = started(3, Rules::default());
        gs.board_mut().fill_row(19);
        gs.score = 400;
        gs.level = 3;

        let snap = gs.start_game();
        assert_eq!(gs.board().filled_count(), 0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.tick_interval_ms, 500);
        assert!(snap.active.is_some());
        assert!(snap.next.is_some());
        assert_eq!(gs.phase(), Phase::Falling);
        assert_eq!(gs.game_id(), 2);
    }

    #[test]
    fn test_spawn_position_is_centered_top() {
        let gs = started(5, Rules::default());
        let active = gs.active().unwrap();
        assert_eq!((active.x, active.y), (5, 0));
    }

    #[test]
    fn test_tick_falls_one_row() {
        let mut gs = started(5, Rules::default());
        let before = gs.active().unwrap();
        assert_eq!(gs.tick(), TickOutcome::Fell);
        let after = gs.active().unwrap();
        assert_eq!((after.x, after.y), (before.x, before.y + 1));
    }

    #[test]
    fn test_piece_locks_on_floor_and_next_is_promoted() {
        let mut gs = started(5, Rules::default());
        gs.set_active(ActivePiece::of_kind(PieceKind::O).at(0, 18));
        gs.set_next(PieceKind::I);

        let outcome = gs.tick();
        assert!(matches!(outcome, TickOutcome::Locked(r) if r.lines_cleared == 0));

        assert!(gs.board().is_occupied(0, 18));
        assert!(gs.board().is_occupied(1, 19));
        let active = gs.active().unwrap();
        assert_eq!(active.kind, PieceKind::I);
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert!(gs.next().is_some());
        assert_eq!(gs.pieces_locked(), 1);
    }

    #[test]
    fn test_lock_that_completes_a_row_scores_100() {
        let mut gs = started(5, Rules::default());
        // Bottom row full except columns 6..=9, where an I piece lands.
        for x in 0..6 {
            gs.board_mut().set(x, 19, true);
        }
        gs.set_active(ActivePiece::of_kind(PieceKind::I).at(6, 19));

        match gs.tick() {
            TickOutcome::Locked(report) => {
                assert_eq!(report.lines_cleared, 1);
                assert_eq!(report.score, 100);
                assert_eq!(report.level, 2);
                assert!(report.level_changed);
            }
            other => panic!("expected lock, got {:?}", other),
        }
        assert_eq!(gs.board().filled_count(), 0);
        assert_eq!(gs.tick_interval_ms(), 250);
    }

    #[test]
    fn test_multi_line_clear() {
        let mut gs = started(5, Rules::default());
        // Rows 16..=19 full except column 0; a vertical I fills the gap.
        for y in 16..20 {
            for x in 1..10 {
                gs.board_mut().set(x, y, true);
            }
        }
        gs.board_mut().set(3, 15, true);
        let vertical_i = ActivePiece {
            matrix: get_shape(PieceKind::I).matrix.rotated(),
            ..ActivePiece::of_kind(PieceKind::I)
        };
        gs.set_active(vertical_i.at(0, 16));

        match gs.tick() {
            TickOutcome::Locked(report) => {
                assert_eq!(report.lines_cleared, 4);
                assert_eq!(report.score, 400);
                assert_eq!(report.level, 3);
            }
            other => panic!("expected lock, got {:?}", other),
        }
        // The lone cell above the cleared block drops by four rows.
        assert_eq!(gs.board().filled_count(), 1);
        assert!(gs.board().is_occupied(3, 19));
    }

    #[test]
    fn test_spawn_collision_ends_game_with_score() {
        let mut gs = started(5, Rules::default());
        gs.score = 200;
        gs.level = compute_level(200);
        // Top rows filled except the far left column so nothing clears.
        for y in 0..2 {
            for x in 1..10 {
                gs.board_mut().set(x, y, true);
            }
        }
        gs.set_active(ActivePiece::of_kind(PieceKind::O).at(0, 18));

        assert_eq!(gs.tick(), TickOutcome::GameOver { final_score: 200 });
        assert!(gs.game_over());
        assert_eq!(gs.tick(), TickOutcome::Ignored);
        assert!(!gs.move_piece(-1, 0));
        assert!(!gs.rotate_piece());
    }

    #[test]
    fn test_move_blocked_by_wall_leaves_state_unchanged() {
        let mut gs = started(5, Rules::default());
        gs.set_active(ActivePiece::of_kind(PieceKind::O).at(0, 5));
        assert!(!gs.move_piece(-1, 0));
        assert_eq!(gs.active().unwrap().x, 0);
        assert!(gs.move_piece(1, 0));
        assert_eq!(gs.active().unwrap().x, 1);
    }

    #[test]
    fn test_move_blocked_by_filled_cell() {
        let mut gs = started(5, Rules::default());
        gs.set_active(ActivePiece::of_kind(PieceKind::O).at(4, 5));
        gs.board_mut().set(4, 7, true);
        assert!(!gs.move_piece(0, 1));
        assert_eq!(gs.active().unwrap().y, 5);
    }

    #[test]
    fn test_checked_rotation_rejected_at_wall() {
        let mut gs = started(5, Rules::default());
        // Vertical I at the right wall: rotating back to horizontal overflows.
        let vertical_i = ActivePiece {
            matrix: get_shape(PieceKind::I).matrix.rotated(),
            ..ActivePiece::of_kind(PieceKind::I)
        };
        gs.set_active(vertical_i.at(9, 5));

        assert!(!gs.rotate_piece());
        assert_eq!(gs.active().unwrap().matrix, vertical_i.matrix);
    }

    #[test]
    fn test_unchecked_rotation_passes_through_wall() {
        let rules = Rules {
            rotation: RotationMode::Unchecked,
            ..Rules::default()
        };
        let mut gs = started(5, rules);
        let vertical_i = ActivePiece {
            matrix: get_shape(PieceKind::I).matrix.rotated(),
            ..ActivePiece::of_kind(PieceKind::I)
        };
        gs.set_active(vertical_i.at(9, 5));

        assert!(gs.rotate_piece());
        let active = gs.active().unwrap();
        assert_eq!(active.matrix.cols(), 4);
        assert!(gs.check_collision(&active, active.x, active.y));
    }

    #[test]
    fn test_rotation_never_mutates_template() {
        let mut gs = started(5, Rules::default());
        gs.set_active(ActivePiece::of_kind(PieceKind::L).at(3, 5));
        assert!(gs.rotate_piece());
        assert_eq!(
            get_shape(PieceKind::L).matrix,
            ShapeMatrix::new([[1, 1, 1], [1, 0, 0]])
        );
    }

    #[test]
    fn test_apply_action_routes_to_moves_and_rotation() {
        let mut gs = started(5, Rules::default());
        gs.set_active(ActivePiece::of_kind(PieceKind::T).at(4, 5));

        assert!(gs.apply_action(GameAction::MoveLeft));
        assert!(gs.apply_action(GameAction::MoveRight));
        assert!(gs.apply_action(GameAction::SoftDrop));
        let active = gs.active().unwrap();
        assert_eq!((active.x, active.y), (4, 6));

        assert!(gs.apply_action(GameAction::Rotate));
        assert_eq!(gs.active().unwrap().matrix.rows(), 3);
    }

    #[test]
    fn test_legacy_speed_curve_stays_at_500() {
        let rules = Rules {
            speed_curve: SpeedCurve::Legacy,
            ..Rules::default()
        };
        let mut gs = started(5, rules);
        gs.score = 300;
        gs.level = compute_level(gs.score);
        assert_eq!(gs.level(), 3);
        assert_eq!(gs.tick_interval_ms(), 500);
    }

    #[test]
    fn test_outcome_game_over_event() {
        let outcome = TickOutcome::GameOver { final_score: 700 };
        assert_eq!(
            outcome.game_over(),
            Some(GameEvent::GameOver { final_score: 700 })
        );
        assert_eq!(TickOutcome::Fell.game_over(), None);
    }
}
