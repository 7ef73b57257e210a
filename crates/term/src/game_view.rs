//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: the bordered board on the left, a side panel with score, level,
//! speed and a boxed preview of the next piece on the right (only when the
//! viewport is wide enough). Locked cells are drawn in one neutral color;
//! only the falling and the next piece carry their own colors.

use crate::core::{GameSnapshot, ShapeMatrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceColor, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_SIDE};

const PLAYFIELD_BG: Rgb = Rgb::new(0, 0, 0);
const LOCKED_FG: Rgb = Rgb::new(221, 221, 221);
const GRID_FG: Rgb = Rgb::new(70, 70, 80);
const PANEL_MIN_WIDTH: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Map a piece color name to the terminal palette.
pub fn piece_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Red => Rgb::new(220, 50, 47),
        PieceColor::Brown => Rgb::new(165, 105, 60),
        PieceColor::Purple => Rgb::new(150, 80, 200),
        PieceColor::Yellow => Rgb::new(240, 220, 60),
        PieceColor::Orange => Rgb::new(255, 165, 0),
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Width and height of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = 0;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PLAYFIELD_BG);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked and empty board cells.
        let origin = (start_x + 1, start_y + 1);
        let locked = CellStyle::new(LOCKED_FG, PLAYFIELD_BG);
        let empty = CellStyle::new(GRID_FG, PLAYFIELD_BG).dim();
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                if snap.board[y as usize][x as usize] {
                    self.fill_cell(fb, origin, x, y, '█', locked);
                } else {
                    self.fill_cell(fb, origin, x, y, '·', empty);
                }
            }
        }

        // Active piece (cells above the board are not drawn).
        if let Some(active) = snap.active {
            let style = CellStyle::new(piece_rgb(active.color), PLAYFIELD_BG).bold();
            for (dx, dy) in active.matrix.filled_cells() {
                let x = active.x as i16 + dx as i16;
                let y = active.y as i16 + dy as i16;
                if x >= 0 && x < BOARD_WIDTH as i16 && y >= 0 && y < BOARD_HEIGHT as i16 {
                    self.fill_cell(fb, origin, x as u16, y as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            self.draw_game_over(fb, snap, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin.0 + cell_x * self.cell_w;
        let py = origin.1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.tick_interval_ms, value);
        let digits = digit_count(snap.tick_interval_ms);
        fb.put_str(panel_x + digits, y + 1, "ms", value.dim());
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let box_w = (MAX_PIECE_SIDE as u16) * self.cell_w + 2;
        let box_h = (MAX_PIECE_SIDE as u16) * self.cell_h + 2;
        draw_border(fb, panel_x, y, box_w, box_h, value.dim());
        if let Some(next) = snap.next {
            let style = CellStyle::new(piece_rgb(next.color), Rgb::new(0, 0, 0)).bold();
            self.draw_preview(fb, &next.matrix, (panel_x + 1, y + 1), style);
        }
        y = y.saturating_add(box_h + 1);

        let hint = CellStyle::default().dim();
        fb.put_str(panel_x, y, "WASD/arrows", hint);
        fb.put_str(panel_x, y + 1, "N new  Q quit", hint);
    }

    /// Draw a matrix centered in a `MAX_PIECE_SIDE` square.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        matrix: &ShapeMatrix,
        origin: (u16, u16),
        style: CellStyle,
    ) {
        let side = MAX_PIECE_SIDE as u16;
        let off_x = (side - matrix.cols() as u16) * self.cell_w / 2;
        let off_y = (side - matrix.rows() as u16) * self.cell_h / 2;
        for (dx, dy) in matrix.filled_cells() {
            let px = origin.0 + off_x + (dx as u16) * self.cell_w;
            let py = origin.1 + off_y + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);

        let title = "GAME OVER";
        let x = start_x + frame_w.saturating_sub(title.len() as u16) / 2;
        fb.put_str(x, mid_y.saturating_sub(1), title, style);

        let score_w = 6 + digit_count(snap.score);
        let x = start_x + frame_w.saturating_sub(score_w) / 2;
        fb.put_str(x, mid_y + 1, "SCORE ", style);
        fb.put_u32(x + 6, mid_y + 1, snap.score, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(4_294_967_295), 10);
    }

    #[test]
    fn frame_size_scales_with_cell_size() {
        assert_eq!(GameView::default().frame_size(), (22, 22));
        assert_eq!(GameView::new(3, 1).frame_size(), (32, 22));
        // Zero-sized cells are clamped.
        assert_eq!(GameView::new(0, 0).frame_size(), (12, 22));
    }

    #[test]
    fn palette_is_distinct_per_color() {
        let colors = [
            PieceColor::Red,
            PieceColor::Brown,
            PieceColor::Purple,
            PieceColor::Yellow,
            PieceColor::Orange,
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(piece_rgb(*a), piece_rgb(*b));
            }
        }
    }
}
