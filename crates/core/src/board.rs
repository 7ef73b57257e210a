//! Board module - the 10x20 field of locked cells
//!
//! Cells are plain booleans in one row-major array; the board never
//! allocates. `x` grows to the right (0..=9), `y` grows downward (0..=19).
//!
//! Collision checks ignore the top edge: a piece may hang above row 0 without
//! colliding, which is what lets a tall piece spawn partially off-screen.

use arrayvec::ArrayVec;

use crate::pieces::ShapeMatrix;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by a single clear (at most every row)
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Locked cells of the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// `cells[y * BOARD_WIDTH + x]`
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self {
            cells: [false; BOARD_SIZE],
        }
    }

    #[inline]
    fn index(x: i16, y: i16) -> Option<usize> {
        let inside = (0..BOARD_WIDTH as i16).contains(&x) && (0..BOARD_HEIGHT as i16).contains(&y);
        inside.then(|| y as usize * BOARD_WIDTH as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), `None` outside the board
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x as i16, y as i16).map(|idx| self.cells[idx])
    }

    /// Write a cell; returns false (and does nothing) outside the board
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        let Some(idx) = Self::index(x as i16, y as i16) else {
            return false;
        };
        self.cells[idx] = cell;
        true
    }

    /// Filled and inside the board
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(true))
    }

    /// Every cell of row `y` is filled (false for rows outside the board)
    pub fn is_row_full(&self, y: usize) -> bool {
        y < BOARD_HEIGHT as usize && self.row(y).iter().all(|&cell| cell)
    }

    /// Borrow one row of cells
    ///
    /// Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Fill every cell of a row (scenario setup)
    pub fn fill_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize].fill(true);
    }

    /// Whether a matrix placed with its top-left corner at (x, y) collides
    ///
    /// A filled matrix cell collides when it lands left of column 0, at or
    /// right of the last column, at or below the floor, or on a filled board
    /// cell. Rows above the board never collide and are never looked up.
    pub fn collides(&self, matrix: &ShapeMatrix, x: i8, y: i8) -> bool {
        matrix.filled_cells().any(|(dx, dy)| {
            let bx = x as i16 + dx as i16;
            let by = y as i16 + dy as i16;

            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
                return true;
            }
            match Self::index(bx, by) {
                Some(idx) => self.cells[idx],
                None => false,
            }
        })
    }

    /// Lock a matrix onto the board with its top-left corner at (x, y)
    ///
    /// The caller guarantees the position is collision-free. Cells that fall
    /// outside the board are skipped. Returns false if any cell was skipped.
    pub fn lock_piece(&mut self, matrix: &ShapeMatrix, x: i8, y: i8) -> bool {
        let mut all_placed = true;
        for (dx, dy) in matrix.filled_cells() {
            match Self::index(x as i16 + dx as i16, y as i16 + dy as i16) {
                Some(idx) => self.cells[idx] = true,
                None => all_placed = false,
            }
        }
        all_placed
    }

    /// Clear all full rows and return their indices (top to bottom)
    ///
    /// Full rows are collected first, then the board is rebuilt as one empty
    /// row per cleared row followed by the remaining rows in their original
    /// order. Adjacent full rows are therefore never skipped.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let full: ClearedRows = (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect();

        if full.is_empty() {
            return full;
        }

        let width = BOARD_WIDTH as usize;
        let snapshot = self.cells;
        let mut rebuilt = [false; BOARD_SIZE];
        let mut write_y = full.len();

        for read_y in (0..BOARD_HEIGHT as usize).filter(|y| !full.contains(y)) {
            let src = read_y * width;
            let dst = write_y * width;
            rebuilt[dst..dst + width].copy_from_slice(&snapshot[src..src + width]);
            write_y += 1;
        }

        self.cells = rebuilt;
        full
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Write the board into a row-major grid
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Build from nested rows (tests)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [false; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Rows as nested vectors
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT as usize)
            .map(|y| self.row(y).to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
