//! Pieces module - the fixed piece set and matrix rotation
//!
//! Every piece is a small rectangular boolean matrix (at most 4x4). Rotation
//! turns an `R x C` matrix into a `C x R` one; there are no precomputed
//! rotation states and no kick tables.

use crate::types::{PieceColor, PieceKind, MAX_PIECE_SIDE, PIECE_COUNT};

/// Offset of a single filled cell relative to the matrix top-left corner, as `(dx, dy)`
pub type CellOffset = (i8, i8);

/// Rectangular boolean matrix of a piece, stored inline (no allocation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_PIECE_SIDE]; MAX_PIECE_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values.
    ///
    /// Panics (at compile time when used in a const) if a side is 0 or larger
    /// than [`MAX_PIECE_SIDE`].
    pub const fn new<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        assert!(R >= 1 && R <= MAX_PIECE_SIDE);
        assert!(C >= 1 && C <= MAX_PIECE_SIDE);

        let mut cells = [[false; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];
        let mut i = 0;
        while i < R {
            let mut j = 0;
            while j < C {
                cells[i][j] = rows[i][j] != 0;
                j += 1;
            }
            i += 1;
        }

        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell at row `i`, column `j`; false outside the matrix
    pub fn get(&self, i: usize, j: usize) -> bool {
        i < self.rows() && j < self.cols() && self.cells[i][j]
    }

    /// Iterate the filled cells as `(dx, dy)` offsets, row by row
    pub fn filled_cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.rows()).flat_map(move |i| {
            (0..self.cols())
                .filter(move |&j| self.cells[i][j])
                .map(move |j| (j as i8, i as i8))
        })
    }

    /// Rotate 90° clockwise: `new[i][j] = old[rows - 1 - j][i]`
    pub fn rotated(&self) -> Self {
        let old_rows = self.rows();
        let old_cols = self.cols();
        let mut cells = [[false; MAX_PIECE_SIDE]; MAX_PIECE_SIDE];

        for (i, row) in cells.iter_mut().enumerate().take(old_cols) {
            for (j, cell) in row.iter_mut().enumerate().take(old_rows) {
                *cell = self.cells[old_rows - 1 - j][i];
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Copy the matrix into a row-major `Vec<Vec<bool>>` (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows())
            .map(|i| self.cells[i][..self.cols()].to_vec())
            .collect()
    }
}

/// Immutable template of one piece kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceShape {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: PieceColor,
    /// Relative spawn weight; the whole set sums to 1.0
    pub probability: f64,
}

/// The fixed piece set, in declaration order
pub static PIECES: [PieceShape; PIECE_COUNT] = [
    PieceShape {
        kind: PieceKind::C,
        matrix: ShapeMatrix::new([[1, 1, 1], [1, 0, 1]]),
        color: PieceColor::Red,
        probability: 0.2,
    },
    PieceShape {
        kind: PieceKind::L,
        matrix: ShapeMatrix::new([[1, 1, 1], [1, 0, 0]]),
        color: PieceColor::Brown,
        probability: 0.2,
    },
    PieceShape {
        kind: PieceKind::O,
        matrix: ShapeMatrix::new([[1, 1], [1, 1]]),
        color: PieceColor::Purple,
        probability: 0.2,
    },
    PieceShape {
        kind: PieceKind::T,
        matrix: ShapeMatrix::new([[1, 1, 1], [0, 1, 0]]),
        color: PieceColor::Yellow,
        probability: 0.2,
    },
    PieceShape {
        kind: PieceKind::I,
        matrix: ShapeMatrix::new([[1, 1, 1, 1]]),
        color: PieceColor::Orange,
        probability: 0.2,
    },
];

/// Get the template for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static PieceShape {
    &PIECES[kind.index()]
}
