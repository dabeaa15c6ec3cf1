//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or tagged with a piece kind.
//! Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..19 (top to bottom).
//! Rows above the grid (row < 0) are never out of bounds: pieces may hang above the top edge.

use arrayvec::ArrayVec;

use crate::pieces::ShapeMatrix;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one [`Board::clear_full_rows`] call, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from rows, top to bottom.
    ///
    /// Used for prepared puzzle boards and tests. Missing rows/columns stay empty,
    /// extra ones are ignored.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Self {
        let mut board = Self::new();
        for (row, cells) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (col, cell) in cells.as_ref().iter().take(BOARD_WIDTH as usize).enumerate() {
                board.cells[row * BOARD_WIDTH as usize + col] = *cell;
            }
        }
        board
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (col, row); `None` if outside the grid
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row); returns false if outside the grid
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a position is within the grid and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Whether a single mino may sit at (col, row).
    ///
    /// Columns outside [0, WIDTH) and rows at or below the floor are blocked.
    /// Rows above the grid are open.
    pub fn is_open(&self, col: i8, row: i8) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
            return false;
        }
        row < 0 || !self.is_occupied(col, row)
    }

    /// Check whether `matrix` anchored at (col, row) overlaps a wall, the floor or a locked cell
    pub fn collides(&self, matrix: &ShapeMatrix, col: i8, row: i8) -> bool {
        matrix
            .minos()
            .any(|(dc, dr)| !self.is_open(col + dc, row + dr))
    }

    /// Lock `matrix` anchored at (col, row) into the board with `kind`.
    ///
    /// The whole placement is checked first: if any mino collides, nothing is written
    /// and false is returned. Minos still above the grid are discarded.
    pub fn merge(&mut self, matrix: &ShapeMatrix, col: i8, row: i8, kind: PieceKind) -> bool {
        if self.collides(matrix, col, row) {
            return false;
        }

        for (dc, dr) in matrix.minos() {
            // Above-grid minos fall outside `index` and are dropped by `set`.
            self.set(col + dc, row + dr, Some(kind));
        }

        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return their indices (bottom to top).
    ///
    /// Scans bottom to top with a read and a write cursor: surviving rows are copied
    /// down to the write cursor, so every row is judged by its own contents no matter
    /// how far it slides. The vacated rows at the top are emptied. Zero-allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_row = BOARD_HEIGHT as usize;

        for read_row in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    let dst_start = write_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_row * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Copy the grid into a fixed-size 2D array
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
