//! The falling piece.

use crate::board::Board;
use crate::pieces::{shape_for, PieceShape, ShapeMatrix};
use crate::types::{PieceKind, Rotation};

/// Active falling piece: kind, rotation state and top-left anchor of its matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
}

impl ActivePiece {
    /// Create a piece in its spawn rotation at the given anchor
    pub fn new(kind: PieceKind, col: i8, row: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            col,
            row,
        }
    }

    /// Matrix for the current rotation
    pub fn matrix(&self) -> &'static ShapeMatrix {
        shape_for(self.kind, self.rotation)
    }

    /// Filled offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        self.matrix().shape()
    }

    /// Absolute board coordinates (col, row) of the four minos
    pub fn cells(&self) -> PieceShape {
        self.shape().map(|(dc, dr)| (self.col + dc, self.row + dr))
    }

    /// Copy shifted by (dc, dr)
    pub fn shifted(&self, dc: i8, dr: i8) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
            ..*self
        }
    }

    /// Copy with a different rotation, same anchor
    pub fn rotated(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }

    /// Whether this placement overlaps walls, floor or locked cells
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(self.matrix(), self.col, self.row)
    }

    /// Check if the piece is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        self.shifted(0, 1).collides(board)
    }

    /// Row the anchor would reach after dropping as far as legal
    pub fn landing_row(&self, board: &Board) -> i8 {
        let mut landed = *self;
        while !landed.shifted(0, 1).collides(board) {
            landed = landed.shifted(0, 1);
        }
        landed.row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_spawn_rotation() {
        let piece = ActivePiece::new(PieceKind::T, 3, 0);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.cells(), [(4, 0), (3, 1), (4, 1), (5, 1)]);
    }

    #[test]
    fn test_landing_row_empty_board() {
        let board = Board::new();
        // I's filled row is matrix row 1, so the anchor stops at 18
        let piece = ActivePiece::new(PieceKind::I, 3, 0);
        assert_eq!(piece.landing_row(&board), 18);

        let piece = ActivePiece::new(PieceKind::O, 3, 0);
        assert_eq!(piece.landing_row(&board), 18);
    }

    #[test]
    fn test_is_grounded() {
        let board = Board::new();
        let piece = ActivePiece::new(PieceKind::O, 0, 18);
        assert!(piece.is_grounded(&board));
        assert!(!piece.shifted(0, -1).is_grounded(&board));
    }

    #[test]
    fn test_rotated_keeps_anchor() {
        let piece = ActivePiece::new(PieceKind::J, 5, 7).rotated(Rotation::South);
        assert_eq!((piece.col, piece.row), (5, 7));
        assert_eq!(piece.rotation, Rotation::South);
    }
}
