//! Pieces module - tetromino catalog
//!
//! Every piece kind lists all four rotation states as explicit matrices, so shapes
//! never depend on a runtime rotation routine. I uses a 4x4 box, O a 2x2 box and the
//! remaining pieces a 3x3 box. Rotation indices are taken mod 4.

use crate::types::{PieceKind, Rgb, Rotation};

/// Offset of a single mino (column, row) relative to the matrix's top-left corner
pub type MinoOffset = (i8, i8);

/// Filled offsets of one rotation state
pub type PieceShape = [MinoOffset; 4];

/// Square boolean matrix of one rotation state
///
/// Only the top-left `size x size` corner of `rows` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    size: u8,
    rows: [[bool; 4]; 4],
}

impl ShapeMatrix {
    const fn new(size: u8, bits: [[u8; 4]; 4]) -> Self {
        let mut rows = [[false; 4]; 4];
        let mut r = 0;
        while r < 4 {
            let mut c = 0;
            while c < 4 {
                rows[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size, rows }
    }

    /// Side length of the bounding matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at (col, row) is filled; false outside the matrix
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.size as usize && row < self.size as usize && self.rows[row][col]
    }

    /// Matrix rows, each `size` cells wide
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.rows[..self.size as usize]
            .iter()
            .map(move |row| &row[..self.size as usize])
    }

    /// Iterate filled cells as (col, row) offsets, row-major
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        let size = self.size as usize;
        (0..size).flat_map(move |row| {
            (0..size)
                .filter(move |&col| self.rows[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Filled cells as a fixed array (every catalog matrix has exactly 4)
    pub fn shape(&self) -> PieceShape {
        let mut out = [(0, 0); 4];
        for (slot, mino) in out.iter_mut().zip(self.minos()) {
            *slot = mino;
        }
        out
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.minos().count()
    }
}

/// Static description of a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    pub kind: PieceKind,
    pub rotations: [ShapeMatrix; 4],
    pub color: Rgb,
}

impl PieceDefinition {
    /// Matrix for a rotation state
    pub fn matrix(&self, rotation: Rotation) -> &ShapeMatrix {
        &self.rotations[rotation.index() as usize]
    }

    /// Offset that centers the spawn matrix inside a square preview box
    pub fn preview_origin(&self, preview_size: u8) -> (i8, i8) {
        let size = self.rotations[0].size();
        let offset = (preview_size.saturating_sub(size) / 2) as i8;
        (offset, offset)
    }
}

const I_ROTATIONS: [ShapeMatrix; 4] = [
    ShapeMatrix::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(4, [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
    ShapeMatrix::new(4, [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
    ShapeMatrix::new(4, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const O_MATRIX: ShapeMatrix =
    ShapeMatrix::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

const O_ROTATIONS: [ShapeMatrix; 4] = [O_MATRIX; 4];

const T_ROTATIONS: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

const S_ROTATIONS: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

const Z_ROTATIONS: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]]),
];

const J_ROTATIONS: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]]),
];

const L_ROTATIONS: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]]),
    ShapeMatrix::new(3, [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]]),
];

/// The full catalog, in [`PieceKind::ALL`] order
pub static CATALOG: [PieceDefinition; 7] = [
    PieceDefinition {
        kind: PieceKind::I,
        rotations: I_ROTATIONS,
        color: Rgb::new(0x00, 0xff, 0xff),
    },
    PieceDefinition {
        kind: PieceKind::O,
        rotations: O_ROTATIONS,
        color: Rgb::new(0xff, 0xd7, 0x00),
    },
    PieceDefinition {
        kind: PieceKind::T,
        rotations: T_ROTATIONS,
        color: Rgb::new(0x9b, 0x59, 0xb6),
    },
    PieceDefinition {
        kind: PieceKind::S,
        rotations: S_ROTATIONS,
        color: Rgb::new(0x2e, 0xcc, 0x71),
    },
    PieceDefinition {
        kind: PieceKind::Z,
        rotations: Z_ROTATIONS,
        color: Rgb::new(0xe7, 0x4c, 0x3c),
    },
    PieceDefinition {
        kind: PieceKind::J,
        rotations: J_ROTATIONS,
        color: Rgb::new(0x34, 0x98, 0xdb),
    },
    PieceDefinition {
        kind: PieceKind::L,
        rotations: L_ROTATIONS,
        color: Rgb::new(0xe6, 0x7e, 0x22),
    },
];

/// Catalog entry for a piece kind
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    &CATALOG[kind.index()]
}

/// Matrix for a piece kind and rotation
pub fn shape_for(kind: PieceKind, rotation: Rotation) -> &'static ShapeMatrix {
    definition(kind).matrix(rotation)
}

/// Matrix for a piece kind and a raw rotation index (taken mod 4)
pub fn shape_for_index(kind: PieceKind, rotation: i32) -> &'static ShapeMatrix {
    shape_for(kind, Rotation::from_index(rotation))
}
