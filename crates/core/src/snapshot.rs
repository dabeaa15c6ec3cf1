//! Snapshots and notifications for hosts.
//!
//! A [`GameSnapshot`] is plain `Copy` data: everything a presentation layer needs to paint
//! one frame. Observers receive one after every state change, plus a single
//! [`GameOverReport`] when the session ends.

use crate::piece::ActivePiece;
use crate::pieces::PieceShape;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Board grid as seen by hosts, rows top to bottom
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    /// Absolute (col, row) of each mino; rows may be negative above the grid
    pub cells: PieceShape,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            col: value.col,
            row: value.row,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    /// Anchor row the active piece would lock at after a hard drop
    pub ghost_row: Option<i8>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_row = None;
        self.next = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = 0;
        self.started = false;
        self.paused = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// Cell at (col, row) with the active piece drawn over the locked board
    pub fn composited(&self, col: usize, row: usize) -> Cell {
        if let Some(active) = self.active {
            let hit = active
                .cells
                .iter()
                .any(|&(c, r)| c as isize == col as isize && r as isize == row as isize);
            if hit {
                return Some(active.kind);
            }
        }
        self.board
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            next: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: 0,
            started: false,
            paused: false,
            game_over: false,
        }
    }
}

/// Final result, delivered once when the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOverReport {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

/// Outcome of the most recent lock, for hosts that trigger effects on clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
}

/// Receives engine notifications. Both hooks default to doing nothing.
pub trait GameObserver {
    /// Called after every state change
    fn on_state(&mut self, _snapshot: &GameSnapshot) {}

    /// Called exactly once, after the final `on_state`
    fn on_game_over(&mut self, _report: &GameOverReport) {}
}
