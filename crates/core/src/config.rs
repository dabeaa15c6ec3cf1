//! Engine configuration

use std::fmt;

use crate::board::Board;
use crate::pieces::CATALOG;
use crate::types::{
    PieceKind, Rotation, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, DROP_STEP_MS, MIN_DROP_MS,
    SPAWN_COL, SPAWN_ROW,
};

/// Highest a spawn anchor may sit above the grid
const MIN_SPAWN_ROW: i8 = -3;

/// Tunable engine parameters
///
/// Defaults reproduce the mini-game: 800ms gravity at level 1, 80ms faster per level,
/// 120ms floor, spawn anchor at column 3 row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub base_interval_ms: u32,
    pub step_decrement_ms: u32,
    pub min_interval_ms: u32,
    pub spawn_col: i8,
    pub spawn_row: i8,
    /// Seed for the uniform randomizer; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: BASE_DROP_MS,
            step_decrement_ms: DROP_STEP_MS,
            min_interval_ms: MIN_DROP_MS,
            spawn_col: SPAWN_COL,
            spawn_row: SPAWN_ROW,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check intervals and the spawn anchor.
    ///
    /// Every kind's spawn matrix must fit on an empty board at the anchor, so a fresh
    /// game can never end on its first spawn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.base_interval_ms < self.min_interval_ms {
            return Err(ConfigError::BaseBelowMin {
                base_ms: self.base_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }
        if self.spawn_col < 0 || self.spawn_col > BOARD_WIDTH as i8 - 2 {
            return Err(ConfigError::SpawnColumnOutOfRange(self.spawn_col));
        }
        if self.spawn_row < MIN_SPAWN_ROW || self.spawn_row >= BOARD_HEIGHT as i8 {
            return Err(ConfigError::SpawnRowOutOfRange(self.spawn_row));
        }

        let empty = Board::new();
        for def in CATALOG.iter() {
            if empty.collides(def.matrix(Rotation::North), self.spawn_col, self.spawn_row) {
                return Err(ConfigError::SpawnBlocked {
                    kind: def.kind,
                    col: self.spawn_col,
                    row: self.spawn_row,
                });
            }
        }
        Ok(())
    }

    /// Gravity interval for a level (1-based), floored at `min_interval_ms`
    pub fn drop_interval_ms(&self, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        let reduction = steps.saturating_mul(self.step_decrement_ms);
        self.base_interval_ms
            .saturating_sub(reduction)
            .max(self.min_interval_ms)
    }
}

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroMinInterval,
    BaseBelowMin { base_ms: u32, min_ms: u32 },
    SpawnColumnOutOfRange(i8),
    SpawnRowOutOfRange(i8),
    /// A piece would leave the grid at the spawn anchor
    SpawnBlocked { kind: PieceKind, col: i8, row: i8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMinInterval => write!(f, "min_interval_ms must be positive"),
            ConfigError::BaseBelowMin { base_ms, min_ms } => write!(
                f,
                "base_interval_ms ({}) is below min_interval_ms ({})",
                base_ms, min_ms
            ),
            ConfigError::SpawnColumnOutOfRange(col) => write!(
                f,
                "spawn_col {} is outside 0..={}",
                col,
                BOARD_WIDTH as i8 - 2
            ),
            ConfigError::SpawnRowOutOfRange(row) => write!(
                f,
                "spawn_row {} is outside {}..{}",
                row, MIN_SPAWN_ROW, BOARD_HEIGHT
            ),
            ConfigError::SpawnBlocked { kind, col, row } => write!(
                f,
                "{} piece does not fit at spawn ({}, {})",
                kind.as_str(),
                col,
                row
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
