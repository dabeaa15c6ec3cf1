//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and the simulation loop of the falling-block mini-game.
//! It has **no dependencies** on UI, input devices or I/O, making it:
//!
//! - **Deterministic**: the same piece source and the same `tick` timestamps replay the same game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: any host (terminal, GUI, web bridge) can drive it
//!
//! # Module Structure
//!
//! - [`pieces`]: the catalog - 7 tetrominoes, 4 explicit rotation matrices each
//! - [`board`]: 10x20 grid with collision queries, merging and line clearing
//! - [`piece`]: the active falling piece
//! - [`clock`]: gravity clock driven by caller-supplied timestamps
//! - [`scoring`]: line-clear points and level progression
//! - [`rng`]: uniform random and scripted piece sources
//! - [`config`]: engine configuration and validation
//! - [`game_state`]: the engine - spawn, move, rotate, drop, lock, pause, tick
//! - [`snapshot`]: state snapshots and observer notifications
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every next piece is picked uniformly among 7 kinds, with replacement
//! - **Basic wall kick**: a blocked rotation retries one column left, then one column right
//! - **Immediate lock**: a piece locks as soon as it cannot descend; there is no lock delay
//! - **Scoring**: 100/300/500/800 for 1-4 rows, times the current level; drops score nothing
//! - **Levels**: start at 1, +1 every 10 lines; gravity speeds up 80ms per level down to 120ms
//!
//! # Example
//!
//! ```
//! use eldritch_tetris_core::{EngineConfig, GameEngine, ScriptedSource};
//! use eldritch_tetris_core::types::{GameCommand, PieceKind};
//!
//! let mut game = GameEngine::with_source(
//!     EngineConfig::default(),
//!     ScriptedSource::repeat(PieceKind::I),
//! )
//! .unwrap();
//! game.start();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::HardDrop);
//!
//! // The I landed flat on the floor; nothing cleared, nothing scored
//! assert_eq!(game.board().filled_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameEngine::tick`](game_state::GameEngine::tick) every frame with a millisecond
//! timestamp. The first tick after start or resume only records the timestamp; afterwards
//! the piece falls one row each time the drop interval has elapsed.

pub mod board;
pub mod clock;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use eldritch_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use clock::SimulationClock;
pub use config::{ConfigError, EngineConfig};
pub use game_state::{GameEngine, Phase};
pub use piece::ActivePiece;
pub use pieces::{definition, shape_for, PieceDefinition, ShapeMatrix, CATALOG};
pub use rng::{PieceSource, ScriptedSource, UniformRandomizer};
pub use scoring::{base_points, level_for_lines, line_clear_score};
pub use snapshot::{
    ActiveSnapshot, GameObserver, GameOverReport, GameSnapshot, LockEvent,
};
