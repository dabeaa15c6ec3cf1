//! Eldritch Tetris (workspace facade crate).
//!
//! Re-exports the engine crates under stable `eldritch_tetris::{core, input, types}` paths
//! while the implementation lives in dedicated crates under `crates/`.

pub use eldritch_tetris_core as core;
pub use eldritch_tetris_input as input;
pub use eldritch_tetris_types as types;
