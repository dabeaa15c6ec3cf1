//! Input adapter (engine-facing).
//!
//! Maps `crossterm` key events to [`crate::types::GameCommand`]s and provides a
//! single-consumer command queue for hosts that receive input off the simulation
//! thread. Nothing here knows about the engine itself.

pub mod map;
pub mod queue;

pub use eldritch_tetris_types as types;

pub use map::{map_key_event, should_quit};
pub use queue::{CommandQueue, CommandSender};
