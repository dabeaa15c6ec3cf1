//! RNG module - piece generation
//!
//! Pieces are picked uniformly at random among the seven kinds, with replacement.
//! There is no bag: long droughts and repeats are possible, exactly like the
//! mini-game this engine reproduces.
//!
//! Also provides a scripted source for deterministic tests and puzzle setups.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::PieceKind;

/// Supplies the kind of each new "next" piece
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform random piece generator backed by a seedable ChaCha PRNG
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: ChaCha8Rng,
    seed: u64,
}

impl UniformRandomizer {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Seed this generator was created with (for replaying a session)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PieceSource for UniformRandomizer {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }
}

/// Fixed piece sequence, repeated forever
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    pieces: Vec<PieceKind>,
    index: usize,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    pub fn new(pieces: impl IntoIterator<Item = PieceKind>) -> Self {
        let pieces: Vec<PieceKind> = pieces.into_iter().collect();
        assert!(!pieces.is_empty(), "scripted piece sequence must not be empty");
        Self { pieces, index: 0 }
    }

    /// Source that only ever yields `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for ScriptedSource {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.pieces[self.index];
        self.index = (self.index + 1) % self.pieces.len();
        piece
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}
