use std::{collections::VecDeque, fmt::Write as _, str::FromStr};

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ShapeKind;

/// Default lookahead depth: three upcoming pieces shown as a preview.
///
/// A depth of 1 reproduces the single-"next piece" deployment variant;
/// the depth is fixed for the lifetime of the queue.
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// The ordered queue of not-yet-active shapes.
///
/// The queue is kept at a constant length: every [`pop_next`] removes the
/// front shape and immediately appends one freshly drawn random shape at
/// the tail, so the renderer always has a full preview.
///
/// Draws are independent uniform picks over the seven shapes, seeded via
/// [`QueueSeed`] for reproducible games.
///
/// [`pop_next`]: Self::pop_next
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    queue: VecDeque<ShapeKind>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit seed for the piece RNG. Two queues built from the same seed
/// (and depth) produce the same shape sequence, which enables reproducible
/// games for debugging and deterministic tests. Serializes as a 32-char
/// hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSeed([u8; 16]);

impl Serialize for QueueSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex = String::with_capacity(32);
        write!(&mut hex, "{num:032x}").expect("writing to a String cannot fail");
        serializer.serialize_str(&hex)
    }
}

impl<'de> Deserialize<'de> for QueueSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// Error parsing a [`QueueSeed`] from its 32-character hex form.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed: expected 32 hex characters")]
pub struct ParseSeedError;

impl FromStr for QueueSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl rand::distr::Distribution<QueueSeed> for rand::distr::StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> QueueSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        QueueSeed(seed)
    }
}

impl PieceQueue {
    /// Creates a queue of the given depth with a random seed.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is zero; the session always needs a next piece.
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self::with_seed(rand::rng().random(), depth)
    }

    /// Like [`Self::new`], but with a specific seed for deterministic
    /// shape generation.
    #[must_use]
    pub fn with_seed(seed: QueueSeed, depth: usize) -> Self {
        assert!(depth > 0, "lookahead depth must be at least 1");
        let mut rng = Pcg32::from_seed(seed.0);
        let queue = (0..depth).map(|_| rng.random()).collect();
        Self { rng, queue }
    }

    /// Consumes the front shape and appends a fresh random shape at the
    /// tail, keeping the queue length constant.
    pub fn pop_next(&mut self) -> ShapeKind {
        let kind = self
            .queue
            .pop_front()
            .expect("piece queue is never empty");
        self.queue.push_back(self.rng.random());
        kind
    }

    /// The upcoming shapes, front (next to spawn) first.
    pub fn preview(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.queue.iter().copied()
    }

    /// The configured lookahead depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
