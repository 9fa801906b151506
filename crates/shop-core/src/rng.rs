//! Deterministic per-actor RNG.
//!
//! # Determinism strategy
//!
//! Each actor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (actor.stream() * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream numbers uniformly across the seed space.
//! Actors never share RNG state, so there is no contention on a global
//! generator, and a given seed always yields the same sequence of decisions
//! per actor (thread interleaving still varies between runs).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{ActorId, Category};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-actor deterministic RNG.
///
/// Owned by exactly one actor thread; never shared.
pub struct ActorRng(SmallRng);

impl ActorRng {
    /// Seed deterministically from the run's global seed and an actor ID.
    pub fn new(global_seed: u64, actor: ActorId) -> Self {
        let seed = global_seed ^ actor.stream().wrapping_mul(MIXING_CONSTANT);
        ActorRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `1 / n`.
    ///
    /// `n == 0` is treated as `n == 1` (always true); validated configs
    /// never pass zero.
    #[inline]
    pub fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.0.gen_range(0..n) == 0
    }

    /// A uniformly random category.
    #[inline]
    pub fn category(&mut self) -> Category {
        Category::random(&mut self.0)
    }
}
