//! Injectable randomness for game outcome generation
//!
//! Every outcome engine draws through [`RandomSource`] instead of a
//! global generator, so rounds can be replayed deterministically from a
//! seed or an explicit draw sequence.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform random source consumed by the outcome engines.
///
/// `next_f64` must return values in `[0, 1)`; the derived helpers build
/// every other draw shape the games need from that single primitive.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    fn pick_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        ((self.next_f64() * bound as f64) as usize).min(bound - 1)
    }

    /// Uniform integer in `low..=high`.
    fn int_in(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low <= high);
        low + self.pick_index((high - low + 1) as usize) as u32
    }
}

/// Platform random source (non-deterministic, the production default)
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Seeded random source for reproducible simulation runs
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Scripted random source fed from an explicit draw sequence.
///
/// Draws cycle once the sequence is exhausted, so a short script keeps
/// producing values instead of panicking mid-test. Values are clamped
/// into `[0, 1)` at construction.
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws: VecDeque<f64> = draws
            .into_iter()
            .map(|d| d.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        debug_assert!(!draws.is_empty());
        Self { draws }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        match self.draws.pop_front() {
            Some(d) => {
                self.draws.push_back(d);
                d
            }
            None => 0.0,
        }
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.pick_index(i + 1);
        items.swap(i, j);
    }
}
