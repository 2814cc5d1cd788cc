//! Injectable randomness.
//!
//! Every probabilistic decision in the NPC goes through [`RandomSource`],
//! which only needs to produce uniform reals in `[0, 1)`. Tests use
//! [`ScriptedRandom`] or [`SeededRandom`]; the server uses [`ThreadRandom`]
//! unless a seed is configured.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random numbers.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    /// Panics if `len` is zero; an empty candidate pool is a programming
    /// error, not a runtime condition.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty pool");
        let i = (self.uniform() * len as f64) as usize;
        i.min(len - 1)
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}

/// Pick one element uniformly.
pub fn choose<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.index(items.len())]
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty pool");
        rand::rng().random_range(0..len)
    }
}

/// Deterministic generator seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty pool");
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedRandom {
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values.into();
        assert!(!values.is_empty(), "scripted sequence must not be empty");
        Self { values, pos: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_cycles_and_counts() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.uniform(), 0.1);
        assert_eq!(rng.uniform(), 0.9);
        assert_eq!(rng.uniform(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_scripted_clamps_out_of_range() {
        let mut rng = ScriptedRandom::new(vec![1.5, -0.2]);
        assert!(rng.uniform() < 1.0);
        assert_eq!(rng.uniform(), 0.0);
    }

    #[test]
    fn test_index_bounds() {
        let mut low = ScriptedRandom::constant(0.0);
        let mut high = ScriptedRandom::constant(0.999_999);
        assert_eq!(low.index(5), 0);
        assert_eq!(high.index(5), 4);
        assert_eq!(high.index(1), 0);
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn test_index_empty_pool_panics() {
        ScriptedRandom::constant(0.5).index(0);
    }

    #[test]
    fn test_chance_is_strict_less_than() {
        let mut rng = ScriptedRandom::constant(0.5);
        assert!(!rng.chance(0.5));
        assert!(rng.chance(0.6));
    }

    #[test]
    fn test_choose_uses_index() {
        let items = ["a", "b", "c", "d"];
        let mut rng = ScriptedRandom::new(vec![0.0, 0.3, 0.6, 0.99]);
        let picked: Vec<&str> = (0..4).map(|_| *choose(&mut rng, &items)).collect();
        assert_eq!(picked, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SeededRandom::new(42);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_with_zero_draws_reverses_prefix_swaps() {
        // index() always 0: swap(i, 0) for i = n-1..1.
        let mut rng = ScriptedRandom::constant(0.0);
        let mut items = vec!["a", "b", "c"];
        shuffle(&mut rng, &mut items);
        assert_eq!(items, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..32 {
            assert_eq!(a.uniform(), b.uniform());
            assert_eq!(a.index(10), b.index(10));
        }
    }

    #[test]
    fn test_thread_random_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
            assert!(rng.index(3) < 3);
        }
    }
}
