//! Randomness source for battle resolution
//!
//! Every draw the resolvers make goes through [`RandomSource::next_in_range`].
//! Seeded runs replay exactly; scripted runs feed a fixed sequence of values.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::{EngineError, Result};

/// Source of uniform integers in `1..=sides`
pub trait RandomSource {
    fn next_in_range(&mut self, sides: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_in_range(&mut self, sides: u32) -> u32 {
        (**self).next_in_range(sides)
    }
}

/// ChaCha8-backed source; the same seed always produces the same battle
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_in_range(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }
}

/// Replays a fixed sequence of draws
///
/// The values are returned as-is whatever `sides` is asked for, so an
/// out-of-range script surfaces as a `SourceFault`. An exhausted script
/// returns 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
    drawn: usize,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Draws consumed so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Draws left in the script
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_in_range(&mut self, _sides: u32) -> u32 {
        match self.values.pop_front() {
            Some(value) => {
                self.drawn += 1;
                value
            }
            None => 0,
        }
    }
}

/// Checked view over a [`RandomSource`]
///
/// Values outside `1..=sides` abort with `SourceFault` rather than being
/// clamped. Choices among a single option draw nothing.
pub struct Dice<'r, R: RandomSource + ?Sized> {
    source: &'r mut R,
}

impl<'r, R: RandomSource + ?Sized> Dice<'r, R> {
    pub fn new(source: &'r mut R) -> Self {
        Self { source }
    }

    /// Roll one die with `sides` faces
    pub fn roll(&mut self, sides: u32) -> Result<u32> {
        let value = self.source.next_in_range(sides);
        if value == 0 || value > sides {
            return Err(EngineError::SourceFault { sides, value });
        }
        Ok(value)
    }

    pub fn d6(&mut self) -> Result<u32> {
        self.roll(6)
    }

    /// Roll `count` six-sided dice
    pub fn d6s(&mut self, count: usize) -> Result<Vec<u32>> {
        (0..count).map(|_| self.d6()).collect()
    }

    /// Fair coin; `true` on the first face
    pub fn coin(&mut self) -> Result<bool> {
        Ok(self.roll(2)? == 1)
    }

    /// Uniform index into a collection of `len` items
    pub fn pick(&mut self, len: usize) -> Result<usize> {
        match len {
            0 => Err(EngineError::invalid_input("cannot pick from an empty collection")),
            1 => Ok(0),
            _ => Ok(self.roll(len as u32)? as usize - 1),
        }
    }

    /// `k` distinct indices from `0..n`, in draw order (partial Fisher-Yates)
    pub fn sample(&mut self, n: usize, k: usize) -> Result<Vec<usize>> {
        let k = k.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = i + self.pick(n - i)?;
            pool.swap(i, j);
        }
        pool.truncate(k);
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_deterministic() {
        let mut a = SeededSource::seed_from_u64(12345);
        let mut b = SeededSource::seed_from_u64(12345);

        for _ in 0..100 {
            assert_eq!(a.next_in_range(6), b.next_in_range(6));
        }
    }

    #[test]
    fn test_seeded_in_range() {
        let mut source = SeededSource::seed_from_u64(42);
        let mut dice = Dice::new(&mut source);

        for _ in 0..500 {
            let roll = dice.d6().unwrap();
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut source = ScriptedSource::new([3, 1, 6]);
        let mut dice = Dice::new(&mut source);

        assert_eq!(dice.d6s(3).unwrap(), vec![3, 1, 6]);
        assert_eq!(source.drawn(), 3);
    }

    #[test]
    fn test_out_of_range_is_source_fault() {
        let mut source = ScriptedSource::new([7]);
        let err = Dice::new(&mut source).d6().unwrap_err();
        assert!(err.is_source_fault());
    }

    #[test]
    fn test_exhausted_script_is_source_fault() {
        let mut source = ScriptedSource::new([]);
        assert!(Dice::new(&mut source).d6().unwrap_err().is_source_fault());
    }

    #[test]
    fn test_single_option_draws_nothing() {
        let mut source = ScriptedSource::new([]);
        let mut dice = Dice::new(&mut source);

        assert_eq!(dice.pick(1).unwrap(), 0);
        assert_eq!(dice.sample(1, 1).unwrap(), vec![0]);
    }

    #[test]
    fn test_sample_distinct() {
        let mut source = SeededSource::seed_from_u64(7);
        let mut dice = Dice::new(&mut source);

        let mut picked = dice.sample(6, 4).unwrap();
        assert_eq!(picked.len(), 4);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|i| *i < 6));
    }

    #[test]
    fn test_sample_scripted_positions() {
        // 3 items: first draw picks index 2, second draw picks the first of the rest
        let mut source = ScriptedSource::new([3, 1]);
        let mut dice = Dice::new(&mut source);

        assert_eq!(dice.sample(3, 2).unwrap(), vec![2, 1]);
    }
}
