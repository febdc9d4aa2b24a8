//! Randomness seam for crop generation.

use rand::Rng;

/// Source of the random draws a crop strategy needs.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` gives
/// reproducible runs. Tests can implement it directly to script exact draws.
pub trait CropRandom {
    /// Continuous draw in `low..high`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Integer draw in `low..=high`. Callers guarantee `low <= high`.
    fn int_inclusive(&mut self, low: i64, high: i64) -> i64;

    /// Fair coin flip.
    fn coin(&mut self) -> bool;

    /// Index in `0..len`. Callers guarantee `len > 0`.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng> CropRandom for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.random_range(low..high)
    }

    fn int_inclusive(&mut self, low: i64, high: i64) -> i64 {
        self.random_range(low..=high)
    }

    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
