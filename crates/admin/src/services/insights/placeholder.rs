//! Placeholder values for products without observed activity.
//!
//! The dashboard charts never render empty series: under the `simulate`
//! fallback policy a zero count is replaced with a value drawn from a fixed
//! range. Every substituted metric is reported in `simulated`.

use std::ops::{Range, RangeInclusive};

use rand::Rng;
use rand::rngs::ThreadRng;

pub const VIEWS: RangeInclusive<u32> = 100..=599;
pub const ADDS: RangeInclusive<u32> = 10..=59;
pub const SALES: RangeInclusive<u32> = 5..=34;
pub const CONVERSION_RATE: Range<f64> = 1.0..6.0;
pub const MARGIN: RangeInclusive<u32> = 15..=34;
pub const RETURN_RATE: Range<f64> = 0.0..3.0;

/// Source of placeholder metric values.
///
/// Rates are returned unrounded; the aggregator rounds them to two decimals.
pub trait PlaceholderSource {
    fn views(&mut self) -> u32;
    fn adds(&mut self) -> u32;
    fn sales(&mut self) -> u32;
    fn conversion_rate(&mut self) -> f64;
    fn margin(&mut self) -> u32;
    fn return_rate(&mut self) -> f64;
}

/// Uniform draws from the fixed placeholder ranges.
#[derive(Debug, Clone)]
pub struct RandomPlaceholders<R> {
    rng: R,
}

impl<R: Rng> RandomPlaceholders<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPlaceholders<ThreadRng> {
    /// Placeholders backed by the thread-local RNG.
    ///
    /// `ThreadRng` is not `Send`; build this inside synchronous code, never
    /// across an `.await`.
    #[must_use]
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> PlaceholderSource for RandomPlaceholders<R> {
    fn views(&mut self) -> u32 {
        self.rng.random_range(VIEWS)
    }

    fn adds(&mut self) -> u32 {
        self.rng.random_range(ADDS)
    }

    fn sales(&mut self) -> u32 {
        self.rng.random_range(SALES)
    }

    fn conversion_rate(&mut self) -> f64 {
        self.rng.random_range(CONVERSION_RATE)
    }

    fn margin(&mut self) -> u32 {
        self.rng.random_range(MARGIN)
    }

    fn return_rate(&mut self) -> f64 {
        self.rng.random_range(RETURN_RATE)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_draws_stay_in_range() {
        let mut source = RandomPlaceholders::new(StdRng::seed_from_u64(17));
        for _ in 0..500 {
            assert!(VIEWS.contains(&source.views()));
            assert!(ADDS.contains(&source.adds()));
            assert!(SALES.contains(&source.sales()));
            assert!(CONVERSION_RATE.contains(&source.conversion_rate()));
            assert!(MARGIN.contains(&source.margin()));
            assert!(RETURN_RATE.contains(&source.return_rate()));
        }
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RandomPlaceholders::new(StdRng::seed_from_u64(99));
        let mut b = RandomPlaceholders::new(StdRng::seed_from_u64(99));
        assert_eq!(a.views(), b.views());
        assert_eq!(a.sales(), b.sales());
    }
}
