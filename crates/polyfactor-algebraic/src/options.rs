//! Tuning knobs for the integer factorization pipeline.

use polyfactor_integers::Rational;

/// Options for [`crate::factor_over_integers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgebraicOptions {
    /// How many admissible primes to factor modulo before keeping the one
    /// with the fewest factors.
    pub prime_trials: usize,
    /// Above this many modular factors recombination switches from subset
    /// enumeration to lattice reduction.
    pub subset_threshold: usize,
    /// The LLL Lovász parameter as `(numerator, denominator)`.
    pub lll_delta: (u32, u32),
    /// Seed for the equal-degree splitting RNG.
    pub rng_seed: u64,
}

impl Default for AlgebraicOptions {
    fn default() -> Self {
        Self {
            prime_trials: 5,
            subset_threshold: 8,
            lll_delta: (3, 4),
            rng_seed: 42,
        }
    }
}

impl AlgebraicOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of prime trials.
    #[must_use]
    pub fn with_prime_trials(mut self, trials: usize) -> Self {
        self.prime_trials = trials;
        self
    }

    /// Sets the subset/lattice switch-over.
    #[must_use]
    pub fn with_subset_threshold(mut self, threshold: usize) -> Self {
        self.subset_threshold = threshold;
        self
    }

    /// Sets the LLL parameter. It must lie in `(1/4, 1]`.
    #[must_use]
    pub fn with_lll_delta(mut self, numerator: u32, denominator: u32) -> Self {
        self.lll_delta = (numerator, denominator);
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// The LLL parameter as a rational, falling back to 3/4 when the
    /// stored pair is out of range.
    #[must_use]
    pub fn delta(&self) -> Rational {
        let (n, d) = self.lll_delta;
        if d == 0 || 4 * u64::from(n) <= u64::from(d) || n > d {
            return Rational::from_i64(3, 4);
        }
        Rational::from_i64(i64::from(n), i64::from(d))
    }
}
