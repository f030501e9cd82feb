//! Configuration for the factorization dispatcher.

use polyfactor_algebraic::AlgebraicOptions;
use polyfactor_core::ExpandLimits;

/// Tunables for [`crate::Factorizer`] and the strategies it runs.
///
/// Passed into the dispatcher at construction and shared read-only with
/// every strategy through the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorConfig {
    /// Dispatch rounds per node before the loop stops.
    pub max_iterations: usize,
    /// How deep the dispatcher recurses into factors of factors.
    pub max_depth: usize,
    /// Expand every rewritten tree and compare it with its input.
    pub verify_results: bool,
    /// Highest degree the perfect-power search looks at.
    pub perfect_power_max_degree: u32,
    /// Highest degree the closed-form root search looks at.
    pub closed_form_max_degree: u32,
    /// Rational roots are only searched when the constant and leading
    /// coefficients are at most this large in absolute value.
    pub rational_root_divisor_limit: u64,
    /// Cap on the number of candidate rational roots evaluated.
    pub rational_root_max_candidates: usize,
    /// Fewest additive terms grouping will try to pair.
    pub grouping_min_terms: usize,
    /// Allow `x^(4m) + 1` to split into two factors with `sqrt(2)`
    /// coefficients.
    pub allow_surd_factors: bool,
    /// Highest degree handed to the integer factorization pipeline.
    pub max_algebraic_degree: u32,
    /// Strategy names left out of the default registry.
    pub disabled_strategies: Vec<String>,
    /// Options for the integer factorization pipeline.
    pub algebraic: AlgebraicOptions,
    /// Limits for verification and polynomial views.
    pub expand: ExpandLimits,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            max_depth: 16,
            verify_results: true,
            perfect_power_max_degree: 8,
            closed_form_max_degree: 4,
            rational_root_divisor_limit: 1_000_000,
            rational_root_max_candidates: 4096,
            grouping_min_terms: 4,
            allow_surd_factors: true,
            max_algebraic_degree: 64,
            disabled_strategies: Vec::new(),
            algebraic: AlgebraicOptions::default(),
            expand: ExpandLimits::default(),
        }
    }
}

impl FactorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-node iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the recursion depth cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Turns expansion checks of rewritten trees on or off.
    #[must_use]
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_results = verify;
        self
    }

    /// Sets the perfect-power degree gate.
    #[must_use]
    pub fn with_perfect_power_max_degree(mut self, degree: u32) -> Self {
        self.perfect_power_max_degree = degree;
        self
    }

    /// Sets the closed-form degree gate.
    #[must_use]
    pub fn with_closed_form_max_degree(mut self, degree: u32) -> Self {
        self.closed_form_max_degree = degree;
        self
    }

    /// Sets the bounds of the rational root search.
    #[must_use]
    pub fn with_rational_root_limits(mut self, divisor_limit: u64, max_candidates: usize) -> Self {
        self.rational_root_divisor_limit = divisor_limit;
        self.rational_root_max_candidates = max_candidates;
        self
    }

    /// Sets the fewest terms grouping needs.
    #[must_use]
    pub fn with_grouping_min_terms(mut self, terms: usize) -> Self {
        self.grouping_min_terms = terms;
        self
    }

    /// Allows or forbids `sqrt(2)` coefficients in binomial factors.
    #[must_use]
    pub fn with_surd_factors(mut self, allow: bool) -> Self {
        self.allow_surd_factors = allow;
        self
    }

    /// Sets the degree gate of the integer factorization strategy.
    #[must_use]
    pub fn with_max_algebraic_degree(mut self, degree: u32) -> Self {
        self.max_algebraic_degree = degree;
        self
    }

    /// Leaves the named strategy out of the default registry.
    #[must_use]
    pub fn without_strategy(mut self, name: &str) -> Self {
        self.disabled_strategies.push(name.to_string());
        self
    }

    /// Replaces the integer factorization options.
    #[must_use]
    pub fn with_algebraic(mut self, options: AlgebraicOptions) -> Self {
        self.algebraic = options;
        self
    }

    /// Replaces the expansion limits.
    #[must_use]
    pub fn with_expand_limits(mut self, limits: ExpandLimits) -> Self {
        self.expand = limits;
        self
    }

    /// Returns true unless `name` was disabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled_strategies.iter().any(|n| n == name)
    }
}
