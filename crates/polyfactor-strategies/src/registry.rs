//! Priority-ordered strategy collection.

use std::fmt;

use crate::config::FactorConfig;
use crate::strategies::default_strategies;
use crate::strategy::Strategy;

/// Strategies sorted by priority, highest first.
///
/// Ties keep registration order, so the trial order is deterministic.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in strategies, minus those disabled in `config`.
    #[must_use]
    pub fn with_default_strategies(config: &FactorConfig) -> Self {
        let mut registry = Self::new();
        for strategy in default_strategies(config) {
            registry.register(strategy);
        }
        registry
    }

    /// Inserts `strategy` after every strategy of equal or higher priority.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        let at = self
            .strategies
            .iter()
            .position(|s| s.priority() < strategy.priority())
            .unwrap_or(self.strategies.len());
        self.strategies.insert(at, strategy);
    }

    /// Names in trial order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Looks a strategy up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .find(|s| s.name() == name)
            .map(|s| &**s)
    }

    /// Strategies in trial order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.strategies.iter().map(|s| &**s)
    }

    /// Number of registered strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use polyfactor_core::Expr;

    use super::*;
    use crate::error::{FactorError, FactorResult};
    use crate::strategy::{FactorizationContext, FactorizationResult};

    struct Fixed(&'static str, i32);

    impl Strategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn description(&self) -> &'static str {
            "test strategy"
        }

        fn priority(&self) -> i32 {
            self.1
        }

        fn can_apply(&self, _node: &Expr, _ctx: &FactorizationContext) -> bool {
            false
        }

        fn apply(
            &self,
            _node: &Expr,
            _ctx: &FactorizationContext,
        ) -> FactorResult<FactorizationResult> {
            Err(FactorError::NotApplicable("never".to_string()))
        }
    }

    #[test]
    fn test_default_order() {
        let registry = StrategyRegistry::with_default_strategies(&FactorConfig::default());
        assert_eq!(
            registry.names(),
            vec![
                "common-factor",
                "difference-of-squares",
                "perfect-power",
                "polynomial-roots",
                "grouping",
                "exponent-substitution",
                "binomial-power",
                "integer-factorization",
            ]
        );
        assert_eq!(registry.len(), 8);
        assert!(registry.get("grouping").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_register_keeps_ties_in_order() {
        let mut registry = StrategyRegistry::new();
        assert!(registry.is_empty());
        registry.register(Box::new(Fixed("b", 5)));
        registry.register(Box::new(Fixed("a", 10)));
        registry.register(Box::new(Fixed("c", 5)));
        registry.register(Box::new(Fixed("d", 1)));
        assert_eq!(registry.names(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_disabled_strategies_are_skipped() {
        let config = FactorConfig::default()
            .without_strategy("integer-factorization")
            .without_strategy("grouping");
        let registry = StrategyRegistry::with_default_strategies(&config);
        assert_eq!(registry.len(), 6);
        assert!(registry.get("integer-factorization").is_none());
    }
}
