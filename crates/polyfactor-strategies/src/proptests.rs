//! Property-based tests for the dispatcher.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::dispatcher::Factorizer;
    use polyfactor_core::{algebraically_equal, normalize, Expr};

    /// `a*x + b` with a small positive `a` and nonzero `b`.
    fn linear() -> impl Strategy<Value = Expr> {
        (1i64..=3, -5i64..=5)
            .prop_filter("nonzero constant", |&(_, b)| b != 0)
            .prop_map(|(a, b)| a * Expr::ident("x") + b)
    }

    /// The expanded product of one to four linear factors.
    fn expanded_product() -> impl Strategy<Value = Expr> {
        proptest::collection::vec(linear(), 1..=4).prop_map(|factors| {
            let product = factors
                .into_iter()
                .reduce(|acc, f| acc * f)
                .unwrap_or_else(|| Expr::integer(1));
            normalize(&product)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn factoring_is_sound(p in expanded_product()) {
            let result = Factorizer::new().factor(&p, "x");
            prop_assert!(algebraically_equal(&result.ast, &p));
        }

        #[test]
        fn factoring_is_idempotent(p in expanded_product()) {
            let factorizer = Factorizer::new();
            let once = factorizer.factor(&p, "x");
            let twice = factorizer.factor(&once.ast, "x");
            prop_assert!(!twice.changed, "{} changed again into {}", once.ast, twice.ast);
        }

        #[test]
        fn steps_are_recorded_for_every_change(p in expanded_product()) {
            let result = Factorizer::new().factor(&p, "x");
            prop_assert_eq!(result.changed, result.strategy_used.is_some());
            if result.changed {
                prop_assert!(!result.steps.is_empty());
            }
        }
    }
}
