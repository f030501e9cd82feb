//! Complete factorization over the integers as the last resort.

use polyfactor_algebraic::factor_over_integers;
use polyfactor_core::Expr;
use polyfactor_integers::Rational;

use super::polys_to_expr;
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};

/// Clears denominators and hands the polynomial to the Zassenhaus/LLL
/// pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerFactorization;

impl Strategy for IntegerFactorization {
    fn name(&self) -> &'static str {
        "integer-factorization"
    }

    fn description(&self) -> &'static str {
        "factor into irreducibles over the integers"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool {
        node.is_sum()
            && ctx.analyze(node).is_some_and(|v| {
                v.is_univariate && (2..=ctx.config.max_algebraic_degree).contains(&v.degree)
            })
    }

    fn apply(&self, node: &Expr, ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let view = ctx
            .analyze(node)
            .ok_or_else(|| FactorError::NotApplicable("not a polynomial".to_string()))?;
        let (scale, p) = view.integer_form();
        let factorization = factor_over_integers(&p, &ctx.config.algebraic)?;

        let coefficient = Rational::new(factorization.content.clone(), scale);
        if factorization.is_irreducible() && coefficient.is_one() {
            return Err(FactorError::Irreducible(format!(
                "{node} is irreducible over the integers"
            )));
        }

        let factors: Vec<_> = factorization
            .factors
            .iter()
            .map(|f| (f.poly.clone(), f.multiplicity))
            .collect();
        let ast = polys_to_expr(&coefficient, &factors, &ctx.variable);
        Ok(FactorizationResult::rewritten(self.name(), node, ast).finished())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use polyfactor_core::algebraically_equal;

    use super::*;
    use crate::config::FactorConfig;

    fn x() -> Expr {
        Expr::ident("x")
    }

    fn ctx() -> FactorizationContext {
        FactorizationContext::new("x", Arc::new(FactorConfig::default()))
    }

    #[test]
    fn test_splits_quartic_without_rational_roots() {
        // (x^2 + x - 1)(x^2 - x - 1)
        let e = x().powi(4) - 3 * x().powi(2) + 1;
        let result = IntegerFactorization.apply(&e, &ctx()).unwrap();
        assert!(algebraically_equal(&result.ast, &e));
        assert_eq!(result.ast.to_string(), "(x^2 - x - 1)*(x^2 + x - 1)");
        assert!(!result.can_continue);
        assert_eq!(result.strategy_used.as_deref(), Some("integer-factorization"));
    }

    #[test]
    fn test_repeated_factors_and_rational_scale() {
        let e = Expr::rational(1, 2) * x().powi(3) - Expr::rational(1, 2) * x();
        let result = IntegerFactorization.apply(&e, &ctx()).unwrap();
        assert!(algebraically_equal(&result.ast, &e));
        assert_eq!(result.ast.to_string(), "1/2*(x - 1)*x*(x + 1)");

        let e = x().powi(4) + 2 * x().powi(2) + 1;
        let result = IntegerFactorization.apply(&e, &ctx()).unwrap();
        assert_eq!(result.ast.to_string(), "(x^2 + 1)^2");
    }

    #[test]
    fn test_irreducible() {
        let e = x().powi(2) + x() + 1;
        assert!(IntegerFactorization.can_apply(&e, &ctx()));
        assert!(matches!(
            IntegerFactorization.apply(&e, &ctx()),
            Err(FactorError::Irreducible(_))
        ));
    }

    #[test]
    fn test_degree_gate() {
        let ctx = FactorizationContext::new(
            "x",
            Arc::new(FactorConfig::default().with_max_algebraic_degree(3)),
        );
        assert!(!IntegerFactorization.can_apply(&(x().powi(4) + 1), &ctx));
        assert!(!IntegerFactorization.can_apply(&(x() + 1), &ctx));
    }
}
