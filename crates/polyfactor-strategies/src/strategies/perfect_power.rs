//! Perfect squares and perfect powers of a linear polynomial.
//!
//! Degree two is decided by the discriminant. Higher degrees take exact
//! integer n-th roots of the primitive part's leading and constant
//! coefficients and compare the expanded binomial exactly.

use std::collections::BTreeMap;

use polyfactor_core::Expr;
use polyfactor_integers::Rational;
use polyfactor_poly::DensePoly;

use super::scaled;
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};
use crate::view::{dense_to_expr, poly_to_expr, PolynomialView};

/// `x^2 + 2*x + 1 -> (x + 1)^2`, `x^3 - 3*x^2 + 3*x - 1 -> (x - 1)^3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectPower;

impl Strategy for PerfectPower {
    fn name(&self) -> &'static str {
        "perfect-power"
    }

    fn description(&self) -> &'static str {
        "recognize c*(a*x + b)^n"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool {
        node.is_sum()
            && ctx.analyze(node).is_some_and(|v| {
                v.is_univariate && (2..=ctx.config.perfect_power_max_degree).contains(&v.degree)
            })
    }

    fn apply(&self, node: &Expr, ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let view = ctx
            .analyze(node)
            .ok_or_else(|| FactorError::NotApplicable("not a polynomial".to_string()))?;
        let var = &ctx.variable;
        let ast = if view.degree == 2 {
            square(&view, var)
        } else {
            power(&view, var)
        }
        .ok_or_else(|| FactorError::NotApplicable("not a perfect power".to_string()))?;
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

/// `a*x^2 + b*x + c` with `b^2 = 4ac`.
fn square(view: &PolynomialView, var: &str) -> Option<Expr> {
    let (a, b, c) = (view.coefficient(2), view.coefficient(1), view.coefficient(0));
    let four = Rational::from(4);
    if !(&(&b * &b) - &(&(&four * &a) * &c)).is_zero() {
        return None;
    }

    let two = Rational::from(2);
    if let Some(root) = a.sqrt_exact() {
        // (root*x + b/(2*root))^2
        let shift = &b / &(&two * &root);
        let linear = BTreeMap::from([(1, root), (0, shift)]);
        return Some(poly_to_expr(&linear, var).powi(2));
    }
    let shift = &b / &(&two * &a);
    let linear = BTreeMap::from([(1, Rational::one()), (0, shift)]);
    Some(scaled(&a, poly_to_expr(&linear, var).powi(2)))
}

/// `c*(a*x + b)^n` for `n >= 3`.
fn power(view: &PolynomialView, var: &str) -> Option<Expr> {
    let n = view.degree;
    let (scale, p) = view.integer_form();
    let (content, pp) = p.content_primitive();
    let a = pp.leading_coeff().nth_root_exact(n)?;
    let c0 = pp.coeff(0);
    if c0.is_zero() {
        return None;
    }
    let b = c0.nth_root_exact(n)?;
    let candidates = if n % 2 == 0 { vec![-&b, b] } else { vec![b] };

    candidates.into_iter().find_map(|b| {
        let linear = DensePoly::new(vec![b, a.clone()]);
        (linear.pow(n) == pp).then(|| {
            scaled(
                &Rational::new(content.clone(), scale.clone()),
                dense_to_expr(&linear, var).powi(n),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use polyfactor_core::normalize;

    use super::*;
    use crate::config::FactorConfig;

    fn x() -> Expr {
        Expr::ident("x")
    }

    fn ctx() -> FactorizationContext {
        FactorizationContext::new("x", Arc::new(FactorConfig::default()))
    }

    fn factored(e: &Expr) -> String {
        assert!(PerfectPower.can_apply(e, &ctx()));
        PerfectPower.apply(e, &ctx()).unwrap().ast.to_string()
    }

    #[test]
    fn test_squares() {
        assert_eq!(factored(&(x().powi(2) + 2 * x() + 1)), "(x + 1)^2");
        assert_eq!(factored(&(4 * x().powi(2) - 4 * x() + 1)), "(2*x - 1)^2");
        assert_eq!(factored(&(2 * x().powi(2) + 4 * x() + 2)), "2*(x + 1)^2");
        assert_eq!(factored(&(Expr::neg(x().powi(2)) + 2 * x() - 1)), "-(x - 1)^2");
    }

    #[test]
    fn test_higher_powers() {
        let cube = x().powi(3) - 3 * x().powi(2) + 3 * x() - 1;
        assert_eq!(factored(&cube), "(x - 1)^3");

        let fourth = x().powi(4) - 4 * x().powi(3) + 6 * x().powi(2) - 4 * x() + 1;
        assert_eq!(factored(&fourth), "(x - 1)^4");

        let scaled_cube = 8 * x().powi(3) + 12 * x().powi(2) + 6 * x() + 1;
        assert_eq!(factored(&scaled_cube), "(2*x + 1)^3");

        let with_content = normalize(&(3 * (x() + 2).powi(5)));
        assert_eq!(factored(&with_content), "3*(x + 2)^5");
    }

    #[test]
    fn test_not_a_perfect_power() {
        let ctx = ctx();
        let e = x().powi(2) + x() + 1;
        assert!(matches!(
            PerfectPower.apply(&e, &ctx),
            Err(FactorError::NotApplicable(_))
        ));
        let e = x().powi(3) + 1;
        assert!(PerfectPower.apply(&e, &ctx).is_err());
    }

    #[test]
    fn test_degree_gate() {
        let ctx = ctx();
        assert!(!PerfectPower.can_apply(&normalize(&(x() + 1).powi(9)), &ctx));
        assert!(!PerfectPower.can_apply(&(x() + 1), &ctx));
        assert!(!PerfectPower.can_apply(&(Expr::ident("a") * x().powi(2) + 1), &ctx));
    }
}
