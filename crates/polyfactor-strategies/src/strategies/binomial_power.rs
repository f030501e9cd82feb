//! `x^n ± 1` through cyclotomic polynomials.
//!
//! `x^n - 1` is the product of `Φ_d` over the divisors `d` of `n`, and
//! `x^n + 1` the product over divisors of `2n` that do not divide `n`.
//! The latter is a single factor when `n` is a power of two; for
//! `4 | n` the surd split over `Q(sqrt(2))` is used instead when enabled.

use std::sync::Arc;

use polyfactor_algebraic::{cyclotomic, divisors};
use polyfactor_core::{Expr, SignedTerm};
use polyfactor_integers::{Integer, Rational};
use polyfactor_poly::DensePoly;

use super::{polys_to_expr, product_of};
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};

/// `x^4 - 1 -> (x - 1)*(x + 1)*(x^2 + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialPower;

impl Strategy for BinomialPower {
    fn name(&self) -> &'static str {
        "binomial-power"
    }

    fn description(&self) -> &'static str {
        "split x^n - 1 and x^n + 1 into cyclotomic factors"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool {
        node.is_sum()
            && ctx.analyze(node).is_some_and(|v| {
                v.is_univariate
                    && v.degree >= 2
                    && v.term_count() == 2
                    && !v.coefficient(0).is_zero()
            })
    }

    fn apply(&self, node: &Expr, ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let view = ctx
            .analyze(node)
            .ok_or_else(|| FactorError::NotApplicable("not a polynomial".to_string()))?;
        let (scale, p) = view.integer_form();
        let (content, pp) = p.content_primitive();
        let coefficient = Rational::new(content, scale);
        let n = view.degree;

        let constant = pp.coeff(0);
        if !pp.leading_coeff().is_one() || !constant.abs().is_one() {
            return Err(FactorError::NotApplicable("not x^n ± 1".to_string()));
        }

        let ast = if constant.is_negative() {
            let factors: Vec<(DensePoly<Integer>, u32)> =
                divisors(n).into_iter().map(|d| (cyclotomic(d), 1)).collect();
            polys_to_expr(&coefficient, &factors, &ctx.variable)
        } else if !n.is_power_of_two() {
            let factors: Vec<(DensePoly<Integer>, u32)> = divisors(2 * n)
                .into_iter()
                .filter(|d| n % d != 0)
                .map(|d| (cyclotomic(d), 1))
                .collect();
            polys_to_expr(&coefficient, &factors, &ctx.variable)
        } else if n % 4 == 0 && ctx.config.allow_surd_factors {
            let factors = vec![
                (surd_factor(&ctx.variable, n, false), 1),
                (surd_factor(&ctx.variable, n, true), 1),
            ];
            product_of(&coefficient, factors)
        } else {
            return Err(FactorError::NoProgress(format!(
                "x^{n} + 1 is irreducible over the rationals"
            )));
        };
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

/// `x^(n/2) ± sqrt(2)*x^(n/4) + 1`.
fn surd_factor(var: &str, n: u32, negative: bool) -> Expr {
    let middle = Expr::mul(Expr::sqrt(Expr::integer(2)), Expr::var_power(var, n / 4));
    Expr::sum(&[
        SignedTerm::positive(Expr::var_power(var, n / 2)),
        SignedTerm {
            negative,
            expr: Arc::new(middle),
        },
        SignedTerm::positive(Expr::integer(1)),
    ])
}
