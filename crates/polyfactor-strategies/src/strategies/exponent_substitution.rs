//! Substitution `t = x^k` for polynomials whose exponents share a factor.
//!
//! A quadratic in `t` with a square discriminant splits into integer
//! factors in `x^k`. With a positive non-square discriminant the roots
//! are `(-b ± m*sqrt(r)) / 2a`, used only when the polynomial has no
//! factorization over the integers. A cubic in `t` gives up one rational
//! root and keeps the quadratic cofactor as a polynomial in `x^k`.

use std::sync::Arc;

use polyfactor_algebraic::factor_over_integers;
use polyfactor_core::{Expr, SignedTerm};
use polyfactor_integers::{Integer, Rational};
use polyfactor_poly::DensePoly;

use super::polynomial_roots::{rational_root_factor, split_quadratic};
use super::{polys_to_expr, product_of};
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};

/// `x^4 + 3*x^2 + 2 -> (x^2 + 1)*(x^2 + 2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentSubstitution;

impl Strategy for ExponentSubstitution {
    fn name(&self) -> &'static str {
        "exponent-substitution"
    }

    fn description(&self) -> &'static str {
        "factor a quadratic or cubic in x^k"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool {
        node.is_sum()
            && ctx.analyze(node).is_some_and(|v| {
                let k = v.exponent_gcd();
                v.is_univariate && k >= 2 && matches!(v.degree / k, 2 | 3)
            })
    }

    fn apply(&self, node: &Expr, ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let view = ctx
            .analyze(node)
            .ok_or_else(|| FactorError::NotApplicable("not a polynomial".to_string()))?;
        let k = view.exponent_gcd();
        let (scale, p) = view.integer_form();
        let (content, pp) = p.content_primitive();
        let q = pp
            .deflate(k as usize)
            .ok_or_else(|| FactorError::NotApplicable("exponents share no factor".to_string()))?;
        let var = &ctx.variable;

        let ast = match q.degree() {
            2 => {
                if let Some((l1, l2)) = split_quadratic(&q) {
                    let factors = [(l1.inflate(k as usize), 1), (l2.inflate(k as usize), 1)];
                    polys_to_expr(&Rational::new(content, scale), &factors, var)
                } else {
                    let disc = discriminant(&q);
                    if !disc.is_positive() {
                        return Err(FactorError::NoProgress("no real roots in x^k".to_string()));
                    }
                    if !factor_over_integers(&pp, &ctx.config.algebraic)?.is_irreducible() {
                        return Err(FactorError::NoProgress(
                            "factors over the integers".to_string(),
                        ));
                    }
                    let (m, r) = disc.square_part(ctx.config.rational_root_divisor_limit);
                    let a = q.coeff(2);
                    let two_a = &Integer::new(2) * &a;
                    let shift = Rational::new(q.coeff(1), two_a.clone());
                    let surd = Rational::new(m, two_a);
                    let factors = vec![
                        (radical_factor(var, k, &shift, &-&surd, &r), 1),
                        (radical_factor(var, k, &shift, &surd, &r), 1),
                    ];
                    product_of(&Rational::new(&content * &a, scale), factors)
                }
            }
            3 => {
                let linear = rational_root_factor(&q, &ctx.config).ok_or_else(|| {
                    FactorError::NoProgress("no rational root in x^k".to_string())
                })?;
                let cofactor = q.div_exact(&linear).ok_or_else(|| {
                    FactorError::Internal("rational root does not divide".to_string())
                })?;
                let factors = [(linear.inflate(k as usize), 1), (cofactor.inflate(k as usize), 1)];
                polys_to_expr(&Rational::new(content, scale), &factors, var)
            }
            _ => {
                return Err(FactorError::NotApplicable(
                    "not quadratic or cubic in x^k".to_string(),
                ))
            }
        };
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

fn discriminant(q: &DensePoly<Integer>) -> Integer {
    let (c, b, a) = (q.coeff(0), q.coeff(1), q.coeff(2));
    &(&b * &b) - &(&(&Integer::new(4) * &a) * &c)
}

/// `x^k + shift + surd*sqrt(r)`.
fn radical_factor(var: &str, k: u32, shift: &Rational, surd: &Rational, r: &Integer) -> Expr {
    let mut terms = vec![SignedTerm::positive(Expr::var_power(var, k))];
    if !shift.is_zero() {
        terms.push(SignedTerm {
            negative: shift.is_negative(),
            expr: Arc::new(Expr::Number(shift.abs())),
        });
    }
    let radical = Expr::sqrt(Expr::from_integer(r.clone()));
    let magnitude = surd.abs();
    terms.push(SignedTerm {
        negative: surd.is_negative(),
        expr: Arc::new(if magnitude.is_one() {
            radical
        } else {
            Expr::mul(Expr::Number(magnitude), radical)
        }),
    });
    Expr::sum(&terms)
}

#[cfg(test)]
mod tests {
    use polyfactor_core::algebraically_equal;

    use super::*;
    use crate::config::FactorConfig;

    fn x() -> Expr {
        Expr::ident("x")
    }

    fn ctx() -> FactorizationContext {
        FactorizationContext::new("x", Arc::new(FactorConfig::default()))
    }

    fn factored(e: &Expr) -> Expr {
        assert!(ExponentSubstitution.can_apply(e, &ctx()));
        let ast = ExponentSubstitution.apply(e, &ctx()).unwrap().ast;
        assert!(algebraically_equal(&ast, e));
        ast
    }

    #[test]
    fn test_rational_roots_in_x_squared() {
        let e = x().powi(4) + 3 * x().powi(2) + 2;
        assert_eq!(factored(&e).to_string(), "(x^2 + 1)*(x^2 + 2)");

        let e = x().powi(6) - 9 * x().powi(3) + 8;
        assert_eq!(factored(&e).to_string(), "(x^3 - 8)*(x^3 - 1)");
    }

    #[test]
    fn test_radical_roots() {
        let e = x().powi(4) - 10 * x().powi(2) + 1;
        assert_eq!(
            factored(&e).to_string(),
            "(x^2 - 5 - 2*sqrt(6))*(x^2 - 5 + 2*sqrt(6))"
        );
    }

    #[test]
    fn test_cubic_in_x_squared() {
        let e = x().powi(6) - x().powi(4) - x().powi(2) - 2;
        assert_eq!(factored(&e).to_string(), "(x^2 - 2)*(x^4 + x^2 + 1)");
    }

    #[test]
    fn test_leaves_integer_factorizations_alone() {
        // (x^2 + x - 1)(x^2 - x - 1)
        let e = x().powi(4) - 3 * x().powi(2) + 1;
        assert!(matches!(
            ExponentSubstitution.apply(&e, &ctx()),
            Err(FactorError::NoProgress(_))
        ));
        let e = x().powi(4) + x().powi(2) + 1;
        assert!(ExponentSubstitution.apply(&e, &ctx()).is_err());
    }

    #[test]
    fn test_gate() {
        let ctx = ctx();
        assert!(!ExponentSubstitution.can_apply(&(x().powi(2) + 1), &ctx));
        assert!(!ExponentSubstitution.can_apply(&(x().powi(8) + x().powi(2) + 1), &ctx));
        assert!(!ExponentSubstitution.can_apply(&(x().powi(4) + x() + 1), &ctx));
    }
}
