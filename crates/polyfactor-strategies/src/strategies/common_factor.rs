//! Pulls the greatest common monomial out of a sum.

use std::collections::BTreeMap;

use polyfactor_core::{Expr, SignedTerm};
use polyfactor_integers::{Integer, Rational};

use super::scaled;
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};
use crate::view::{extract_terms, signed_term_parts, Monomial};

/// `6*x + 9 -> 3*(2*x + 3)`, `x^3 + x^2 -> x^2*(x + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonFactor;

impl Strategy for CommonFactor {
    fn name(&self) -> &'static str {
        "common-factor"
    }

    fn description(&self) -> &'static str {
        "extract the gcd of the coefficients and the shared powers of every symbol"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn can_apply(&self, node: &Expr, _ctx: &FactorizationContext) -> bool {
        node.is_sum()
    }

    fn apply(&self, node: &Expr, _ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let terms = extract_terms(node);
        let (factor, quotient) = split_common_factor(&terms)
            .ok_or_else(|| FactorError::NotApplicable("a term is not a monomial".to_string()))?;
        if factor.coefficient.is_one() && factor.is_constant() {
            return Err(FactorError::NotApplicable("no common factor".to_string()));
        }

        let remainder = Expr::sum(
            &quotient
                .iter()
                .map(Monomial::to_signed_term)
                .collect::<Vec<_>>(),
        );
        let ast = if factor.is_constant() {
            scaled(&factor.coefficient, remainder)
        } else {
            let symbols = Monomial {
                coefficient: Rational::one(),
                powers: factor.powers.clone(),
            };
            Expr::mul(scaled(&factor.coefficient, symbols.magnitude_expr()), remainder)
        };
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

/// Splits terms as `factor * sum(quotient)`.
///
/// The factor's coefficient is the gcd of the numerators over the lcm of
/// the denominators, negated when every term is negative; its powers are
/// the minimum exponent of each symbol across all terms. Returns `None`
/// if some term is not a monomial.
pub(crate) fn split_common_factor(terms: &[SignedTerm]) -> Option<(Monomial, Vec<Monomial>)> {
    let monomials = terms
        .iter()
        .map(|t| signed_term_parts(t).as_monomial().cloned())
        .collect::<Option<Vec<_>>>()?;
    let first = monomials.first()?;

    let mut num = Integer::zero();
    let mut den = Integer::one();
    for m in &monomials {
        num = num.gcd(&m.coefficient.numerator());
        den = den.lcm(&m.coefficient.denominator());
    }
    let mut coefficient = if num.is_zero() {
        Rational::one()
    } else {
        Rational::new(num, den)
    };
    if monomials.iter().all(|m| m.coefficient.is_negative()) {
        coefficient = -coefficient;
    }

    let powers: BTreeMap<String, u32> = first
        .powers
        .keys()
        .map(|name| {
            let k = monomials.iter().map(|m| m.degree_in(name)).min().unwrap_or(0);
            (name.clone(), k)
        })
        .filter(|&(_, k)| k > 0)
        .collect();

    let quotient = monomials
        .iter()
        .map(|m| Monomial {
            coefficient: &m.coefficient / &coefficient,
            powers: m
                .powers
                .iter()
                .filter_map(|(name, &k)| {
                    let rest = k - powers.get(name).copied().unwrap_or(0);
                    (rest > 0).then(|| (name.clone(), rest))
                })
                .collect(),
        })
        .collect();

    Some((
        Monomial {
            coefficient,
            powers,
        },
        quotient,
    ))
}
