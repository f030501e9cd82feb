//! The built-in strategies, highest priority first.

pub mod common_factor;
pub mod difference_of_squares;
pub mod perfect_power;
pub mod polynomial_roots;
pub mod grouping;
pub mod exponent_substitution;
pub mod binomial_power;
pub mod integer_factorization;

use std::sync::Arc;

use polyfactor_core::Expr;
use polyfactor_integers::{Integer, Rational};
use polyfactor_poly::DensePoly;

use crate::config::FactorConfig;
use crate::strategy::Strategy;
use crate::view::dense_to_expr;

pub use binomial_power::BinomialPower;
pub use common_factor::CommonFactor;
pub use difference_of_squares::DifferenceOfSquares;
pub use exponent_substitution::ExponentSubstitution;
pub use grouping::Grouping;
pub use integer_factorization::IntegerFactorization;
pub use perfect_power::PerfectPower;
pub use polynomial_roots::PolynomialRoots;

/// Every built-in strategy, in registration order.
#[must_use]
pub fn all_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(CommonFactor),
        Box::new(DifferenceOfSquares),
        Box::new(PerfectPower),
        Box::new(PolynomialRoots),
        Box::new(Grouping),
        Box::new(ExponentSubstitution),
        Box::new(BinomialPower),
        Box::new(IntegerFactorization),
    ]
}

/// The enabled built-in strategies.
#[must_use]
pub fn default_strategies(config: &FactorConfig) -> Vec<Box<dyn Strategy>> {
    all_strategies()
        .into_iter()
        .filter(|s| config.is_enabled(s.name()))
        .collect()
}

/// `c * body`, with a unit coefficient dropped and a negative one
/// rendered as a unary minus.
pub(crate) fn scaled(c: &Rational, body: Expr) -> Expr {
    if c.is_one() {
        body
    } else if c == &-Rational::one() {
        Expr::neg(body)
    } else if c.is_negative() {
        Expr::neg(Expr::mul(Expr::Number(c.abs()), body))
    } else {
        Expr::mul(Expr::Number(c.clone()), body)
    }
}

/// `c * f1^k1 * f2^k2 * ...`.
pub(crate) fn product_of(c: &Rational, factors: Vec<(Expr, u32)>) -> Expr {
    let factors = factors
        .into_iter()
        .map(|(f, k)| Arc::new(if k == 1 { f } else { f.powi(k) }))
        .collect();
    scaled(c, Expr::product(factors))
}

/// Renders integer polynomial factors in `var`, merging repeats into
/// powers.
pub(crate) fn polys_to_expr(
    c: &Rational,
    factors: &[(DensePoly<Integer>, u32)],
    var: &str,
) -> Expr {
    let mut merged: Vec<(DensePoly<Integer>, u32)> = Vec::new();
    for (f, k) in factors {
        match merged.iter_mut().find(|(g, _)| g == f) {
            Some((_, m)) => *m += k,
            None => merged.push((f.clone(), *k)),
        }
    }
    product_of(
        c,
        merged
            .into_iter()
            .map(|(f, k)| (dense_to_expr(&f, var), k))
            .collect(),
    )
}
