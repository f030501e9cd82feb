//! Closed-form factoring of quadratics, cubics and quartics.
//!
//! Tried in order: two-term sums and differences of cubes, perfect
//! cubes, rational roots peeled one at a time by exact division, and
//! for a leftover quadratic the AC split from an exact discriminant root.

use std::collections::BTreeSet;

use polyfactor_core::Expr;
use polyfactor_integers::{Integer, Rational};
use polyfactor_poly::DensePoly;

use super::polys_to_expr;
use crate::config::FactorConfig;
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};

/// Factors of degree at most four with rational roots or a cube shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialRoots;

impl Strategy for PolynomialRoots {
    fn name(&self) -> &'static str {
        "polynomial-roots"
    }

    fn description(&self) -> &'static str {
        "split low-degree polynomials at cube identities and rational roots"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool {
        node.is_sum()
            && ctx.analyze(node).is_some_and(|v| {
                v.is_univariate && (2..=ctx.config.closed_form_max_degree).contains(&v.degree)
            })
    }

    fn apply(&self, node: &Expr, ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let view = ctx
            .analyze(node)
            .ok_or_else(|| FactorError::NotApplicable("not a polynomial".to_string()))?;
        let (scale, p) = view.integer_form();
        let (content, pp) = p.content_primitive();

        let (unit, factors) = closed_form_factors(&pp, &ctx.config)
            .ok_or_else(|| FactorError::NoProgress("no rational roots".to_string()))?;
        let coefficient = Rational::new(&content * &unit, scale);
        let ast = polys_to_expr(&coefficient, &factors, &ctx.variable);
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

/// Splits a primitive polynomial into `unit * prod(factors)`, or `None`
/// if nothing splits off.
fn closed_form_factors(
    pp: &DensePoly<Integer>,
    config: &FactorConfig,
) -> Option<(Integer, Vec<(DensePoly<Integer>, u32)>)> {
    if let Some(factors) = cube_sum(pp).or_else(|| perfect_cube(pp)) {
        return Some((Integer::one(), factors));
    }

    let mut rest = pp.clone();
    let mut factors = Vec::new();
    while rest.degree() >= 2 {
        let Some(linear) = rational_root_factor(&rest, config) else {
            break;
        };
        let Some(quotient) = rest.div_exact(&linear) else {
            break;
        };
        factors.push((linear, 1));
        rest = quotient;
    }
    if rest.degree() == 2 {
        if let Some((l1, l2)) = split_quadratic(&rest) {
            factors.push((l1, 1));
            factors.push((l2, 1));
            rest = DensePoly::one();
        }
    }
    if factors.is_empty() {
        return None;
    }
    if rest.degree() > 0 {
        factors.push((rest, 1));
        return Some((Integer::one(), factors));
    }
    Some((rest.coeff(0), factors))
}

/// `(a*x)^3 + b^3 = (a*x + b)(a^2*x^2 - a*b*x + b^2)`, with `b` negative
/// for a difference.
fn cube_sum(pp: &DensePoly<Integer>) -> Option<Vec<(DensePoly<Integer>, u32)>> {
    if pp.degree() != 3 || pp.support().count() != 2 || pp.coeff(0).is_zero() {
        return None;
    }
    let a = pp.leading_coeff().nth_root_exact(3)?;
    let b = pp.coeff(0).nth_root_exact(3)?;
    let linear = DensePoly::new(vec![b.clone(), a.clone()]);
    let quadratic = DensePoly::new(vec![&b * &b, -(&a * &b), &a * &a]);
    (&linear.mul(&quadratic) == pp).then(|| vec![(linear, 1), (quadratic, 1)])
}

/// `(a*x + b)^3`.
fn perfect_cube(pp: &DensePoly<Integer>) -> Option<Vec<(DensePoly<Integer>, u32)>> {
    if pp.degree() != 3 {
        return None;
    }
    let a = pp.leading_coeff().nth_root_exact(3)?;
    let b = pp.coeff(0).nth_root_exact(3)?;
    let linear = DensePoly::new(vec![b, a]);
    (&linear.pow(3) == pp).then(|| vec![(linear, 3)])
}

/// A primitive linear factor `q*x - p` of `f` for a rational root `p/q`.
///
/// Candidates are `±d0/dn` for divisors `d0` of the constant term and
/// `dn` of the leading coefficient, smallest magnitude first. Nothing is
/// searched when either coefficient exceeds the configured divisor limit.
pub(crate) fn rational_root_factor(
    f: &DensePoly<Integer>,
    config: &FactorConfig,
) -> Option<DensePoly<Integer>> {
    if f.degree() == 0 {
        return None;
    }
    if f.coeff(0).is_zero() {
        return Some(DensePoly::x());
    }
    let limit = config.rational_root_divisor_limit;
    let numerators = f.coeff(0).divisors(limit)?;
    let denominators = f.leading_coeff().divisors(limit)?;

    let mut magnitudes = BTreeSet::new();
    for p in &numerators {
        for q in &denominators {
            magnitudes.insert(Rational::new(p.clone(), q.clone()));
        }
    }

    let fq = f.to_rational();
    magnitudes
        .into_iter()
        .flat_map(|r| {
            let negated = -&r;
            [r, negated]
        })
        .take(config.rational_root_max_candidates)
        .find(|r| fq.eval(r).is_zero())
        .map(|r| DensePoly::new(vec![-r.numerator(), r.denominator()]))
}

/// AC split of a primitive quadratic with a square discriminant.
pub(crate) fn split_quadratic(
    q: &DensePoly<Integer>,
) -> Option<(DensePoly<Integer>, DensePoly<Integer>)> {
    let (c, b, a) = (q.coeff(0), q.coeff(1), q.coeff(2));
    let disc = &(&b * &b) - &(&(&Integer::new(4) * &a) * &c);
    let s = disc.sqrt_exact()?;
    let root = Rational::new(&s - &b, &Integer::new(2) * &a);
    let l1 = DensePoly::new(vec![-root.numerator(), root.denominator()]);
    let l2 = q.div_exact(&l1)?;
    Some((l1, l2))
}
