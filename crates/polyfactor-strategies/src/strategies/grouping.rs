//! Factoring by grouping: `a*x + a*y + b*x + b*y -> (a + b)*(x + y)`.

use polyfactor_core::{equivalent, Expr, SignedTerm};

use super::common_factor::split_common_factor;
use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};
use crate::view::{extract_terms, Monomial};

/// Splits a sum into groups sharing one remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grouping;

impl Strategy for Grouping {
    fn name(&self) -> &'static str {
        "grouping"
    }

    fn description(&self) -> &'static str {
        "group terms whose common-factor remainders agree"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool {
        node.is_sum() && extract_terms(node).len() >= ctx.config.grouping_min_terms
    }

    fn apply(&self, node: &Expr, _ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let terms = extract_terms(node);
        let ast = pairings(terms.len())
            .iter()
            .find_map(|groups| regroup(&terms, groups))
            .ok_or_else(|| {
                FactorError::NotApplicable("no grouping shares a remainder".to_string())
            })?;
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

/// Index groupings to try: adjacent pairs, even/odd positions, halves.
fn pairings(n: usize) -> Vec<Vec<Vec<usize>>> {
    let mut out: Vec<Vec<Vec<usize>>> = Vec::new();
    if n % 2 == 0 {
        out.push((0..n).step_by(2).map(|i| vec![i, i + 1]).collect());
    }
    out.push(vec![
        (0..n).step_by(2).collect(),
        (1..n).step_by(2).collect(),
    ]);
    if n % 2 == 0 {
        let halves: Vec<Vec<usize>> = vec![(0..n / 2).collect(), (n / 2..n).collect()];
        if !out.contains(&halves) {
            out.push(halves);
        }
    }
    out
}

/// `(f1 + f2 + ...) * r` if every group is `fi * r` for one remainder `r`.
fn regroup(terms: &[SignedTerm], groups: &[Vec<usize>]) -> Option<Expr> {
    let mut factors = Vec::with_capacity(groups.len());
    let mut remainder: Option<Expr> = None;
    for group in groups {
        let members: Vec<SignedTerm> = group.iter().map(|&i| terms[i].clone()).collect();
        let (factor, quotient) = normalized_split(&members)?;
        if quotient.len() < 2 {
            return None;
        }
        let rest = Expr::sum(
            &quotient
                .iter()
                .map(Monomial::to_signed_term)
                .collect::<Vec<_>>(),
        );
        match &remainder {
            Some(first) if !equivalent(first, &rest) => return None,
            Some(_) => {}
            None => remainder = Some(rest),
        }
        factors.push(factor);
    }

    // every group factor being 1 means the sum is already the remainder
    if factors.iter().all(|f| f.is_constant() && f.coefficient.is_one()) {
        return None;
    }
    let factor_sum = Expr::sum(
        &factors
            .iter()
            .map(Monomial::to_signed_term)
            .collect::<Vec<_>>(),
    );
    Some(Expr::mul(factor_sum, remainder?))
}

/// Common factor of a group, with the sign moved so the remainder's
/// leading term is positive.
fn normalized_split(members: &[SignedTerm]) -> Option<(Monomial, Vec<Monomial>)> {
    let (factor, quotient) = split_common_factor(members)?;
    if quotient.first()?.coefficient.is_negative() {
        Some((
            factor.negated(),
            quotient.iter().map(Monomial::negated).collect(),
        ))
    } else {
        Some((factor, quotient))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::FactorConfig;

    fn x() -> Expr {
        Expr::ident("x")
    }

    fn ctx() -> FactorizationContext {
        FactorizationContext::new("x", Arc::new(FactorConfig::default()))
    }

    fn factored(e: &Expr) -> String {
        assert!(Grouping.can_apply(e, &ctx()));
        Grouping.apply(e, &ctx()).unwrap().ast.to_string()
    }

    #[test]
    fn test_adjacent_pairs() {
        let (a, b, y) = (Expr::ident("a"), Expr::ident("b"), Expr::ident("y"));
        let e = a.clone() * x() + a * y.clone() + b.clone() * x() + b * y;
        assert_eq!(factored(&e), "(a + b)*(x + y)");
    }

    #[test]
    fn test_polynomial_grouping() {
        let e = x().powi(3) + x().powi(2) + x() + 1;
        assert_eq!(factored(&e), "(x^2 + 1)*(x + 1)");

        let e = x().powi(3) - 2 * x().powi(2) + 3 * x() - 6;
        assert_eq!(factored(&e), "(x^2 + 3)*(x - 2)");
    }

    #[test]
    fn test_sign_normalization() {
        let e = x().powi(3) - x().powi(2) - x() + 1;
        assert_eq!(factored(&e), "(x^2 - 1)*(x - 1)");
    }

    #[test]
    fn test_alternating_pairs() {
        let (a, b, y) = (Expr::ident("a"), Expr::ident("b"), Expr::ident("y"));
        let e = a.clone() * x() + b.clone() * y.clone() + a * y + b * x();
        assert_eq!(factored(&e), "(a + b)*(x + y)");
    }

    #[test]
    fn test_pairings() {
        assert_eq!(pairings(4).len(), 2);
        assert_eq!(pairings(6).len(), 3);
        assert_eq!(pairings(5), vec![vec![vec![0, 2, 4], vec![1, 3]]]);
    }

    #[test]
    fn test_rejects() {
        let ctx = ctx();
        assert!(!Grouping.can_apply(&(x().powi(2) + x() + 1), &ctx));
        let e = x().powi(3) + x().powi(2) + x() + 2;
        assert!(matches!(Grouping.apply(&e, &ctx), Err(FactorError::NotApplicable(_))));
    }
}
