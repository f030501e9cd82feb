//! `a^2 - b^2 = (a + b)(a - b)`.

use std::sync::Arc;

use polyfactor_core::{normalize, BinaryOp, Expr};

use crate::error::{FactorError, FactorResult};
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};
use crate::view::extract_terms;

/// Factors a two-term difference of recognizable squares.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceOfSquares;

impl DifferenceOfSquares {
    /// `(positive, negative)` square roots of a two-term difference.
    fn roots(node: &Expr) -> Option<(Expr, Expr)> {
        if !node.is_sum() {
            return None;
        }
        let terms = extract_terms(node);
        let [a, b] = terms.as_slice() else {
            return None;
        };
        let (pos, neg) = match (a.negative, b.negative) {
            (false, true) => (a, b),
            (true, false) => (b, a),
            _ => return None,
        };
        Some((square_root(&pos.expr)?, square_root(&neg.expr)?))
    }
}

impl Strategy for DifferenceOfSquares {
    fn name(&self) -> &'static str {
        "difference-of-squares"
    }

    fn description(&self) -> &'static str {
        "rewrite a^2 - b^2 as (a + b)(a - b)"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn can_apply(&self, node: &Expr, _ctx: &FactorizationContext) -> bool {
        Self::roots(node).is_some()
    }

    fn apply(&self, node: &Expr, _ctx: &FactorizationContext) -> FactorResult<FactorizationResult> {
        let (a, b) = Self::roots(node)
            .ok_or_else(|| FactorError::NotApplicable("not a difference of squares".to_string()))?;
        let tidy = a.is_sum() || b.is_sum();
        let factor = |e: Expr| if tidy { normalize(&e) } else { e };
        let ast = Expr::mul(
            factor(Expr::add(a.clone(), b.clone())),
            factor(Expr::sub(a, b)),
        );
        Ok(FactorizationResult::rewritten(self.name(), node, ast))
    }
}

/// A syntactic square root: perfect-square literals, even powers,
/// `e*e`, and products of squares.
fn square_root(expr: &Expr) -> Option<Expr> {
    if let Some(q) = expr.as_number() {
        return q.sqrt_exact().map(Expr::Number);
    }
    if let Some((base, k)) = expr.as_integer_power() {
        if k < 2 || k % 2 != 0 {
            return None;
        }
        return Some(if k == 2 {
            (**base).clone()
        } else {
            Expr::pow(Arc::clone(base), Expr::integer(i64::from(k / 2)))
        });
    }
    let (left, right) = expr.as_binary(BinaryOp::Mul)?;
    if left == right {
        return Some((**left).clone());
    }
    let (l, r) = (square_root(left)?, square_root(right)?);
    Some(if l.is_integer_value(1) {
        r
    } else {
        Expr::mul(l, r)
    })
}
