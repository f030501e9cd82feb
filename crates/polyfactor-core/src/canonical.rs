//! Canonical forms and commutative-aware equivalence.
//!
//! Two trees are *equivalent* when they differ only in how `+` and `*`
//! chains are associated and ordered. This is the notion of "did anything
//! change" used by the dispatcher's no-progress guard and by grouping.

use std::sync::Arc;

use crate::expr::{BinaryOp, Expr};

/// Returns the canonical representative of `expr`.
///
/// Children are canonicalized first. Maximal `+` chains and `*` chains
/// are flattened, their operands sorted by the total order on `Expr` and
/// rebuilt left-associated. `-`, `/` and `^` keep their operand order.
#[must_use]
pub fn canonical(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Identifier(_) => expr.clone(),
        Expr::Binary { op, left, right } => {
            if op.is_commutative() {
                let mut operands = Vec::new();
                collect_chain(expr, *op, &mut operands);
                operands.sort();
                let mut iter = operands.into_iter();
                match iter.next() {
                    Some(first) => iter.fold(first, |acc, next| Expr::binary(*op, acc, next)),
                    None => expr.clone(),
                }
            } else {
                Expr::binary(*op, canonical(left), canonical(right))
            }
        }
        Expr::Unary { op, operand } => Expr::Unary {
            op: *op,
            operand: Arc::new(canonical(operand)),
        },
        Expr::Call { name, args } => Expr::Call {
            name: name.clone(),
            args: args.iter().map(|a| Arc::new(canonical(a))).collect(),
        },
        Expr::Fraction {
            numerator,
            denominator,
        } => Expr::fraction(canonical(numerator), canonical(denominator)),
    }
}

fn collect_chain(expr: &Expr, op: BinaryOp, out: &mut Vec<Expr>) {
    match expr.as_binary(op) {
        Some((left, right)) => {
            collect_chain(left, op, out);
            collect_chain(right, op, out);
        }
        None => out.push(canonical(expr)),
    }
}

/// Structural equality up to reordering and reassociation of `+` and `*`.
#[must_use]
pub fn equivalent(a: &Expr, b: &Expr) -> bool {
    a == b || canonical(a) == canonical(b)
}

/// Flattens a top-level `*` chain into its operands, left to right.
///
/// A non-product yields a single-element list.
#[must_use]
pub fn multiplicative_factors(expr: &Arc<Expr>) -> Vec<Arc<Expr>> {
    let mut out = Vec::new();
    collect_factors(expr, &mut out);
    out
}

fn collect_factors(expr: &Arc<Expr>, out: &mut Vec<Arc<Expr>>) {
    match expr.as_binary(BinaryOp::Mul) {
        Some((left, right)) => {
            collect_factors(left, out);
            collect_factors(right, out);
        }
        None => out.push(Arc::clone(expr)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::ident("x")
    }

    fn y() -> Expr {
        Expr::ident("y")
    }

    #[test]
    fn test_commutative_equivalence() {
        assert!(equivalent(&(x() + 2), &(2 + x())));
        assert!(equivalent(&(x() * y() * 3), &(3 * (y() * x()))));
        assert!(equivalent(
            &((x() + 1) * (x() - 1)),
            &((x() - 1) * (1 + x()))
        ));
    }

    #[test]
    fn test_non_commutative_ops_keep_order() {
        assert!(!equivalent(&(x() - 2), &(2 - x())));
        assert!(!equivalent(&x().powi(2), &Expr::pow(Expr::integer(2), x())));
    }

    #[test]
    fn test_nested_chains_flatten() {
        let a = (x() + y()) + 1;
        let b = x() + (y() + 1);
        assert!(equivalent(&a, &b));
        assert_eq!(canonical(&a), canonical(&b));
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let e = 3 * (y() + x()) * Expr::call("sin", vec![x() * 2]);
        let once = canonical(&e);
        assert_eq!(canonical(&once), once);
    }

    #[test]
    fn test_multiplicative_factors() {
        let e = Arc::new(3 * (x() + 1) * (x() - 1));
        let factors = multiplicative_factors(&e);
        assert_eq!(factors.len(), 3);
        assert!(factors[0].is_integer_value(3));
        assert_eq!(multiplicative_factors(&Arc::new(x())).len(), 1);
    }
}
