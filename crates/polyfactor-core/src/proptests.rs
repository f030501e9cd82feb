//! Property-based tests for canonical forms and expansion.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::canonical::{canonical, equivalent};
    use crate::expr::Expr;
    use crate::normalize::{algebraically_equal, expand, normalize};

    fn leaf() -> impl Strategy<Value = Expr> {
        prop_oneof![
            (-9i64..10).prop_map(Expr::integer),
            prop_oneof![Just("x"), Just("y")].prop_map(Expr::ident),
        ]
    }

    fn small_expr() -> impl Strategy<Value = Expr> {
        leaf().prop_recursive(3, 16, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a + b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a - b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a * b),
                (inner.clone(), 0u32..3).prop_map(|(a, k)| a.powi(k)),
                inner.prop_map(|a| -a),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_is_idempotent(e in small_expr()) {
            let once = canonical(&e);
            prop_assert_eq!(canonical(&once), once);
        }

        #[test]
        fn sum_order_is_irrelevant(a in small_expr(), b in small_expr()) {
            prop_assert!(equivalent(&(a.clone() + b.clone()), &(b + a)));
        }

        #[test]
        fn equivalent_implies_algebraically_equal(a in small_expr(), b in small_expr()) {
            let left = a.clone() * b.clone();
            let right = b * a;
            prop_assert!(equivalent(&left, &right));
            prop_assert!(algebraically_equal(&left, &right));
        }

        #[test]
        fn product_of_linears_expands(r in -9i64..10, s in -9i64..10) {
            let x = Expr::ident("x");
            let product = (x.clone() + r) * (x.clone() + s);
            let expanded = x.powi(2) + (r + s) * x + r * s;
            prop_assert!(algebraically_equal(&product, &expanded));
        }

        #[test]
        fn normalize_preserves_value(e in small_expr()) {
            prop_assert!(algebraically_equal(&e, &normalize(&e)));
        }

        #[test]
        fn expand_of_difference_with_self_is_zero(e in small_expr()) {
            prop_assert!(expand(&(e.clone() - e)).is_zero());
        }
    }
}
