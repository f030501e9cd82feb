//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::dense::DensePoly;
    use polyfactor_integers::{Integer, Rational};

    fn small_poly() -> impl Strategy<Value = DensePoly<Integer>> {
        proptest::collection::vec(-20i64..20i64, 1..=5).prop_map(|c| DensePoly::from_i64s(&c))
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Integer>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    /// Like `small_poly`, but with many zero coefficients.
    fn sparse_poly() -> impl Strategy<Value = DensePoly<Integer>> {
        proptest::collection::vec(prop_oneof![Just(0i64), -20i64..20i64], 1..=6)
            .prop_map(|c| DensePoly::from_i64s(&c))
            .prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn div_exact_inverts_mul(a in nonzero_poly(), b in nonzero_poly()) {
            let product = a.mul(&b);
            prop_assert_eq!(product.div_exact(&b), Some(a));
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(), b in nonzero_poly(), g in nonzero_poly()) {
            let (ag, bg) = (a.mul(&g), b.mul(&g));
            let d = ag.gcd(&bg);
            prop_assert!(ag.is_divisible_by(&d));
            prop_assert!(bg.is_divisible_by(&d));
            // every common factor divides the gcd
            prop_assert!(d.is_divisible_by(&g.primitive_part()));
        }

        #[test]
        fn content_times_primitive(a in nonzero_poly()) {
            let (c, pp) = a.content_primitive();
            prop_assert_eq!(pp.scale(&c), a);
            prop_assert!(pp.content().is_one());
        }

        #[test]
        fn sparse_content_times_primitive(a in sparse_poly()) {
            let (c, pp) = a.content_primitive();
            prop_assert_eq!(pp.scale(&c), a);
            prop_assert!(pp.content().is_one());
        }

        #[test]
        fn sparse_gcd_divides_both(a in sparse_poly(), b in sparse_poly()) {
            let d = a.gcd(&b);
            prop_assert!(a.is_divisible_by(&d));
            prop_assert!(b.is_divisible_by(&d));
        }

        #[test]
        fn field_division_identity(a in small_poly(), b in nonzero_poly()) {
            let (a, b) = (a.to_rational(), b.to_rational());
            let (q, r) = a.div_rem(&b).unwrap();
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn from_rational_clears_denominators(num in proptest::collection::vec(-20i64..20, 1..=4), den in 1i64..7) {
            let q = DensePoly::new(num.iter().map(|&n| Rational::from_i64(n, den)).collect());
            let (scale, p) = DensePoly::from_rational(&q);
            prop_assert_eq!(p.to_rational(), q.scale(&Rational::from_integer(scale)));
        }
    }
}
