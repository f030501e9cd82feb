//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    /// Mostly small values, with zero drawn often.
    fn int_or_zero() -> impl Strategy<Value = i64> {
        prop_oneof![Just(0i64), small_int()]
    }

    proptest! {
        #[test]
        fn gcd_divides_both(a in int_or_zero(), b in int_or_zero()) {
            let (a, b) = (Integer::new(a), Integer::new(b));
            let g = a.gcd(&b);
            prop_assert!(!g.is_negative());
            prop_assert_eq!(&g, &b.gcd(&a));
            if g.is_zero() {
                prop_assert!(a.is_zero() && b.is_zero());
            } else {
                prop_assert!(a.is_divisible_by(&g));
                prop_assert!(b.is_divisible_by(&g));
            }
        }

        #[test]
        fn gcd_times_lcm(a in int_or_zero(), b in int_or_zero()) {
            let (a, b) = (Integer::new(a), Integer::new(b));
            prop_assert_eq!(&a.gcd(&b) * &a.lcm(&b), (&a * &b).abs());
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let (a, b, c) = (Integer::new(a), Integer::new(b), Integer::new(c));
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn floor_div_brackets_quotient(a in small_int(), d in non_zero_int()) {
            let (a, d) = (Integer::new(a), Integer::new(d));
            let q = a.floor_div(&d);
            let r = &a - &(&q * &d);
            // the remainder has the sign of the divisor and is smaller in magnitude
            prop_assert!(r.is_zero() || r.is_negative() == d.is_negative());
            prop_assert!(r.abs() < d.abs());
        }

        #[test]
        fn rem_euclid_in_range(a in small_int(), m in non_zero_int()) {
            let (a, m) = (Integer::new(a), Integer::new(m));
            let r = a.rem_euclid(&m);
            prop_assert!(!r.is_negative());
            prop_assert!(r < m.abs());
            prop_assert!((&a - &r).is_divisible_by(&m));
        }

        #[test]
        fn nth_root_of_power_is_exact(base in -60i64..60, n in 1u32..6) {
            let b = Integer::new(base);
            let p = b.pow(n);
            let root = p.nth_root_exact(n);
            if n % 2 == 0 {
                prop_assert_eq!(root, Some(b.abs()));
            } else {
                prop_assert_eq!(root, Some(b));
            }
        }

        #[test]
        fn nth_root_floor_brackets(a in 0i64..100_000, n in 2u32..5) {
            let a = Integer::new(a);
            let r = a.nth_root_floor(n).unwrap();
            prop_assert!(r.pow(n) <= a);
            prop_assert!((&r + &Integer::one()).pow(n) > a);
        }

        #[test]
        fn divisors_divide(a in non_zero_int()) {
            let a = Integer::new(a);
            for d in a.divisors(10_000).unwrap() {
                prop_assert!(a.is_divisible_by(&d));
            }
        }

        #[test]
        fn rational_mul_inverse(n in non_zero_int(), d in non_zero_int()) {
            let r = Rational::from_i64(n, d);
            prop_assert_eq!(&r * &r.recip().unwrap(), Rational::one());
        }

        #[test]
        fn rational_round_within_half(n in small_int(), d in non_zero_int()) {
            let r = Rational::from_i64(n, d);
            let diff = &Rational::from_integer(r.round()) - &r;
            prop_assert!(diff.abs() <= Rational::from_i64(1, 2));
        }
    }
}
