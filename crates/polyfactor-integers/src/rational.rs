//! Arbitrary precision rational numbers.
//!
//! Rationals are the coefficient field of the polynomial view: every
//! coefficient the engine reads off an expression tree is one of these.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::Integer;

/// An arbitrary precision rational number.
///
/// Always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let negative = denominator.is_negative();
        let value = Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ));
        if negative {
            -value
        } else {
            value
        }
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// The rational 0.
    #[must_use]
    pub fn zero() -> Self {
        Self(RBig::ZERO)
    }

    /// The rational 1.
    #[must_use]
    pub fn one() -> Self {
        Self(RBig::ONE)
    }

    /// Returns true for 0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }

    /// Returns true for 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    /// Returns the numerator (carries the sign).
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the (positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numerator())
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal, or `None` for zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.clone().inv()))
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }

    /// Computes self^exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Largest integer not above `self`.
    #[must_use]
    pub fn floor(&self) -> Integer {
        self.numerator().floor_div(&self.denominator())
    }

    /// Nearest integer, halves rounded up.
    #[must_use]
    pub fn round(&self) -> Integer {
        let two = Integer::new(2);
        let num = &(&self.numerator() * &two) + &self.denominator();
        num.floor_div(&(&self.denominator() * &two))
    }

    /// The exact n-th root, if both numerator and denominator are perfect
    /// n-th powers.
    #[must_use]
    pub fn nth_root_exact(&self, n: u32) -> Option<Self> {
        let num = self.numerator().nth_root_exact(n)?;
        let den = self.denominator().nth_root_exact(n)?;
        Some(Self::new(num, den))
    }

    /// The exact square root of a non-negative perfect-square rational.
    #[must_use]
    pub fn sqrt_exact(&self) -> Option<Self> {
        self.nth_root_exact(2)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn test_basic_ops() {
        // 1/2 + 1/3 = 5/6
        assert_eq!(&q(1, 2) + &q(1, 3), q(5, 6));
        // 1/2 * 1/3 = 1/6
        assert_eq!(q(1, 2) * q(1, 3), q(1, 6));
        assert_eq!(q(1, 2) / q(1, 4), q(2, 1));
    }

    #[test]
    fn test_reduction_and_sign() {
        assert_eq!(q(4, 6), q(2, 3));
        assert_eq!(q(3, -4), q(-3, 4));
        assert_eq!(q(3, -4).denominator(), Integer::new(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(q(3, 1).to_string(), "3");
        assert_eq!(q(-2, 3).to_string(), "-2/3");
    }

    #[test]
    fn test_floor_round() {
        assert_eq!(q(7, 2).floor(), Integer::new(3));
        assert_eq!(q(-7, 2).floor(), Integer::new(-4));
        assert_eq!(q(7, 2).round(), Integer::new(4));
        assert_eq!(q(-7, 2).round(), Integer::new(-3));
        assert_eq!(q(5, 3).round(), Integer::new(2));
        assert_eq!(q(-5, 3).round(), Integer::new(-2));
    }

    #[test]
    fn test_exact_roots() {
        assert_eq!(q(4, 9).sqrt_exact(), Some(q(2, 3)));
        assert_eq!(q(2, 9).sqrt_exact(), None);
        assert_eq!(q(-8, 27).nth_root_exact(3), Some(q(-2, 3)));
        assert_eq!(q(0, 1).recip(), None);
        assert_eq!(q(-2, 5).recip(), Some(q(-5, 2)));
    }
}
