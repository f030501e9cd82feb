//! Arbitrary precision integers.
//!
//! `Integer` wraps `dashu::IBig` and adds the number-theoretic helpers the
//! factorization engine leans on: exact square and n-th roots, floor
//! division, Euclidean remainders and bounded divisor enumeration.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses an integer written in the given radix.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// The integer 0.
    #[must_use]
    pub fn zero() -> Self {
        Self(IBig::ZERO)
    }

    /// The integer 1.
    #[must_use]
    pub fn one() -> Self {
        Self(IBig::ONE)
    }

    /// Returns true for 0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == IBig::ZERO
    }

    /// Returns true for 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
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

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if this integer is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Number of bits in the magnitude.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Non-negative greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        // dashu rejects gcd(0, 0)
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Non-negative least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        (&(self / &g) * other).abs()
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Converts to an i64 when the value fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Converts to a u64 when the value fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.clone().try_into().ok()
    }

    /// Computes self^exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Quotient rounded towards negative infinity.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn floor_div(&self, divisor: &Self) -> Self {
        assert!(!divisor.is_zero(), "division by zero");
        let q = self / divisor;
        let r = self - &(&q * divisor);
        if !r.is_zero() && r.is_negative() != divisor.is_negative() {
            q - Self::one()
        } else {
            q
        }
    }

    /// Remainder in `[0, |modulus|)`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    #[must_use]
    pub fn rem_euclid(&self, modulus: &Self) -> Self {
        assert!(!modulus.is_zero(), "division by zero");
        let m = modulus.abs();
        let r = self % &m;
        if r.is_negative() {
            r + m
        } else {
            r
        }
    }

    /// Returns `self / divisor` when the division leaves no remainder.
    #[must_use]
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        let q = self / divisor;
        if &(&q * divisor) == self {
            Some(q)
        } else {
            None
        }
    }

    /// Returns true if `divisor` divides `self`.
    #[must_use]
    pub fn is_divisible_by(&self, divisor: &Self) -> bool {
        if divisor.is_zero() {
            return self.is_zero();
        }
        (self % divisor).is_zero()
    }

    /// Floor of the n-th root of a non-negative integer.
    ///
    /// Returns `None` for negative input or `n == 0`.
    #[must_use]
    pub fn nth_root_floor(&self, n: u32) -> Option<Self> {
        if n == 0 || self.is_negative() {
            return None;
        }
        if n == 1 || self <= &Self::one() {
            return Some(self.clone());
        }

        // Newton from above: x_{k+1} = ((n-1) x_k + a / x_k^(n-1)) / n
        let bits = u32::try_from(self.bit_len()).ok()?;
        let mut x = Self::new(2).pow(bits.div_ceil(n));
        let n_int = Self::from(n);
        let n_minus_one = Self::from(n - 1);
        loop {
            let y = (&(&x * &n_minus_one) + &(self / &x.pow(n - 1))) / &n_int;
            if y >= x {
                return Some(x);
            }
            x = y;
        }
    }

    /// The exact n-th root, if `self` is a perfect n-th power.
    ///
    /// Negative inputs have a root only for odd `n`.
    #[must_use]
    pub fn nth_root_exact(&self, n: u32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        if self.is_negative() {
            if n % 2 == 0 {
                return None;
            }
            return self.abs().nth_root_exact(n).map(|r| -r);
        }
        let r = self.nth_root_floor(n)?;
        (&r.pow(n) == self).then_some(r)
    }

    /// The exact square root, if `self` is a perfect square.
    #[must_use]
    pub fn sqrt_exact(&self) -> Option<Self> {
        self.nth_root_exact(2)
    }

    /// Positive divisors of `|self|` in increasing order.
    ///
    /// Returns `None` for zero or when `|self|` exceeds `limit`; the
    /// enumeration is trial division up to the square root.
    #[must_use]
    pub fn divisors(&self, limit: u64) -> Option<Vec<Self>> {
        let n = self.abs().to_u64()?;
        if n == 0 || n > limit {
            return None;
        }
        let mut small = Vec::new();
        let mut large = Vec::new();
        let mut d = 1u64;
        while d * d <= n {
            if n % d == 0 {
                small.push(Self::from(d));
                if d * d != n {
                    large.push(Self::from(n / d));
                }
            }
            d += 1;
        }
        small.extend(large.into_iter().rev());
        Some(small)
    }

    /// Splits a positive integer as `m^2 * r`, pulling out square factors
    /// whose root is at most `limit`.
    ///
    /// Returns `(m, r)`. For non-positive input returns `(1, self)`.
    #[must_use]
    pub fn square_part(&self, limit: u64) -> (Self, Self) {
        let mut m = Self::one();
        let mut r = self.clone();
        if !r.is_positive() {
            return (m, r);
        }
        let mut d = 2u64;
        while d <= limit {
            let d_int = Self::from(d);
            let d_sq = &d_int * &d_int;
            if d_sq > r {
                break;
            }
            while let Some(q) = r.div_exact(&d_sq) {
                r = q;
                m = m * &d_int;
            }
            d += 1;
        }
        (m, r)
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == IBig::ZERO
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Implements a binary operator for every owned/borrowed combination by
/// forwarding to `IBig`.
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&Integer> for Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait<Integer> for &Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer($trait::$method(&self.0, rhs.0))
            }
        }

        impl $trait<&Integer> for &Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);
forward_binop!(Rem, rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(IBig::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}
